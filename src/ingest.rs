//! Reading incident records from comma separated exports.
//!
//! The reader is deliberately simple: fields are split on `,` without quote handling, the first line is
//! treated as header, and rows with an empty longitude or latitude field are skipped.

use crate::{KMeansError, Primitive};
use log::{debug, info};
use std::io::BufRead;

/// Column layout and limits of an incident export.
///
/// ## Default
/// Layout of the Baltimore crime export: label (description) in column `4`, longitude in `10`,
/// latitude in `11`, at most `500` records, with header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    pub label_column: usize,
    pub longitude_column: usize,
    pub latitude_column: usize,
    /// Stop after this many accepted records
    pub max_records: Option<usize>,
    pub has_header: bool,
}
impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            label_column: 4,
            longitude_column: 10,
            latitude_column: 11,
            max_records: Some(500),
            has_header: true,
        }
    }
}

/// A single located incident.
#[derive(Clone, Debug, PartialEq)]
pub struct Incident<T: Primitive> {
    pub label: String,
    pub longitude: T,
    pub latitude: T,
}

/// Read all incidents with both coordinates present.
///
/// ## Errors
/// - [`KMeansError::MalformedRecord`] if a row misses a configured column, or a coordinate is not a finite number
/// - [`KMeansError::Io`] if reading fails
pub fn read_incidents<T: Primitive, R: BufRead>(reader: R, options: &IngestOptions) -> Result<Vec<Incident<T>>, KMeansError> {
    let mut incidents = Vec::new();
    let mut skipped = 0usize;
    let required = options.label_column.max(options.longitude_column).max(options.latitude_column) + 1;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_nr = idx + 1;
        if options.has_header && idx == 0 {
            continue;
        }
        if options.max_records.map_or(false, |max| incidents.len() >= max) {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < required {
            return Err(KMeansError::MalformedRecord {
                line: line_nr,
                reason: format!("expected at least {} fields, got {}", required, fields.len()),
            });
        }
        let (lon, lat) = (fields[options.longitude_column].trim(), fields[options.latitude_column].trim());
        if lon.is_empty() || lat.is_empty() {
            skipped += 1;
            continue;
        }

        incidents.push(Incident {
            label: fields[options.label_column].trim().to_string(),
            longitude: parse_coordinate(lon, line_nr)?,
            latitude: parse_coordinate(lat, line_nr)?,
        });
    }

    if skipped > 0 {
        debug!("skipped {} rows without coordinates", skipped);
    }
    info!("read {} incidents", incidents.len());
    Ok(incidents)
}

fn parse_coordinate<T: Primitive>(field: &str, line: usize) -> Result<T, KMeansError> {
    field.parse::<f64>().ok()
        .filter(|v| v.is_finite())
        .and_then(T::from)
        .ok_or_else(|| KMeansError::MalformedRecord { line, reason: format!("'{}' is not a valid coordinate", field) })
}

/// Split incidents into row-major `(longitude, latitude)` samples and their labels.
pub fn to_samples<T: Primitive>(incidents: &[Incident<T>]) -> (Vec<T>, Vec<String>) {
    let samples = incidents.iter().flat_map(|i| [i.longitude, i.latitude]).collect();
    let labels = incidents.iter().map(|i| i.label.clone()).collect();
    (samples, labels)
}
