//! Text report and plot-point export of a finished calculation.

use crate::{api::LabeledRecord, ConvergenceStatus, KMeansError, KMeansState, Primitive};
use std::io::Write;

/// Whole numbers keep a trailing `.0`, so coordinates always read as reals (`10.0`, not `10`).
fn fmt_coord<T: Primitive>(v: T) -> String {
    if v.is_finite() && v.fract() == T::zero() {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

fn fmt_tuple<T: Primitive>(point: &[T], open: char, close: char) -> String {
    let coords: Vec<String> = point.iter().map(|&v| fmt_coord(v)).collect();
    format!("{}{}{}", open, coords.join(", "), close)
}

/// Write the human readable clustering report: initial and final centroids, iteration count and the
/// labeled dataset (expected to be sorted by cluster, as returned by [`crate::KMeans::labeled_records`]).
pub fn write_report<T: Primitive, W: Write>(
    mut out: W, source: &str, state: &KMeansState<T>, records: &[LabeledRecord<'_, T>],
) -> Result<(), KMeansError> {
    writeln!(out, "K-Means Clustering Output from {}", source)?;
    writeln!(out, "K = {}", state.k)?;

    writeln!(out, "\nInitial Centroids:")?;
    for c in state.initial_centroids_iter() {
        writeln!(out, "{}", fmt_tuple(c, '(', ')'))?;
    }
    writeln!(out, "\nFinal Centroids:")?;
    for c in state.centroids_iter() {
        writeln!(out, "{}", fmt_tuple(c, '(', ')'))?;
    }

    writeln!(out, "\nIterations: {}", state.iterations)?;
    if state.status != ConvergenceStatus::Converged {
        writeln!(out, "Status: {}", state.status)?;
    }
    if !state.empty_clusters.is_empty() {
        writeln!(out, "Empty clusters: {:?}", state.empty_clusters)?;
    }

    writeln!(out, "\nLabeled Dataset:")?;
    for r in records {
        writeln!(out, "{} : {:<40}{}", r.cluster, r.label, fmt_tuple(r.point, '[', ']'))?;
    }
    out.flush()?;
    Ok(())
}

/// Write `cluster,longitude,latitude` rows, one per sample in input order. Coordinates are written
/// exactly as they were read, no reprojection takes place.
pub fn write_cluster_points<T: Primitive, W: Write>(mut out: W, points: &[(usize, &[T])]) -> Result<(), KMeansError> {
    writeln!(out, "cluster,longitude,latitude")?;
    for (cluster, point) in points {
        let coords: Vec<String> = point.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{},{}", cluster, coords.join(","))?;
    }
    out.flush()?;
    Ok(())
}
