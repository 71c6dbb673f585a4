//! Cluster located crime incidents from a CSV export and write a text report.
//!
//! Usage: `crime-clusters <input.csv> [--k 7] [--p 2] [--output output.txt] [--points clusters.csv]`

use clap::{Parser, ValueEnum};
use env_logger::Env;
use geokmeans::ingest::{read_incidents, to_samples, IngestOptions};
use geokmeans::report::{write_cluster_points, write_report};
use geokmeans::{EmptyClusterPolicy, KMeans, KMeansConfig, MinkowskiDistance, DEFAULT_SEED};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmptyClusters {
    Keep,
    Steal,
    Abort,
}
impl From<EmptyClusters> for EmptyClusterPolicy {
    fn from(value: EmptyClusters) -> Self {
        match value {
            EmptyClusters::Keep => EmptyClusterPolicy::KeepPrevious,
            EmptyClusters::Steal => EmptyClusterPolicy::StealFarthest,
            EmptyClusters::Abort => EmptyClusterPolicy::Abort,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Incident export (CSV with header line)
    input: PathBuf,

    /// Number of clusters
    #[arg(short, long, default_value_t = 7)]
    k: usize,

    /// Exponent of the minkowski distance (2 = euclidean)
    #[arg(short, long, default_value_t = 2.0)]
    p: f64,

    /// Maximum number of iterations
    #[arg(long, default_value_t = 300)]
    max_iter: usize,

    /// Seed of the initial centroid selection
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Wall-clock limit of the iteration phase in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Handling of clusters that lose all of their incidents
    #[arg(long, value_enum, default_value_t = EmptyClusters::Keep)]
    empty_clusters: EmptyClusters,

    /// Maximum number of incidents to read
    #[arg(long, default_value_t = 500)]
    max_records: usize,

    /// Report file
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Optional `cluster,longitude,latitude` export for plotting
    #[arg(long)]
    points: Option<PathBuf>,

    /// Fail if the centroids did not settle
    #[arg(long)]
    require_convergence: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", "info"));
    let args = Args::parse();

    let options = IngestOptions { max_records: Some(args.max_records), ..Default::default() };
    let incidents = read_incidents::<f64, _>(BufReader::new(File::open(&args.input)?), &options)?;
    let (samples, labels) = to_samples(&incidents);

    let kmean = KMeans::new(samples, incidents.len(), 2, MinkowskiDistance::new(args.p)?)?;
    let mut conf = KMeansConfig::build()
        .seed(args.seed)
        .empty_cluster_policy(args.empty_clusters.into());
    if let Some(secs) = args.timeout {
        conf = conf.timeout(Duration::from_secs(secs));
    }
    let conf = conf.build();

    let mut state = kmean.kmeans_lloyd(args.k, args.max_iter, KMeans::init_lcg_sample, &conf)?;
    if args.require_convergence {
        state = state.ensure_converged()?;
    }

    let records = kmean.labeled_records(&state, &labels)?;
    let source = args.input.display().to_string();
    write_report(BufWriter::new(File::create(&args.output)?), &source, &state, &records)?;
    info!("wrote report to {}", args.output.display());

    if let Some(path) = &args.points {
        write_cluster_points(BufWriter::new(File::create(path)?), &kmean.cluster_points(&state))?;
        info!("wrote cluster points to {}", path.display());
    }

    Ok(())
}
