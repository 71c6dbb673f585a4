//! # geokmeans - API documentation
//!
//! Geokmeans is a small rust library for clustering located incident records (e.g. crime reports)
//! into spatial groups, using k-means clustering.
//!
//! ## Design target
//! The clustering itself is fully deterministic: the initial centroids are drawn by a seeded linear
//! congruential index sequence instead of a random number generator, ties are broken by centroid id,
//! and centroid sums are accumulated in input order. Same samples, same parameters, same result.
//! Samples are given as a raw row-major vector, instead of any high-level matrix crate.
//!
//! ## Supported variants
//! - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
//!
//! ## Supported centroid initializations
//! - Seeded index sequence [`KMeans::init_lcg_sample`]
//! - Precomputed centroids [`KMeans::init_precomputed`]
//!
//! ## Supported distances
//! - [`MinkowskiDistance`] with any finite exponent `p > 0` (`p = 2` is euclidean)
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use geokmeans::*;
//!
//! let samples = vec![
//!     -76.61961f64, 39.29164, -76.61900, 39.29100,
//!     -76.60463, 39.32736, -76.60400, 39.32700,
//! ];
//! let labels = ["LARCENY", "ROBBERY", "BURGLARY", "ARSON"];
//!
//! let kmean = KMeans::new(samples, 4, 2, MinkowskiDistance::new(2.0).unwrap()).unwrap();
//! let result = kmean.kmeans_lloyd(2, 300, KMeans::init_lcg_sample, &KMeansConfig::default()).unwrap();
//!
//! println!("Initial centroids: {:?}", result.initial_centroids);
//! println!("Final centroids: {:?}", result.centroids);
//! println!("Iterations: {} ({})", result.iterations, result.status);
//! for record in kmean.labeled_records(&result, &labels).unwrap() {
//!     println!("{} : {:<40}{:?}", record.cluster, record.label, record.point);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use geokmeans::*;
//!
//! let samples = vec![0.0f64, 0.0, 0.0, 1.0, 10.0, 10.0, 10.0, 11.0];
//!
//! let init_done = |_: &KMeansState<f64>| println!("Initialization completed.");
//! let iteration_done = |s: &KMeansState<f64>, nr: usize, new_distsum: f64|
//!     println!("Iteration {} - Error: {:.2} -> {:.2}", nr, s.distsum, new_distsum);
//! let conf = KMeansConfig::build()
//!     .init_done(&init_done)
//!     .iteration_done(&iteration_done)
//!     .empty_cluster_policy(EmptyClusterPolicy::StealFarthest)
//!     .build();
//!
//! let kmean = KMeans::new(samples, 4, 2, MinkowskiDistance::euclidean()).unwrap();
//! let result = kmean.kmeans_lloyd(2, 100, KMeans::init_lcg_sample, &conf).unwrap();
//! assert!(result.is_converged());
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It is generic over the underlying primitive type and
//! the distance function. To use KMeans, an instance of this struct is created, taking over the sample data
//! into its ownership.
//!
//! The [`KMeans`] struct's instance-methods represent the supported k-Means variants. Calling such a method
//! does not mutate the struct, a new instance of [`KMeansState`] is used to store the state (and finally the
//! result) of a calculation. Calculations are bounded by `max_iter` (and optionally a timeout), the reason a
//! calculation stopped is reported in [`KMeansState::status`].
//!
//! Around the clustering, [`ingest`] reads incidents from CSV exports and [`report`] writes the
//! resulting text report and plot points.

#[macro_use] mod helpers;
mod memory;
mod api;
mod error;
mod variants;
mod inits;
mod distances;
mod abort_strategy;
pub mod ingest;
pub mod report;

pub use abort_strategy::AbortStrategy;
pub use api::{
    ConvergenceStatus, DistanceFunction, EmptyClusterPolicy, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState,
    LabeledRecord, DEFAULT_SEED,
};
pub use distances::MinkowskiDistance;
pub use error::KMeansError;
pub use inits::{LcgIndices, LcgParams};
pub use memory::Primitive;
