//! # cdist timings
//!
//! Times two ways of finding the closest pair of rows between two random
//! embedding matrices under cosine distance, and reports how much faster
//! the vectorised approach is.
//!
//! ## Core Concepts
//!
//! - **Loop matcher**: one cosine-distance call per row of matrix A
//! - **Vectorised matcher**: a single call over the whole of matrix A
//! - **Harness**: regenerates data for each timing run, times both matchers
//!   `repeats` times and prints averages and the speed-up
//!
//! ## Example
//!
//! ```rust,no_run
//! use cdist_timings::{Config, Harness};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut harness = Harness::new(Config::default())?;
//!     let report = harness.run(&mut std::io::stdout())?;
//!
//!     for case in report.cases {
//!         println!("{} x {}: {:.1}x", case.dimension, case.vector_length, case.speedup);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod generator;
pub mod harness;
pub mod matcher;
pub mod timing;

pub use crate::config::{Config, MatcherConfig, SweepConfig};
pub use crate::distance::{argmin, cosine_distance};
pub use crate::error::{BenchError, Result};
pub use crate::generator::{DataGenerator, MatrixPair};
pub use crate::harness::{BenchReport, CaseReport, Harness, RunReport};
pub use crate::matcher::{
    create_matcher, ClosestPair, LoopMatcher, Matcher, MatcherKind, VectorisedMatcher,
};
pub use crate::timing::{mean, speedup, Samples, Timer};
