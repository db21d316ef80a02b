#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    clippy::suspicious,
    // missing_docs,
    clippy::nursery,
    rust_2018_idioms
)]

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod math;
pub mod metrics;
pub mod model;
pub mod settings;
pub mod tracing;
pub mod window;

pub use error::AnalysisError;

pub type Result<T> = anyhow::Result<T>;
