use either::{Either, Left, Right};
use thiserror::Error;
use validator::ValidationErrors;

/// Labels an error for the `analysis_errors` metric. The label is built by walking `next()` until a
/// terminal slug is reached, joining each step with `::`.
pub trait MetricLabel {
    fn slug(&self) -> String;

    fn next(&self) -> Either<String, Box<&dyn MetricLabel>>;

    fn label(&self) -> String {
        match self.next() {
            Left(terminal) => format!("{}::{}", self.slug(), terminal),
            Right(inner) => format!("{}::{}", self.slug(), inner.label()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Construction rejected because a parameter is out of range or a metric cannot be decomposed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("settings failed validation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    /// A sample was rejected by the window; the window state is unchanged.
    #[error("invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("listener expecting window data metric {given} cannot observe window accepting {accepted}")]
    IncompatibleListener { accepted: String, given: String },
}

impl AnalysisError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn invalid_measurement(message: impl Into<String>) -> Self {
        Self::InvalidMeasurement(message.into())
    }

    /// True for failures raised while building a window, aggregator or filter.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::Validation(_) | Self::Settings(_)
        )
    }
}

impl MetricLabel for AnalysisError {
    fn slug(&self) -> String {
        "analysis".into()
    }

    fn next(&self) -> Either<String, Box<&dyn MetricLabel>> {
        match self {
            Self::InvalidConfiguration(_) => Left("configuration".into()),
            Self::Validation(_) => Left("configuration::validation".into()),
            Self::Settings(_) => Left("configuration::settings".into()),
            Self::InvalidMeasurement(_) => Left("window::measurement".into()),
            Self::IncompatibleListener { .. } => Left("window::listener".into()),
        }
    }
}
