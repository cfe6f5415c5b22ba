use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("backend failure: {0}")]
    Backend(String),

    #[error("no drawable surface could be resolved from the chart target")]
    UnresolvableSurface,

    #[error("host does not support resize observation")]
    ResizeUnsupported,
}
