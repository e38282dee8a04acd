use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("could not decode input as any of: {}", .encodings.join(", "))]
    Decoding { encodings: Vec<&'static str> },

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("cannot summarize an empty series")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
