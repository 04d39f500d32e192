use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad argument to a matrix primitive (axis selector, empty softmax input)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Feature/label/parameter shapes do not line up
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Inference requested before `train` set any parameters
    #[error("Network has not been trained")]
    NotTrained,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed field on line {line}, column {column}: {value:?}")]
    MalformedField {
        line: u64,
        column: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Unknown class label on line {line}: {label:?}")]
    UnknownLabel { line: u64, label: String },

    #[error("Dataset needs feature columns and a label column, found {found} column(s)")]
    MissingColumns { found: usize },

    #[error("Dataset has no records")]
    EmptyDataset,
}

impl Error {
    /// True for failures raised while reading a dataset
    pub fn is_ingestion(&self) -> bool {
        matches!(
            self,
            Error::Csv(_)
                | Error::Io(_)
                | Error::MalformedField { .. }
                | Error::UnknownLabel { .. }
                | Error::MissingColumns { .. }
                | Error::EmptyDataset
        )
    }
}
