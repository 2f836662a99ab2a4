use thiserror::Error;

/// Errors that can occur while loading or summarizing park inventory data.
#[derive(Error, Debug)]
pub enum ParkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing column: '{column}' is not part of the dataset schema")]
    MissingColumn { column: String },

    #[error("Malformed value '{value}' in column '{column}' at record {row}{}", label_suffix(.label))]
    MalformedValue {
        row: usize,
        label: Option<String>,
        column: String,
        value: String,
    },

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Schema mismatch at record {row}: {detail}")]
    SchemaMismatch { row: usize, detail: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

fn label_suffix(label: &Option<String>) -> String {
    match label {
        Some(l) => format!(" ({l})"),
        None => String::new(),
    }
}

impl From<calamine::Error> for ParkError {
    fn from(e: calamine::Error) -> Self {
        ParkError::Excel(e.to_string())
    }
}

impl From<calamine::XlsxError> for ParkError {
    fn from(e: calamine::XlsxError) -> Self {
        ParkError::Excel(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ParkError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ParkError::Excel(e.to_string())
    }
}

impl From<toml::de::Error> for ParkError {
    fn from(e: toml::de::Error) -> Self {
        ParkError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for ParkError {
    fn from(e: toml::ser::Error) -> Self {
        ParkError::Config(e.to_string())
    }
}
