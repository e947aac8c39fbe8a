use thiserror::Error;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("table '{table}' has duplicate key '{key}'")]
    DuplicateKey { table: String, key: String },

    #[error("table '{table}' row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("unmapped {dimension} code {code}")]
    UnmappedCode { dimension: &'static str, code: u8 },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HrError>;
