use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("no usable training rows (every employee is missing tenure)")]
    NoTrainingRows,

    #[error("training split contains only one class (attrition = {0})")]
    SingleClass(&'static str),

    #[error("unknown {feature} level '{value}' (known: {known})")]
    UnknownLevel {
        feature: &'static str,
        value: String,
        known: String,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ComputeError>;
