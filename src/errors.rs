use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("invalid amount: {input:?} is not a positive number")]
    InvalidAmount {
        input: String,
    },

    #[error("invalid date: {input:?}, expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
    },

    #[error("invalid number: {input:?}")]
    InvalidNumber {
        input: String,
    },

    #[error("invalid rate: {rate}% must not be negative")]
    InvalidRate {
        rate: Decimal,
    },

    #[error("invalid discount: {percent}% must be between 0 and 100")]
    InvalidDiscount {
        percent: Decimal,
    },

    #[error("amount overflow in {operation}")]
    AmountOverflow {
        operation: String,
    },

    #[error("division by zero in {operation}")]
    DivisionByZero {
        operation: String,
    },

    #[error("item not found: position {index} out of {len}")]
    ItemNotFound {
        index: usize,
        len: usize,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("unknown issuer: {id}")]
    UnknownIssuer {
        id: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl DocumentError {
    pub fn overflow(operation: &str) -> Self {
        DocumentError::AmountOverflow {
            operation: operation.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
