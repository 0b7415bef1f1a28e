//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid generator configuration, invalid query arguments, and generic errors.
use thiserror::Error;

use crate::cell::MAX_COORDINATE;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

/// Rejects coordinates the cell grid cannot address.
///
/// NaN and infinite values are refused, and so are finite values whose magnitude
/// exceeds [`MAX_COORDINATE`]: past that bound cell indices lose integer precision and
/// distinct cells would collapse onto one cache entry.
pub(crate) fn ensure_coordinates(x: f64, y: f64) -> Result<()> {
    if !(x.is_finite() && y.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "coordinates must be finite, got ({x}, {y})"
        )));
    }
    if x.abs() > MAX_COORDINATE || y.abs() > MAX_COORDINATE {
        return Err(Error::InvalidArgument(format!(
            "coordinates must be within +/-{MAX_COORDINATE}, got ({x}, {y})"
        )));
    }
    Ok(())
}
