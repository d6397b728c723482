// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

use crate::application::port::CropRect;

/// Crate-wide error type.
///
/// Image service and configuration failures are recoverable and end up as
/// notifications. The context and widget lookup variants signal a broken
/// contract inside the application and are never shown to the user.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Decode Error: {0}")]
    Decode(String),

    #[error("Encode Error: {0}")]
    Encode(String),

    #[error("crop rectangle {0} is smaller than the minimum size")]
    DegenerateCrop(CropRect),

    #[error("no image is loaded")]
    NoImage,

    #[error("Config Error: {0}")]
    Config(String),

    #[error("invalid size spec `{input}`: {reason}")]
    SizeSpec { input: String, reason: String },

    /// A shared context key was read before being set or defaulted.
    #[error("context key `{0}` was never set")]
    KeyNotFound(&'static str),

    #[error("widget `{0}` not found")]
    WidgetNotFound(String),

    #[error("widget is not a {expected}")]
    WidgetKind { expected: &'static str },
}

impl Error {
    /// Returns true for errors that indicate a programming mistake rather
    /// than a user or environment problem.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::KeyNotFound(_) | Error::WidgetNotFound(_) | Error::WidgetKind { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
