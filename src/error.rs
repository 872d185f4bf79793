use std::path::PathBuf;

/// Boundary failures. The formulas are total; these come from input
/// parsing, lookups by name, or output I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{param} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown disease profile: {0}")]
    UnknownDisease(String),

    #[error("unknown interface language: {0}")]
    UnknownLanguage(String),

    #[error("unknown dashboard variant: {0}")]
    UnknownVariant(String),

    #[error("invalid hex color: {0}")]
    InvalidColor(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parameter file {path} is malformed: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("writing image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
