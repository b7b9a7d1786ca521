//! IOS Ocean Data Processor Library
//!
//! A Rust library for converting Institute of Ocean Sciences (IOS) instrument
//! records (CTD, current meter, mooring and bottle files) into standardized,
//! CF-compliant variable sets keyed by BODC parameter codes.
//!
//! This library provides tools for:
//! - Classifying free-text instrument channel names into physical quantity kinds
//! - Resolving BODC parameter codes, canonical units, standard names and long
//!   names from raw channel name/unit text, with per-record code uniqueness
//! - Converting velocity and pressure units ahead of code resolution
//! - Normalizing file-declared pad/sentinel values to NaN
//! - Assembling complete output records (variables plus CF global attributes)
//!   ready for a NetCDF container writer

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod channel_classifier;
        pub mod code_resolver;
        pub mod null_normalizer;
        pub mod record_converter;
        pub mod unit_converter;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CanonicalVariable, ChannelSample, ConvertedRecord, QuantityKind, RawRecord};
pub use config::ConversionConfig;

/// Result type alias for the IOS processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for IOS record conversion
///
/// Two classes of failure exist (see [`Error::is_recoverable`]): fatal errors
/// abort conversion of the current record, while recoverable errors cause the
/// offending channel to be reported and dropped from the output.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Record serialization/deserialization error
    #[error("JSON error in '{context}': {message}")]
    Json {
        context: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Channel units match no pattern the resolver recognizes for the kind
    #[error("unrecognized units '{units}' for {kind} channel '{name}'")]
    UnrecognizedUnits {
        kind: app::models::QuantityKind,
        name: String,
        units: String,
    },

    /// Unit conversion requested for units outside the supported set
    #[error("unsupported input units '{units}' for {family} conversion")]
    UnsupportedUnit { family: String, units: String },

    /// The resolver has no branch for a quantity kind. Indicates a defect in
    /// classifier/resolver coverage, not a user data problem.
    #[error("no resolver branch for quantity kind {kind}")]
    NoResolverBranch { kind: app::models::QuantityKind },

    /// All code candidates for a stem collided with already-assigned codes
    #[error("code space exhausted for stem '{stem}' while resolving channel '{name}'")]
    CodeSpaceExhausted { stem: String, name: String },

    /// Flag channel whose predecessor code violates the naming precondition
    #[error("flag channel '{name}' cannot pair with non-BODC code '{previous}'")]
    FlagPairing { name: String, previous: String },

    /// Record metadata failed validation
    #[error("record metadata error: {message}")]
    RecordMetadata { message: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Resolution table failed startup validation
    #[error("resolution table error: {message}")]
    TableValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(
        context: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::Json {
            context: context.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an unrecognized-units error
    pub fn unrecognized_units(
        kind: app::models::QuantityKind,
        name: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        Self::UnrecognizedUnits {
            kind,
            name: name.into(),
            units: units.into(),
        }
    }

    /// Create an unsupported-unit error
    pub fn unsupported_unit(family: impl Into<String>, units: impl Into<String>) -> Self {
        Self::UnsupportedUnit {
            family: family.into(),
            units: units.into(),
        }
    }

    /// Create a code-space-exhausted error
    pub fn code_space_exhausted(stem: impl Into<String>, name: impl Into<String>) -> Self {
        Self::CodeSpaceExhausted {
            stem: stem.into(),
            name: name.into(),
        }
    }

    /// Create a flag pairing error
    pub fn flag_pairing(name: impl Into<String>, previous: impl Into<String>) -> Self {
        Self::FlagPairing {
            name: name.into(),
            previous: previous.into(),
        }
    }

    /// Create a record metadata error
    pub fn record_metadata(message: impl Into<String>) -> Self {
        Self::RecordMetadata {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a table validation error
    pub fn table_validation(message: impl Into<String>) -> Self {
        Self::TableValidation {
            message: message.into(),
        }
    }

    /// Whether this error affects only the offending channel
    ///
    /// Recoverable errors are reported and the channel is omitted from the
    /// output record; everything else aborts conversion of the whole record.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CodeSpaceExhausted { .. } | Self::FlagPairing { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            context: "unknown".to_string(),
            message: "JSON processing failed".to_string(),
            source: Some(error),
        }
    }
}
