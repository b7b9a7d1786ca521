//! General-purpose unit conversions applied ahead of code resolution
//!
//! Exactly two conversions exist: centimetres/second to metres/second for
//! velocity-family channels, and kilopascal to decibar for pressure channels.
//! Any other input unit is a hard failure, because downstream resolver
//! lookups assume converted units.

use crate::constants::factors;
use crate::{Error, Result};
use std::fmt;
use tracing::debug;

/// Physical-quantity family a conversion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityFamily {
    Velocity,
    Pressure,
}

impl fmt::Display for QuantityFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityFamily::Velocity => f.write_str("velocity"),
            QuantityFamily::Pressure => f.write_str("pressure"),
        }
    }
}

/// Whether a velocity channel's units call for conversion
pub fn needs_velocity_conversion(units: &str) -> bool {
    units.trim().eq_ignore_ascii_case("cm/s")
}

/// Whether a pressure channel's units call for conversion
pub fn needs_pressure_conversion(units: &str) -> bool {
    let normalized = units.trim().to_lowercase();
    normalized == "kpascal" || normalized == "kilopascal"
}

/// Convert sample data to the family's canonical units
///
/// Returns the canonical unit string and the scaled samples. Fails with
/// [`Error::UnsupportedUnit`] for any unit string outside the closed set.
pub fn convert(family: QuantityFamily, raw_units: &str, data: &[f64]) -> Result<(String, Vec<f64>)> {
    let normalized = raw_units.trim().to_lowercase();

    let (canonical, factor) = match family {
        QuantityFamily::Velocity if normalized == "cm/s" => {
            ("m/s", factors::CM_PER_S_TO_M_PER_S)
        }
        QuantityFamily::Pressure if normalized == "kpascal" || normalized == "kilopascal" => {
            ("decibar", factors::KILOPASCAL_TO_DECIBAR)
        }
        _ => return Err(Error::unsupported_unit(family.to_string(), raw_units)),
    };

    debug!(
        "Converting {} samples from '{}' to '{}'",
        data.len(),
        raw_units.trim(),
        canonical
    );

    let converted = data.iter().map(|v| v * factor).collect();
    Ok((canonical.to_string(), converted))
}
