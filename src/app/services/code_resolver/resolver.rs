//! Code resolution and the uniqueness-retry protocol

use super::table::{self, SuffixStyle};
use crate::app::models::QuantityKind;
use crate::app::services::unit_converter::{self, QuantityFamily};
use crate::constants::{canonical_units as cu, FLAG_CODE_SUFFIX, MAX_CODE_ATTEMPTS};
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

/// Canonical identity of a resolved channel, plus the (possibly converted)
/// sample data
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub code: String,
    pub units: String,
    pub standard_name: Option<String>,
    pub long_name: Option<String>,
    pub data: Vec<f64>,
}

/// Resolve a classified channel to its canonical identity
///
/// `excluded_codes` is the set of codes already assigned within the record
/// being built; the returned code is guaranteed not to be in it. Sample data
/// is passed through any unit conversion the kind requires (general velocity/
/// pressure conversions, or the per-kind factors baked into the table).
pub fn resolve(
    kind: QuantityKind,
    raw_name: &str,
    raw_units: &str,
    data: Vec<f64>,
    excluded_codes: &HashSet<String>,
) -> Result<Resolution> {
    match kind {
        QuantityKind::Depth => fixed_coordinate(
            "depth",
            "depth",
            "Depth below surface",
            data,
            excluded_codes,
            raw_name,
        ),
        QuantityKind::DepthNominal => fixed_coordinate(
            "depth_nominal",
            "depth_nominal",
            "Depth below surface",
            data,
            excluded_codes,
            raw_name,
        ),
        QuantityKind::Pressure => resolve_pressure(raw_name, raw_units, data, excluded_codes),
        QuantityKind::SpeedEast
        | QuantityKind::SpeedNorth
        | QuantityKind::SpeedUp
        | QuantityKind::Speed => resolve_velocity(kind, raw_name, raw_units, data, excluded_codes),
        QuantityKind::Flag
        | QuantityKind::StringId
        | QuantityKind::ProfileId
        | QuantityKind::InstrumentDepth
        | QuantityKind::Latitude
        | QuantityKind::Longitude
        | QuantityKind::Time => Err(Error::NoResolverBranch { kind }),
        _ => lookup(kind, raw_name, raw_units, data, excluded_codes),
    }
}

/// Resolve a quality-flag channel against its predecessor's code
///
/// The flag code is the predecessor code with a `_QC` suffix, valid only when
/// the predecessor is a plain BODC code: uppercase alphanumeric with no
/// separator characters.
pub fn resolve_flag(raw_name: &str, previous_code: Option<&str>) -> Result<String> {
    static BODC_CODE: OnceLock<Regex> = OnceLock::new();
    let bodc_code = BODC_CODE.get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9]*$").unwrap());

    let previous =
        previous_code.ok_or_else(|| Error::flag_pairing(raw_name, "<no prior variable>"))?;

    if !bodc_code.is_match(previous) {
        return Err(Error::flag_pairing(raw_name, previous));
    }

    Ok(format!("{}{}", previous, FLAG_CODE_SUFFIX))
}

/// Depth-family coordinate variables keep lowercase coordinate names
fn fixed_coordinate(
    code: &str,
    standard_name: &str,
    long_name: &str,
    data: Vec<f64>,
    excluded_codes: &HashSet<String>,
    raw_name: &str,
) -> Result<Resolution> {
    if excluded_codes.contains(code) {
        return Err(Error::code_space_exhausted(code, raw_name));
    }

    Ok(Resolution {
        code: code.to_string(),
        units: cu::METRES.to_string(),
        standard_name: Some(standard_name.to_string()),
        long_name: Some(long_name.to_string()),
        data,
    })
}

/// Pressure resolves to a fixed code, with unit membership checked against
/// the decibar and counts families after any kilopascal conversion
fn resolve_pressure(
    raw_name: &str,
    raw_units: &str,
    data: Vec<f64>,
    excluded_codes: &HashSet<String>,
) -> Result<Resolution> {
    let (effective_units, data) = if unit_converter::needs_pressure_conversion(raw_units) {
        unit_converter::convert(QuantityFamily::Pressure, raw_units, &data)?
    } else {
        (raw_units.to_string(), data)
    };

    let normalized = effective_units.trim().to_lowercase();
    let canonical = if ["dbar", "dbars", "decibar", "decibars"].contains(&normalized.as_str()) {
        cu::DECIBAR
    } else if ["count", "counts"].contains(&normalized.as_str()) {
        cu::COUNTS
    } else {
        return Err(Error::unrecognized_units(
            QuantityKind::Pressure,
            raw_name,
            raw_units,
        ));
    };

    let code = "PRESPR01";
    if excluded_codes.contains(code) {
        return Err(Error::code_space_exhausted(code, raw_name));
    }

    Ok(Resolution {
        code: code.to_string(),
        units: canonical.to_string(),
        standard_name: Some("sea_water_pressure".to_string()),
        long_name: Some("Pressure".to_string()),
        data,
    })
}

/// Velocity-family channels convert cm/s input before the table lookup
fn resolve_velocity(
    kind: QuantityKind,
    raw_name: &str,
    raw_units: &str,
    data: Vec<f64>,
    excluded_codes: &HashSet<String>,
) -> Result<Resolution> {
    let (effective_units, data) = if unit_converter::needs_velocity_conversion(raw_units) {
        unit_converter::convert(QuantityFamily::Velocity, raw_units, &data)?
    } else {
        (raw_units.to_string(), data)
    };

    lookup(kind, raw_name, &effective_units, data, excluded_codes)
}

/// Table lookup plus the uniqueness-retry protocol
fn lookup(
    kind: QuantityKind,
    raw_name: &str,
    raw_units: &str,
    data: Vec<f64>,
    excluded_codes: &HashSet<String>,
) -> Result<Resolution> {
    let rules = table::rules_for(kind).ok_or(Error::NoResolverBranch { kind })?;

    let rule = rules
        .iter()
        .find(|r| r.matches(raw_name, raw_units))
        .ok_or_else(|| Error::unrecognized_units(kind, raw_name, raw_units))?;

    let data = match &rule.scale {
        Some(scale) => {
            let units_lower = raw_units.to_lowercase();
            let factor = scale
                .factors
                .iter()
                .find(|(pattern, _)| units_lower.contains(pattern))
                .map(|(_, factor)| *factor)
                .ok_or_else(|| Error::unrecognized_units(kind, raw_name, raw_units))?;
            if factor != 1.0 {
                debug!(
                    "Scaling '{}' by {} to reach {}",
                    raw_name, factor, rule.units
                );
            }
            data.iter().map(|v| v * factor).collect()
        }
        None => data,
    };

    let mut special_long_name = None;
    let mut standard_name = rule.standard_name.map(str::to_string);
    if kind == QuantityKind::Conductivity && raw_name.trim() == "Conductance:Specific" {
        special_long_name = Some("Sea Water Electrical Conductivity Corrected to 25° C".to_string());
        standard_name = None;
    }

    let code = next_free_code(rule.stem, rule.suffix, excluded_codes)
        .ok_or_else(|| Error::code_space_exhausted(rule.stem, raw_name))?;

    Ok(Resolution {
        code,
        units: rule.units.to_string(),
        standard_name,
        long_name: special_long_name.or_else(|| rule.long_name.map(str::to_string)),
        data,
    })
}

/// First instance-suffixed candidate not already assigned in the record
fn next_free_code(
    stem: &str,
    suffix: SuffixStyle,
    excluded_codes: &HashSet<String>,
) -> Option<String> {
    match suffix {
        SuffixStyle::None => {
            let code = stem.to_string();
            (!excluded_codes.contains(&code)).then_some(code)
        }
        SuffixStyle::Width1 => (1..=MAX_CODE_ATTEMPTS)
            .map(|i| format!("{}{}", stem, i))
            .find(|c| !excluded_codes.contains(c)),
        SuffixStyle::Width2 => (1..=MAX_CODE_ATTEMPTS)
            .map(|i| format!("{}{:02}", stem, i))
            .find(|c| !excluded_codes.contains(c)),
    }
}
