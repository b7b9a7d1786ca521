//! The record conversion pipeline

use super::attributes;
use crate::app::models::{
    to_epoch_seconds, CanonicalVariable, ConvertedRecord, DataType, Dimension, QuantityKind,
    RawRecord, RecordCategory, VariableData,
};
use crate::app::services::channel_classifier::{classify, rules::contains_any, ClassifyContext};
use crate::app::services::code_resolver::{resolve, resolve_flag};
use crate::app::services::null_normalizer::normalize;
use crate::config::ConversionConfig;
use crate::constants::{canonical_units as cu, BOOKKEEPING_CHANNELS, VELOCITY_COMPONENT_DECIMALS};
use crate::Result;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// Converts raw records into canonical variable sets
///
/// Stateless apart from the conversion config; all per-record state (the
/// excluded-codes set, the classification context) lives inside one
/// `convert` call, so a single converter may be shared across concurrent
/// record conversions.
pub struct RecordConverter {
    config: ConversionConfig,
}

impl RecordConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Convert one raw record into its canonical output form
    ///
    /// Fatal classification errors abort the record; per-channel issues are
    /// logged and the channel is omitted.
    pub fn convert(&self, record: &RawRecord) -> Result<ConvertedRecord> {
        record.validate()?;

        let attributes = attributes::build_global_attributes(record, &self.config)?;
        let mut variables: Vec<CanonicalVariable> = Vec::new();
        let mut assigned: HashSet<String> = HashSet::new();

        self.add_metadata_variables(record, &mut variables, &mut assigned)?;
        self.add_channel_variables(record, &mut variables, &mut assigned)?;

        debug!(
            "Converted '{}': {} variables from {} channels",
            record.filename,
            variables.len(),
            record.channels.len()
        );

        Ok(ConvertedRecord {
            variables,
            attributes,
        })
    }

    /// Identity and coordinate variables derived from record metadata
    fn add_metadata_variables(
        &self,
        record: &RawRecord,
        variables: &mut Vec<CanonicalVariable>,
        assigned: &mut HashSet<String>,
    ) -> Result<()> {
        let admin = &record.administration;
        let is_current = record.category.is_current_meter();

        push_string_id(variables, assigned, "filename", &record.filename);
        push_string_id(variables, assigned, "country", admin.country.trim());

        let mission_var = if is_current {
            "deployment_mission_id"
        } else {
            "mission_id"
        };
        push_string_id(variables, assigned, mission_var, &attributes::mission_id(record)?);
        push_string_id(variables, assigned, "event_number", &attributes::event_id(record));

        let mut profile_var =
            CanonicalVariable::string_id("profile", attributes::profile_id(record)?);
        match record.category {
            RecordCategory::Profile => {
                profile_var
                    .attributes
                    .insert("cf_role".to_string(), json!("profile_id"));
            }
            RecordCategory::MooredTimeSeries => {
                profile_var
                    .attributes
                    .insert("cf_role".to_string(), json!("timeSeries_id"));
            }
            RecordCategory::CurrentMeter => {}
        }
        assigned.insert(profile_var.code.clone());
        variables.push(profile_var);

        push_string_id(variables, assigned, "scientist", admin.scientist.trim());
        push_string_id(variables, assigned, "project", admin.project.trim());
        push_string_id(variables, assigned, "agency", admin.agency.trim());
        push_string_id(variables, assigned, "platform", admin.platform.trim());

        if let Some(instrument) = &record.instrument {
            if usable(&instrument.kind) {
                push_string_id(variables, assigned, "instrument_type", instrument.kind.trim());
            }
            if usable(&instrument.model) {
                push_string_id(variables, assigned, "instrument_model", instrument.model.trim());
            }
            if usable(&instrument.serial_number) {
                push_string_id(
                    variables,
                    assigned,
                    "instrument_serial_number",
                    instrument.serial_number.trim(),
                );
            }
            if record.category != RecordCategory::Profile {
                if let Some(depth) = instrument.depth {
                    let var = CanonicalVariable::scalar_float(
                        "instrument_depth",
                        cu::METRES,
                        "instrument_depth",
                        "Instrument Depth",
                        depth,
                    );
                    assigned.insert(var.code.clone());
                    variables.push(var);
                }
            }
        }

        let lat = CanonicalVariable::scalar_float(
            "latitude",
            cu::DEGREES_NORTH,
            "latitude",
            "Latitude",
            record.location.latitude,
        );
        assigned.insert(lat.code.clone());
        variables.push(lat);

        let lon = CanonicalVariable::scalar_float(
            "longitude",
            cu::DEGREES_EAST,
            "longitude",
            "Longitude",
            record.location.longitude,
        );
        assigned.insert(lon.code.clone());
        variables.push(lon);

        push_string_id(
            variables,
            assigned,
            "geographic_area",
            record.location.geographic_area.trim(),
        );

        let (time_dim, times) = if record.category == RecordCategory::Profile {
            (Dimension::Scalar, vec![record.start_time])
        } else {
            (Dimension::TimeSeries, record.obs_times.clone())
        };
        let time_var = CanonicalVariable {
            code: "time".to_string(),
            units: Some(cu::SECONDS_SINCE_EPOCH.to_string()),
            standard_name: Some("time".to_string()),
            long_name: Some("time".to_string()),
            datatype: DataType::Double,
            dimension: time_dim,
            data: VariableData::Numeric(to_epoch_seconds(&times)),
            attributes: BTreeMap::new(),
        };
        assigned.insert(time_var.code.clone());
        variables.push(time_var);

        Ok(())
    }

    /// Classify, resolve and normalize every instrument channel
    fn add_channel_variables(
        &self,
        record: &RawRecord,
        variables: &mut Vec<CanonicalVariable>,
        assigned: &mut HashSet<String>,
    ) -> Result<()> {
        let is_current = record.category.is_current_meter();
        let dimension = record.category.dimension();
        let feature_type = record.category.feature_type();

        let mut ctx = ClassifyContext::new(is_current);
        let mut last_code: Option<String> = None;

        // Inputs for deriving velocity components when a current-meter file
        // carries only scalar speed and direction
        let mut scalar_speed: Option<(Vec<f64>, String)> = None;
        let mut direction: Option<Vec<f64>> = None;
        let mut has_east_component = false;

        for channel in &record.channels {
            let Some(kind) = classify(&channel.name, &mut ctx) else {
                if !contains_any(BOOKKEEPING_CHANNELS, &channel.name) {
                    warn!(
                        "{} ({}) not transferred to output record",
                        channel.name, channel.units
                    );
                }
                continue;
            };

            let sentinel = channel
                .sentinel
                .as_deref()
                .or(record.fallback_sentinel.as_deref());
            if sentinel.is_none() {
                warn!(
                    "Channel '{}' declares no pad value and the file has no fallback, dropping",
                    channel.name
                );
                continue;
            }

            if kind == QuantityKind::Flag {
                match resolve_flag(&channel.name, last_code.as_deref()) {
                    Ok(code) => {
                        let data = normalize(&channel.data, sentinel);
                        let var = CanonicalVariable {
                            code: code.clone(),
                            units: optional_units(&channel.units),
                            standard_name: None,
                            long_name: None,
                            datatype: DataType::Float32,
                            dimension,
                            data: VariableData::Numeric(data),
                            attributes: feature_attributes(feature_type),
                        };
                        assigned.insert(code.clone());
                        variables.push(var);
                        last_code = Some(code);
                    }
                    Err(e) => warn!("Not converting flag channel '{}': {}", channel.name, e),
                }
                continue;
            }

            let data = normalize(&channel.data, sentinel);

            match kind {
                QuantityKind::Speed => {
                    scalar_speed = Some((data.clone(), channel.units.clone()));
                }
                QuantityKind::DirectionTo => {
                    direction = Some(data.clone());
                }
                QuantityKind::SpeedEast => {
                    has_east_component = true;
                }
                _ => {}
            }

            match resolve(kind, &channel.name, &channel.units, data, assigned) {
                Ok(resolution) => {
                    let var_attributes =
                        if matches!(kind, QuantityKind::Depth | QuantityKind::DepthNominal) {
                            depth_attributes()
                        } else {
                            feature_attributes(feature_type)
                        };
                    let var = CanonicalVariable {
                        code: resolution.code.clone(),
                        units: Some(resolution.units),
                        standard_name: resolution.standard_name,
                        long_name: resolution.long_name,
                        datatype: DataType::Float32,
                        dimension,
                        data: VariableData::Numeric(resolution.data),
                        attributes: var_attributes,
                    };
                    assigned.insert(resolution.code.clone());
                    variables.push(var);
                    last_code = Some(resolution.code);
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Dropping channel '{}': {}", channel.name, e);
                }
                Err(e) => return Err(e),
            }
        }

        if is_current && !has_east_component {
            match (scalar_speed, direction) {
                (Some((speed, speed_units)), Some(dir)) => {
                    let (east, north) = derive_velocity_components(&speed, &dir);
                    for (kind, name, component) in [
                        (QuantityKind::SpeedEast, "Speed:East", east),
                        (QuantityKind::SpeedNorth, "Speed:North", north),
                    ] {
                        match resolve(kind, name, &speed_units, component, assigned) {
                            Ok(resolution) => {
                                let var = CanonicalVariable {
                                    code: resolution.code.clone(),
                                    units: Some(resolution.units),
                                    standard_name: resolution.standard_name,
                                    long_name: resolution.long_name,
                                    datatype: DataType::Float32,
                                    dimension,
                                    data: VariableData::Numeric(resolution.data),
                                    attributes: feature_attributes(feature_type),
                                };
                                assigned.insert(resolution.code.clone());
                                variables.push(var);
                            }
                            Err(e) if e.is_recoverable() => {
                                warn!("Dropping derived channel '{}': {}", name, e);
                            }
                            Err(e) => return Err(e),
                        }
                    }
                    info!("Calculated east and north speed components");
                }
                _ => warn!("Speed and speed component channels not found in file !"),
            }
        }

        Ok(())
    }
}

/// East/north velocity components from scalar speed and direction-to,
/// direction measured clockwise from north
pub fn derive_velocity_components(speed: &[f64], direction: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = speed.len().min(direction.len());
    let mut east = Vec::with_capacity(n);
    let mut north = Vec::with_capacity(n);

    for i in 0..n {
        let angle = (90.0 - direction[i]).to_radians();
        east.push(round_component(speed[i] * angle.cos()));
        north.push(round_component(speed[i] * angle.sin()));
    }

    (east, north)
}

fn round_component(value: f64) -> f64 {
    let factor = 10f64.powi(VELOCITY_COMPONENT_DECIMALS);
    (value * factor).round() / factor
}

fn push_string_id(
    variables: &mut Vec<CanonicalVariable>,
    assigned: &mut HashSet<String>,
    code: &str,
    value: &str,
) {
    let var = CanonicalVariable::string_id(code, value);
    assigned.insert(var.code.clone());
    variables.push(var);
}

fn usable(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "n/a"
}

fn optional_units(units: &str) -> Option<String> {
    let trimmed = units.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn feature_attributes(feature_type: &str) -> BTreeMap<String, serde_json::Value> {
    let mut attrs = BTreeMap::new();
    attrs.insert("featureType".to_string(), json!(feature_type));
    attrs
}

/// Depth variables carry axis attributes instead of the feature type
fn depth_attributes() -> BTreeMap<String, serde_json::Value> {
    let mut attrs = BTreeMap::new();
    attrs.insert("positive".to_string(), json!("down"));
    attrs.insert("axis".to_string(), json!("Z"));
    attrs
}
