//! Record-level attribute assembly
//!
//! Builds the global attribute map serialized into the output container:
//! provenance from the conversion config, identifiers formatted from the file
//! header, coordinate bounds and time coverage.

use crate::app::models::{RawRecord, RecordCategory};
use crate::config::ConversionConfig;
use crate::constants::{cdm_data_types, ATTRIBUTE_DATE_FORMAT, NAMING_AUTHORITY};
use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Mission identifier in the archive's "YYYY-NNN" form
///
/// Falls back from the administration block to the cruise number (profiles)
/// or the deployment header (moorings); a record with no usable mission
/// yields "<start year>-000".
pub fn mission_id(record: &RawRecord) -> Result<String> {
    let raw = pick_mission(record);
    let (year, number) = raw
        .split_once('-')
        .ok_or_else(|| Error::record_metadata(format!("malformed mission id '{}'", raw)))?;

    let year: u32 = year.trim().parse().map_err(|_| {
        Error::record_metadata(format!("malformed mission year in '{}'", raw))
    })?;
    let number: u32 = number.trim().parse().map_err(|_| {
        Error::record_metadata(format!("malformed mission number in '{}'", raw))
    })?;

    Ok(format!("{:04}-{:03}", year, number))
}

fn pick_mission(record: &RawRecord) -> String {
    let admin = &record.administration;
    if usable(&admin.mission) {
        return admin.mission.trim().to_string();
    }
    if record.category == RecordCategory::Profile && usable(&admin.cruise) {
        return admin.cruise.trim().to_string();
    }
    if let Some(deployment) = record.deployment_mission.as_deref() {
        if usable(deployment) {
            return deployment.trim().to_string();
        }
    }
    warn!("Mission ID not available in {}", record.filename);
    format!("{:04}-000", record.start_time.format("%Y"))
}

fn usable(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "n/a"
}

/// Event identifier, zero-padded to four digits
pub fn event_id(record: &RawRecord) -> String {
    if record.location.event_number <= 0 {
        warn!("Event number not found in {}", record.filename);
    }
    format!("{:04}", record.location.event_number.max(0))
}

/// Record identifier: mission id plus event number
pub fn profile_id(record: &RawRecord) -> Result<String> {
    Ok(format!(
        "{}-{:04}",
        mission_id(record)?,
        record.location.event_number.max(0)
    ))
}

/// Assemble the global attribute map for one record
pub fn build_global_attributes(
    record: &RawRecord,
    config: &ConversionConfig,
) -> Result<BTreeMap<String, Value>> {
    let mut attrs = BTreeMap::new();

    let feature_type = record.category.feature_type();
    attrs.insert("featureType".to_string(), json!(feature_type));

    insert_config(&mut attrs, "summary", &config.summary);
    insert_config(&mut attrs, "title", &config.title);
    insert_config(&mut attrs, "institution", &config.institution);
    insert_config(&mut attrs, "infoUrl", &config.info_url);
    insert_config(&mut attrs, "description", &config.description);
    insert_config(&mut attrs, "keywords", &config.keywords);
    insert_config(&mut attrs, "keywords_vocabulary", &config.keywords_vocabulary);
    insert_config(&mut attrs, "acknowledgement", &config.acknowledgement);
    insert_config(&mut attrs, "comment", &config.comment);
    insert_config(&mut attrs, "creator_name", &config.creator_name);
    insert_config(&mut attrs, "creator_email", &config.creator_email);
    insert_config(&mut attrs, "creator_url", &config.creator_url);
    insert_config(&mut attrs, "license", &config.license);
    insert_config(&mut attrs, "Conventions", &config.conventions);
    insert_config(&mut attrs, "processing_level", &config.processing_level);
    insert_config(
        &mut attrs,
        "standard_name_vocabulary",
        &config.standard_name_vocabulary,
    );
    attrs.insert("naming_authority".to_string(), json!(NAMING_AUTHORITY));

    match record.category {
        RecordCategory::Profile => {
            attrs.insert("cdm_data_type".to_string(), json!(cdm_data_types::PROFILE));
            attrs.insert(
                "cdm_profile_variables".to_string(),
                json!("profile, filename"),
            );
            attrs.insert("time_coverage_duration".to_string(), json!(0.0));
            attrs.insert("time_coverage_resolution".to_string(), json!("n/a"));
        }
        RecordCategory::MooredTimeSeries | RecordCategory::CurrentMeter => {
            attrs.insert(
                "cdm_data_type".to_string(),
                json!(cdm_data_types::TIME_SERIES),
            );
            attrs.insert("cdm_timeseries_variables".to_string(), json!("profile"));
        }
    }

    attrs.insert(
        "date_created".to_string(),
        json!(format_timestamp(Utc::now())),
    );

    // Full original header, preserved for provenance
    attrs.insert(
        "header".to_string(),
        json!(serde_json::to_string(&record.header)?),
    );

    attrs.insert("nrec".to_string(), json!(record.number_of_records));
    attrs.insert("filename".to_string(), json!(record.filename));
    attrs.insert(
        "country".to_string(),
        json!(record.administration.country.trim()),
    );
    attrs.insert("mission".to_string(), json!(mission_id(record)?));
    attrs.insert(
        "scientist".to_string(),
        json!(record.administration.scientist.trim()),
    );
    attrs.insert(
        "project".to_string(),
        json!(record.administration.project.trim()),
    );
    attrs.insert(
        "agency".to_string(),
        json!(record.administration.agency.trim()),
    );
    attrs.insert(
        "platform".to_string(),
        json!(record.administration.platform.trim()),
    );
    attrs.insert("id".to_string(), json!(profile_id(record)?));

    let lat = record.location.latitude;
    let lon = record.location.longitude;
    attrs.insert("geospatial_lat_min".to_string(), json!(lat));
    attrs.insert("geospatial_lat_max".to_string(), json!(lat));
    attrs.insert("geospatial_lon_min".to_string(), json!(lon));
    attrs.insert("geospatial_lon_max".to_string(), json!(lon));
    attrs.insert(
        "geospatial_bounds".to_string(),
        json!(format!("POINT ({}, {})", lon, lat)),
    );

    match record.category {
        RecordCategory::Profile => {
            let start = format_timestamp(record.start_time);
            attrs.insert("time_coverage_start".to_string(), json!(start.clone()));
            attrs.insert("time_coverage_end".to_string(), json!(start));
        }
        RecordCategory::MooredTimeSeries | RecordCategory::CurrentMeter => {
            let first = record.obs_times.first().copied().ok_or_else(|| {
                Error::record_metadata(format!(
                    "time-series record '{}' has no observation times",
                    record.filename
                ))
            })?;
            let last = *record.obs_times.last().expect("non-empty obs_times");

            attrs.insert(
                "time_coverage_start".to_string(),
                json!(format_timestamp(first)),
            );
            attrs.insert(
                "time_coverage_end".to_string(),
                json!(format_timestamp(last)),
            );
            attrs.insert(
                "time_coverage_duration".to_string(),
                json!(format_duration(last - first)),
            );
            if record.obs_times.len() > 1 {
                attrs.insert(
                    "time_coverage_resolution".to_string(),
                    json!(format_duration(record.obs_times[1] - first)),
                );
            }
        }
    }

    Ok(attrs)
}

fn insert_config(attrs: &mut BTreeMap<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        attrs.insert(key.to_string(), json!(v));
    }
}

fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(ATTRIBUTE_DATE_FORMAT).to_string()
}

/// Durations rendered as "[D days, ]H:MM:SS"
pub fn format_duration(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!("{} days, {}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}
