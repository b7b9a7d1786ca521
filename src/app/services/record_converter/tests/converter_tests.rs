//! Tests for the end-to-end record conversion pipeline

use super::{current_meter_record, profile_record};
use crate::app::models::{DataType, Dimension, VariableData};
use crate::app::services::record_converter::converter::derive_velocity_components;
use crate::app::services::record_converter::RecordConverter;
use crate::config::ConversionConfig;
use crate::{ConvertedRecord, Error};
use std::collections::HashSet;

fn convert(record: &crate::RawRecord) -> ConvertedRecord {
    RecordConverter::new(ConversionConfig::default())
        .convert(record)
        .unwrap()
}

fn find<'a>(record: &'a ConvertedRecord, code: &str) -> &'a crate::CanonicalVariable {
    record
        .variables
        .iter()
        .find(|v| v.code == code)
        .unwrap_or_else(|| panic!("variable {} missing from {:?}", code, record.codes()))
}

#[test]
fn test_profile_conversion_emits_expected_codes() {
    let converted = convert(&profile_record());
    let codes = converted.codes();

    for code in [
        "filename",
        "country",
        "mission_id",
        "event_number",
        "profile",
        "scientist",
        "project",
        "agency",
        "platform",
        "instrument_type",
        "instrument_model",
        "instrument_serial_number",
        "latitude",
        "longitude",
        "geographic_area",
        "time",
        "depth",
        "TEMPS901",
        "PSALST01",
        "PSALST01_QC",
        "DOXYZZ01",
    ] {
        assert!(codes.contains(&code), "missing {} in {:?}", code, codes);
    }

    // The bin-bookkeeping channel is dropped silently
    assert!(!codes.iter().any(|c| c.contains("bin")));
}

#[test]
fn test_codes_are_unique_within_a_record() {
    let converted = convert(&profile_record());
    let codes = converted.codes();
    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(codes.len(), unique.len());
}

#[test]
fn test_profile_channel_variables_lie_on_depth_axis() {
    let converted = convert(&profile_record());

    let temperature = find(&converted, "TEMPS901");
    assert_eq!(temperature.dimension, Dimension::Depth);
    assert_eq!(temperature.datatype, DataType::Float32);
    assert_eq!(temperature.units.as_deref(), Some("deg_C"));
    assert_eq!(
        temperature.standard_name.as_deref(),
        Some("sea_water_temperature")
    );

    // The sentinel sample is normalized to NaN
    match &temperature.data {
        VariableData::Numeric(values) => {
            assert_eq!(values[0], 9.1);
            assert!(values[2].is_nan());
        }
        other => panic!("expected numeric data, got {:?}", other),
    }
}

#[test]
fn test_depth_variable_carries_axis_attributes() {
    let converted = convert(&profile_record());
    let depth = find(&converted, "depth");
    assert_eq!(depth.attributes.get("positive").unwrap(), "down");
    assert_eq!(depth.attributes.get("axis").unwrap(), "Z");
    assert!(!depth.attributes.contains_key("featureType"));
}

#[test]
fn test_flag_channel_pairs_with_predecessor() {
    let converted = convert(&profile_record());
    let flag = find(&converted, "PSALST01_QC");
    assert_eq!(flag.datatype, DataType::Float32);
    assert!(flag.standard_name.is_none());
}

#[test]
fn test_profile_identity_variables() {
    let converted = convert(&profile_record());

    let profile = find(&converted, "profile");
    assert_eq!(profile.data, VariableData::Text(vec!["1998-031-0018".to_string()]));
    assert_eq!(profile.attributes.get("cf_role").unwrap(), "profile_id");

    let mission = find(&converted, "mission_id");
    assert_eq!(mission.data, VariableData::Text(vec!["1998-031".to_string()]));

    let time = find(&converted, "time");
    assert_eq!(time.datatype, DataType::Double);
    assert_eq!(time.dimension, Dimension::Scalar);
}

#[test]
fn test_current_meter_conversion() {
    let converted = convert(&current_meter_record());
    let codes = converted.codes();

    // Ordinal current-meter temperature stem plus converted scalar speed
    assert!(codes.contains(&"TEMPPR01"));
    assert!(codes.contains(&"LCSAEL01"));
    assert!(codes.contains(&"LCDAEL01"));
    assert!(codes.contains(&"deployment_mission_id"));
    assert!(!codes.contains(&"mission_id"));

    let speed = find(&converted, "LCSAEL01");
    assert_eq!(speed.units.as_deref(), Some("m/s"));
    assert_eq!(speed.dimension, Dimension::TimeSeries);
    match &speed.data {
        VariableData::Numeric(values) => assert_eq!(values, &vec![1.0, 0.5, 0.0, 0.25]),
        other => panic!("expected numeric data, got {:?}", other),
    }

    let time = find(&converted, "time");
    assert_eq!(time.dimension, Dimension::TimeSeries);
    assert_eq!(time.data.len(), 4);

    let depth = find(&converted, "instrument_depth");
    assert_eq!(depth.data, VariableData::Numeric(vec![25.0]));
}

#[test]
fn test_missing_velocity_components_are_derived() {
    let converted = convert(&current_meter_record());

    let east = find(&converted, "LCEWEL01");
    assert_eq!(east.units.as_deref(), Some("m/s"));
    assert_eq!(
        east.standard_name.as_deref(),
        Some("eastward_sea_water_velocity")
    );
    match &east.data {
        VariableData::Numeric(values) => assert_eq!(values, &vec![1.0, 0.0, 0.0, 0.0]),
        other => panic!("expected numeric data, got {:?}", other),
    }

    let north = find(&converted, "LCNSEL01");
    match &north.data {
        VariableData::Numeric(values) => assert_eq!(values, &vec![0.0, 0.5, 0.0, -0.25]),
        other => panic!("expected numeric data, got {:?}", other),
    }
}

#[test]
fn test_components_not_derived_when_east_channel_exists() {
    let mut record = current_meter_record();
    record.channels.push(crate::app::models::ChannelSample::new(
        "Speed:East",
        "m/s",
        vec![0.1, 0.2, 0.3, 0.4],
        Some("-99.9"),
    ));

    let converted = convert(&record);
    let east = find(&converted, "LCEWEL01");
    match &east.data {
        VariableData::Numeric(values) => assert_eq!(values, &vec![0.1, 0.2, 0.3, 0.4]),
        other => panic!("expected numeric data, got {:?}", other),
    }
    // Derivation skipped entirely, so no duplicate north either
    assert!(!converted.codes().contains(&"LCNSEL01"));
}

#[test]
fn test_unrecognized_units_abort_the_record() {
    let mut record = profile_record();
    record.channels.push(crate::app::models::ChannelSample::new(
        "Temperature:Secondary",
        "Kelvin",
        vec![282.0, 281.9, 281.7],
        Some("-99"),
    ));

    let result = RecordConverter::new(ConversionConfig::default()).convert(&record);
    assert!(matches!(result, Err(Error::UnrecognizedUnits { .. })));
}

#[test]
fn test_unmapped_channel_is_dropped_not_fatal() {
    let mut record = profile_record();
    record.channels.push(crate::app::models::ChannelSample::new(
        "Mystery:Channel",
        "n/a",
        vec![1.0, 2.0, 3.0],
        Some("-99"),
    ));

    let converted = convert(&record);
    assert!(converted.variables.iter().all(|v| v.code != "Mystery:Channel"));
}

#[test]
fn test_flag_after_lowercase_code_is_dropped() {
    let mut record = profile_record();
    // depth is the last emitted variable before this flag
    record.channels = vec![
        crate::app::models::ChannelSample::new("Depth", "metres", vec![1.0], Some("-99")),
        crate::app::models::ChannelSample::new("Flag", "n/a", vec![0.0], Some("-99")),
    ];

    let converted = convert(&record);
    assert!(converted.codes().iter().all(|c| !c.ends_with("_QC")));
}

#[test]
fn test_channel_without_any_sentinel_is_dropped() {
    let mut record = profile_record();
    record.fallback_sentinel = None;
    record.channels = vec![
        crate::app::models::ChannelSample::new("Depth", "metres", vec![1.0], Some("-99")),
        crate::app::models::ChannelSample::new(
            "Temperature",
            "deg C",
            vec![9.0],
            None,
        ),
    ];

    let converted = convert(&record);
    assert!(converted.codes().contains(&"depth"));
    assert!(!converted.codes().iter().any(|c| c.starts_with("TEMP")));
}

#[test]
fn test_repeated_generic_temperatures_get_ascending_instances() {
    let mut record = profile_record();
    record.channels = vec![
        crate::app::models::ChannelSample::new(
            "Temperature",
            "deg C (IPTS68)",
            vec![9.0],
            Some("-99"),
        ),
        crate::app::models::ChannelSample::new(
            "Temperature",
            "deg C (IPTS68)",
            vec![9.1],
            Some("-99"),
        ),
    ];

    let converted = convert(&record);
    let codes = converted.codes();
    assert!(codes.contains(&"TEMPST01"));
    assert!(codes.contains(&"TEMPST02"));
    assert!(!codes.iter().any(|c| c.starts_with("TEMPP6")));

    let first = find(&converted, "TEMPST01");
    let second = find(&converted, "TEMPST02");
    assert_eq!(first.units.as_deref(), Some("deg_C"));
    assert_eq!(second.units.as_deref(), Some("deg_C"));
}

#[test]
fn test_derive_velocity_components_rounding_and_nan() {
    let (east, north) = derive_velocity_components(&[10.0, f64::NAN], &[30.0, 90.0]);
    // 10 cm/s toward 30 deg: east = 10*cos(60deg) = 5, north = 10*sin(60deg)
    assert_eq!(east[0], 5.0);
    assert_eq!(north[0], 8.66);
    assert!(east[1].is_nan());
    assert!(north[1].is_nan());
}
