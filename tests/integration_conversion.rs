//! End-to-end conversion tests driving the engine through the public API,
//! including the JSON record contract used by the reader and writer
//! collaborators.

use ios_processor::app::models::{RawRecord, VariableData};
use ios_processor::app::services::record_converter::RecordConverter;
use ios_processor::ConversionConfig;

fn ctd_record_json() -> &'static str {
    r#"{
        "filename": "2002-036-0042.ctd",
        "category": "profile",
        "administration": {
            "country": "Canada",
            "mission": "2002-36",
            "cruise": "n/a",
            "scientist": "Doe A.",
            "project": "La Perouse Bank",
            "agency": "IOS, Ocean Sciences Division",
            "platform": "CCGS John P. Tully"
        },
        "instrument": {
            "type": "Sea-Bird",
            "model": "SBE 911plus",
            "serial_number": "0550"
        },
        "location": {
            "latitude": 48.66,
            "longitude": -126.15,
            "event_number": 42,
            "geographic_area": "La Perouse Bank"
        },
        "start_time": "2002-06-04T08:15:00Z",
        "channels": [
            {
                "name": "Pressure",
                "units": "decibar",
                "data": [1.0, 5.0, 10.0],
                "sentinel": "-99"
            },
            {
                "name": "Temperature:Primary",
                "units": "'deg C (ITS90)'",
                "data": [11.2, 10.8, -99.0],
                "sentinel": "-99"
            },
            {
                "name": "Temperature:Secondary",
                "units": "'deg C (ITS90)'",
                "data": [11.1, 10.7, 10.1],
                "sentinel": "-99"
            },
            {
                "name": "Salinity:T0:C0",
                "units": "PSS-78",
                "data": [31.2, 31.5, 31.9],
                "sentinel": "-99"
            },
            {
                "name": "Salinity:Flag",
                "units": "",
                "data": [0, 0, 2],
                "sentinel": "-99"
            },
            {
                "name": "Fluorescence:URU:Seapoint",
                "units": "mg/m^3",
                "data": [0.4, 0.8, 1.1],
                "sentinel": "-99"
            }
        ],
        "fallback_sentinel": "-99",
        "header": {"file": {"start_time": "2002/06/04 08:15:00.000"}},
        "number_of_records": 3
    }"#
}

#[test]
fn test_ctd_record_end_to_end() {
    let record: RawRecord = serde_json::from_str(ctd_record_json()).unwrap();
    let config = ConversionConfig {
        institution: Some("Institute of Ocean Sciences".to_string()),
        ..Default::default()
    };

    let converted = RecordConverter::new(config).convert(&record).unwrap();
    let codes = converted.codes();

    // Repeated ITS-90 temperature channels take ascending instances
    assert!(codes.contains(&"TEMPS901"));
    assert!(codes.contains(&"TEMPS902"));
    assert!(codes.contains(&"PRESPR01"));
    assert!(codes.contains(&"PSALST01"));
    assert!(codes.contains(&"PSALST01_QC"));
    assert!(codes.contains(&"CPHLPR011"));

    // Per-record uniqueness invariant
    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());

    assert_eq!(
        converted.attributes.get("featureType").unwrap(),
        "profile"
    );
    assert_eq!(
        converted.attributes.get("institution").unwrap(),
        "Institute of Ocean Sciences"
    );
    assert_eq!(converted.attributes.get("mission").unwrap(), "2002-036");
    assert_eq!(converted.attributes.get("id").unwrap(), "2002-036-0042");
}

#[test]
fn test_sentinel_normalization_end_to_end() {
    let record: RawRecord = serde_json::from_str(ctd_record_json()).unwrap();
    let converted = RecordConverter::new(ConversionConfig::default())
        .convert(&record)
        .unwrap();

    let temperature = converted
        .variables
        .iter()
        .find(|v| v.code == "TEMPS901")
        .unwrap();
    match &temperature.data {
        VariableData::Numeric(values) => {
            assert_eq!(values[0], 11.2);
            assert_eq!(values[1], 10.8);
            assert!(values[2].is_nan());
        }
        other => panic!("expected numeric data, got {:?}", other),
    }
}

#[test]
fn test_converted_record_round_trips_through_json() {
    let record: RawRecord = serde_json::from_str(ctd_record_json()).unwrap();
    let converted = RecordConverter::new(ConversionConfig::default())
        .convert(&record)
        .unwrap();

    let serialized = serde_json::to_string(&converted).unwrap();
    let reloaded: ios_processor::ConvertedRecord = serde_json::from_str(&serialized).unwrap();

    assert_eq!(reloaded.variables.len(), converted.variables.len());
    assert_eq!(reloaded.codes(), converted.codes());
    assert_eq!(
        reloaded.attributes.get("id"),
        converted.attributes.get("id")
    );
}

#[test]
fn test_record_with_unknown_units_fails_conversion() {
    let mut record: RawRecord = serde_json::from_str(ctd_record_json()).unwrap();
    record.channels[1].units = "Kelvin".to_string();

    let result = RecordConverter::new(ConversionConfig::default()).convert(&record);
    match result {
        Err(ios_processor::Error::UnrecognizedUnits { units, .. }) => {
            assert_eq!(units, "Kelvin");
        }
        other => panic!("expected unit error, got {:?}", other.map(|r| r.codes().len())),
    }
}
