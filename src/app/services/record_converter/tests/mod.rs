//! Test fixtures for record conversion
//!
//! Builds small but complete raw records resembling real IOS CTD and
//! current-meter files.

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::app::models::{
    Administration, ChannelSample, Instrument, Location, RawRecord, RecordCategory,
};

mod converter_tests;

/// A CTD profile record with the usual channel roster
pub fn profile_record() -> RawRecord {
    RawRecord {
        filename: "1998-031-0018.ctd".to_string(),
        category: RecordCategory::Profile,
        administration: Administration {
            country: "Canada".to_string(),
            mission: "1998-031".to_string(),
            cruise: "n/a".to_string(),
            scientist: "Smith J.".to_string(),
            project: "Strait of Georgia".to_string(),
            agency: "IOS, Ocean Sciences Division".to_string(),
            platform: "CCGS Vector".to_string(),
        },
        deployment_mission: None,
        instrument: Some(Instrument {
            kind: "Sea-Bird".to_string(),
            model: "SBE 911plus".to_string(),
            serial_number: "0443".to_string(),
            depth: None,
        }),
        location: Location {
            latitude: 49.2,
            longitude: -123.62,
            event_number: 18,
            geographic_area: "Strait of Georgia".to_string(),
        },
        start_time: Utc.with_ymd_and_hms(1998, 5, 12, 14, 30, 0).unwrap(),
        obs_times: vec![],
        channels: vec![
            ChannelSample::new("Depth", "metres", vec![1.0, 2.0, 3.0], Some("-99")),
            ChannelSample::new(
                "Temperature:Primary",
                "'deg C (ITS90)'",
                vec![9.1, 9.0, -99.0],
                Some("-99"),
            ),
            ChannelSample::new(
                "Salinity:T0:C0",
                "PSS-78",
                vec![29.5, 29.9, 30.1],
                Some("-99"),
            ),
            ChannelSample::new("Salinity:Flag", "n/a", vec![0.0, 0.0, 2.0], Some("-99")),
            ChannelSample::new(
                "Oxygen:Dissolved:SBE",
                "mL/L",
                vec![6.1, 5.9, 5.2],
                Some("-99"),
            ),
            ChannelSample::new("Number_of_bin_records", "n/a", vec![12.0, 12.0, 12.0], Some("-99")),
        ],
        fallback_sentinel: Some("-99".to_string()),
        header: json!({"file": {"format": "ios shell"}}),
        number_of_records: 3,
    }
}

/// A current-meter record with scalar speed and direction only
pub fn current_meter_record() -> RawRecord {
    RawRecord {
        filename: "C_19960522-1030.cur".to_string(),
        category: RecordCategory::CurrentMeter,
        administration: Administration {
            country: "Canada".to_string(),
            mission: "n/a".to_string(),
            cruise: "n/a".to_string(),
            scientist: "Birch R.".to_string(),
            project: "Juan de Fuca".to_string(),
            agency: "IOS".to_string(),
            platform: "n/a".to_string(),
        },
        deployment_mission: Some("1996-060".to_string()),
        instrument: Some(Instrument {
            kind: "Aanderaa".to_string(),
            model: "RCM4".to_string(),
            serial_number: "7299".to_string(),
            depth: Some(25.0),
        }),
        location: Location {
            latitude: 48.33,
            longitude: -124.11,
            event_number: 6,
            geographic_area: "Juan de Fuca Strait".to_string(),
        },
        start_time: Utc.with_ymd_and_hms(1996, 5, 22, 10, 30, 0).unwrap(),
        obs_times: (0..4)
            .map(|i| {
                Utc.with_ymd_and_hms(1996, 5, 22, 10, 30, 0).unwrap()
                    + chrono::Duration::minutes(15 * i)
            })
            .collect(),
        channels: vec![
            ChannelSample::new(
                "Temperature",
                "deg C",
                vec![8.0, 8.1, 8.2, 8.1],
                Some("-99.9"),
            ),
            ChannelSample::new(
                "Speed",
                "cm/s",
                vec![100.0, 50.0, 0.0, 25.0],
                Some("-99.9"),
            ),
            ChannelSample::new(
                "Direction:Geog(to)",
                "deg",
                vec![90.0, 0.0, 45.0, 180.0],
                Some("-99.9"),
            ),
        ],
        fallback_sentinel: Some("-99.9".to_string()),
        header: json!({"file": {"format": "ios shell"}}),
        number_of_records: 4,
    }
}
