//! Data models for IOS record conversion
//!
//! This module contains the core data structures exchanged with the external
//! file-reader and container-writer collaborators: raw instrument records as
//! produced by the IOS shell-format reader, and the canonical variables the
//! conversion engine emits for the NetCDF writer.

use crate::constants::feature_types;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Raw Record Structures (reader side)
// =============================================================================

/// One sample value as read from an instrument file. Channels may carry
/// numeric data or textual data (station identifiers, date strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Number(f64),
    Text(String),
}

impl Sample {
    /// Numeric view of the sample. Textual samples are parsed leniently.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Sample::Number(n) => Some(*n),
            Sample::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

/// One raw instrument channel: free-text name and units as written by the
/// originating author, the ordered sample column, and the channel's declared
/// pad (missing data) value if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSample {
    /// Author-supplied channel name (e.g. "Temperature:High_Res")
    pub name: String,

    /// Author-supplied unit text, case and format inconsistent
    #[serde(default)]
    pub units: String,

    /// Ordered samples for this channel
    #[serde(default)]
    pub data: Vec<Sample>,

    /// Declared pad/sentinel value, textual as found in the file header
    #[serde(default)]
    pub sentinel: Option<String>,
}

impl ChannelSample {
    /// Construct a numeric channel from plain floats
    pub fn new(name: &str, units: &str, data: Vec<f64>, sentinel: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            units: units.to_string(),
            data: data.into_iter().map(Sample::Number).collect(),
            sentinel: sentinel.map(str::to_string),
        }
    }
}

/// Administrative header block of an IOS file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Administration {
    pub country: String,
    pub mission: String,
    pub cruise: String,
    pub scientist: String,
    pub project: String,
    pub agency: String,
    pub platform: String,
}

/// Instrument header block of an IOS file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instrument {
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub serial_number: String,

    /// Nominal instrument depth in metres, present for moored instruments
    pub depth: Option<f64>,
}

/// Location header block of an IOS file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,

    /// Cast/deployment event number; zero when absent from the header
    #[serde(default)]
    pub event_number: i32,

    /// Geographic area name resolved by the external polygon lookup
    #[serde(default)]
    pub geographic_area: String,
}

/// Category of an IOS record, driving the output dimension and the
/// current-meter-specific classification behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    /// CTD or bottle cast: variables lie along a depth axis
    Profile,
    /// Moored CTD: variables lie along a time axis
    MooredTimeSeries,
    /// Current meter: time axis plus current-meter code stems
    CurrentMeter,
}

impl RecordCategory {
    /// Whether current-meter classification rules apply
    pub fn is_current_meter(&self) -> bool {
        matches!(self, RecordCategory::CurrentMeter)
    }

    /// CF feature type for this category
    pub fn feature_type(&self) -> &'static str {
        match self {
            RecordCategory::Profile => feature_types::PROFILE,
            RecordCategory::MooredTimeSeries | RecordCategory::CurrentMeter => {
                feature_types::TIME_SERIES
            }
        }
    }

    /// Axis shared by the record's data variables
    pub fn dimension(&self) -> Dimension {
        match self {
            RecordCategory::Profile => Dimension::Depth,
            RecordCategory::MooredTimeSeries | RecordCategory::CurrentMeter => {
                Dimension::TimeSeries
            }
        }
    }
}

/// One parsed instrument file, as handed over by the external reader.
/// Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Original file name, without directory components
    pub filename: String,

    pub category: RecordCategory,

    pub administration: Administration,

    /// Mission identifier from a mooring deployment header, when present
    #[serde(default)]
    pub deployment_mission: Option<String>,

    #[serde(default)]
    pub instrument: Option<Instrument>,

    pub location: Location,

    /// Cast time for profiles; deployment start for time series
    pub start_time: DateTime<Utc>,

    /// Per-observation timestamps; empty for profile records
    #[serde(default)]
    pub obs_times: Vec<DateTime<Utc>>,

    pub channels: Vec<ChannelSample>,

    /// Record-level fallback pad value, used when a channel declares none
    #[serde(default)]
    pub fallback_sentinel: Option<String>,

    /// Complete original file header, preserved verbatim for provenance
    #[serde(default)]
    pub header: serde_json::Value,

    /// Number of data rows declared by the file header
    #[serde(default)]
    pub number_of_records: usize,
}

impl RawRecord {
    /// Validate reader output before conversion
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(Error::record_metadata(format!(
                "invalid latitude {}: must be between -90 and 90 degrees",
                self.location.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(Error::record_metadata(format!(
                "invalid longitude {}: must be between -180 and 180 degrees",
                self.location.longitude
            )));
        }

        if self.filename.trim().is_empty() {
            return Err(Error::record_metadata("filename cannot be empty"));
        }

        if self.category != RecordCategory::Profile && self.obs_times.is_empty() {
            return Err(Error::record_metadata(format!(
                "time-series record '{}' carries no observation times",
                self.filename
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Quantity Kinds
// =============================================================================

/// Physical-quantity category assigned to a raw channel by the classifier.
/// Never mutated after assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    Temperature,
    TemperatureCurrent,
    TemperatureCurrentLowRes,
    TemperatureCurrentHighRes,
    Salinity,
    SalinityCurrent,
    Pressure,
    Depth,
    DepthNominal,
    Oxygen,
    OxygenSaturation,
    Conductivity,
    ConductivityRatio,
    Nutrient,
    Isotope,
    Pigment,
    Chlorofluorocarbon,
    SpeedEast,
    SpeedNorth,
    SpeedUp,
    AmplitudeBeam1,
    AmplitudeBeam2,
    AmplitudeBeam3,
    SoundSpeed,
    SoundSpeed1,
    SoundSpeed2,
    Heading,
    Pitch,
    Roll,
    Speed,
    DirectionTo,
    Density,
    SigmaT,
    Flag,
    Other,
    // Identity and coordinate kinds, derived from record metadata rather
    // than channel classification
    StringId,
    ProfileId,
    InstrumentDepth,
    Latitude,
    Longitude,
    Time,
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuantityKind::Temperature => "temperature",
            QuantityKind::TemperatureCurrent => "temperature:cur",
            QuantityKind::TemperatureCurrentLowRes => "temperature:cur:low_res",
            QuantityKind::TemperatureCurrentHighRes => "temperature:cur:high_res",
            QuantityKind::Salinity => "salinity",
            QuantityKind::SalinityCurrent => "salinity:cur",
            QuantityKind::Pressure => "pressure",
            QuantityKind::Depth => "depth",
            QuantityKind::DepthNominal => "depth:nominal",
            QuantityKind::Oxygen => "oxygen",
            QuantityKind::OxygenSaturation => "oxygen:saturation",
            QuantityKind::Conductivity => "conductivity",
            QuantityKind::ConductivityRatio => "conductivity:ratio",
            QuantityKind::Nutrient => "nutrient",
            QuantityKind::Isotope => "isotope",
            QuantityKind::Pigment => "pigment",
            QuantityKind::Chlorofluorocarbon => "chlorofluorocarbon",
            QuantityKind::SpeedEast => "speed:east",
            QuantityKind::SpeedNorth => "speed:north",
            QuantityKind::SpeedUp => "speed:up",
            QuantityKind::AmplitudeBeam1 => "amplitude:beam1",
            QuantityKind::AmplitudeBeam2 => "amplitude:beam2",
            QuantityKind::AmplitudeBeam3 => "amplitude:beam3",
            QuantityKind::SoundSpeed => "speed:sound",
            QuantityKind::SoundSpeed1 => "speed:sound:1",
            QuantityKind::SoundSpeed2 => "speed:sound:2",
            QuantityKind::Heading => "heading",
            QuantityKind::Pitch => "pitch",
            QuantityKind::Roll => "roll",
            QuantityKind::Speed => "speed",
            QuantityKind::DirectionTo => "direction:geog(to)",
            QuantityKind::Density => "density",
            QuantityKind::SigmaT => "sigma-t",
            QuantityKind::Flag => "flag",
            QuantityKind::Other => "other",
            QuantityKind::StringId => "str_id",
            QuantityKind::ProfileId => "profile",
            QuantityKind::InstrumentDepth => "instr_depth",
            QuantityKind::Latitude => "lat",
            QuantityKind::Longitude => "lon",
            QuantityKind::Time => "time",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Canonical Output Structures (writer side)
// =============================================================================

/// Storage precision tag for an output variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Float32,
    Double,
    Int32,
    #[serde(rename = "string")]
    Text,
}

/// Container axis an output variable lies along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "time")]
    TimeSeries,
    #[serde(rename = "z")]
    Depth,
    #[serde(rename = "scalar")]
    Scalar,
}

/// Payload of an output variable
///
/// Missing numeric samples are NaN in memory and `null` on the JSON boundary,
/// the representation the container writer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableData {
    Numeric(#[serde(with = "nan_as_null")] Vec<f64>),
    Text(Vec<String>),
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &Vec<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        let mapped: Vec<Option<f64>> = data
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        mapped.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

impl VariableData {
    pub fn len(&self) -> usize {
        match self {
            VariableData::Numeric(v) => v.len(),
            VariableData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully specified output variable, terminal output of the conversion
/// engine. Flows directly to the external container writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalVariable {
    /// Canonical code, unique within one output record (e.g. "TEMPS902").
    /// Downstream consumers match on the exact string.
    pub code: String,

    /// Canonical unit string; absent for string identifier variables
    pub units: Option<String>,

    /// CF standard name, where the vocabulary defines one
    pub standard_name: Option<String>,

    /// Human-readable description
    pub long_name: Option<String>,

    pub datatype: DataType,

    pub dimension: Dimension,

    pub data: VariableData,

    /// Auxiliary per-variable attributes (e.g. positive-direction for depth)
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl CanonicalVariable {
    /// Construct a scalar string identifier variable
    pub fn string_id(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            units: None,
            standard_name: None,
            long_name: None,
            datatype: DataType::Text,
            dimension: Dimension::Scalar,
            data: VariableData::Text(vec![value.into()]),
            attributes: BTreeMap::new(),
        }
    }

    /// Construct a scalar float variable with fixed identity
    pub fn scalar_float(
        code: impl Into<String>,
        units: &str,
        standard_name: &str,
        long_name: &str,
        value: f64,
    ) -> Self {
        Self {
            code: code.into(),
            units: Some(units.to_string()),
            standard_name: Some(standard_name.to_string()),
            long_name: Some(long_name.to_string()),
            datatype: DataType::Float32,
            dimension: Dimension::Scalar,
            data: VariableData::Numeric(vec![value]),
            attributes: BTreeMap::new(),
        }
    }
}

/// One converted record: the ordered variable list plus the record-level
/// attribute map serialized by the container writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub variables: Vec<CanonicalVariable>,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ConvertedRecord {
    /// Codes assigned so far, in emission order
    pub fn codes(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.code.as_str()).collect()
    }
}

// Time coordinate values are expressed as seconds since the Unix epoch, the
// canonical representation expected by the container writer.
pub fn to_epoch_seconds(times: &[DateTime<Utc>]) -> Vec<f64> {
    times
        .iter()
        .map(|t| t.timestamp() as f64 + f64::from(t.timestamp_subsec_millis()) / 1000.0)
        .collect()
}
