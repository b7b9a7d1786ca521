//! Application constants for the IOS processor
//!
//! This module contains canonical unit strings, code-resolution limits,
//! conversion factors and default values used throughout the application.

// =============================================================================
// Canonical Unit Strings
// =============================================================================

/// Canonical unit strings emitted by the code resolver
///
/// Downstream consumers match on these strings byte-for-byte, so they must
/// not be reformatted.
pub mod canonical_units {
    pub const DEG_C: &str = "deg_C";
    pub const PSS_78: &str = "PSS-78";
    pub const PPT: &str = "PPT";
    pub const DECIBAR: &str = "decibar";
    pub const COUNTS: &str = "counts";
    pub const METRES: &str = "m";
    pub const METRES_PER_SECOND: &str = "m/s";
    pub const DEGREES: &str = "deg";
    pub const ML_PER_L: &str = "mL/L";
    pub const UMOL_PER_KG: &str = "umol/kg";
    pub const UMOL_PER_L: &str = "umol/L";
    pub const MG_PER_L: &str = "mg/L";
    pub const UG_PER_L: &str = "ug/L";
    pub const NG_PER_L: &str = "ng/L";
    pub const PMOL_PER_KG: &str = "pmol/kg";
    pub const PMOL_PER_L: &str = "pmol/L";
    pub const NMOL_PER_L: &str = "nmol/L";
    pub const MG_PER_M3: &str = "mg/m^3";
    pub const MM3_PER_M3: &str = "mm^3/m^3";
    pub const S_PER_M: &str = "S/m";
    pub const MS_PER_CM: &str = "mS/cm";
    pub const KG_PER_M3: &str = "kg/m^3";
    pub const PERCENT: &str = "%";
    pub const PERCENT_PER_METRE: &str = "%/metre";
    pub const PER_ML: &str = "/mL";
    pub const NTU: &str = "ntu";
    pub const UEINSTEIN: &str = "ue/m^2/sec";
    pub const DEGREES_NORTH: &str = "degrees_north";
    pub const DEGREES_EAST: &str = "degrees_east";
    pub const SECONDS_SINCE_EPOCH: &str = "seconds since 1970-01-01 00:00:00+0000";
    pub const NOT_APPLICABLE: &str = "n/a";
}

// =============================================================================
// Code Resolution
// =============================================================================

/// Maximum number of instance-suffix attempts when searching for a code not
/// already assigned within the record
pub const MAX_CODE_ATTEMPTS: usize = 4;

/// Suffix appended to the predecessor code for quality-flag channels
pub const FLAG_CODE_SUFFIX: &str = "_QC";

/// Channel names that carry file bookkeeping rather than measurements.
/// Skipped without a diagnostic when no kind matches.
pub const BOOKKEEPING_CHANNELS: &[&str] = &["record", "sample", "date", "time"];

// =============================================================================
// Conversion Factors
// =============================================================================

/// Linear unit conversion factors
pub mod factors {
    /// centimetres/second to metres/second
    pub const CM_PER_S_TO_M_PER_S: f64 = 0.01;

    /// kilopascal to decibar
    pub const KILOPASCAL_TO_DECIBAR: f64 = 0.1;

    /// milligrams/cubic metre to nanograms/litre (pigments)
    pub const MG_M3_TO_NG_L: f64 = 1000.0;

    /// nanomoles/litre to picomoles/litre (trace gases)
    pub const NMOL_TO_PMOL: f64 = 1000.0;

    /// micromoles/litre to nanomoles/litre (DMSP)
    pub const UMOL_TO_NMOL: f64 = 1000.0;
}

/// Decimal places kept when deriving east/north velocity components from
/// scalar speed and direction
pub const VELOCITY_COMPONENT_DECIMALS: i32 = 3;

// =============================================================================
// CF / Container Metadata
// =============================================================================

/// CF feature type strings
pub mod feature_types {
    pub const PROFILE: &str = "profile";
    pub const TIME_SERIES: &str = "timeSeries";
}

/// CDM data type strings matching the CF feature types
pub mod cdm_data_types {
    pub const PROFILE: &str = "Profile";
    pub const TIME_SERIES: &str = "TimeSeries";
}

/// Naming authority recorded in the global attributes
pub const NAMING_AUTHORITY: &str = "COARDS";

/// Timestamp format used for time-coverage and creation-date attributes
pub const ATTRIBUTE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%Z";

// =============================================================================
// CLI Defaults
// =============================================================================

/// Default output directory for converted records
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// File extension of serialized record files
pub const RECORD_FILE_EXTENSION: &str = "json";
