//! Resolution rule tables for BODC code assignment
//!
//! One rule list per quantity kind, in match order. Within a kind the first
//! rule whose name and unit patterns all hold selects the code stem, the
//! canonical unit string and the CF names. The code strings and unit strings
//! are matched byte-for-byte by downstream consumers and must not be edited
//! without checking the BODC vocabulary.

use crate::app::models::QuantityKind;
use crate::constants::{canonical_units as cu, factors};
use crate::{Error, Result};

/// Instance-suffix formatting appended to a code stem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixStyle {
    /// The stem is the complete code; a collision cannot be retried
    None,
    /// Single-digit suffix: stem + "1", "2", ...
    Width1,
    /// Zero-padded two-digit suffix: stem + "01", "02", ...
    Width2,
}

/// Linear conversion baked into a resolution rule, applied to the sample
/// data when the rule matches. The first unit substring that matches the raw
/// unit text selects the factor; no match is a unit error.
#[derive(Debug, Clone, Copy)]
pub struct ScaleRule {
    pub factors: &'static [(&'static str, f64)],
}

/// One entry of a kind's decision table
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRule {
    /// Substrings that must all appear in the channel name
    pub name_all: &'static [&'static str],
    /// Substrings that must not appear in the channel name
    pub name_none: &'static [&'static str],
    /// Required channel-name suffix (case-sensitive, e.g. "_11" for CFC-11)
    pub name_suffix: Option<&'static str>,
    /// Exact channel name (case-insensitive, trimmed)
    pub name_exact: Option<&'static str>,
    /// Required channel-name prefix (case-insensitive)
    pub name_prefix: Option<&'static str>,
    /// Substrings of which at least one must appear in the unit text
    pub units_any: &'static [&'static str],
    /// Exact unit text (trimmed), for patterns like a bare "%"
    pub units_exact: Option<&'static str>,
    pub stem: &'static str,
    pub suffix: SuffixStyle,
    pub units: &'static str,
    pub standard_name: Option<&'static str>,
    pub long_name: Option<&'static str>,
    pub scale: Option<ScaleRule>,
}

const RULE: ResolutionRule = ResolutionRule {
    name_all: &[],
    name_none: &[],
    name_suffix: None,
    name_exact: None,
    name_prefix: None,
    units_any: &[],
    units_exact: None,
    stem: "",
    suffix: SuffixStyle::None,
    units: "",
    standard_name: None,
    long_name: None,
    scale: None,
};

impl ResolutionRule {
    /// Whether this rule applies to the given raw name and unit text
    pub fn matches(&self, name: &str, units: &str) -> bool {
        let name_lower = name.to_lowercase();
        let units_lower = units.to_lowercase();

        if !self.name_all.iter().all(|n| name_lower.contains(n)) {
            return false;
        }
        if self.name_none.iter().any(|n| name_lower.contains(n)) {
            return false;
        }
        if let Some(suffix) = self.name_suffix {
            if !name.ends_with(suffix) {
                return false;
            }
        }
        if let Some(exact) = self.name_exact {
            if name.trim().to_lowercase() != exact {
                return false;
            }
        }
        if let Some(prefix) = self.name_prefix {
            if !name_lower.trim().starts_with(prefix) {
                return false;
            }
        }
        if !self.units_any.is_empty() && !self.units_any.iter().any(|u| units_lower.contains(u)) {
            return false;
        }
        if let Some(exact) = self.units_exact {
            if units.trim() != exact {
                return false;
            }
        }
        true
    }

    /// Whether this rule carries any distinguishing pattern at all
    fn has_pattern(&self) -> bool {
        !self.name_all.is_empty()
            || !self.name_none.is_empty()
            || self.name_suffix.is_some()
            || self.name_exact.is_some()
            || self.name_prefix.is_some()
            || !self.units_any.is_empty()
            || self.units_exact.is_some()
    }

    /// Pattern signature used by table validation
    fn signature(&self) -> String {
        format!(
            "{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{:?}",
            self.name_all,
            self.name_none,
            self.name_suffix,
            self.name_exact,
            self.name_prefix,
            self.units_any,
            self.units_exact
        )
    }
}

// -----------------------------------------------------------------------------
// Temperature
// -----------------------------------------------------------------------------

// Ordering note: the generic deg-C stem (TEMPST) is matched before the
// IPTS-68 stem, so unit strings like "deg C (IPTS68)" take the generic stem.
// ITS-90 and reversing-thermometer stems are matched first.
const TEMPERATURE: &[ResolutionRule] = &[
    ResolutionRule {
        name_all: &["reversing"],
        units_any: &["deg c"],
        stem: "TEMPRTN",
        suffix: SuffixStyle::Width1,
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["its90", "its-90"],
        stem: "TEMPS9",
        suffix: SuffixStyle::Width2,
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["deg c", "degc"],
        stem: "TEMPST",
        suffix: SuffixStyle::Width2,
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["ipts-68", "ipts68"],
        stem: "TEMPS6",
        suffix: SuffixStyle::Width2,
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature"),
        ..RULE
    },
];

const TEMPERATURE_CURRENT: &[ResolutionRule] = &[
    ResolutionRule {
        units_any: &["deg c", "degc"],
        stem: "TEMPPR01",
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["ipts68", "ipts-68"],
        stem: "TEMPP681",
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature"),
        ..RULE
    },
];

const TEMPERATURE_CURRENT_LOW_RES: &[ResolutionRule] = &[
    ResolutionRule {
        units_any: &["deg c", "degc"],
        stem: "TEMPPR03",
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature (Low Resolution)"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["ipts68", "ipts-68"],
        stem: "TEMPP683",
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature (Low Resolution)"),
        ..RULE
    },
];

const TEMPERATURE_CURRENT_HIGH_RES: &[ResolutionRule] = &[
    ResolutionRule {
        units_any: &["deg c", "degc"],
        stem: "TEMPPR02",
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature (High Resolution)"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["ipts68", "ipts-68"],
        stem: "TEMPP682",
        units: cu::DEG_C,
        standard_name: Some("sea_water_temperature"),
        long_name: Some("Sea Water Temperature (High Resolution)"),
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Salinity
// -----------------------------------------------------------------------------

const SALINITY: &[ResolutionRule] = &[
    ResolutionRule {
        name_none: &["bottle"],
        units_any: &["pss-78"],
        stem: "PSALST",
        suffix: SuffixStyle::Width2,
        units: cu::PSS_78,
        standard_name: Some("sea_water_practical_salinity"),
        long_name: Some("Sea Water Practical Salinity"),
        ..RULE
    },
    ResolutionRule {
        name_none: &["bottle"],
        units_any: &["ppt"],
        stem: "SSALST",
        suffix: SuffixStyle::Width2,
        units: cu::PPT,
        standard_name: Some("sea_water_practical_salinity"),
        long_name: Some("Sea Water Practical Salinity"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["bottle"],
        units_any: &["pss-78"],
        stem: "PSALBST",
        suffix: SuffixStyle::Width1,
        units: cu::PSS_78,
        standard_name: Some("sea_water_practical_salinity"),
        long_name: Some("Sea Water Practical Salinity"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["bottle"],
        units_any: &["ppt"],
        stem: "ODSDM021",
        units: cu::PPT,
        standard_name: Some("sea_water_practical_salinity"),
        long_name: Some("Sea Water Practical Salinity"),
        ..RULE
    },
];

const SALINITY_CURRENT: &[ResolutionRule] = &[
    ResolutionRule {
        units_any: &["pss-78"],
        stem: "PSLTZZ01",
        units: cu::PSS_78,
        standard_name: Some("sea_water_practical_salinity"),
        long_name: Some("Sea Water Practical Salinity"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["ppt"],
        stem: "ODSDM021",
        units: cu::PPT,
        standard_name: Some("sea_water_practical_salinity"),
        long_name: Some("Sea Water Practical Salinity"),
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Oxygen
// -----------------------------------------------------------------------------

const OXYGEN: &[ResolutionRule] = &[
    ResolutionRule {
        units_any: &["ml/l"],
        stem: "DOXYZZ",
        suffix: SuffixStyle::Width2,
        units: cu::ML_PER_L,
        standard_name: Some("dissolved_oxygen_concentration"),
        long_name: Some("Oxygen concentration"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["umol/kg"],
        stem: "DOXMZZ",
        suffix: SuffixStyle::Width2,
        units: cu::UMOL_PER_KG,
        standard_name: Some("dissolved_oxygen_concentration"),
        long_name: Some("Oxygen concentration"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["umol/l"],
        stem: "DOXY",
        suffix: SuffixStyle::Width2,
        units: cu::UMOL_PER_L,
        standard_name: Some("dissolved_oxygen_concentration"),
        long_name: Some("Oxygen concentration"),
        ..RULE
    },
];

const OXYGEN_SATURATION: &[ResolutionRule] = &[ResolutionRule {
    units_any: &["%"],
    stem: "OXYSZZ",
    suffix: SuffixStyle::Width2,
    units: cu::PERCENT,
    standard_name: Some("dissolved_oxygen_saturation"),
    long_name: Some("Oxygen saturation"),
    ..RULE
}];

// -----------------------------------------------------------------------------
// Conductivity
// -----------------------------------------------------------------------------

const CONDUCTIVITY: &[ResolutionRule] = &[
    ResolutionRule {
        units_any: &["s/m"],
        stem: "CNDCST",
        suffix: SuffixStyle::Width2,
        units: cu::S_PER_M,
        standard_name: Some("sea_water_electrical_conductivity"),
        long_name: Some("Sea Water Electrical Conductivity"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["ms/cm"],
        stem: "CNDCSTX",
        suffix: SuffixStyle::Width2,
        units: cu::MS_PER_CM,
        standard_name: Some("sea_water_electrical_conductivity"),
        long_name: Some("Sea Water Electrical Conductivity"),
        ..RULE
    },
    ResolutionRule {
        units_any: &["counts", "count"],
        stem: "CNDCZZ",
        suffix: SuffixStyle::Width2,
        units: cu::COUNTS,
        standard_name: Some("sea_water_electrical_conductivity"),
        long_name: Some("Sea Water Electrical Conductivity"),
        ..RULE
    },
];

const CONDUCTIVITY_RATIO: &[ResolutionRule] = &[ResolutionRule {
    stem: "CNDC_RATIO",
    units: cu::NOT_APPLICABLE,
    long_name: Some("Sea Water Electrical Conductivity Ratio"),
    ..RULE
}];

// -----------------------------------------------------------------------------
// Nutrients
// -----------------------------------------------------------------------------

const NUTRIENT: &[ResolutionRule] = &[
    ResolutionRule {
        name_all: &["nitrate_plus_nitrite"],
        units_any: &["umol/l"],
        stem: "NTRZAAZ",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_L,
        standard_name: Some("mole_concentration_of_nitrate_and_nitrite_in_sea_water"),
        long_name: Some("Mole Concentration of Nitrate and Nitrite in Sea Water"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["phosphate"],
        units_any: &["umol/l"],
        stem: "PHOSAAZ",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_L,
        standard_name: Some("mole_concentration_of_phosphate_in_sea_water"),
        long_name: Some("Mole Concentration of Phosphate in Sea Water"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["silicate"],
        units_any: &["umol/l"],
        stem: "SLCAAAZ",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_L,
        standard_name: Some("mole_concentration_of_silicate_in_sea_water"),
        long_name: Some("Mole Concentration of Silicate in Sea Water"),
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Isotopes
// -----------------------------------------------------------------------------

// Isotope codes carry no instance digit in the vocabulary; a collision
// cannot be retried and fails the channel.
const ISOTOPE: &[ResolutionRule] = &[
    ResolutionRule {
        name_all: &["oxygen", "18"],
        units_any: &["/mille"],
        stem: "D18OMXWT",
        units: cu::PPT,
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbon", "13"],
        units_any: &["/mille"],
        stem: "D13CMICX",
        units: cu::PPT,
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbon", "14"],
        units_any: &["/mille"],
        stem: "D14CMIXX",
        units: cu::PPT,
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Pigments
// -----------------------------------------------------------------------------

/// Pigment data is archived in ng/L; mg/m^3 input is scaled accordingly.
const PIGMENT_SCALE: ScaleRule = ScaleRule {
    factors: &[("ng/l", 1.0), ("mg/m^3", factors::MG_M3_TO_NG_L)],
};

const PIGMENT: &[ResolutionRule] = &[
    ResolutionRule {
        name_all: &["chl-c3"],
        stem: "CLC3MHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of chlorophyll-c3 per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["chlide-a"],
        stem: "CIDAMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of chlorophyllide-a per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["chl-c2"],
        stem: "COCHWA0",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of chlorophyll-c2 per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["peri"],
        stem: "PERIMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of peridinin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["pheide-a"],
        stem: "PBAXXXP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of phaeophorbide-a per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["but-fuco"],
        stem: "BUTAMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some(
            "Concentration of 19'-butanoyloxyfucoxanthin per unit volume of the water body",
        ),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["fuco"],
        name_none: &["but-", "hex-"],
        stem: "FUCXMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of fucoxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["neo"],
        stem: "NEOXMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of neoxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["pras"],
        stem: "COPRWA1",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of prasinoxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["viola"],
        stem: "VILXMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of violaxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["hex-fuco"],
        stem: "HEXAMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some(
            "Concentration of 19'-hexanoyloxyfucoxanthin per unit volume of the water body",
        ),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["diadino"],
        stem: "DIADMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of diadinoxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["allo"],
        stem: "ALLOMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of alloxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["diato"],
        stem: "DIATMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of diatoxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["zea"],
        stem: "ZEAXMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of zeaxanthin per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["lut"],
        stem: "LUTNMHP",
        suffix: SuffixStyle::Width1,
        units: cu::NG_PER_L,
        long_name: Some("Concentration of lutein per unit volume of the water body"),
        scale: Some(PIGMENT_SCALE),
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Chlorofluorocarbons
// -----------------------------------------------------------------------------

const CHLOROFLUOROCARBON: &[ResolutionRule] = &[
    ResolutionRule {
        name_suffix: Some("_11"),
        units_any: &["pmol/kg"],
        stem: "FR11GCKG",
        units: cu::PMOL_PER_KG,
        long_name: Some(
            "Concentration of trichlorofluoromethane per unit mass of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_suffix: Some("_11"),
        units_any: &["pmol/l"],
        stem: "FR11GCTX",
        units: cu::PMOL_PER_L,
        long_name: Some(
            "Concentration of trichlorofluoromethane per unit volume of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_suffix: Some("_12"),
        units_any: &["pmol/kg"],
        stem: "FR12GCKG",
        units: cu::PMOL_PER_KG,
        long_name: Some(
            "Concentration of dichlorodifluoromethane per unit mass of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_suffix: Some("_12"),
        units_any: &["pmol/l"],
        stem: "FR12GCTX",
        units: cu::PMOL_PER_L,
        long_name: Some(
            "Concentration of dichlorodifluoromethane per unit volume of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_suffix: Some("_113"),
        units_any: &["pmol/l"],
        stem: "F113GCTX",
        units: cu::PMOL_PER_L,
        long_name: Some(
            "Concentration of 1,1,2-trichloro-1,2,2-trifluoroethane per unit volume of the water body",
        ),
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Catch-all "other" vocabulary
// -----------------------------------------------------------------------------

const TRACE_GAS_SCALE: ScaleRule = ScaleRule {
    factors: &[("pmol/l", 1.0), ("nmol/l", factors::NMOL_TO_PMOL)],
};

const DMSP_SCALE: ScaleRule = ScaleRule {
    factors: &[("nmol/l", 1.0), ("umol/l", factors::UMOL_TO_NMOL)],
};

const OTHER: &[ResolutionRule] = &[
    ResolutionRule {
        name_all: &["chlorophyll_plus_phaeo-pigment"],
        units_any: &["mg/m^3"],
        stem: "CPPHFLP1",
        suffix: SuffixStyle::Width1,
        units: cu::MG_PER_M3,
        long_name: Some(
            "Concentration of chlorophyll+phaeopigments per unit volume of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["chlorophyll"],
        units_any: &["mg/m^3"],
        stem: "CPHLFLP",
        suffix: SuffixStyle::Width1,
        units: cu::MG_PER_M3,
        standard_name: Some("concentration_of_chlorophyll-a_in_water_body"),
        long_name: Some(
            "Concentration of chlorophyll-a {chl-a CAS 479-61-8} per unit volume of the water \
             body [particulate >GF/F phase] by filtration, acetone extraction and fluorometry",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["fluorescence:calibrated"],
        units_any: &["mg/m^3"],
        stem: "CPHLPS01",
        suffix: SuffixStyle::Width1,
        units: cu::MG_PER_M3,
        standard_name: Some("mass_concentration_of_chlorophyll_a_in_water_body"),
        long_name: Some(
            "Concentration of chlorophyll-a {chl-a CAS 479-61-8} per unit volume of the water \
             body [particulate >unknown phase] by in-situ chlorophyll fluorometer and \
             calibration against sample data",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["fluorescence"],
        units_any: &["mg/m^3"],
        stem: "CPHLPR01",
        suffix: SuffixStyle::Width1,
        units: cu::MG_PER_M3,
        standard_name: Some("mass_concentration_of_chlorophyll_a_in_water_body"),
        long_name: Some(
            "Concentration of chlorophyll-a {chl-a CAS 479-61-8} per unit volume of the water \
             body [particulate >unknown phase] by in-situ chlorophyll fluorometer",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["transmissivity"],
        units_any: &["%/metre"],
        stem: "POPTPZ01",
        suffix: SuffixStyle::Width1,
        units: cu::PERCENT_PER_METRE,
        long_name: Some(
            "Transmittance (unspecified wavelength) per unit length of the water body by \
             transmissometer and correction to a path length of 1m",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["transmissivity"],
        units_exact: Some("%"),
        stem: "POPTZZ01",
        suffix: SuffixStyle::Width1,
        units: cu::PERCENT,
        long_name: Some(
            "Transmittance (unspecified wavelength) per unspecified length of the water body by \
             transmissometer",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["ammonium"],
        units_any: &["umol/l"],
        stem: "AMONZZXX",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_L,
        long_name: Some(
            "Concentration of ammonium {NH4+ CAS 14798-03-9} per unit volume of the water body \
             [unknown phase]",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbon:dissolved:organic"],
        units_any: &["umol/l"],
        stem: "IC000083",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_L,
        long_name: Some(
            "Concentration of dissolved organic carbon per unit volume of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbon:particulate:organic"],
        units_any: &["umol/l"],
        stem: "MDMAP010",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_L,
        long_name: Some(
            "Concentration of particulate organic carbon per unit volume of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbon:dissolved:inorganic"],
        units_any: &["umol/kg"],
        stem: "TCO2MSXX",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_KG,
        long_name: Some(
            "Concentration of total inorganic carbon per unit mass of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbon:dissolved:inorganic"],
        units_any: &["mg/l"],
        stem: "TCO2POTX",
        suffix: SuffixStyle::Width1,
        units: cu::MG_PER_L,
        long_name: Some(
            "Concentration of total inorganic carbon per unit volume of the water body",
        ),
        ..RULE
    },
    ResolutionRule {
        name_exact: Some("ph"),
        stem: "PHXXPR01",
        suffix: SuffixStyle::Width1,
        units: cu::NOT_APPLICABLE,
        long_name: Some("pH (unspecified scale) of the water body by pH electrode"),
        ..RULE
    },
    ResolutionRule {
        name_prefix: Some("ph:"),
        stem: "PHXXPR01",
        suffix: SuffixStyle::Width1,
        units: cu::NOT_APPLICABLE,
        long_name: Some("pH (unspecified scale) of the water body by pH electrode"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["par:reference"],
        units_any: &["ue/m^2/sec"],
        stem: "IRRDSV01",
        suffix: SuffixStyle::Width1,
        units: cu::UEINSTEIN,
        long_name: Some(
            "Downwelling vector irradiance as photons of electromagnetic radiation (PAR \
             wavelengths) in the atmosphere by cosine-collector radiometer",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["par"],
        units_any: &["ue/m^2/sec"],
        stem: "PFDPAR01",
        suffix: SuffixStyle::Width1,
        units: cu::UEINSTEIN,
        long_name: Some("Irradiance as photons of electromagnetic radiation (PAR wavelengths)"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["turbidity:seapoint"],
        units_any: &["ntu", "ftu", "stu"],
        stem: "TURBSP01",
        suffix: SuffixStyle::Width1,
        units: cu::NTU,
        standard_name: Some("sea_water_turbidity"),
        long_name: Some(
            "Turbidity of water in the water body by SeaPoint turbidity meter and laboratory \
             calibration against formazin",
        ),
        ..RULE
    },
    // umol/L total alkalinity is assumed to be mislabelled umol/kg
    ResolutionRule {
        name_all: &["alkalinity:total"],
        units_any: &["umol/kg", "umol/l"],
        stem: "MDMAP014",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_KG,
        long_name: Some("Total alkalinity per unit mass of the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["alkalinity:carbonate"],
        units_any: &["umol/kg"],
        stem: "CRBTWCAL",
        suffix: SuffixStyle::Width1,
        units: cu::UMOL_PER_KG,
        long_name: Some(
            "Concentration of carbonate ions {CO3} per unit mass of the water body by computation",
        ),
        ..RULE
    },
    ResolutionRule {
        name_all: &["phytoplankton:volume"],
        units_any: &["mm^3/m^3"],
        stem: "SDBIOL13",
        suffix: SuffixStyle::Width1,
        units: cu::MM3_PER_M3,
        long_name: Some("Biovolume of phytoplankton in the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["methane"],
        units_any: &["nmol/l"],
        stem: "CH4CGCXX",
        suffix: SuffixStyle::Width1,
        units: cu::NMOL_PER_L,
        long_name: Some("Concentration of methane per unit volume of the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["ethane"],
        units_any: &["mol/l"],
        stem: "AX02GCTX",
        suffix: SuffixStyle::Width1,
        units: cu::PMOL_PER_L,
        long_name: Some("Concentration of ethane per unit volume of the water body"),
        scale: Some(TRACE_GAS_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["propane"],
        units_any: &["mol/l"],
        stem: "AX03GCTX",
        suffix: SuffixStyle::Width1,
        units: cu::PMOL_PER_L,
        long_name: Some("Concentration of propane per unit volume of the water body"),
        scale: Some(TRACE_GAS_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["ethylene"],
        units_any: &["mol/l"],
        stem: "AW02GCTX",
        suffix: SuffixStyle::Width1,
        units: cu::PMOL_PER_L,
        long_name: Some("Concentration of ethene (ethylene) per unit volume of the water body"),
        scale: Some(TRACE_GAS_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["dimethylsulfoniopropionate_dissolved"],
        units_any: &["mol/l"],
        stem: "DMSPGCD1",
        suffix: SuffixStyle::Width1,
        units: cu::NMOL_PER_L,
        long_name: Some(
            "Concentration of dimethylsulphoniopropionate per unit volume of the water body",
        ),
        scale: Some(DMSP_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["dimethylsulfoniopropionate_total"],
        units_any: &["mol/l"],
        stem: "DMSPPTR3",
        suffix: SuffixStyle::Width1,
        units: cu::NMOL_PER_L,
        long_name: Some(
            "Total concentration of dimethylsulphoniopropionate per unit volume of the water body",
        ),
        scale: Some(DMSP_SCALE),
        ..RULE
    },
    ResolutionRule {
        name_all: &["dimethyl_sulphide"],
        units_any: &["nmol/l"],
        stem: "DMSXGCD4",
        suffix: SuffixStyle::Width1,
        units: cu::NMOL_PER_L,
        long_name: Some("Concentration of dimethyl sulphide in the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["carbontetrachloride"],
        units_any: &["pmol/l"],
        stem: "QCMXMASS",
        suffix: SuffixStyle::Width1,
        units: cu::PMOL_PER_L,
        long_name: Some("Concentration of carbontetrachloride in the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["barium:dissolved"],
        units_any: &["nmol/l"],
        stem: "RWS00147",
        suffix: SuffixStyle::Width1,
        units: cu::NMOL_PER_L,
        long_name: Some("Concentration of barium per unit volume in the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["total_suspended_solids"],
        units_any: &["ug/l"],
        stem: "RBYJLY26",
        suffix: SuffixStyle::Width1,
        units: cu::UG_PER_L,
        long_name: Some("Total concentration of solids per unit volume in the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["bacteria"],
        units_any: &["/ml"],
        stem: "P18318A9",
        suffix: SuffixStyle::Width1,
        units: cu::PER_ML,
        long_name: Some("Abundance of bacteria per unit volume of the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["picophytoplankton"],
        units_any: &["/ml"],
        stem: "PU00A02Z",
        suffix: SuffixStyle::Width1,
        units: cu::PER_ML,
        long_name: Some("Abundance of picophytoplankton per unit volume of the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["nanophytoplankton"],
        units_any: &["/ml"],
        stem: "PU00A01B",
        suffix: SuffixStyle::Width1,
        units: cu::PER_ML,
        long_name: Some("Abundance of nanophytoplankton per unit volume of the water body"),
        ..RULE
    },
    ResolutionRule {
        name_all: &["phaeo-pigment:extracted"],
        units_any: &["mg/m^3"],
        stem: "PHAEFLPZ",
        suffix: SuffixStyle::Width1,
        units: cu::MG_PER_M3,
        long_name: Some("Concentration of phaeopigments per unit volume of the water body"),
        ..RULE
    },
];

// -----------------------------------------------------------------------------
// Velocity, acoustics and platform attitude
// -----------------------------------------------------------------------------

const SPEED_EAST: &[ResolutionRule] = &[ResolutionRule {
    units_any: &["m/s", "metres/sec"],
    stem: "LCEWEL01",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("eastward_sea_water_velocity"),
    ..RULE
}];

const SPEED_NORTH: &[ResolutionRule] = &[ResolutionRule {
    units_any: &["m/s", "metres/sec"],
    stem: "LCNSEL01",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("northward_sea_water_velocity"),
    ..RULE
}];

const SPEED_UP: &[ResolutionRule] = &[ResolutionRule {
    units_any: &["m/s", "metres/sec"],
    stem: "LRZASP01",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("upward_sea_water_velocity"),
    ..RULE
}];

const SPEED: &[ResolutionRule] = &[ResolutionRule {
    units_any: &["m/s", "metres/sec"],
    stem: "LCSAEL01",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("sea_water_speed"),
    ..RULE
}];

const DIRECTION_TO: &[ResolutionRule] = &[ResolutionRule {
    stem: "LCDAEL01",
    units: cu::DEGREES,
    standard_name: Some("sea_water_velocity_to_direction"),
    ..RULE
}];

const BEAM_STANDARD_NAME: &str =
    "signal_intensity_from_multibeam_acoustic_doppler_velocity_sensor_in_sea_water";

const AMPLITUDE_BEAM1: &[ResolutionRule] = &[ResolutionRule {
    stem: "ISCMBMA1",
    units: cu::COUNTS,
    standard_name: Some(BEAM_STANDARD_NAME),
    ..RULE
}];

const AMPLITUDE_BEAM2: &[ResolutionRule] = &[ResolutionRule {
    stem: "ISCMBMA2",
    units: cu::COUNTS,
    standard_name: Some(BEAM_STANDARD_NAME),
    ..RULE
}];

const AMPLITUDE_BEAM3: &[ResolutionRule] = &[ResolutionRule {
    stem: "ISCMBMA3",
    units: cu::COUNTS,
    standard_name: Some(BEAM_STANDARD_NAME),
    ..RULE
}];

const SOUND_SPEED: &[ResolutionRule] = &[ResolutionRule {
    stem: "SVELCV01",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("speed_of_sound_in_sea_water"),
    ..RULE
}];

const SOUND_SPEED_1: &[ResolutionRule] = &[ResolutionRule {
    stem: "SVELCV01",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("speed_of_sound_in_sea_water"),
    ..RULE
}];

const SOUND_SPEED_2: &[ResolutionRule] = &[ResolutionRule {
    stem: "SVELCV02",
    units: cu::METRES_PER_SECOND,
    standard_name: Some("speed_of_sound_in_sea_water"),
    ..RULE
}];

const HEADING: &[ResolutionRule] = &[ResolutionRule {
    stem: "HEADCM01",
    units: cu::DEGREES,
    standard_name: Some("platform_orientation"),
    ..RULE
}];

const PITCH: &[ResolutionRule] = &[ResolutionRule {
    stem: "PTCHEI01",
    units: cu::DEGREES,
    standard_name: Some("platform_pitch"),
    ..RULE
}];

const ROLL: &[ResolutionRule] = &[ResolutionRule {
    stem: "ROLLEI01",
    units: cu::DEGREES,
    standard_name: Some("platform_roll"),
    ..RULE
}];

const DENSITY: &[ResolutionRule] = &[ResolutionRule {
    stem: "NEUTDENS",
    units: cu::KG_PER_M3,
    long_name: Some("Density (neutral)"),
    ..RULE
}];

const SIGMA_T: &[ResolutionRule] = &[ResolutionRule {
    stem: "SIGTEQST",
    units: cu::NOT_APPLICABLE,
    long_name: Some("Sigma-theta"),
    ..RULE
}];

// -----------------------------------------------------------------------------
// Table access and validation
// -----------------------------------------------------------------------------

/// All kinds resolved through the decision table, with their rule lists
pub const TABLE: &[(QuantityKind, &[ResolutionRule])] = &[
    (QuantityKind::Temperature, TEMPERATURE),
    (QuantityKind::TemperatureCurrent, TEMPERATURE_CURRENT),
    (
        QuantityKind::TemperatureCurrentLowRes,
        TEMPERATURE_CURRENT_LOW_RES,
    ),
    (
        QuantityKind::TemperatureCurrentHighRes,
        TEMPERATURE_CURRENT_HIGH_RES,
    ),
    (QuantityKind::Salinity, SALINITY),
    (QuantityKind::SalinityCurrent, SALINITY_CURRENT),
    (QuantityKind::Oxygen, OXYGEN),
    (QuantityKind::OxygenSaturation, OXYGEN_SATURATION),
    (QuantityKind::Conductivity, CONDUCTIVITY),
    (QuantityKind::ConductivityRatio, CONDUCTIVITY_RATIO),
    (QuantityKind::Nutrient, NUTRIENT),
    (QuantityKind::Isotope, ISOTOPE),
    (QuantityKind::Pigment, PIGMENT),
    (QuantityKind::Chlorofluorocarbon, CHLOROFLUOROCARBON),
    (QuantityKind::Other, OTHER),
    (QuantityKind::SpeedEast, SPEED_EAST),
    (QuantityKind::SpeedNorth, SPEED_NORTH),
    (QuantityKind::SpeedUp, SPEED_UP),
    (QuantityKind::Speed, SPEED),
    (QuantityKind::DirectionTo, DIRECTION_TO),
    (QuantityKind::AmplitudeBeam1, AMPLITUDE_BEAM1),
    (QuantityKind::AmplitudeBeam2, AMPLITUDE_BEAM2),
    (QuantityKind::AmplitudeBeam3, AMPLITUDE_BEAM3),
    (QuantityKind::SoundSpeed, SOUND_SPEED),
    (QuantityKind::SoundSpeed1, SOUND_SPEED_1),
    (QuantityKind::SoundSpeed2, SOUND_SPEED_2),
    (QuantityKind::Heading, HEADING),
    (QuantityKind::Pitch, PITCH),
    (QuantityKind::Roll, ROLL),
    (QuantityKind::Density, DENSITY),
    (QuantityKind::SigmaT, SIGMA_T),
];

/// Rule list for a kind, or `None` for kinds resolved outside the table
pub fn rules_for(kind: QuantityKind) -> Option<&'static [ResolutionRule]> {
    TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, rules)| *rules)
}

/// Validate the table for stem and pattern consistency
///
/// Run once at startup. A failure here is a build defect, never a user data
/// problem.
pub fn validate() -> Result<()> {
    for (kind, rules) in TABLE {
        if rules.is_empty() {
            return Err(Error::table_validation(format!("kind {} has no rules", kind)));
        }

        let mut signatures = std::collections::HashSet::new();
        for rule in *rules {
            if rule.stem.is_empty() {
                return Err(Error::table_validation(format!(
                    "kind {} has a rule with an empty stem",
                    kind
                )));
            }

            if rule.units.is_empty() {
                return Err(Error::table_validation(format!(
                    "kind {} stem {} has no canonical units",
                    kind, rule.stem
                )));
            }

            if rules.len() > 1 && !rule.has_pattern() {
                return Err(Error::table_validation(format!(
                    "kind {} stem {} is unreachable: no pattern in a multi-rule table",
                    kind, rule.stem
                )));
            }

            if !signatures.insert(rule.signature()) {
                return Err(Error::table_validation(format!(
                    "kind {} has two rules with identical patterns (stem {})",
                    kind, rule.stem
                )));
            }

            if let Some(scale) = &rule.scale {
                if scale.factors.is_empty() {
                    return Err(Error::table_validation(format!(
                        "kind {} stem {} has an empty conversion list",
                        kind, rule.stem
                    )));
                }
            }
        }
    }

    Ok(())
}
