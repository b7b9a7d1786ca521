//! Ordered classification rules for channel names
//!
//! The chain mirrors the conventions found in IOS CTD, moored-CTD, bottle and
//! current-meter files. Order is load-bearing: a name may contain several
//! overlapping keywords ("Oxygen:Dissolved:Saturation:Flag"), so qualifier
//! and exclusion checks run before the generic patterns.

use super::ClassifyContext;
use crate::app::models::QuantityKind;
use tracing::{debug, warn};

/// Case-insensitive substring containment for any of the given needles
pub fn contains_any(needles: &[&str], haystack: &str) -> bool {
    let hay = haystack.to_lowercase();
    needles.iter().any(|n| hay.contains(&n.to_lowercase()))
}

/// Pigment channel names as written in IOS bottle files
const PIGMENT_NAMES: &[&str] = &[
    "chl-c3", "chlide-a", "chl-c2", "peri", "pheide-a", "but-fuco", "fuco", "neo", "pras", "viola",
    "hex-fuco", "diadino", "allo", "diato", "zea", "lut",
];

/// Channel names routed to the catch-all "other" vocabulary
const OTHER_NAMES: &[&str] = &[
    "chlorophyll:extracted",
    "chlorophyll_plus_phaeo-pigment:extracted",
    "fluorescence",
    "ammonium",
    "ph:",
    "par",
    "turbidity:seapoint",
    "ethane",
    "propane",
    "ethylene",
    "methane",
    "dimethyl_sulphide",
    "dimethylsulfoniopropionate_dissolved",
    "dimethylsulfoniopropionate_total",
    "carbontetrachloride",
    "barium:dissolved",
    "total_suspended_solids",
    "bacteria",
    "picophytoplankton",
    "nanophytoplankton",
    "phaeo-pigment:extracted",
    "carbon:particulate",
];

/// Classify a raw channel name into a quantity kind
///
/// Returns `None` when no pattern matches (the channel is then reported and
/// dropped by the caller) and for channels that are intentionally skipped in
/// the current record category.
pub fn classify(name: &str, ctx: &mut ClassifyContext) -> Option<QuantityKind> {
    let is_current = ctx.is_current_meter();

    if contains_any(&["depth"], name) && !contains_any(&["nominal"], name) {
        return Some(QuantityKind::Depth);
    }

    if contains_any(&["depth"], name) && contains_any(&["nominal"], name) {
        return Some(QuantityKind::DepthNominal);
    }

    if contains_any(&["pressure"], name) {
        return Some(QuantityKind::Pressure);
    }

    if contains_any(&["temperature:low_res"], name) {
        return Some(QuantityKind::TemperatureCurrentLowRes);
    }

    if contains_any(&["temperature:high_res"], name) {
        return Some(QuantityKind::TemperatureCurrentHighRes);
    }

    if contains_any(&["temperature"], name) && !contains_any(&["flag", "rinko", "bottle"], name) {
        if is_current {
            // Unqualified temperature channels in current-meter files follow
            // an ordinal convention: first is the primary sensor, second the
            // high-resolution sensor.
            return match ctx.next_temperature_ordinal() {
                1 => Some(QuantityKind::TemperatureCurrent),
                2 => Some(QuantityKind::TemperatureCurrentHighRes),
                n => {
                    warn!("Ignoring temperature channel '{}' (ordinal {})", name, n);
                    None
                }
            };
        }
        return Some(QuantityKind::Temperature);
    }

    if contains_any(&["salinity"], name) && !contains_any(&["flag"], name) {
        return Some(if is_current {
            QuantityKind::SalinityCurrent
        } else {
            QuantityKind::Salinity
        });
    }

    if contains_any(&["oxygen"], name)
        && !contains_any(
            &[
                "flag",
                "bottle",
                "rinko",
                "temperature",
                "current",
                "isotope",
                "saturation",
                "voltage",
            ],
            name,
        )
    {
        return Some(QuantityKind::Oxygen);
    }

    if contains_any(&["oxygen"], name)
        && contains_any(&["saturation"], name)
        && !contains_any(&["flag", "temperature", "current", "isotope", "voltage"], name)
    {
        return Some(QuantityKind::OxygenSaturation);
    }

    if contains_any(&["oxygen"], name)
        && contains_any(&["isotope"], name)
        && !contains_any(&["flag"], name)
    {
        return Some(QuantityKind::Isotope);
    }

    if contains_any(&["conductivity", "conductance"], name) && contains_any(&["ratio"], name) {
        return Some(QuantityKind::ConductivityRatio);
    }

    if contains_any(&["conductivity", "conductance"], name) {
        if is_current {
            // Conductivity channels in current-meter files are not archived.
            debug!("Skipping conductivity channel '{}' in current-meter record", name);
            return None;
        }
        return Some(QuantityKind::Conductivity);
    }

    if contains_any(&["nitrate_plus_nitrite", "silicate", "phosphate"], name)
        && !contains_any(&["flag"], name)
    {
        return Some(QuantityKind::Nutrient);
    }

    if contains_any(&["speed:east", "ew_comp"], name) {
        return Some(QuantityKind::SpeedEast);
    }

    if contains_any(&["speed:north", "ns_comp"], name) {
        return Some(QuantityKind::SpeedNorth);
    }

    if contains_any(&["speed:up"], name) {
        return Some(QuantityKind::SpeedUp);
    }

    if contains_any(&["amplitude:beam1"], name) {
        return Some(QuantityKind::AmplitudeBeam1);
    }

    if contains_any(&["amplitude:beam2"], name) {
        return Some(QuantityKind::AmplitudeBeam2);
    }

    if contains_any(&["amplitude:beam3"], name) {
        return Some(QuantityKind::AmplitudeBeam3);
    }

    if contains_any(&["speed:sound:1"], name) {
        return Some(QuantityKind::SoundSpeed1);
    }

    if contains_any(&["speed:sound:2"], name) {
        return Some(QuantityKind::SoundSpeed2);
    }

    if contains_any(&["speed:sound"], name) {
        return Some(QuantityKind::SoundSpeed);
    }

    if contains_any(&["heading"], name) {
        return Some(QuantityKind::Heading);
    }

    if contains_any(&["pitch"], name) {
        return Some(QuantityKind::Pitch);
    }

    if contains_any(&["roll"], name) {
        return Some(QuantityKind::Roll);
    }

    // Generic speed only after every qualified speed:* pattern above
    if contains_any(&["speed"], name) {
        return Some(QuantityKind::Speed);
    }

    if contains_any(&["direction:geog(to)", "direction:current"], name) {
        return Some(QuantityKind::DirectionTo);
    }

    if contains_any(&["density"], name) {
        return Some(QuantityKind::Density);
    }

    if contains_any(&["sigma-t"], name) {
        return Some(QuantityKind::SigmaT);
    }

    if contains_any(&["chlorofluorocarbon"], name) && !contains_any(&["flag"], name) {
        return Some(QuantityKind::Chlorofluorocarbon);
    }

    if contains_any(&["carbon:isotope"], name) && !contains_any(&["flag"], name) {
        return Some(QuantityKind::Isotope);
    }

    if contains_any(&["transmissivity"], name) {
        return Some(QuantityKind::Other);
    }

    if contains_any(&["alkalinity"], name) && !contains_any(&["flag"], name) {
        return Some(QuantityKind::Other);
    }

    if contains_any(&["carbon:dissolved"], name) && !contains_any(&["flag"], name) {
        return Some(QuantityKind::Other);
    }

    if contains_any(&["phytoplankton:volume"], name) && !contains_any(&["flag"], name) {
        return Some(QuantityKind::Other);
    }

    if contains_any(PIGMENT_NAMES, name) && !contains_any(&["flag"], name) {
        return Some(QuantityKind::Pigment);
    }

    if (contains_any(OTHER_NAMES, name) || name.trim().eq_ignore_ascii_case("ph"))
        && !contains_any(&["flag"], name)
    {
        return Some(QuantityKind::Other);
    }

    if contains_any(&["flag"], name) {
        return Some(QuantityKind::Flag);
    }

    None
}
