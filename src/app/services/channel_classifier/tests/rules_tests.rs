//! Tests for the ordered classification rule chain

use crate::app::models::QuantityKind;
use crate::app::services::channel_classifier::{classify, ClassifyContext};

fn classify_profile(name: &str) -> Option<QuantityKind> {
    let mut ctx = ClassifyContext::new(false);
    classify(name, &mut ctx)
}

fn classify_current(name: &str) -> Option<QuantityKind> {
    let mut ctx = ClassifyContext::new(true);
    classify(name, &mut ctx)
}

#[test]
fn test_depth_and_nominal_depth() {
    assert_eq!(classify_profile("Depth"), Some(QuantityKind::Depth));
    assert_eq!(
        classify_profile("Depth:Nominal"),
        Some(QuantityKind::DepthNominal)
    );
}

#[test]
fn test_pressure() {
    assert_eq!(classify_profile("Pressure"), Some(QuantityKind::Pressure));
}

#[test]
fn test_temperature_resolution_qualifiers_win_over_generic() {
    assert_eq!(
        classify_current("Temperature:Low_Res"),
        Some(QuantityKind::TemperatureCurrentLowRes)
    );
    assert_eq!(
        classify_current("Temperature:High_Res"),
        Some(QuantityKind::TemperatureCurrentHighRes)
    );
}

#[test]
fn test_temperature_profile_context() {
    assert_eq!(
        classify_profile("Temperature:Primary"),
        Some(QuantityKind::Temperature)
    );
}

#[test]
fn test_temperature_exclusions() {
    assert_eq!(classify_profile("Temperature:Flag"), Some(QuantityKind::Flag));
    assert_eq!(classify_profile("Temperature:Rinko"), None);
    assert_eq!(classify_profile("Temperature:Bottle"), None);
}

#[test]
fn test_temperature_ordinal_in_current_meter_records() {
    let mut ctx = ClassifyContext::new(true);
    assert_eq!(
        classify("Temperature", &mut ctx),
        Some(QuantityKind::TemperatureCurrent)
    );
    assert_eq!(
        classify("Temperature", &mut ctx),
        Some(QuantityKind::TemperatureCurrentHighRes)
    );
    // A third unqualified temperature channel has no mapping
    assert_eq!(classify("Temperature", &mut ctx), None);
}

#[test]
fn test_temperature_ordinal_not_applied_to_profiles() {
    let mut ctx = ClassifyContext::new(false);
    assert_eq!(
        classify("Temperature", &mut ctx),
        Some(QuantityKind::Temperature)
    );
    assert_eq!(
        classify("Temperature", &mut ctx),
        Some(QuantityKind::Temperature)
    );
}

#[test]
fn test_salinity_by_context() {
    assert_eq!(classify_profile("Salinity:T0:C0"), Some(QuantityKind::Salinity));
    assert_eq!(
        classify_current("Salinity"),
        Some(QuantityKind::SalinityCurrent)
    );
    assert_eq!(classify_profile("Salinity:Flag"), Some(QuantityKind::Flag));
}

#[test]
fn test_oxygen_family_disambiguation() {
    assert_eq!(
        classify_profile("Oxygen:Dissolved:SBE"),
        Some(QuantityKind::Oxygen)
    );
    assert_eq!(
        classify_profile("Oxygen:Dissolved:Saturation"),
        Some(QuantityKind::OxygenSaturation)
    );
    assert_eq!(
        classify_profile("Oxygen:Isotope:18"),
        Some(QuantityKind::Isotope)
    );
    // Sensor voltage channels carry no archived quantity
    assert_eq!(classify_profile("Oxygen:Voltage:SBE"), None);
}

#[test]
fn test_conductivity() {
    assert_eq!(
        classify_profile("Conductivity"),
        Some(QuantityKind::Conductivity)
    );
    assert_eq!(
        classify_profile("Conductance:Specific"),
        Some(QuantityKind::Conductivity)
    );
    assert_eq!(
        classify_profile("Conductivity:Ratio"),
        Some(QuantityKind::ConductivityRatio)
    );
    // Current-meter conductivity channels are intentionally skipped
    assert_eq!(classify_current("Conductivity"), None);
}

#[test]
fn test_nutrients() {
    assert_eq!(
        classify_profile("Nitrate_plus_Nitrite"),
        Some(QuantityKind::Nutrient)
    );
    assert_eq!(classify_profile("Phosphate"), Some(QuantityKind::Nutrient));
    assert_eq!(classify_profile("Silicate"), Some(QuantityKind::Nutrient));
    assert_eq!(classify_profile("Silicate:Flag"), Some(QuantityKind::Flag));
}

#[test]
fn test_velocity_components() {
    assert_eq!(classify_current("Speed:East"), Some(QuantityKind::SpeedEast));
    assert_eq!(classify_current("EW_comp"), Some(QuantityKind::SpeedEast));
    assert_eq!(classify_current("Speed:North"), Some(QuantityKind::SpeedNorth));
    assert_eq!(classify_current("NS_comp"), Some(QuantityKind::SpeedNorth));
    assert_eq!(classify_current("Speed:Up"), Some(QuantityKind::SpeedUp));
}

#[test]
fn test_sound_speed_precedence() {
    assert_eq!(
        classify_current("Speed:Sound:1"),
        Some(QuantityKind::SoundSpeed1)
    );
    assert_eq!(
        classify_current("Speed:Sound:2"),
        Some(QuantityKind::SoundSpeed2)
    );
    assert_eq!(classify_current("Speed:Sound"), Some(QuantityKind::SoundSpeed));
}

#[test]
fn test_generic_speed_after_qualified_variants() {
    assert_eq!(classify_current("Speed"), Some(QuantityKind::Speed));
    assert_eq!(
        classify_current("Direction:Geog(to)"),
        Some(QuantityKind::DirectionTo)
    );
    assert_eq!(
        classify_current("Direction:Current"),
        Some(QuantityKind::DirectionTo)
    );
}

#[test]
fn test_attitude_channels() {
    assert_eq!(classify_current("Heading"), Some(QuantityKind::Heading));
    assert_eq!(classify_current("Pitch"), Some(QuantityKind::Pitch));
    assert_eq!(classify_current("Roll"), Some(QuantityKind::Roll));
}

#[test]
fn test_amplitude_beams() {
    assert_eq!(
        classify_current("Amplitude:Beam1"),
        Some(QuantityKind::AmplitudeBeam1)
    );
    assert_eq!(
        classify_current("Amplitude:Beam2"),
        Some(QuantityKind::AmplitudeBeam2)
    );
    assert_eq!(
        classify_current("Amplitude:Beam3"),
        Some(QuantityKind::AmplitudeBeam3)
    );
}

#[test]
fn test_density_family() {
    assert_eq!(classify_profile("Density"), Some(QuantityKind::Density));
    assert_eq!(classify_profile("Sigma-t"), Some(QuantityKind::SigmaT));
}

#[test]
fn test_trace_constituents() {
    assert_eq!(
        classify_profile("Chlorofluorocarbon_11"),
        Some(QuantityKind::Chlorofluorocarbon)
    );
    assert_eq!(
        classify_profile("Carbon:Isotope:13"),
        Some(QuantityKind::Isotope)
    );
    assert_eq!(classify_profile("Transmissivity"), Some(QuantityKind::Other));
    assert_eq!(
        classify_profile("Alkalinity:Total"),
        Some(QuantityKind::Other)
    );
    assert_eq!(
        classify_profile("Carbon:Dissolved:Organic"),
        Some(QuantityKind::Other)
    );
    assert_eq!(
        classify_profile("Phytoplankton:Volume"),
        Some(QuantityKind::Other)
    );
}

#[test]
fn test_pigments() {
    assert_eq!(classify_profile("Hex-Fuco"), Some(QuantityKind::Pigment));
    assert_eq!(classify_profile("Chl-c3"), Some(QuantityKind::Pigment));
    assert_eq!(classify_profile("Zea"), Some(QuantityKind::Pigment));
}

#[test]
fn test_other_roster() {
    assert_eq!(
        classify_profile("Chlorophyll:Extracted"),
        Some(QuantityKind::Other)
    );
    assert_eq!(
        classify_profile("Fluorescence:URU"),
        Some(QuantityKind::Other)
    );
    assert_eq!(classify_profile("PAR"), Some(QuantityKind::Other));
    assert_eq!(classify_profile("pH"), Some(QuantityKind::Other));
    assert_eq!(classify_profile("pH:SBE:Nominal"), Some(QuantityKind::Other));
    assert_eq!(
        classify_profile("Turbidity:Seapoint"),
        Some(QuantityKind::Other)
    );
    assert_eq!(classify_profile("Ethane"), Some(QuantityKind::Other));
}

#[test]
fn test_flag_channels() {
    assert_eq!(classify_profile("Flag:Temperature"), Some(QuantityKind::Flag));
    assert_eq!(classify_profile("Quality_Flag:Oxyg"), Some(QuantityKind::Flag));
}

#[test]
fn test_unmapped_channels() {
    assert_eq!(classify_profile("Record_Number"), None);
    assert_eq!(classify_profile("Sample_Number"), None);
    assert_eq!(classify_profile("Weird:Channel"), None);
}

#[test]
fn test_case_insensitive_matching() {
    assert_eq!(classify_profile("TEMPERATURE"), Some(QuantityKind::Temperature));
    assert_eq!(classify_profile("pressure"), Some(QuantityKind::Pressure));
    assert_eq!(classify_current("SPEED:EAST"), Some(QuantityKind::SpeedEast));
}
