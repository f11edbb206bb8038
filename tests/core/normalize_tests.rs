//! Tests for the RomRaider channel alias dictionary

use strum::IntoEnumIterator;
use wotlog::normalize::{ChannelAlias, ChannelAliases};

// ============================================
// Dictionary Lookup Tests
// ============================================

#[test]
fn test_required_channels_resolve() {
    let aliases = ChannelAliases::default();
    assert_eq!(
        aliases.alias_for("Engine Speed (rpm)"),
        Some(ChannelAlias::Rpm)
    );
    assert_eq!(
        aliases.alias_for("Engine Load* (g/rev)"),
        Some(ChannelAlias::Load)
    );
    assert_eq!(
        aliases.alias_for("Throttle Opening Angle (%)"),
        Some(ChannelAlias::Throttle)
    );
}

#[test]
fn test_lookup_ignores_surrounding_whitespace() {
    let aliases = ChannelAliases::default();
    assert_eq!(
        aliases.alias_for("  Manifold Relative Pressure (psi) "),
        Some(ChannelAlias::Mrp)
    );
}

#[test]
fn test_lookup_is_exact() {
    let aliases = ChannelAliases::default();
    assert_eq!(aliases.alias_for("engine speed (rpm)"), None);
    assert_eq!(aliases.alias_for("Engine Speed"), None);
}

#[test]
fn test_knock_and_temperature_aliases() {
    let aliases = ChannelAliases::default();
    let cases = [
        ("Feedback Knock Correction* (degrees)", "FBKC"),
        ("Fine Learning Knock Correction* (degrees)", "FLKC"),
        ("Intake Air Temperature (C)", "IAT-C"),
        ("Intake Air Temperature (F)", "IAT-F"),
        ("Coolant Temperature (C)", "ECT-C"),
        ("Exhaust Gas Temperature (F)", "EGT-F"),
        ("Fueling Final Base* (estimated AFR)", "Est AFR"),
        ("Intake VVT Advance Angle Left (degrees)", "AVCS"),
    ];
    for (header, alias) in cases {
        assert_eq!(aliases.canonical_name(header), alias, "header: {}", header);
    }
}

#[test]
fn test_unmapped_header_passes_through() {
    let aliases = ChannelAliases::default();
    assert_eq!(aliases.canonical_name("Boost Error (psi)"), "Boost Error (psi)");
}

// ============================================
// Dictionary Coverage Tests
// ============================================

#[test]
fn test_headers_round_trip_through_dictionary() {
    let aliases = ChannelAliases::default();
    for alias in ChannelAlias::iter() {
        assert_eq!(aliases.alias_for(alias.romraider_header()), Some(alias));
    }
}
