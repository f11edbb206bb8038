//! Channel name normalization for RomRaider logs.
//!
//! RomRaider headers carry the full logger parameter name with its unit, e.g.
//! "Engine Speed (rpm)". The analysis works in short canonical aliases
//! ("RPM", "g/rev", "FBKC", ...). The dictionary is built once and handed to
//! whoever needs it rather than being consulted as ambient global state.

use std::collections::HashMap;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// Canonical short alias for a logged channel
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
pub enum ChannelAlias {
    Time,
    #[strum(serialize = "CL/OL")]
    ClOl,
    #[strum(serialize = "g/rev")]
    Load,
    #[strum(serialize = "RPM")]
    Rpm,
    #[strum(serialize = "FBKC")]
    Fbkc,
    #[strum(serialize = "FLKC")]
    Flkc,
    #[strum(serialize = "Est AFR")]
    EstAfr,
    Timing,
    #[strum(serialize = "AVCS")]
    Avcs,
    #[strum(serialize = "MRP")]
    Mrp,
    #[strum(serialize = "g/s")]
    MassAirflow,
    Throttle,
    #[strum(serialize = "WBO2")]
    Wideband,
    #[strum(serialize = "MAF Volts")]
    MafVolts,
    #[strum(serialize = "IAT-C")]
    IatC,
    #[strum(serialize = "IAT-F")]
    IatF,
    #[strum(serialize = "ECT-C")]
    EctC,
    #[strum(serialize = "ECT-F")]
    EctF,
    #[strum(serialize = "AAT-C")]
    AatC,
    #[strum(serialize = "AAT-F")]
    AatF,
    #[strum(serialize = "EGT-C")]
    EgtC,
    #[strum(serialize = "EGT-F")]
    EgtF,
}

impl ChannelAlias {
    /// The RomRaider logger header this alias is read from
    pub fn romraider_header(&self) -> &'static str {
        match self {
            ChannelAlias::Time => "Time (msec)",
            ChannelAlias::ClOl => "CL/OL Fueling* (status)",
            ChannelAlias::Load => "Engine Load* (g/rev)",
            ChannelAlias::Rpm => "Engine Speed (rpm)",
            ChannelAlias::Fbkc => "Feedback Knock Correction* (degrees)",
            ChannelAlias::Flkc => "Fine Learning Knock Correction* (degrees)",
            ChannelAlias::EstAfr => "Fueling Final Base* (estimated AFR)",
            ChannelAlias::Timing => "Ignition Total Timing (degrees)",
            ChannelAlias::Avcs => "Intake VVT Advance Angle Left (degrees)",
            ChannelAlias::Mrp => "Manifold Relative Pressure (psi)",
            ChannelAlias::MassAirflow => "Mass Airflow (g/s)",
            ChannelAlias::Throttle => "Throttle Opening Angle (%)",
            ChannelAlias::Wideband => "AEM UEGO Wideband [9600 baud] (AFR Gasoline)",
            ChannelAlias::MafVolts => "Mass Airflow Sensor Voltage (V)",
            ChannelAlias::IatC => "Intake Air Temperature (C)",
            ChannelAlias::IatF => "Intake Air Temperature (F)",
            ChannelAlias::EctC => "Coolant Temperature (C)",
            ChannelAlias::EctF => "Coolant Temperature (F)",
            ChannelAlias::AatC => "Ambient Air Temperature (C)",
            ChannelAlias::AatF => "Ambient Air Temperature (F)",
            ChannelAlias::EgtC => "Exhaust Gas Temperature (C)",
            ChannelAlias::EgtF => "Exhaust Gas Temperature (F)",
        }
    }
}

/// Immutable mapping from full header text to canonical alias
#[derive(Clone, Debug)]
pub struct ChannelAliases {
    by_header: HashMap<String, ChannelAlias>,
}

impl Default for ChannelAliases {
    fn default() -> Self {
        Self::romraider()
    }
}

impl ChannelAliases {
    /// The fixed RomRaider dictionary
    pub fn romraider() -> Self {
        let by_header = ChannelAlias::iter()
            .map(|alias| (alias.romraider_header().to_string(), alias))
            .collect();
        Self { by_header }
    }

    /// Look up the alias for a header, if it is one we know
    pub fn alias_for(&self, header: &str) -> Option<ChannelAlias> {
        self.by_header.get(header.trim()).copied()
    }

    /// Canonical name for a header; unmapped headers pass through unchanged
    pub fn canonical_name(&self, header: &str) -> String {
        match self.alias_for(header) {
            Some(alias) => alias.as_ref().to_string(),
            None => header.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_header.is_empty()
    }
}
