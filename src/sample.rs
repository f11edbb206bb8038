//! Typed per-sample records.
//!
//! A raw [`Log`] is a matrix keyed by header position. [`LogSchema`] resolves
//! each alias to a column index once, and [`LogSample`] carries the resolved
//! channels as named fields so the analysis never looks anything up by string.

use std::collections::HashMap;

use crate::normalize::{ChannelAlias, ChannelAliases};
use crate::parsers::types::{Log, LogError};

/// One timestamped row of the log with the channels the analysis uses.
///
/// RPM, load and throttle are always present; every other channel is `None`
/// when the log does not record it. A present channel with an empty cell is NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogSample {
    /// Seconds since the start of the log
    pub time: f64,
    pub rpm: f64,
    /// Engine load in g/rev
    pub load: f64,
    /// Throttle opening angle in percent
    pub throttle: f64,
    pub fbkc: Option<f64>,
    pub flkc: Option<f64>,
    pub mrp: Option<f64>,
    pub wideband_afr: Option<f64>,
    pub est_afr: Option<f64>,
    pub iat_c: Option<f64>,
    pub iat_f: Option<f64>,
    pub avcs: Option<f64>,
    pub timing: Option<f64>,
    pub mass_airflow: Option<f64>,
}

impl LogSample {
    /// Build a sample with only the channels every log must have
    pub fn new(rpm: f64, load: f64, throttle: f64) -> Self {
        Self {
            rpm,
            load,
            throttle,
            ..Default::default()
        }
    }

    /// True if either knock correction channel reads negative
    pub fn is_knocking(&self) -> bool {
        self.fbkc.is_some_and(|v| v < 0.0) || self.flkc.is_some_and(|v| v < 0.0)
    }
}

/// Column positions of each alias found in a log header
#[derive(Clone, Debug, Default)]
pub struct LogSchema {
    columns: HashMap<ChannelAlias, usize>,
}

impl LogSchema {
    /// Aliases the analysis cannot run without
    pub const REQUIRED: [ChannelAlias; 3] =
        [ChannelAlias::Rpm, ChannelAlias::Load, ChannelAlias::Throttle];

    /// Resolve the header row once against the alias dictionary
    pub fn bind(log: &Log, aliases: &ChannelAliases) -> Result<Self, LogError> {
        let mut columns = HashMap::new();
        for (index, channel) in log.channels.iter().enumerate() {
            tracing::trace!(
                "Column {}: {} [{}]",
                index,
                aliases.canonical_name(channel.name()),
                channel.unit()
            );
            if let Some(alias) = aliases.alias_for(channel.name()) {
                // First occurrence wins if a header is duplicated
                columns.entry(alias).or_insert(index);
            }
        }
        tracing::debug!(
            "Bound {} of {} known channels",
            columns.len(),
            aliases.len()
        );

        for alias in Self::REQUIRED {
            if !columns.contains_key(&alias) {
                return Err(LogError::MissingChannel(
                    alias.romraider_header().to_string(),
                ));
            }
        }

        Ok(Self { columns })
    }

    pub fn column(&self, alias: ChannelAlias) -> Option<usize> {
        self.columns.get(&alias).copied()
    }

    /// Convert every row of the log into a typed sample
    pub fn samples(&self, log: &Log) -> Vec<LogSample> {
        log.data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let get = |alias: ChannelAlias| -> Option<f64> {
                    self.column(alias)
                        .map(|c| row.get(c).map(|v| v.as_f64()).unwrap_or(f64::NAN))
                };
                LogSample {
                    time: log.times.get(i).copied().unwrap_or(f64::NAN),
                    rpm: get(ChannelAlias::Rpm).unwrap_or(f64::NAN),
                    load: get(ChannelAlias::Load).unwrap_or(f64::NAN),
                    throttle: get(ChannelAlias::Throttle).unwrap_or(f64::NAN),
                    fbkc: get(ChannelAlias::Fbkc),
                    flkc: get(ChannelAlias::Flkc),
                    mrp: get(ChannelAlias::Mrp),
                    wideband_afr: get(ChannelAlias::Wideband),
                    est_afr: get(ChannelAlias::EstAfr),
                    iat_c: get(ChannelAlias::IatC),
                    iat_f: get(ChannelAlias::IatF),
                    avcs: get(ChannelAlias::Avcs),
                    timing: get(ChannelAlias::Timing),
                    mass_airflow: get(ChannelAlias::MassAirflow),
                }
            })
            .collect()
    }
}
