use csv::{ReaderBuilder, Trim};
use regex::Regex;
use std::sync::LazyLock;

use super::types::{Channel, Log, LogError, Parseable, Value};

/// Matches "Name (unit)" header cells; the unit is the last parenthesised group
static UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<name>.*?)\s*\((?<unit>[^()]*)\)\s*$").expect("Failed to compile regex")
});

/// RomRaider CSV log parser
///
/// RomRaider writes a single header row of full channel names (with units in
/// parentheses) followed by one comma-separated row per sample. The first
/// column is the logger timestamp in milliseconds.
pub struct RomRaider;

impl RomRaider {
    /// Extract the unit from a header like "Engine Speed (rpm)"
    pub fn extract_unit(header: &str) -> &str {
        UNIT_REGEX
            .captures(header)
            .and_then(|caps| caps.name("unit"))
            .map(|m| m.as_str())
            .unwrap_or("")
    }

    fn parse_cell(cell: &str) -> Value {
        cell.trim()
            .parse::<f64>()
            .map(Value::new)
            .unwrap_or_else(|_| Value::missing())
    }
}

impl Parseable for RomRaider {
    fn parse(&self, file_contents: &str) -> Result<Log, LogError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file_contents.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(LogError::Empty);
        }

        // Time is not a channel; it is kept separately like every other parser
        let has_time = headers[0].to_lowercase().starts_with("time");
        let first_channel = usize::from(has_time);

        let channels: Vec<Channel> = headers[first_channel..]
            .iter()
            .map(|h| Channel::new(h.clone(), Self::extract_unit(h)))
            .collect();

        let mut times = Vec::new();
        let mut data = Vec::new();

        for (row_index, record) in reader.records().enumerate() {
            let record = record?;
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let time = if has_time {
                // RomRaider logs milliseconds
                record
                    .get(0)
                    .and_then(|t| t.parse::<f64>().ok())
                    .map(|ms| ms / 1000.0)
                    .unwrap_or(f64::NAN)
            } else {
                row_index as f64
            };

            let row: Vec<Value> = (first_channel..headers.len())
                .map(|i| record.get(i).map(Self::parse_cell).unwrap_or_else(Value::missing))
                .collect();

            times.push(time);
            data.push(row);
        }

        if data.is_empty() {
            return Err(LogError::Empty);
        }

        tracing::info!(
            "Parsed RomRaider log: {} channels, {} samples",
            channels.len(),
            data.len()
        );

        Ok(Log {
            channels,
            times,
            data,
        })
    }
}
