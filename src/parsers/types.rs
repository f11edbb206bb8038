use thiserror::Error;

/// Errors raised while reading a log file
#[derive(Debug, Error)]
pub enum LogError {
    /// Failed to read the log file from disk
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer rejected the file
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file has a header but no data rows, or no header at all
    #[error("Log file contains no data")]
    Empty,

    /// A channel every analysis depends on is not in the header
    #[error("Log is missing required channel: {0}")]
    MissingChannel(String),
}

/// A single logged channel as it appears in the header row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Channel {
    /// Full header text, e.g. "Engine Speed (rpm)"
    pub name: String,
    /// Unit pulled from the trailing parentheses, empty if none
    pub unit: String,
}

impl Channel {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Optimized value storage - all ECU log data is stored as f64.
/// Cells that could not be parsed hold NaN so they never satisfy a comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct Value(f64);

impl Value {
    #[inline]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// A cell that was empty or not numeric
    #[inline]
    pub fn missing() -> Self {
        Self(f64::NAN)
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// Parsed log file structure
#[derive(Clone, Debug, Default)]
pub struct Log {
    pub channels: Vec<Channel>,
    /// Time values stored directly as f64 (seconds)
    pub times: Vec<f64>,
    /// One row per timestamp, one value per channel
    pub data: Vec<Vec<Value>>,
}

impl Log {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Trait for log file parsers
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<Log, LogError>;
}
