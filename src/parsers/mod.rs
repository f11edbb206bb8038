pub mod romraider;
pub mod types;

pub use romraider::RomRaider;
pub use types::{Channel, Log, LogError, Parseable, Value};
