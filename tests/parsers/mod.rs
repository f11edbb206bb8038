//! Parser integration tests
//!
//! - Header and unit extraction
//! - Parsing of synthetic RomRaider logs
//! - Edge cases and error handling
//! - Binding headers to typed samples
