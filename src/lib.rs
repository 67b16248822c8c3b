pub mod config;
pub mod error;
pub mod matching;
pub mod reference;
pub mod telemetry;
