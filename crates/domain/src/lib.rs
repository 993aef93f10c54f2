//! Ferrous Wire Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, CodecConfig, Config, ConfigError, HostsConfig, LoggingConfig};
pub use dns_record::{RecordClass, RecordType, CLASS_IN, TYPE_A};
pub use errors::{Section, WireError};
