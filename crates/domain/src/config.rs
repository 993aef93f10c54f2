pub mod codec;
pub mod errors;
pub mod hosts;
pub mod logging;
pub mod root;

pub use codec::CodecConfig;
pub use errors::ConfigError;
pub use hosts::HostsConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
