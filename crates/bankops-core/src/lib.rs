pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::ConsoleConfig;
pub use error::{ConfigError, RegistryError};
pub use registry::EndpointRegistry;
pub use types::*;
