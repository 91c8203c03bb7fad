//! File system and environment adapters: config file, platform paths,
//! credential lookup.

pub mod config_service;
pub mod paths;
pub mod secret_service;

pub use crate::config_service::ConfigService;
pub use crate::paths::CodechatPaths;
pub use crate::secret_service::EnvCredential;
