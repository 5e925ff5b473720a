//! projpack-core: Core types, configuration, settings, output formats, and logging for projpack.

pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod paths;
pub mod settings;

pub use config::Config;
pub use error::{Error, Result};
pub use output::{FileContent, OutputFormat};
pub use settings::UserScanSettings;
