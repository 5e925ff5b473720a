//! Common filesystem paths used by projpack.

use std::path::PathBuf;

/// Base directory for projpack state (config, saved settings, profiles).
///
/// Defaults to `~/.config/projpack`, but can be overridden via
/// `PROJPACK_DIR` for testing or multi-instance setups.
pub fn projpack_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PROJPACK_DIR") {
        return PathBuf::from(dir);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config").join("projpack")
}

/// Path to the projpack configuration file.
pub fn config_path() -> PathBuf {
    projpack_dir().join("config.toml")
}

/// Default location of the last-used scan settings.
pub fn default_settings_path() -> PathBuf {
    projpack_dir().join("user-settings.json")
}

/// Default directory holding one sub-directory per project profile.
pub fn default_profiles_dir() -> PathBuf {
    projpack_dir().join("profiles")
}

#[doc(hidden)]
pub fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
