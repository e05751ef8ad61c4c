use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `DASHPAD__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DASHPAD")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.marquee.speed <= 0.0 {
            return Err("marquee.speed must be > 0".to_string());
        }
        if self.marquee.blank_ms == 0 {
            return Err("marquee.blank_ms must be >= 1".to_string());
        }
        if self.player.poll_interval_ms < 100 {
            return Err("player.poll_interval_ms must be >= 100".to_string());
        }
        if self.launcher.debounce_ms == 0 {
            return Err("launcher.debounce_ms must be >= 1".to_string());
        }
        // The OpenWeather free tier rate-limits; keep refreshes coarse.
        if self.weather.refresh_secs < 60 {
            return Err("weather.refresh_secs must be >= 60".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `DASHPAD_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DASHPAD_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/dashpad/config.toml`
/// or `~/.config/dashpad/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("dashpad").join("config.toml"))
}
