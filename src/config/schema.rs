use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/dashpad/config.toml` or `~/.config/dashpad/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DASHPAD__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub marquee: MarqueeSettings,
    pub launcher: LauncherSettings,
    pub weather: WeatherSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            marquee: MarqueeSettings::default(),
            launcher: LauncherSettings::default(),
            weather: WeatherSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// How often to poll the media player for metadata (milliseconds).
    pub poll_interval_ms: u64,
    /// Prefer players whose name starts with this prefix; otherwise the
    /// first one listed wins.
    pub preferred_prefix: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            preferred_prefix: "chromium".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarqueeSettings {
    /// Scroll speed in viewport cells per second.
    pub speed: f32,
    /// Blank interval after the text fully exits, before it re-enters from
    /// the right edge (milliseconds).
    pub blank_ms: u64,
}

impl Default for MarqueeSettings {
    fn default() -> Self {
        Self {
            speed: 40.0,
            blank_ms: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Browser commands probed in order; the first one found on `PATH` wins.
    pub commands: Vec<String>,
    /// Profile directory isolating the player session. A leading `~/`
    /// expands to the home directory. Also the discriminator for "is this
    /// already running".
    pub profile_dir: String,
    /// URL opened in app mode on first launch and in new tabs as fallback.
    pub url: String,
    /// Window class names tried in order by the class-focus fallback.
    pub window_classes: Vec<String>,
    /// Minimum interval between accepted launch requests (milliseconds).
    pub debounce_ms: u64,
    /// Delay between spawning a fresh instance and the first focus attempt
    /// (milliseconds).
    pub settle_ms: u64,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            commands: vec![
                "chromium".to_string(),
                "chromium-browser".to_string(),
                "google-chrome".to_string(),
                "google-chrome-stable".to_string(),
            ],
            profile_dir: "~/.config/chromium_ytm_profile".to_string(),
            url: "https://music.youtube.com/".to_string(),
            window_classes: vec![
                "chromium".to_string(),
                "Chromium".to_string(),
                "chromium-browser".to_string(),
            ],
            debounce_ms: 700,
            settle_ms: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// OpenWeather API key; leave empty to disable the weather line.
    pub api_key: String,
    /// City query, e.g. "Tokyo,jp".
    pub city: String,
    /// Unit system: "metric", "imperial" or "standard".
    pub units: String,
    /// Response language code.
    pub lang: String,
    /// Refresh interval between fetches (seconds).
    pub refresh_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            city: "Tokyo,jp".to_string(),
            units: "metric".to_string(),
            lang: "en".to_string(),
            refresh_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// strftime-style format for the clock line.
    pub time_format: String,
    /// strftime-style format for the date line.
    pub date_format: String,
    /// Placeholder shown when a player is attached but nothing is playing.
    pub nothing_playing_text: String,
    /// Placeholder shown when no player is detected at all.
    pub no_player_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
            date_format: "%Y/%m/%d (%a)".to_string(),
            nothing_playing_text: "♪ nothing playing".to_string(),
            no_player_text: "♪ no player detected (start playback to attach)".to_string(),
        }
    }
}
