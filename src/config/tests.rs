use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_dashpad_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("DASHPAD_CONFIG_PATH", "/tmp/dashpad-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/dashpad-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("dashpad")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("dashpad")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
poll_interval_ms = 2000
preferred_prefix = "firefox"

[marquee]
speed = 25.5
blank_ms = 900

[launcher]
commands = ["chromium"]
profile_dir = "/srv/kiosk/profile"
url = "https://example.org/"
window_classes = ["Chromium"]
debounce_ms = 1200
settle_ms = 300

[weather]
api_key = "abc123"
city = "Osaka,jp"
units = "imperial"
lang = "ja"
refresh_secs = 120

[ui]
time_format = "%H:%M:%S"
date_format = "%d.%m.%Y"
nothing_playing_text = "(idle)"
no_player_text = "(no player)"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DASHPAD_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("DASHPAD__MARQUEE__SPEED");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.poll_interval_ms, 2000);
    assert_eq!(s.player.preferred_prefix, "firefox");
    assert_eq!(s.marquee.speed, 25.5);
    assert_eq!(s.marquee.blank_ms, 900);
    assert_eq!(s.launcher.commands, vec!["chromium".to_string()]);
    assert_eq!(s.launcher.profile_dir, "/srv/kiosk/profile");
    assert_eq!(s.launcher.url, "https://example.org/");
    assert_eq!(s.launcher.window_classes, vec!["Chromium".to_string()]);
    assert_eq!(s.launcher.debounce_ms, 1200);
    assert_eq!(s.launcher.settle_ms, 300);
    assert_eq!(s.weather.api_key, "abc123");
    assert_eq!(s.weather.city, "Osaka,jp");
    assert_eq!(s.weather.units, "imperial");
    assert_eq!(s.weather.lang, "ja");
    assert_eq!(s.weather.refresh_secs, 120);
    assert_eq!(s.ui.time_format, "%H:%M:%S");
    assert_eq!(s.ui.date_format, "%d.%m.%Y");
    assert_eq!(s.ui.nothing_playing_text, "(idle)");
    assert_eq!(s.ui.no_player_text, "(no player)");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
poll_interval_ms = 2000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DASHPAD_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("DASHPAD__PLAYER__POLL_INTERVAL_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.poll_interval_ms, 500);
}

#[test]
fn validate_rejects_nonpositive_marquee_speed() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.marquee.speed = 0.0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_subsecond_poll_floor() {
    let mut s = Settings::default();
    s.player.poll_interval_ms = 50;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_subminute_weather_refresh() {
    let mut s = Settings::default();
    s.weather.refresh_secs = 30;
    assert!(s.validate().is_err());

    s.weather.refresh_secs = 60;
    assert!(s.validate().is_ok());
}
