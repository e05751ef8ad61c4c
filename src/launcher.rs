//! Launch-or-focus coordination for the external media player window.
//!
//! Guarantees at most one browser instance per profile directory: a launch
//! request first looks for a live process bound to the profile, focuses it
//! when possible, and only spawns a fresh app-mode instance when none
//! exists. Rapid repeated requests are debounced. Every external command
//! failure degrades to the next fallback tier; nothing here is fatal.

mod host;

pub use host::{HostError, ProcessHost, ShellProcessHost};

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::config::LauncherSettings;

/// What a launch request ended up doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Suppressed: too soon after the previous accepted request.
    Debounced,
    /// Focused the window owned by a matching pid.
    Focused,
    /// Focused via the window-class fallback.
    FocusedClass,
    /// Both focus tiers failed; opened the URL as a new tab in the
    /// existing session.
    OpenedTab,
    /// No matching process; spawned a fresh app-mode instance.
    Spawned,
    /// The spawn itself could not be issued.
    SpawnFailed,
}

/// Decides between launching, focusing and session-reuse on each "open
/// player" action.
pub struct LaunchCoordinator {
    settings: LauncherSettings,
    profile_dir: PathBuf,
    last_press: Option<Instant>,
}

impl LaunchCoordinator {
    pub fn new(settings: LauncherSettings) -> Self {
        let profile_dir = expand_home(&settings.profile_dir);
        Self {
            settings,
            profile_dir,
            last_press: None,
        }
    }

    /// Handle an "open player" user action.
    pub fn launch_or_focus(&mut self, host: &dyn ProcessHost) -> LaunchOutcome {
        self.launch_or_focus_at(host, Instant::now())
    }

    /// Entry point with an injectable clock, used by tests to exercise the
    /// debounce window deterministically.
    pub(crate) fn launch_or_focus_at(
        &mut self,
        host: &dyn ProcessHost,
        now: Instant,
    ) -> LaunchOutcome {
        let debounce = Duration::from_millis(self.settings.debounce_ms);
        if let Some(prev) = self.last_press {
            if now.duration_since(prev) < debounce {
                info!("launch request debounced");
                return LaunchOutcome::Debounced;
            }
        }
        self.last_press = Some(now);

        // The process set is queried fresh on every request, never cached.
        let pids = host.find_processes(&self.process_pattern());
        if let Some(&pid) = pids.first() {
            info!("player already running (pid {pid}); focusing");
            if host.focus_window(pid) {
                return LaunchOutcome::Focused;
            }
            if self.focus_any_class(host) {
                return LaunchOutcome::FocusedClass;
            }
            // Last resort: reuse the existing session. Never spawn a second
            // instance on the same profile.
            let Some(command) = self.resolve_command(host) else {
                return LaunchOutcome::SpawnFailed;
            };
            warn!(
                "focus failed; opening {} in the existing session",
                self.settings.url
            );
            let args = vec![
                self.profile_arg(),
                "--new-tab".to_string(),
                self.settings.url.clone(),
            ];
            if let Err(e) = host.spawn_detached(&command, &args, &self.profile_dir) {
                warn!("new-tab fallback failed: {e}");
            }
            return LaunchOutcome::OpenedTab;
        }

        let Some(command) = self.resolve_command(host) else {
            return LaunchOutcome::SpawnFailed;
        };
        info!("launching {command} in app mode");
        let args = vec![self.profile_arg(), format!("--app={}", self.settings.url)];
        if let Err(e) = host.spawn_detached(&command, &args, &self.profile_dir) {
            warn!("launch failed: {e}");
            return LaunchOutcome::SpawnFailed;
        }

        // Give the fresh instance a moment to create its window, then bring
        // it forward. No new-tab fallback here: this is first launch.
        host.settle(Duration::from_millis(self.settings.settle_ms));
        let pids = host.find_processes(&self.process_pattern());
        if let Some(&pid) = pids.first() {
            if !host.focus_window(pid) {
                self.focus_any_class(host);
            }
        }
        LaunchOutcome::Spawned
    }

    /// `pgrep -f` pattern matching a browser process bound to our profile
    /// directory.
    fn process_pattern(&self) -> String {
        format!(
            "chrom(e|ium).*--user-data-dir={}",
            self.profile_dir.display()
        )
    }

    fn profile_arg(&self) -> String {
        format!("--user-data-dir={}", self.profile_dir.display())
    }

    /// Only the tiers that actually invoke the browser need a command; the
    /// focus tiers work without one.
    fn resolve_command(&self, host: &dyn ProcessHost) -> Option<String> {
        let command = host.resolve_command(&self.settings.commands);
        if command.is_none() {
            warn!(
                "no browser command found on PATH (tried {:?})",
                self.settings.commands
            );
        }
        command
    }

    /// Class-name focus fallback: tries each known variant in order,
    /// stopping at the first success.
    fn focus_any_class(&self, host: &dyn ProcessHost) -> bool {
        self.settings
            .window_classes
            .iter()
            .any(|class| host.focus_window_class(class))
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
