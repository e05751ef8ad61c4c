use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use log::debug;
use thiserror::Error;

/// Failure issuing an external process command.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capabilities the launch coordinator needs from the operating system.
///
/// Injectable so the coordinator's decision logic can be exercised against
/// a scripted fake.
pub trait ProcessHost {
    /// Pids of processes whose command line matches `pattern`.
    fn find_processes(&self, pattern: &str) -> Vec<u32>;
    /// Bring the window owned by `pid` to the foreground.
    fn focus_window(&self, pid: u32) -> bool;
    /// Bring any window of the application class to the foreground.
    fn focus_window_class(&self, class: &str) -> bool;
    /// First candidate command that exists on this system.
    fn resolve_command(&self, candidates: &[String]) -> Option<String>;
    /// Start `program` detached from our lifecycle, ensuring `profile_dir`
    /// exists first. Fire-and-forget.
    fn spawn_detached(
        &self,
        program: &str,
        args: &[String],
        profile_dir: &Path,
    ) -> Result<(), HostError>;
    /// Wait for a freshly spawned instance to create its window.
    fn settle(&self, delay: Duration);
}

/// Production host shelling out to `pgrep`, `xdotool` and `wmctrl`.
pub struct ShellProcessHost;

impl ShellProcessHost {
    fn silent_status(program: &str, args: &[&str]) -> bool {
        Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl ProcessHost for ShellProcessHost {
    fn find_processes(&self, pattern: &str) -> Vec<u32> {
        match Command::new("pgrep").args(["-f", pattern]).output() {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
                .lines()
                .filter_map(|l| l.trim().parse::<u32>().ok())
                .collect(),
            // pgrep exits 1 when nothing matches.
            Ok(_) => Vec::new(),
            Err(e) => {
                debug!("pgrep failed to run: {e}");
                Vec::new()
            }
        }
    }

    fn focus_window(&self, pid: u32) -> bool {
        let pid = pid.to_string();
        Self::silent_status(
            "xdotool",
            &[
                "search",
                "--all",
                "--pid",
                &pid,
                "windowactivate",
                "--sync",
                "%@",
            ],
        )
    }

    fn focus_window_class(&self, class: &str) -> bool {
        Self::silent_status("wmctrl", &["-xa", class])
    }

    fn resolve_command(&self, candidates: &[String]) -> Option<String> {
        let path = std::env::var_os("PATH")?;
        for candidate in candidates {
            for dir in std::env::split_paths(&path) {
                if dir.join(candidate).is_file() {
                    return Some(candidate.clone());
                }
            }
        }
        None
    }

    fn spawn_detached(
        &self,
        program: &str,
        args: &[String],
        profile_dir: &Path,
    ) -> Result<(), HostError> {
        if let Err(e) = std::fs::create_dir_all(profile_dir) {
            debug!(
                "could not create profile dir {}: {e}",
                profile_dir.display()
            );
        }

        let mut cmd = Command::new(program);
        cmd.args(args).stdout(Stdio::null()).stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // New process group: the browser must outlive the dashboard.
            cmd.process_group(0);
        }
        cmd.spawn().map(drop).map_err(|source| HostError::Spawn {
            program: program.to_string(),
            source,
        })
    }

    fn settle(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
