use std::process::Command;

use log::debug;

use super::{PlaybackStatus, TrackObservation};

/// Transport actions forwarded to the active player.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    Previous,
    PlayPause,
    Next,
}

impl TransportCommand {
    fn as_arg(self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::PlayPause => "play-pause",
            Self::Next => "next",
        }
    }
}

/// Query interface over the external media-control utility.
///
/// Failures never propagate: a failed query reads as "no data" (empty
/// string / empty list), so a broken or absent utility degrades to
/// placeholder text instead of an error.
pub trait MetadataSource {
    /// Names of the currently registered players.
    fn list_players(&self) -> Vec<String>;
    /// A single metadata field (e.g. `xesam:title`) for `player`.
    fn metadata(&self, player: &str, field: &str) -> String;
    /// Raw playback status string for `player`.
    fn status(&self, player: &str) -> String;
    /// Fire-and-forget transport action; failures are log-only.
    fn transport(&self, player: &str, cmd: TransportCommand);
}

/// Production source shelling out to `playerctl`.
pub struct PlayerctlSource;

impl PlayerctlSource {
    fn run(args: &[&str]) -> Option<String> {
        match Command::new("playerctl").args(args).output() {
            Ok(out) if out.status.success() => {
                Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
            }
            Ok(out) => {
                debug!("playerctl {args:?} exited with {}", out.status);
                None
            }
            Err(e) => {
                debug!("playerctl {args:?} failed to run: {e}");
                None
            }
        }
    }
}

impl MetadataSource for PlayerctlSource {
    fn list_players(&self) -> Vec<String> {
        Self::run(&["-l"])
            .map(|out| {
                out.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn metadata(&self, player: &str, field: &str) -> String {
        Self::run(&["-p", player, "metadata", field]).unwrap_or_default()
    }

    fn status(&self, player: &str) -> String {
        Self::run(&["-p", player, "status"]).unwrap_or_default()
    }

    fn transport(&self, player: &str, cmd: TransportCommand) {
        if Self::run(&["-p", player, cmd.as_arg()]).is_none() {
            debug!("transport {cmd:?} to {player} was not delivered");
        }
    }
}

/// Pick the player to poll from an already-fetched list: the first one whose
/// name starts with `preferred_prefix`, otherwise the first listed.
pub fn pick_player_from(players: &[String], preferred_prefix: &str) -> Option<String> {
    players
        .iter()
        .find(|p| p.starts_with(preferred_prefix))
        .or_else(|| players.first())
        .cloned()
}

/// Convenience wrapper around [`pick_player_from`] that queries the source.
pub fn pick_player(source: &dyn MetadataSource, preferred_prefix: &str) -> Option<String> {
    pick_player_from(&source.list_players(), preferred_prefix)
}

/// Snapshot title/artist/status for `player`.
pub fn observe(source: &dyn MetadataSource, player: &str) -> TrackObservation {
    let title = source.metadata(player, "xesam:title");
    // playerctl prints list-valued fields bracketed; strip that for display.
    let artist = source
        .metadata(player, "xesam:artist")
        .trim_matches(|c| c == '[' || c == ']')
        .trim()
        .to_string();
    let status = PlaybackStatus::parse(&source.status(player));
    TrackObservation {
        title,
        artist,
        status,
    }
}
