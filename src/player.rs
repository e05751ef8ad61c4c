//! Media player metadata polling and display-change detection.
//!
//! `MetadataSource` abstracts the external media-control utility
//! (`playerctl` in production) so the polling logic can run against a
//! scripted fake. `ChangeGate` turns raw observations into `DisplayKey`
//! values and suppresses updates that would not change what is shown.

mod gate;
mod source;

pub use gate::{ChangeGate, DisplayKey};
pub use source::{
    MetadataSource, PlayerctlSource, TransportCommand, observe, pick_player, pick_player_from,
};

/// Playback status as reported by the control utility.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// Anything else the utility reports, including "no data".
    Stopped,
}

impl PlaybackStatus {
    /// Parse the raw status string; unrecognized input reads as `Stopped`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

/// One per-poll-tick snapshot of the active player. Carries no identity
/// beyond its tick and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackObservation {
    pub title: String,
    pub artist: String,
    pub status: PlaybackStatus,
}
