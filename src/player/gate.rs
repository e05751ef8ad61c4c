use super::{PlaybackStatus, TrackObservation};

/// Minimal (flag, text) tuple describing what should be on screen.
///
/// Two consecutive polls producing an identical key must not retrigger any
/// text mutation or marquee restart; this is what keeps the ticker from
/// resetting on every poll interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayKey {
    /// Whether the text may scroll when it overflows the viewport.
    pub allow_marquee: bool,
    pub text: String,
}

/// Deduplicates per-poll observations into actual display changes.
pub struct ChangeGate {
    idle_text: String,
    missing_text: String,
    last: Option<DisplayKey>,
}

impl ChangeGate {
    pub fn new(idle_text: impl Into<String>, missing_text: impl Into<String>) -> Self {
        Self {
            idle_text: idle_text.into(),
            missing_text: missing_text.into(),
            last: None,
        }
    }

    /// Map an observation to its display key and report whether it differs
    /// from the previously committed one.
    pub fn evaluate(&mut self, obs: &TrackObservation) -> (DisplayKey, bool) {
        let key = if obs.title.is_empty() {
            // Nothing playing overrides status: placeholders never scroll.
            DisplayKey {
                allow_marquee: false,
                text: self.idle_text.clone(),
            }
        } else {
            let prefix = match obs.status {
                PlaybackStatus::Playing => "▶",
                PlaybackStatus::Paused => "⏸",
                PlaybackStatus::Stopped => "♪",
            };
            DisplayKey {
                // Only actively playing tracks scroll; paused text holds still.
                allow_marquee: obs.status == PlaybackStatus::Playing,
                text: format!("{prefix}{}", obs.title),
            }
        };
        self.commit(key)
    }

    /// Display key for the no-player-detected condition. Deduplicated like
    /// any other key.
    pub fn evaluate_missing_player(&mut self) -> (DisplayKey, bool) {
        let key = DisplayKey {
            allow_marquee: false,
            text: self.missing_text.clone(),
        };
        self.commit(key)
    }

    fn commit(&mut self, key: DisplayKey) -> (DisplayKey, bool) {
        let changed = self.last.as_ref() != Some(&key);
        if changed {
            self.last = Some(key.clone());
        }
        (key, changed)
    }
}
