use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::debug;
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Settings;
use crate::launcher::{LaunchCoordinator, ProcessHost};
use crate::marquee::MarqueeEngine;
use crate::player::{self, ChangeGate, DisplayKey, MetadataSource, TransportCommand};
use crate::ui;
use crate::weather::WeatherReport;

/// Input poll timeout while the marquee is animating (~60 Hz).
const ACTIVE_FRAME: Duration = Duration::from_millis(16);
/// Input poll timeout while nothing animates; keeps the clock and metadata
/// polling responsive without burning wakeups.
const IDLE_FRAME: Duration = Duration::from_millis(120);

/// State carried by the event loop across iterations.
pub struct EventLoopState {
    pub gate: ChangeGate,
    pub marquee: MarqueeEngine,
    pub coordinator: LaunchCoordinator,
    pub weather_rx: Option<Receiver<WeatherReport>>,
    /// Latest weather result, once one arrived.
    pub weather: Option<WeatherReport>,
    /// Currently displayed key; mutated only when the gate reports a change.
    pub display: DisplayKey,
    /// Cached player name; re-resolved when empty or gone, and by the
    /// transport keys on every press.
    pub player: Option<String>,
    /// Set when a poll changed the display. The restart runs one iteration
    /// later, after the new text's measurement has settled in the engine.
    pub pending_restart: bool,
    last_poll: Option<Instant>,
    last_frame: Instant,
}

impl EventLoopState {
    pub fn new(
        gate: ChangeGate,
        marquee: MarqueeEngine,
        coordinator: LaunchCoordinator,
        weather_rx: Option<Receiver<WeatherReport>>,
    ) -> Self {
        Self {
            gate,
            marquee,
            coordinator,
            weather_rx,
            weather: None,
            display: DisplayKey {
                allow_marquee: false,
                text: String::new(),
            },
            player: None,
            pending_restart: false,
            last_poll: None,
            last_frame: Instant::now(),
        }
    }

    /// Apply a restart deferred by a poll, once the viewport has real width
    /// to measure against. Zero-width geometry keeps it deferred.
    pub(crate) fn apply_pending_restart(&mut self, viewport_width: u16) {
        if self.pending_restart && viewport_width > 0 {
            self.marquee.restart(true);
            self.pending_restart = false;
        }
    }
}

/// Main dashboard loop: one cooperative thread drives geometry sync, the
/// marquee animation, drawing, the ~1 Hz metadata poll and input handling.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    source: &dyn MetadataSource,
    host: &dyn ProcessHost,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_interval = Duration::from_millis(settings.player.poll_interval_ms);

    loop {
        let now = Instant::now();
        let dt = now.duration_since(state.last_frame).as_secs_f32();
        state.last_frame = now;

        // Geometry sync: measurement must land in the engine before any
        // restart decision reads it.
        let size = terminal.size()?;
        let layout = ui::layout(Rect::new(0, 0, size.width, size.height));
        state.marquee.set_viewport(ui::viewport_of(layout.marquee));
        state
            .marquee
            .set_content_width(ui::measure_cells(&state.display.text));

        // Apply a restart deferred from a previous poll.
        state.apply_pending_restart(layout.marquee.width);

        if state.marquee.is_active() {
            state.marquee.tick(dt);
        }

        // Latest weather, if the collaborator is running.
        if let Some(rx) = &state.weather_rx {
            while let Ok(report) = rx.try_recv() {
                state.weather = Some(report);
            }
        }

        let view = ui::FrameView {
            ui: &settings.ui,
            now_text: &state.display.text,
            offset_x: state.marquee.offset_x(),
            weather: state.weather.as_ref(),
        };
        terminal.draw(|f| ui::draw(f, &view))?;

        // Metadata poll at the configured cadence.
        let due = state
            .last_poll
            .is_none_or(|t| now.duration_since(t) >= poll_interval);
        if due {
            state.last_poll = Some(now);
            poll_metadata(settings, source, state);
        }

        let timeout = if state.marquee.is_active() {
            ACTIVE_FRAME
        } else {
            IDLE_FRAME
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(key.code, settings, source, host, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// One metadata poll tick: resolve the player, observe it, run the change
/// gate and schedule the marquee accordingly. An unchanged key performs no
/// mutation at all.
pub(crate) fn poll_metadata(
    settings: &Settings,
    source: &dyn MetadataSource,
    state: &mut EventLoopState,
) {
    let players = source.list_players();
    let cached_alive = state
        .player
        .as_ref()
        .is_some_and(|p| players.iter().any(|q| q == p));
    if !cached_alive {
        state.player = player::pick_player_from(&players, &settings.player.preferred_prefix);
    }

    let (key, changed) = match &state.player {
        None => state.gate.evaluate_missing_player(),
        Some(name) => {
            let obs = player::observe(source, name);
            state.gate.evaluate(&obs)
        }
    };
    if !changed {
        return;
    }

    debug!("display change: {:?}", key.text);
    state.display = key;
    if state.display.allow_marquee {
        // Restart on the next iteration so the new text has been measured
        // before the engine reads it.
        state.pending_restart = true;
    } else {
        state.pending_restart = false;
        state.marquee.stop();
    }
}

/// Handle one key press. Returns `true` when shutdown is requested.
fn handle_key(
    code: KeyCode,
    settings: &Settings,
    source: &dyn MetadataSource,
    host: &dyn ProcessHost,
    state: &mut EventLoopState,
) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('m') | KeyCode::Enter => {
            let outcome = state.coordinator.launch_or_focus(host);
            debug!("launch request -> {outcome:?}");
        }
        KeyCode::Char('h') => transport(settings, source, state, TransportCommand::Previous),
        KeyCode::Char('l') => transport(settings, source, state, TransportCommand::Next),
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            transport(settings, source, state, TransportCommand::PlayPause)
        }
        _ => {}
    }
    false
}

/// Transport keys re-resolve the player on every press so they work even
/// before a poll has attached one.
fn transport(
    settings: &Settings,
    source: &dyn MetadataSource,
    state: &mut EventLoopState,
    cmd: TransportCommand,
) {
    state.player = player::pick_player(source, &settings.player.preferred_prefix);
    if let Some(name) = &state.player {
        source.transport(name, cmd);
    }
}
