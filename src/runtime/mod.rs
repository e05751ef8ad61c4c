use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::launcher::{LaunchCoordinator, ShellProcessHost};
use crate::marquee::MarqueeEngine;
use crate::player::{ChangeGate, PlayerctlSource};
use crate::weather;

mod event_loop;
mod settings;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let source = PlayerctlSource;
    let host = ShellProcessHost;
    let gate = ChangeGate::new(
        settings.ui.nothing_playing_text.clone(),
        settings.ui.no_player_text.clone(),
    );
    let marquee = MarqueeEngine::new(&settings.marquee);
    let coordinator = LaunchCoordinator::new(settings.launcher.clone());
    let weather_rx = weather::spawn_weather(settings.weather.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(gate, marquee, coordinator, weather_rx);
        event_loop::run(&mut terminal, &settings, &source, &host, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
