//! Terminal rendering for the dashboard.
//!
//! A plain consumer of the core's outputs: it lays out the screen, measures
//! the marquee text in terminal cells and clips it to the viewport rect.
//! The same `layout` is used by the event loop to feed viewport geometry to
//! the marquee engine before drawing, so the two always agree.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::config::UiSettings;
use crate::marquee::Viewport;
use crate::weather::WeatherReport;

/// Fixed vertical layout of the dashboard rows.
pub struct DashboardLayout {
    pub time: Rect,
    pub date: Rect,
    pub now_playing: Rect,
    /// Interior of the now-playing block: the marquee clipping region.
    pub marquee: Rect,
    pub weather: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // time
            Constraint::Length(1), // date
            Constraint::Length(3), // now playing (bordered)
            Constraint::Length(1), // weather
            Constraint::Min(0),    // spacer
            Constraint::Length(1), // footer
        ])
        .split(area);

    let now_playing = rows[2];
    let marquee = Block::default().borders(Borders::ALL).inner(now_playing);
    DashboardLayout {
        time: rows[0],
        date: rows[1],
        now_playing,
        marquee,
        weather: rows[3],
        footer: rows[5],
    }
}

/// Measured width of `text` in terminal cells.
pub fn measure_cells(text: &str) -> f32 {
    text.chars().count() as f32
}

/// Marquee viewport corresponding to a layout rect.
pub fn viewport_of(rect: Rect) -> Viewport {
    Viewport {
        left: rect.x as f32,
        width: rect.width as f32,
    }
}

/// Everything the renderer needs for one frame.
pub struct FrameView<'a> {
    pub ui: &'a UiSettings,
    pub now_text: &'a str,
    /// Absolute x of the marquee text's left edge, in cells.
    pub offset_x: f32,
    pub weather: Option<&'a WeatherReport>,
}

pub fn draw(f: &mut Frame, view: &FrameView) {
    let l = layout(f.area());
    let now = Local::now();

    f.render_widget(
        Paragraph::new(now.format(&view.ui.time_format).to_string())
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        l.time,
    );
    f.render_widget(
        Paragraph::new(now.format(&view.ui.date_format).to_string()).alignment(Alignment::Center),
        l.date,
    );

    f.render_widget(
        Block::default().borders(Borders::ALL).title(" Now Playing "),
        l.now_playing,
    );
    f.render_widget(
        Paragraph::new(clip_marquee(view.now_text, view.offset_x, l.marquee)),
        l.marquee,
    );

    let weather_text = match view.weather {
        Some(w) => format!("{}  {:.1} °C", w.city, w.temp),
        None => "weather: --".to_string(),
    };
    f.render_widget(
        Paragraph::new(weather_text).alignment(Alignment::Center),
        l.weather,
    );

    f.render_widget(
        Paragraph::new(controls_text()).alignment(Alignment::Center),
        l.footer,
    );
}

/// Render the slice of `text` visible inside `rect` when its left edge sits
/// at absolute column `offset_x`, padding with spaces so the paragraph
/// overwrites stale cells.
fn clip_marquee(text: &str, offset_x: f32, rect: Rect) -> String {
    let width = rect.width as usize;
    if width == 0 {
        return String::new();
    }

    // Position of the text's first char relative to the viewport's left edge.
    let rel = (offset_x - rect.x as f32).round() as i64;
    let chars: Vec<char> = text.chars().collect();

    let mut line = String::with_capacity(width);
    for cell in 0..width as i64 {
        let idx = cell - rel;
        if idx >= 0 && (idx as usize) < chars.len() {
            line.push(chars[idx as usize]);
        } else {
            line.push(' ');
        }
    }
    line
}

fn controls_text() -> String {
    [
        "[m/enter] music",
        "[h/l] prev/next",
        "[space/p] play-pause",
        "[q] quit",
    ]
    .join(" | ")
}
