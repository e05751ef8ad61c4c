//! Background weather collaborator.
//!
//! Fetches current conditions from OpenWeather on a dedicated thread and
//! hands results back to the UI loop over a channel; no shared state is
//! touched off the UI thread. Disabled entirely when no API key is
//! configured. Fetch failures are logged and retried on the next refresh,
//! never surfaced as errors.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

use crate::config::WeatherSettings;

const API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Latest known conditions, as shown on the weather line.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub temp: f32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: String,
    main: ApiMain,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f32,
}

/// Spawn the refresh thread. Returns `None` when weather is disabled.
pub fn spawn_weather(settings: WeatherSettings) -> Option<Receiver<WeatherReport>> {
    if settings.api_key.is_empty() {
        info!("weather disabled: no API key configured");
        return None;
    }

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                debug!("weather client unavailable: {e}");
                return;
            }
        };

        let refresh = Duration::from_secs(settings.refresh_secs);
        loop {
            match fetch(&client, &settings) {
                Ok(report) => {
                    // Receiver gone means the UI loop ended; wind down.
                    if tx.send(report).is_err() {
                        break;
                    }
                }
                Err(e) => debug!("weather fetch failed: {e}"),
            }
            thread::sleep(refresh);
        }
    });
    Some(rx)
}

fn fetch(
    client: &reqwest::blocking::Client,
    settings: &WeatherSettings,
) -> Result<WeatherReport, reqwest::Error> {
    let resp: ApiResponse = client
        .get(API_URL)
        .query(&[
            ("q", settings.city.as_str()),
            ("appid", settings.api_key.as_str()),
            ("units", settings.units.as_str()),
            ("lang", settings.lang.as_str()),
        ])
        .send()?
        .error_for_status()?
        .json()?;

    Ok(WeatherReport {
        city: resp.name,
        temp: resp.main.temp,
    })
}
