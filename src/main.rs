use env_logger::Env;

mod config;
mod launcher;
mod marquee;
mod player;
mod runtime;
mod ui;
mod weather;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they stay out of the alternate-screen UI;
    // redirect stderr to a file when tracing a session.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    runtime::run()
}
