//! Terminal presentation shell: reads commands, runs the state machine, prints the view.
mod app;
mod config;
mod effects;
mod input;
mod render;

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use cloudrag_core::Msg;
use engine_logging::{engine_info, engine_warn};

pub(crate) use app::Shell;

/// Everything the shell loop reacts to.
pub(crate) enum ShellEvent {
    Line(String),
    InputClosed,
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let path = config::config_path(std::env::var(config::CONFIG_PATH_ENV).ok());
    let (config, config_error) = match config::load_from(&path) {
        Ok(config) => (config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    let config = config.with_api_base_override(std::env::var(config::API_BASE_ENV).ok());

    engine_logging::initialize(
        config.log_destination.into(),
        engine_logging::parse_level(&config.log_level),
        &config.log_file,
    );
    if let Some(err) = config_error {
        engine_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }
    engine_info!("Starting CloudRAG shell against {}", config.api_base);

    let (tx, rx) = mpsc::channel::<ShellEvent>();
    let runner = effects::EffectRunner::new(&config, tx.clone())?;
    spawn_stdin_reader(tx);

    let stdout = io::stdout();
    let mut shell = Shell::new(runner, stdout.lock());
    shell.run(rx)
}

fn spawn_stdin_reader(tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(ShellEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(ShellEvent::InputClosed);
    });
}
