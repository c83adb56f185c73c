//! `airwatch`: evaluate policy scenarios over newline-delimited JSON.
//!
//! Reads one command per stdin line and writes one response per stdout line.
//! Logs go to stderr. Engine parameters are read from the JSON file named by
//! `AIRWATCH_PARAMS`, if set.

mod engine_mode;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use policy_sim::engine_params::EngineParams;

/// Environment variable naming an engine params JSON file.
const PARAMS_ENV: &str = "AIRWATCH_PARAMS";

fn main() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(LogPlugin::default());
    engine_mode::install(&mut app);

    if let Some(params) = load_params() {
        app.insert_resource(params);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = engine_mode::run_session(&mut app, stdin.lock(), stdout.lock()) {
        error!("airwatch session ended with I/O error: {e}");
        std::process::exit(1);
    }
}

/// Read params from `AIRWATCH_PARAMS`. Any failure is logged and the
/// defaults are kept.
fn load_params() -> Option<EngineParams> {
    let path = std::env::var(PARAMS_ENV).ok()?;
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read engine params from {path}: {e}; using defaults");
            return None;
        }
    };
    match EngineParams::from_json_str(&text) {
        Ok(params) => {
            info!(
                "Loaded engine params from {path} ({:?} model, {} stations)",
                params.aqi_model, params.total_stations
            );
            Some(params)
        }
        Err(e) => {
            warn!("Invalid engine params in {path}: {e}; using defaults");
            None
        }
    }
}
