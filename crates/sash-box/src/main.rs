use std::path::PathBuf;
use std::process::ExitCode;

use sash_box::{settings, Scenario};

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: sashbox <scenario.json>");
        return ExitCode::from(2);
    };

    let settings = settings::load_settings();

    let scenario = match Scenario::load(&path) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let maps = match scenario.run(settings.splitter) {
        Ok(maps) => maps,
        Err(e) => {
            log::error!("Scenario failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for map in maps {
        match serde_json::to_string(&map) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize size map: {}", e),
        }
    }
    ExitCode::SUCCESS
}
