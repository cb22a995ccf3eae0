//! Eight Ball entry point
//!
//! Headless computer-vs-computer match. Optional first argument is a
//! settings JSON file; the final snapshot is printed as JSON.

use std::path::Path;

use eight_ball::sim::GamePhase;
use eight_ball::{GameController, Settings};

/// Give up after this many frames (one hour of play at 60 fps)
const MAX_FRAMES: u64 = 60 * 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Eight Ball (headless) starting...");

    let mut settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(Path::new(&path)),
        None => Settings::default(),
    };
    settings.player_is_ai = true;
    settings.opponent_is_ai = true;

    let mut game = GameController::new(settings);
    while game.phase() != GamePhase::GameOver && game.frame_count() < MAX_FRAMES {
        game.frame();
    }
    game.end_session();

    let snapshot = game.snapshot();
    match snapshot.winner {
        Some(winner) => log::info!("{} wins after {} frames", winner.as_str(), snapshot.frame),
        None => log::warn!("No winner after {} frames", snapshot.frame),
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            std::process::exit(1);
        }
    }
}
