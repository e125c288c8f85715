//! High score persistence
//!
//! One integer record, stored as a tiny JSON file next to the working
//! directory. Storage is best-effort: a missing or corrupt file loads as
//! zero and a failed save is dropped; neither can disturb the simulation.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default storage file
pub const STORAGE_FILE: &str = "tilt_table_highscore.json";

/// The persisted record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

/// Load the high score from the default file.
pub fn load() -> u64 {
    load_from(STORAGE_FILE)
}

/// Save the high score to the default file.
pub fn save(best: u64) {
    save_to(STORAGE_FILE, best);
}

/// Load from an explicit path; any failure yields zero.
pub fn load_from(path: impl AsRef<Path>) -> u64 {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<HighScore>(&json) {
            Ok(record) => {
                log::info!("loaded high score {}", record.best);
                record.best
            }
            Err(err) => {
                log::warn!("unreadable high score file {}: {err}", path.display());
                0
            }
        },
        Err(_) => {
            log::info!("no high score file, starting fresh");
            0
        }
    }
}

/// Save to an explicit path; failures are logged and dropped.
pub fn save_to(path: impl AsRef<Path>, best: u64) {
    let path = path.as_ref();
    let record = HighScore { best };
    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("could not encode high score: {err}");
            return;
        }
    };
    if let Err(err) = std::fs::write(path, json) {
        log::warn!("could not save high score to {}: {err}", path.display());
    } else {
        log::info!("high score saved ({best})");
    }
}
