//! File hand-off with the external renderer
//!
//! The renderer writes `input.json` whenever it likes; we read it once per
//! tick and treat anything unreadable as "no input". The world snapshot is
//! written to a temp file and renamed over `game_state.json` so the reader
//! never sees a torn file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::sim::{TickInput, World};
use crate::snapshot::{InputSnapshot, WorldSnapshot};

const INPUT_FILE: &str = "input.json";
const STATE_FILE: &str = "game_state.json";
const STATE_TMP_FILE: &str = "game_state.json.tmp";

/// Paths inside the shared directory
#[derive(Debug, Clone)]
pub struct Handoff {
    shared_dir: PathBuf,
}

impl Handoff {
    /// Use `shared_dir`, creating it if absent
    pub fn new(shared_dir: impl Into<PathBuf>) -> Result<Self> {
        let shared_dir = shared_dir.into();
        fs::create_dir_all(&shared_dir)?;
        log::info!("Shared directory: {}", shared_dir.display());
        Ok(Self { shared_dir })
    }

    pub fn shared_dir(&self) -> &Path {
        &self.shared_dir
    }

    pub fn input_path(&self) -> PathBuf {
        self.shared_dir.join(INPUT_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.shared_dir.join(STATE_FILE)
    }

    /// Latest renderer input. Never fails.
    pub fn read_input(&self) -> TickInput {
        let path = self.input_path();
        match fs::read_to_string(&path) {
            Ok(text) => InputSnapshot::parse(&text).to_tick_input(),
            Err(err) => {
                log::debug!("No input from {}: {}", path.display(), err);
                TickInput::default()
            }
        }
    }

    /// Write the world snapshot atomically
    pub fn write_state(&self, world: &World) -> Result<()> {
        let snapshot = WorldSnapshot::capture(world);
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        let tmp = self.shared_dir.join(STATE_TMP_FILE);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.state_path())?;
        Ok(())
    }
}
