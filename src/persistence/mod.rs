//! Best-score persistence
//!
//! The simulation only needs a single non-negative integer: loaded once when a
//! session starts and saved whenever the best score improves.
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `JsonFileStore`: native, JSON integer in a file
//! - `LocalStorageStore`: wasm32, integer string in LocalStorage

use crate::error::StoreError;

/// Where the best score lives between sessions
pub trait BestScoreStore {
    fn load(&mut self) -> Result<u32, StoreError>;
    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

/// Keeps the best score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::BestScoreStore;
    use crate::error::StoreError;

    /// Best score as a JSON number in a file. A missing file reads as 0.
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BestScoreStore for JsonFileStore {
        fn load(&mut self) -> Result<u32, StoreError> {
            let json = match fs::read_to_string(&self.path) {
                Ok(json) => json,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    log::info!("No best score at {}, starting fresh", self.path.display());
                    return Ok(0);
                }
                Err(e) => return Err(e.into()),
            };
            let best = serde_json::from_str(json.trim())?;
            log::info!("Loaded best score {best} from {}", self.path.display());
            Ok(best)
        }

        fn save(&mut self, best: u32) -> Result<(), StoreError> {
            // Write to a sibling temp file first so a crash never leaves a torn file
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, serde_json::to_string(&best)?)?;
            fs::rename(&tmp, &self.path)?;
            log::info!("Best score {best} saved to {}", self.path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::BestScoreStore;
    use crate::error::StoreError;

    /// LocalStorage key for the best score
    pub const STORAGE_KEY: &str = "flappyHighScore";

    /// Best score as an integer string in the browser's LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StoreError::Unavailable("LocalStorage".to_string()))
        }
    }

    impl BestScoreStore for LocalStorageStore {
        fn load(&mut self) -> Result<u32, StoreError> {
            let storage = Self::storage()?;
            match storage.get_item(STORAGE_KEY) {
                Ok(Some(value)) => Ok(serde_json::from_str(value.trim())?),
                Ok(None) => Ok(0),
                Err(_) => Err(StoreError::Unavailable("LocalStorage read".to_string())),
            }
        }

        fn save(&mut self, best: u32) -> Result<(), StoreError> {
            Self::storage()?
                .set_item(STORAGE_KEY, &best.to_string())
                .map_err(|_| StoreError::Unavailable("LocalStorage write".to_string()))
        }
    }
}
