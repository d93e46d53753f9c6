//! # Library Manager Module
//!
//! ## Purpose
//! Provides centralized management of the JSON catalog file paths of the RxnDB
//! reaction database. This module eliminates hardcoded file paths throughout
//! the codebase and enables switching between catalog file versions.
//!
//! ## Architecture
//! - **LibraryConfig**: Serializable configuration structure
//! - **LibraryManager**: Core manager with file validation and persistence
//! - **Global Access**: Thread-safe singleton pattern with test isolation
//! - **Configuration File**: JSON-based persistent storage (rxndb_config.json)
//!
//! ## Configuration Format
//! ```json
//! {
//!   "hp11_catalog": "data/hp11_rxndb.json",
//!   "jimmy_catalog": "data/jimmy_rxndb.json"
//! }
//! ```
//!
//! ## Usage Patterns
//!
//! ### Read-only Access
//! ```rust
//! use RxnDB::library_manager::with_library_manager;
//!
//! let path = with_library_manager(|manager| {
//!     manager.hp11_catalog_path().to_string()
//! });
//! ```
//!
//! ### Mutable Access
//! ```rust, ignore
//! use RxnDB::library_manager::with_library_manager_mut;
//!
//! with_library_manager_mut(|manager| {
//!     manager.set_hp11_catalog("data/hp11_rxndb_v2.json")
//! })?;
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Configuration structure for JSON catalog file paths.
///
/// Maps the two literature source databases to the catalog files they are
/// loaded from. Supports serialization for persistent storage in
/// rxndb_config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub hp11_catalog: String,
    pub jimmy_catalog: String,
}

impl Default for LibraryConfig {
    /// Creates default configuration with the bundled catalog files.
    fn default() -> Self {
        Self {
            hp11_catalog: "data/hp11_rxndb.json".to_string(),
            jimmy_catalog: "data/jimmy_rxndb.json".to_string(),
        }
    }
}

/// Core catalog manager responsible for JSON file path management.
///
/// Handles loading, saving, and updating the catalog configuration. Keeps
/// both the current configuration and the path of the config file used for
/// persistence.
#[derive(Debug, Clone)]
pub struct LibraryManager {
    config: LibraryConfig,
    config_file: String,
}

impl LibraryManager {
    /// Creates a new LibraryManager with the default configuration file.
    ///
    /// Attempts to load configuration from "rxndb_config.json" in the current
    /// directory. If the file doesn't exist or is invalid, uses the default
    /// configuration.
    pub fn new() -> Self {
        let config_file = "rxndb_config.json".to_string();
        let config = Self::load_config(&config_file).unwrap_or_default();

        Self {
            config,
            config_file,
        }
    }

    /// Creates a new LibraryManager with a custom configuration file path.
    ///
    /// Primarily used for testing or when a non-standard configuration file
    /// location is required.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();

        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Loads configuration from a JSON file. A missing file is not an error,
    /// it simply means the default configuration.
    fn load_config(config_file: &str) -> Result<LibraryConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: LibraryConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(LibraryConfig::default())
        }
    }

    /// Saves current configuration to the config file.
    ///
    /// During tests this method does nothing to prevent pollution of the real
    /// config file.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(test)]
        {
            // Don't save config during tests to avoid polluting the real config file
            return Ok(());
        }

        #[cfg(not(test))]
        {
            let content = serde_json::to_string_pretty(&self.config)?;
            fs::write(&self.config_file, content)?;
            Ok(())
        }
    }

    /// current path of the Holland & Powell derived catalog
    pub fn hp11_catalog_path(&self) -> &str {
        &self.config.hp11_catalog
    }

    /// current path of the polynomial-fit literature catalog
    pub fn jimmy_catalog_path(&self) -> &str {
        &self.config.jimmy_catalog
    }

    /// Both catalog paths in load order. This is what the loader concatenates
    /// into the full reaction table.
    pub fn catalog_paths(&self) -> Vec<String> {
        vec![
            self.config.hp11_catalog.clone(),
            self.config.jimmy_catalog.clone(),
        ]
    }

    /// Updates the hp11 catalog file path. Validates that the new file exists
    /// before updating and saves the configuration afterwards.
    pub fn set_hp11_catalog(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if Path::new(path).exists() {
            self.config.hp11_catalog = path.to_string();
            self.save_config()?;
            Ok(())
        } else {
            Err(format!("File does not exist: {}", path).into())
        }
    }

    /// Updates the jimmy catalog file path. Validates that the new file exists
    /// before updating and saves the configuration afterwards.
    pub fn set_jimmy_catalog(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if Path::new(path).exists() {
            self.config.jimmy_catalog = path.to_string();
            self.save_config()?;
            Ok(())
        } else {
            Err(format!("File does not exist: {}", path).into())
        }
    }

    /// Updates multiple catalog paths in a single atomic operation.
    ///
    /// Validates that all files exist before making any change, so either all
    /// updates succeed or none are applied.
    ///
    /// # Arguments
    /// * `updates` - HashMap mapping internal keys to new file paths
    ///   - "hp11_catalog" -> path to the hp11 catalog file
    ///   - "jimmy_catalog" -> path to the jimmy catalog file
    pub fn update_libraries(
        &mut self,
        updates: HashMap<&str, &str>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for (_key, path) in &updates {
            if !Path::new(path).exists() {
                return Err(format!("File does not exist: {}", path).into());
            }
        }

        for (key, path) in updates {
            match key {
                "hp11_catalog" => self.config.hp11_catalog = path.to_string(),
                "jimmy_catalog" => self.config.jimmy_catalog = path.to_string(),
                _ => return Err(format!("Unknown library key: {}", key).into()),
            }
        }

        self.save_config()?;
        Ok(())
    }

    /// Returns a reference to the current catalog configuration.
    pub fn get_config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Resets all catalog paths to their default values and saves the change.
    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = LibraryConfig::default();
        self.save_config()?;
        Ok(())
    }
}

/// Global singleton instance of LibraryManager using thread-safe OnceLock pattern
static GLOBAL_LIBRARY_MANAGER: OnceLock<Mutex<LibraryManager>> = OnceLock::new();

/// Test-specific manager instance to isolate tests from global state
#[cfg(test)]
static TEST_MANAGER: std::sync::Mutex<Option<LibraryManager>> = std::sync::Mutex::new(None);

/// Sets a test-specific manager instance for test isolation.
#[cfg(test)]
pub fn set_test_manager(manager: LibraryManager) {
    *TEST_MANAGER.lock().unwrap() = Some(manager);
}

/// Clears the test-specific manager instance.
#[cfg(test)]
pub fn clear_test_manager() {
    *TEST_MANAGER.lock().unwrap() = None;
}

/// Returns a mutex guard to the global LibraryManager instance.
///
/// # Panics
/// Panics if the mutex is poisoned (should not happen in normal operation)
pub fn get_library_manager() -> std::sync::MutexGuard<'static, LibraryManager> {
    #[cfg(test)]
    {
        if let Some(ref manager) = *TEST_MANAGER.lock().unwrap() {
            let _ = GLOBAL_LIBRARY_MANAGER.set(Mutex::new(manager.clone()));
        }
    }

    GLOBAL_LIBRARY_MANAGER
        .get_or_init(|| Mutex::new(LibraryManager::new()))
        .lock()
        .unwrap()
}

/// Executes a closure with read-only access to the LibraryManager.
///
/// # Example
/// ```rust
/// use RxnDB::library_manager::with_library_manager;
/// let paths = with_library_manager(|manager| manager.catalog_paths());
/// ```
pub fn with_library_manager<F, R>(f: F) -> R
where
    F: FnOnce(&LibraryManager) -> R,
{
    let manager = get_library_manager();
    f(&*manager)
}

/// Executes a closure with mutable access to the LibraryManager.
pub fn with_library_manager_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut LibraryManager) -> R,
{
    let mut manager = get_library_manager();
    f(&mut *manager)
}
