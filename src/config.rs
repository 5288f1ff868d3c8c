// SPDX-License-Identifier: GPL-3.0-only

//! Persistence of the display-name preference.
//!
//! The one value that survives between runs: the human sender's display
//! name, stored as a small plain-text file under the user config directory.

use snafu::prelude::*;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "chat2quote";
const NAME_FILE: &str = "display_name";

/// Error type for preference persistence.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// No per-user config directory could be determined.
    #[snafu(display("could not determine a config directory"))]
    NoConfigDir,

    /// Creating the config directory failed.
    #[snafu(display("failed to create {}: {source}", path.display()))]
    CreateDir {
        /// The directory being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing the preference file failed.
    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteName {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

fn name_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(NAME_FILE))
}

fn load_from(path: &Path) -> Option<String> {
    let name = std::fs::read_to_string(path).ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

fn save_to(path: &Path, name: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context(CreateDirSnafu { path: parent })?;
    }
    std::fs::write(path, name.trim()).context(WriteNameSnafu { path })
}

/// Loads the persisted display name, if one is set.
///
/// Any failure (no config directory, unreadable file, blank contents) reads
/// as "no preference".
#[must_use]
pub fn load_display_name() -> Option<String> {
    load_from(&name_path()?)
}

/// Persists the display name for future runs.
///
/// # Errors
///
/// Fails when no config directory exists or the file cannot be written.
pub fn save_display_name(name: &str) -> Result<(), ConfigError> {
    let path = name_path().context(NoConfigDirSnafu)?;
    save_to(&path, name)
}
