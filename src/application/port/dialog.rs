// SPDX-License-Identifier: MPL-2.0
//! File picker port definition.

use std::path::{Path, PathBuf};

/// A named group of file extensions shown in a picker ("Image File": png, jpg, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            extensions,
        }
    }
}

/// Native open/save dialogs.
///
/// Both calls block until the user answers and return `None` when the
/// dialog is cancelled.
pub trait FileDialog {
    fn open_file(&self, filters: &[FileFilter]) -> Option<PathBuf>;

    fn save_file(
        &self,
        filters: &[FileFilter],
        default_extension: &str,
        initial_dir: Option<&Path>,
    ) -> Option<PathBuf>;
}
