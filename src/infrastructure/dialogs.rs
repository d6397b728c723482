// SPDX-License-Identifier: MPL-2.0
//! [`FileDialog`] backed by the platform's native pickers.

use crate::application::port::{FileDialog, FileFilter};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialogs;

impl NativeDialogs {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn with_filters(mut dialog: rfd::FileDialog, filters: &[FileFilter]) -> rfd::FileDialog {
    for filter in filters {
        dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
    }
    dialog
}

impl FileDialog for NativeDialogs {
    fn open_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        let dialog = with_filters(rfd::FileDialog::new().set_title("Open Image"), filters);
        let path = dialog.pick_file();
        tracing::debug!(?path, "open dialog closed");
        path
    }

    fn save_file(
        &self,
        filters: &[FileFilter],
        default_extension: &str,
        initial_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        let mut dialog = with_filters(rfd::FileDialog::new().set_title("Save Image As"), filters);
        if let Some(dir) = initial_dir {
            dialog = dialog.set_directory(dir);
        }
        let path = dialog.save_file().map(|path| {
            if path.extension().is_none() && !default_extension.is_empty() {
                path.with_extension(default_extension)
            } else {
                path
            }
        });
        tracing::debug!(?path, "save dialog closed");
        path
    }
}
