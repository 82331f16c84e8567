//-
// Copyright (c) 2026, The Mailbag Authors
//
// This file is part of Mailbag.
//
// Mailbag is free software: you can  redistribute it and/or modify it under
// the terms of  the GNU General Public License as  published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Mailbag is distributed  in the hope that it  will be useful,  but WITHOUT
// ANY WARRANTY; without even  the implied warranty  of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
// more details.
//
// You should have received a copy of the GNU General Public License along
// with Mailbag. If not, see <http://www.gnu.org/licenses/>.

//! Directory scanning, behind a trait so that stores can be tested against
//! a fake filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

/// Lists the entries of a directory.
///
/// Implementations make no promise about ordering and may yield entries
/// which are themselves directories; callers that only want regular files
/// must filter on directory status explicitly.
pub trait DirScanner {
    /// Return the full paths of the entries directly under `path`.
    ///
    /// A directory that cannot be read yields an empty list.
    fn entries(&self, path: &Path) -> Vec<PathBuf>;
}

/// The production scanner, backed by `fs::read_dir`.
pub struct FsScanner;

impl DirScanner for FsScanner {
    fn entries(&self, path: &Path) -> Vec<PathBuf> {
        match fs::read_dir(path) {
            Ok(it) => it.filter_map(|r| r.ok()).map(|e| e.path()).collect(),
            Err(e) => {
                debug!("Unable to scan {}: {}", path.display(), e);
                Vec::new()
            },
        }
    }
}
