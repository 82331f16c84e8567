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

//! Miscellaneous functions for working with files.

use std::fs;
use std::io;
use std::path::Path;

/// Copy the regular file at `src` to `dst`, atomically.
///
/// The data is first staged in a temporary file in `dst`'s directory and
/// only persisted under the final name once fully written and synced, so a
/// reader never observes a partially-written message.
///
/// Fails with `AlreadyExists` if `dst` is already present; another writer
/// claiming the name between our existence probe and the copy must not have
/// its file clobbered.
pub fn copy_exclusive(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
) -> io::Result<()> {
    let dst = dst.as_ref();
    let dir = dst.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "Destination has no parent directory",
        )
    })?;

    let mut tf = tempfile::NamedTempFile::new_in(dir)?;
    let mut source = fs::File::open(src)?;
    io::copy(&mut source, tf.as_file_mut())?;
    tf.as_file_mut().sync_all()?;
    tf.persist_noclobber(dst)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::io;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn copies_content_to_destination() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("src");
        let dst = root.path().join("dst");
        fs::write(&src, b"hello there").unwrap();

        copy_exclusive(&src, &dst).unwrap();
        assert_eq!(b"hello there".to_vec(), fs::read(&dst).unwrap());
        // Source is left in place
        assert!(src.is_file());
    }

    #[test]
    fn refuses_to_clobber() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("src");
        let dst = root.path().join("dst");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        let err = copy_exclusive(&src, &dst).unwrap_err();
        assert_eq!(io::ErrorKind::AlreadyExists, err.kind());
        assert_eq!(b"old".to_vec(), fs::read(&dst).unwrap());
    }

    #[test]
    fn missing_source_is_an_error() {
        let root = TempDir::new().unwrap();
        let dst = root.path().join("dst");

        let err = copy_exclusive(root.path().join("nx"), &dst).unwrap_err();
        assert_eq!(io::ErrorKind::NotFound, err.kind());
        assert!(!dst.exists());
    }
}
