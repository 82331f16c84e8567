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

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::support::scan::DirScanner;

/// A lightweight reference to one stored message.
///
/// Handles are produced by folder enumeration and replaced wholesale on
/// every re-scan; they carry no identity across scans and no back-reference
/// to the folder that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageHandle {
    path: PathBuf,
}

impl MessageHandle {
    pub fn new(path: PathBuf) -> Self {
        MessageHandle { path }
    }

    /// The location of the backing message file.
    ///
    /// For a message enumerated out of a remote folder this is an opaque
    /// reference, not necessarily a real filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this message is new (unread).
    ///
    /// Computed from the message's current location and name, never stored:
    /// anything still in `new/` is unread; otherwise the Maildir info suffix
    /// decides, with the absence of the `S` (seen) letter meaning unread. A
    /// name with no info suffix is taken as read.
    pub fn is_new(&self) -> bool {
        if self.path.parent().and_then(Path::file_name)
            == Some(OsStr::new("new"))
        {
            return true;
        }

        let name = match self.path.file_name().and_then(OsStr::to_str) {
            Some(name) => name,
            None => return false,
        };

        match name.rfind(":2,") {
            Some(ix) => !name[ix + 3..].contains('S'),
            None => false,
        }
    }
}

/// List every message under `root`: every non-directory entry of its `cur/`
/// and `new/` carriers.
///
/// Shared by both folder kinds; a remote folder's opaque name simply fails
/// to scan as a directory and yields nothing. The scanner is free to yield
/// directory entries, which are excluded here by classification, never by
/// name pattern. Ordering is whatever the filesystem yields; callers
/// wanting a sorted or truncated view impose it themselves.
pub(crate) fn scan_folder(
    root: &Path,
    scanner: &dyn DirScanner,
) -> Vec<MessageHandle> {
    let mut result = Vec::new();

    for sub in &["cur", "new"] {
        for entry in scanner.entries(&root.join(sub)) {
            if !entry.is_dir() {
                result.push(MessageHandle::new(entry));
            }
        }
    }

    result
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    fn handle(path: &str) -> MessageHandle {
        MessageHandle::new(PathBuf::from(path))
    }

    #[test]
    fn location_in_new_is_unread() {
        assert!(handle("/mail/inbox/new/123.host42:2,").is_new());
        // Location wins even over a seen flag
        assert!(handle("/mail/inbox/new/123.host42:2,S").is_new());
    }

    #[test]
    fn info_suffix_decides_in_cur() {
        assert!(handle("/mail/inbox/cur/123.host42:2,").is_new());
        assert!(handle("/mail/inbox/cur/123.host42:2,F").is_new());
        assert!(!handle("/mail/inbox/cur/123.host42:2,S").is_new());
        assert!(!handle("/mail/inbox/cur/123.host42:2,FS").is_new());
    }

    #[test]
    fn bare_name_in_cur_is_read() {
        assert!(!handle("/mail/inbox/cur/123.host42").is_new());
    }

    proptest! {
        #[test]
        fn template_names_classify_by_flag(
            secs in 0u64..=9_999_999_999,
            r in 0u32..1000,
            is_new in any::<bool>(),
        ) {
            let sub = if is_new { "new" } else { "cur" };
            let flag = if is_new { 'N' } else { 'S' };
            let path = format!(
                "/mail/box/{}/{}.host{}:2,{}",
                sub, secs, r, flag
            );
            prop_assert_eq!(is_new, handle(&path).is_new());
        }
    }
}
