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

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use rand::{rngs::OsRng, Rng};

use crate::folder::message::{self, MessageHandle};
use crate::support::error::Error;
use crate::support::file_ops;
use crate::support::maildir;
use crate::support::scan::{DirScanner, FsScanner};

/// How many names to try before a save gives up.
///
/// Epoch-second resolution plus a 0..999 draw makes a collision within one
/// call vanishingly rare; exhausting the bound means something is seriously
/// wrong with the folder, and failing beats looping forever.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// A folder backed by a Maildir on the local filesystem.
pub struct LocalFolder {
    path: String,
    scanner: Box<dyn DirScanner>,
    /// Modification time as of the last count scan; -1 = never scanned.
    modified: i64,
    total: usize,
    unread: usize,
}

impl LocalFolder {
    pub fn new(path: String) -> Self {
        LocalFolder::with_scanner(path, Box::new(FsScanner))
    }

    /// Like `new`, but with the directory scanner supplied by the caller.
    pub fn with_scanner(path: String, scanner: Box<dyn DirScanner>) -> Self {
        LocalFolder {
            path,
            scanner,
            modified: -1,
            total: 0,
            unread: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The last time this folder's contents changed, in seconds since the
    /// epoch.
    ///
    /// New mail lands in `new/` and processed mail in `cur/`, so the later
    /// of the two directories' modification times is the folder's. A
    /// subdirectory that cannot be statted contributes zero.
    pub fn last_modified(&self) -> i64 {
        let root = Path::new(&self.path);
        let mut last = 0;

        for sub in &["cur", "new"] {
            if let Ok(st) = nix::sys::stat::stat(&root.join(sub)) {
                last = last.max(st.st_mtime);
            }
        }

        last
    }

    /// The total number of messages in this folder.
    pub fn total_messages(&mut self) -> usize {
        self.update_cache();
        self.total
    }

    /// The number of unread messages in this folder.
    pub fn unread_messages(&mut self) -> usize {
        self.update_cache();
        self.unread
    }

    /// Refresh the count cache if the folder changed since the last scan.
    ///
    /// Counting requires a full directory scan, so it only happens once the
    /// modification time has actually moved. A change landing within the
    /// same second as the previous scan goes unnoticed; second resolution
    /// is the accepted precision limit.
    fn update_cache(&mut self) {
        let last_mod = self.last_modified();
        if last_mod == self.modified {
            return;
        }

        self.modified = last_mod;

        let all = self.messages();
        self.total = all.len();
        self.unread = all.iter().filter(|m| m.is_new()).count();
        debug!(
            "{}: rescanned, {} total, {} unread",
            self.path, self.total, self.unread
        );
    }

    /// Enumerate every message in the folder, in filesystem order.
    pub fn messages(&self) -> Vec<MessageHandle> {
        message::scan_folder(Path::new(&self.path), &*self.scanner)
    }

    /// Save the message backing `msg` into this folder.
    ///
    /// Messages saved this way are things the user already has (sent or
    /// filed mail), so they land in `cur/` marked seen. Returns the
    /// destination path.
    pub fn save(&self, msg: &MessageHandle) -> Result<PathBuf, Error> {
        let dst = self.generate_filename(false)?;
        file_ops::copy_exclusive(msg.path(), &dst)?;
        Ok(dst)
    }

    /// Generate an unused destination path for a message.
    ///
    /// The name is `<seconds>.<hostname><random 0..999>:2,<flag>` under
    /// `new/` for unread messages and `cur/` otherwise. Each attempt draws
    /// a fresh timestamp and random suffix; a name already taken (another
    /// agent may be writing into the same folder) is simply retried.
    pub fn generate_filename(&self, is_new: bool) -> Result<PathBuf, Error> {
        let root = Path::new(&self.path);
        if !maildir::is_maildir(root) {
            return Err(Error::NotAMaildir);
        }

        let dir = root.join(if is_new { "new" } else { "cur" });
        let flag = if is_new { 'N' } else { 'S' };

        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = format!(
                "{}.{}{}:2,{}",
                Utc::now().timestamp(),
                maildir::hostname(),
                OsRng.gen_range(0, 1000),
                flag
            );

            let candidate = dir.join(name);
            if !candidate.exists() {
                return Ok(candidate);
            }
        }

        warn!("{}: gave up looking for an unused message name", self.path);
        Err(Error::GaveUpNaming)
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;

    use nix::sys::stat::utimes;
    use nix::sys::time::{TimeVal, TimeValLike};
    use tempfile::TempDir;

    use super::*;

    fn maildir_fixture() -> (TempDir, String) {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("cur")).unwrap();
        fs::create_dir(root.path().join("new")).unwrap();
        let path = root.path().to_str().unwrap().to_owned();
        (root, path)
    }

    fn deliver(root: &TempDir, sub: &str, name: &str) {
        fs::write(root.path().join(sub).join(name), b"message").unwrap();
    }

    /// Pin both carrier directories to a known modification time so cache
    /// checks don't race the wall clock.
    fn pin_mtime(root: &TempDir, seconds: i64) {
        let tv = TimeVal::seconds(seconds);
        for sub in &["cur", "new"] {
            utimes(&root.path().join(sub), &tv, &tv).unwrap();
        }
    }

    /// Forwards to the real scanner while counting invocations.
    struct CountingScanner {
        calls: Rc<Cell<usize>>,
    }

    impl DirScanner for CountingScanner {
        fn entries(&self, path: &Path) -> Vec<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            FsScanner.entries(path)
        }
    }

    #[test]
    fn counts_split_between_cur_and_new() {
        let (root, path) = maildir_fixture();
        deliver(&root, "cur", "100.host1:2,S");
        deliver(&root, "cur", "101.host2:2,");
        deliver(&root, "new", "102.host3:2,N");

        let mut folder = LocalFolder::new(path);
        assert_eq!(3, folder.total_messages());
        // The flagless cur message and the new one are unread
        assert_eq!(2, folder.unread_messages());
    }

    #[test]
    fn empty_folder_counts_zero() {
        let (_root, path) = maildir_fixture();
        let mut folder = LocalFolder::new(path);
        assert_eq!(0, folder.total_messages());
        assert_eq!(0, folder.unread_messages());
    }

    #[test]
    fn absent_folder_counts_zero() {
        let mut folder = LocalFolder::new("/nonexistent/mailbag".to_owned());
        assert_eq!(0, folder.total_messages());
        assert_eq!(0, folder.unread_messages());
        assert_eq!(0, folder.last_modified());
    }

    #[test]
    fn cache_scans_once_until_mtime_moves() {
        let (root, path) = maildir_fixture();
        deliver(&root, "new", "100.host1:2,N");
        pin_mtime(&root, 1_000_000);

        let calls = Rc::new(Cell::new(0));
        let mut folder = LocalFolder::with_scanner(
            path,
            Box::new(CountingScanner {
                calls: Rc::clone(&calls),
            }),
        );

        assert_eq!(1, folder.total_messages());
        let after_first = calls.get();
        assert!(after_first > 0);

        // Unchanged mtime: cache hits, no further scanning
        assert_eq!(1, folder.unread_messages());
        assert_eq!(1, folder.total_messages());
        assert_eq!(after_first, calls.get());

        // Mutation moves the mtime: exactly one more scan
        deliver(&root, "new", "101.host2:2,N");
        pin_mtime(&root, 2_000_000);
        assert_eq!(2, folder.total_messages());
        assert_eq!(2 * after_first, calls.get());

        assert_eq!(2, folder.unread_messages());
        assert_eq!(2 * after_first, calls.get());
    }

    #[test]
    fn last_modified_takes_the_later_directory() {
        let (root, path) = maildir_fixture();
        let cur = TimeVal::seconds(1_500_000);
        let new = TimeVal::seconds(1_400_000);
        utimes(&root.path().join("cur"), &cur, &cur).unwrap();
        utimes(&root.path().join("new"), &new, &new).unwrap();

        let folder = LocalFolder::new(path);
        assert_eq!(1_500_000, folder.last_modified());
    }

    #[test]
    fn enumeration_excludes_directories() {
        let (root, path) = maildir_fixture();
        deliver(&root, "cur", "100.host1:2,S");
        fs::create_dir(root.path().join("cur").join("subdir")).unwrap();

        let folder = LocalFolder::new(path);
        let messages = folder.messages();
        assert_eq!(1, messages.len());
        assert_eq!(
            root.path().join("cur").join("100.host1:2,S"),
            *messages[0].path()
        );
    }

    #[test]
    fn generated_names_are_distinct_and_unused() {
        let (root, path) = maildir_fixture();
        let folder = LocalFolder::new(path);

        let a = folder.generate_filename(false).unwrap();
        assert!(!a.exists());
        fs::write(&a, b"").unwrap();
        let b = folder.generate_filename(false).unwrap();

        assert_ne!(a, b);
        assert!(!b.exists());
        assert!(a.starts_with(root.path().join("cur")));
        assert!(b.starts_with(root.path().join("cur")));
    }

    #[test]
    fn generated_names_match_the_template() {
        let (root, path) = maildir_fixture();
        let folder = LocalFolder::new(path);

        for &(is_new, sub, flag) in
            &[(true, "new", ":2,N"), (false, "cur", ":2,S")]
        {
            let dst = folder.generate_filename(is_new).unwrap();
            assert_eq!(root.path().join(sub), *dst.parent().unwrap());

            let name = dst.file_name().unwrap().to_str().unwrap();
            assert!(name.ends_with(flag), "bad flag in {}", name);

            let seconds = name.split('.').next().unwrap();
            assert!(
                seconds.parse::<u64>().is_ok(),
                "bad timestamp in {}",
                name
            );
            let rest = &name[seconds.len() + 1..name.len() - flag.len()];
            assert!(
                rest.starts_with(maildir::hostname()),
                "bad hostname in {}",
                name
            );
            let random = &rest[maildir::hostname().len()..];
            assert!(random.parse::<u32>().unwrap() < 1000);
        }
    }

    #[test]
    fn invalid_layout_refuses_to_name() {
        let root = TempDir::new().unwrap();
        let folder =
            LocalFolder::new(root.path().to_str().unwrap().to_owned());
        assert_matches!(
            Err(Error::NotAMaildir),
            folder.generate_filename(false)
        );
    }

    #[test]
    fn saved_message_shows_up_in_enumeration() {
        let (source_root, _source_path) = maildir_fixture();
        deliver(&source_root, "cur", "100.host1:2,S");
        let source = MessageHandle::new(
            source_root.path().join("cur").join("100.host1:2,S"),
        );

        let (root, path) = maildir_fixture();
        let mut folder = LocalFolder::new(path);

        let dst = folder.save(&source).unwrap();
        assert!(dst.is_file());

        let messages = folder.messages();
        assert!(messages.iter().any(|m| m.path() == dst));
        // Saved messages are filed as read
        assert!(!messages.iter().find(|m| m.path() == dst).unwrap().is_new());

        pin_mtime(&root, 3_000_000);
        assert_eq!(1, folder.total_messages());
        assert_eq!(0, folder.unread_messages());
    }

    #[test]
    fn save_into_invalid_layout_fails() {
        let (source_root, _) = maildir_fixture();
        deliver(&source_root, "cur", "100.host1:2,S");
        let source = MessageHandle::new(
            source_root.path().join("cur").join("100.host1:2,S"),
        );

        let root = TempDir::new().unwrap();
        let folder =
            LocalFolder::new(root.path().to_str().unwrap().to_owned());
        assert_matches!(Err(Error::NotAMaildir), folder.save(&source));
    }
}
