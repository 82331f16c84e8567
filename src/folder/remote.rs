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

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use log::debug;

use crate::folder::message::{self, MessageHandle};
use crate::proxy::ProxyConnection;
use crate::support::error::Error;
use crate::support::scan::{DirScanner, FsScanner};

/// A folder whose contents live on another system, reached only through
/// the companion proxy process.
///
/// The path is an opaque folder name (`INBOX.Sent`), used as a protocol
/// argument and never interpreted. There is no filesystem signal behind
/// the folder, so the count cache is managed entirely from outside:
/// `set_counts` installs fresh values and `bump_mtime` marks them stale
/// relative to whatever baseline the owner tracks next.
pub struct RemoteFolder {
    path: String,
    proxy: Rc<RefCell<dyn ProxyConnection>>,
    scanner: Box<dyn DirScanner>,
    /// Advanced only by `bump_mtime`; -1 = never touched.
    modified: i64,
    total: usize,
    unread: usize,
}

impl RemoteFolder {
    pub fn new(
        path: String,
        proxy: Rc<RefCell<dyn ProxyConnection>>,
    ) -> Self {
        RemoteFolder {
            path,
            proxy,
            scanner: Box::new(FsScanner),
            modified: -1,
            total: 0,
            unread: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The stored modification marker, verbatim.
    ///
    /// There is no external clock to consult for a remote folder.
    pub fn last_modified(&self) -> i64 {
        self.modified
    }

    /// Artificially advance the modification marker by one unit.
    ///
    /// The save path calls this after a successful save so count queries
    /// observe that something changed.
    pub fn bump_mtime(&mut self) {
        self.modified += 1;
    }

    /// Install externally computed counts.
    ///
    /// Whatever layer speaks to the remote side (the proxy's folder
    /// listing) feeds the counts in through here.
    pub fn set_counts(&mut self, total: usize, unread: usize) {
        self.total = total;
        self.unread = unread;
    }

    /// The total number of messages, as last installed.
    pub fn total_messages(&mut self) -> usize {
        self.total
    }

    /// The number of unread messages, as last installed.
    pub fn unread_messages(&mut self) -> usize {
        self.unread
    }

    /// Enumerate messages exactly as a local folder would.
    ///
    /// An opaque folder name cannot be scanned as a directory, so this is
    /// normally empty.
    pub fn messages(&self) -> Vec<MessageHandle> {
        message::scan_folder(Path::new(&self.path), &*self.scanner)
    }

    /// Ask the proxy to save the message backing `msg` into this folder.
    ///
    /// The command is `save_message <source-path> <folder-name>`, newline
    /// terminated; keyword and argument order are fixed by the companion
    /// process. The reply is opaque: a non-empty reply is success and its
    /// content is only logged, but a peer that closes without answering is
    /// an error. On success the modification marker is bumped so the next
    /// count query reflects the addition.
    pub fn save(&mut self, msg: &MessageHandle) -> Result<(), Error> {
        let command = format!(
            "save_message {} {}\n",
            msg.path().display(),
            self.path
        );

        let reply = self.proxy.borrow_mut().round_trip(&command)?;
        if reply.is_empty() {
            return Err(Error::ProxyClosed);
        }

        debug!("{}: proxy reply: {:?}", self.path, reply.trim_end());
        self.bump_mtime();
        Ok(())
    }
}
