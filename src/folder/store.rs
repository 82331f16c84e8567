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
use std::rc::Rc;

use crate::folder::local::LocalFolder;
use crate::folder::message::MessageHandle;
use crate::folder::remote::RemoteFolder;
use crate::proxy::ProxyConnection;
use crate::support::error::Error;

/// One mail folder, local or remote.
///
/// The two stores share no mechanism, so the kind is decided once, here,
/// and every operation dispatches on the variant; nothing downstream
/// branches on locality again.
pub enum Folder {
    Local(LocalFolder),
    Remote(RemoteFolder),
}

impl Folder {
    /// Open the folder named `path`.
    ///
    /// `is_local` is what the caller believes, but a non-empty `path`
    /// without a leading `/` is classified remote regardless: such names
    /// (`INBOX.Sent`, as typed by a user) denote server-side folders, and
    /// requiring the caller to also pass the right flag would just move
    /// the bug. The flip side is that a *relative* path to a local Maildir
    /// is misclassified, so local folders must be named absolutely.
    pub fn new(
        path: String,
        is_local: bool,
        proxy: Rc<RefCell<dyn ProxyConnection>>,
    ) -> Self {
        if is_local && (path.is_empty() || path.starts_with('/')) {
            Folder::Local(LocalFolder::new(path))
        } else {
            Folder::Remote(RemoteFolder::new(path, proxy))
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Folder::Local(..))
    }

    pub fn is_remote(&self) -> bool {
        !self.is_local()
    }

    /// The name this folder was opened under, verbatim.
    ///
    /// Only meaningful as a filesystem path when `is_local()`; for a
    /// remote folder it is an opaque protocol argument.
    pub fn path(&self) -> &str {
        match self {
            Folder::Local(f) => f.path(),
            Folder::Remote(f) => f.path(),
        }
    }

    /// The last time this folder's contents changed.
    pub fn last_modified(&self) -> i64 {
        match self {
            Folder::Local(f) => f.last_modified(),
            Folder::Remote(f) => f.last_modified(),
        }
    }

    /// The total number of messages. At most one scan per call.
    pub fn total_messages(&mut self) -> usize {
        match self {
            Folder::Local(f) => f.total_messages(),
            Folder::Remote(f) => f.total_messages(),
        }
    }

    /// The number of unread messages. At most one scan per call.
    pub fn unread_messages(&mut self) -> usize {
        match self {
            Folder::Local(f) => f.unread_messages(),
            Folder::Remote(f) => f.unread_messages(),
        }
    }

    /// Enumerate every message in the folder.
    pub fn messages(&self) -> Vec<MessageHandle> {
        match self {
            Folder::Local(f) => f.messages(),
            Folder::Remote(f) => f.messages(),
        }
    }

    /// Artificially advance the modification time.
    ///
    /// Only remote folders need this (no filesystem signal exists for
    /// them); for a local folder it is a no-op.
    pub fn bump_mtime(&mut self) {
        if let Folder::Remote(f) = self {
            f.bump_mtime();
        }
    }

    /// Save the message backing `msg` into this folder.
    pub fn save_message(
        &mut self,
        msg: &MessageHandle,
    ) -> Result<(), Error> {
        match self {
            Folder::Local(f) => f.save(msg).map(|_| ()),
            Folder::Remote(f) => f.save(msg),
        }
    }
}
