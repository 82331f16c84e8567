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

//! Support for working with a single mail folder.
//!
//! A folder is one named collection of messages. It comes in two kinds,
//! fixed when the folder is opened:
//!
//! - A *local* folder is a Maildir on the local filesystem. Its path names a
//!   directory holding the two subdirectories that actually carry messages:
//!
//!   - `new/*`. Messages which have been delivered but never looked at.
//!
//!   - `cur/*`. Messages a mail client has seen, renamed to carry an info
//!     suffix (`:2,` plus flag letters, `S` meaning seen).
//!
//!   Message files are regular files directly inside these; anything that is
//!   itself a directory is not a message. Other mail agents may write into
//!   the same directories at any time, so nothing outside the two
//!   subdirectories' modification times can be trusted to stay stable
//!   between calls.
//!
//! - A *remote* folder lives on another system and is reached only through
//!   the companion proxy process (see the `proxy` module). Its "path" is an
//!   opaque folder name used as a protocol argument, e.g. `INBOX.Sent`.
//!
//! Both kinds answer the same questions (total count, unread count,
//! enumeration) and accept new messages, so callers never branch on the
//! kind; `Folder` dispatches to whichever store was selected when it was
//! constructed.

pub mod local;
pub mod message;
pub mod remote;
pub mod store;

pub use self::local::LocalFolder;
pub use self::message::MessageHandle;
pub use self::remote::RemoteFolder;
pub use self::store::Folder;
