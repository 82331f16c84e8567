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

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Folder is not a maildir")]
    NotAMaildir,
    #[error("Gave up generating a unique message name")]
    GaveUpNaming,
    #[error("Proxy closed the connection without replying")]
    ProxyClosed,
    #[error(transparent)]
    Io(#[from] io::Error),
}
