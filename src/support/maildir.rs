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

//! Helpers for working with the Maildir directory layout.

use std::path::Path;

use lazy_static::lazy_static;

/// Determine whether `path` looks like a maildir folder root.
///
/// Messages live in the `cur` and `new` subdirectories; a path with both
/// present as directories is a usable folder. `tmp` is not required since
/// saves never stage through it.
pub fn is_maildir(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.join("cur").is_dir() && path.join("new").is_dir()
}

lazy_static! {
    static ref HOSTNAME: String = {
        let mut buf = [0u8; 256];
        nix::unistd::gethostname(&mut buf)
            .ok()
            .and_then(|cs| cs.to_str().ok())
            .unwrap_or("localhost")
            .to_owned()
    };
}

/// Return the host name embedded into generated message names.
///
/// Looked up once per process; falls back to `localhost` if the system
/// refuses to divulge it.
pub fn hostname() -> &'static str {
    &HOSTNAME
}
