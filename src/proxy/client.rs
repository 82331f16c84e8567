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

use std::io::{Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use log::debug;

use crate::support::error::Error;

/// One command round trip against the folder proxy.
///
/// The protocol is one newline-terminated ASCII command per round trip; the
/// reply is opaque text. Implementations need not support more than one
/// outstanding request at a time; callers serialise their own access.
pub trait ProxyConnection {
    /// Send `command` (already newline-terminated) and return the reply.
    fn round_trip(&mut self, command: &str) -> Result<String, Error>;
}

/// A `ProxyConnection` talking to a UNIX domain socket.
///
/// Each round trip opens a fresh connection: connect, write the command,
/// half-close the write side, then read the reply until the peer closes.
pub struct UnixProxy {
    socket_path: PathBuf,
}

impl UnixProxy {
    pub fn new(socket_path: PathBuf) -> Self {
        UnixProxy { socket_path }
    }
}

impl ProxyConnection for UnixProxy {
    fn round_trip(&mut self, command: &str) -> Result<String, Error> {
        debug!(
            "proxy {}: {}",
            self.socket_path.display(),
            command.trim_end()
        );

        let mut stream = UnixStream::connect(&self.socket_path)?;
        stream.write_all(command.as_bytes())?;
        stream.shutdown(Shutdown::Write)?;

        let mut reply = String::new();
        stream.read_to_string(&mut reply)?;
        debug!("proxy replied with {} bytes", reply.len());
        Ok(reply)
    }
}
