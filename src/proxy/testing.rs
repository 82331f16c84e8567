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

//! Test doubles for the proxy boundary.

use std::cell::RefCell;
use std::rc::Rc;

use crate::proxy::ProxyConnection;
use crate::support::error::Error;

/// A `ProxyConnection` that records every command and answers each one
/// with the same canned reply.
pub struct RecordingProxy {
    pub commands: Vec<String>,
    pub reply: String,
}

impl RecordingProxy {
    pub fn replying(reply: &str) -> Rc<RefCell<RecordingProxy>> {
        Rc::new(RefCell::new(RecordingProxy {
            commands: Vec::new(),
            reply: reply.to_owned(),
        }))
    }
}

impl ProxyConnection for RecordingProxy {
    fn round_trip(&mut self, command: &str) -> Result<String, Error> {
        self.commands.push(command.to_owned());
        Ok(self.reply.clone())
    }
}
