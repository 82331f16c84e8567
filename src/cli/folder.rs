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

use log::info;

use super::main::{FolderSubcommand, SaveSubcommand};
use crate::folder::{Folder, MessageHandle};
use crate::proxy::{ProxyConnection, UnixProxy};
use crate::support::error::Error;
use crate::support::sysexits::*;
use crate::support::system_config::SystemConfig;

pub(super) fn count(config: SystemConfig, cmd: FolderSubcommand) {
    let mut folder = open(&config, cmd.folder, cmd.remote);
    println!(
        "{} total, {} unread",
        folder.total_messages(),
        folder.unread_messages()
    );
}

pub(super) fn list(config: SystemConfig, cmd: FolderSubcommand) {
    let folder = open(&config, cmd.folder, cmd.remote);
    for msg in folder.messages() {
        println!(
            "{} {}",
            if msg.is_new() { "N" } else { " " },
            msg.path().display()
        );
    }
}

pub(super) fn save(config: SystemConfig, cmd: SaveSubcommand) {
    if !cmd.message.is_file() {
        die!(EX_NOINPUT, "{}: not a readable file", cmd.message.display());
    }

    let mut folder = open(&config, cmd.folder, cmd.remote);
    if folder.is_remote() && config.proxy.socket.as_os_str().is_empty() {
        die!(
            EX_CONFIG,
            "{} is a remote folder but no proxy socket is configured;\n\
             set `socket` under [proxy] in mailbag.toml",
            folder.path()
        );
    }

    let msg = MessageHandle::new(cmd.message);
    match folder.save_message(&msg) {
        Ok(()) => {
            info!("Saved {} into {}", msg.path().display(), folder.path())
        },
        Err(e @ Error::NotAMaildir) => {
            die!(EX_CANTCREAT, "{}: {}", folder.path(), e)
        },
        Err(e @ Error::ProxyClosed) => {
            die!(EX_UNAVAILABLE, "{}: {}", folder.path(), e)
        },
        Err(e) => {
            die!(EX_IOERR, "Failed to save into {}: {}", folder.path(), e)
        },
    }
}

fn open(config: &SystemConfig, name: String, force_remote: bool) -> Folder {
    let proxy = Rc::new(RefCell::new(UnixProxy::new(
        config.proxy.socket.clone(),
    )));
    Folder::new(
        name,
        !force_remote,
        proxy as Rc<RefCell<dyn ProxyConnection>>,
    )
}
