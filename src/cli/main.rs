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

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use structopt::StructOpt;

use crate::support::sysexits::*;
use crate::support::system_config::SystemConfig;

#[derive(StructOpt)]
#[structopt(max_term_width = 80)]
enum Command {
    /// Show the total and unread message counts of a folder.
    Count(FolderSubcommand),
    /// List the messages in a folder.
    List(FolderSubcommand),
    /// Save a message file into a folder.
    Save(SaveSubcommand),
}

#[derive(StructOpt, Default)]
pub(super) struct CommonOptions {
    /// The configuration file
    /// [default: $HOME/.config/mailbag.toml]
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
}

#[derive(StructOpt)]
pub(super) struct FolderSubcommand {
    #[structopt(flatten)]
    pub(super) common: CommonOptions,

    /// Treat the folder as remote even if its name looks like a path.
    #[structopt(long)]
    pub(super) remote: bool,

    /// The folder to work on. Local maildirs are named by absolute path;
    /// any other name is taken as a remote folder.
    pub(super) folder: String,
}

#[derive(StructOpt)]
pub(super) struct SaveSubcommand {
    #[structopt(flatten)]
    pub(super) common: CommonOptions,

    /// Treat the folder as remote even if its name looks like a path.
    #[structopt(long)]
    pub(super) remote: bool,

    /// The message file to save.
    #[structopt(parse(from_os_str))]
    pub(super) message: PathBuf,

    /// The destination folder.
    pub(super) folder: String,
}

pub fn main() {
    // Clap exits with status 1 instead of EX_USAGE if we use the more
    // concise API
    let cmd = Command::from_clap(&match Command::clap().get_matches_safe() {
        Ok(matches) => matches,
        Err(
            e @ clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            },
        )
        | Err(
            e @ clap::Error {
                kind: clap::ErrorKind::VersionDisplayed,
                ..
            },
        ) => {
            println!("{}", e.message);
            return;
        },
        Err(e) => {
            eprintln!("{}", e.message);
            EX_USAGE.exit()
        },
    });

    init_logging();

    let config = load_config(match cmd {
        Command::Count(ref c) | Command::List(ref c) => {
            c.common.config.clone()
        },
        Command::Save(ref c) => c.common.config.clone(),
    });

    match cmd {
        Command::Count(cmd) => super::folder::count(config, cmd),
        Command::List(cmd) => super::folder::list(config, cmd),
        Command::Save(cmd) => super::folder::save(config, cmd),
    }
}

fn init_logging() {
    if Ok(true) == nix::unistd::isatty(2) {
        // Running interactively; just write to stderr.
        crate::init_simple_log();
    } else {
        // Under an MDA, cron, or similar there is no useful stderr; follow
        // mail convention and log to the mail facility.
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_MAIL,
            hostname: None,
            process: env!("CARGO_PKG_NAME").to_owned(),
            pid: nix::unistd::getpid().as_raw(),
        };

        let logger =
            syslog::unix(formatter).expect("Failed to connect to syslog");
        log::set_boxed_logger(Box::new(syslog::BasicLogger::new(logger)))
            .map(|_| log::set_max_level(log::LevelFilter::Info))
            .expect("Failed to initialise logging");
    }
}

/// Load the configuration.
///
/// An explicitly named file must exist and parse; the default location is
/// allowed to be absent, in which case everything takes its default.
fn load_config(explicit: Option<PathBuf>) -> SystemConfig {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => match std::env::var_os("HOME") {
            Some(home) => (
                PathBuf::from(home).join(".config").join("mailbag.toml"),
                false,
            ),
            None => return SystemConfig::default(),
        },
    };

    let mut raw = Vec::new();
    match fs::File::open(&path).and_then(|mut f| f.read_to_end(&mut raw)) {
        Ok(_) => (),
        Err(_) if !required => return SystemConfig::default(),
        Err(e) => {
            die!(EX_CONFIG, "Error reading '{}': {}", path.display(), e)
        },
    }

    match toml::from_slice(&raw) {
        Ok(config) => config,
        Err(e) => die!(
            EX_CONFIG,
            "Error in config file at '{}': {}",
            path.display(),
            e
        ),
    }
}
