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

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The configuration for Mailbag.
///
/// This is stored in a file named `mailbag.toml`, by default under
/// `$HOME/.config`. Every table is optional; a missing file behaves as the
/// all-default configuration.
#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct SystemConfig {
    /// Configuration for the remote folder proxy.
    #[serde(default)]
    pub proxy: ProxyConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// The path of the UNIX socket on which the companion proxy process
    /// listens.
    ///
    /// Remote folder operations fail until this is set.
    pub socket: PathBuf,
}
