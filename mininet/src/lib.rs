// Floodnet: Static Layer-2 Flow Provisioning for Emulated Networks
// Copyright (C) 2026  The Floodnet Developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Mininet Driver
//!
//! This is a very simple crate to drive a Mininet network from Rust: it renders a custom
//! topology, boots `mn` with Open vSwitch switches and no controller, and interacts with the
//! `mininet>` prompt over the process pipes. Switch forwarding tables are programmed through
//! `ovs-ofctl`, and connectivity is probed with the platform's own `pingall`.
//!
//! ```no_run
//! use mininet::{MininetSession, TopologySpec};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut spec = TopologySpec::default();
//!     spec.switches.push("s1".to_string());
//!     spec.hosts.push(("h1".to_string(), "10.0.0.1/24".to_string()));
//!     spec.hosts.push(("h2".to_string(), "10.0.0.2/24".to_string()));
//!     spec.links.push(("h1".to_string(), "s1".to_string()));
//!     spec.links.push(("h2".to_string(), "s1".to_string()));
//!
//!     let mut session = MininetSession::start(&spec)?;
//!     session.del_flows("s1")?;
//!     session.add_flow("s1", "dl_type=0x0806,actions=flood")?;
//!     println!("h1 has address {}", session.host_mac("h1")?);
//!
//!     let result = session.ping_all()?;
//!     println!("{}% dropped", result.percent_dropped);
//!
//!     session.stop()?;
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod session;
mod spec;
pub use session::{MininetSession, PingAllResult};
pub use spec::TopologySpec;

use thiserror::Error;

/// # Mininet Error type
#[derive(Debug, Error)]
pub enum Error {
    /// IO Error while spawning or talking to the mininet process
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// The prompt did not appear within the timeout
    #[error("Timed out waiting for the mininet prompt. Output so far:\n{0}")]
    PromptTimeout(String),
    /// The mininet process closed its pipes
    #[error("The mininet process terminated unexpectedly")]
    SessionClosed,
    /// A command produced output that cannot be parsed
    #[error("Cannot parse the command output: {0}")]
    ParseError(String),
    /// A command was rejected by the platform
    #[error("Command `{command}` failed: {output}")]
    CommandError {
        /// The offending command
        command: String,
        /// What the platform printed instead of succeeding silently
        output: String,
    },
}

/// Mininet Result type
type Result<T> = core::result::Result<T, Error>;
