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

//! # Floodnet
//!
//! This library declares static switch/host topologies and brings the forwarding tables of every
//! switch to a known state, such that all hosts can exchange frames. Forwarding is purely static:
//! one rule floods address-resolution traffic, and one rule per ordered host pair floods the
//! matching unicast frames. There is no address learning and no loop avoidance, which is fine for
//! the small, fully-known topologies this library is built for.
//!
//! The actual emulation (network namespaces, interfaces, switch datapaths) is the job of an
//! external platform, reached through the [`Platform`](platform::Platform) trait. The library
//! ships an in-memory implementation ([`SimNet`](sim::SimNet)) which is used for testing and dry
//! runs.
//!
//! ## Example usage
//!
//! ```rust
//! use floodnet::platform::Platform;
//! use floodnet::sim::SimNet;
//! use floodnet::{provision, topologies};
//!
//! fn main() -> Result<(), floodnet::Error> {
//!     let topo = topologies::lab_net();
//!     let mut net = SimNet::new(topo.clone());
//!
//!     net.start()?;
//!     provision::provision(&mut net, &topo)?;
//!
//!     // every ordered host pair can now exchange frames
//!     let report = net.ping_all()?;
//!     assert!(report.all_received());
//!     assert_eq!(report.num_pairs(), 20);
//!
//!     net.stop()?;
//!     Ok(())
//! }
//! ```

#![deny(missing_docs, missing_debug_implementations)]

pub mod checker;
mod error;
pub mod flows;
pub mod platform;
pub mod provision;
pub mod sim;
pub mod topologies;
pub mod topology;
pub mod types;

pub use error::Error;
pub use platform::Platform;
pub use topology::Topology;
pub use types::{MacAddr, NodeId};
