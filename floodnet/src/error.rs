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

//! Module containing all error types

use thiserror::Error;

/// Main error type. No operation retries on any of these; every error aborts the running
/// operation and is surfaced to the caller. Provisioning errors carry the switch and the
/// offending command, so that the operator can decide whether to re-run the (idempotent)
/// provisioning from scratch.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A switch rejected a rule-reset or rule-install command
    #[error("Switch {switch} rejected the command `{command}`: {reason}")]
    ProvisioningError {
        /// Name of the switch which rejected the command
        switch: String,
        /// The rejected command
        command: String,
        /// Reason given by the rule-programming channel
        reason: String,
    },
    /// A host has no hardware address assigned. This happens when provisioning is attempted
    /// before the network was started.
    #[error("No hardware address is assigned to host {0}. Was the network started?")]
    AddressUnavailableError(String),
    /// The platform could not bring the emulated network up
    #[error("The platform failed to start the network: {0}")]
    PlatformStartError(String),
    /// The platform could not tear the emulated network down
    #[error("The platform failed to stop the network: {0}")]
    PlatformStopError(String),
    /// The connectivity probe could not be performed
    #[error("The connectivity probe failed: {0}")]
    ProbeError(String),
    /// Device name is not present in the topology
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// A hardware address could not be parsed
    #[error("Invalid hardware address: {0}")]
    InvalidMacAddr(String),
}
