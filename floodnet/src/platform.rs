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

//! # Platform contract
//!
//! The emulation platform owns the switches, links and processes of the running network; this
//! library only drives it. The [`Platform`] trait is the entire surface the provisioning code
//! depends on: lifecycle, hardware-address lookup, the two command shapes of the
//! rule-programming channel, and the all-pairs connectivity probe.
//!
//! Every call is blocking and must complete (or fail) before the next one is issued; the
//! provisioning code never overlaps commands and never retries.

use crate::flows::FlowRule;
use crate::types::{MacAddr, NodeId};
use crate::Error;

/// Contract between the provisioning code and the external emulation platform.
pub trait Platform {
    /// Bring the emulated network up. Hardware addresses are assigned to all hosts during this
    /// call. Fails with [`Error::PlatformStartError`].
    fn start(&mut self) -> Result<(), Error>;

    /// Tear the emulated network down, releasing all resources owned by the platform. Fails
    /// with [`Error::PlatformStopError`].
    fn stop(&mut self) -> Result<(), Error>;

    /// The hardware address assigned to a host. Only valid after [`Platform::start`]; fails
    /// with [`Error::AddressUnavailableError`] otherwise.
    fn host_mac(&mut self, host: NodeId) -> Result<MacAddr, Error>;

    /// Remove all flow rules installed on a switch. Fails with [`Error::ProvisioningError`].
    fn clear_flows(&mut self, switch: NodeId) -> Result<(), Error>;

    /// Install one flow rule on a switch. Installing a rule with a match identical to an
    /// existing rule replaces it. Fails with [`Error::ProvisioningError`].
    fn add_flow(&mut self, switch: NodeId, rule: FlowRule) -> Result<(), Error>;

    /// Issue a round-trip probe between every ordered pair of distinct hosts and report the
    /// per-pair outcome. Fails with [`Error::ProbeError`].
    fn ping_all(&mut self) -> Result<ProbeReport, Error>;
}

/// Outcome of a single round-trip probe between two hosts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    /// Probing host
    pub src: NodeId,
    /// Probed host
    pub dst: NodeId,
    /// True if and only if the round-trip succeeded
    pub received: bool,
}

/// Outcome of the all-pairs connectivity probe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    /// Per ordered pair outcomes, in probe order
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    /// Record the outcome of one probe
    pub fn record(&mut self, src: NodeId, dst: NodeId, received: bool) {
        self.results.push(ProbeResult { src, dst, received });
    }

    /// Number of probed pairs
    pub fn num_pairs(&self) -> usize {
        self.results.len()
    }

    /// Number of successful round-trips
    pub fn num_received(&self) -> usize {
        self.results.iter().filter(|r| r.received).count()
    }

    /// Number of lost probes
    pub fn num_dropped(&self) -> usize {
        self.num_pairs() - self.num_received()
    }

    /// Percentage of lost probes (0 for an empty report)
    pub fn percent_dropped(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            100.0 * self.num_dropped() as f64 / self.num_pairs() as f64
        }
    }

    /// True if and only if no probe was lost
    pub fn all_received(&self) -> bool {
        self.results.iter().all(|r| r.received)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn report_aggregates() {
        let mut report = ProbeReport::default();
        assert_eq!(report.percent_dropped(), 0.0);
        assert!(report.all_received());

        report.record(0.into(), 1.into(), true);
        report.record(1.into(), 0.into(), false);
        assert_eq!(report.num_pairs(), 2);
        assert_eq!(report.num_received(), 1);
        assert_eq!(report.num_dropped(), 1);
        assert_eq!(report.percent_dropped(), 50.0);
        assert!(!report.all_received());
    }
}
