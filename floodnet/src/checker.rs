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

//! This module interprets the result of the connectivity probe. It contains no probing logic of
//! its own; the platform performs the probes.

use crate::platform::ProbeReport;
use crate::topology::Topology;

use log::*;

/// Log the outcome of every probed pair and the aggregate loss count. Returns true if and only
/// if no probe was lost.
pub fn report_connectivity(report: &ProbeReport, topo: &Topology) -> bool {
    for result in &report.results {
        let src = topo.name(result.src);
        let dst = topo.name(result.dst);
        if result.received {
            info!("{} -> {}: ok", src, dst);
        } else {
            warn!("{} -> {}: probe lost!", src, dst);
        }
    }
    info!(
        "Results: {:.0}% dropped ({}/{} received)",
        report.percent_dropped(),
        report.num_received(),
        report.num_pairs()
    );
    report.all_received()
}
