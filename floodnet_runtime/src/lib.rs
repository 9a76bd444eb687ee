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

//! # Runtime System
//!
//! This system realizes an abstract topology on the emulation platform, provisions the flow
//! rules on every switch, and checks connectivity between all host pairs. For simplified
//! usage, check the function [`perform_lab`].

#![deny(missing_docs, missing_debug_implementations)]

pub mod emulation;
pub use emulation::EmulatedNetwork;

use floodnet::platform::{Platform, ProbeReport};
use floodnet::sim::SimNet;
use floodnet::{checker, provision, Topology};

use log::*;
use serde::Serialize;
use std::error::Error;

/// # Perform the lab sequence
///
/// Realize the topology on the emulation platform and run the full sequence:
///
/// 1. Start the emulated network (the platform creates all namespaces, interfaces and switch
///    datapaths, and assigns hardware addresses to all hosts).
/// 2. Reset the rules of every switch and install the flood rule set (one broadcast rule, one
///    rule per ordered host pair).
/// 3. Probe connectivity between every host pair and report the outcome. When `json_filename`
///    is given, the per-pair results are additionally written to that file.
/// 4. When `interactive` is set and provisioning succeeded, hand the platform's prompt to the
///    operator until they exit.
/// 5. Tear the network down. Teardown runs on *every* exit path; when it fails after an
///    earlier error, the earlier error wins and the teardown failure is only logged.
///
/// Returns `Ok(true)` if and only if provisioning completed on every switch and no probe was
/// lost.
pub fn perform_lab(
    topo: &Topology,
    interactive: bool,
    json_filename: Option<String>,
) -> Result<bool, Box<dyn Error>> {
    let mut net = EmulatedNetwork::new(topo.clone());
    net.start()?;

    let outcome = provision_and_probe(&mut net, topo, json_filename);

    // the interactive session is never entered if provisioning did not complete
    if outcome.is_ok() && interactive {
        info!("Entering the platform prompt; type `exit` to tear the network down");
        if let Err(e) = net.cli() {
            warn!("The interactive session ended with an error: {}", e);
        }
    }

    match (outcome, net.stop()) {
        (Ok(ok), Ok(())) => Ok(ok),
        (Ok(_), Err(stop_err)) => Err(stop_err.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(stop_err)) => {
            error!("Teardown failed after an earlier error: {}", stop_err);
            Err(e)
        }
    }
}

/// # Perform a dry run
///
/// The same provision-and-probe sequence as [`perform_lab`], but against the in-memory
/// simulated platform. No external resources are touched; useful to validate the rule set
/// before booting the emulator.
pub fn perform_check(topo: &Topology) -> Result<bool, Box<dyn Error>> {
    let mut net = SimNet::new(topo.clone());
    net.start()?;

    let outcome = provision_and_probe(&mut net, topo, None);

    match (outcome, net.stop()) {
        (Ok(ok), Ok(())) => Ok(ok),
        (Ok(_), Err(stop_err)) => Err(stop_err.into()),
        (Err(e), _) => Err(e),
    }
}

fn provision_and_probe<P: Platform>(
    net: &mut P,
    topo: &Topology,
    json_filename: Option<String>,
) -> Result<bool, Box<dyn Error>> {
    info!("Provisioning flow rules on all switches...");
    provision::provision(net, topo)?;

    info!("Testing connectivity between all host pairs...");
    let report = net.ping_all()?;
    let ok = checker::report_connectivity(&report, topo);

    if let Some(json_filename) = json_filename {
        let data = report_information(&report, topo);
        std::fs::write(json_filename, serde_json::to_string(&data)?)?;
    }

    Ok(ok)
}

#[derive(Debug, Clone, Serialize)]
struct PairInformation {
    src: String,
    dst: String,
    received: bool,
}

fn report_information(report: &ProbeReport, topo: &Topology) -> Vec<PairInformation> {
    report
        .results
        .iter()
        .map(|r| PairInformation {
            src: topo.name(r.src).to_string(),
            dst: topo.name(r.dst).to_string(),
            received: r.received,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use floodnet::topologies;

    #[test]
    fn check_lab_net() {
        assert!(perform_check(&topologies::lab_net()).unwrap());
        assert!(perform_check(&topologies::pair_net()).unwrap());
    }

    #[test]
    fn report_information_uses_names() {
        let topo = topologies::pair_net();
        let h1 = topo.get_node_id("h1").unwrap();
        let h2 = topo.get_node_id("h2").unwrap();

        let mut report = ProbeReport::default();
        report.record(h1, h2, true);
        report.record(h2, h1, false);

        let data = report_information(&report, &topo);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].src, "h1");
        assert_eq!(data[0].dst, "h2");
        assert!(data[0].received);
        assert!(!data[1].received);

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"src\":\"h1\""));
    }
}
