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

//! # Flow provisioning
//!
//! Brings the forwarding table of every switch to a known state that permits full connectivity
//! among all hosts, using only Ethernet-layer match fields. All operations are one-shot batch
//! computations over the fixed topology; none of them retries. Because [`reset_rules`] clears
//! all state before installing anything, repeated invocations of [`provision`] converge to the
//! same rule set, and a full re-run is the recovery path for any mid-run failure.

use crate::flows::{self, FlowRule};
use crate::platform::Platform;
use crate::topology::Topology;
use crate::types::MacAddr;
use crate::Error;

use log::*;

/// Remove all rules from every switch, then install the single broadcast rule flooding
/// address-resolution frames. The network must already be running; if a switch rejects a
/// command, the error is returned immediately and no further switch is touched.
pub fn reset_rules<P: Platform>(platform: &mut P, topo: &Topology) -> Result<(), Error> {
    for switch in topo.switches() {
        debug!("Resetting the flow rules on {}", topo.name(switch));
        platform.clear_flows(switch)?;
        platform.add_flow(switch, FlowRule::arp_broadcast())?;
    }
    Ok(())
}

/// Install one flood rule per ordered pair of distinct hosts on every switch. All hardware
/// addresses are resolved up front, so a host without an assigned address fails the operation
/// before any switch is touched.
pub fn provision_unicast_flows<P: Platform>(
    platform: &mut P,
    topo: &Topology,
) -> Result<(), Error> {
    // resolve all hardware addresses before installing anything
    let mut macs: Vec<MacAddr> = Vec::with_capacity(topo.num_hosts());
    for host in topo.hosts() {
        let mac = platform.host_mac(host)?;
        debug!("{} has hardware address {}", topo.name(host), mac);
        macs.push(mac);
    }

    let rules = flows::unicast_rules(&macs);
    info!(
        "Installing {} unicast rules on each of {} switches",
        rules.len(),
        topo.num_switches()
    );
    for switch in topo.switches() {
        for rule in &rules {
            platform.add_flow(switch, *rule)?;
        }
    }
    Ok(())
}

/// Reset every switch and install the full rule set: the broadcast rule plus `N*(N-1)` unicast
/// rules for `N` hosts. Idempotent: the leading reset guarantees that re-runs converge to the
/// same rule set.
pub fn provision<P: Platform>(platform: &mut P, topo: &Topology) -> Result<(), Error> {
    reset_rules(platform, topo)?;
    provision_unicast_flows(platform, topo)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::flows::FlowMatch;
    use crate::sim::SimNet;
    use crate::topologies;

    #[test]
    fn rule_count_invariant() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();
        provision(&mut net, &topo).unwrap();

        // 1 broadcast rule + 5*4 unicast rules on every switch
        for switch in topo.switches() {
            assert_eq!(net.rules(switch).len(), 21);
        }
    }

    #[test]
    fn idempotence() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();

        provision(&mut net, &topo).unwrap();
        let first: Vec<Vec<FlowRule>> =
            topo.switches().iter().map(|s| net.rules(*s).to_vec()).collect();

        provision(&mut net, &topo).unwrap();
        let second: Vec<Vec<FlowRule>> =
            topo.switches().iter().map(|s| net.rules(*s).to_vec()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn symmetry() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();
        provision(&mut net, &topo).unwrap();

        for switch in topo.switches() {
            let rules = net.rules(switch);
            for rule in rules {
                if let FlowMatch::MacPair { src, dst } = rule.matcher {
                    assert!(
                        rules.contains(&FlowRule::unicast(dst, src)),
                        "missing reverse rule for {} on {}",
                        rule,
                        topo.name(switch)
                    );
                }
            }
        }
    }

    #[test]
    fn provisioning_requires_running_network() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());

        // every host fails address resolution, not a silent empty rule set
        match provision_unicast_flows(&mut net, &topo) {
            Err(Error::AddressUnavailableError(host)) => assert_eq!(host, "h1"),
            r => panic!("expected AddressUnavailableError, got {:?}", r),
        }

        // and the rule-programming channel is not live either
        match reset_rules(&mut net, &topo) {
            Err(Error::ProvisioningError { switch, .. }) => assert_eq!(switch, "s1"),
            r => panic!("expected ProvisioningError, got {:?}", r),
        }
    }

    #[test]
    fn reset_installs_only_broadcast() {
        let topo = topologies::pair_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();
        provision(&mut net, &topo).unwrap();
        reset_rules(&mut net, &topo).unwrap();

        for switch in topo.switches() {
            assert_eq!(net.rules(switch), &[FlowRule::arp_broadcast()]);
        }
    }
}
