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

//! # Simulated platform
//!
//! An in-memory implementation of the [`Platform`] contract, used for testing the provisioning
//! logic and for dry runs without the emulator. Hardware addresses are assigned sequentially in
//! host order when the network starts (the same convention the emulator uses with automatic
//! address assignment), and the probe evaluates the installed rules against the link graph:
//! a frame is flooded switch by switch, and a switch only forwards it if one of its rules
//! matches.

use crate::flows::{FlowMatch, FlowRule, ETHERTYPE_ARP, ETHERTYPE_IPV4};
use crate::platform::{Platform, ProbeReport};
use crate::topology::Topology;
use crate::types::{MacAddr, NodeId};
use crate::Error;

use itertools::iproduct;
use log::*;
use std::collections::{HashMap, HashSet};

/// A frame as far as rule matching is concerned
struct Frame {
    ethertype: u16,
    src: MacAddr,
    dst: MacAddr,
}

fn rule_matches(rule: &FlowRule, frame: &Frame) -> bool {
    match rule.matcher {
        FlowMatch::EtherType(t) => t == frame.ethertype,
        FlowMatch::MacPair { src, dst } => src == frame.src && dst == frame.dst,
    }
}

/// # Simulated network
///
/// Owns a copy of the topology, one rule table per switch, and the hardware addresses assigned
/// at start time. Rule tables replace on identical match, mirroring the behavior of the real
/// rule-programming channel.
#[derive(Debug, Clone)]
pub struct SimNet {
    topo: Topology,
    started: bool,
    macs: HashMap<NodeId, MacAddr>,
    tables: HashMap<NodeId, Vec<FlowRule>>,
}

impl SimNet {
    /// Create a new simulated network for the given topology. The network is not running until
    /// [`Platform::start`] is called.
    pub fn new(topo: Topology) -> Self {
        Self { topo, started: false, macs: HashMap::new(), tables: HashMap::new() }
    }

    /// The topology this network was built from
    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    /// The rules currently installed on a switch, in installation order
    pub fn rules(&self, switch: NodeId) -> &[FlowRule] {
        self.tables.get(&switch).map(|t| t.as_slice()).unwrap_or(&[])
    }

    fn check_channel(&self, switch: NodeId, command: &str) -> Result<(), Error> {
        let reason = if !self.started {
            "the switch is not running"
        } else if self.topo.get_switch(switch).is_none() {
            "no such switch"
        } else {
            return Ok(());
        };
        Err(Error::ProvisioningError {
            switch: self.topo.name(switch).to_string(),
            command: command.to_string(),
            reason: reason.to_string(),
        })
    }

    /// Flood a frame injected by `from` through the network and collect every host it reaches.
    /// The visited set bounds the traversal; it does not change which hosts are reached.
    fn flood(&self, from: NodeId, frame: &Frame) -> HashSet<NodeId> {
        let mut reached: HashSet<NodeId> = HashSet::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: Vec<(NodeId, NodeId)> =
            self.topo.neighbors(from).into_iter().map(|n| (n, from)).collect();

        while let Some((node, ingress)) = queue.pop() {
            if self.topo.get_host(node).is_some() {
                reached.insert(node);
                continue;
            }
            if !visited.insert(node) {
                continue;
            }
            let table = self.rules(node);
            if table.iter().any(|rule| rule_matches(rule, frame)) {
                // flood: forward out every port except the ingress
                for next in self.topo.neighbors(node) {
                    if next != ingress {
                        queue.push((next, node));
                    }
                }
            }
            // no matching rule: the switch drops the frame
        }
        reached
    }

    /// Simulate one round-trip probe: address resolution in both directions, then the unicast
    /// echo request and reply.
    fn round_trip(&self, src: NodeId, dst: NodeId, src_mac: MacAddr, dst_mac: MacAddr) -> bool {
        let arp_request = Frame { ethertype: ETHERTYPE_ARP, src: src_mac, dst: MacAddr::BROADCAST };
        let arp_reply = Frame { ethertype: ETHERTYPE_ARP, src: dst_mac, dst: MacAddr::BROADCAST };
        let request = Frame { ethertype: ETHERTYPE_IPV4, src: src_mac, dst: dst_mac };
        let reply = Frame { ethertype: ETHERTYPE_IPV4, src: dst_mac, dst: src_mac };

        self.flood(src, &arp_request).contains(&dst)
            && self.flood(dst, &arp_reply).contains(&src)
            && self.flood(src, &request).contains(&dst)
            && self.flood(dst, &reply).contains(&src)
    }
}

impl Platform for SimNet {
    fn start(&mut self) -> Result<(), Error> {
        // sequential hardware addresses, in host order
        self.macs = self
            .topo
            .hosts()
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let i = i as u64 + 1;
                (h, MacAddr([0, 0, (i >> 24) as u8, (i >> 16) as u8, (i >> 8) as u8, i as u8]))
            })
            .collect();
        for switch in self.topo.switches() {
            self.tables.entry(switch).or_default();
        }
        self.started = true;
        debug!("Simulated network started with {} hosts", self.macs.len());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        if !self.started {
            return Err(Error::PlatformStopError("the network is not running".to_string()));
        }
        self.started = false;
        self.macs.clear();
        self.tables.clear();
        Ok(())
    }

    fn host_mac(&mut self, host: NodeId) -> Result<MacAddr, Error> {
        self.macs
            .get(&host)
            .copied()
            .ok_or_else(|| Error::AddressUnavailableError(self.topo.name(host).to_string()))
    }

    fn clear_flows(&mut self, switch: NodeId) -> Result<(), Error> {
        self.check_channel(switch, "del-flows")?;
        self.tables.entry(switch).or_default().clear();
        Ok(())
    }

    fn add_flow(&mut self, switch: NodeId, rule: FlowRule) -> Result<(), Error> {
        self.check_channel(switch, &format!("add-flow {}", rule))?;
        let table = self.tables.entry(switch).or_default();
        if let Some(existing) = table.iter_mut().find(|r| r.matcher == rule.matcher) {
            *existing = rule;
        } else {
            table.push(rule);
        }
        Ok(())
    }

    fn ping_all(&mut self) -> Result<ProbeReport, Error> {
        let hosts = self.topo.hosts();
        let mut report = ProbeReport::default();
        for (src, dst) in iproduct!(hosts.iter(), hosts.iter()) {
            if src == dst {
                continue;
            }
            let src_mac = self.host_mac(*src)?;
            let dst_mac = self.host_mac(*dst)?;
            report.record(*src, *dst, self.round_trip(*src, *dst, src_mac, dst_mac));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provision;
    use crate::topologies;

    #[test]
    fn end_to_end_zero_loss() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();
        provision::provision(&mut net, &topo).unwrap();

        let report = net.ping_all().unwrap();
        assert_eq!(report.num_pairs(), 20);
        assert_eq!(report.num_dropped(), 0);
        assert!(report.all_received());
    }

    #[test]
    fn no_rules_means_full_loss() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();

        let report = net.ping_all().unwrap();
        assert_eq!(report.num_pairs(), 20);
        assert_eq!(report.num_dropped(), 20);
        assert_eq!(report.percent_dropped(), 100.0);
    }

    #[test]
    fn broadcast_rule_alone_is_not_enough() {
        let topo = topologies::pair_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();
        provision::reset_rules(&mut net, &topo).unwrap();

        // address resolution floods, but the unicast echo is dropped
        let report = net.ping_all().unwrap();
        assert_eq!(report.num_pairs(), 2);
        assert_eq!(report.num_received(), 0);
    }

    #[test]
    fn add_flow_replaces_identical_match() {
        let topo = topologies::pair_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();

        let s1 = topo.get_node_id("s1").unwrap();
        net.add_flow(s1, FlowRule::arp_broadcast()).unwrap();
        net.add_flow(s1, FlowRule::arp_broadcast()).unwrap();
        assert_eq!(net.rules(s1).len(), 1);
    }

    #[test]
    fn mac_assignment_is_sequential() {
        let topo = topologies::lab_net();
        let mut net = SimNet::new(topo.clone());
        net.start().unwrap();

        let h1 = topo.get_node_id("h1").unwrap();
        let h5 = topo.get_node_id("h5").unwrap();
        assert_eq!(net.host_mac(h1).unwrap().to_string(), "00:00:00:00:00:01");
        assert_eq!(net.host_mac(h5).unwrap().to_string(), "00:00:00:00:00:05");
    }

    #[test]
    fn stop_releases_addresses() {
        let topo = topologies::pair_net();
        let mut net = SimNet::new(topo.clone());

        assert!(matches!(net.stop(), Err(Error::PlatformStopError(_))));
        net.start().unwrap();
        net.stop().unwrap();

        let h1 = topo.get_node_id("h1").unwrap();
        assert!(matches!(net.host_mac(h1), Err(Error::AddressUnavailableError(_))));
    }
}
