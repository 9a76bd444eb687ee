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

//! # Emulated realization of the abstract topology
//!
//! This module implements the [`Platform`] contract on top of a mininet session. The topology
//! is translated into the platform's description once; all later operations translate node
//! handles to platform names on the way out, and names back to handles on the way in.

use floodnet::flows::{FlowAction, FlowMatch, FlowRule};
use floodnet::platform::{Platform, ProbeReport};
use floodnet::types::MacAddr;
use floodnet::{Error, NodeId, Topology};
use mininet::{MininetSession, TopologySpec};

use log::*;
use std::collections::HashMap;

/// # Emulated Network
///
/// Holds the abstract topology next to the handle of the running mininet session. Created in
/// the stopped state; [`Platform::start`] boots the platform and resolves all hardware
/// addresses, [`Platform::stop`] tears everything down again.
#[derive(Debug)]
pub struct EmulatedNetwork {
    topo: Topology,
    spec: TopologySpec,
    session: Option<MininetSession>,
    macs: HashMap<NodeId, MacAddr>,
}

impl EmulatedNetwork {
    /// Prepare an emulated network for the given topology, without starting it
    pub fn new(topo: Topology) -> Self {
        let spec = topology_spec(&topo);
        Self { topo, spec, session: None, macs: HashMap::new() }
    }

    /// Hand the platform's interactive prompt to the operator. Does nothing if the network is
    /// not running.
    pub fn cli(&mut self) -> Result<(), mininet::Error> {
        match self.session.as_mut() {
            Some(session) => session.interact(),
            None => {
                warn!("The network is not running; there is no prompt to enter");
                Ok(())
            }
        }
    }
}

impl Platform for EmulatedNetwork {
    fn start(&mut self) -> Result<(), Error> {
        if self.session.is_some() {
            return Ok(());
        }
        info!(
            "Starting the emulated network ({} switches, {} hosts, {} links)",
            self.topo.num_switches(),
            self.topo.num_hosts(),
            self.topo.num_links()
        );
        let mut session = MininetSession::start(&self.spec)
            .map_err(|e| Error::PlatformStartError(e.to_string()))?;

        // resolve all hardware addresses once; they are fixed for the session's lifetime
        let mut macs = HashMap::new();
        for host in self.topo.host_list() {
            let mac = match resolve_mac(&mut session, host.name()) {
                Ok(mac) => mac,
                Err(e) => {
                    // the platform is already up; tear it down before surfacing the error
                    if let Err(stop_err) = session.stop() {
                        warn!("Teardown after the failed start also failed: {}", stop_err);
                    }
                    return Err(e);
                }
            };
            debug!("{} was assigned the hardware address {}", host.name(), mac);
            macs.insert(host.id(), mac);
        }

        self.session = Some(session);
        self.macs = macs;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        let session = self
            .session
            .take()
            .ok_or_else(|| Error::PlatformStopError("the network is not running".to_string()))?;
        self.macs.clear();
        info!("Stopping the emulated network");
        session.stop().map_err(|e| Error::PlatformStopError(e.to_string()))
    }

    fn host_mac(&mut self, host: NodeId) -> Result<MacAddr, Error> {
        self.macs
            .get(&host)
            .copied()
            .ok_or_else(|| Error::AddressUnavailableError(self.topo.name(host).to_string()))
    }

    fn clear_flows(&mut self, switch: NodeId) -> Result<(), Error> {
        let name = self.topo.name(switch).to_string();
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| provisioning_err(&name, "del-flows", "the network is not running"))?;
        session.del_flows(&name).map_err(|e| provisioning_err(&name, "del-flows", e))
    }

    fn add_flow(&mut self, switch: NodeId, rule: FlowRule) -> Result<(), Error> {
        let name = self.topo.name(switch).to_string();
        let flow = flow_spec(&rule);
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| provisioning_err(&name, &flow, "the network is not running"))?;
        session.add_flow(&name, &flow).map_err(|e| provisioning_err(&name, &flow, e))
    }

    fn ping_all(&mut self) -> Result<ProbeReport, Error> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| Error::ProbeError("the network is not running".to_string()))?;
        let result = session.ping_all().map_err(|e| Error::ProbeError(e.to_string()))?;

        let mut report = ProbeReport::default();
        for (src, dst, received) in result.pairs {
            let src = self.topo.get_node_id(&src)?;
            let dst = self.topo.get_node_id(&dst)?;
            report.record(src, dst, received);
        }
        Ok(report)
    }
}

fn resolve_mac(session: &mut MininetSession, host: &str) -> Result<MacAddr, Error> {
    let raw = session
        .host_mac(host)
        .map_err(|_| Error::AddressUnavailableError(host.to_string()))?;
    raw.parse()
}

/// Translate the abstract topology into the platform's description
fn topology_spec(topo: &Topology) -> TopologySpec {
    let mut spec = TopologySpec::default();
    for switch in topo.switch_list() {
        spec.switches.push(switch.name().to_string());
    }
    for host in topo.host_list() {
        spec.hosts.push((host.name().to_string(), host.ip().to_string()));
    }
    for (a, b) in topo.links() {
        spec.links.push((topo.name(*a).to_string(), topo.name(*b).to_string()));
    }
    spec
}

/// The `ovs-ofctl` match/action representation of a flow rule. This is the bit-exact surface
/// of the rule-programming channel.
fn flow_spec(rule: &FlowRule) -> String {
    let matcher = match rule.matcher {
        FlowMatch::EtherType(t) => format!("dl_type=0x{:04x}", t),
        FlowMatch::MacPair { src, dst } => format!("dl_src={},dl_dst={}", src, dst),
    };
    let action = match rule.action {
        FlowAction::Flood => "flood",
    };
    format!("{},actions={}", matcher, action)
}

fn provisioning_err(switch: &str, command: &str, reason: impl ToString) -> Error {
    Error::ProvisioningError {
        switch: switch.to_string(),
        command: command.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use floodnet::topologies;

    #[test]
    fn flow_spec_strings() {
        assert_eq!(flow_spec(&FlowRule::arp_broadcast()), "dl_type=0x0806,actions=flood");

        let src: MacAddr = "00:00:00:00:00:01".parse().unwrap();
        let dst: MacAddr = "00:00:00:00:00:02".parse().unwrap();
        assert_eq!(
            flow_spec(&FlowRule::unicast(src, dst)),
            "dl_src=00:00:00:00:00:01,dl_dst=00:00:00:00:00:02,actions=flood"
        );
    }

    #[test]
    fn topology_spec_mapping() {
        let spec = topology_spec(&topologies::lab_net());
        assert_eq!(spec.switches, vec!["s1", "s2", "s3"]);
        assert_eq!(spec.hosts.len(), 5);
        assert_eq!(spec.hosts[0], ("h1".to_string(), "192.168.0.1/28".to_string()));
        assert_eq!(spec.links.len(), 7);
        assert!(spec.links.contains(&("h1".to_string(), "s1".to_string())));
        assert!(spec.links.contains(&("s2".to_string(), "s3".to_string())));
    }

    #[test]
    fn commands_require_running_network() {
        let mut net = EmulatedNetwork::new(topologies::pair_net());
        let s1 = net.topo.get_node_id("s1").unwrap();
        let h1 = net.topo.get_node_id("h1").unwrap();

        assert!(matches!(net.clear_flows(s1), Err(Error::ProvisioningError { .. })));
        assert!(matches!(net.host_mac(h1), Err(Error::AddressUnavailableError(_))));
        assert!(matches!(net.ping_all(), Err(Error::ProbeError(_))));
        assert!(matches!(net.stop(), Err(Error::PlatformStopError(_))));
    }
}
