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

//! # Topology description
//!
//! This module represents the static graph of switches, hosts and links which is handed to the
//! emulation platform. The topology is pure declarative data: it owns no live resource, and it
//! never changes once the network is started.

use crate::types::{Ipv4Net, NetworkNode, NodeId};
use crate::Error;

use petgraph::algo::connected_components;
use petgraph::prelude::*;
use std::collections::HashMap;

type TopologyGraph = UnGraph<(), (), u32>;

/// An emulated layer-2 forwarding device, exposing a rule-programming channel once the network
/// is running.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    id: NodeId,
    name: String,
}

impl Switch {
    /// Node id of the switch
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Name of the switch
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// An emulated network endpoint with a static, user-specified network address. The hardware
/// address is *not* stored here: it is assigned by the platform at start time and must be
/// queried through the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    id: NodeId,
    name: String,
    ip: Ipv4Net,
}

impl Host {
    /// Node id of the host
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Name of the host
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Static network address of the host
    pub fn ip(&self) -> Ipv4Net {
        self.ip
    }
}

/// # Topology
///
/// The static graph of switches, hosts and undirected links. Nodes are referenced by [`NodeId`]
/// handles returned at build time; names are only used for display and on the platform-facing
/// surface.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: TopologyGraph,
    switches: HashMap<NodeId, Switch>,
    hosts: HashMap<NodeId, Host>,
    links: Vec<(NodeId, NodeId)>,
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new switch. This function returns the id of the switch, which can be used to
    /// reference it in all later operations.
    pub fn add_switch<S: Into<String>>(&mut self, name: S) -> NodeId {
        let id = self.graph.add_node(());
        self.switches.insert(id, Switch { id, name: name.into() });
        id
    }

    /// Add a new host with its static network address. This function returns the id of the
    /// host, which can be used to reference it in all later operations.
    pub fn add_host<S: Into<String>>(&mut self, name: S, ip: Ipv4Net) -> NodeId {
        let id = self.graph.add_node(());
        self.hosts.insert(id, Host { id, name: name.into(), ip });
        id
    }

    /// Add an undirected link between two nodes (host--switch or switch--switch)
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        self.graph.add_edge(a, b, ());
        self.links.push((a, b));
    }

    /// Look a node up by id
    pub fn get_node(&self, id: NodeId) -> NetworkNode<'_> {
        if let Some(s) = self.switches.get(&id) {
            NetworkNode::Switch(s)
        } else if let Some(h) = self.hosts.get(&id) {
            NetworkNode::Host(h)
        } else {
            NetworkNode::None
        }
    }

    /// Look a node up by name
    pub fn get_node_id(&self, name: impl AsRef<str>) -> Result<NodeId, Error> {
        let name = name.as_ref();
        self.switches
            .values()
            .map(|s| (s.id, s.name.as_str()))
            .chain(self.hosts.values().map(|h| (h.id, h.name.as_str())))
            .find(|(_, n)| *n == name)
            .map(|(id, _)| id)
            .ok_or_else(|| Error::DeviceNameNotFound(name.to_string()))
    }

    /// Look a switch up by id
    pub fn get_switch(&self, id: NodeId) -> Option<&Switch> {
        self.switches.get(&id)
    }

    /// Look a host up by id
    pub fn get_host(&self, id: NodeId) -> Option<&Host> {
        self.hosts.get(&id)
    }

    /// Display name of a node (`?` if the id is unknown)
    pub fn name(&self, id: NodeId) -> &str {
        match self.get_node(id) {
            NetworkNode::Switch(s) => s.name(),
            NetworkNode::Host(h) => h.name(),
            NetworkNode::None => "?",
        }
    }

    /// All switch ids, ordered by node index
    pub fn switches(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.switches.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All host ids, ordered by node index
    pub fn hosts(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.hosts.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All switches, ordered by node index
    pub fn switch_list(&self) -> Vec<&Switch> {
        let mut switches: Vec<&Switch> = self.switches.values().collect();
        switches.sort_by_key(|s| s.id);
        switches
    }

    /// All hosts, ordered by node index
    pub fn host_list(&self) -> Vec<&Host> {
        let mut hosts: Vec<&Host> = self.hosts.values().collect();
        hosts.sort_by_key(|h| h.id);
        hosts
    }

    /// All links, in declaration order
    pub fn links(&self) -> &[(NodeId, NodeId)] {
        &self.links
    }

    /// All direct neighbors of a node
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.graph.neighbors(id).collect()
    }

    /// Number of switches
    pub fn num_switches(&self) -> usize {
        self.switches.len()
    }

    /// Number of hosts
    pub fn num_hosts(&self) -> usize {
        self.hosts.len()
    }

    /// Number of links
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Returns true if and only if every node can reach every other node over some path of
    /// links.
    pub fn is_connected(&self) -> bool {
        self.graph.node_count() == 0 || connected_components(&self.graph) == 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_and_lookup() {
        let mut topo = Topology::new();
        let s1 = topo.add_switch("s1");
        let h1 = topo.add_host("h1", Ipv4Net::new([10, 0, 0, 1], 24));
        topo.add_link(h1, s1);

        assert!(topo.get_node(s1).is_switch());
        assert!(topo.get_node(h1).is_host());
        assert_eq!(topo.get_node(s1).unwrap_switch().name(), "s1");
        assert_eq!(topo.get_node(h1).unwrap_host().ip().to_string(), "10.0.0.1/24");
        assert_eq!(topo.get_node(s1).switch().map(|s| s.name()), Some("s1"));
        assert_eq!(topo.get_node(s1).host().map(|h| h.name()), None);
        assert_eq!(topo.get_node(h1).host().map(|h| h.name()), Some("h1"));
        assert!(topo.get_node(NodeId::new(7)).is_none());

        assert_eq!(topo.get_node_id("s1").unwrap(), s1);
        assert_eq!(topo.get_node_id("h1").unwrap(), h1);
        assert_eq!(
            topo.get_node_id("h9"),
            Err(Error::DeviceNameNotFound("h9".to_string()))
        );

        assert_eq!(topo.name(s1), "s1");
        assert_eq!(topo.neighbors(h1), vec![s1]);
    }

    #[test]
    fn connectivity() {
        let mut topo = Topology::new();
        let s1 = topo.add_switch("s1");
        let s2 = topo.add_switch("s2");
        let h1 = topo.add_host("h1", Ipv4Net::new([10, 0, 0, 1], 24));
        topo.add_link(h1, s1);
        assert!(!topo.is_connected());
        topo.add_link(s1, s2);
        assert!(topo.is_connected());
    }
}
