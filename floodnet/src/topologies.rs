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

//! # Fixed example topologies
//!
//! All topologies in this module are compile-time constants; building them has no error
//! conditions and no side effects beyond populating the description structure.

use crate::topology::Topology;
use crate::types::Ipv4Net;

/// # Lab network
///
/// The three-switch, five-host network used by the `run` and `check` commands:
///
/// ```text
/// h1 --+                   +-- h4
///      +-- s1 -- s2 -- s3 --+
/// h2 --+         |          +-- h5
///                h3
/// ```
///
/// Hosts carry the static addresses `192.168.0.1/28` through `192.168.0.5/28`.
pub fn lab_net() -> Topology {
    let mut topo = Topology::new();

    // add switches
    let s1 = topo.add_switch("s1");
    let s2 = topo.add_switch("s2");
    let s3 = topo.add_switch("s3");

    // add hosts with their static addresses
    let h1 = topo.add_host("h1", Ipv4Net::new([192, 168, 0, 1], 28));
    let h2 = topo.add_host("h2", Ipv4Net::new([192, 168, 0, 2], 28));
    let h3 = topo.add_host("h3", Ipv4Net::new([192, 168, 0, 3], 28));
    let h4 = topo.add_host("h4", Ipv4Net::new([192, 168, 0, 4], 28));
    let h5 = topo.add_host("h5", Ipv4Net::new([192, 168, 0, 5], 28));

    // host-switch links
    topo.add_link(h1, s1);
    topo.add_link(h2, s1);
    topo.add_link(h3, s2);
    topo.add_link(h4, s3);
    topo.add_link(h5, s3);

    // switch-switch links
    topo.add_link(s1, s2);
    topo.add_link(s2, s3);

    topo
}

/// # Pair network
///
/// The smallest useful topology: two hosts behind a single switch. Used in tests.
pub fn pair_net() -> Topology {
    let mut topo = Topology::new();

    let s1 = topo.add_switch("s1");
    let h1 = topo.add_host("h1", Ipv4Net::new([10, 0, 0, 1], 24));
    let h2 = topo.add_host("h2", Ipv4Net::new([10, 0, 0, 2], 24));

    topo.add_link(h1, s1);
    topo.add_link(h2, s1);

    topo
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::hashmap;
    use std::collections::HashMap;

    #[test]
    fn lab_net_shape() {
        let topo = lab_net();
        assert_eq!(topo.num_switches(), 3);
        assert_eq!(topo.num_hosts(), 5);
        assert_eq!(topo.num_links(), 7);
        assert!(topo.is_connected());
    }

    #[test]
    fn lab_net_addressing() {
        let topo = lab_net();
        let addrs: HashMap<&str, String> =
            topo.host_list().iter().map(|h| (h.name(), h.ip().to_string())).collect();
        assert_eq!(
            addrs,
            hashmap! {
                "h1" => "192.168.0.1/28".to_string(),
                "h2" => "192.168.0.2/28".to_string(),
                "h3" => "192.168.0.3/28".to_string(),
                "h4" => "192.168.0.4/28".to_string(),
                "h5" => "192.168.0.5/28".to_string(),
            }
        );
    }

    #[test]
    fn lab_net_attachment() {
        let topo = lab_net();
        let s1 = topo.get_node_id("s1").unwrap();
        let s2 = topo.get_node_id("s2").unwrap();
        let s3 = topo.get_node_id("s3").unwrap();

        // s2 is the only switch linked to both others
        assert!(topo.neighbors(s2).contains(&s1));
        assert!(topo.neighbors(s2).contains(&s3));
        assert!(!topo.neighbors(s1).contains(&s3));

        // two hosts on s1, one on s2, two on s3
        for (sw, n_hosts) in &[(s1, 2), (s2, 1), (s3, 2)] {
            let hosts =
                topo.neighbors(*sw).iter().filter(|n| topo.get_host(**n).is_some()).count();
            assert_eq!(hosts, *n_hosts);
        }
    }

    #[test]
    fn pair_net_shape() {
        let topo = pair_net();
        assert_eq!(topo.num_switches(), 1);
        assert_eq!(topo.num_hosts(), 2);
        assert_eq!(topo.num_links(), 2);
        assert!(topo.is_connected());
    }
}
