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
//! The plain-string graph of switches, hosts and links handed to the platform's network
//! constructor. Rendered as the custom topology script `mn --custom` expects.

/// Description of a custom topology. Node names must be valid python identifiers (the usual
/// `s1`/`h1` naming satisfies this), since they double as variable names in the rendered
/// script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologySpec {
    /// Switch names
    pub switches: Vec<String>,
    /// Host names with their static network address (`addr/prefix`)
    pub hosts: Vec<(String, String)>,
    /// Links between named nodes
    pub links: Vec<(String, String)>,
}

impl TopologySpec {
    /// Render the topology as the python script handed to `mn --custom`. The topology is
    /// registered under the name `custom`.
    pub fn render_script(&self) -> String {
        let mut script = String::new();
        script.push_str("from mininet.topo import Topo\n");
        script.push_str("\n\n");
        script.push_str("class CustomTopo(Topo):\n");
        script.push_str("    def build(self):\n");
        for switch in &self.switches {
            script.push_str(&format!("        {} = self.addSwitch('{}')\n", switch, switch));
        }
        for (host, ip) in &self.hosts {
            script.push_str(&format!("        {} = self.addHost('{}', ip='{}')\n", host, host, ip));
        }
        for (a, b) in &self.links {
            script.push_str(&format!("        self.addLink({}, {})\n", a, b));
        }
        script.push_str("\n\n");
        script.push_str("topos = {'custom': (lambda: CustomTopo())}\n");
        script
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pair_spec() -> TopologySpec {
        TopologySpec {
            switches: vec!["s1".to_string()],
            hosts: vec![
                ("h1".to_string(), "10.0.0.1/24".to_string()),
                ("h2".to_string(), "10.0.0.2/24".to_string()),
            ],
            links: vec![
                ("h1".to_string(), "s1".to_string()),
                ("h2".to_string(), "s1".to_string()),
            ],
        }
    }

    #[test]
    fn render_script() {
        let script = pair_spec().render_script();
        assert!(script.starts_with("from mininet.topo import Topo\n"));
        assert!(script.contains("        s1 = self.addSwitch('s1')\n"));
        assert!(script.contains("        h1 = self.addHost('h1', ip='10.0.0.1/24')\n"));
        assert!(script.contains("        h2 = self.addHost('h2', ip='10.0.0.2/24')\n"));
        assert!(script.contains("        self.addLink(h1, s1)\n"));
        assert!(script.contains("        self.addLink(h2, s1)\n"));
        assert!(script.ends_with("topos = {'custom': (lambda: CustomTopo())}\n"));
    }
}
