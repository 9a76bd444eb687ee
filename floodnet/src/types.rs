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

//! Module containing all type definitions

use crate::topology::{Host, Switch};
use crate::Error;

use petgraph::prelude::*;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

type IndexType = u32;
/// Node identification (and index into the topology graph). Switches and hosts are addressed by
/// this opaque handle everywhere inside the library; name strings only appear on the
/// platform-facing surface and in log messages.
pub type NodeId = NodeIndex<IndexType>;

/// Hardware (Ethernet) address of a host interface. Hardware addresses are assigned by the
/// platform when the emulated network starts; they are never part of the topology description.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// The broadcast address `ff:ff:ff:ff:ff:ff`
    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);

    /// Return the six octets of the address
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 6 {
            return Err(Error::InvalidMacAddr(s.to_string()));
        }
        let mut octets = [0u8; 6];
        for (octet, part) in octets.iter_mut().zip(parts) {
            *octet =
                u8::from_str_radix(part, 16).map_err(|_| Error::InvalidMacAddr(s.to_string()))?;
        }
        Ok(Self(octets))
    }
}

/// Static network address of a host, with prefix length (e.g. `192.168.0.1/28`)
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct Ipv4Net {
    /// The address itself
    pub addr: Ipv4Addr,
    /// The prefix length
    pub prefix_len: u8,
}

impl Ipv4Net {
    /// Create a new address from octets and prefix length
    pub fn new(octets: [u8; 4], prefix_len: u8) -> Self {
        Self { addr: octets.into(), prefix_len }
    }
}

impl fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

/// # Network Node (similar to `Option`)
/// Result of a node lookup in the topology. This struct behaves similar to an `Option`, but it
/// knows two different `Some` values, the `Switch` and the `Host`.
#[derive(Debug)]
pub enum NetworkNode<'a> {
    /// An emulated layer-2 forwarding device
    Switch(&'a Switch),
    /// An emulated network endpoint
    Host(&'a Host),
    /// None was found
    None,
}

impl<'a> NetworkNode<'a> {
    /// Returns the switch or **panics**, if the enum is not a `NetworkNode::Switch`
    pub fn unwrap_switch(self) -> &'a Switch {
        match self {
            Self::Switch(s) => s,
            Self::Host(_) => panic!("`unwrap_switch()` called on a `NetworkNode::Host`"),
            Self::None => panic!("`unwrap_switch()` called on a `NetworkNode::None`"),
        }
    }

    /// Returns the host or **panics**, if the enum is not a `NetworkNode::Host`
    pub fn unwrap_host(self) -> &'a Host {
        match self {
            Self::Switch(_) => panic!("`unwrap_host()` called on a `NetworkNode::Switch`"),
            Self::Host(h) => h,
            Self::None => panic!("`unwrap_host()` called on a `NetworkNode::None`"),
        }
    }

    /// Returns true if and only if self contains a switch.
    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch(_))
    }

    /// Returns true if and only if self contains a host.
    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host(_))
    }

    /// Returns true if and only if self contains `NetworkNode::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Maps the `NetworkNode` to an option, with `Some(s)` only if self is `Switch`.
    pub fn switch(self) -> Option<&'a Switch> {
        match self {
            Self::Switch(s) => Some(s),
            _ => None,
        }
    }

    /// Maps the `NetworkNode` to an option, with `Some(h)` only if self is `Host`.
    pub fn host(self) -> Option<&'a Host> {
        match self {
            Self::Host(h) => Some(h),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mac_addr_display() {
        let mac = MacAddr([0x00, 0x00, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(mac.to_string(), "00:00:00:00:00:01");
        assert_eq!(MacAddr::BROADCAST.to_string(), "ff:ff:ff:ff:ff:ff");
    }

    #[test]
    fn mac_addr_from_str() {
        let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(mac, MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]));
        assert_eq!("00:00:00:00:00:01\n".parse::<MacAddr>().unwrap().octets()[5], 1);
        assert!("aa:bb:cc:dd:ee".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:gg".parse::<MacAddr>().is_err());
    }

    #[test]
    fn ipv4_net_display() {
        assert_eq!(Ipv4Net::new([192, 168, 0, 1], 28).to_string(), "192.168.0.1/28");
    }
}
