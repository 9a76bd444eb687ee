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

//! # Flow rule model
//!
//! A flow rule is a (match, action) pair installed on a switch. This module defines the two match
//! shapes the rule-programming channel accepts (Ethernet type, and source+destination hardware
//! address) and the pure computation of the pairwise unicast rule set.

use crate::types::MacAddr;
use std::fmt;

/// Ethernet type of address-resolution (ARP) frames
pub const ETHERTYPE_ARP: u16 = 0x0806;
/// Ethernet type of IPv4 frames
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Match predicate of a flow rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowMatch {
    /// Match all frames of the given Ethernet type
    EtherType(u16),
    /// Match all frames with the given source and destination hardware address
    MacPair {
        /// Source hardware address
        src: MacAddr,
        /// Destination hardware address
        dst: MacAddr,
    },
}

impl fmt::Display for FlowMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EtherType(t) => write!(f, "type=0x{:04x}", t),
            Self::MacPair { src, dst } => write!(f, "src={} dst={}", src, dst),
        }
    }
}

/// Action of a flow rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowAction {
    /// Forward the frame out every port except the one it arrived on
    Flood,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flood => write!(f, "flood"),
        }
    }
}

/// A flow rule, installed identically on every switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowRule {
    /// Match predicate
    pub matcher: FlowMatch,
    /// Action for matching frames
    pub action: FlowAction,
}

impl FlowRule {
    /// The single broadcast rule: flood all address-resolution frames
    pub fn arp_broadcast() -> Self {
        Self { matcher: FlowMatch::EtherType(ETHERTYPE_ARP), action: FlowAction::Flood }
    }

    /// A directional unicast rule: flood all frames from `src` to `dst`
    pub fn unicast(src: MacAddr, dst: MacAddr) -> Self {
        Self { matcher: FlowMatch::MacPair { src, dst }, action: FlowAction::Flood }
    }
}

impl fmt::Display for FlowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.matcher, self.action)
    }
}

/// Compute the unicast rule set for the given host hardware addresses: one rule for every
/// ordered pair of distinct addresses, N*(N-1) rules in total. The rule set is symmetric: for
/// every unordered pair, both directional rules are present.
pub fn unicast_rules(macs: &[MacAddr]) -> Vec<FlowRule> {
    let mut rules = Vec::with_capacity(macs.len() * macs.len().saturating_sub(1));
    for (i, src) in macs.iter().enumerate() {
        for (j, dst) in macs.iter().enumerate() {
            if i == j {
                continue;
            }
            rules.push(FlowRule::unicast(*src, *dst));
        }
    }
    rules
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeSet;

    fn macs(n: u8) -> Vec<MacAddr> {
        (1..=n).map(|i| MacAddr([0, 0, 0, 0, 0, i])).collect()
    }

    #[test]
    fn rule_count() {
        for n in &[0u8, 1, 2, 5, 10] {
            let rules = unicast_rules(&macs(*n));
            let n = *n as usize;
            assert_eq!(rules.len(), n * n.saturating_sub(1));
        }
    }

    #[test]
    fn rules_are_symmetric_and_distinct() {
        let rules = unicast_rules(&macs(5));
        let set: BTreeSet<FlowRule> = rules.iter().cloned().collect();
        assert_eq!(set.len(), rules.len());
        for rule in &rules {
            if let FlowMatch::MacPair { src, dst } = rule.matcher {
                assert_ne!(src, dst);
                assert!(set.contains(&FlowRule::unicast(dst, src)));
            } else {
                panic!("unicast_rules produced a non-pair rule: {}", rule);
            }
        }
    }

    #[test]
    fn rule_display() {
        assert_eq!(FlowRule::arp_broadcast().to_string(), "type=0x0806 -> flood");
        let rule = FlowRule::unicast(MacAddr([0, 0, 0, 0, 0, 1]), MacAddr([0, 0, 0, 0, 0, 2]));
        assert_eq!(rule.to_string(), "src=00:00:00:00:00:01 dst=00:00:00:00:00:02 -> flood");
    }
}
