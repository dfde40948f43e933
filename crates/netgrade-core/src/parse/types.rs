//! Parsed router model

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::net::interface_subnet;

/// An `ip address` bound to a named interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBinding {
    pub interface: String,
    pub address: Ipv4Addr,
    pub mask: Ipv4Addr,
}

impl InterfaceBinding {
    /// Subnet the interface sits on, `None` for a non-contiguous mask
    pub fn subnet(&self) -> Option<Ipv4Net> {
        interface_subnet(self.address, self.mask)
    }
}

/// A static route, with the mask reduced to its prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticRoute {
    pub destination: Ipv4Addr,
    pub prefix_len: u8,
    pub next_hop: Ipv4Addr,
}

impl StaticRoute {
    /// Destination + prefix identity, shared by routes that only differ in next-hop
    pub fn key(&self) -> RouteKey {
        RouteKey {
            destination: self.destination,
            prefix_len: self.prefix_len,
        }
    }
}

/// Destination + prefix length of a static route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub destination: Ipv4Addr,
    pub prefix_len: u8,
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.destination, self.prefix_len)
    }
}

/// Everything the grader reads out of one router's config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRouter {
    pub hostname: Option<String>,
    pub interfaces: Vec<InterfaceBinding>,
    pub static_routes: Vec<StaticRoute>,
    /// Interface addresses and route next-hops exactly as written
    pub address_tokens: Vec<String>,
    /// Count of `ip route` lines, including ones too malformed to keep
    pub route_statements: usize,
    pub runs_ospf: bool,
    pub ospf_networks: BTreeSet<Ipv4Net>,
}

impl ParsedRouter {
    /// Subnets of all interfaces; interfaces with unusable masks are left out
    pub fn subnets(&self) -> BTreeSet<Ipv4Net> {
        self.interfaces
            .iter()
            .filter_map(InterfaceBinding::subnet)
            .collect()
    }

    /// Interface address per subnet; a later interface on the same subnet wins
    pub fn address_by_subnet(&self) -> BTreeMap<Ipv4Net, Ipv4Addr> {
        self.interfaces
            .iter()
            .filter_map(|binding| binding.subnet().map(|net| (net, binding.address)))
            .collect()
    }

    /// Static routes grouped by destination + prefix, next-hops in config order
    pub fn routes_by_key(&self) -> BTreeMap<RouteKey, Vec<Ipv4Addr>> {
        let mut grouped: BTreeMap<RouteKey, Vec<Ipv4Addr>> = BTreeMap::new();
        for route in &self.static_routes {
            grouped.entry(route.key()).or_default().push(route.next_hop);
        }
        grouped
    }

    pub fn has_static_routes(&self) -> bool {
        self.route_statements > 0
    }
}
