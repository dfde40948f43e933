//! Topology inference from interface subnets
//!
//! Two routers are linked when their interface subnet sets intersect. The
//! edge map holds a single subnet per router pair: when a pair shares more
//! than one subnet, subnets are written in ascending order and the highest
//! one is kept. Parallel links between the same two routers therefore
//! collapse into one edge.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Serialize, Serializer};

use crate::extract::ConfigSet;
use crate::graph::all_reachable;
use crate::parse::RouterConfig;

/// Order-independent identity of a link between two routers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: String,
    high: String,
}

impl EdgeKey {
    /// Build the key; the pair is sorted so `(a, b)` and `(b, a)` are equal
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Router pair → shared subnet
pub type EdgeMap = BTreeMap<EdgeKey, Ipv4Net>;

/// Router id → interface subnets, in router order
pub type SubnetMap<'a> = Vec<(&'a str, BTreeSet<Ipv4Net>)>;

/// Interface subnets of one router
pub fn subnets_of(router: &RouterConfig) -> BTreeSet<Ipv4Net> {
    router.parsed().subnets()
}

/// Subnets of every router, keeping router order
pub fn subnet_map<'a, I>(routers: I) -> SubnetMap<'a>
where
    I: IntoIterator<Item = &'a RouterConfig>,
{
    routers
        .into_iter()
        .map(|router| (router.id(), subnets_of(router)))
        .collect()
}

/// Link every pair of distinct routers whose subnet sets intersect
pub fn build_edges(subnets: &SubnetMap<'_>) -> EdgeMap {
    let mut edges = EdgeMap::new();
    for (i, (left_id, left)) in subnets.iter().enumerate() {
        for (right_id, right) in &subnets[i + 1..] {
            if left_id == right_id {
                continue;
            }
            for shared in left.intersection(right) {
                edges.insert(EdgeKey::new(left_id, right_id), *shared);
            }
        }
    }
    edges
}

/// Peer addresses each router should see as directly connected.
///
/// For every edge, both endpoints' interface addresses on the shared subnet
/// are looked up; when both are known each router gains the other's address.
/// Every router in `routers` gets an entry, possibly empty.
pub fn expected_neighbors<'a, I>(routers: I, edges: &EdgeMap) -> BTreeMap<String, BTreeSet<Ipv4Addr>>
where
    I: IntoIterator<Item = &'a RouterConfig>,
{
    let addresses: BTreeMap<&str, BTreeMap<Ipv4Net, Ipv4Addr>> = routers
        .into_iter()
        .map(|router| (router.id(), router.parsed().address_by_subnet()))
        .collect();

    let mut neighbors: BTreeMap<String, BTreeSet<Ipv4Addr>> = addresses
        .keys()
        .map(|id| (id.to_string(), BTreeSet::new()))
        .collect();

    for (key, net) in edges {
        let (a, b) = key.endpoints();
        let ip_a = addresses.get(a).and_then(|by_net| by_net.get(net));
        let ip_b = addresses.get(b).and_then(|by_net| by_net.get(net));
        if let (Some(ip_a), Some(ip_b)) = (ip_a, ip_b) {
            neighbors.entry(a.to_string()).or_default().insert(*ip_b);
            neighbors.entry(b.to_string()).or_default().insert(*ip_a);
        }
    }

    neighbors
}

/// Inferred topology of a single submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReport {
    /// Router id → interface subnets, in submission order
    #[serde(serialize_with = "ordered_subnets")]
    pub routers: Vec<(String, BTreeSet<Ipv4Net>)>,
    pub edges: EdgeMap,
    pub connected: bool,
}

/// Parse every config of a submission and infer its links
pub fn survey(configs: &ConfigSet, prefix: &str) -> TopologyReport {
    let routers: Vec<RouterConfig> = configs
        .iter()
        .map(|(id, text)| RouterConfig::new(id, text, prefix))
        .collect();
    let subnets = subnet_map(&routers);
    let edges = build_edges(&subnets);
    TopologyReport {
        connected: all_reachable(&edges),
        routers: subnets
            .into_iter()
            .map(|(id, nets)| (id.to_string(), nets))
            .collect(),
        edges,
    }
}

fn ordered_subnets<S: Serializer>(
    routers: &[(String, BTreeSet<Ipv4Net>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(routers.len()))?;
    for (id, nets) in routers {
        map.serialize_entry(id, nets)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(id: &str, body: &str) -> RouterConfig {
        RouterConfig::new(id, body, "10.0")
    }

    fn triangle() -> Vec<RouterConfig> {
        vec![
            router(
                "R1.txt",
                "interface g0\nip address 10.0.12.1 255.255.255.0\ninterface g1\nip address 10.0.13.1 255.255.255.0",
            ),
            router(
                "R2.txt",
                "interface g0\nip address 10.0.12.2 255.255.255.0\ninterface g1\nip address 10.0.23.2 255.255.255.0",
            ),
            router(
                "R3.txt",
                "interface g0\nip address 10.0.13.3 255.255.255.0\ninterface g1\nip address 10.0.23.3 255.255.255.0",
            ),
        ]
    }

    #[test]
    fn test_edge_key_is_order_independent() {
        for (a, b) in [("R1", "R2"), ("core", "edge"), ("x", "x"), ("B", "a")] {
            assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
            assert_eq!(EdgeKey::new(a, b).to_string(), EdgeKey::new(b, a).to_string());
        }
        assert_eq!(EdgeKey::new("R2", "R1").to_string(), "R1-R2");
    }

    #[test]
    fn test_build_edges_triangle() {
        let routers = triangle();
        let edges = build_edges(&subnet_map(&routers));
        assert_eq!(edges.len(), 3);
        assert_eq!(
            edges[&EdgeKey::new("R1.txt", "R2.txt")].to_string(),
            "10.0.12.0/24"
        );
        assert_eq!(
            edges[&EdgeKey::new("R3.txt", "R2.txt")].to_string(),
            "10.0.23.0/24"
        );
    }

    #[test]
    fn test_build_edges_collapses_parallel_links() {
        let routers = vec![
            router(
                "A",
                "interface g0\nip address 10.0.1.1 255.255.255.0\ninterface g1\nip address 10.0.2.1 255.255.255.0",
            ),
            router(
                "B",
                "interface g0\nip address 10.0.1.2 255.255.255.0\ninterface g1\nip address 10.0.2.2 255.255.255.0",
            ),
        ];
        let edges = build_edges(&subnet_map(&routers));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[&EdgeKey::new("A", "B")].to_string(), "10.0.2.0/24");
    }

    #[test]
    fn test_no_shared_subnet_no_edge() {
        let routers = vec![
            router("A", "interface g0\nip address 10.0.1.1 255.255.255.0"),
            router("B", "interface g0\nip address 10.0.2.1 255.255.255.0"),
        ];
        assert!(build_edges(&subnet_map(&routers)).is_empty());
    }

    #[test]
    fn test_expected_neighbors() {
        let routers = triangle();
        let edges = build_edges(&subnet_map(&routers));
        let neighbors = expected_neighbors(&routers, &edges);

        let r1: Vec<String> = neighbors["R1.txt"].iter().map(|a| a.to_string()).collect();
        assert_eq!(r1, vec!["10.0.12.2", "10.0.13.3"]);
        assert_eq!(neighbors["R2.txt"].len(), 2);
    }

    #[test]
    fn test_expected_neighbors_later_interface_wins() {
        let routers = vec![
            router(
                "A",
                "interface g0\nip address 10.0.1.1 255.255.255.0\ninterface g1\nip address 10.0.1.5 255.255.255.0",
            ),
            router("B", "interface g0\nip address 10.0.1.2 255.255.255.0"),
        ];
        let edges = build_edges(&subnet_map(&routers));
        let neighbors = expected_neighbors(&routers, &edges);

        let b: Vec<String> = neighbors["B"].iter().map(|a| a.to_string()).collect();
        assert_eq!(b, vec!["10.0.1.5"]);
        let a: Vec<String> = neighbors["A"].iter().map(|a| a.to_string()).collect();
        assert_eq!(a, vec!["10.0.1.2"]);
    }

    #[test]
    fn test_expected_neighbors_isolated_router_has_empty_set() {
        let routers = vec![router("A", "hostname A")];
        let neighbors = expected_neighbors(&routers, &EdgeMap::new());
        assert!(neighbors["A"].is_empty());
    }

    #[test]
    fn test_edge_key_serializes_as_string() {
        let mut edges = EdgeMap::new();
        edges.insert(EdgeKey::new("R2", "R1"), "10.0.0.0/24".parse().unwrap());
        let json = serde_json::to_string(&edges).unwrap();
        assert_eq!(json, r#"{"R1-R2":"10.0.0.0/24"}"#);
    }

    #[test]
    fn test_survey_reports_partition() {
        let configs: ConfigSet = [
            ("A.txt", "interface g0\nip address 10.0.1.1 255.255.255.0"),
            ("B.txt", "interface g0\nip address 10.0.1.2 255.255.255.0"),
            ("C.txt", "interface g0\nip address 10.0.3.1 255.255.255.0"),
            ("D.txt", "interface g0\nip address 10.0.3.2 255.255.255.0"),
        ]
        .into_iter()
        .collect();
        let report = survey(&configs, "10.0");
        assert_eq!(report.routers.len(), 4);
        assert_eq!(report.routers[0].0, "A.txt");
        assert_eq!(report.edges.len(), 2);
        assert!(!report.connected);
    }
}
