//! Line classification for router configs
//!
//! Each sanitized line is tokenized and matched against a fixed set of
//! statement shapes. Keywords compare case-insensitively; operands are
//! parsed as dotted quads, and a statement whose operands do not parse is
//! reported as malformed rather than guessed at.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::net::{mask_to_cidr, parse_dotted_quad, wildcard_network};
use crate::text::tokens;

use super::types::StaticRoute;

/// One recognised config statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `hostname <name>`
    Hostname(&'a str),
    /// `interface <name>`, opens an interface block
    Interface(&'a str),
    /// `ip address <addr> <mask>`, with the address as written
    IpAddress {
        address: Ipv4Addr,
        mask: Ipv4Addr,
        written: &'a str,
    },
    /// `ip route <dest> <mask> <next-hop> ...`, with the next-hop as written
    IpRoute { route: StaticRoute, written: &'a str },
    /// `router ospf ...`
    RouterOspf,
    /// `network <addr> <wildcard> area <id>`
    OspfNetwork(Ipv4Net),
    /// A recognised keyword whose operands are unusable
    Malformed(StatementKind),
    /// Anything else
    Other,
}

/// Statement families, used to report malformed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    IpAddress,
    IpRoute,
    OspfNetwork,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::IpAddress => write!(f, "ip address"),
            StatementKind::IpRoute => write!(f, "ip route"),
            StatementKind::OspfNetwork => write!(f, "network"),
        }
    }
}

fn keyword(token: Option<&&str>, expected: &str) -> bool {
    token.is_some_and(|t| t.eq_ignore_ascii_case(expected))
}

/// Classify a single sanitized line
pub fn classify(line: &str) -> Statement<'_> {
    let toks = tokens(line);
    let first = toks.first();
    let second = toks.get(1);

    if keyword(first, "hostname") {
        return match second {
            Some(name) => Statement::Hostname(*name),
            None => Statement::Other,
        };
    }

    if keyword(first, "interface") {
        return match second {
            Some(name) => Statement::Interface(*name),
            None => Statement::Other,
        };
    }

    if keyword(first, "ip") && keyword(second, "address") {
        return classify_ip_address(&toks);
    }

    if keyword(first, "ip") && keyword(second, "route") {
        return classify_ip_route(&toks);
    }

    if keyword(first, "router") && keyword(second, "ospf") {
        return Statement::RouterOspf;
    }

    if keyword(first, "network") {
        return classify_network(&toks);
    }

    Statement::Other
}

fn classify_ip_address<'a>(toks: &[&'a str]) -> Statement<'a> {
    let (Some(&written), Some(&mask)) = (toks.get(2), toks.get(3)) else {
        return Statement::Malformed(StatementKind::IpAddress);
    };
    match parse_dotted_quad(written).zip(parse_dotted_quad(mask)) {
        Some((address, mask)) => Statement::IpAddress {
            address,
            mask,
            written,
        },
        None => Statement::Malformed(StatementKind::IpAddress),
    }
}

fn classify_ip_route<'a>(toks: &[&'a str]) -> Statement<'a> {
    if toks.len() < 5 {
        return Statement::Malformed(StatementKind::IpRoute);
    }
    let parsed = (
        parse_dotted_quad(toks[2]),
        parse_dotted_quad(toks[3]),
        parse_dotted_quad(toks[4]),
    );
    match parsed {
        (Some(destination), Some(mask), Some(next_hop)) => Statement::IpRoute {
            route: StaticRoute {
                destination,
                prefix_len: mask_to_cidr(mask),
                next_hop,
            },
            written: toks[4],
        },
        _ => Statement::Malformed(StatementKind::IpRoute),
    }
}

fn classify_network<'a>(toks: &[&'a str]) -> Statement<'a> {
    // network <addr> <wildcard> area <id>
    if toks.len() < 5 || !keyword(toks.get(3), "area") {
        return Statement::Other;
    }
    let network = parse_dotted_quad(toks[1])
        .zip(parse_dotted_quad(toks[2]))
        .and_then(|(address, wildcard)| wildcard_network(address, wildcard));
    match network {
        Some(net) => Statement::OspfNetwork(net),
        None => Statement::Malformed(StatementKind::OspfNetwork),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_hostname() {
        assert_eq!(classify("hostname R1"), Statement::Hostname("R1"));
        assert_eq!(classify("HOSTNAME Core"), Statement::Hostname("Core"));
        assert_eq!(classify("hostname"), Statement::Other);
    }

    #[test]
    fn test_classify_interface() {
        assert_eq!(
            classify("interface GigabitEthernet0/0"),
            Statement::Interface("GigabitEthernet0/0")
        );
    }

    #[test]
    fn test_classify_ip_address() {
        assert_eq!(
            classify("IP Address 10.0.0.1 255.255.255.0"),
            Statement::IpAddress {
                address: "10.0.0.1".parse().unwrap(),
                mask: "255.255.255.0".parse().unwrap(),
                written: "10.0.0.1",
            }
        );
        assert_eq!(
            classify("ip address dhcp"),
            Statement::Malformed(StatementKind::IpAddress)
        );
    }

    #[test]
    fn test_classify_ip_route_uses_positional_tokens() {
        let stmt = classify("ip route 10.0.1.0 255.255.255.0 10.0.0.2 200 name lan");
        assert_eq!(
            stmt,
            Statement::IpRoute {
                route: StaticRoute {
                    destination: "10.0.1.0".parse().unwrap(),
                    prefix_len: 24,
                    next_hop: "10.0.0.2".parse().unwrap(),
                },
                written: "10.0.0.2",
            }
        );
    }

    #[test]
    fn test_classify_short_or_bad_route_is_malformed() {
        assert_eq!(
            classify("ip route 10.0.1.0 255.255.255.0"),
            Statement::Malformed(StatementKind::IpRoute)
        );
        assert_eq!(
            classify("ip route 10.0.1.0 255.255.255.0 Serial0/0"),
            Statement::Malformed(StatementKind::IpRoute)
        );
    }

    #[test]
    fn test_classify_router_ospf() {
        assert_eq!(classify("router ospf 1"), Statement::RouterOspf);
        assert_eq!(classify("Router OSPF 10"), Statement::RouterOspf);
    }

    #[test]
    fn test_classify_network_statement() {
        match classify("network 10.0.1.0 0.0.0.255 area 0") {
            Statement::OspfNetwork(net) => assert_eq!(net.to_string(), "10.0.1.0/24"),
            other => panic!("unexpected statement: {:?}", other),
        }
        assert_eq!(classify("network 10.0.1.0 0.0.0.255"), Statement::Other);
        assert_eq!(
            classify("network 10.0.1.0 0.0.255.0 area 0"),
            Statement::Malformed(StatementKind::OspfNetwork)
        );
    }
}
