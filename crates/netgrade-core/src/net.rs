//! Dotted-quad helpers shared by the parser and the topology builder

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

/// Parse a dotted-quad token, `None` when it is not a valid IPv4 address.
///
/// Octets are read as decimal with leading zeros allowed, so cohort
/// addresses such as `212.05.1.1` parse as `212.5.1.1`.
pub fn parse_dotted_quad(token: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = token.split('.');
    for octet in &mut octets {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

/// Prefix length of a subnet mask, counted as its number of set bits.
///
/// Non-contiguous masks are accepted and counted the same way.
pub fn mask_to_cidr(mask: Ipv4Addr) -> u8 {
    u32::from(mask).count_ones() as u8
}

/// Subnet an interface sits on, `None` for a non-contiguous mask
pub fn interface_subnet(address: Ipv4Addr, mask: Ipv4Addr) -> Option<Ipv4Net> {
    Ipv4Net::with_netmask(address, mask)
        .ok()
        .map(|net| net.trunc())
}

/// Canonical network advertised by an OSPF `network <addr> <wildcard>` pair.
///
/// The network is `addr & !wildcard` with prefix `32 - popcount(wildcard)`.
/// Wildcards that do not describe a contiguous block leave host bits set and
/// yield `None`.
pub fn wildcard_network(address: Ipv4Addr, wildcard: Ipv4Addr) -> Option<Ipv4Net> {
    let wildcard_bits = u32::from(wildcard);
    let network = Ipv4Addr::from(u32::from(address) & !wildcard_bits);
    let prefix = 32 - wildcard_bits.count_ones() as u8;

    let net = Ipv4Net::new(network, prefix).ok()?;
    (net.trunc() == net).then_some(net)
}
