//! OSPF neighbor-table dumps (`show ip ospf neighbor` output)

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use crate::net::parse_dotted_quad;
use crate::text::tokens;

const HEADER_PREFIX: &str = "neighbor id";

/// Column holding the neighbor's interface address
const ADDRESS_COLUMN: usize = 4;

/// Collect neighbor addresses from a neighbor-table dump.
///
/// Blank lines and the `Neighbor ID ...` header are skipped. A data row is
/// any line with at least five columns whose fifth column is an address.
pub fn parse_neighbor_table(output: &str) -> BTreeSet<Ipv4Addr> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_header(line))
        .filter_map(|line| {
            tokens(line)
                .get(ADDRESS_COLUMN)
                .and_then(|column| parse_dotted_quad(column))
        })
        .collect()
}

fn is_header(line: &str) -> bool {
    line.get(..HEADER_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(HEADER_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
Neighbor ID     Pri   State           Dead Time   Address         Interface
10.0.1.1          1   FULL/DR         00:00:33    10.0.0.2        GigabitEthernet0/0

10.0.3.1          1   FULL/BDR        00:00:31    10.0.2.2        GigabitEthernet0/1";

    #[test]
    fn test_parse_neighbor_table() {
        let neighbors = parse_neighbor_table(DUMP);
        let expected: BTreeSet<Ipv4Addr> = ["10.0.0.2", "10.0.2.2"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_short_and_non_address_rows_skipped() {
        let dump = "R1#show ip ospf neighbor\n10.0.1.1 1 FULL/DR 00:00:33\nfoo bar baz qux not-an-ip";
        assert!(parse_neighbor_table(dump).is_empty());
    }

    #[test]
    fn test_empty_dump() {
        assert!(parse_neighbor_table("").is_empty());
    }
}
