//! Structural parsing of router configs
//!
//! A config is scanned line by line (see [`scanner`]) in four stages:
//! - hostname: the first `hostname` line
//! - interface block: from an `interface` line to the next one; the first
//!   usable `ip address` inside the block binds it
//! - static route: every `ip route` line with usable operands
//! - OSPF: `router ospf` processes and `network ... area ...` statements
//!
//! Malformed operands skip only the statement they appear in.

pub mod neighbors;
pub mod scanner;
pub mod types;

use tracing::debug;

use crate::normalize::normalize_addresses;
use crate::text::sanitize;

pub use neighbors::parse_neighbor_table;
pub use scanner::{classify, Statement, StatementKind};
pub use types::{InterfaceBinding, ParsedRouter, RouteKey, StaticRoute};

/// Interface block currently being scanned
struct OpenInterface<'a> {
    name: &'a str,
    bound: bool,
}

/// Parse sanitized, normalized config text into its structural model
pub fn parse_config(text: &str) -> ParsedRouter {
    let mut parsed = ParsedRouter::default();
    let mut open: Option<OpenInterface<'_>> = None;

    for (line_no, line) in text.lines().enumerate() {
        match classify(line) {
            Statement::Hostname(name) => {
                if parsed.hostname.is_none() {
                    parsed.hostname = Some(name.to_string());
                }
            }
            Statement::Interface(name) => {
                open = Some(OpenInterface { name, bound: false });
            }
            Statement::IpAddress {
                address,
                mask,
                written,
            } => {
                if let Some(block) = open.as_mut().filter(|block| !block.bound) {
                    block.bound = true;
                    parsed.interfaces.push(InterfaceBinding {
                        interface: block.name.to_string(),
                        address,
                        mask,
                    });
                    parsed.address_tokens.push(written.to_string());
                }
            }
            Statement::IpRoute { route, written } => {
                parsed.route_statements += 1;
                parsed.static_routes.push(route);
                parsed.address_tokens.push(written.to_string());
            }
            Statement::RouterOspf => parsed.runs_ospf = true,
            Statement::OspfNetwork(net) => {
                parsed.ospf_networks.insert(net);
            }
            Statement::Malformed(kind) => {
                if kind == StatementKind::IpRoute {
                    parsed.route_statements += 1;
                }
                debug!(line = line_no + 1, statement = %kind, text = line, "skipping malformed statement");
            }
            Statement::Other => {}
        }
    }

    parsed
}

/// One router's config: raw text, cleaned text, and the parsed model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    id: String,
    raw: String,
    text: String,
    parsed: ParsedRouter,
}

impl RouterConfig {
    /// Sanitize, normalize onto `prefix`, and parse
    pub fn new(id: impl Into<String>, raw: impl Into<String>, prefix: &str) -> Self {
        let raw = raw.into();
        let text = normalize_addresses(&sanitize(&raw), prefix).into_owned();
        let parsed = parse_config(&text);
        Self {
            id: id.into(),
            raw,
            text,
            parsed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Sanitized and normalized text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> &ParsedRouter {
        &self.parsed
    }
}
