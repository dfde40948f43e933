//! Cohort address normalization
//!
//! Each student addresses their lab as `2MM.DD.x.y`, derived from their
//! birthday. Rewriting that `2xx.yy` head onto one shared prefix lets master
//! and student configs be compared address for address. This is a text
//! substitution: `2xx.yy.x.y` is matched lexically, not parsed.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::bail_invalid;
use crate::error::Result;

static COHORT_ADDRESS: OnceLock<Regex> = OnceLock::new();
static CONVENTION_ADDRESS: OnceLock<Regex> = OnceLock::new();
static PREFIX_SHAPE: OnceLock<Regex> = OnceLock::new();

fn cohort_address() -> &'static Regex {
    COHORT_ADDRESS.get_or_init(|| {
        Regex::new(r"\b2\d{2}\.\d{2}\.(\d+\.\d+)\b").expect("cohort address pattern is valid")
    })
}

fn convention_address() -> &'static Regex {
    CONVENTION_ADDRESS.get_or_init(|| {
        Regex::new(r"^2\d{2}\.\d{2}\.\d+\.\d+$").expect("convention address pattern is valid")
    })
}

fn prefix_shape() -> &'static Regex {
    PREFIX_SHAPE
        .get_or_init(|| Regex::new(r"^\d{1,3}\.\d{1,3}$").expect("prefix pattern is valid"))
}

/// Rewrite every `2xx.yy.A.B` address in `text` to `{prefix}.A.B`.
pub fn normalize_addresses<'a>(text: &'a str, prefix: &str) -> Cow<'a, str> {
    cohort_address().replace_all(text, |caps: &regex::Captures<'_>| {
        format!("{}.{}", prefix, &caps[1])
    })
}

/// Check that an address prefix has the two-octet `A.B` shape.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if !prefix_shape().is_match(prefix) {
        bail_invalid!("address prefix", prefix);
    }
    Ok(())
}

/// Whether an address follows the assignment's addressing convention.
///
/// After normalization a conforming address either still has the
/// `2xx.yy.*.*` shape or starts with the normalization prefix.
pub fn follows_convention(address: &str, prefix: &str) -> bool {
    if convention_address().is_match(address) {
        return true;
    }
    address
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('.'))
}
