//! Rubric type definitions

use serde::{Deserialize, Serialize};

/// Current rubric format version
pub const RUBRIC_FORMAT_VERSION: u32 = 1;

/// Deduction amounts and caps applied while grading.
///
/// Every penalty in the comparator is read from here; nothing is hard-coded
/// at the call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    /// Rubric format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Missing or default (`router`) hostname
    #[serde(default = "default_hostname_deduction")]
    pub hostname_deduction: f64,

    /// Per interface whose mask is not the expected prefix length
    #[serde(default = "default_mask_deduction")]
    pub mask_deduction_per_iface: f64,

    /// Prefix length every student interface mask must reduce to
    #[serde(default = "default_expected_mask_prefix")]
    pub expected_mask_prefix: u8,

    /// Per address outside the assignment's addressing convention
    #[serde(default = "default_format_deduction")]
    pub format_deduction_per_address: f64,

    /// Static routing strategy
    #[serde(default)]
    pub static_routing: StaticRubric,

    /// OSPF strategy
    #[serde(default)]
    pub ospf: OspfRubric,

    /// Global topology comparison
    #[serde(default)]
    pub topology: TopologyRubric,
}

/// Rubric for static-route assignments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRubric {
    /// Ceiling for the combined missing/incorrect/multi-hop deduction
    #[serde(default = "default_static_missing_cap")]
    pub missing_cap: f64,

    /// Fraction of a route's weight kept when only the next-hop is wrong
    #[serde(default = "default_next_hop_credit")]
    pub next_hop_credit: f64,

    /// Fraction of a route's weight kept when the destination has another mask
    #[serde(default = "default_mask_credit")]
    pub mask_credit: f64,

    /// Per duplicated destination+mask entry
    #[serde(default = "default_duplicate_deduction")]
    pub duplicate_deduction: f64,

    #[serde(default = "default_duplicate_cap")]
    pub duplicate_cap: f64,
}

/// Rubric for OSPF assignments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OspfRubric {
    #[serde(default = "default_ospf_missing_per_net")]
    pub missing_per_network: f64,

    #[serde(default = "default_ospf_missing_cap")]
    pub missing_cap: f64,

    #[serde(default = "default_ospf_extra_per_net")]
    pub extra_per_network: f64,

    #[serde(default = "default_ospf_extra_cap")]
    pub extra_cap: f64,

    /// Any static route inside an OSPF submission
    #[serde(default = "default_ospf_static_route_deduction")]
    pub static_route_deduction: f64,
}

/// Rubric for the master vs. student topology comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyRubric {
    /// Student graph is not a single connected component
    #[serde(default = "default_partition_deduction")]
    pub partition_deduction: f64,

    /// At least half of the master links are missing
    #[serde(default = "default_half_missing_deduction")]
    pub half_missing_deduction: f64,

    /// Two or more master links are missing
    #[serde(default = "default_several_missing_deduction")]
    pub several_missing_deduction: f64,

    /// Exactly one master link is missing
    #[serde(default = "default_single_missing_deduction")]
    pub single_missing_deduction: f64,
}

fn default_version() -> u32 {
    RUBRIC_FORMAT_VERSION
}

fn default_hostname_deduction() -> f64 {
    5.0
}

fn default_mask_deduction() -> f64 {
    5.0
}

fn default_expected_mask_prefix() -> u8 {
    24
}

fn default_format_deduction() -> f64 {
    5.0
}

fn default_static_missing_cap() -> f64 {
    50.0
}

fn default_next_hop_credit() -> f64 {
    0.75
}

fn default_mask_credit() -> f64 {
    0.50
}

fn default_duplicate_deduction() -> f64 {
    2.0
}

fn default_duplicate_cap() -> f64 {
    10.0
}

fn default_ospf_missing_per_net() -> f64 {
    20.0
}

fn default_ospf_missing_cap() -> f64 {
    80.0
}

fn default_ospf_extra_per_net() -> f64 {
    2.0
}

fn default_ospf_extra_cap() -> f64 {
    10.0
}

fn default_ospf_static_route_deduction() -> f64 {
    5.0
}

fn default_partition_deduction() -> f64 {
    20.0
}

fn default_half_missing_deduction() -> f64 {
    50.0
}

fn default_several_missing_deduction() -> f64 {
    30.0
}

fn default_single_missing_deduction() -> f64 {
    10.0
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            version: default_version(),
            hostname_deduction: default_hostname_deduction(),
            mask_deduction_per_iface: default_mask_deduction(),
            expected_mask_prefix: default_expected_mask_prefix(),
            format_deduction_per_address: default_format_deduction(),
            static_routing: StaticRubric::default(),
            ospf: OspfRubric::default(),
            topology: TopologyRubric::default(),
        }
    }
}

impl Default for StaticRubric {
    fn default() -> Self {
        Self {
            missing_cap: default_static_missing_cap(),
            next_hop_credit: default_next_hop_credit(),
            mask_credit: default_mask_credit(),
            duplicate_deduction: default_duplicate_deduction(),
            duplicate_cap: default_duplicate_cap(),
        }
    }
}

impl Default for OspfRubric {
    fn default() -> Self {
        Self {
            missing_per_network: default_ospf_missing_per_net(),
            missing_cap: default_ospf_missing_cap(),
            extra_per_network: default_ospf_extra_per_net(),
            extra_cap: default_ospf_extra_cap(),
            static_route_deduction: default_ospf_static_route_deduction(),
        }
    }
}

impl Default for TopologyRubric {
    fn default() -> Self {
        Self {
            partition_deduction: default_partition_deduction(),
            half_missing_deduction: default_half_missing_deduction(),
            several_missing_deduction: default_several_missing_deduction(),
            single_missing_deduction: default_single_missing_deduction(),
        }
    }
}
