//! Grading rubric configuration
//!
//! The rubric is an immutable value handed to the comparator. It can be
//! tuned per assignment through a TOML file; keys left out take the
//! default amounts.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{GradeError, Result};

pub use types::{OspfRubric, Rubric, StaticRubric, TopologyRubric, RUBRIC_FORMAT_VERSION};

impl Rubric {
    /// Load a rubric from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GradeError::io_operation("read rubric", path.display(), e))?;
        let rubric: Rubric = toml::from_str(&content)?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Save the rubric to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GradeError::Other(format!("failed to serialize rubric: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject negative amounts and credit fractions outside `0.0..=1.0`
    pub fn validate(&self) -> Result<()> {
        if self.version != RUBRIC_FORMAT_VERSION {
            bail_invalid!("rubric version", self.version);
        }
        if self.expected_mask_prefix > 32 {
            bail_invalid!("expected_mask_prefix", self.expected_mask_prefix);
        }

        let amounts = [
            ("hostname_deduction", self.hostname_deduction),
            ("mask_deduction_per_iface", self.mask_deduction_per_iface),
            ("format_deduction_per_address", self.format_deduction_per_address),
            ("static_routing.missing_cap", self.static_routing.missing_cap),
            ("static_routing.duplicate_deduction", self.static_routing.duplicate_deduction),
            ("static_routing.duplicate_cap", self.static_routing.duplicate_cap),
            ("ospf.missing_per_network", self.ospf.missing_per_network),
            ("ospf.missing_cap", self.ospf.missing_cap),
            ("ospf.extra_per_network", self.ospf.extra_per_network),
            ("ospf.extra_cap", self.ospf.extra_cap),
            ("ospf.static_route_deduction", self.ospf.static_route_deduction),
            ("topology.partition_deduction", self.topology.partition_deduction),
            ("topology.half_missing_deduction", self.topology.half_missing_deduction),
            ("topology.several_missing_deduction", self.topology.several_missing_deduction),
            ("topology.single_missing_deduction", self.topology.single_missing_deduction),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                bail_invalid!(name, value);
            }
        }

        let credits = [
            ("static_routing.next_hop_credit", self.static_routing.next_hop_credit),
            ("static_routing.mask_credit", self.static_routing.mask_credit),
        ];
        for (name, value) in credits {
            if !(0.0..=1.0).contains(&value) {
                bail_invalid!(name, value);
            }
        }

        Ok(())
    }
}
