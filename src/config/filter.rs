//! Resource filter strings.
//!
//! CLI commands accept a positional filter of the form
//! `ENV:INFRA:GROUP:NAME:TYPE`. Trailing segments may be omitted and any
//! segment may be left empty; `prd:aws` targets all prd aws resources and
//! `prd:::s3` targets prd resources whose name contains `s3`.

use crate::error::{ConfigError, Result, StratusError};
use crate::resource::InfraTarget;

/// Parsed resource filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetFilter {
    /// Environment filter (exact match against group env).
    pub env: Option<String>,
    /// Infrastructure target filter.
    pub infra: Option<InfraTarget>,
    /// Group filter (substring).
    pub group: Option<String>,
    /// Resource name filter (substring).
    pub name: Option<String>,
    /// Resource type filter (exact, case-insensitive).
    pub resource_type: Option<String>,
}

impl TargetFilter {
    /// Parses a filter string of up to five `:`-separated segments.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when more than five segments are
    /// given or the infra segment names an unknown target.
    pub fn parse(filter: &str) -> Result<Self> {
        let segments: Vec<&str> = filter.split(':').collect();
        if segments.len() > 5 {
            return Err(StratusError::Config(ConfigError::InvalidFilter {
                filter: filter.to_string(),
                message: format!("expected at most 5 segments, got {}", segments.len()),
            }));
        }

        let segment = |idx: usize| -> Option<String> {
            segments
                .get(idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let infra = match segment(1) {
            Some(value) => Some(value.parse::<InfraTarget>().map_err(StratusError::Config)?),
            None => None,
        };

        Ok(Self {
            env: segment(0),
            infra,
            group: segment(2),
            name: segment(3),
            resource_type: segment(4),
        })
    }

    /// Fills unset fields from individually supplied CLI options.
    ///
    /// The positional filter wins where both are given, matching the
    /// option precedence of the CLI surface.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the infra option is unknown.
    pub fn merge_options(
        mut self,
        env: Option<String>,
        infra: Option<String>,
        group: Option<String>,
        name: Option<String>,
        resource_type: Option<String>,
    ) -> Result<Self> {
        if self.env.is_none() {
            self.env = env;
        }
        if self.infra.is_none() {
            if let Some(infra) = infra {
                self.infra = Some(infra.parse::<InfraTarget>().map_err(StratusError::Config)?);
            }
        }
        if self.group.is_none() {
            self.group = group;
        }
        if self.name.is_none() {
            self.name = name;
        }
        if self.resource_type.is_none() {
            self.resource_type = resource_type;
        }
        Ok(self)
    }
}
