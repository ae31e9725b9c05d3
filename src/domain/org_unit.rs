//! Organizational unit targeted by the policy update.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

const PREFIX: &str = "orgunits/";

/// Org unit id, accepted as `orgunits/<id>` or bare `<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrgUnit {
    id: String,
}

impl OrgUnit {
    pub fn parse(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        let id = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);

        let invalid = |reason: &str| DomainError::InvalidOrgUnit {
            value: value.to_string(),
            reason: reason.to_string(),
        };
        if id.is_empty() {
            return Err(invalid("empty id"));
        }
        if id.contains('/') {
            return Err(invalid("expected orgunits/<id>"));
        }
        Ok(Self { id: id.to_string() })
    }

    /// Id used in the request URL.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value for `policyTargetKey.targetResource`.
    pub fn target_resource(&self) -> String {
        format!("{PREFIX}{}", self.id)
    }
}

impl FromStr for OrgUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OrgUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.id)
    }
}
