//! Chrome Policy `batchModify` request body.

use serde::{Deserialize, Serialize};

use crate::domain::{Envelope, OrgUnit};

/// Policy field carrying the bookmark envelope; also the update mask.
pub const MANAGED_BOOKMARKS_FIELD: &str = "managedBookmarks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchModifyRequest {
    pub requests: Vec<ModifyRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest {
    pub policy_target_key: PolicyTargetKey,
    pub policy_value: PolicyValue,
    pub update_mask: UpdateMask,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTargetKey {
    pub target_resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyValue {
    pub policy_schema: String,
    pub value: ManagedBookmarksValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedBookmarksValue {
    pub managed_bookmarks: Envelope,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMask {
    pub paths: String,
}

impl BatchModifyRequest {
    /// Single-request batch that overwrites the managed bookmarks of `org_unit`.
    pub fn managed_bookmarks(envelope: Envelope, org_unit: &OrgUnit, policy_schema: &str) -> Self {
        Self {
            requests: vec![ModifyRequest {
                policy_target_key: PolicyTargetKey {
                    target_resource: org_unit.target_resource(),
                },
                policy_value: PolicyValue {
                    policy_schema: policy_schema.to_string(),
                    value: ManagedBookmarksValue {
                        managed_bookmarks: envelope,
                    },
                },
                update_mask: UpdateMask {
                    paths: MANAGED_BOOKMARKS_FIELD.to_string(),
                },
            }],
        }
    }
}

/// `<base>/v1/customers/<customer>/policies/orgunits/<id>:batchModify`
pub fn batch_modify_url(api_base_url: &str, customer: &str, org_unit: &OrgUnit) -> String {
    format!(
        "{}/v1/customers/{}/policies/orgunits/{}:batchModify",
        api_base_url.trim_end_matches('/'),
        customer,
        org_unit.id()
    )
}
