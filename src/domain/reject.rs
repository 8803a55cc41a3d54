//! Reject-reason taxonomy explaining why a customer declined.

use serde::Serialize;

use crate::domain::types::{GroupName, HubId, RejectGroupId, RejectReasonId, TaxonomyItemName};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RejectGroup {
    pub id: RejectGroupId,
    pub hub_id: HubId,
    pub name: GroupName,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewRejectGroup {
    pub hub_id: HubId,
    pub name: GroupName,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UpdateRejectGroup {
    pub name: GroupName,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RejectReason {
    pub id: RejectReasonId,
    pub hub_id: HubId,
    pub group_id: RejectGroupId,
    pub group_name: GroupName,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NewRejectReason {
    pub hub_id: HubId,
    pub group_id: RejectGroupId,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct UpdateRejectReason {
    pub group_id: RejectGroupId,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}
