//! Care-result taxonomy: groups of outcomes recorded after a follow-up.

use serde::Serialize;

use crate::domain::types::{CareGroupId, CareResultId, GroupName, HubId, TaxonomyItemName};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CareGroup {
    pub id: CareGroupId,
    pub hub_id: HubId,
    pub name: GroupName,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewCareGroup {
    pub hub_id: HubId,
    pub name: GroupName,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UpdateCareGroup {
    pub name: GroupName,
    pub description: Option<String>,
}

/// A care result always carries a copy of its group's name.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CareResult {
    pub id: CareResultId,
    pub hub_id: HubId,
    pub group_id: CareGroupId,
    pub group_name: GroupName,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NewCareResult {
    pub hub_id: HubId,
    pub group_id: CareGroupId,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct UpdateCareResult {
    pub group_id: CareGroupId,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}
