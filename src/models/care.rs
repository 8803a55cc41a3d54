//! Diesel models for the care-result taxonomy.

use diesel::prelude::*;

use crate::domain::care::{
    CareGroup as DomainCareGroup, CareResult as DomainCareResult,
    NewCareGroup as DomainNewCareGroup, UpdateCareGroup as DomainUpdateCareGroup,
};
use crate::domain::types::{
    CareGroupId, CareResultId, GroupName, HubId, TaxonomyItemName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::care_groups)]
pub struct CareGroup {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::care_groups)]
pub struct NewCareGroup<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::care_groups)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCareGroup<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(CareGroup, foreign_key = group_id))]
#[diesel(table_name = crate::schema::care_results)]
pub struct CareResult {
    pub id: i32,
    pub hub_id: i32,
    pub group_id: i32,
    pub group_name: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::care_results)]
pub struct NewCareResult<'a> {
    pub hub_id: i32,
    pub group_id: i32,
    pub group_name: &'a str,
    pub name: &'a str,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::care_results)]
pub struct UpdateCareResult<'a> {
    pub group_id: i32,
    pub group_name: &'a str,
    pub name: &'a str,
    pub is_active: bool,
}

impl TryFrom<CareGroup> for DomainCareGroup {
    type Error = TypeConstraintError;

    fn try_from(group: CareGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CareGroupId::try_from(group.id)?,
            hub_id: HubId::try_from(group.hub_id)?,
            name: GroupName::new(group.name)?,
            description: group.description,
        })
    }
}

impl TryFrom<CareResult> for DomainCareResult {
    type Error = TypeConstraintError;

    fn try_from(result: CareResult) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CareResultId::try_from(result.id)?,
            hub_id: HubId::try_from(result.hub_id)?,
            group_id: CareGroupId::try_from(result.group_id)?,
            group_name: GroupName::new(result.group_name)?,
            name: TaxonomyItemName::new(result.name)?,
            is_active: result.is_active,
        })
    }
}

impl<'a> From<&'a DomainNewCareGroup> for NewCareGroup<'a> {
    fn from(group: &'a DomainNewCareGroup) -> Self {
        Self {
            hub_id: group.hub_id.get(),
            name: group.name.as_str(),
            description: group.description.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCareGroup> for UpdateCareGroup<'a> {
    fn from(group: &'a DomainUpdateCareGroup) -> Self {
        Self {
            name: group.name.as_str(),
            description: group.description.as_deref(),
        }
    }
}
