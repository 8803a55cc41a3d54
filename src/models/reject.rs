//! Diesel models for the reject-reason taxonomy.

use diesel::prelude::*;

use crate::domain::reject::{
    NewRejectGroup as DomainNewRejectGroup, RejectGroup as DomainRejectGroup,
    RejectReason as DomainRejectReason, UpdateRejectGroup as DomainUpdateRejectGroup,
};
use crate::domain::types::{
    GroupName, HubId, RejectGroupId, RejectReasonId, TaxonomyItemName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reject_groups)]
pub struct RejectGroup {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reject_groups)]
pub struct NewRejectGroup<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::reject_groups)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateRejectGroup<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(RejectGroup, foreign_key = group_id))]
#[diesel(table_name = crate::schema::reject_reasons)]
pub struct RejectReason {
    pub id: i32,
    pub hub_id: i32,
    pub group_id: i32,
    pub group_name: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reject_reasons)]
pub struct NewRejectReason<'a> {
    pub hub_id: i32,
    pub group_id: i32,
    pub group_name: &'a str,
    pub name: &'a str,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::reject_reasons)]
pub struct UpdateRejectReason<'a> {
    pub group_id: i32,
    pub group_name: &'a str,
    pub name: &'a str,
    pub is_active: bool,
}

impl TryFrom<RejectGroup> for DomainRejectGroup {
    type Error = TypeConstraintError;

    fn try_from(group: RejectGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RejectGroupId::try_from(group.id)?,
            hub_id: HubId::try_from(group.hub_id)?,
            name: GroupName::new(group.name)?,
            description: group.description,
        })
    }
}

impl TryFrom<RejectReason> for DomainRejectReason {
    type Error = TypeConstraintError;

    fn try_from(reason: RejectReason) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RejectReasonId::try_from(reason.id)?,
            hub_id: HubId::try_from(reason.hub_id)?,
            group_id: RejectGroupId::try_from(reason.group_id)?,
            group_name: GroupName::new(reason.group_name)?,
            name: TaxonomyItemName::new(reason.name)?,
            is_active: reason.is_active,
        })
    }
}

impl<'a> From<&'a DomainNewRejectGroup> for NewRejectGroup<'a> {
    fn from(group: &'a DomainNewRejectGroup) -> Self {
        Self {
            hub_id: group.hub_id.get(),
            name: group.name.as_str(),
            description: group.description.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateRejectGroup> for UpdateRejectGroup<'a> {
    fn from(group: &'a DomainUpdateRejectGroup) -> Self {
        Self {
            name: group.name.as_str(),
            description: group.description.as_deref(),
        }
    }
}
