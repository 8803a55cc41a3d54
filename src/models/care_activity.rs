use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::care_activity::CareActivity as DomainCareActivity;
use crate::domain::types::{
    CareActivityId, CareResultId, CustomerId, EmployeeId, HubId, Note, TaxonomyItemName,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::care_activities)]
pub struct CareActivity {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub employee_id: Option<i32>,
    pub care_result_id: i32,
    pub care_result_name: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable activity; the result name is copied in by the repository.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::care_activities)]
pub struct NewCareActivity<'a> {
    pub hub_id: i32,
    pub customer_id: i32,
    pub employee_id: Option<i32>,
    pub care_result_id: i32,
    pub care_result_name: &'a str,
    pub note: Option<&'a str>,
}

impl TryFrom<CareActivity> for DomainCareActivity {
    type Error = TypeConstraintError;

    fn try_from(activity: CareActivity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CareActivityId::try_from(activity.id)?,
            hub_id: HubId::try_from(activity.hub_id)?,
            customer_id: CustomerId::try_from(activity.customer_id)?,
            employee_id: activity.employee_id.map(EmployeeId::try_from).transpose()?,
            care_result_id: CareResultId::try_from(activity.care_result_id)?,
            care_result_name: TaxonomyItemName::new(activity.care_result_name)?,
            note: activity.note.map(Note::new).transpose()?,
            created_at: activity.created_at,
        })
    }
}
