use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{
    CareActivityId, CareResultId, CustomerId, EmployeeId, HubId, Note, TaxonomyItemName,
};

/// One follow-up contact with a customer and its outcome.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CareActivity {
    pub id: CareActivityId,
    pub hub_id: HubId,
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub care_result_id: CareResultId,
    pub care_result_name: TaxonomyItemName,
    pub note: Option<Note>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewCareActivity {
    pub hub_id: HubId,
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub care_result_id: CareResultId,
    pub note: Option<Note>,
}
