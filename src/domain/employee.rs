use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{EmailAddress, EmployeeId, HubId, Label, PersonName, PhoneNumber};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub hub_id: HubId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub position: Label,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub hub_id: HubId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub position: Label,
    pub is_active: bool,
}

impl NewEmployee {
    #[must_use]
    pub fn new(
        hub_id: HubId,
        name: PersonName,
        email: EmailAddress,
        phone: Option<PhoneNumber>,
        position: Label,
        is_active: bool,
    ) -> Self {
        Self {
            hub_id,
            name,
            email,
            phone,
            position,
            is_active,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateEmployee {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub position: Label,
    pub is_active: bool,
}
