use serde::Deserialize;
use validator::Validate;

use crate::domain::employee::{NewEmployee, UpdateEmployee};
use crate::domain::types::{EmailAddress, HubId, Label, PersonName, PhoneNumber};
use crate::forms::{FormError, optional};

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/employees` and `PUT /api/employees/{id}`.
pub struct EmployeeForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug)]
pub struct EmployeePayload {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub position: Label,
    pub is_active: bool,
}

impl TryFrom<EmployeeForm> for EmployeePayload {
    type Error = FormError;

    fn try_from(form: EmployeeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: PersonName::new(form.name)?,
            email: EmailAddress::new(form.email)?,
            phone: optional(form.phone, PhoneNumber::new)?,
            position: Label::new(form.position)?,
            is_active: form.is_active,
        })
    }
}

impl EmployeePayload {
    pub fn into_new(self, hub_id: HubId) -> NewEmployee {
        NewEmployee::new(
            hub_id,
            self.name,
            self.email,
            self.phone,
            self.position,
            self.is_active,
        )
    }

    pub fn into_update(self) -> UpdateEmployee {
        UpdateEmployee {
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            is_active: self.is_active,
        }
    }
}
