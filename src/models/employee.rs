//! Diesel models representing employees.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::employee::{
    Employee as DomainEmployee, NewEmployee as DomainNewEmployee,
    UpdateEmployee as DomainUpdateEmployee,
};
use crate::domain::types::{
    EmailAddress, EmployeeId, HubId, Label, PersonName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::employees)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
/// Insertable form of [`Employee`].
pub struct NewEmployee<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub position: &'a str,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating an [`Employee`] record.
pub struct UpdateEmployee<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub position: &'a str,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::try_from(employee.id)?,
            hub_id: HubId::try_from(employee.hub_id)?,
            name: PersonName::new(employee.name)?,
            email: EmailAddress::new(employee.email)?,
            phone: employee.phone.map(PhoneNumber::new).transpose()?,
            position: Label::new(employee.position)?,
            is_active: employee.is_active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEmployee> for NewEmployee<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            hub_id: employee.hub_id.get(),
            name: employee.name.as_str(),
            email: employee.email.as_str(),
            phone: employee.phone.as_ref().map(PhoneNumber::as_str),
            position: employee.position.as_str(),
            is_active: employee.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateEmployee> for UpdateEmployee<'a> {
    fn from(employee: &'a DomainUpdateEmployee) -> Self {
        Self {
            name: employee.name.as_str(),
            email: employee.email.as_str(),
            phone: employee.phone.as_ref().map(PhoneNumber::as_str),
            position: employee.position.as_str(),
            is_active: employee.is_active,
            updated_at: Utc::now().naive_utc(),
        }
    }
}
