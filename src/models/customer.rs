use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerDetails, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::types::{
    CustomerId, EmailAddress, EmployeeId, HubId, Label, Note, PersonName, PhoneNumber,
    RejectReasonId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub source: Option<String>,
    pub potential: String,
    pub status: String,
    pub employee_id: Option<i32>,
    pub reject_reason_id: Option<i32>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub source: Option<&'a str>,
    pub potential: &'a str,
    pub status: &'a str,
    pub employee_id: Option<i32>,
    pub reject_reason_id: Option<i32>,
    pub note: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub source: Option<&'a str>,
    pub potential: &'a str,
    pub status: &'a str,
    pub employee_id: Option<i32>,
    pub reject_reason_id: Option<i32>,
    pub note: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::try_from(customer.id)?,
            hub_id: HubId::try_from(customer.hub_id)?,
            name: PersonName::new(customer.name)?,
            phone: customer.phone.map(PhoneNumber::new).transpose()?,
            email: customer.email.map(EmailAddress::new).transpose()?,
            address: customer.address,
            source: customer.source.map(Label::new).transpose()?,
            potential: customer.potential.parse()?,
            status: customer.status.parse()?,
            employee_id: customer.employee_id.map(EmployeeId::try_from).transpose()?,
            reject_reason_id: customer
                .reject_reason_id
                .map(RejectReasonId::try_from)
                .transpose()?,
            note: customer.note.map(Note::new).transpose()?,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        let details = &customer.details;
        Self {
            hub_id: customer.hub_id.get(),
            name: details.name.as_str(),
            phone: details.phone.as_ref().map(PhoneNumber::as_str),
            email: details.email.as_ref().map(EmailAddress::as_str),
            address: details.address.as_deref(),
            source: details.source.as_ref().map(Label::as_str),
            potential: details.potential.as_str(),
            status: details.status.as_str(),
            employee_id: details.employee_id.map(EmployeeId::get),
            reject_reason_id: details.reject_reason_id.map(RejectReasonId::get),
            note: details.note.as_ref().map(Note::as_str),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainUpdateCustomer) -> Self {
        let CustomerDetails {
            name,
            phone,
            email,
            address,
            source,
            potential,
            status,
            employee_id,
            reject_reason_id,
            note,
        } = &customer.details;

        Self {
            name: name.as_str(),
            phone: phone.as_ref().map(PhoneNumber::as_str),
            email: email.as_ref().map(EmailAddress::as_str),
            address: address.as_deref(),
            source: source.as_ref().map(Label::as_str),
            potential: potential.as_str(),
            status: status.as_str(),
            employee_id: employee_id.map(EmployeeId::get),
            reject_reason_id: reject_reason_id.map(RejectReasonId::get),
            note: note.as_ref().map(Note::as_str),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CustomerStatus, PotentialLevel};

    fn db_customer() -> Customer {
        let now = Utc::now().naive_utc();
        Customer {
            id: 1,
            hub_id: 2,
            name: "Công ty Hòa Bình".into(),
            phone: None,
            email: Some("info@hoabinh.vn".into()),
            address: Some("12 Lý Thường Kiệt".into()),
            source: Some("facebook".into()),
            potential: "high".into(),
            status: "rejected".into(),
            employee_id: Some(4),
            reject_reason_id: Some(9),
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn customer_into_domain() {
        let domain = DomainCustomer::try_from(db_customer()).expect("valid customer");
        assert_eq!(domain.potential, PotentialLevel::High);
        assert_eq!(domain.status, CustomerStatus::Rejected);
        assert_eq!(domain.employee_id.map(EmployeeId::get), Some(4));
        assert_eq!(domain.reject_reason_id.map(RejectReasonId::get), Some(9));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut db = db_customer();
        db.status = "archived".into();
        assert!(DomainCustomer::try_from(db).is_err());
    }

    #[test]
    fn update_changeset_mirrors_domain() {
        let domain = DomainCustomer::try_from(db_customer()).expect("valid customer");
        let update = DomainUpdateCustomer::new(CustomerDetails {
            name: domain.name.clone(),
            phone: None,
            email: domain.email.clone(),
            address: None,
            source: None,
            potential: PotentialLevel::Low,
            status: CustomerStatus::Caring,
            employee_id: None,
            reject_reason_id: domain.reject_reason_id,
            note: None,
        });
        let changeset: UpdateCustomer = (&update).into();
        assert_eq!(changeset.status, "caring");
        assert_eq!(changeset.potential, "low");
        assert_eq!(changeset.reject_reason_id, None);
        assert_eq!(changeset.email, Some("info@hoabinh.vn"));
    }
}
