use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{
    CustomerId, CustomerStatus, EmailAddress, EmployeeId, HubId, Label, Note, PersonName,
    PhoneNumber, PotentialLevel, RejectReasonId,
};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub hub_id: HubId,
    pub name: PersonName,
    pub phone: Option<PhoneNumber>,
    pub email: Option<EmailAddress>,
    pub address: Option<String>,
    pub source: Option<Label>,
    pub potential: PotentialLevel,
    pub status: CustomerStatus,
    /// Employee in charge of following up.
    pub employee_id: Option<EmployeeId>,
    /// Why the customer declined; only kept while `status` is `rejected`.
    pub reject_reason_id: Option<RejectReasonId>,
    pub note: Option<Note>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable customer attributes shared by create and update payloads.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerDetails {
    pub name: PersonName,
    pub phone: Option<PhoneNumber>,
    pub email: Option<EmailAddress>,
    pub address: Option<String>,
    pub source: Option<Label>,
    pub potential: PotentialLevel,
    pub status: CustomerStatus,
    pub employee_id: Option<EmployeeId>,
    pub reject_reason_id: Option<RejectReasonId>,
    pub note: Option<Note>,
}

impl CustomerDetails {
    /// Normalizes optional text and drops a reject reason that does not
    /// match the status.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.address = self
            .address
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if self.status != CustomerStatus::Rejected {
            self.reject_reason_id = None;
        }
        self
    }
}

#[derive(Clone, Debug)]
pub struct NewCustomer {
    pub hub_id: HubId,
    pub details: CustomerDetails,
}

impl NewCustomer {
    #[must_use]
    pub fn new(hub_id: HubId, details: CustomerDetails) -> Self {
        Self {
            hub_id,
            details: details.normalized(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateCustomer {
    pub details: CustomerDetails,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(details: CustomerDetails) -> Self {
        Self {
            details: details.normalized(),
        }
    }
}
