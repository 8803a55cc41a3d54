//! Domain aggregates exposed by the CRM service layer.

pub mod care;
pub mod care_activity;
pub mod customer;
pub mod employee;
pub mod quotation;
pub mod reject;
pub mod service_price;
pub mod types;
