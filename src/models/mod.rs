//! Database models shared across the CRM repository.

pub mod care;
pub mod care_activity;
#[cfg(feature = "server")]
pub mod config;
pub mod customer;
pub mod employee;
pub mod quotation;
pub mod reject;
pub mod service_price;
