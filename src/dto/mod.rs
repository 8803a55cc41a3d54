//! Response shapes assembled by services and serialized by routes.

use serde::Serialize;

use crate::domain::employee::Employee;
use crate::domain::quotation::{Quotation, QuotationTotals};
use crate::pagination::PaginationMeta;

/// A page of rows plus the metadata sent alongside it in the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Quotation with its computed pricing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuotationView {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub totals: QuotationTotals,
}

/// Identity returned by `GET /api/users`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub hub_id: i32,
    pub roles: Vec<String>,
    pub employee: Option<Employee>,
}
