use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{HubId, Label, Money, ServiceName, ServicePriceId};

/// A service offered by the company with its list price.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ServicePrice {
    pub id: ServicePriceId,
    pub hub_id: HubId,
    pub name: ServiceName,
    pub service_group: Label,
    pub unit: Label,
    pub price: Money,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewServicePrice {
    pub hub_id: HubId,
    pub name: ServiceName,
    pub service_group: Label,
    pub unit: Label,
    pub price: Money,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct UpdateServicePrice {
    pub name: ServiceName,
    pub service_group: Label,
    pub unit: Label,
    pub price: Money,
    pub is_active: bool,
}
