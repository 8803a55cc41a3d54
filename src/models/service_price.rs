use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::service_price::{
    NewServicePrice as DomainNewServicePrice, ServicePrice as DomainServicePrice,
    UpdateServicePrice as DomainUpdateServicePrice,
};
use crate::domain::types::{HubId, Label, Money, ServiceName, ServicePriceId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::service_prices)]
pub struct ServicePrice {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub service_group: String,
    pub unit: String,
    pub price: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_prices)]
pub struct NewServicePrice<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub service_group: &'a str,
    pub unit: &'a str,
    pub price: i64,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::service_prices)]
pub struct UpdateServicePrice<'a> {
    pub name: &'a str,
    pub service_group: &'a str,
    pub unit: &'a str,
    pub price: i64,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ServicePrice> for DomainServicePrice {
    type Error = TypeConstraintError;

    fn try_from(service: ServicePrice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServicePriceId::try_from(service.id)?,
            hub_id: HubId::try_from(service.hub_id)?,
            name: ServiceName::new(service.name)?,
            service_group: Label::new(service.service_group)?,
            unit: Label::new(service.unit)?,
            price: Money::new(service.price)?,
            is_active: service.is_active,
            created_at: service.created_at,
            updated_at: service.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewServicePrice> for NewServicePrice<'a> {
    fn from(service: &'a DomainNewServicePrice) -> Self {
        Self {
            hub_id: service.hub_id.get(),
            name: service.name.as_str(),
            service_group: service.service_group.as_str(),
            unit: service.unit.as_str(),
            price: service.price.get(),
            is_active: service.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateServicePrice> for UpdateServicePrice<'a> {
    fn from(service: &'a DomainUpdateServicePrice) -> Self {
        Self {
            name: service.name.as_str(),
            service_group: service.service_group.as_str(),
            unit: service.unit.as_str(),
            price: service.price.get(),
            is_active: service.is_active,
            updated_at: Utc::now().naive_utc(),
        }
    }
}
