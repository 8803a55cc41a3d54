use serde::Deserialize;
use validator::Validate;

use crate::domain::service_price::{NewServicePrice, UpdateServicePrice};
use crate::domain::types::{HubId, Label, Money, ServiceName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/services` and `PUT /api/services/{id}`.
pub struct ServicePriceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub service_group: String,
    #[validate(length(min = 1, max = 50))]
    pub unit: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug)]
pub struct ServicePricePayload {
    pub name: ServiceName,
    pub service_group: Label,
    pub unit: Label,
    pub price: Money,
    pub is_active: bool,
}

impl TryFrom<ServicePriceForm> for ServicePricePayload {
    type Error = FormError;

    fn try_from(form: ServicePriceForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: ServiceName::new(form.name)?,
            service_group: Label::new(form.service_group)?,
            unit: Label::new(form.unit)?,
            price: Money::new(form.price)?,
            is_active: form.is_active,
        })
    }
}

impl ServicePricePayload {
    pub fn into_new(self, hub_id: HubId) -> NewServicePrice {
        NewServicePrice {
            hub_id,
            name: self.name,
            service_group: self.service_group,
            unit: self.unit,
            price: self.price,
            is_active: self.is_active,
        }
    }

    pub fn into_update(self) -> UpdateServicePrice {
        UpdateServicePrice {
            name: self.name,
            service_group: self.service_group,
            unit: self.unit,
            price: self.price,
            is_active: self.is_active,
        }
    }
}
