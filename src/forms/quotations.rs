use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::quotation::{QuotationDraft, QuotationItem, QuotationPackage, TaxRate};
use crate::domain::types::{
    CustomerId, EmployeeId, Label, Money, Note, QuotationStatus, ServiceName, ServicePriceId,
};
use crate::forms::{FormError, non_blank, optional, optional_id};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct QuotationItemForm {
    #[serde(default)]
    pub service_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub unit_price: i64,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct QuotationPackageForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<QuotationItemForm>,
}

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/quotations` and `PUT /api/quotations/{id}`.
pub struct QuotationForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[serde(default)]
    pub employee_id: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    /// Percent; the configured default applies when absent.
    #[serde(default)]
    pub tax_rate: Option<i32>,
    #[validate(length(min = 1), nested)]
    pub packages: Vec<QuotationPackageForm>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub note: Option<String>,
}

#[derive(Debug)]
pub struct QuotationPayload {
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub status: QuotationStatus,
    pub tax_rate: Option<TaxRate>,
    pub packages: Vec<QuotationPackage>,
    pub note: Option<Note>,
}

impl TryFrom<QuotationForm> for QuotationPayload {
    type Error = FormError;

    fn try_from(form: QuotationForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let packages = form
            .packages
            .into_iter()
            .map(package_from_form)
            .collect::<Result<Vec<_>, _>>()?;

        let status = match non_blank(form.status) {
            Some(raw) => raw.parse::<QuotationStatus>()?,
            None => QuotationStatus::Draft,
        };

        Ok(Self {
            customer_id: CustomerId::new(form.customer_id)?,
            employee_id: optional_id(form.employee_id)?,
            status,
            tax_rate: form.tax_rate.map(TaxRate::new).transpose()?,
            packages,
            note: optional(form.note, Note::new)?,
        })
    }
}

fn package_from_form(form: QuotationPackageForm) -> Result<QuotationPackage, FormError> {
    let items = form
        .items
        .into_iter()
        .map(|item| {
            QuotationItem::new(
                optional_id::<ServicePriceId>(item.service_id)?,
                ServiceName::new(item.name)?,
                Money::new(item.unit_price)?,
                item.quantity,
            )
            .map_err(FormError::from)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuotationPackage::new(Label::new(form.name)?, items)?)
}

impl QuotationPayload {
    /// Builds the draft, falling back to `default_tax_rate` and checking that
    /// the totals can be computed.
    pub fn into_draft(self, default_tax_rate: TaxRate) -> Result<QuotationDraft, FormError> {
        let draft = QuotationDraft {
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            status: self.status,
            tax_rate: self.tax_rate.unwrap_or(default_tax_rate),
            packages: self.packages,
            note: self.note,
        };
        draft.validate()?;
        Ok(draft)
    }
}
