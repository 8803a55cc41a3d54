//! Quotations and their price aggregation.
//!
//! A quotation groups priced line items into packages. Totals are always
//! derived from the packages, never stored.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CustomerId, EmployeeId, HubId, Label, Money, Note, PersonName, PublicId, QuotationId,
    QuotationStatus, ServiceName, ServicePriceId, TypeConstraintError,
};

/// One priced line of a package.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuotationItem {
    /// Catalogue entry the line was priced from, when any.
    pub service_id: Option<ServicePriceId>,
    pub name: ServiceName,
    pub unit_price: Money,
    pub quantity: i64,
}

impl QuotationItem {
    pub fn new(
        service_id: Option<ServicePriceId>,
        name: ServiceName,
        unit_price: Money,
        quantity: i64,
    ) -> Result<Self, TypeConstraintError> {
        if quantity < 1 {
            return Err(TypeConstraintError::InvalidValue(format!(
                "quantity {quantity}"
            )));
        }
        Ok(Self {
            service_id,
            name,
            unit_price,
            quantity,
        })
    }

    pub fn total(&self) -> Result<Money, TypeConstraintError> {
        self.unit_price.checked_mul(self.quantity)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuotationPackage {
    pub name: Label,
    pub items: Vec<QuotationItem>,
}

impl QuotationPackage {
    pub fn new(name: Label, items: Vec<QuotationItem>) -> Result<Self, TypeConstraintError> {
        if items.is_empty() {
            return Err(TypeConstraintError::InvalidValue(format!(
                "package `{name}` has no items"
            )));
        }
        Ok(Self { name, items })
    }

    pub fn total(&self) -> Result<Money, TypeConstraintError> {
        self.items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.total()?))
    }
}

/// Tax rate in whole percent, `0..=100`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "i32", into = "i32")]
pub struct TaxRate(i32);

impl TaxRate {
    pub fn new(percent: i32) -> Result<Self, TypeConstraintError> {
        if (0..=100).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(TypeConstraintError::InvalidValue(format!(
                "tax rate {percent}"
            )))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for TaxRate {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxRate> for i32 {
    fn from(value: TaxRate) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PackageTotal {
    pub name: Label,
    pub total: Money,
}

/// Aggregated prices of a quotation.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuotationTotals {
    pub packages: Vec<PackageTotal>,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

/// Sums package prices into subtotal, tax and grand total.
pub fn compute_totals(
    packages: &[QuotationPackage],
    tax_rate: TaxRate,
) -> Result<QuotationTotals, TypeConstraintError> {
    let packages = packages
        .iter()
        .map(|package| {
            Ok(PackageTotal {
                name: package.name.clone(),
                total: package.total()?,
            })
        })
        .collect::<Result<Vec<_>, TypeConstraintError>>()?;

    let subtotal = packages
        .iter()
        .try_fold(Money::ZERO, |acc, package| acc.checked_add(package.total))?;
    let tax = subtotal.percent(tax_rate.get())?;
    let grand_total = subtotal.checked_add(tax)?;

    Ok(QuotationTotals {
        packages,
        subtotal,
        tax,
        grand_total,
    })
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Quotation {
    pub id: QuotationId,
    pub hub_id: HubId,
    pub public_id: PublicId,
    pub customer_id: CustomerId,
    /// Copy of the customer's name at the time of the last save.
    pub customer_name: PersonName,
    pub employee_id: Option<EmployeeId>,
    pub status: QuotationStatus,
    pub tax_rate: TaxRate,
    pub packages: Vec<QuotationPackage>,
    pub note: Option<Note>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Quotation {
    pub fn totals(&self) -> Result<QuotationTotals, TypeConstraintError> {
        compute_totals(&self.packages, self.tax_rate)
    }
}

/// Attributes of a quotation set by the user; the customer name is
/// resolved by the service.
#[derive(Clone, Debug)]
pub struct QuotationDraft {
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub status: QuotationStatus,
    pub tax_rate: TaxRate,
    pub packages: Vec<QuotationPackage>,
    pub note: Option<Note>,
}

impl QuotationDraft {
    /// Ensures the draft prices without overflow and has content.
    pub fn validate(&self) -> Result<QuotationTotals, TypeConstraintError> {
        if self.packages.is_empty() {
            return Err(TypeConstraintError::InvalidValue(
                "quotation has no packages".to_string(),
            ));
        }
        compute_totals(&self.packages, self.tax_rate)
    }
}

#[derive(Clone, Debug)]
pub struct NewQuotation {
    pub hub_id: HubId,
    pub public_id: PublicId,
    pub customer_name: PersonName,
    pub draft: QuotationDraft,
}

#[derive(Clone, Debug)]
pub struct UpdateQuotation {
    pub customer_name: PersonName,
    pub draft: QuotationDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: i64, quantity: i64) -> QuotationItem {
        QuotationItem::new(
            None,
            ServiceName::new(name).unwrap(),
            Money::new(price).unwrap(),
            quantity,
        )
        .unwrap()
    }

    fn package(name: &str, items: Vec<QuotationItem>) -> QuotationPackage {
        QuotationPackage::new(Label::new(name).unwrap(), items).unwrap()
    }

    #[test]
    fn totals_sum_nested_packages() {
        let packages = vec![
            package(
                "Vệ sinh",
                vec![item("Vệ sinh máy lạnh", 150_000, 2), item("Bơm gas", 200_000, 1)],
            ),
            package("Bảo trì", vec![item("Kiểm tra định kỳ", 300_000, 1)]),
        ];

        let totals = compute_totals(&packages, TaxRate::new(10).unwrap()).unwrap();

        assert_eq!(totals.packages[0].total.get(), 500_000);
        assert_eq!(totals.packages[1].total.get(), 300_000);
        assert_eq!(totals.subtotal.get(), 800_000);
        assert_eq!(totals.tax.get(), 80_000);
        assert_eq!(totals.grand_total.get(), 880_000);
    }

    #[test]
    fn zero_tax_keeps_subtotal() {
        let packages = vec![package("Gói", vec![item("Dịch vụ", 99, 3)])];
        let totals = compute_totals(&packages, TaxRate::new(0).unwrap()).unwrap();
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.grand_total.get(), 297);
    }

    #[test]
    fn invalid_building_blocks_are_rejected() {
        assert!(TaxRate::new(101).is_err());
        assert!(TaxRate::new(-1).is_err());
        assert!(
            QuotationItem::new(
                None,
                ServiceName::new("x").unwrap(),
                Money::new(1).unwrap(),
                0
            )
            .is_err()
        );
        assert!(QuotationPackage::new(Label::new("empty").unwrap(), vec![]).is_err());
    }

    #[test]
    fn overflow_is_reported() {
        let packages = vec![package("Lớn", vec![item("x", i64::MAX, 1), item("y", 1, 1)])];
        assert!(compute_totals(&packages, TaxRate::new(0).unwrap()).is_err());
    }

    #[test]
    fn tax_rounding_overflow_is_reported() {
        let packages = vec![package("Lớn", vec![item("x", i64::MAX - 10, 1)])];
        assert!(compute_totals(&packages, TaxRate::new(1).unwrap()).is_err());
    }

    #[test]
    fn draft_without_packages_is_invalid() {
        let draft = QuotationDraft {
            customer_id: CustomerId::new(1).unwrap(),
            employee_id: None,
            status: QuotationStatus::Draft,
            tax_rate: TaxRate::new(10).unwrap(),
            packages: vec![],
            note: None,
        };
        assert!(draft.validate().is_err());
    }
}
