use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::quotation::{
    NewQuotation as DomainNewQuotation, Quotation as DomainQuotation, QuotationPackage, TaxRate,
    UpdateQuotation as DomainUpdateQuotation,
};
use crate::domain::types::{
    CustomerId, EmployeeId, HubId, Note, PersonName, PublicId, QuotationId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quotations)]
pub struct Quotation {
    pub id: i32,
    pub hub_id: i32,
    pub public_id: Vec<u8>,
    pub customer_id: i32,
    pub customer_name: String,
    pub employee_id: Option<i32>,
    pub status: String,
    pub tax_rate: i32,
    /// Packages serialized as a JSON array.
    pub packages: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quotations)]
pub struct NewQuotation<'a> {
    pub hub_id: i32,
    pub public_id: &'a [u8],
    pub customer_id: i32,
    pub customer_name: &'a str,
    pub employee_id: Option<i32>,
    pub status: &'a str,
    pub tax_rate: i32,
    pub packages: String,
    pub note: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::quotations)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateQuotation<'a> {
    pub customer_id: i32,
    pub customer_name: &'a str,
    pub employee_id: Option<i32>,
    pub status: &'a str,
    pub tax_rate: i32,
    pub packages: String,
    pub note: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

fn encode_packages(packages: &[QuotationPackage]) -> Result<String, TypeConstraintError> {
    serde_json::to_string(packages)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("packages: {e}")))
}

fn decode_packages(packages: &str) -> Result<Vec<QuotationPackage>, TypeConstraintError> {
    serde_json::from_str(packages)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("packages: {e}")))
}

impl TryFrom<Quotation> for DomainQuotation {
    type Error = TypeConstraintError;

    fn try_from(quotation: Quotation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuotationId::try_from(quotation.id)?,
            hub_id: HubId::try_from(quotation.hub_id)?,
            public_id: PublicId::from_bytes(&quotation.public_id)?,
            customer_id: CustomerId::try_from(quotation.customer_id)?,
            customer_name: PersonName::new(quotation.customer_name)?,
            employee_id: quotation.employee_id.map(EmployeeId::try_from).transpose()?,
            status: quotation.status.parse()?,
            tax_rate: TaxRate::new(quotation.tax_rate)?,
            packages: decode_packages(&quotation.packages)?,
            note: quotation.note.map(Note::new).transpose()?,
            created_at: quotation.created_at,
            updated_at: quotation.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewQuotation> for NewQuotation<'a> {
    type Error = TypeConstraintError;

    fn try_from(quotation: &'a DomainNewQuotation) -> Result<Self, Self::Error> {
        let draft = &quotation.draft;
        Ok(Self {
            hub_id: quotation.hub_id.get(),
            public_id: quotation.public_id.as_bytes(),
            customer_id: draft.customer_id.get(),
            customer_name: quotation.customer_name.as_str(),
            employee_id: draft.employee_id.map(EmployeeId::get),
            status: draft.status.as_str(),
            tax_rate: draft.tax_rate.get(),
            packages: encode_packages(&draft.packages)?,
            note: draft.note.as_ref().map(Note::as_str),
        })
    }
}

impl<'a> TryFrom<&'a DomainUpdateQuotation> for UpdateQuotation<'a> {
    type Error = TypeConstraintError;

    fn try_from(quotation: &'a DomainUpdateQuotation) -> Result<Self, Self::Error> {
        let draft = &quotation.draft;
        Ok(Self {
            customer_id: draft.customer_id.get(),
            customer_name: quotation.customer_name.as_str(),
            employee_id: draft.employee_id.map(EmployeeId::get),
            status: draft.status.as_str(),
            tax_rate: draft.tax_rate.get(),
            packages: encode_packages(&draft.packages)?,
            note: draft.note.as_ref().map(Note::as_str),
            updated_at: Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::QuotationStatus;

    const PACKAGES: &str = r#"[{"name":"Vệ sinh","items":[
        {"service_id":3,"name":"Vệ sinh máy lạnh","unit_price":150000,"quantity":2},
        {"service_id":null,"name":"Bơm gas","unit_price":200000,"quantity":1}
    ]}]"#;

    fn db_quotation() -> Quotation {
        let now = Utc::now().naive_utc();
        Quotation {
            id: 1,
            hub_id: 1,
            public_id: PublicId::new().as_bytes().to_vec(),
            customer_id: 7,
            customer_name: "Nguyễn Văn Bình".into(),
            employee_id: None,
            status: "sent".into(),
            tax_rate: 8,
            packages: PACKAGES.into(),
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn packages_are_decoded_from_json() {
        let quotation = DomainQuotation::try_from(db_quotation()).expect("valid quotation");
        assert_eq!(quotation.status, QuotationStatus::Sent);
        assert_eq!(quotation.packages.len(), 1);
        assert_eq!(quotation.packages[0].items.len(), 2);

        let totals = quotation.totals().expect("totals");
        assert_eq!(totals.subtotal.get(), 500_000);
        assert_eq!(totals.tax.get(), 40_000);
        assert_eq!(totals.grand_total.get(), 540_000);
    }

    #[test]
    fn corrupt_packages_are_rejected() {
        let mut db = db_quotation();
        db.packages = r#"[{"name":"x","items":[{"name":"y","unit_price":-1,"quantity":1}]}]"#
            .into();
        assert!(DomainQuotation::try_from(db).is_err());
    }

    #[test]
    fn public_id_must_be_sixteen_bytes() {
        let mut db = db_quotation();
        db.public_id = vec![1, 2, 3];
        assert_eq!(
            DomainQuotation::try_from(db),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
