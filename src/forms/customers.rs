use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::CustomerDetails;
use crate::domain::types::{
    CustomerStatus, EmailAddress, Label, Note, PersonName, PhoneNumber, PotentialLevel,
};
use crate::forms::{FormError, non_blank, optional, optional_id};

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/customers` and `PUT /api/customers/{id}`.
pub struct CustomerForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub source: Option<String>,
    #[serde(default)]
    pub potential: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub employee_id: Option<i32>,
    #[serde(default)]
    pub reject_reason_id: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub note: Option<String>,
}

/// Validated customer fields ready to be persisted.
#[derive(Debug)]
pub struct CustomerPayload {
    pub details: CustomerDetails,
}

impl TryFrom<CustomerForm> for CustomerPayload {
    type Error = FormError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let potential = match non_blank(form.potential) {
            Some(raw) => raw.parse::<PotentialLevel>()?,
            None => PotentialLevel::Medium,
        };
        let status = match non_blank(form.status) {
            Some(raw) => raw.parse::<CustomerStatus>()?,
            None => CustomerStatus::New,
        };

        Ok(Self {
            details: CustomerDetails {
                name: PersonName::new(form.name)?,
                phone: optional(form.phone, PhoneNumber::new)?,
                email: optional(form.email, EmailAddress::new)?,
                address: non_blank(form.address),
                source: optional(form.source, Label::new)?,
                potential,
                status,
                employee_id: optional_id(form.employee_id)?,
                reject_reason_id: optional_id(form.reject_reason_id)?,
                note: optional(form.note, Note::new)?,
            }
            .normalized(),
        })
    }
}

#[derive(MultipartForm)]
/// Multipart body of `POST /api/customers/upload`.
pub struct UploadCustomersForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

#[derive(Debug, Deserialize)]
struct CustomerCsvRow {
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl UploadCustomersForm {
    /// Parses the uploaded file; any invalid row rejects the whole upload.
    pub fn parse(&self) -> Result<Vec<CustomerDetails>, FormError> {
        let file = self
            .csv
            .file
            .reopen()
            .map_err(|err| FormError::Csv(err.to_string()))?;
        parse_customers_csv(file)
    }
}

/// Reads customer rows from CSV with a `name,phone,email,address,source` header.
///
/// Imported customers start in the `new` stage with medium potential.
pub fn parse_customers_csv<R: Read>(reader: R) -> Result<Vec<CustomerDetails>, FormError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut customers = Vec::new();
    for (index, record) in rdr.deserialize::<CustomerCsvRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = record.map_err(|err| FormError::Csv(err.to_string()))?;
        let details = row_to_details(row).map_err(|err| FormError::InvalidRow {
            line,
            reason: err.to_string(),
        })?;
        customers.push(details);
    }

    if customers.is_empty() {
        return Err(FormError::Csv("tệp không có dữ liệu".to_string()));
    }
    Ok(customers)
}

fn row_to_details(row: CustomerCsvRow) -> Result<CustomerDetails, FormError> {
    Ok(CustomerDetails {
        name: PersonName::new(row.name)?,
        phone: optional(row.phone, PhoneNumber::new)?,
        email: optional(row.email, EmailAddress::new)?,
        address: non_blank(row.address),
        source: optional(row.source, Label::new)?,
        potential: PotentialLevel::Medium,
        status: CustomerStatus::New,
        employee_id: None,
        reject_reason_id: None,
        note: None,
    })
}
