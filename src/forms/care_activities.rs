use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{CareResultId, CustomerId, EmployeeId, Note};
use crate::forms::{FormError, optional, optional_id};

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/care-activities`.
pub struct CareActivityForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(range(min = 1))]
    pub care_result_id: i32,
    /// Defaults to the employee matching the caller's email.
    #[serde(default)]
    pub employee_id: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub note: Option<String>,
}

#[derive(Debug)]
pub struct CareActivityPayload {
    pub customer_id: CustomerId,
    pub care_result_id: CareResultId,
    pub employee_id: Option<EmployeeId>,
    pub note: Option<Note>,
}

impl TryFrom<CareActivityForm> for CareActivityPayload {
    type Error = FormError;

    fn try_from(form: CareActivityForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            customer_id: CustomerId::new(form.customer_id)?,
            care_result_id: CareResultId::new(form.care_result_id)?,
            employee_id: optional_id(form.employee_id)?,
            note: optional(form.note, Note::new)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_markup_is_sanitized() {
        let form: CareActivityForm = serde_json::from_str(
            r#"{"customer_id":1,"care_result_id":2,"note":"<script>x</script>Gọi lại sau"}"#,
        )
        .unwrap();

        let payload = CareActivityPayload::try_from(form).unwrap();

        assert_eq!(payload.note.unwrap().as_str(), "Gọi lại sau");
        assert_eq!(payload.employee_id, None);
    }
}
