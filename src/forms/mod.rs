//! JSON payloads accepted by the API and their conversion into domain values.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod care_activities;
pub mod customers;
pub mod employees;
pub mod quotations;
pub mod service_prices;
pub mod taxonomy;

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("Dữ liệu không hợp lệ: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Email không hợp lệ")]
    InvalidEmail,

    #[error("Tên không được để trống")]
    InvalidName,

    #[error("Số điện thoại không hợp lệ")]
    InvalidPhoneNumber,

    #[error("Mã định danh không hợp lệ")]
    InvalidId,

    #[error("Giá trị không hợp lệ: {0}")]
    InvalidValue(String),

    #[error("Không đọc được tệp CSV: {0}")]
    Csv(String),

    #[error("Dòng {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::NonPositiveId => FormError::InvalidId,
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::EmptyString => FormError::InvalidName,
            TypeConstraintError::InvalidPhone => FormError::InvalidPhoneNumber,
            other => FormError::InvalidValue(other.to_string()),
        }
    }
}

/// Trims the value and turns blank input into `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Converts an optional raw value, treating blank input as absent.
pub(crate) fn optional<T, F>(value: Option<String>, convert: F) -> Result<Option<T>, FormError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    non_blank(value)
        .map(convert)
        .transpose()
        .map_err(FormError::from)
}

/// Converts an optional raw id; `0` and absence both mean "not set".
pub(crate) fn optional_id<T>(value: Option<i32>) -> Result<Option<T>, FormError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    value
        .filter(|id| *id != 0)
        .map(T::try_from)
        .transpose()
        .map_err(FormError::from)
}
