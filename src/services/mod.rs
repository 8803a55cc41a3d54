//! Business workflows invoked by the HTTP routes.
//!
//! Every service function is generic over the repository traits it needs so
//! it can be exercised against `MockRepository` in unit tests.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::types::{ActiveStatus, HubId};
use crate::dto::Paged;
use crate::forms::FormError;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PaginationMeta};
use crate::query::{ListQuery, QueryError};
use crate::repository::errors::RepositoryError;

pub mod care;
pub mod care_activities;
pub mod customers;
pub mod employees;
pub mod quotations;
pub mod reject;
pub mod service_prices;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    Conflict(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(detail) => {
                log::warn!("Constraint violation: {detail}");
                ServiceError::Conflict(
                    "Dữ liệu bị trùng hoặc đang được sử dụng ở nơi khác".to_string(),
                )
            }
            other => {
                log::error!("Repository failure: {other}");
                ServiceError::Internal
            }
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<QueryError> for ServiceError {
    fn from(err: QueryError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Page requested by a list query; the page size is fixed server-side.
pub(crate) fn requested_page(query: &ListQuery) -> (usize, usize) {
    (query.page.max(1), DEFAULT_ITEMS_PER_PAGE)
}

/// Wraps a page of rows with metadata clamped to the available pages.
pub(crate) fn paged<T>(total: usize, items: Vec<T>, query: &ListQuery) -> Paged<T> {
    let (page, per_page) = requested_page(query);
    Paged {
        items,
        pagination: PaginationMeta::new(total, page, per_page),
    }
}

/// Parses a string-valued filter such as `status=new`.
pub(crate) fn parse_filter<T: FromStr>(query: &ListQuery, key: &str) -> ServiceResult<Option<T>> {
    Ok(query.parse_filter::<T>(key)?)
}

/// Parses an id-valued filter such as `group_id=3` into a typed id.
pub(crate) fn parse_id_filter<T>(query: &ListQuery, key: &str) -> ServiceResult<Option<T>>
where
    T: TryFrom<i32, Error = crate::domain::types::TypeConstraintError>,
{
    query
        .parse_filter::<i32>(key)?
        .map(T::try_from)
        .transpose()
        .map_err(|_| ServiceError::Form(format!("Giá trị `{key}` không hợp lệ")))
}

/// `status=active|inactive` filter of records carrying an `is_active` flag.
pub(crate) fn parse_active_filter(query: &ListQuery) -> ServiceResult<Option<bool>> {
    Ok(parse_filter::<ActiveStatus>(query, "status")?.map(ActiveStatus::is_active))
}

pub(crate) fn user_hub(user: &crate::auth::AuthenticatedUser) -> ServiceResult<HubId> {
    Ok(HubId::new(user.hub_id)?)
}

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod test_support {
    use crate::auth::AuthenticatedUser;
    use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

    /// Admin of hub 42.
    pub fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            hub_id: 42,
            name: "Admin".to_string(),
            roles: vec![
                SERVICE_ACCESS_ROLE.to_string(),
                SERVICE_ADMIN_ROLE.to_string(),
            ],
            exp: 0,
        }
    }

    /// Regular CRM user of hub 42 without admin rights.
    pub fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "viewer@example.com".to_string(),
            hub_id: 42,
            name: "Viewer".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    /// Token holder without any CRM role.
    pub fn outsider_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "3".to_string(),
            email: "outsider@example.com".to_string(),
            hub_id: 42,
            name: "Outsider".to_string(),
            roles: vec![],
            exp: 0,
        }
    }
}
