use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::employee::Employee;
use crate::domain::types::EmployeeId;
use crate::dto::Paged;
use crate::forms::employees::{EmployeeForm, EmployeePayload};
use crate::query::ListQuery;
use crate::repository::{EmployeeListQuery, EmployeeReader, EmployeeWriter};
use crate::services::{
    ServiceError, ServiceResult, paged, parse_active_filter, requested_page, user_hub,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Lists employees filtered by `position` and `status` (active/inactive).
pub fn list_employees<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<Employee>>
where
    R: EmployeeReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = EmployeeListQuery::new(hub_id).paginate(page, per_page);
    if let Some(term) = query.search_term() {
        list_query = list_query.search(term);
    }
    if let Some(position) = query.filter_value("position") {
        list_query = list_query.position(position);
    }
    if let Some(is_active) = parse_active_filter(query)? {
        list_query = list_query.active(is_active);
    }

    let (total, employees) = repo.list_employees(list_query)?;

    Ok(paged(total, employees, query))
}

pub fn get_employee<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Employee>
where
    R: EmployeeReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;

    repo.get_employee_by_id(EmployeeId::new(id)?, hub_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = EmployeePayload::try_from(form)?;
    let hub_id = user_hub(user)?;

    if repo.get_employee_by_email(&payload.email, hub_id)?.is_some() {
        return Err(ServiceError::Conflict(
            "Email đã được sử dụng cho nhân viên khác".to_string(),
        ));
    }

    let employee = repo.create_employee(&payload.into_new(hub_id))?;

    Ok(employee)
}

pub fn update_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = EmployeePayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let employee_id = EmployeeId::new(id)?;

    repo.get_employee_by_id(employee_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(other) = repo.get_employee_by_email(&payload.email, hub_id)? {
        if other.id != employee_id {
            return Err(ServiceError::Conflict(
                "Email đã được sử dụng cho nhân viên khác".to_string(),
            ));
        }
    }

    let employee = repo.update_employee(employee_id, hub_id, &payload.into_update())?;

    Ok(employee)
}

/// Deletes an employee; customers, activities and quotations assigned to
/// them become unassigned.
pub fn delete_employee<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = user_hub(user)?;

    repo.delete_employee(EmployeeId::new(id)?, hub_id)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::types::{EmailAddress, HubId, Label, PersonName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, viewer_user};

    fn employee(id: i32, email: &str) -> Employee {
        Employee {
            id: EmployeeId::new(id).unwrap(),
            hub_id: HubId::new(42).unwrap(),
            name: PersonName::new("Phạm Minh").unwrap(),
            email: EmailAddress::new(email).unwrap(),
            phone: None,
            position: Label::new("Sales").unwrap(),
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn form(email: &str) -> EmployeeForm {
        EmployeeForm {
            name: "Phạm Minh".into(),
            email: email.into(),
            phone: None,
            position: "Sales".into(),
            is_active: true,
        }
    }

    #[test]
    fn list_maps_status_filter_to_flag() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees()
            .withf(|q| {
                q.is_active == Some(true)
                    && q.position.as_deref() == Some("Sales")
                    && q.search.is_none()
            })
            .times(1)
            .returning(|_| Ok((1, vec![employee(1, "minh@example.com")])));

        let query = ListQuery::new()
            .filter("status", "active")
            .filter("position", "Sales");
        let page = list_employees(&repo, &viewer_user(), &query).unwrap();

        assert_eq!(page.pagination.pages, 1);
    }

    #[test]
    fn create_requires_admin() {
        let mut repo = MockRepository::new();
        repo.expect_create_employee().times(0);

        let result = create_employee(&repo, &viewer_user(), form("minh@example.com"));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn create_rejects_duplicate_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_employee_by_email()
            .withf(|email, hub| email.as_str() == "minh@example.com" && hub.get() == 42)
            .times(1)
            .returning(|email, _| Ok(Some(employee(7, email.as_str()))));
        repo.expect_create_employee().times(0);

        let result = create_employee(&repo, &admin_user(), form("Minh@Example.com"));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn update_keeps_own_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_employee_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(employee(id.get(), "minh@example.com"))));
        repo.expect_get_employee_by_email()
            .times(1)
            .returning(|email, _| Ok(Some(employee(7, email.as_str()))));
        repo.expect_update_employee()
            .withf(|id, _, updates| id.get() == 7 && updates.position.as_str() == "Sales")
            .times(1)
            .returning(|id, _, _| Ok(employee(id.get(), "minh@example.com")));

        let updated = update_employee(&repo, &admin_user(), 7, form("minh@example.com")).unwrap();

        assert_eq!(updated.id.get(), 7);
    }

    #[test]
    fn delete_of_foreign_employee_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_employee()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = delete_employee(&repo, &admin_user(), 3);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
