//! Follow-up log of customer care.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::care_activity::{CareActivity, NewCareActivity};
use crate::domain::types::{CareActivityId, EmailAddress, EmployeeId, HubId};
use crate::dto::Paged;
use crate::forms::care_activities::{CareActivityForm, CareActivityPayload};
use crate::query::ListQuery;
use crate::repository::{
    CareActivityListQuery, CareActivityReader, CareActivityWriter, CareReader, CustomerReader,
    EmployeeReader,
};
use crate::services::{ServiceError, ServiceResult, paged, parse_id_filter, requested_page, user_hub};
use crate::SERVICE_ACCESS_ROLE;

/// Lists activities filtered by `customer_id`, `care_result_id` and
/// `employee_id`, newest first.
pub fn list_care_activities<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<CareActivity>>
where
    R: CareActivityReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = CareActivityListQuery::new(hub_id).paginate(page, per_page);
    if let Some(customer_id) = parse_id_filter(query, "customer_id")? {
        list_query = list_query.customer_id(customer_id);
    }
    if let Some(care_result_id) = parse_id_filter(query, "care_result_id")? {
        list_query = list_query.care_result_id(care_result_id);
    }
    if let Some(employee_id) = parse_id_filter(query, "employee_id")? {
        list_query = list_query.employee_id(employee_id);
    }

    let (total, activities) = repo.list_care_activities(list_query)?;

    Ok(paged(total, activities, query))
}

/// Explicit employee when given, otherwise the employee record matching the
/// caller's email (if any).
fn resolve_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    requested: Option<EmployeeId>,
    hub_id: HubId,
) -> ServiceResult<Option<EmployeeId>>
where
    R: EmployeeReader + ?Sized,
{
    if let Some(employee_id) = requested {
        return match repo.get_employee_by_id(employee_id, hub_id)? {
            Some(employee) => Ok(Some(employee.id)),
            None => Err(ServiceError::Form("Nhân viên không tồn tại".to_string())),
        };
    }

    let Ok(email) = EmailAddress::new(user.email.as_str()) else {
        return Ok(None);
    };
    Ok(repo
        .get_employee_by_email(&email, hub_id)?
        .map(|employee| employee.id))
}

pub fn create_care_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CareActivityForm,
) -> ServiceResult<CareActivity>
where
    R: CareActivityWriter + CustomerReader + CareReader + EmployeeReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = CareActivityPayload::try_from(form)?;
    let hub_id = user_hub(user)?;

    if repo.get_customer_by_id(payload.customer_id, hub_id)?.is_none() {
        return Err(ServiceError::Form("Khách hàng không tồn tại".to_string()));
    }
    if repo
        .get_care_result_by_id(payload.care_result_id, hub_id)?
        .is_none()
    {
        return Err(ServiceError::Form(
            "Kết quả chăm sóc không tồn tại".to_string(),
        ));
    }
    let employee_id = resolve_employee(repo, user, payload.employee_id, hub_id)?;

    let new_activity = NewCareActivity {
        hub_id,
        customer_id: payload.customer_id,
        employee_id,
        care_result_id: payload.care_result_id,
        note: payload.note,
    };

    Ok(repo.create_care_activity(&new_activity)?)
}

pub fn delete_care_activity<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CareActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.delete_care_activity(CareActivityId::new(id)?, user_hub(user)?)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::care::CareResult;
    use crate::domain::customer::Customer;
    use crate::domain::employee::Employee;
    use crate::domain::types::{
        CareGroupId, CareResultId, CustomerStatus, GroupName, Label, PersonName, PotentialLevel,
        TaxonomyItemName,
    };
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::viewer_user;

    fn customer(id: crate::domain::types::CustomerId) -> Customer {
        Customer {
            id,
            hub_id: HubId::new(42).unwrap(),
            name: PersonName::new("Mai").unwrap(),
            phone: None,
            email: None,
            address: None,
            source: None,
            potential: PotentialLevel::Medium,
            status: CustomerStatus::Caring,
            employee_id: None,
            reject_reason_id: None,
            note: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn care_result(id: CareResultId) -> CareResult {
        CareResult {
            id,
            hub_id: HubId::new(42).unwrap(),
            group_id: CareGroupId::new(1).unwrap(),
            group_name: GroupName::new("Gọi điện").unwrap(),
            name: TaxonomyItemName::new("Hẹn gọi lại").unwrap(),
            is_active: true,
        }
    }

    fn employee(email: &EmailAddress) -> Employee {
        Employee {
            id: EmployeeId::new(11).unwrap(),
            hub_id: HubId::new(42).unwrap(),
            name: PersonName::new("Viewer").unwrap(),
            email: email.clone(),
            phone: None,
            position: Label::new("Sales").unwrap(),
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn activity_defaults_to_callers_employee_record() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(customer(id))));
        repo.expect_get_care_result_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(care_result(id))));
        repo.expect_get_employee_by_email()
            .withf(|email, _| email.as_str() == "viewer@example.com")
            .times(1)
            .returning(|email, _| Ok(Some(employee(email))));
        repo.expect_create_care_activity()
            .withf(|new| new.employee_id.map(|id| id.get()) == Some(11) && new.hub_id.get() == 42)
            .times(1)
            .returning(|new| {
                Ok(CareActivity {
                    id: CareActivityId::new(1).unwrap(),
                    hub_id: new.hub_id,
                    customer_id: new.customer_id,
                    employee_id: new.employee_id,
                    care_result_id: new.care_result_id,
                    care_result_name: TaxonomyItemName::new("Hẹn gọi lại").unwrap(),
                    note: new.note.clone(),
                    created_at: NaiveDateTime::default(),
                })
            });

        let form = CareActivityForm {
            customer_id: 1,
            care_result_id: 2,
            employee_id: None,
            note: Some("Khách hẹn tuần sau".into()),
        };
        let activity = create_care_activity(&repo, &viewer_user(), form).unwrap();

        assert_eq!(activity.care_result_name.as_str(), "Hẹn gọi lại");
    }

    #[test]
    fn unknown_care_result_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(customer(id))));
        repo.expect_get_care_result_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_care_activity().times(0);

        let form = CareActivityForm {
            customer_id: 1,
            care_result_id: 2,
            employee_id: None,
            note: None,
        };

        assert!(matches!(
            create_care_activity(&repo, &viewer_user(), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn list_filters_by_customer() {
        let mut repo = MockRepository::new();
        repo.expect_list_care_activities()
            .withf(|q| q.customer_id.map(|id| id.get()) == Some(1) && q.employee_id.is_none())
            .times(1)
            .returning(|_| Ok((0, vec![])));

        let query = ListQuery::new().filter("customer_id", "1");
        assert!(list_care_activities(&repo, &viewer_user(), &query).is_ok());
    }
}
