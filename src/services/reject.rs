//! Reject-reason taxonomy: groups and the reasons filed under them.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::reject::{
    NewRejectGroup, NewRejectReason, RejectGroup, RejectReason, UpdateRejectGroup,
    UpdateRejectReason,
};
use crate::domain::types::{HubId, RejectGroupId, RejectReasonId};
use crate::dto::Paged;
use crate::forms::taxonomy::{GroupForm, GroupPayload, ItemForm, ItemPayload};
use crate::query::ListQuery;
use crate::repository::{CustomerReader, RejectReader, RejectReasonListQuery, RejectWriter};
use crate::services::{
    ServiceError, ServiceResult, paged, parse_active_filter, parse_id_filter, requested_page,
    user_hub,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_reject_groups<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<RejectGroup>>
where
    R: RejectReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_reject_groups(user_hub(user)?)?)
}

pub fn create_reject_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: GroupForm,
) -> ServiceResult<RejectGroup>
where
    R: RejectWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = GroupPayload::try_from(form)?;
    let new_group = NewRejectGroup {
        hub_id: user_hub(user)?,
        name: payload.name,
        description: payload.description,
    };

    Ok(repo.create_reject_group(&new_group)?)
}

/// Renames a group; reasons carrying the old name are updated with it.
pub fn update_reject_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: GroupForm,
) -> ServiceResult<RejectGroup>
where
    R: RejectReader + RejectWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = GroupPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let group_id = RejectGroupId::new(id)?;

    repo.get_reject_group_by_id(group_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = UpdateRejectGroup {
        name: payload.name,
        description: payload.description,
    };

    Ok(repo.update_reject_group(group_id, hub_id, &updates)?)
}

/// Deletes an empty group.
pub fn delete_reject_group<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: RejectReader + RejectWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = user_hub(user)?;
    let group_id = RejectGroupId::new(id)?;

    repo.get_reject_group_by_id(group_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if repo.count_reject_reasons_in_group(group_id, hub_id)? > 0 {
        return Err(ServiceError::Conflict(
            "Chỉ xóa được nhóm khi không còn lý do từ chối".to_string(),
        ));
    }

    repo.delete_reject_group(group_id, hub_id)?;

    Ok(())
}

/// Lists reasons filtered by `group_id` and `status`.
pub fn list_reject_reasons<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<RejectReason>>
where
    R: RejectReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = RejectReasonListQuery::new(hub_id).paginate(page, per_page);
    if let Some(term) = query.search_term() {
        list_query = list_query.search(term);
    }
    if let Some(group_id) = parse_id_filter(query, "group_id")? {
        list_query = list_query.group_id(group_id);
    }
    if let Some(is_active) = parse_active_filter(query)? {
        list_query = list_query.active(is_active);
    }

    let (total, reasons) = repo.list_reject_reasons(list_query)?;

    Ok(paged(total, reasons, query))
}

fn ensure_group<R>(repo: &R, group_id: i32, hub_id: HubId) -> ServiceResult<RejectGroupId>
where
    R: RejectReader + ?Sized,
{
    let group_id = RejectGroupId::new(group_id)?;
    match repo.get_reject_group_by_id(group_id, hub_id)? {
        Some(_) => Ok(group_id),
        None => Err(ServiceError::Form("Nhóm lý do không tồn tại".to_string())),
    }
}

pub fn create_reject_reason<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ItemForm,
) -> ServiceResult<RejectReason>
where
    R: RejectReader + RejectWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ItemPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let group_id = ensure_group(repo, payload.group_id, hub_id)?;

    let new_reason = NewRejectReason {
        hub_id,
        group_id,
        name: payload.name,
        is_active: payload.is_active,
    };

    Ok(repo.create_reject_reason(&new_reason)?)
}

pub fn update_reject_reason<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ItemForm,
) -> ServiceResult<RejectReason>
where
    R: RejectReader + RejectWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ItemPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let reason_id = RejectReasonId::new(id)?;

    repo.get_reject_reason_by_id(reason_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;
    let group_id = ensure_group(repo, payload.group_id, hub_id)?;

    let updates = UpdateRejectReason {
        group_id,
        name: payload.name,
        is_active: payload.is_active,
    };

    Ok(repo.update_reject_reason(reason_id, hub_id, &updates)?)
}

/// Deletes a reason no customer refers to.
pub fn delete_reject_reason<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: RejectReader + RejectWriter + CustomerReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = user_hub(user)?;
    let reason_id = RejectReasonId::new(id)?;

    repo.get_reject_reason_by_id(reason_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if repo.count_customers_with_reject_reason(reason_id, hub_id)? > 0 {
        return Err(ServiceError::Conflict(
            "Không thể xóa lý do từ chối đang được gán cho khách hàng".to_string(),
        ));
    }

    repo.delete_reject_reason(reason_id, hub_id)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::GroupName;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::admin_user;

    fn group(id: i32) -> RejectGroup {
        RejectGroup {
            id: RejectGroupId::new(id).unwrap(),
            hub_id: HubId::new(42).unwrap(),
            name: GroupName::new("Giá").unwrap(),
            description: None,
        }
    }

    #[test]
    fn group_with_reasons_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_reject_group_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(group(id.get()))));
        repo.expect_count_reject_reasons_in_group()
            .times(1)
            .returning(|_, _| Ok(1));
        repo.expect_delete_reject_group().times(0);

        match delete_reject_group(&repo, &admin_user(), 2) {
            Err(ServiceError::Conflict(message)) => {
                assert_eq!(message, "Chỉ xóa được nhóm khi không còn lý do từ chối")
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn missing_group_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_reject_group_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_count_reject_reasons_in_group().times(0);

        assert!(matches!(
            delete_reject_group(&repo, &admin_user(), 2),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn reason_assigned_to_customers_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_reject_reason_by_id()
            .times(1)
            .returning(|id, hub| {
                Ok(Some(RejectReason {
                    id,
                    hub_id: hub,
                    group_id: RejectGroupId::new(1).unwrap(),
                    group_name: GroupName::new("Giá").unwrap(),
                    name: crate::domain::types::TaxonomyItemName::new("Giá cao").unwrap(),
                    is_active: true,
                }))
            });
        repo.expect_count_customers_with_reject_reason()
            .withf(|id, hub| id.get() == 4 && hub.get() == 42)
            .times(1)
            .returning(|_, _| Ok(6));
        repo.expect_delete_reject_reason().times(0);

        assert!(matches!(
            delete_reject_reason(&repo, &admin_user(), 4),
            Err(ServiceError::Conflict(_))
        ));
    }
}
