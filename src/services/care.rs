//! Care-result taxonomy: groups and the results filed under them.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::care::{
    CareGroup, CareResult, NewCareGroup, NewCareResult, UpdateCareGroup, UpdateCareResult,
};
use crate::domain::types::{CareGroupId, CareResultId, HubId};
use crate::dto::Paged;
use crate::forms::taxonomy::{GroupForm, GroupPayload, ItemForm, ItemPayload};
use crate::query::ListQuery;
use crate::repository::{CareActivityReader, CareReader, CareResultListQuery, CareWriter};
use crate::services::{
    ServiceError, ServiceResult, paged, parse_active_filter, parse_id_filter, requested_page,
    user_hub,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_care_groups<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CareGroup>>
where
    R: CareReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_care_groups(user_hub(user)?)?)
}

pub fn create_care_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: GroupForm,
) -> ServiceResult<CareGroup>
where
    R: CareWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = GroupPayload::try_from(form)?;
    let new_group = NewCareGroup {
        hub_id: user_hub(user)?,
        name: payload.name,
        description: payload.description,
    };

    Ok(repo.create_care_group(&new_group)?)
}

/// Renames a group; results carrying the old name are updated with it.
pub fn update_care_group<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: GroupForm,
) -> ServiceResult<CareGroup>
where
    R: CareReader + CareWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = GroupPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let group_id = CareGroupId::new(id)?;

    repo.get_care_group_by_id(group_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = UpdateCareGroup {
        name: payload.name,
        description: payload.description,
    };

    Ok(repo.update_care_group(group_id, hub_id, &updates)?)
}

/// Deletes an empty group.
pub fn delete_care_group<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CareReader + CareWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = user_hub(user)?;
    let group_id = CareGroupId::new(id)?;

    repo.get_care_group_by_id(group_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if repo.count_care_results_in_group(group_id, hub_id)? > 0 {
        return Err(ServiceError::Conflict(
            "Chỉ xóa được nhóm khi không còn kết quả chăm sóc".to_string(),
        ));
    }

    repo.delete_care_group(group_id, hub_id)?;

    Ok(())
}

/// Lists results filtered by `group_id` and `status`.
pub fn list_care_results<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<CareResult>>
where
    R: CareReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = CareResultListQuery::new(hub_id).paginate(page, per_page);
    if let Some(term) = query.search_term() {
        list_query = list_query.search(term);
    }
    if let Some(group_id) = parse_id_filter(query, "group_id")? {
        list_query = list_query.group_id(group_id);
    }
    if let Some(is_active) = parse_active_filter(query)? {
        list_query = list_query.active(is_active);
    }

    let (total, results) = repo.list_care_results(list_query)?;

    Ok(paged(total, results, query))
}

fn ensure_group<R>(repo: &R, group_id: i32, hub_id: HubId) -> ServiceResult<CareGroupId>
where
    R: CareReader + ?Sized,
{
    let group_id = CareGroupId::new(group_id)?;
    match repo.get_care_group_by_id(group_id, hub_id)? {
        Some(_) => Ok(group_id),
        None => Err(ServiceError::Form("Nhóm kết quả không tồn tại".to_string())),
    }
}

pub fn create_care_result<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ItemForm,
) -> ServiceResult<CareResult>
where
    R: CareReader + CareWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ItemPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let group_id = ensure_group(repo, payload.group_id, hub_id)?;

    let new_result = NewCareResult {
        hub_id,
        group_id,
        name: payload.name,
        is_active: payload.is_active,
    };

    Ok(repo.create_care_result(&new_result)?)
}

/// Updates a result; logged activities pick up the new name.
pub fn update_care_result<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ItemForm,
) -> ServiceResult<CareResult>
where
    R: CareReader + CareWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ItemPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let result_id = CareResultId::new(id)?;

    repo.get_care_result_by_id(result_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;
    let group_id = ensure_group(repo, payload.group_id, hub_id)?;

    let updates = UpdateCareResult {
        group_id,
        name: payload.name,
        is_active: payload.is_active,
    };

    Ok(repo.update_care_result(result_id, hub_id, &updates)?)
}

/// Deletes a result no care activity refers to.
pub fn delete_care_result<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CareReader + CareWriter + CareActivityReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = user_hub(user)?;
    let result_id = CareResultId::new(id)?;

    repo.get_care_result_by_id(result_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if repo.count_care_activities_with_result(result_id, hub_id)? > 0 {
        return Err(ServiceError::Conflict(
            "Không thể xóa kết quả chăm sóc đã được ghi nhận trong lịch sử chăm sóc"
                .to_string(),
        ));
    }

    repo.delete_care_result(result_id, hub_id)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{GroupName, TaxonomyItemName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, viewer_user};

    fn group(id: i32, name: &str) -> CareGroup {
        CareGroup {
            id: CareGroupId::new(id).unwrap(),
            hub_id: HubId::new(42).unwrap(),
            name: GroupName::new(name).unwrap(),
            description: None,
        }
    }

    fn result(id: i32, group_id: i32) -> CareResult {
        CareResult {
            id: CareResultId::new(id).unwrap(),
            hub_id: HubId::new(42).unwrap(),
            group_id: CareGroupId::new(group_id).unwrap(),
            group_name: GroupName::new("Gọi điện").unwrap(),
            name: TaxonomyItemName::new("Hẹn gọi lại").unwrap(),
            is_active: true,
        }
    }

    fn item_form(group_id: i32) -> ItemForm {
        ItemForm {
            group_id,
            name: "Hẹn gọi lại".into(),
            is_active: true,
        }
    }

    #[test]
    fn group_with_results_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_care_group_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(group(id.get(), "Gọi điện"))));
        repo.expect_count_care_results_in_group()
            .withf(|id, hub| id.get() == 5 && hub.get() == 42)
            .times(1)
            .returning(|_, _| Ok(3));
        repo.expect_delete_care_group().times(0);

        let result = delete_care_group(&repo, &admin_user(), 5);

        match result {
            Err(ServiceError::Conflict(message)) => {
                assert!(message.starts_with("Chỉ xóa được nhóm khi không còn kết quả"))
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn empty_group_is_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_care_group_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(group(id.get(), "Gọi điện"))));
        repo.expect_count_care_results_in_group()
            .times(1)
            .returning(|_, _| Ok(0));
        repo.expect_delete_care_group()
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(delete_care_group(&repo, &admin_user(), 5).is_ok());
    }

    #[test]
    fn viewer_cannot_create_groups() {
        let mut repo = MockRepository::new();
        repo.expect_create_care_group().times(0);

        let form = GroupForm {
            name: "Gặp mặt".into(),
            description: None,
        };

        assert!(matches!(
            create_care_group(&repo, &viewer_user(), form),
            Err(ServiceError::Forbidden)
        ));
    }

    #[test]
    fn result_needs_an_existing_group() {
        let mut repo = MockRepository::new();
        repo.expect_get_care_group_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_care_result().times(0);

        let result = create_care_result(&repo, &admin_user(), item_form(8));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn result_is_created_in_callers_hub() {
        let mut repo = MockRepository::new();
        repo.expect_get_care_group_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(group(id.get(), "Gọi điện"))));
        repo.expect_create_care_result()
            .withf(|new| new.hub_id.get() == 42 && new.group_id.get() == 8)
            .times(1)
            .returning(|new| Ok(result(1, new.group_id.get())));

        let created = create_care_result(&repo, &admin_user(), item_form(8)).unwrap();

        assert_eq!(created.group_id.get(), 8);
    }

    #[test]
    fn used_result_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_care_result_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(result(id.get(), 1))));
        repo.expect_count_care_activities_with_result()
            .times(1)
            .returning(|_, _| Ok(1));
        repo.expect_delete_care_result().times(0);

        assert!(matches!(
            delete_care_result(&repo, &admin_user(), 2),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn list_filters_by_group_and_status() {
        let mut repo = MockRepository::new();
        repo.expect_list_care_results()
            .withf(|q| {
                q.group_id.map(|id| id.get()) == Some(1) && q.is_active == Some(false)
            })
            .times(1)
            .returning(|_| Ok((0, vec![])));

        let query = ListQuery::new()
            .filter("group_id", "1")
            .filter("status", "inactive");
        let page = list_care_results(&repo, &viewer_user(), &query).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.pages, 0);
    }
}
