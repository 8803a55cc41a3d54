use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::service_price::ServicePrice;
use crate::domain::types::ServicePriceId;
use crate::dto::Paged;
use crate::forms::service_prices::{ServicePriceForm, ServicePricePayload};
use crate::query::ListQuery;
use crate::repository::{ServicePriceListQuery, ServicePriceReader, ServicePriceWriter};
use crate::services::{
    ServiceError, ServiceResult, paged, parse_active_filter, requested_page, user_hub,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Lists priced services filtered by `service_group` and `status`.
pub fn list_service_prices<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<ServicePrice>>
where
    R: ServicePriceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = ServicePriceListQuery::new(hub_id).paginate(page, per_page);
    if let Some(term) = query.search_term() {
        list_query = list_query.search(term);
    }
    if let Some(service_group) = query.filter_value("service_group") {
        list_query = list_query.service_group(service_group);
    }
    if let Some(is_active) = parse_active_filter(query)? {
        list_query = list_query.active(is_active);
    }

    let (total, services) = repo.list_service_prices(list_query)?;

    Ok(paged(total, services, query))
}

pub fn create_service_price<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ServicePriceForm,
) -> ServiceResult<ServicePrice>
where
    R: ServicePriceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ServicePricePayload::try_from(form)?;
    let new_service = payload.into_new(user_hub(user)?);

    Ok(repo.create_service_price(&new_service)?)
}

/// Changing a price never touches quotations already issued.
pub fn update_service_price<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ServicePriceForm,
) -> ServiceResult<ServicePrice>
where
    R: ServicePriceReader + ServicePriceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = ServicePricePayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let service_id = ServicePriceId::new(id)?;

    repo.get_service_price_by_id(service_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.update_service_price(service_id, hub_id, &payload.into_update())?)
}

pub fn delete_service_price<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ServicePriceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_service_price(ServicePriceId::new(id)?, user_hub(user)?)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, viewer_user};

    fn form() -> ServicePriceForm {
        ServicePriceForm {
            name: "Vệ sinh máy lạnh".into(),
            service_group: "Vệ sinh".into(),
            unit: "máy".into(),
            price: 150_000,
            is_active: true,
        }
    }

    #[test]
    fn list_passes_group_filter() {
        let mut repo = MockRepository::new();
        repo.expect_list_service_prices()
            .withf(|q| q.service_group.as_deref() == Some("Vệ sinh") && q.is_active.is_none())
            .times(1)
            .returning(|_| Ok((0, vec![])));

        let query = ListQuery::new()
            .filter("service_group", "Vệ sinh")
            .filter("status", "all");

        assert!(list_service_prices(&repo, &viewer_user(), &query).is_ok());
    }

    #[test]
    fn only_admin_changes_prices() {
        let mut repo = MockRepository::new();
        repo.expect_create_service_price().times(0);

        assert!(matches!(
            create_service_price(&repo, &viewer_user(), form()),
            Err(ServiceError::Forbidden)
        ));
    }

    #[test]
    fn update_of_missing_service_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_service_price_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_update_service_price().times(0);

        assert!(matches!(
            update_service_price(&repo, &admin_user(), 9, form()),
            Err(ServiceError::NotFound)
        ));
    }
}
