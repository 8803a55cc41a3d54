//! Quotations and their pricing.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::quotation::{NewQuotation, Quotation, TaxRate, UpdateQuotation};
use crate::domain::types::{EmployeeId, HubId, PublicId, QuotationId, QuotationStatus};
use crate::dto::{Paged, QuotationView};
use crate::forms::quotations::{QuotationForm, QuotationPayload};
use crate::query::ListQuery;
use crate::repository::{
    CustomerReader, EmployeeReader, QuotationListQuery, QuotationReader, QuotationWriter,
};
use crate::services::{
    ServiceError, ServiceResult, paged, parse_filter, parse_id_filter, requested_page, user_hub,
};
use crate::SERVICE_ACCESS_ROLE;

fn to_view(quotation: Quotation) -> ServiceResult<QuotationView> {
    let totals = quotation.totals().map_err(|err| {
        log::error!("Failed to price quotation {}: {err}", quotation.id);
        ServiceError::from(err)
    })?;
    Ok(QuotationView { quotation, totals })
}

/// Lists quotations with totals, filtered by `status` and `customer_id`.
pub fn list_quotations<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<QuotationView>>
where
    R: QuotationReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = QuotationListQuery::new(hub_id).paginate(page, per_page);
    if let Some(term) = query.search_term() {
        list_query = list_query.search(term);
    }
    if let Some(status) = parse_filter::<QuotationStatus>(query, "status")? {
        list_query = list_query.status(status);
    }
    if let Some(customer_id) = parse_id_filter(query, "customer_id")? {
        list_query = list_query.customer_id(customer_id);
    }

    let (total, quotations) = repo.list_quotations(list_query)?;
    let views = quotations
        .into_iter()
        .map(to_view)
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(paged(total, views, query))
}

pub fn get_quotation<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<QuotationView>
where
    R: QuotationReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let quotation = repo
        .get_quotation_by_id(QuotationId::new(id)?, user_hub(user)?)?
        .ok_or(ServiceError::NotFound)?;

    to_view(quotation)
}

fn ensure_employee<R>(repo: &R, employee_id: Option<EmployeeId>, hub_id: HubId) -> ServiceResult<()>
where
    R: EmployeeReader + ?Sized,
{
    if let Some(employee_id) = employee_id {
        if repo.get_employee_by_id(employee_id, hub_id)?.is_none() {
            return Err(ServiceError::Form(
                "Nhân viên phụ trách không tồn tại".to_string(),
            ));
        }
    }
    Ok(())
}

/// Creates a quotation; `default_tax_rate` applies when the form omits one.
pub fn create_quotation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: QuotationForm,
    default_tax_rate: i32,
) -> ServiceResult<QuotationView>
where
    R: QuotationWriter + CustomerReader + EmployeeReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = QuotationPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let draft = payload.into_draft(TaxRate::new(default_tax_rate)?)?;

    let customer = repo
        .get_customer_by_id(draft.customer_id, hub_id)?
        .ok_or_else(|| ServiceError::Form("Khách hàng không tồn tại".to_string()))?;
    ensure_employee(repo, draft.employee_id, hub_id)?;

    let new_quotation = NewQuotation {
        hub_id,
        public_id: PublicId::new(),
        customer_name: customer.name,
        draft,
    };

    to_view(repo.create_quotation(&new_quotation)?)
}

/// Replaces a quotation's content. Without an explicit tax rate the
/// quotation keeps its current one.
pub fn update_quotation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: QuotationForm,
) -> ServiceResult<QuotationView>
where
    R: QuotationReader + QuotationWriter + CustomerReader + EmployeeReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = QuotationPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let quotation_id = QuotationId::new(id)?;

    let existing = repo
        .get_quotation_by_id(quotation_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;
    let draft = payload.into_draft(existing.tax_rate)?;

    let customer = repo
        .get_customer_by_id(draft.customer_id, hub_id)?
        .ok_or_else(|| ServiceError::Form("Khách hàng không tồn tại".to_string()))?;
    ensure_employee(repo, draft.employee_id, hub_id)?;

    let updates = UpdateQuotation {
        customer_name: customer.name,
        draft,
    };

    to_view(repo.update_quotation(quotation_id, hub_id, &updates)?)
}

pub fn delete_quotation<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: QuotationWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.delete_quotation(QuotationId::new(id)?, user_hub(user)?)?;

    Ok(())
}
