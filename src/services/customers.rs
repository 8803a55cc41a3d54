//! Customer management, including bulk CSV import.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::customer::{Customer, CustomerDetails, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerId, CustomerStatus, HubId, PotentialLevel};
use crate::dto::Paged;
use crate::forms::customers::{CustomerForm, CustomerPayload, UploadCustomersForm};
use crate::query::ListQuery;
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, EmployeeReader, QuotationReader,
    RejectReader,
};
use crate::services::{
    ServiceError, ServiceResult, paged, parse_filter, parse_id_filter, requested_page, user_hub,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Lists customers matching the search text and `status`, `potential`,
/// `source` and `employee_id` filters.
pub fn list_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<Paged<Customer>>
where
    R: CustomerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;
    let (page, per_page) = requested_page(query);

    let mut list_query = CustomerListQuery::new(hub_id).paginate(page, per_page);
    if let Some(term) = query.search_term() {
        list_query = list_query.search(term);
    }
    if let Some(status) = parse_filter::<CustomerStatus>(query, "status")? {
        list_query = list_query.status(status);
    }
    if let Some(potential) = parse_filter::<PotentialLevel>(query, "potential")? {
        list_query = list_query.potential(potential);
    }
    if let Some(source) = query.filter_value("source") {
        list_query = list_query.source(source);
    }
    if let Some(employee_id) = parse_id_filter(query, "employee_id")? {
        list_query = list_query.employee_id(employee_id);
    }

    let (total, customers) = repo.list_customers(list_query)?;

    Ok(paged(total, customers, query))
}

pub fn get_customer<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = user_hub(user)?;

    repo.get_customer_by_id(CustomerId::new(id)?, hub_id)?
        .ok_or(ServiceError::NotFound)
}

/// Assigned employee and reject reason must belong to the caller's hub.
fn ensure_references<R>(repo: &R, hub_id: HubId, details: &CustomerDetails) -> ServiceResult<()>
where
    R: EmployeeReader + RejectReader + ?Sized,
{
    if let Some(employee_id) = details.employee_id {
        if repo.get_employee_by_id(employee_id, hub_id)?.is_none() {
            return Err(ServiceError::Form(
                "Nhân viên phụ trách không tồn tại".to_string(),
            ));
        }
    }
    if let Some(reason_id) = details.reject_reason_id {
        if repo.get_reject_reason_by_id(reason_id, hub_id)?.is_none() {
            return Err(ServiceError::Form("Lý do từ chối không tồn tại".to_string()));
        }
    }
    Ok(())
}

pub fn create_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + EmployeeReader + RejectReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = CustomerPayload::try_from(form)?;
    let hub_id = user_hub(user)?;

    ensure_references(repo, hub_id, &payload.details)?;

    let customer = repo.create_customer(&NewCustomer::new(hub_id, payload.details))?;

    Ok(customer)
}

/// Updates a customer; its name is copied onto existing quotations.
pub fn update_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + EmployeeReader + RejectReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = CustomerPayload::try_from(form)?;
    let hub_id = user_hub(user)?;
    let customer_id = CustomerId::new(id)?;

    repo.get_customer_by_id(customer_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;
    ensure_references(repo, hub_id, &payload.details)?;

    let updates = UpdateCustomer::new(payload.details);
    let customer = repo.update_customer(customer_id, hub_id, &updates)?;

    Ok(customer)
}

/// Deletes a customer together with its care activities. Customers with
/// quotations are kept.
pub fn delete_customer<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + QuotationReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = user_hub(user)?;
    let customer_id = CustomerId::new(id)?;

    repo.get_customer_by_id(customer_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if repo.count_quotations_for_customer(customer_id, hub_id)? > 0 {
        return Err(ServiceError::Conflict(
            "Không thể xóa khách hàng đã có báo giá".to_string(),
        ));
    }

    repo.delete_customer(customer_id, hub_id)?;

    Ok(())
}

/// Imports every row of the uploaded CSV as a new customer.
pub fn upload_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &UploadCustomersForm,
) -> ServiceResult<usize>
where
    R: CustomerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let rows = form.parse().map_err(|err| {
        log::warn!("Rejected customer upload: {err}");
        ServiceError::from(err)
    })?;

    import_customers(repo, user_hub(user)?, rows)
}

fn import_customers<R>(repo: &R, hub_id: HubId, rows: Vec<CustomerDetails>) -> ServiceResult<usize>
where
    R: CustomerWriter + ?Sized,
{
    let new_customers: Vec<NewCustomer> = rows
        .into_iter()
        .map(|details| NewCustomer::new(hub_id, details))
        .collect();

    let created = repo.create_customers(&new_customers).map_err(|err| {
        log::error!("Failed to import customers: {err}");
        err
    })?;

    log::info!("Imported {created} customers into hub {hub_id}");

    Ok(created)
}
