use crate::db::{DbConnection, DbPool};
use crate::domain::{
    care::{
        CareGroup, CareResult, NewCareGroup, NewCareResult, UpdateCareGroup, UpdateCareResult,
    },
    care_activity::{CareActivity, NewCareActivity},
    customer::{Customer, NewCustomer, UpdateCustomer},
    employee::{Employee, NewEmployee, UpdateEmployee},
    quotation::{NewQuotation, Quotation, UpdateQuotation},
    reject::{
        NewRejectGroup, NewRejectReason, RejectGroup, RejectReason, UpdateRejectGroup,
        UpdateRejectReason,
    },
    service_price::{NewServicePrice, ServicePrice, UpdateServicePrice},
    types::{
        CareActivityId, CareGroupId, CareResultId, CustomerId, CustomerStatus, EmailAddress,
        EmployeeId, HubId, PotentialLevel, QuotationId, QuotationStatus, RejectGroupId,
        RejectReasonId, ServicePriceId,
    },
};
use crate::pagination;
use crate::repository::errors::RepositoryResult;

pub mod care;
pub mod care_activity;
pub mod customer;
pub mod employee;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod quotation;
pub mod reject;
pub mod service_price;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// `LIMIT`/`OFFSET` for a collection of `total` rows; the page is clamped
    /// to the last one available.
    pub(crate) fn window(&self, total: usize) -> (i64, i64) {
        let pages = pagination::total_pages(total, self.per_page);
        let page = pagination::clamp_page(self.page, pages);
        (
            self.per_page as i64,
            pagination::offset(page, self.per_page) as i64,
        )
    }
}

/// `%term%` pattern for substring `LIKE` searches.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

macro_rules! list_query_common {
    ($name:ident) => {
        impl $name {
            pub fn search(mut self, term: impl Into<String>) -> Self {
                let term = term.into();
                let term = term.trim();
                self.search = (!term.is_empty()).then(|| term.to_string());
                self
            }

            pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
                self.pagination = Some(Pagination { page, per_page });
                self
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerListQuery {
    pub hub_id: HubId,
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub potential: Option<PotentialLevel>,
    pub source: Option<String>,
    pub employee_id: Option<EmployeeId>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            search: None,
            status: None,
            potential: None,
            source: None,
            employee_id: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn potential(mut self, potential: PotentialLevel) -> Self {
        self.potential = Some(potential);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn employee_id(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }
}

list_query_common!(CustomerListQuery);

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeListQuery {
    pub hub_id: HubId,
    pub search: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl EmployeeListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            search: None,
            position: None,
            is_active: None,
            pagination: None,
        }
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

list_query_common!(EmployeeListQuery);

/// Filters for the items of a group/item taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyItemListQuery<G> {
    pub hub_id: HubId,
    pub search: Option<String>,
    pub group_id: Option<G>,
    pub is_active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl<G> TaxonomyItemListQuery<G> {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            search: None,
            group_id: None,
            is_active: None,
            pagination: None,
        }
    }

    pub fn group_id(mut self, group_id: G) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub type CareResultListQuery = TaxonomyItemListQuery<CareGroupId>;
pub type RejectReasonListQuery = TaxonomyItemListQuery<RejectGroupId>;

#[derive(Debug, Clone, PartialEq)]
pub struct ServicePriceListQuery {
    pub hub_id: HubId,
    pub search: Option<String>,
    pub service_group: Option<String>,
    pub is_active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl ServicePriceListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            search: None,
            service_group: None,
            is_active: None,
            pagination: None,
        }
    }

    pub fn service_group(mut self, service_group: impl Into<String>) -> Self {
        self.service_group = Some(service_group.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

list_query_common!(ServicePriceListQuery);

#[derive(Debug, Clone, PartialEq)]
pub struct QuotationListQuery {
    pub hub_id: HubId,
    pub search: Option<String>,
    pub status: Option<QuotationStatus>,
    pub customer_id: Option<CustomerId>,
    pub pagination: Option<Pagination>,
}

impl QuotationListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            search: None,
            status: None,
            customer_id: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: QuotationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

list_query_common!(QuotationListQuery);

#[derive(Debug, Clone, PartialEq)]
pub struct CareActivityListQuery {
    pub hub_id: HubId,
    pub customer_id: Option<CustomerId>,
    pub care_result_id: Option<CareResultId>,
    pub employee_id: Option<EmployeeId>,
    pub pagination: Option<Pagination>,
}

impl CareActivityListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            customer_id: None,
            care_result_id: None,
            employee_id: None,
            pagination: None,
        }
    }

    pub fn customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn care_result_id(mut self, care_result_id: CareResultId) -> Self {
        self.care_result_id = Some(care_result_id);
        self
    }

    pub fn employee_id(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId, hub_id: HubId)
    -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    fn count_customers_with_reject_reason(
        &self,
        reject_reason_id: RejectReasonId,
        hub_id: HubId,
    ) -> RepositoryResult<usize>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
    /// Updates the customer and the customer name copied into its quotations.
    fn update_customer(
        &self,
        id: CustomerId,
        hub_id: HubId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    /// Deletes the customer together with its care activities.
    fn delete_customer(&self, id: CustomerId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(&self, id: EmployeeId, hub_id: HubId)
    -> RepositoryResult<Option<Employee>>;
    fn get_employee_by_email(
        &self,
        email: &EmailAddress,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Employee>>;
    fn list_employees(&self, query: EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
}

pub trait EmployeeWriter {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
    fn update_employee(
        &self,
        id: EmployeeId,
        hub_id: HubId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee>;
    /// Deletes the employee and unassigns everything that referenced them.
    fn delete_employee(&self, id: EmployeeId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait CareReader {
    fn list_care_groups(&self, hub_id: HubId) -> RepositoryResult<Vec<CareGroup>>;
    fn get_care_group_by_id(
        &self,
        id: CareGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<CareGroup>>;
    fn get_care_result_by_id(
        &self,
        id: CareResultId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<CareResult>>;
    fn list_care_results(
        &self,
        query: CareResultListQuery,
    ) -> RepositoryResult<(usize, Vec<CareResult>)>;
    fn count_care_results_in_group(
        &self,
        group_id: CareGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<usize>;
}

pub trait CareWriter {
    fn create_care_group(&self, new_group: &NewCareGroup) -> RepositoryResult<CareGroup>;
    /// Renames the group and refreshes the group name stored on its results.
    fn update_care_group(
        &self,
        id: CareGroupId,
        hub_id: HubId,
        updates: &UpdateCareGroup,
    ) -> RepositoryResult<CareGroup>;
    fn delete_care_group(&self, id: CareGroupId, hub_id: HubId) -> RepositoryResult<()>;
    fn create_care_result(&self, new_result: &NewCareResult) -> RepositoryResult<CareResult>;
    fn update_care_result(
        &self,
        id: CareResultId,
        hub_id: HubId,
        updates: &UpdateCareResult,
    ) -> RepositoryResult<CareResult>;
    fn delete_care_result(&self, id: CareResultId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait RejectReader {
    fn list_reject_groups(&self, hub_id: HubId) -> RepositoryResult<Vec<RejectGroup>>;
    fn get_reject_group_by_id(
        &self,
        id: RejectGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<RejectGroup>>;
    fn get_reject_reason_by_id(
        &self,
        id: RejectReasonId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<RejectReason>>;
    fn list_reject_reasons(
        &self,
        query: RejectReasonListQuery,
    ) -> RepositoryResult<(usize, Vec<RejectReason>)>;
    fn count_reject_reasons_in_group(
        &self,
        group_id: RejectGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<usize>;
}

pub trait RejectWriter {
    fn create_reject_group(&self, new_group: &NewRejectGroup) -> RepositoryResult<RejectGroup>;
    /// Renames the group and refreshes the group name stored on its reasons.
    fn update_reject_group(
        &self,
        id: RejectGroupId,
        hub_id: HubId,
        updates: &UpdateRejectGroup,
    ) -> RepositoryResult<RejectGroup>;
    fn delete_reject_group(&self, id: RejectGroupId, hub_id: HubId) -> RepositoryResult<()>;
    fn create_reject_reason(&self, new_reason: &NewRejectReason)
    -> RepositoryResult<RejectReason>;
    fn update_reject_reason(
        &self,
        id: RejectReasonId,
        hub_id: HubId,
        updates: &UpdateRejectReason,
    ) -> RepositoryResult<RejectReason>;
    fn delete_reject_reason(&self, id: RejectReasonId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait ServicePriceReader {
    fn get_service_price_by_id(
        &self,
        id: ServicePriceId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<ServicePrice>>;
    fn list_service_prices(
        &self,
        query: ServicePriceListQuery,
    ) -> RepositoryResult<(usize, Vec<ServicePrice>)>;
}

pub trait ServicePriceWriter {
    fn create_service_price(&self, new_service: &NewServicePrice)
    -> RepositoryResult<ServicePrice>;
    fn update_service_price(
        &self,
        id: ServicePriceId,
        hub_id: HubId,
        updates: &UpdateServicePrice,
    ) -> RepositoryResult<ServicePrice>;
    fn delete_service_price(&self, id: ServicePriceId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait QuotationReader {
    fn get_quotation_by_id(
        &self,
        id: QuotationId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Quotation>>;
    fn list_quotations(
        &self,
        query: QuotationListQuery,
    ) -> RepositoryResult<(usize, Vec<Quotation>)>;
    fn count_quotations_for_customer(
        &self,
        customer_id: CustomerId,
        hub_id: HubId,
    ) -> RepositoryResult<usize>;
}

pub trait QuotationWriter {
    fn create_quotation(&self, new_quotation: &NewQuotation) -> RepositoryResult<Quotation>;
    fn update_quotation(
        &self,
        id: QuotationId,
        hub_id: HubId,
        updates: &UpdateQuotation,
    ) -> RepositoryResult<Quotation>;
    fn delete_quotation(&self, id: QuotationId, hub_id: HubId) -> RepositoryResult<()>;
}

pub trait CareActivityReader {
    fn list_care_activities(
        &self,
        query: CareActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<CareActivity>)>;
    fn count_care_activities_with_result(
        &self,
        care_result_id: CareResultId,
        hub_id: HubId,
    ) -> RepositoryResult<usize>;
}

pub trait CareActivityWriter {
    /// Records an activity, copying the current name of its care result.
    fn create_care_activity(
        &self,
        new_activity: &NewCareActivity,
    ) -> RepositoryResult<CareActivity>;
    fn delete_care_activity(&self, id: CareActivityId, hub_id: HubId) -> RepositoryResult<()>;
}
