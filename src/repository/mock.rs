//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::care::{
    CareGroup, CareResult, NewCareGroup, NewCareResult, UpdateCareGroup, UpdateCareResult,
};
use crate::domain::care_activity::{CareActivity, NewCareActivity};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::domain::quotation::{NewQuotation, Quotation, UpdateQuotation};
use crate::domain::reject::{
    NewRejectGroup, NewRejectReason, RejectGroup, RejectReason, UpdateRejectGroup,
    UpdateRejectReason,
};
use crate::domain::service_price::{NewServicePrice, ServicePrice, UpdateServicePrice};
use crate::domain::types::{
    CareActivityId, CareGroupId, CareResultId, CustomerId, EmailAddress, EmployeeId, HubId,
    QuotationId, RejectGroupId, RejectReasonId, ServicePriceId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CareActivityListQuery, CareActivityReader, CareActivityWriter, CareReader,
    CareResultListQuery, CareWriter, CustomerListQuery, CustomerReader, CustomerWriter,
    EmployeeListQuery, EmployeeReader, EmployeeWriter, QuotationListQuery, QuotationReader,
    QuotationWriter, RejectReader, RejectReasonListQuery, RejectWriter, ServicePriceListQuery,
    ServicePriceReader, ServicePriceWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: CustomerId, hub_id: HubId) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
        fn count_customers_with_reject_reason(
            &self,
            reject_reason_id: RejectReasonId,
            hub_id: HubId,
        ) -> RepositoryResult<usize>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
        fn update_customer(
            &self,
            id: CustomerId,
            hub_id: HubId,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
        fn delete_customer(&self, id: CustomerId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl EmployeeReader for Repository {
        fn get_employee_by_id(&self, id: EmployeeId, hub_id: HubId) -> RepositoryResult<Option<Employee>>;
        fn get_employee_by_email(
            &self,
            email: &EmailAddress,
            hub_id: HubId,
        ) -> RepositoryResult<Option<Employee>>;
        fn list_employees(&self, query: EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
    }

    impl EmployeeWriter for Repository {
        fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
        fn update_employee(
            &self,
            id: EmployeeId,
            hub_id: HubId,
            updates: &UpdateEmployee,
        ) -> RepositoryResult<Employee>;
        fn delete_employee(&self, id: EmployeeId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl CareReader for Repository {
        fn list_care_groups(&self, hub_id: HubId) -> RepositoryResult<Vec<CareGroup>>;
        fn get_care_group_by_id(&self, id: CareGroupId, hub_id: HubId) -> RepositoryResult<Option<CareGroup>>;
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

    impl CareWriter for Repository {
        fn create_care_group(&self, new_group: &NewCareGroup) -> RepositoryResult<CareGroup>;
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

    impl RejectReader for Repository {
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

    impl RejectWriter for Repository {
        fn create_reject_group(&self, new_group: &NewRejectGroup) -> RepositoryResult<RejectGroup>;
        fn update_reject_group(
            &self,
            id: RejectGroupId,
            hub_id: HubId,
            updates: &UpdateRejectGroup,
        ) -> RepositoryResult<RejectGroup>;
        fn delete_reject_group(&self, id: RejectGroupId, hub_id: HubId) -> RepositoryResult<()>;
        fn create_reject_reason(&self, new_reason: &NewRejectReason) -> RepositoryResult<RejectReason>;
        fn update_reject_reason(
            &self,
            id: RejectReasonId,
            hub_id: HubId,
            updates: &UpdateRejectReason,
        ) -> RepositoryResult<RejectReason>;
        fn delete_reject_reason(&self, id: RejectReasonId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl ServicePriceReader for Repository {
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

    impl ServicePriceWriter for Repository {
        fn create_service_price(&self, new_service: &NewServicePrice) -> RepositoryResult<ServicePrice>;
        fn update_service_price(
            &self,
            id: ServicePriceId,
            hub_id: HubId,
            updates: &UpdateServicePrice,
        ) -> RepositoryResult<ServicePrice>;
        fn delete_service_price(&self, id: ServicePriceId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl QuotationReader for Repository {
        fn get_quotation_by_id(&self, id: QuotationId, hub_id: HubId) -> RepositoryResult<Option<Quotation>>;
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

    impl QuotationWriter for Repository {
        fn create_quotation(&self, new_quotation: &NewQuotation) -> RepositoryResult<Quotation>;
        fn update_quotation(
            &self,
            id: QuotationId,
            hub_id: HubId,
            updates: &UpdateQuotation,
        ) -> RepositoryResult<Quotation>;
        fn delete_quotation(&self, id: QuotationId, hub_id: HubId) -> RepositoryResult<()>;
    }

    impl CareActivityReader for Repository {
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

    impl CareActivityWriter for Repository {
        fn create_care_activity(&self, new_activity: &NewCareActivity) -> RepositoryResult<CareActivity>;
        fn delete_care_activity(&self, id: CareActivityId, hub_id: HubId) -> RepositoryResult<()>;
    }
}
