use care_crm::domain::care::{NewCareGroup, NewCareResult, UpdateCareGroup};
use care_crm::domain::care_activity::NewCareActivity;
use care_crm::domain::customer::{CustomerDetails, NewCustomer, UpdateCustomer};
use care_crm::domain::employee::NewEmployee;
use care_crm::domain::quotation::{
    NewQuotation, QuotationDraft, QuotationItem, QuotationPackage, TaxRate,
};
use care_crm::domain::reject::{NewRejectGroup, NewRejectReason, UpdateRejectGroup};
use care_crm::domain::types::{
    CustomerStatus, EmailAddress, GroupName, HubId, Label, Money, PersonName, PotentialLevel,
    PublicId, QuotationStatus, ServiceName, TaxonomyItemName,
};
use care_crm::repository::errors::RepositoryError;
use care_crm::repository::{
    CareActivityListQuery, CareActivityReader, CareActivityWriter, CareReader,
    CareResultListQuery, CareWriter, CustomerListQuery, CustomerReader, CustomerWriter,
    DieselRepository, EmployeeListQuery, EmployeeReader, EmployeeWriter, QuotationListQuery,
    QuotationReader, QuotationWriter, RejectReader, RejectReasonListQuery, RejectWriter,
};

mod common;

fn hub(id: i32) -> HubId {
    HubId::new(id).unwrap()
}

fn details(name: &str) -> CustomerDetails {
    CustomerDetails {
        name: PersonName::new(name).unwrap(),
        phone: None,
        email: None,
        address: None,
        source: None,
        potential: PotentialLevel::Medium,
        status: CustomerStatus::New,
        employee_id: None,
        reject_reason_id: None,
        note: None,
    }
}

fn employee(hub_id: HubId, email: &str) -> NewEmployee {
    NewEmployee::new(
        hub_id,
        PersonName::new("Trần Thị Lan").unwrap(),
        EmailAddress::new(email).unwrap(),
        None,
        Label::new("Sales").unwrap(),
        true,
    )
}

fn package(name: &str, prices: &[(i64, i64)]) -> QuotationPackage {
    let items = prices
        .iter()
        .map(|&(price, quantity)| {
            QuotationItem::new(
                None,
                ServiceName::new("Vệ sinh").unwrap(),
                Money::new(price).unwrap(),
                quantity,
            )
            .unwrap()
        })
        .collect();
    QuotationPackage::new(Label::new(name).unwrap(), items).unwrap()
}

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let alice = repo
        .create_customer(&NewCustomer::new(hub_id, details("Alice")))
        .unwrap();
    let mut bob_details = details("Bob");
    bob_details.status = CustomerStatus::Caring;
    let bob = repo
        .create_customer(&NewCustomer::new(hub_id, bob_details))
        .unwrap();

    let (total, items) = repo.list_customers(CustomerListQuery::new(hub_id)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (total, items) = repo
        .list_customers(CustomerListQuery::new(hub_id).search("Bob"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, bob.id);

    let (total, _) = repo
        .list_customers(CustomerListQuery::new(hub_id).status(CustomerStatus::Caring))
        .unwrap();
    assert_eq!(total, 1);

    let updated = repo
        .update_customer(bob.id, hub_id, &UpdateCustomer::new(details("Bobby")))
        .unwrap();
    assert_eq!(updated.name.as_str(), "Bobby");
    assert_eq!(updated.status, CustomerStatus::New);

    repo.delete_customer(alice.id, hub_id).unwrap();
    assert!(repo.get_customer_by_id(alice.id, hub_id).unwrap().is_none());
    assert!(matches!(
        repo.delete_customer(alice.id, hub_id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_customer_list_clamps_page() {
    let test_db = common::TestDb::new("test_customer_list_clamps_page.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let batch: Vec<NewCustomer> = (1..=25)
        .map(|i| NewCustomer::new(hub_id, details(&format!("Khách {i:02}"))))
        .collect();
    assert_eq!(repo.create_customers(&batch).unwrap(), 25);

    let (total, items) = repo
        .list_customers(CustomerListQuery::new(hub_id).paginate(9, 10))
        .unwrap();
    assert_eq!(total, 25);
    assert_eq!(items.len(), 5);
}

#[test]
fn test_hub_isolation() {
    let test_db = common::TestDb::new("test_hub_isolation.db");
    let repo = DieselRepository::new(test_db.pool());

    let own = repo
        .create_customer(&NewCustomer::new(hub(1), details("Mine")))
        .unwrap();
    repo.create_customer(&NewCustomer::new(hub(2), details("Theirs")))
        .unwrap();

    let (total, items) = repo.list_customers(CustomerListQuery::new(hub(1))).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, own.id);

    assert!(repo.get_customer_by_id(own.id, hub(2)).unwrap().is_none());
    assert!(matches!(
        repo.update_customer(own.id, hub(2), &UpdateCustomer::new(details("Hijack"))),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_customer(own.id, hub(2)),
        Err(RepositoryError::NotFound)
    ));
    assert!(repo.get_customer_by_id(own.id, hub(1)).unwrap().is_some());
}

#[test]
fn test_employee_repository_unassigns_on_delete() {
    let test_db = common::TestDb::new("test_employee_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let lan = repo
        .create_employee(&employee(hub_id, "lan@example.com"))
        .unwrap();
    assert!(matches!(
        repo.create_employee(&employee(hub_id, "lan@example.com")),
        Err(RepositoryError::ConstraintViolation(_))
    ));

    let found = repo
        .get_employee_by_email(&EmailAddress::new("lan@example.com").unwrap(), hub_id)
        .unwrap();
    assert_eq!(found.map(|e| e.id), Some(lan.id));

    let mut assigned = details("Assigned");
    assigned.employee_id = Some(lan.id);
    let customer = repo
        .create_customer(&NewCustomer::new(hub_id, assigned))
        .unwrap();

    repo.delete_employee(lan.id, hub_id).unwrap();

    let (total, _) = repo.list_employees(EmployeeListQuery::new(hub_id)).unwrap();
    assert_eq!(total, 0);
    let customer = repo
        .get_customer_by_id(customer.id, hub_id)
        .unwrap()
        .unwrap();
    assert_eq!(customer.employee_id, None);
}

#[test]
fn test_care_group_rename_updates_results() {
    let test_db = common::TestDb::new("test_care_group_rename.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let group = repo
        .create_care_group(&NewCareGroup {
            hub_id,
            name: GroupName::new("Tư vấn").unwrap(),
            description: None,
        })
        .unwrap();
    let result = repo
        .create_care_result(&NewCareResult {
            hub_id,
            group_id: group.id,
            name: TaxonomyItemName::new("Hẹn gọi lại").unwrap(),
            is_active: true,
        })
        .unwrap();
    assert_eq!(result.group_name.as_str(), "Tư vấn");
    assert_eq!(repo.count_care_results_in_group(group.id, hub_id).unwrap(), 1);

    repo.update_care_group(
        group.id,
        hub_id,
        &UpdateCareGroup {
            name: GroupName::new("Chăm sóc").unwrap(),
            description: Some("Sau bán hàng".to_string()),
        },
    )
    .unwrap();

    let (total, results) = repo
        .list_care_results(CareResultListQuery::new(hub_id).group_id(group.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(results[0].group_name.as_str(), "Chăm sóc");

    repo.delete_care_result(result.id, hub_id).unwrap();
    repo.delete_care_group(group.id, hub_id).unwrap();
    assert!(repo.list_care_groups(hub_id).unwrap().is_empty());
}

#[test]
fn test_reject_group_with_reasons_cannot_be_dropped() {
    let test_db = common::TestDb::new("test_reject_group_children.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let group = repo
        .create_reject_group(&NewRejectGroup {
            hub_id,
            name: GroupName::new("Giá").unwrap(),
            description: None,
        })
        .unwrap();
    let reason = repo
        .create_reject_reason(&NewRejectReason {
            hub_id,
            group_id: group.id,
            name: TaxonomyItemName::new("Quá đắt").unwrap(),
            is_active: true,
        })
        .unwrap();

    assert!(repo.delete_reject_group(group.id, hub_id).is_err());

    repo.update_reject_group(
        group.id,
        hub_id,
        &UpdateRejectGroup {
            name: GroupName::new("Chi phí").unwrap(),
            description: None,
        },
    )
    .unwrap();
    let reason = repo
        .get_reject_reason_by_id(reason.id, hub_id)
        .unwrap()
        .unwrap();
    assert_eq!(reason.group_name.as_str(), "Chi phí");

    let (total, _) = repo
        .list_reject_reasons(RejectReasonListQuery::new(hub_id).search("đắt"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(repo.count_reject_reasons_in_group(group.id, hub_id).unwrap(), 1);
}

#[test]
fn test_quotation_round_trip_and_customer_rename() {
    let test_db = common::TestDb::new("test_quotation_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let customer = repo
        .create_customer(&NewCustomer::new(hub_id, details("Phạm Văn An")))
        .unwrap();

    let quotation = repo
        .create_quotation(&NewQuotation {
            hub_id,
            public_id: PublicId::new(),
            customer_name: customer.name.clone(),
            draft: QuotationDraft {
                customer_id: customer.id,
                employee_id: None,
                status: QuotationStatus::Draft,
                tax_rate: TaxRate::new(10).unwrap(),
                packages: vec![
                    package("Cơ bản", &[(100_000, 2), (50_000, 4)]),
                    package("Nâng cao", &[(400_000, 1)]),
                ],
                note: None,
            },
        })
        .unwrap();

    let totals = quotation.totals().unwrap();
    assert_eq!(totals.subtotal.get(), 800_000);
    assert_eq!(totals.tax.get(), 80_000);
    assert_eq!(totals.grand_total.get(), 880_000);

    let loaded = repo
        .get_quotation_by_id(quotation.id, hub_id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.packages, quotation.packages);
    assert_eq!(loaded.public_id, quotation.public_id);

    repo.update_customer(customer.id, hub_id, &UpdateCustomer::new(details("Phạm An")))
        .unwrap();
    let (total, quotations) = repo
        .list_quotations(QuotationListQuery::new(hub_id).customer_id(customer.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(quotations[0].customer_name.as_str(), "Phạm An");
    assert_eq!(
        repo.count_quotations_for_customer(customer.id, hub_id)
            .unwrap(),
        1
    );

    repo.delete_quotation(quotation.id, hub_id).unwrap();
    assert!(repo.get_quotation_by_id(quotation.id, hub_id).unwrap().is_none());
}

#[test]
fn test_care_activity_copies_result_name_and_cascades() {
    let test_db = common::TestDb::new("test_care_activity_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let hub_id = hub(1);

    let customer = repo
        .create_customer(&NewCustomer::new(hub_id, details("Lê Minh")))
        .unwrap();
    let group = repo
        .create_care_group(&NewCareGroup {
            hub_id,
            name: GroupName::new("Gọi điện").unwrap(),
            description: None,
        })
        .unwrap();
    let result = repo
        .create_care_result(&NewCareResult {
            hub_id,
            group_id: group.id,
            name: TaxonomyItemName::new("Không nghe máy").unwrap(),
            is_active: true,
        })
        .unwrap();

    let activity = repo
        .create_care_activity(&NewCareActivity {
            hub_id,
            customer_id: customer.id,
            employee_id: None,
            care_result_id: result.id,
            note: None,
        })
        .unwrap();
    assert_eq!(activity.care_result_name.as_str(), "Không nghe máy");
    assert_eq!(
        repo.count_care_activities_with_result(result.id, hub_id)
            .unwrap(),
        1
    );

    repo.delete_customer(customer.id, hub_id).unwrap();

    let (total, _) = repo
        .list_care_activities(CareActivityListQuery::new(hub_id))
        .unwrap();
    assert_eq!(total, 0);
}
