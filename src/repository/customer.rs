use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerId, HubId, RejectReasonId};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, like_pattern,
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: CustomerId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_customer = customers::table
            .filter(customers::id.eq(id.get()))
            .filter(customers::hub_id.eq(hub_id.get()))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        db_customer
            .map(|customer| Customer::try_from(customer).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = customers::table
                .filter(customers::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    customers::name
                        .like(pattern.clone())
                        .or(customers::phone.like(pattern.clone()))
                        .or(customers::email.like(pattern.clone()))
                        .or(customers::address.like(pattern)),
                );
            }
            if let Some(status) = query.status {
                items = items.filter(customers::status.eq(status.as_str()));
            }
            if let Some(potential) = query.potential {
                items = items.filter(customers::potential.eq(potential.as_str()));
            }
            if let Some(source) = &query.source {
                items = items.filter(customers::source.eq(source.clone()));
            }
            if let Some(employee_id) = query.employee_id {
                items = items.filter(customers::employee_id.eq(employee_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((customers::created_at.desc(), customers::id.desc()));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let customers = items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(|customer| Customer::try_from(customer).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, customers))
    }

    fn count_customers_with_reject_reason(
        &self,
        reject_reason_id: RejectReasonId,
        hub_id: HubId,
    ) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let count = customers::table
            .filter(customers::hub_id.eq(hub_id.get()))
            .filter(customers::reject_reason_id.eq(reject_reason_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertable: DbNewCustomer = new_customer.into();

        let db_customer = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewCustomer> = new_customers.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::insert_into(customers::table)
                .values(&insertables)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn update_customer(
        &self,
        id: CustomerId,
        hub_id: HubId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::schema::{customers, quotations};

        let mut conn = self.conn()?;
        let changeset: DbUpdateCustomer = updates.into();

        let db_customer = conn.transaction::<DbCustomer, diesel::result::Error, _>(|conn| {
            let customer = diesel::update(
                customers::table
                    .filter(customers::id.eq(id.get()))
                    .filter(customers::hub_id.eq(hub_id.get())),
            )
            .set(&changeset)
            .get_result::<DbCustomer>(conn)?;

            diesel::update(quotations::table.filter(quotations::customer_id.eq(customer.id)))
                .set(quotations::customer_name.eq(customer.name.as_str()))
                .execute(conn)?;

            Ok(customer)
        })?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: CustomerId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::{care_activities, customers};

        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let deleted = diesel::delete(
                customers::table
                    .filter(customers::id.eq(id.get()))
                    .filter(customers::hub_id.eq(hub_id.get())),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            diesel::delete(care_activities::table.filter(care_activities::customer_id.eq(id.get())))
                .execute(conn)?;
            Ok(())
        })
        .map_err(RepositoryError::from)
    }
}
