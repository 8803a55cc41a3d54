//! Repository implementation for employees.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::domain::types::{EmailAddress, EmployeeId, HubId};
use crate::models::employee::{
    Employee as DbEmployee, NewEmployee as DbNewEmployee, UpdateEmployee as DbUpdateEmployee,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EmployeeListQuery, EmployeeReader, EmployeeWriter, like_pattern,
};

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(
        &self,
        id: EmployeeId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Employee>> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let db_employee = employees::table
            .filter(employees::id.eq(id.get()))
            .filter(employees::hub_id.eq(hub_id.get()))
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        match db_employee {
            Some(db_employee) => Ok(Some(
                Employee::try_from(db_employee).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn get_employee_by_email(
        &self,
        email: &EmailAddress,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Employee>> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let db_employee = employees::table
            .filter(employees::email.eq(email.as_str()))
            .filter(employees::hub_id.eq(hub_id.get()))
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        match db_employee {
            Some(db_employee) => Ok(Some(
                Employee::try_from(db_employee).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_employees(&self, query: EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)> {
        use crate::schema::employees;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = employees::table
                .filter(employees::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    employees::name
                        .like(pattern.clone())
                        .or(employees::email.like(pattern.clone()))
                        .or(employees::phone.like(pattern)),
                );
            }
            if let Some(position) = &query.position {
                items = items.filter(employees::position.eq(position.clone()));
            }
            if let Some(is_active) = query.is_active {
                items = items.filter(employees::is_active.eq(is_active));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((employees::name.asc(), employees::id.asc()));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let employees = items
            .load::<DbEmployee>(&mut conn)?
            .into_iter()
            .map(|employee| Employee::try_from(employee).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, employees))
    }
}

impl EmployeeWriter for DieselRepository {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let insertable: DbNewEmployee = new_employee.into();

        let db_employee = diesel::insert_into(employees::table)
            .values(&insertable)
            .get_result::<DbEmployee>(&mut conn)?;

        Employee::try_from(db_employee).map_err(RepositoryError::from)
    }

    fn update_employee(
        &self,
        id: EmployeeId,
        hub_id: HubId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let changeset: DbUpdateEmployee = updates.into();

        let db_employee = diesel::update(
            employees::table
                .filter(employees::id.eq(id.get()))
                .filter(employees::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbEmployee>(&mut conn)?;

        Employee::try_from(db_employee).map_err(RepositoryError::from)
    }

    fn delete_employee(&self, id: EmployeeId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::{care_activities, customers, employees, quotations};

        let mut conn = self.conn()?;
        let employee_id = id.get();
        let unassigned: Option<i32> = None;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let owned = employees::table
                .filter(employees::id.eq(employee_id))
                .filter(employees::hub_id.eq(hub_id.get()))
                .count()
                .get_result::<i64>(conn)?;
            if owned == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            diesel::update(customers::table.filter(customers::employee_id.eq(employee_id)))
                .set(customers::employee_id.eq(unassigned))
                .execute(conn)?;
            diesel::update(
                care_activities::table.filter(care_activities::employee_id.eq(employee_id)),
            )
            .set(care_activities::employee_id.eq(unassigned))
            .execute(conn)?;
            diesel::update(quotations::table.filter(quotations::employee_id.eq(employee_id)))
                .set(quotations::employee_id.eq(unassigned))
                .execute(conn)?;

            diesel::delete(employees::table.find(employee_id)).execute(conn)?;
            Ok(())
        })
        .map_err(RepositoryError::from)
    }
}
