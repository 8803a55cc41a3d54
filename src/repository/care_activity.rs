use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::care_activity::{CareActivity, NewCareActivity};
use crate::domain::types::{CareActivityId, CareResultId, HubId};
use crate::models::care_activity::{
    CareActivity as DbCareActivity, NewCareActivity as DbNewCareActivity,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CareActivityListQuery, CareActivityReader, CareActivityWriter, DieselRepository,
};
use crate::schema::{care_activities, care_results};

impl CareActivityReader for DieselRepository {
    fn list_care_activities(
        &self,
        query: CareActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<CareActivity>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = care_activities::table
                .filter(care_activities::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(customer_id) = query.customer_id {
                items = items.filter(care_activities::customer_id.eq(customer_id.get()));
            }
            if let Some(care_result_id) = query.care_result_id {
                items = items.filter(care_activities::care_result_id.eq(care_result_id.get()));
            }
            if let Some(employee_id) = query.employee_id {
                items = items.filter(care_activities::employee_id.eq(employee_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((
            care_activities::created_at.desc(),
            care_activities::id.desc(),
        ));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let activities = items
            .load::<DbCareActivity>(&mut conn)?
            .into_iter()
            .map(|activity| CareActivity::try_from(activity).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, activities))
    }

    fn count_care_activities_with_result(
        &self,
        care_result_id: CareResultId,
        hub_id: HubId,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let count = care_activities::table
            .filter(care_activities::care_result_id.eq(care_result_id.get()))
            .filter(care_activities::hub_id.eq(hub_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }
}

impl CareActivityWriter for DieselRepository {
    fn create_care_activity(
        &self,
        new_activity: &NewCareActivity,
    ) -> RepositoryResult<CareActivity> {
        let mut conn = self.conn()?;

        let db_activity = conn.transaction::<DbCareActivity, diesel::result::Error, _>(|conn| {
            let result_name = care_results::table
                .filter(care_results::id.eq(new_activity.care_result_id.get()))
                .filter(care_results::hub_id.eq(new_activity.hub_id.get()))
                .select(care_results::name)
                .first::<String>(conn)?;

            diesel::insert_into(care_activities::table)
                .values(&DbNewCareActivity {
                    hub_id: new_activity.hub_id.get(),
                    customer_id: new_activity.customer_id.get(),
                    employee_id: new_activity.employee_id.map(|id| id.get()),
                    care_result_id: new_activity.care_result_id.get(),
                    care_result_name: &result_name,
                    note: new_activity.note.as_ref().map(|note| note.as_str()),
                })
                .get_result::<DbCareActivity>(conn)
        })?;

        CareActivity::try_from(db_activity).map_err(RepositoryError::from)
    }

    fn delete_care_activity(&self, id: CareActivityId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            care_activities::table
                .filter(care_activities::id.eq(id.get()))
                .filter(care_activities::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
