//! Repository implementation for the care-result taxonomy.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::care::{
    CareGroup, CareResult, NewCareGroup, NewCareResult, UpdateCareGroup, UpdateCareResult,
};
use crate::domain::types::{CareGroupId, CareResultId, HubId};
use crate::models::care::{
    CareGroup as DbCareGroup, CareResult as DbCareResult, NewCareGroup as DbNewCareGroup,
    NewCareResult as DbNewCareResult, UpdateCareGroup as DbUpdateCareGroup,
    UpdateCareResult as DbUpdateCareResult,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CareReader, CareResultListQuery, CareWriter, DieselRepository, like_pattern,
};
use crate::schema::{care_activities, care_groups, care_results};

fn find_group(
    conn: &mut SqliteConnection,
    id: i32,
    hub_id: i32,
) -> Result<DbCareGroup, diesel::result::Error> {
    care_groups::table
        .filter(care_groups::id.eq(id))
        .filter(care_groups::hub_id.eq(hub_id))
        .first::<DbCareGroup>(conn)
}

impl CareReader for DieselRepository {
    fn list_care_groups(&self, hub_id: HubId) -> RepositoryResult<Vec<CareGroup>> {
        let mut conn = self.conn()?;

        care_groups::table
            .filter(care_groups::hub_id.eq(hub_id.get()))
            .order(care_groups::name.asc())
            .load::<DbCareGroup>(&mut conn)?
            .into_iter()
            .map(|group| CareGroup::try_from(group).map_err(RepositoryError::from))
            .collect()
    }

    fn get_care_group_by_id(
        &self,
        id: CareGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<CareGroup>> {
        let mut conn = self.conn()?;

        find_group(&mut conn, id.get(), hub_id.get())
            .optional()?
            .map(|group| CareGroup::try_from(group).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_care_result_by_id(
        &self,
        id: CareResultId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<CareResult>> {
        let mut conn = self.conn()?;

        care_results::table
            .filter(care_results::id.eq(id.get()))
            .filter(care_results::hub_id.eq(hub_id.get()))
            .first::<DbCareResult>(&mut conn)
            .optional()?
            .map(|result| CareResult::try_from(result).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_care_results(
        &self,
        query: CareResultListQuery,
    ) -> RepositoryResult<(usize, Vec<CareResult>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = care_results::table
                .filter(care_results::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    care_results::name
                        .like(pattern.clone())
                        .or(care_results::group_name.like(pattern)),
                );
            }
            if let Some(group_id) = query.group_id {
                items = items.filter(care_results::group_id.eq(group_id.get()));
            }
            if let Some(is_active) = query.is_active {
                items = items.filter(care_results::is_active.eq(is_active));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((
            care_results::group_name.asc(),
            care_results::name.asc(),
            care_results::id.asc(),
        ));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let results = items
            .load::<DbCareResult>(&mut conn)?
            .into_iter()
            .map(|result| CareResult::try_from(result).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, results))
    }

    fn count_care_results_in_group(
        &self,
        group_id: CareGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let count = care_results::table
            .filter(care_results::group_id.eq(group_id.get()))
            .filter(care_results::hub_id.eq(hub_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }
}

impl CareWriter for DieselRepository {
    fn create_care_group(&self, new_group: &NewCareGroup) -> RepositoryResult<CareGroup> {
        let mut conn = self.conn()?;
        let insertable: DbNewCareGroup = new_group.into();

        let db_group = diesel::insert_into(care_groups::table)
            .values(&insertable)
            .get_result::<DbCareGroup>(&mut conn)?;

        CareGroup::try_from(db_group).map_err(RepositoryError::from)
    }

    fn update_care_group(
        &self,
        id: CareGroupId,
        hub_id: HubId,
        updates: &UpdateCareGroup,
    ) -> RepositoryResult<CareGroup> {
        let mut conn = self.conn()?;
        let changeset: DbUpdateCareGroup = updates.into();

        let db_group = conn.transaction::<DbCareGroup, diesel::result::Error, _>(|conn| {
            let group = diesel::update(
                care_groups::table
                    .filter(care_groups::id.eq(id.get()))
                    .filter(care_groups::hub_id.eq(hub_id.get())),
            )
            .set(&changeset)
            .get_result::<DbCareGroup>(conn)?;

            diesel::update(care_results::table.filter(care_results::group_id.eq(group.id)))
                .set(care_results::group_name.eq(group.name.as_str()))
                .execute(conn)?;

            Ok(group)
        })?;

        CareGroup::try_from(db_group).map_err(RepositoryError::from)
    }

    fn delete_care_group(&self, id: CareGroupId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            care_groups::table
                .filter(care_groups::id.eq(id.get()))
                .filter(care_groups::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn create_care_result(&self, new_result: &NewCareResult) -> RepositoryResult<CareResult> {
        let mut conn = self.conn()?;

        let db_result = conn.transaction::<DbCareResult, diesel::result::Error, _>(|conn| {
            let group = find_group(conn, new_result.group_id.get(), new_result.hub_id.get())?;

            diesel::insert_into(care_results::table)
                .values(&DbNewCareResult {
                    hub_id: new_result.hub_id.get(),
                    group_id: group.id,
                    group_name: &group.name,
                    name: new_result.name.as_str(),
                    is_active: new_result.is_active,
                })
                .get_result::<DbCareResult>(conn)
        })?;

        CareResult::try_from(db_result).map_err(RepositoryError::from)
    }

    fn update_care_result(
        &self,
        id: CareResultId,
        hub_id: HubId,
        updates: &UpdateCareResult,
    ) -> RepositoryResult<CareResult> {
        let mut conn = self.conn()?;

        let db_result = conn.transaction::<DbCareResult, diesel::result::Error, _>(|conn| {
            let group = find_group(conn, updates.group_id.get(), hub_id.get())?;

            let result = diesel::update(
                care_results::table
                    .filter(care_results::id.eq(id.get()))
                    .filter(care_results::hub_id.eq(hub_id.get())),
            )
            .set(&DbUpdateCareResult {
                group_id: group.id,
                group_name: &group.name,
                name: updates.name.as_str(),
                is_active: updates.is_active,
            })
            .get_result::<DbCareResult>(conn)?;

            diesel::update(
                care_activities::table.filter(care_activities::care_result_id.eq(result.id)),
            )
            .set(care_activities::care_result_name.eq(result.name.as_str()))
            .execute(conn)?;

            Ok(result)
        })?;

        CareResult::try_from(db_result).map_err(RepositoryError::from)
    }

    fn delete_care_result(&self, id: CareResultId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            care_results::table
                .filter(care_results::id.eq(id.get()))
                .filter(care_results::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
