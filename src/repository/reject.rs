//! Repository implementation for the reject-reason taxonomy.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::reject::{
    NewRejectGroup, NewRejectReason, RejectGroup, RejectReason, UpdateRejectGroup,
    UpdateRejectReason,
};
use crate::domain::types::{HubId, RejectGroupId, RejectReasonId};
use crate::models::reject::{
    NewRejectGroup as DbNewRejectGroup, NewRejectReason as DbNewRejectReason,
    RejectGroup as DbRejectGroup, RejectReason as DbRejectReason,
    UpdateRejectGroup as DbUpdateRejectGroup, UpdateRejectReason as DbUpdateRejectReason,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, RejectReader, RejectReasonListQuery, RejectWriter, like_pattern,
};
use crate::schema::{reject_groups, reject_reasons};

fn find_group(
    conn: &mut SqliteConnection,
    id: i32,
    hub_id: i32,
) -> Result<DbRejectGroup, diesel::result::Error> {
    reject_groups::table
        .filter(reject_groups::id.eq(id))
        .filter(reject_groups::hub_id.eq(hub_id))
        .first::<DbRejectGroup>(conn)
}

impl RejectReader for DieselRepository {
    fn list_reject_groups(&self, hub_id: HubId) -> RepositoryResult<Vec<RejectGroup>> {
        let mut conn = self.conn()?;

        reject_groups::table
            .filter(reject_groups::hub_id.eq(hub_id.get()))
            .order(reject_groups::name.asc())
            .load::<DbRejectGroup>(&mut conn)?
            .into_iter()
            .map(|group| RejectGroup::try_from(group).map_err(RepositoryError::from))
            .collect()
    }

    fn get_reject_group_by_id(
        &self,
        id: RejectGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<RejectGroup>> {
        let mut conn = self.conn()?;

        find_group(&mut conn, id.get(), hub_id.get())
            .optional()?
            .map(|group| RejectGroup::try_from(group).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_reject_reason_by_id(
        &self,
        id: RejectReasonId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<RejectReason>> {
        let mut conn = self.conn()?;

        reject_reasons::table
            .filter(reject_reasons::id.eq(id.get()))
            .filter(reject_reasons::hub_id.eq(hub_id.get()))
            .first::<DbRejectReason>(&mut conn)
            .optional()?
            .map(|reason| RejectReason::try_from(reason).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_reject_reasons(
        &self,
        query: RejectReasonListQuery,
    ) -> RepositoryResult<(usize, Vec<RejectReason>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = reject_reasons::table
                .filter(reject_reasons::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    reject_reasons::name
                        .like(pattern.clone())
                        .or(reject_reasons::group_name.like(pattern)),
                );
            }
            if let Some(group_id) = query.group_id {
                items = items.filter(reject_reasons::group_id.eq(group_id.get()));
            }
            if let Some(is_active) = query.is_active {
                items = items.filter(reject_reasons::is_active.eq(is_active));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((
            reject_reasons::group_name.asc(),
            reject_reasons::name.asc(),
            reject_reasons::id.asc(),
        ));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let reasons = items
            .load::<DbRejectReason>(&mut conn)?
            .into_iter()
            .map(|reason| RejectReason::try_from(reason).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, reasons))
    }

    fn count_reject_reasons_in_group(
        &self,
        group_id: RejectGroupId,
        hub_id: HubId,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let count = reject_reasons::table
            .filter(reject_reasons::group_id.eq(group_id.get()))
            .filter(reject_reasons::hub_id.eq(hub_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }
}

impl RejectWriter for DieselRepository {
    fn create_reject_group(&self, new_group: &NewRejectGroup) -> RepositoryResult<RejectGroup> {
        let mut conn = self.conn()?;
        let insertable: DbNewRejectGroup = new_group.into();

        let db_group = diesel::insert_into(reject_groups::table)
            .values(&insertable)
            .get_result::<DbRejectGroup>(&mut conn)?;

        RejectGroup::try_from(db_group).map_err(RepositoryError::from)
    }

    fn update_reject_group(
        &self,
        id: RejectGroupId,
        hub_id: HubId,
        updates: &UpdateRejectGroup,
    ) -> RepositoryResult<RejectGroup> {
        let mut conn = self.conn()?;
        let changeset: DbUpdateRejectGroup = updates.into();

        let db_group = conn.transaction::<DbRejectGroup, diesel::result::Error, _>(|conn| {
            let group = diesel::update(
                reject_groups::table
                    .filter(reject_groups::id.eq(id.get()))
                    .filter(reject_groups::hub_id.eq(hub_id.get())),
            )
            .set(&changeset)
            .get_result::<DbRejectGroup>(conn)?;

            diesel::update(reject_reasons::table.filter(reject_reasons::group_id.eq(group.id)))
                .set(reject_reasons::group_name.eq(group.name.as_str()))
                .execute(conn)?;

            Ok(group)
        })?;

        RejectGroup::try_from(db_group).map_err(RepositoryError::from)
    }

    fn delete_reject_group(&self, id: RejectGroupId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            reject_groups::table
                .filter(reject_groups::id.eq(id.get()))
                .filter(reject_groups::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn create_reject_reason(
        &self,
        new_reason: &NewRejectReason,
    ) -> RepositoryResult<RejectReason> {
        let mut conn = self.conn()?;

        let db_reason = conn.transaction::<DbRejectReason, diesel::result::Error, _>(|conn| {
            let group = find_group(conn, new_reason.group_id.get(), new_reason.hub_id.get())?;

            diesel::insert_into(reject_reasons::table)
                .values(&DbNewRejectReason {
                    hub_id: new_reason.hub_id.get(),
                    group_id: group.id,
                    group_name: &group.name,
                    name: new_reason.name.as_str(),
                    is_active: new_reason.is_active,
                })
                .get_result::<DbRejectReason>(conn)
        })?;

        RejectReason::try_from(db_reason).map_err(RepositoryError::from)
    }

    fn update_reject_reason(
        &self,
        id: RejectReasonId,
        hub_id: HubId,
        updates: &UpdateRejectReason,
    ) -> RepositoryResult<RejectReason> {
        let mut conn = self.conn()?;

        let db_reason = conn.transaction::<DbRejectReason, diesel::result::Error, _>(|conn| {
            let group = find_group(conn, updates.group_id.get(), hub_id.get())?;

            diesel::update(
                reject_reasons::table
                    .filter(reject_reasons::id.eq(id.get()))
                    .filter(reject_reasons::hub_id.eq(hub_id.get())),
            )
            .set(&DbUpdateRejectReason {
                group_id: group.id,
                group_name: &group.name,
                name: updates.name.as_str(),
                is_active: updates.is_active,
            })
            .get_result::<DbRejectReason>(conn)
        })?;

        RejectReason::try_from(db_reason).map_err(RepositoryError::from)
    }

    fn delete_reject_reason(&self, id: RejectReasonId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            reject_reasons::table
                .filter(reject_reasons::id.eq(id.get()))
                .filter(reject_reasons::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
