use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::service_price::{NewServicePrice, ServicePrice, UpdateServicePrice};
use crate::domain::types::{HubId, ServicePriceId};
use crate::models::service_price::{
    NewServicePrice as DbNewServicePrice, ServicePrice as DbServicePrice,
    UpdateServicePrice as DbUpdateServicePrice,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ServicePriceListQuery, ServicePriceReader, ServicePriceWriter, like_pattern,
};
use crate::schema::service_prices;

impl ServicePriceReader for DieselRepository {
    fn get_service_price_by_id(
        &self,
        id: ServicePriceId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<ServicePrice>> {
        let mut conn = self.conn()?;

        service_prices::table
            .filter(service_prices::id.eq(id.get()))
            .filter(service_prices::hub_id.eq(hub_id.get()))
            .first::<DbServicePrice>(&mut conn)
            .optional()?
            .map(|service| ServicePrice::try_from(service).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_service_prices(
        &self,
        query: ServicePriceListQuery,
    ) -> RepositoryResult<(usize, Vec<ServicePrice>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = service_prices::table
                .filter(service_prices::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    service_prices::name
                        .like(pattern.clone())
                        .or(service_prices::service_group.like(pattern)),
                );
            }
            if let Some(service_group) = &query.service_group {
                items = items.filter(service_prices::service_group.eq(service_group.clone()));
            }
            if let Some(is_active) = query.is_active {
                items = items.filter(service_prices::is_active.eq(is_active));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((
            service_prices::service_group.asc(),
            service_prices::name.asc(),
            service_prices::id.asc(),
        ));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let services = items
            .load::<DbServicePrice>(&mut conn)?
            .into_iter()
            .map(|service| ServicePrice::try_from(service).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, services))
    }
}

impl ServicePriceWriter for DieselRepository {
    fn create_service_price(
        &self,
        new_service: &NewServicePrice,
    ) -> RepositoryResult<ServicePrice> {
        let mut conn = self.conn()?;
        let insertable: DbNewServicePrice = new_service.into();

        let db_service = diesel::insert_into(service_prices::table)
            .values(&insertable)
            .get_result::<DbServicePrice>(&mut conn)?;

        ServicePrice::try_from(db_service).map_err(RepositoryError::from)
    }

    fn update_service_price(
        &self,
        id: ServicePriceId,
        hub_id: HubId,
        updates: &UpdateServicePrice,
    ) -> RepositoryResult<ServicePrice> {
        let mut conn = self.conn()?;
        let changeset: DbUpdateServicePrice = updates.into();

        let db_service = diesel::update(
            service_prices::table
                .filter(service_prices::id.eq(id.get()))
                .filter(service_prices::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbServicePrice>(&mut conn)?;

        ServicePrice::try_from(db_service).map_err(RepositoryError::from)
    }

    fn delete_service_price(&self, id: ServicePriceId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            service_prices::table
                .filter(service_prices::id.eq(id.get()))
                .filter(service_prices::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
