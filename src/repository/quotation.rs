use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::quotation::{NewQuotation, Quotation, UpdateQuotation};
use crate::domain::types::{CustomerId, HubId, QuotationId};
use crate::models::quotation::{
    NewQuotation as DbNewQuotation, Quotation as DbQuotation, UpdateQuotation as DbUpdateQuotation,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, QuotationListQuery, QuotationReader, QuotationWriter, like_pattern,
};
use crate::schema::quotations;

impl QuotationReader for DieselRepository {
    fn get_quotation_by_id(
        &self,
        id: QuotationId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Quotation>> {
        let mut conn = self.conn()?;

        quotations::table
            .filter(quotations::id.eq(id.get()))
            .filter(quotations::hub_id.eq(hub_id.get()))
            .first::<DbQuotation>(&mut conn)
            .optional()?
            .map(|quotation| Quotation::try_from(quotation).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_quotations(
        &self,
        query: QuotationListQuery,
    ) -> RepositoryResult<(usize, Vec<Quotation>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = quotations::table
                .filter(quotations::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                items = items.filter(quotations::customer_name.like(like_pattern(term)));
            }
            if let Some(status) = query.status {
                items = items.filter(quotations::status.eq(status.as_str()));
            }
            if let Some(customer_id) = query.customer_id {
                items = items.filter(quotations::customer_id.eq(customer_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((quotations::created_at.desc(), quotations::id.desc()));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.window(total);
            items = items.limit(limit).offset(offset);
        }

        let quotations = items
            .load::<DbQuotation>(&mut conn)?
            .into_iter()
            .map(|quotation| Quotation::try_from(quotation).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, quotations))
    }

    fn count_quotations_for_customer(
        &self,
        customer_id: CustomerId,
        hub_id: HubId,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let count = quotations::table
            .filter(quotations::customer_id.eq(customer_id.get()))
            .filter(quotations::hub_id.eq(hub_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count as usize)
    }
}

impl QuotationWriter for DieselRepository {
    fn create_quotation(&self, new_quotation: &NewQuotation) -> RepositoryResult<Quotation> {
        let mut conn = self.conn()?;
        let insertable = DbNewQuotation::try_from(new_quotation)?;

        let db_quotation = diesel::insert_into(quotations::table)
            .values(&insertable)
            .get_result::<DbQuotation>(&mut conn)?;

        Quotation::try_from(db_quotation).map_err(RepositoryError::from)
    }

    fn update_quotation(
        &self,
        id: QuotationId,
        hub_id: HubId,
        updates: &UpdateQuotation,
    ) -> RepositoryResult<Quotation> {
        let mut conn = self.conn()?;
        let changeset = DbUpdateQuotation::try_from(updates)?;

        let db_quotation = diesel::update(
            quotations::table
                .filter(quotations::id.eq(id.get()))
                .filter(quotations::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbQuotation>(&mut conn)?;

        Quotation::try_from(db_quotation).map_err(RepositoryError::from)
    }

    fn delete_quotation(&self, id: QuotationId, hub_id: HubId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            quotations::table
                .filter(quotations::id.eq(id.get()))
                .filter(quotations::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
