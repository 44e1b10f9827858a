//! SeaORM repository implementations

use crate::contract::{FeedbackSettings, SearchFilter};
use crate::domain::repository::{FeedbackSettingsRepository, Page, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{self, feedback_channel};
use super::mapper;

/// Largest page size handed to SQL `LIMIT`, which is signed 64-bit
const MAX_PAGE_SIZE: u64 = i64::MAX as u64;

/// Unique violations become `Duplicate`; everything else is opaque
fn classify(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Duplicate(detail),
        _ => RepositoryError::Other(err.into()),
    }
}

/// Channel rows of the given settings, grouped per settings id in position order
async fn load_channels<C: ConnectionTrait>(
    db: &C,
    settings_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<feedback_channel::Model>>, DbErr> {
    if settings_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = feedback_channel::Entity::find()
        .filter(feedback_channel::Column::SettingsId.is_in(settings_ids))
        .order_by_asc(feedback_channel::Column::SettingsId)
        .order_by_asc(feedback_channel::Column::Position)
        .all(db)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<feedback_channel::Model>> = HashMap::new();
    for row in rows {
        grouped.entry(row.settings_id).or_default().push(row);
    }
    Ok(grouped)
}

async fn insert_channels<C: ConnectionTrait>(db: &C, settings: &FeedbackSettings) -> Result<(), DbErr> {
    let rows = mapper::channel_rows(settings.id, &settings.channels);
    if rows.is_empty() {
        return Ok(());
    }
    feedback_channel::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

// ===== Feedback Settings Repository =====

pub struct SeaOrmFeedbackSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmFeedbackSettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackSettingsRepository for SeaOrmFeedbackSettingsRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<FeedbackSettings>> {
        let Some(row) = entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(classify)?
        else {
            return Ok(None);
        };

        let mut channels = load_channels(&*self.db, vec![id]).await.map_err(classify)?;
        let settings = mapper::settings_from_rows(row, channels.remove(&id).unwrap_or_default())?;
        Ok(Some(settings))
    }

    async fn find_page(
        &self,
        filter: SearchFilter,
        page_index: u64,
        limit: u64,
    ) -> RepositoryResult<Page> {
        let limit = limit.min(MAX_PAGE_SIZE);
        let mut query = entity::Entity::find();

        if let Some(person_id) = filter.person_id {
            query = query.filter(entity::Column::PersonId.eq(person_id));
        }
        if let Some(organization_id) = filter.organization_id {
            query = query.filter(entity::Column::OrganizationId.eq(organization_id));
        }

        let paginator = query
            .order_by_asc(entity::Column::Created)
            .order_by_asc(entity::Column::Id)
            .paginate(&*self.db, limit);

        let totals = paginator.num_items_and_pages().await.map_err(classify)?;

        // Past the last page nothing is fetched; this also keeps the offset
        // `page_index * limit` from overflowing
        if page_index >= totals.number_of_pages || page_index.checked_mul(limit).is_none() {
            return Ok(Page {
                items: Vec::new(),
                total_records: totals.number_of_items,
                total_pages: totals.number_of_pages,
            });
        }

        let rows = paginator.fetch_page(page_index).await.map_err(classify)?;

        let mut channels = load_channels(&*self.db, rows.iter().map(|row| row.id).collect())
            .await
            .map_err(classify)?;

        let items = rows
            .into_iter()
            .map(|row| {
                let row_channels = channels.remove(&row.id).unwrap_or_default();
                mapper::settings_from_rows(row, row_channels)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page {
            items,
            total_records: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn exists(&self, person_id: Uuid, organization_id: Option<Uuid>) -> RepositoryResult<bool> {
        let query = entity::Entity::find().filter(entity::Column::PersonId.eq(person_id));
        let query = match organization_id {
            Some(organization_id) => query.filter(entity::Column::OrganizationId.eq(organization_id)),
            None => query.filter(entity::Column::OrganizationId.is_null()),
        };

        let count = query.count(&*self.db).await.map_err(classify)?;
        Ok(count > 0)
    }

    async fn insert(&self, settings: &FeedbackSettings) -> RepositoryResult<FeedbackSettings> {
        let txn = self.db.begin().await.map_err(classify)?;

        let row: entity::ActiveModel = settings.into();
        entity::Entity::insert(row).exec(&txn).await.map_err(classify)?;
        insert_channels(&txn, settings).await.map_err(classify)?;

        txn.commit().await.map_err(classify)?;
        Ok(settings.clone())
    }

    async fn update(&self, settings: &FeedbackSettings) -> RepositoryResult<FeedbackSettings> {
        let txn = self.db.begin().await.map_err(classify)?;
        let next_version = settings.version + 1;

        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Modified, Expr::value(settings.modified))
            .col_expr(entity::Column::Version, Expr::value(next_version))
            .filter(entity::Column::Id.eq(settings.id))
            .filter(entity::Column::Version.eq(settings.version))
            .exec(&txn)
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(classify)?;
            return Err(RepositoryError::Stale(settings.id));
        }

        // Channel rows are rewritten wholesale so positions follow the list
        feedback_channel::Entity::delete_many()
            .filter(feedback_channel::Column::SettingsId.eq(settings.id))
            .exec(&txn)
            .await
            .map_err(classify)?;
        insert_channels(&txn, settings).await.map_err(classify)?;

        txn.commit().await.map_err(classify)?;

        Ok(FeedbackSettings {
            version: next_version,
            ..settings.clone()
        })
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let txn = self.db.begin().await.map_err(classify)?;

        feedback_channel::Entity::delete_many()
            .filter(feedback_channel::Column::SettingsId.eq(id))
            .exec(&txn)
            .await
            .map_err(classify)?;
        let result = entity::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(classify)?;

        txn.commit().await.map_err(classify)?;
        Ok(result.rows_affected > 0)
    }
}
