//! Settings table, uniqueness of person/organization pairs and lookup indexes

use sea_orm::ConnectionTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedbackSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackSettings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeedbackSettings::PersonId).uuid().not_null())
                    .col(ColumnDef::new(FeedbackSettings::OrganizationId).uuid())
                    .col(
                        ColumnDef::new(FeedbackSettings::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeedbackSettings::Modified).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(FeedbackSettings::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Representative settings: one per person and organization
        manager
            .create_index(
                Index::create()
                    .name("uq_feedback_settings_person_organization")
                    .table(FeedbackSettings::Table)
                    .col(FeedbackSettings::PersonId)
                    .col(FeedbackSettings::OrganizationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Personal settings: one per person. NULL organization ids never
        // collide in the composite index above, so this needs a partial index.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_feedback_settings_person_personal \
                 ON feedback_settings (person_id) WHERE organization_id IS NULL",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_settings_person_id")
                    .table(FeedbackSettings::Table)
                    .col(FeedbackSettings::PersonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_settings_organization_id")
                    .table(FeedbackSettings::Table)
                    .col(FeedbackSettings::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedbackSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedbackSettings {
    Table,
    Id,
    PersonId,
    OrganizationId,
    Created,
    Modified,
    Version,
}
