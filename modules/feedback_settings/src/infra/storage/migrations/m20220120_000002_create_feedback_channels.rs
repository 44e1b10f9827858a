//! Channel table owned by settings rows

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedbackChannels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackChannels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeedbackChannels::SettingsId).uuid().not_null())
                    .col(ColumnDef::new(FeedbackChannels::Position).integer().not_null())
                    .col(
                        ColumnDef::new(FeedbackChannels::ContactMethod)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackChannels::Destination)
                            .string_len(320)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackChannels::SendFeedback)
                            .boolean()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_channels_settings")
                            .from(FeedbackChannels::Table, FeedbackChannels::SettingsId)
                            .to(FeedbackSettings::Table, FeedbackSettings::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_feedback_channels_settings_method_destination")
                    .table(FeedbackChannels::Table)
                    .col(FeedbackChannels::SettingsId)
                    .col(FeedbackChannels::ContactMethod)
                    .col(FeedbackChannels::Destination)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedbackChannels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedbackChannels {
    Table,
    Id,
    SettingsId,
    Position,
    ContactMethod,
    Destination,
    SendFeedback,
}

#[derive(DeriveIden)]
enum FeedbackSettings {
    Table,
    Id,
}
