//! Database migrations for feedback settings
//!
//! One file per migration: the migration name is taken from the file stem.

use sea_orm_migration::prelude::*;

mod m20220120_000001_create_feedback_settings;
mod m20220120_000002_create_feedback_channels;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220120_000001_create_feedback_settings::Migration),
            Box::new(m20220120_000002_create_feedback_channels::Migration),
        ]
    }
}
