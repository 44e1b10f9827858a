//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Feedback settings table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "feedback_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub person_id: Uuid,

    /// Absent for personal settings
    pub organization_id: Option<Uuid>,

    pub created: DateTimeUtc,

    pub modified: Option<DateTimeUtc>,

    /// Optimistic locking token
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "feedback_channel::Entity")]
    FeedbackChannel,
}

impl Related<feedback_channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackChannel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Channels owned by one settings row
pub mod feedback_channel {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "feedback_channels")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub settings_id: Uuid,

        /// Order of the channel within its settings
        pub position: i32,

        /// `SMS` or `EMAIL`
        pub contact_method: String,

        pub destination: String,

        pub send_feedback: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::SettingsId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        FeedbackSettings,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::FeedbackSettings.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
