//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{self, feedback_channel};
use crate::contract::{ContactMethod, FeedbackChannel, FeedbackSettings};
use anyhow::Context;
use uuid::Uuid;

// ===== Settings Conversions =====

/// Assemble settings from their row and their channel rows (in position order)
pub fn settings_from_rows(
    row: entity::Model,
    channels: Vec<feedback_channel::Model>,
) -> anyhow::Result<FeedbackSettings> {
    let channels = channels
        .into_iter()
        .map(FeedbackChannel::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(FeedbackSettings {
        id: row.id,
        person_id: row.person_id,
        organization_id: row.organization_id,
        channels,
        created: row.created,
        modified: row.modified,
        version: row.version,
    })
}

impl From<&FeedbackSettings> for entity::ActiveModel {
    fn from(model: &FeedbackSettings) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(model.id),
            person_id: Set(model.person_id),
            organization_id: Set(model.organization_id),
            created: Set(model.created),
            modified: Set(model.modified),
            version: Set(model.version),
        }
    }
}

// ===== Channel Conversions =====

impl TryFrom<feedback_channel::Model> for FeedbackChannel {
    type Error = anyhow::Error;

    fn try_from(row: feedback_channel::Model) -> Result<Self, Self::Error> {
        let contact_method: ContactMethod = row
            .contact_method
            .parse()
            .with_context(|| format!("corrupt feedback channel {}", row.id))?;

        Ok(Self {
            contact_method,
            destination: row.destination,
            send_feedback: row.send_feedback,
        })
    }
}

/// Channel rows for `settings_id`, positions following list order
pub fn channel_rows(settings_id: Uuid, channels: &[FeedbackChannel]) -> Vec<feedback_channel::ActiveModel> {
    use sea_orm::ActiveValue::*;

    channels
        .iter()
        .zip(0..)
        .map(|(channel, position)| feedback_channel::ActiveModel {
            id: Set(Uuid::new_v4()),
            settings_id: Set(settings_id),
            position: Set(position),
            contact_method: Set(channel.contact_method.as_str().to_owned()),
            destination: Set(channel.destination.clone()),
            send_feedback: Set(channel.send_feedback),
        })
        .collect()
}
