//! Feedback Settings Module
//!
//! Stores, per person (optionally acting for an organization), the channels
//! through which they may be asked for feedback. Channel sets are reconciled
//! on update so unchanged channels stay untouched.

// Public exports
pub mod contract;
pub use contract::{
    client::FeedbackSettingsApi, error::FeedbackSettingsError, ContactMethod, FeedbackChannel,
    FeedbackSettings, FeedbackSettingsPatch, NewFeedbackSettings, PageRequest, SearchFilter,
    SearchResult,
};

pub mod module;
pub use module::FeedbackSettingsModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
