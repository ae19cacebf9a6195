// src/core/mod.rs
//! Ranking backings and the notification channel

pub mod demo_ranker;
pub mod notify;
pub mod ranker;
pub mod service_client;

pub use demo_ranker::DemoRanker;
pub use notify::{
    ChannelSink, LogSink, Notification, NotificationLevel, NotificationSink, RecordingSink,
};
pub use ranker::{RankError, Ranker};
pub use service_client::HttpRanker;
