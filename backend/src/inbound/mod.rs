//! Inbound adapters that drive the domain from outside.
//!
//! [`refresh`] keeps a filtered lead feed current on a timer.

pub mod refresh;

pub use refresh::{FeedRefresh, FeedSnapshot, spawn_feed_refresh};
