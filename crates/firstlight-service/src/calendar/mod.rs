//! Early-event lookup over a remote calendar feed.
//!
//! - `fetch`: Retrieving feed text
//! - `select`: Picking the earliest occurrence before the cutoff
//! - `outcome`: The uniform result shape handed back to callers
//! - `service`: The end-to-end evaluation

pub mod fetch;
pub mod outcome;
pub mod select;
pub mod service;

pub use fetch::{FeedFetcher, HttpFeedFetcher};
pub use outcome::{EarlyEvent, EarlyEventOutcome, Reason, format_time};
pub use select::find_early_event;
pub use service::{day_after, evaluate};
