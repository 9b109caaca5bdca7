//! CMS Publishing
//!
//! Maps a `GeneratedPost` onto the CMS item schema and creates the item.

mod webflow;

pub use webflow::{CreateItemRequest, FieldData, PublishResult, WebflowPublisher};
