//! Shared parsing utilities.
//!
//! Raw deserialization types and field helpers used by the parsers.

pub mod skype;

// Re-export commonly used items
pub use skype::{
    CALL_LOG_ID, SkypeExport, SkypeRawConversation, classify, decode_display_name,
    parse_arrival_time,
};
