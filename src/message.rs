//! Flattened message rows.
//!
//! This module provides [`MessageRow`], one row of the unified message table.
//! The loader turns every message of every conversation into a row, tags it
//! with the conversation it came from and moves its arrival time into the
//! report time zone.
//!
//! # Examples
//!
//! ```
//! use chatheat::message::{GroupType, MessageRow};
//! use chrono::TimeZone;
//! use chrono_tz::Asia::Dhaka;
//!
//! let arrival = Dhaka.with_ymd_and_hms(2021, 3, 3, 14, 0, 0).unwrap();
//! let row = MessageRow::new("19:abc@thread.skype", GroupType::Group, arrival)
//!     .with_id("1614758400000")
//!     .with_sender("Alice")
//!     .with_group_name("Weekend Plans");
//!
//! assert!(row.is_group());
//! assert_eq!(row.sender(), Some("Alice"));
//! ```

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::{Map, Value};

/// Whether a row came from a group or a one-to-one conversation.
///
/// Classification is decided once per conversation by the presence of
/// `threadProperties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    /// Multi-party conversation (has thread properties)
    Group,
    /// One-to-one conversation
    Personal,
}

impl GroupType {
    /// Returns the lowercase name used in exports (`"group"` / `"personal"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Group => "group",
            GroupType::Personal => "personal",
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of the unified table.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `Option<String>` | Message id from the export |
/// | `sender` | `Option<String>` | The message's own `displayName` |
/// | `conversation_id` | `String` | Id of the source conversation |
/// | `group_type` | [`GroupType`] | Classification of the source conversation |
/// | `group_name` | `Option<String>` | HTML-decoded conversation name |
/// | `arrival` | `DateTime<Tz>` | `originalarrivaltime` in the report zone |
/// | `fields` | `Map<String, Value>` | Every other field, kept as-is |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRow {
    /// Message id, if the export carries one.
    pub id: Option<String>,

    /// Sender display name, if present on the message.
    pub sender: Option<String>,

    /// Id of the conversation this message belongs to.
    pub conversation_id: String,

    /// Group or personal, inherited from the conversation.
    pub group_type: GroupType,

    /// Decoded conversation display name.
    pub group_name: Option<String>,

    /// Arrival time converted into the report time zone.
    pub arrival: DateTime<Tz>,

    /// Remaining message fields, untouched.
    #[serde(skip)]
    pub fields: Map<String, Value>,
}

impl MessageRow {
    /// Creates a row with only the required columns set.
    pub fn new(conversation_id: impl Into<String>, group_type: GroupType, arrival: DateTime<Tz>) -> Self {
        Self {
            id: None,
            sender: None,
            conversation_id: conversation_id.into(),
            group_type,
            group_name: None,
            arrival,
            fields: Map::new(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the message id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the sender display name.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the conversation display name.
    #[must_use]
    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Replaces the opaque field map.
    #[must_use]
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = fields;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the sender display name.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the decoded conversation name.
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// Returns `true` if the row came from a group conversation.
    pub fn is_group(&self) -> bool {
        self.group_type == GroupType::Group
    }

    /// Looks up an opaque field by its export key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
