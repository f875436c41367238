//! Skype JSON export parser.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::SkypeConfig;
use crate::core::{LoadStats, MessageTable};
use crate::error::ChatheatError;
use crate::message::{GroupType, MessageRow};
use crate::parser::Parser;
use crate::parsing::skype::{
    SkypeExport, SkypeRawConversation, classify, decode_display_name, field_as_string,
    parse_arrival_time,
};

/// Parser for Skype `messages.json` exports.
///
/// Skype exports every conversation of an account in one file:
/// ```json
/// {
///   "conversations": [
///     {
///       "id": "19:abc@thread.skype",
///       "displayName": "Jane &amp; Joe",
///       "threadProperties": {"topic": "..."},
///       "MessageList": [
///         {
///           "id": "1614853230123",
///           "displayName": "Alice",
///           "originalarrivaltime": "2021-03-04T10:20:30.123Z",
///           "content": "hi"
///         }
///       ]
///     }
///   ]
/// }
/// ```
///
/// The call log (`48:calllogs`) and conversations without messages are
/// skipped. Every remaining message becomes one [`MessageRow`], with its
/// arrival time moved into [`SkypeConfig::time_zone`].
///
/// # Example
///
/// ```rust
/// use chatheat::parser::Parser;
/// use chatheat::parsers::SkypeParser;
///
/// let json = r#"{"conversations": [{
///     "id": "19:abc@thread.skype",
///     "displayName": "Team",
///     "threadProperties": {"topic": "Team"},
///     "MessageList": [{"displayName": "Alice", "originalarrivaltime": "2021-03-04T10:20:30.123Z"}]
/// }]}"#;
///
/// let table = SkypeParser::new().parse_str(json).unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.rows()[0].group_name(), Some("Team"));
/// ```
pub struct SkypeParser {
    config: SkypeConfig,
}

impl SkypeParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self {
            config: SkypeConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: SkypeConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &SkypeConfig {
        &self.config
    }

    fn load_conversation(
        &self,
        conv: SkypeRawConversation,
        stats: &mut LoadStats,
        rows: &mut Vec<MessageRow>,
    ) -> Result<(), ChatheatError> {
        let id = conv.id.ok_or_else(|| ChatheatError::missing_field("id"))?;

        if self.config.is_excluded(&id) {
            debug!(conversation = %id, "skipping excluded conversation");
            stats.excluded += 1;
            return Ok(());
        }

        let messages = conv
            .message_list
            .ok_or_else(|| ChatheatError::missing_field_in("MessageList", id.as_str()))?;

        if messages.is_empty() {
            trace!(conversation = %id, "skipping empty conversation");
            stats.empty += 1;
            return Ok(());
        }

        let group_name = conv
            .display_name
            .ok_or_else(|| ChatheatError::missing_field_in("displayName", id.as_str()))?
            .map(|name| decode_display_name(&name));
        let group_type = classify(conv.thread_properties.as_ref());

        match group_type {
            GroupType::Group => stats.group += 1,
            GroupType::Personal => stats.personal += 1,
        }

        debug!(
            conversation = %id,
            group_type = %group_type,
            messages = messages.len(),
            "loaded conversation"
        );

        rows.reserve(messages.len());
        for message in messages {
            let row = self.build_row(&id, group_type, group_name.as_deref(), message)?;
            rows.push(row);
        }
        Ok(())
    }

    fn build_row(
        &self,
        conversation_id: &str,
        group_type: GroupType,
        group_name: Option<&str>,
        mut fields: Map<String, Value>,
    ) -> Result<MessageRow, ChatheatError> {
        let raw_time = fields
            .remove("originalarrivaltime")
            .ok_or_else(|| ChatheatError::missing_field_in("originalarrivaltime", conversation_id))?;
        let arrival = match &raw_time {
            Value::String(s) => parse_arrival_time(s)?,
            other => return Err(ChatheatError::unparseable_timestamp(other.to_string())),
        };

        let mut row = MessageRow::new(
            conversation_id,
            group_type,
            arrival.with_timezone(&self.config.time_zone),
        );
        row.id = fields.remove("id").as_ref().and_then(field_as_string);
        row.sender = fields.remove("displayName").as_ref().and_then(field_as_string);
        row.group_name = group_name.map(str::to_owned);

        Ok(row.with_fields(fields))
    }
}

impl Default for SkypeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for SkypeParser {
    fn name(&self) -> &'static str {
        "Skype"
    }

    fn parse_str(&self, content: &str) -> Result<MessageTable, ChatheatError> {
        let export: SkypeExport =
            serde_json::from_str(content).map_err(|e| ChatheatError::malformed(e.to_string()))?;
        let conversations = export
            .conversations
            .ok_or_else(|| ChatheatError::missing_field("conversations"))?;

        let mut stats = LoadStats {
            conversations: conversations.len(),
            ..LoadStats::default()
        };
        let mut rows = Vec::new();

        for conv in conversations {
            self.load_conversation(conv, &mut stats, &mut rows)?;
        }

        debug!(
            rows = rows.len(),
            group = stats.group,
            personal = stats.personal,
            "export loaded"
        );
        Ok(MessageTable::new(rows, stats))
    }
}
