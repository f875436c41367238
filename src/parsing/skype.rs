//! Shared Skype export parsing utilities.
//!
//! Raw deserialization types for the `messages.json` file of a Skype data
//! export, plus the small helpers the parser applies to each field.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::ChatheatError;
use crate::message::GroupType;

/// Id of the pseudo-conversation Skype uses for call history.
pub const CALL_LOG_ID: &str = "48:calllogs";

/// Skype export wrapper.
///
/// `conversations` is optional here so that its absence surfaces as
/// [`ChatheatError::MissingField`] instead of a generic JSON error.
#[derive(Debug, Deserialize)]
pub struct SkypeExport {
    pub conversations: Option<Vec<SkypeRawConversation>>,
}

/// Raw Skype conversation structure for deserialization.
#[derive(Debug, Deserialize)]
pub struct SkypeRawConversation {
    /// Conversation id (`19:...@thread.skype` for groups, `8:...` for people)
    pub id: Option<String>,
    /// Display name, HTML-escaped. Outer `None` means the key is absent,
    /// `Some(None)` means it is `null`.
    #[serde(rename = "displayName", default, deserialize_with = "present")]
    pub display_name: Option<Option<String>>,
    /// Thread properties; only group conversations carry them
    #[serde(rename = "threadProperties", default)]
    pub thread_properties: Option<Value>,
    /// Messages, kept as opaque maps
    #[serde(rename = "MessageList")]
    pub message_list: Option<Vec<Map<String, Value>>>,
}

/// Distinguishes a missing key from an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Classifies a conversation by its `threadProperties` value.
///
/// `null`, `false`, and empty objects, arrays or strings count as absent.
pub fn classify(thread_properties: Option<&Value>) -> GroupType {
    match thread_properties {
        Some(value) if is_truthy(value) => GroupType::Group,
        _ => GroupType::Personal,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Entity names HTML5 still decodes when the trailing `;` is missing.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Decodes HTML entities in a display name.
///
/// Follows the HTML5 rules: numeric references and the legacy named
/// entities decode without a trailing `;`, and an unknown name keeps its
/// longest legacy prefix (`&notit;` is `¬it;`).
///
/// # Example
///
/// ```
/// use chatheat::parsing::skype::decode_display_name;
///
/// assert_eq!(decode_display_name("Jane &amp; Joe"), "Jane & Joe");
/// assert_eq!(decode_display_name("&lt;3 crew"), "<3 crew");
/// assert_eq!(decode_display_name("Jane &amp Joe"), "Jane & Joe");
/// ```
pub fn decode_display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let (decoded, consumed) = decode_reference(&rest[pos..]);
        out.push_str(&decoded);
        rest = &rest[pos + consumed..];
    }
    out.push_str(rest);
    out
}

/// Decodes the reference at the start of `s`, which begins with `&`.
///
/// Returns the replacement text and the number of bytes consumed.
fn decode_reference(s: &str) -> (String, usize) {
    let body = &s[1..];

    if let Some(number) = body.strip_prefix('#') {
        let (hex, digits) = match number.strip_prefix(['x', 'X']) {
            Some(digits) => (true, digits),
            None => (false, number),
        };
        let len = digits
            .bytes()
            .take_while(|b| if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() })
            .count();
        if len == 0 {
            return ("&".to_string(), 1);
        }
        let mut end = 2 + usize::from(hex) + len;
        let reference = format!("{};", &s[..end]);
        if s[end..].starts_with(';') {
            end += 1;
        }
        return (html_escape::decode_html_entities(&reference).into_owned(), end);
    }

    let name_len = body.bytes().take_while(u8::is_ascii_alphanumeric).count();
    if name_len > 0 && body[name_len..].starts_with(';') {
        let end = name_len + 2;
        let decoded = html_escape::decode_html_entities(&s[..end]);
        if decoded != s[..end] {
            return (decoded.into_owned(), end);
        }
    }

    (1..=name_len)
        .rev()
        .map(|len| &body[..len])
        .find(|name| LEGACY_ENTITIES.contains(name))
        .map(|name| {
            let decoded = html_escape::decode_html_entities(&format!("&{name};")).into_owned();
            (decoded, name.len() + 1)
        })
        .unwrap_or_else(|| ("&".to_string(), 1))
}

/// Parses an `originalarrivaltime` value.
///
/// Accepts RFC 3339 (`2021-03-04T10:20:30.123Z`, `2021-03-04T16:20:30+06:00`).
/// A value without an offset is read as UTC.
pub fn parse_arrival_time(raw: &str) -> Result<DateTime<Utc>, ChatheatError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ChatheatError::unparseable_timestamp(raw))
}

/// Reads a message field that may be a string or a number as text.
pub fn field_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_group() {
        let props = json!({"topic": "Weekend", "membercount": 4});
        assert_eq!(classify(Some(&props)), GroupType::Group);
    }

    #[test]
    fn test_classify_personal() {
        assert_eq!(classify(None), GroupType::Personal);
        assert_eq!(classify(Some(&Value::Null)), GroupType::Personal);
        assert_eq!(classify(Some(&json!({}))), GroupType::Personal);
    }

    #[test]
    fn test_decode_display_name() {
        assert_eq!(decode_display_name("Jane &amp; Joe"), "Jane & Joe");
        assert_eq!(decode_display_name("&quot;Ops&quot;"), "\"Ops\"");
        assert_eq!(decode_display_name("Plain"), "Plain");
    }

    #[test]
    fn test_decode_display_name_without_semicolon() {
        assert_eq!(decode_display_name("Jane &amp Joe"), "Jane & Joe");
        assert_eq!(decode_display_name("A &copy B"), "A © B");
        assert_eq!(decode_display_name("&lt3 crew"), "<3 crew");
        assert_eq!(decode_display_name("it&#39s"), "it's");
        assert_eq!(decode_display_name("&#x41BC"), "\u{41BC}");
    }

    #[test]
    fn test_decode_display_name_longest_legacy_prefix() {
        assert_eq!(decode_display_name("&ampx"), "&x");
        assert_eq!(decode_display_name("&notit;"), "¬it;");
        assert_eq!(decode_display_name("&not;"), "¬");
    }

    #[test]
    fn test_decode_display_name_leaves_plain_ampersands() {
        assert_eq!(decode_display_name("AT&T"), "AT&T");
        assert_eq!(decode_display_name("R & D"), "R & D");
        assert_eq!(decode_display_name("&unknown; & &#;"), "&unknown; & &#;");
        assert_eq!(decode_display_name("trailing &"), "trailing &");
        assert_eq!(decode_display_name("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_parse_arrival_time_zulu() {
        let ts = parse_arrival_time("2021-03-04T10:20:30.123Z").unwrap();
        assert_eq!(ts.timestamp(), 1614853230);
    }

    #[test]
    fn test_parse_arrival_time_offset() {
        let ts = parse_arrival_time("2021-03-04T16:20:30+06:00").unwrap();
        assert_eq!(ts.timestamp(), 1614853230);
    }

    #[test]
    fn test_parse_arrival_time_naive_is_utc() {
        let ts = parse_arrival_time("2021-03-04T10:20:30").unwrap();
        assert_eq!(ts.timestamp(), 1614853230);
    }

    #[test]
    fn test_parse_arrival_time_invalid() {
        let err = parse_arrival_time("not-a-date").unwrap_err();
        assert!(err.is_unparseable_timestamp());
        assert!(parse_arrival_time("").is_err());
    }

    #[test]
    fn test_display_name_missing_vs_null() {
        let missing: SkypeRawConversation =
            serde_json::from_value(json!({"id": "a", "MessageList": []})).unwrap();
        assert!(missing.display_name.is_none());

        let null: SkypeRawConversation =
            serde_json::from_value(json!({"id": "a", "displayName": null, "MessageList": []}))
                .unwrap();
        assert_eq!(null.display_name, Some(None));
    }

    #[test]
    fn test_field_as_string() {
        assert_eq!(field_as_string(&json!("abc")), Some("abc".into()));
        assert_eq!(field_as_string(&json!(1614853230123u64)), Some("1614853230123".into()));
        assert_eq!(field_as_string(&json!(null)), None);
    }
}
