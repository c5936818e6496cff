use chatsweep_types::{ChatMode, ChatSession};
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Result;

/// Subtitles are cut to this many characters when scanned.
pub const SUBTITLE_MAX_CHARS: usize = 100;

/// `ItemTable` key holding the composer list of a workspace.
pub(crate) const COMPOSER_DATA_KEY: &str = "composer.composerData";

const HEAD: &str = "head";

/// Fields read from one `allComposers` entry. Everything is optional because
/// older IDE versions omit most of them, and a field of the wrong type reads
/// as absent instead of failing the whole entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawComposer {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub composer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub unified_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_updated_at: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_lines_added: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_lines_removed: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub files_changed_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub context_usage_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_on_branch: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_archived: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Counters are integers, but a float such as `12.0` still counts.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)))
}

impl RawComposer {
    /// `None` only when the entry is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        match RawComposer::deserialize(value) {
            Ok(raw) => Some(raw),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable composer entry");
                None
            }
        }
    }

    pub fn is_head(&self) -> bool {
        self.kind.as_deref() == Some(HEAD)
    }

    pub fn id(&self) -> &str {
        self.composer_id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }

    pub fn mode(&self) -> &str {
        self.unified_mode.as_deref().unwrap_or("unknown")
    }

    pub fn lines_added(&self) -> u64 {
        non_negative(self.total_lines_added)
    }

    pub fn lines_removed(&self) -> u64 {
        non_negative(self.total_lines_removed)
    }

    pub fn files_changed(&self) -> u64 {
        non_negative(self.files_changed_count)
    }

    pub fn into_session(self) -> ChatSession {
        let subtitle = self
            .subtitle
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(SUBTITLE_MAX_CHARS)
            .collect();

        ChatSession {
            id: self.id().to_string(),
            name: self.name().to_string(),
            mode: ChatMode::from(self.mode()),
            created_at: self.created_at.and_then(format_millis),
            updated_at: self.last_updated_at.and_then(format_millis),
            lines_added: self.lines_added(),
            lines_removed: self.lines_removed(),
            files_changed: self.files_changed(),
            context_usage: self.context_usage_percent,
            branch: self.created_on_branch.clone().unwrap_or_default(),
            is_archived: self.is_archived.unwrap_or(false),
            subtitle,
        }
    }
}

fn non_negative(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

/// Epoch milliseconds to `YYYY-MM-DD HH:MM` (UTC). Non-positive values are unset.
pub(crate) fn format_millis(ms: f64) -> Option<String> {
    if ms <= 0.0 || !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms as i64)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

pub(crate) fn composer_id(value: &Value) -> Option<&str> {
    value.get("composerId").and_then(Value::as_str)
}

pub(crate) fn is_head(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(HEAD)
}

/// Sessions of a serialized composer document: `head` entries only, most
/// recently updated first.
pub fn parse_sessions(json: &str) -> Result<Vec<ChatSession>> {
    let doc: Value = serde_json::from_str(json)?;
    Ok(sessions_from_doc(&doc))
}

pub(crate) fn sessions_from_doc(doc: &Value) -> Vec<ChatSession> {
    let mut sessions: Vec<ChatSession> = doc
        .get("allComposers")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(RawComposer::from_value)
                .filter(RawComposer::is_head)
                .map(RawComposer::into_session)
                .collect()
        })
        .unwrap_or_default();

    sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sessions
}
