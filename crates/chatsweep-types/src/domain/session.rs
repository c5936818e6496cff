use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction mode recorded by the IDE for a session.
///
/// The IDE currently writes `agent` or `chat`; anything else is kept verbatim
/// so newer modes survive a round trip through the trash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChatMode {
    Agent,
    Chat,
    Other(String),
}

impl ChatMode {
    pub fn as_str(&self) -> &str {
        match self {
            ChatMode::Agent => "agent",
            ChatMode::Chat => "chat",
            ChatMode::Other(name) => name,
        }
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, ChatMode::Agent)
    }
}

impl From<String> for ChatMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "agent" => ChatMode::Agent,
            "chat" => ChatMode::Chat,
            _ => ChatMode::Other(s),
        }
    }
}

impl From<&str> for ChatMode {
    fn from(s: &str) -> Self {
        ChatMode::from(s.to_string())
    }
}

impl From<ChatMode> for String {
    fn from(mode: ChatMode) -> Self {
        match mode {
            ChatMode::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded chat or agent conversation with its code-change metrics.
///
/// Sessions are read-only snapshots produced by the scanner. Timestamps are
/// opaque strings that sort lexicographically (`YYYY-MM-DD HH:MM`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique within the owning project.
    pub id: String,
    pub name: String,
    pub mode: ChatMode,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_changed: u64,
    /// Fraction of the context window in use, when the IDE recorded it.
    #[serde(default)]
    pub context_usage: Option<f64>,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub subtitle: String,
}

impl ChatSession {
    /// Lines added minus lines removed. Negative for net deletions.
    pub fn net_lines(&self) -> i64 {
        self.lines_added as i64 - self.lines_removed as i64
    }

    /// True when the session touched no files and no lines.
    pub fn is_zero_change(&self) -> bool {
        self.lines_added == 0 && self.lines_removed == 0 && self.files_changed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(added: u64, removed: u64, files: u64) -> ChatSession {
        ChatSession {
            id: "c1".to_string(),
            name: "Refactor parser".to_string(),
            mode: ChatMode::Agent,
            created_at: None,
            updated_at: None,
            lines_added: added,
            lines_removed: removed,
            files_changed: files,
            context_usage: None,
            branch: String::new(),
            is_archived: false,
            subtitle: String::new(),
        }
    }

    #[test]
    fn test_net_lines_can_be_negative() {
        assert_eq!(session(10, 2, 1).net_lines(), 8);
        assert_eq!(session(3, 40, 2).net_lines(), -37);
    }

    #[test]
    fn test_zero_change_requires_all_counters_zero() {
        assert!(session(0, 0, 0).is_zero_change());
        assert!(!session(0, 0, 1).is_zero_change());
        assert!(!session(0, 5, 0).is_zero_change());
    }

    #[test]
    fn test_mode_keeps_unknown_names() {
        let mode: ChatMode = serde_json::from_str("\"edit\"").unwrap();
        assert_eq!(mode, ChatMode::Other("edit".to_string()));
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"edit\"");

        let agent: ChatMode = serde_json::from_str("\"agent\"").unwrap();
        assert!(agent.is_agent());
        assert_eq!(ChatMode::from("chat"), ChatMode::Chat);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{
            "id": "abc",
            "name": "n",
            "mode": "chat",
            "created_at": null,
            "updated_at": "2025-01-02 10:00",
            "lines_added": 1,
            "lines_removed": 0,
            "files_changed": 1
        }"#;
        let s: ChatSession = serde_json::from_str(json).unwrap();
        assert_eq!(s.context_usage, None);
        assert!(!s.is_archived);
        assert_eq!(s.subtitle, "");
    }
}
