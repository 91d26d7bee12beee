use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plugins::PluginData;

pub const PENDING_CONTENT: &str = "Processing...";
pub const SUCCESS_CONTENT: &str = "Plugin executed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Plugin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Success,
    Error,
}

impl MessageStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MessageStatus::Pending)
    }
}

/// Terminal state applied once to a pending plugin message.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Success(PluginData),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_data: Option<PluginData>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn text(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            content: content.into(),
            kind: MessageKind::Text,
            plugin_name: None,
            status: None,
            plugin_data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Sender::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Sender::Assistant, content)
    }

    /// Placeholder appended when a plugin starts running.
    pub fn pending_plugin(plugin_name: &str) -> Self {
        Self {
            kind: MessageKind::Plugin,
            plugin_name: Some(plugin_name.to_string()),
            status: Some(MessageStatus::Pending),
            ..Self::text(Sender::Assistant, PENDING_CONTENT)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(MessageStatus::Pending)
    }

    /// Moves a pending message to its terminal state. Returns `false` and
    /// leaves the message untouched if it is not pending.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if !self.is_pending() {
            return false;
        }
        match completion {
            Completion::Success(data) => {
                self.content = SUCCESS_CONTENT.to_string();
                self.status = Some(MessageStatus::Success);
                self.plugin_data = Some(data);
            }
            Completion::Error(reason) => {
                self.content = reason;
                self.status = Some(MessageStatus::Error);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::dictionary::curated;
    use crate::plugins::weather::synthetic;
    use crate::plugins::Calculation;

    fn calculation() -> PluginData {
        PluginData::Calculation(Calculation {
            expression: "2+2".into(),
            result: "4".into(),
            value_type: "number".into(),
        })
    }

    #[test]
    fn text_message_omits_plugin_fields() {
        let message = Message::user("hello");
        let json = serde_json::to_value(&message).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["sender"], "user");
        assert_eq!(object["kind"], "text");
        assert!(!object.contains_key("pluginName"));
        assert!(!object.contains_key("status"));
        assert!(!object.contains_key("pluginData"));
    }

    #[test]
    fn plugin_message_round_trips() {
        let mut message = Message::pending_plugin("calculator");
        assert!(message.complete(Completion::Success(calculation())));

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"pluginName\":\"calculator\""));
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"pluginData\":{\"expression\":\"2+2\""));

        let restored: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, message);
    }

    #[test]
    fn every_plugin_payload_keeps_its_variant() {
        let payloads = [
            PluginData::Weather(synthetic::synthesize("London", 0, &mut || 0.5)),
            PluginData::Weather(synthetic::synthesize("Atlantis", 6, &mut || 0.25)),
            calculation(),
            PluginData::Definition(curated::lookup_or_synthesize("running")),
            PluginData::Definition(curated::lookup_or_synthesize("serendipity")),
        ];

        for data in payloads {
            let mut message = Message::pending_plugin("any");
            assert!(message.complete(Completion::Success(data.clone())));

            let json = serde_json::to_string(&message).unwrap();
            let restored: Message = serde_json::from_str(&json).unwrap();
            assert_eq!(restored.plugin_data, Some(data), "{json}");
            assert_eq!(restored, message);
        }
    }

    #[test]
    fn completion_happens_once() {
        let mut message = Message::pending_plugin("weather");
        assert!(message.complete(Completion::Error("Unable to fetch".into())));
        assert_eq!(message.status, Some(MessageStatus::Error));
        assert_eq!(message.content, "Unable to fetch");

        assert!(!message.complete(Completion::Success(calculation())));
        assert_eq!(message.status, Some(MessageStatus::Error));
        assert!(message.plugin_data.is_none());
    }

    #[test]
    fn unknown_sender_is_rejected() {
        let json = r#"{"id":"3f2504e0-4f89-41d3-9a0c-0305e82c3301","sender":"robot",
            "content":"x","kind":"text","timestamp":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }

    #[test]
    fn text_messages_are_never_pending() {
        assert!(!Message::assistant("hi").is_pending());
        assert!(MessageStatus::Error.is_terminal());
        assert!(!MessageStatus::Pending.is_terminal());
    }
}
