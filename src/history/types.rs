//! Wire types for the history endpoint and their translation into [`Message`].
//!
//! ```json
//! { "chats": [ { "id": 812, "message": "On my way",
//!                "sender": { "user_id": "u7", "image": "https://...", "self": false },
//!                "time": "2024-05-02T09:15:00.000Z" } ] }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::message::{Author, Message, MessageId};
use crate::history::HistoryError;

/// Ids arrive as strings from some backends and integers from others.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawSender {
    #[serde(default)]
    pub user_id: Option<RawId>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "self", default)]
    pub is_self: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawChat {
    pub id: RawId,
    pub message: String,
    pub sender: RawSender,
    pub time: String,
}

/// One page of history. A body without `chats` fails to deserialize.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HistoryPage {
    pub chats: Vec<RawChat>,
}

impl TryFrom<RawChat> for Message {
    type Error = HistoryError;

    fn try_from(raw: RawChat) -> Result<Self, Self::Error> {
        let timestamp = DateTime::parse_from_rfc3339(&raw.time)
            .map_err(|e| HistoryError::Malformed(format!("bad time {:?}: {e}", raw.time)))?
            .with_timezone(&Utc);

        Ok(Message {
            id: MessageId::Server(raw.id.into_string()),
            text: raw.message,
            author: Author {
                user_id: raw.sender.user_id.map(RawId::into_string),
                avatar: raw.sender.image,
                is_self: raw.sender.is_self,
            },
            timestamp,
        })
    }
}

impl HistoryPage {
    /// Convert every record. One bad record rejects the whole page.
    pub fn into_messages(self) -> Result<Vec<Message>, HistoryError> {
        self.chats.into_iter().map(Message::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_ids() {
        let json = r#"{"chats":[
            {"id":812,"message":"a","sender":{"user_id":7,"image":null,"self":false},"time":"2024-05-02T09:15:00Z"},
            {"id":"abc","message":"b","sender":{"user_id":"u9","self":true},"time":"2024-05-02T09:16:00.000Z"}
        ]}"#;
        let page: HistoryPage = serde_json::from_str(json).unwrap();
        let messages = page.into_messages().unwrap();

        assert_eq!(messages[0].id, MessageId::Server("812".into()));
        assert_eq!(messages[0].author.user_id.as_deref(), Some("7"));
        assert!(!messages[0].is_self());
        assert_eq!(messages[1].id, MessageId::Server("abc".into()));
        assert!(messages[1].is_self());
    }

    #[test]
    fn missing_self_flag_means_remote() {
        let json = r#"{"chats":[{"id":1,"message":"a","sender":{},"time":"2024-05-02T09:15:00Z"}]}"#;
        let page: HistoryPage = serde_json::from_str(json).unwrap();
        assert!(!page.into_messages().unwrap()[0].is_self());
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let json = r#"{"chats":[{"id":1,"message":"a","sender":{},"time":"2024-05-02T09:15:00+05:30"}]}"#;
        let page: HistoryPage = serde_json::from_str(json).unwrap();
        let message = &page.into_messages().unwrap()[0];
        assert_eq!(message.timestamp.to_rfc3339(), "2024-05-02T03:45:00+00:00");
    }

    #[test]
    fn body_without_chats_is_rejected() {
        assert!(serde_json::from_str::<HistoryPage>(r#"{"messages":[]}"#).is_err());
    }

    #[test]
    fn one_bad_time_rejects_the_page() {
        let json = r#"{"chats":[
            {"id":1,"message":"a","sender":{},"time":"2024-05-02T09:15:00Z"},
            {"id":2,"message":"b","sender":{},"time":"yesterday"}
        ]}"#;
        let page: HistoryPage = serde_json::from_str(json).unwrap();
        assert!(matches!(page.into_messages(), Err(HistoryError::Malformed(_))));
    }
}
