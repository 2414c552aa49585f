//! Conversation threads between a viewer and other users about an item.
//!
//! Threads are ordered, append-only message sequences held in memory. Sending
//! appends a message from the local user and replaces the thread summary
//! (`last_message`, `timestamp`). There is no delivery or synchronization.
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display name of the local user in every thread.
pub const LOCAL_SENDER: &str = "You";

/// Summary timestamp written when the local user sends a message.
pub const JUST_SENT: &str = "now";

/// Author of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// The viewer.
    You,
    /// The other participant, by display name.
    Peer(String),
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value == LOCAL_SENDER {
            Sender::You
        } else {
            Sender::Peer(value)
        }
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        match value {
            Sender::You => LOCAL_SENDER.to_string(),
            Sender::Peer(name) => name,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::You => f.write_str(LOCAL_SENDER),
            Sender::Peer(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    #[default]
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u32,
    pub sender: Sender,
    pub text: String,
    /// Clock label such as "10:30 AM".
    pub time: String,
    pub read: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("message text must not be empty")]
    EmptyMessage,
    #[error("chat thread {0} not found")]
    ThreadNotFound(u64),
}

/// A single conversation and its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: u64,
    /// The other participant.
    pub peer_name: String,
    /// Title of the item the conversation is about.
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    #[serde(default)]
    pub presence: Presence,
    pub messages: Vec<ChatMessage>,
}

impl ChatThread {
    /// Append a message from the local user and refresh the summary.
    ///
    /// Whitespace-only text is rejected; accepted text is stored verbatim.
    pub fn send(&mut self, text: &str, time: impl Into<String>) -> Result<&ChatMessage, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let id = u32::try_from(self.messages.len() + 1).unwrap_or(u32::MAX);
        self.messages.push(ChatMessage {
            id,
            sender: Sender::You,
            text: text.to_string(),
            time: time.into(),
            read: true,
        });
        self.last_message = text.to_string();
        self.timestamp = JUST_SENT.to_string();

        // Just pushed, so the sequence is non-empty.
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Mark every message read and clear the unread counter.
    pub fn mark_read(&mut self) {
        for message in &mut self.messages {
            message.read = true;
        }
        self.unread = 0;
    }

    /// Case-insensitive match on peer name or item title.
    pub fn matches_search(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.peer_name.to_lowercase().contains(&needle)
            || self.item.to_lowercase().contains(&needle)
    }
}

/// Every thread belonging to one viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBook {
    threads: Vec<ChatThread>,
}

impl ChatBook {
    pub fn new(threads: Vec<ChatThread>) -> Self {
        Self { threads }
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    /// Threads whose peer or item matches, in book order.
    pub fn search(&self, search: &str) -> Vec<&ChatThread> {
        self.threads
            .iter()
            .filter(|thread| thread.matches_search(search))
            .collect()
    }

    pub fn thread(&self, id: u64) -> Result<&ChatThread, ChatError> {
        self.threads
            .iter()
            .find(|thread| thread.id == id)
            .ok_or(ChatError::ThreadNotFound(id))
    }

    pub fn thread_mut(&mut self, id: u64) -> Result<&mut ChatThread, ChatError> {
        self.threads
            .iter_mut()
            .find(|thread| thread.id == id)
            .ok_or(ChatError::ThreadNotFound(id))
    }

    /// Send into thread `id`, returning a copy of the appended message.
    pub fn send(&mut self, id: u64, text: &str, time: impl Into<String>) -> Result<ChatMessage, ChatError> {
        self.thread_mut(id)?.send(text, time).cloned()
    }
}

/// Clock label for a message sent at `at`, e.g. "09:05 AM".
pub fn time_label(at: DateTime<Local>) -> String {
    at.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn thread() -> ChatThread {
        ChatThread {
            id: 1,
            peer_name: "John Doe".into(),
            item: "Black Wallet".into(),
            avatar: None,
            last_message: "Hi! I think I found your wallet".into(),
            timestamp: "2 min ago".into(),
            unread: 1,
            presence: Presence::Online,
            messages: vec![ChatMessage {
                id: 1,
                sender: Sender::Peer("John".into()),
                text: "Hi! I think I found your wallet".into(),
                time: "10:30 AM".into(),
                read: false,
            }],
        }
    }

    #[test]
    fn send_appends_and_updates_summary() {
        let mut t = thread();
        let message = t.send("Where did you find it?", "10:32 AM").unwrap().clone();
        assert_eq!(message.id, 2);
        assert_eq!(message.sender, Sender::You);
        assert!(message.read);
        assert_eq!(t.messages.len(), 2);
        assert_eq!(t.last_message, "Where did you find it?");
        assert_eq!(t.timestamp, JUST_SENT);
    }

    #[test]
    fn blank_message_is_rejected_without_side_effects() {
        let mut t = thread();
        assert_eq!(t.send("   ", "10:32 AM"), Err(ChatError::EmptyMessage));
        assert_eq!(t.messages.len(), 1);
        assert_eq!(t.timestamp, "2 min ago");
    }

    #[test]
    fn mark_read_clears_unread() {
        let mut t = thread();
        t.mark_read();
        assert_eq!(t.unread, 0);
        assert!(t.messages.iter().all(|m| m.read));
    }

    #[test]
    fn book_search_matches_peer_or_item() {
        let mut other = thread();
        other.id = 2;
        other.peer_name = "Jane Smith".into();
        other.item = "Silver Keychain".into();
        let book = ChatBook::new(vec![thread(), other]);

        assert_eq!(book.search("jane").len(), 1);
        assert_eq!(book.search("WALLET")[0].id, 1);
        assert_eq!(book.search("").len(), 2);
    }

    #[test]
    fn book_send_to_unknown_thread_fails() {
        let mut book = ChatBook::new(vec![thread()]);
        assert_eq!(book.send(9, "hello", "now"), Err(ChatError::ThreadNotFound(9)));
        assert_eq!(book.send(1, "hello", "11:00 AM").unwrap().id, 2);
        assert_eq!(book.thread(1).unwrap().last_message, "hello");
    }

    #[test]
    fn sender_round_trips_through_strings() {
        let json = serde_json::to_string(&Sender::You).unwrap();
        assert_eq!(json, "\"You\"");
        let peer: Sender = serde_json::from_str("\"Mike\"").unwrap();
        assert_eq!(peer, Sender::Peer("Mike".into()));
    }

    #[test]
    fn time_label_uses_twelve_hour_clock() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 21, 7, 0).unwrap();
        assert_eq!(time_label(at), "09:07 PM");
    }
}
