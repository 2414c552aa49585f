use crate::error::ServerResult;
use crate::middleware::CurrentUser;
use crate::state::ServerState;
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Local;
use lostfound::chat::time_label;
use lostfound::{ChatError, ChatMessage, ChatThread, Presence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ChatListParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// A thread without its message history
#[derive(Debug, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: u64,
    pub peer_name: String,
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    pub presence: Presence,
}

impl From<&ChatThread> for ThreadSummary {
    fn from(thread: &ChatThread) -> Self {
        Self {
            id: thread.id,
            peer_name: thread.peer_name.clone(),
            item: thread.item.clone(),
            avatar: thread.avatar.clone(),
            last_message: thread.last_message.clone(),
            timestamp: thread.timestamp.clone(),
            unread: thread.unread,
            presence: thread.presence,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: String,
}

/// The appended message and the thread summary it produced
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    pub thread: ThreadSummary,
}

/// GET /api/v1/chats
pub async fn list_chats(
    State(state): State<Arc<ServerState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ChatListParams>,
) -> impl IntoResponse {
    let search = params.search.unwrap_or_default();
    let threads: Vec<ThreadSummary> = state.with_chats(&user.id, |book| {
        book.search(&search).into_iter().map(ThreadSummary::from).collect()
    });
    Json(threads)
}

/// GET /api/v1/chats/{id}
///
/// Opening a thread marks it read.
pub async fn get_chat(
    State(state): State<Arc<ServerState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ServerResult<Json<ChatThread>> {
    let thread = state.with_chats(&user.id, |book| {
        let thread = book.thread_mut(id)?;
        thread.mark_read();
        Ok::<_, ChatError>(thread.clone())
    })?;
    Ok(Json(thread))
}

/// POST /api/v1/chats/{id}/messages
pub async fn send_message(
    State(state): State<Arc<ServerState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(request): Json<SendMessageRequest>,
) -> ServerResult<impl IntoResponse> {
    let time = time_label(Local::now());
    let response = state.with_chats(&user.id, |book| {
        let message = book.send(id, &request.text, time)?;
        let thread = ThreadSummary::from(book.thread(id)?);
        Ok::<_, ChatError>(SendMessageResponse { message, thread })
    })?;

    metrics::counter!("lostfound_messages_total").increment(1);
    tracing::debug!(user_id = %user.id, thread_id = id, "message_sent");

    Ok((StatusCode::CREATED, Json(response)))
}
