//! Streamed chat against `models/{model}:streamGenerateContent?alt=sse`.

use ledger::LedgerSnapshot;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::GatewayError;
use crate::{Gateway, prompt};

/// A finished turn kept by the caller and replayed as context.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One event on a live chat stream.
#[derive(Debug)]
pub enum ChatEvent {
    Fragment(String),
    Done,
    Failed(GatewayError),
}

/// Receiver half of an in-flight chat reply. Finite: after `Done` or
/// `Failed` no further events arrive.
#[derive(Debug)]
pub struct ChatStream {
    rx: mpsc::Receiver<ChatEvent>,
}

impl ChatStream {
    /// Non-blocking poll, for event-loop ticks.
    pub fn try_next(&mut self) -> Option<ChatEvent> {
        self.rx.try_recv().ok()
    }

    pub async fn next(&mut self) -> Option<ChatEvent> {
        self.rx.recv().await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<crate::image::GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub(crate) fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

/// Incremental splitter for `text/event-stream` bodies. HTTP chunks do not
/// align with event boundaries, so a partial trailing line is buffered until
/// the rest arrives.
#[derive(Debug, Default)]
pub(crate) struct SseParser {
    buf: String,
}

impl SseParser {
    /// Feeds one body chunk and returns the complete `data:` payloads it
    /// closed off.
    pub(crate) fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buf.push_str(chunk);
        let mut payloads = Vec::new();
        while let Some(newline) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(payload) = line.strip_prefix("data:") {
                let payload = payload.trim_start();
                if !payload.is_empty() && payload != "[DONE]" {
                    payloads.push(payload.to_string());
                }
            }
        }
        payloads
    }
}

/// Pulls the text parts out of one streamed response payload, in order.
fn extract_fragments(payload: &str) -> Result<Vec<String>, GatewayError> {
    let response: GenerateContentResponse =
        serde_json::from_str(payload).map_err(|err| GatewayError::Decode(err.to_string()))?;
    let mut fragments = Vec::new();
    if let Some(content) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
    {
        for part in content.parts {
            if let Some(text) = part.text {
                fragments.push(text);
            }
        }
    }
    Ok(fragments)
}

impl Gateway {
    /// Starts a streamed chat reply. The user message is grounded with a
    /// system instruction carrying the full transaction list and net balance
    /// as of the call, plus the prior turns.
    pub fn stream_chat(
        &self,
        message: &str,
        history: &[ChatTurn],
        snapshot: &LedgerSnapshot,
    ) -> ChatStream {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(Some(turn.role.as_str()), &turn.text))
            .collect();
        contents.push(Content::text(Some("user"), message));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text(None, &prompt::system_context(snapshot))),
            generation_config: None,
        };

        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url, self.config.chat_model
        );
        let http = self.http.clone();
        let api_key = self.config.api_key.clone();

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            match run_stream(http, url, api_key, request, &tx).await {
                Ok(()) => {
                    let _ = tx.send(ChatEvent::Done).await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "chat stream failed");
                    let _ = tx.send(ChatEvent::Failed(err)).await;
                }
            }
        });
        ChatStream { rx }
    }
}

async fn run_stream(
    http: reqwest::Client,
    url: String,
    api_key: String,
    request: GenerateContentRequest,
    tx: &mpsc::Sender<ChatEvent>,
) -> Result<(), GatewayError> {
    let res = http
        .post(&url)
        .header("x-goog-api-key", &api_key)
        .json(&request)
        .send()
        .await?;

    if !res.status().is_success() {
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        return Err(GatewayError::from_status(status, crate::error_message(&body)));
    }

    let mut res = res;
    let mut parser = SseParser::default();
    while let Some(chunk) = res.chunk().await? {
        let text = String::from_utf8_lossy(&chunk);
        for payload in parser.push(&text) {
            for fragment in extract_fragments(&payload)? {
                if tx.send(ChatEvent::Fragment(fragment)).await.is_err() {
                    // Receiver dropped, stop reading.
                    return Ok(());
                }
            }
        }
    }
    tracing::debug!("chat stream ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sse_parser_handles_split_chunks() {
        let mut parser = SseParser::default();
        assert!(parser.push("data: {\"a\"").is_empty());
        let payloads = parser.push(":1}\n\ndata: {\"b\":2}\n");
        assert_eq!(payloads, ["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn sse_parser_skips_comments_and_done() {
        let mut parser = SseParser::default();
        let payloads = parser.push(": keepalive\ndata: [DONE]\ndata: x\r\n");
        assert_eq!(payloads, ["x"]);
    }

    #[test]
    fn fragments_come_from_first_candidate_in_order() {
        let payload = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Hello"}, {"text": ", world"}]
                }
            }]
        }"#;
        assert_eq!(extract_fragments(payload).unwrap(), ["Hello", ", world"]);
    }

    #[test]
    fn empty_candidates_yield_no_fragments() {
        assert!(extract_fragments("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        assert!(matches!(
            extract_fragments("{not json"),
            Err(GatewayError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn chat_stream_preserves_channel_order() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(ChatEvent::Fragment("a".into())).await.unwrap();
        tx.send(ChatEvent::Fragment("b".into())).await.unwrap();
        tx.send(ChatEvent::Done).await.unwrap();
        drop(tx);

        let mut stream = ChatStream { rx };
        assert!(matches!(stream.next().await, Some(ChatEvent::Fragment(f)) if f == "a"));
        assert!(matches!(stream.next().await, Some(ChatEvent::Fragment(f)) if f == "b"));
        assert!(matches!(stream.next().await, Some(ChatEvent::Done)));
        assert!(stream.next().await.is_none());
    }
}
