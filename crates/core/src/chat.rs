// AI doctor chat session
//
// Append-only message log. A send inserts the farmer's message right away,
// then exactly one request is in flight until its outcome is applied.

use std::fmt;

use agridoc_protocol::{ChatRole, DiagnoseRequest, DiagnoseResponse, HistoryEntry};

use crate::locale::Lang;

pub const GREETING: &str = "Hello! 🌾 I'm your personal AI agronomist. Describe your crop problem or upload a photo and I'll diagnose it for you.";
pub const CONNECTION_ERROR: &str = "⚠️ Unable to connect to the server. Please ensure the backend is running and try again.";
const IMAGE_ONLY_TEXT: &str = "I've uploaded a crop photo. Please diagnose it.";
const IMAGE_ONLY_PROMPT: &str = "Diagnose this crop image.";
const FALLBACK_REPLY: &str = "I've analyzed your request.";
const FALLBACK_CONFIDENCE: &str = "Medium";

/// Canned openers offered before the first message.
pub const QUICK_PROMPTS: &[(&str, &str)] = &[
    ("Diagnose crop issue", "My crop leaves are turning yellow with brown spots. What disease is this?"),
    ("Treatment advice", "What treatment do you recommend for fungal infections in wheat?"),
    ("Weather impact", "How does excess rain affect my paddy crop and what should I do?"),
    ("Buy medicine", "Which pesticide should I buy for aphid infestation on my tomatoes?"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Farmer,
    Assistant,
}

impl Sender {
    fn role(self) -> ChatRole {
        match self {
            Sender::Farmer => ChatRole::User,
            Sender::Assistant => ChatRole::Ai,
        }
    }
}

/// Structured diagnosis card attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub issue: String,
    pub confidence: String,
    pub treatment: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Data URL of an attached photo.
    pub image: Option<String>,
    pub diagnosis: Option<Diagnosis>,
}

impl ChatMessage {
    fn assistant(text: impl Into<String>) -> Self {
        Self { sender: Sender::Assistant, text: text.into(), image: None, diagnosis: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatError {
    /// A request is already in flight.
    Busy,
    /// Neither text nor an image was given.
    EmptyMessage,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Busy => write!(f, "a reply is still pending"),
            ChatError::EmptyMessage => write!(f, "message is empty"),
        }
    }
}

impl std::error::Error for ChatError {}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    in_flight: bool,
    lang: Lang,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Lang::En)
    }
}

impl ChatSession {
    pub fn new(lang: Lang) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            in_flight: false,
            lang,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Reply language for subsequent requests.
    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    /// Append the farmer's message and build the request for it.
    ///
    /// History carries every message before this one.
    pub fn begin_send(&mut self, text: &str, image: Option<String>) -> Result<DiagnoseRequest, ChatError> {
        if self.in_flight {
            return Err(ChatError::Busy);
        }
        let text = text.trim();
        if text.is_empty() && image.is_none() {
            return Err(ChatError::EmptyMessage);
        }

        let chat_history = self
            .messages
            .iter()
            .map(|m| HistoryEntry { role: m.sender.role(), content: m.text.clone() })
            .collect();

        let message = match &image {
            Some(_) => {
                let prompt = if text.is_empty() { IMAGE_ONLY_PROMPT } else { text };
                format!("[Image attached] {}", prompt)
            }
            None => text.to_string(),
        };

        let visible = if text.is_empty() { IMAGE_ONLY_TEXT } else { text };
        self.messages.push(ChatMessage {
            sender: Sender::Farmer,
            text: visible.to_string(),
            image: image.clone(),
            diagnosis: None,
        });
        self.in_flight = true;

        Ok(DiagnoseRequest {
            message,
            crop_type: None,
            location: None,
            image_base64: image,
            chat_history,
            language: self.lang.code().to_string(),
            language_name: self.lang.label().to_string(),
        })
    }

    /// Apply the outcome of the in-flight request. Failures append a single
    /// synthetic assistant message; nothing is retried.
    pub fn complete<E: fmt::Display>(&mut self, outcome: Result<DiagnoseResponse, E>) {
        if !self.in_flight {
            log::debug!("chat reply arrived with no request in flight");
        }
        self.in_flight = false;

        let reply = match outcome {
            Ok(resp) => {
                let text = resp.diagnosis.clone().unwrap_or_else(|| FALLBACK_REPLY.to_string());
                ChatMessage {
                    sender: Sender::Assistant,
                    text,
                    image: None,
                    diagnosis: Some(Diagnosis {
                        issue: resp.diagnosis.unwrap_or_default(),
                        confidence: resp.confidence.unwrap_or_else(|| FALLBACK_CONFIDENCE.to_string()),
                        treatment: resp.treatment,
                    }),
                }
            }
            Err(e) => {
                log::warn!("diagnose request failed: {}", e);
                ChatMessage::assistant(CONNECTION_ERROR)
            }
        };
        self.messages.push(reply);
    }
}
