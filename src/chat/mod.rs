pub mod fallback;
pub mod provider;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::{CalendarEvent, EventKind};
use crate::error::{Result, WellnessError};
use crate::wellness::WellnessMetrics;

pub use fallback::{FallbackResponder, ResponseCategory};
pub use provider::{AIConfig, AIProvider, AIProviderClient, ChatMessage, CompletionBackend};

pub const SYSTEM_PROMPT: &str = "Eres un asistente amigable y comprensivo para estudiantes universitarios. Siempre debes responder con empatía, validando cómo se siente el estudiante, y luego ofrecer una sugerencia concreta y sencilla para mejorar su bienestar emocional o su rendimiento académico. Mantén las respuestas breves, humanas y en un tono positivo. Usa lenguaje claro y cercano, en español.";

pub const GREETING: &str = "¡Hola! 😊 Soy tu asistente de bienestar. ¿Cómo te sientes hoy? Estoy aquí para escucharte y apoyarte.";

const PLANNER_PROMPT: &str = "Eres un asistente que ayuda a gestionar el calendario de un estudiante universitario.
Tu tarea es:
- Analizar los eventos del día.
- Detectar si la carga académica es alta.
- Recomendar pausas, actividades de bienestar o momentos de socialización si es necesario.
- Considerar el nivel de estrés y ánimo actual del usuario.

Devuelve una recomendación breve y empática.";

const ACTIVITY_PROMPT: &str = "Eres un asistente universitario empático.";

pub const PLAN_UNAVAILABLE: &str = "No se pudo generar una recomendación.";

/// Greeting plus the last twenty exchanges
const MAX_HISTORY: usize = 41;

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    fn bot(text: impl Into<String>) -> Self {
        ChatTurn { text: text.into(), is_bot: true, timestamp: Utc::now() }
    }

    fn user(text: impl Into<String>) -> Self {
        ChatTurn { text: text.into(), is_bot: false, timestamp: Utc::now() }
    }

    fn to_message(&self) -> ChatMessage {
        if self.is_bot {
            ChatMessage::assistant(&self.text)
        } else {
            ChatMessage::user(&self.text)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReplySource {
    Model,
    Fallback(ResponseCategory),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

/// One conversation with the assistant. Backend failures never reach the
/// caller; the canned responder answers instead.
pub struct ChatSession {
    backend: Box<dyn CompletionBackend>,
    fallback: FallbackResponder,
    system_prompt: String,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(backend: Box<dyn CompletionBackend>, fallback: FallbackResponder) -> Self {
        ChatSession {
            backend,
            fallback,
            system_prompt: SYSTEM_PROMPT.to_string(),
            history: vec![ChatTurn::bot(GREETING)],
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn backend(&self) -> &dyn CompletionBackend {
        self.backend.as_ref()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// System prompt followed by every turn so far, oldest first
    pub fn messages(&self) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::system(&self.system_prompt))
            .chain(self.history.iter().map(ChatTurn::to_message))
            .collect()
    }

    pub async fn send(&mut self, text: &str) -> Result<ChatReply> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WellnessError::EmptyMessage);
        }

        self.history.push(ChatTurn::user(text));

        let reply = match self.backend.complete(&self.messages()).await {
            Ok(content) if !content.trim().is_empty() => ChatReply {
                text: content.trim().to_string(),
                source: ReplySource::Model,
            },
            Ok(_) => self.fallback_reply(text, "empty completion"),
            Err(e) => self.fallback_reply(text, &e.to_string()),
        };

        self.history.push(ChatTurn::bot(&reply.text));
        if self.history.len() > MAX_HISTORY {
            // drop whole exchanges, never the greeting
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(1..1 + excess);
        }

        Ok(reply)
    }

    fn fallback_reply(&mut self, text: &str, reason: &str) -> ChatReply {
        warn!(reason, "Chat backend unavailable, using canned reply");
        let (category, reply) = self.fallback.respond(text);
        ChatReply {
            text: reply,
            source: ReplySource::Fallback(category),
        }
    }
}

fn plan_prompt(events: &[&CalendarEvent], metrics: &WellnessMetrics) -> String {
    let event_lines: Vec<String> = events
        .iter()
        .map(|e| {
            let stress = e
                .stress_level
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            format!("- {} ({}) a las {} - estrés {}", e.title, e.kind, e.time, stress)
        })
        .collect();

    format!(
        "Eventos del día:\n{}\n\nEstado del usuario:\n- Estrés: {}/10\n- Ánimo: {}/10\n\n¿Qué sugerencia personalizada darías para hoy?",
        event_lines.join("\n"),
        metrics.stress,
        metrics.mood
    )
}

/// Ask the model for a short plan for one day. Falls back to a fixed
/// sentence when the backend fails.
pub async fn plan_day(
    backend: &dyn CompletionBackend,
    events: &[&CalendarEvent],
    metrics: &WellnessMetrics,
) -> String {
    let messages = [
        ChatMessage::system(PLANNER_PROMPT),
        ChatMessage::user(plan_prompt(events, metrics)),
    ];

    match backend.complete(&messages).await {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => PLAN_UNAVAILABLE.to_string(),
        Err(e) => {
            debug!(error = %e, "Day planning failed");
            PLAN_UNAVAILABLE.to_string()
        }
    }
}

fn activity_prompt(title: &str, kind: EventKind, metrics: &WellnessMetrics) -> String {
    format!(
        "Eres un asistente que ayuda a planear tareas y actividades universitarias.\n\nActividad:\n- Título: {}\n- Tipo: {}\n\nEstado del estudiante:\n- Estrés: {}/10\n- Ánimo: {}/10\n\n¿Qué recomendación breve le darías sobre cómo abordar esta actividad?\nDevuelve solo el texto de la sugerencia.",
        title, kind, metrics.stress, metrics.mood
    )
}

/// Ask the model how to approach one activity. Same fallback as
/// [`plan_day`].
pub async fn activity_advice(
    backend: &dyn CompletionBackend,
    title: &str,
    kind: EventKind,
    metrics: &WellnessMetrics,
) -> String {
    let messages = [
        ChatMessage::system(ACTIVITY_PROMPT),
        ChatMessage::user(activity_prompt(title, kind, metrics)),
    ];

    match backend.complete(&messages).await {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => PLAN_UNAVAILABLE.to_string(),
        Err(e) => {
            debug!(error = %e, title, "Activity advice failed");
            PLAN_UNAVAILABLE.to_string()
        }
    }
}
