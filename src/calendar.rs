use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WellnessError};
use crate::recommendation::{Recommendation, RecommendationKind};
use crate::wellness::WellnessMetrics;

const DEFAULT_ACADEMIC_STRESS: f64 = 5.0;
const WARNING_LOAD: f64 = 3.0;
const RESTORATIVE_RELIEF: f64 = 1.0;
const MAX_LOAD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Academic,
    Wellness,
    Social,
    Warning,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Academic => write!(f, "academic"),
            EventKind::Wellness => write!(f, "wellness"),
            EventKind::Social => write!(f, "social"),
            EventKind::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "academic" | "academico" | "académico" => Ok(EventKind::Academic),
            "wellness" | "bienestar" => Ok(EventKind::Wellness),
            "social" => Ok(EventKind::Social),
            "warning" | "aviso" => Ok(EventKind::Warning),
            _ => Err(anyhow::anyhow!("Unknown event type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    /// Free-form time of day, e.g. "10:00" or "Todo el día"
    pub time: String,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Short tip shown right after an event is scheduled. Warnings get none.
pub fn smart_suggestion(event: &CalendarEvent) -> Option<String> {
    match event.kind {
        EventKind::Academic => Some(format!(
            "📘 Para \"{}\", intenta estudiar 40 minutos y descansar 10.",
            event.title
        )),
        EventKind::Wellness => Some("🧘 Actividad recomendada para equilibrar tu día.".to_string()),
        EventKind::Social => Some("👥 Recuerda que socializar también mejora tu bienestar.".to_string()),
        EventKind::Warning => None,
    }
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub kind: EventKind,
    pub stress_level: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadLevel {
    Low,
    Moderate,
    High,
}

impl LoadLevel {
    pub fn for_load(load: f64) -> Self {
        if load >= 7.0 {
            LoadLevel::High
        } else if load >= 5.0 {
            LoadLevel::Moderate
        } else {
            LoadLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub mental_load: f64,
}

impl WeekDay {
    pub fn level(&self) -> LoadLevel {
        LoadLevel::for_load(self.mental_load)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
}

impl Calendar {
    pub fn new() -> Self {
        Calendar { events: Vec::new() }
    }

    /// Sample week used by the demo front end
    pub fn seeded() -> Self {
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 1, d).unwrap_or_default();
        let event = |id: &str, title: &str, date, time: &str, kind, stress_level, description: &str| {
            CalendarEvent {
                id: id.to_string(),
                title: title.to_string(),
                date,
                time: time.to_string(),
                kind,
                stress_level,
                description: Some(description.to_string()),
            }
        };

        Calendar {
            events: vec![
                event("1", "Examen de Cálculo", day(28), "10:00", EventKind::Academic, Some(8),
                      "Examen final de cálculo diferencial"),
                event("2", "Entrega de Proyecto", day(28), "15:00", EventKind::Academic, Some(7),
                      "Proyecto final de programación"),
                event("3", "Sesión de meditación", day(28), "18:00", EventKind::Wellness, None,
                      "Meditación grupal - Reducir estrés pre-examen"),
                event("4", "⚠️ Día de alta carga mental", day(29), "Todo el día", EventKind::Warning, None,
                      "Se detecta alta carga académica. Programa descansos."),
                event("5", "Café con amigos", day(29), "16:00", EventKind::Social, None,
                      "Recomendado: Socializar después del examen"),
                event("6", "Ejercicio en el parque", day(30), "07:00", EventKind::Wellness, None,
                      "Actividad física para liberar endorfinas"),
            ],
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn event(&self, event_id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub fn events_for(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn add_event(&mut self, new_event: NewEvent) -> Result<String> {
        let title = new_event.title.trim();
        if title.is_empty() {
            return Err(WellnessError::EmptyTitle);
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.events.push(CalendarEvent {
            id: id.clone(),
            title: title.to_string(),
            date: new_event.date,
            time: new_event.time,
            kind: new_event.kind,
            stress_level: new_event.stress_level.map(|s| s.min(10)),
            description: None,
        });
        tracing::debug!(event_id = %id, date = %new_event.date, "Calendar event added");
        Ok(id)
    }

    /// Estimated 0-10 load of a day. Academic events weigh their stress
    /// level, warnings add a fixed amount, wellness and social events relieve.
    pub fn mental_load(&self, date: NaiveDate) -> f64 {
        let load: f64 = self
            .events_for(date)
            .iter()
            .map(|event| match event.kind {
                EventKind::Academic => event
                    .stress_level
                    .map(f64::from)
                    .unwrap_or(DEFAULT_ACADEMIC_STRESS),
                EventKind::Warning => WARNING_LOAD,
                EventKind::Wellness | EventKind::Social => -RESTORATIVE_RELIEF,
            })
            .sum();
        load.clamp(0.0, MAX_LOAD)
    }

    pub fn week(&self, start: NaiveDate) -> Vec<WeekDay> {
        let today = Utc::now().date_naive();
        (0..7)
            .map(|offset| {
                let date = start + Duration::days(offset);
                WeekDay {
                    date,
                    is_today: date == today,
                    mental_load: self.mental_load(date),
                }
            })
            .collect()
    }

    pub fn day_recommendation(&self, date: NaiveDate, metrics: &WellnessMetrics) -> Recommendation {
        let academic = self
            .events_for(date)
            .iter()
            .filter(|e| e.kind == EventKind::Academic)
            .count();

        if academic >= 2 && metrics.stress >= 6.0 {
            return Recommendation::new(
                RecommendationKind::ScheduleBreaks,
                "🧘 Recomendación de bienestar",
                "Tienes un día académicamente intenso. Te sugerimos incluir momentos de respiración profunda entre actividades.",
                "Programar descansos",
            );
        }

        if metrics.mood <= 5.0 {
            return Recommendation::new(
                RecommendationKind::EnjoyableActivity,
                "💚 Apoyo emocional",
                "Tu estado de ánimo está bajo. ¿Qué te parece programar una actividad que disfrutes?",
                "Agregar actividad placentera",
            );
        }

        Recommendation::new(
            RecommendationKind::BalancedDay,
            "🌟 Optimización del día",
            "Tu día se ve equilibrado. ¡Mantén ese balance entre productividad y bienestar!",
            "Ver más sugerencias",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_events_for_date() {
        let calendar = Calendar::seeded();
        assert_eq!(calendar.events_for(date(28)).len(), 3);
        assert_eq!(calendar.events_for(date(31)).len(), 0);
    }

    #[test]
    fn test_mental_load() {
        let calendar = Calendar::seeded();
        // 8 + 7 - 1
        assert_eq!(calendar.mental_load(date(28)), 10.0);
        // 3 - 1
        assert_eq!(calendar.mental_load(date(29)), 2.0);
        // relief alone never goes negative
        assert_eq!(calendar.mental_load(date(30)), 0.0);
        assert_eq!(LoadLevel::for_load(calendar.mental_load(date(28))), LoadLevel::High);
    }

    #[test]
    fn test_week_is_seven_consecutive_days() {
        let calendar = Calendar::seeded();
        let week = calendar.week(date(27));
        assert_eq!(week.len(), 7);
        assert_eq!(week[1].date, date(28));
        assert_eq!(week[1].level(), LoadLevel::High);
        assert_eq!(week[6].date, NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
    }

    #[test]
    fn test_add_event() {
        let mut calendar = Calendar::new();
        let id = calendar
            .add_event(NewEvent {
                title: "  Laboratorio de física ".to_string(),
                date: date(31),
                time: "09:00".to_string(),
                kind: EventKind::Academic,
                stress_level: Some(14),
            })
            .unwrap();
        let events = calendar.events_for(date(31));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].title, "Laboratorio de física");
        assert_eq!(events[0].stress_level, Some(10));
    }

    #[test]
    fn test_add_event_rejects_empty_title() {
        let mut calendar = Calendar::new();
        let result = calendar.add_event(NewEvent {
            title: "   ".to_string(),
            date: date(31),
            time: "09:00".to_string(),
            kind: EventKind::Social,
            stress_level: None,
        });
        assert!(matches!(result, Err(WellnessError::EmptyTitle)));
        assert!(calendar.events().is_empty());
    }

    #[test]
    fn test_day_recommendation() {
        let calendar = Calendar::seeded();
        let mut metrics = WellnessMetrics::seed(Utc::now());
        assert_eq!(
            calendar.day_recommendation(date(28), &metrics).kind,
            RecommendationKind::BalancedDay
        );

        metrics.stress = 6.0;
        assert_eq!(
            calendar.day_recommendation(date(28), &metrics).kind,
            RecommendationKind::ScheduleBreaks
        );

        metrics.mood = 5.0;
        assert_eq!(
            calendar.day_recommendation(date(29), &metrics).kind,
            RecommendationKind::EnjoyableActivity
        );
    }

    #[test]
    fn test_smart_suggestion_by_kind() {
        let calendar = Calendar::seeded();
        let exam = calendar.event("1").unwrap();
        assert_eq!(
            smart_suggestion(exam).as_deref(),
            Some("📘 Para \"Examen de Cálculo\", intenta estudiar 40 minutos y descansar 10.")
        );
        assert!(smart_suggestion(calendar.event("3").unwrap()).unwrap().starts_with("🧘"));
        assert!(smart_suggestion(calendar.event("5").unwrap()).unwrap().starts_with("👥"));
        assert_eq!(smart_suggestion(calendar.event("4").unwrap()), None);
    }

    #[test]
    fn test_event_kind_parse() {
        assert_eq!("Bienestar".parse::<EventKind>().unwrap(), EventKind::Wellness);
        assert!("party".parse::<EventKind>().is_err());
    }
}
