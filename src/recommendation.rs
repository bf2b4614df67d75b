use serde::Serialize;

use crate::wellness::WellnessMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    EmotionalSupport,
    Rest,
    StressManagement,
    Hydration,
    KeepGoing,
    ScheduleBreaks,
    EnjoyableActivity,
    BalancedDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
}

impl Recommendation {
    pub(crate) const fn new(
        kind: RecommendationKind,
        title: &'static str,
        message: &'static str,
        action: &'static str,
    ) -> Self {
        Recommendation { kind, title, message, action }
    }
}

/// Dashboard suggestion for the current metrics. Rules are checked in
/// order and the first match wins.
pub fn dashboard_recommendation(metrics: &WellnessMetrics) -> Recommendation {
    if metrics.mood <= 4.0 || metrics.anxiety >= 7.0 {
        return Recommendation::new(
            RecommendationKind::EmotionalSupport,
            "💙 Apoyo emocional",
            "Parece que hoy te sientes un poco bajo. ¿Te gustaría escuchar música relajante o ver algunos recuerdos bonitos?",
            "Ver recomendaciones",
        );
    }

    if metrics.energy <= 4.0 && metrics.sleep <= 5.0 {
        return Recommendation::new(
            RecommendationKind::Rest,
            "😴 Descanso necesario",
            "Tu energía y sueño están bajos. Es momento de priorizar el descanso.",
            "Tips de sueño",
        );
    }

    if metrics.stress >= 7.0 {
        return Recommendation::new(
            RecommendationKind::StressManagement,
            "🧘 Manejo del estrés",
            "Detectamos niveles altos de estrés. Te sugerimos técnicas de relajación.",
            "Ejercicios de respiración",
        );
    }

    if metrics.water <= 3.0 {
        return Recommendation::new(
            RecommendationKind::Hydration,
            "💧 Hidratación",
            "No olvides mantener tu cuerpo hidratado. ¡Tu cerebro lo agradecerá!",
            "Recordatorio de agua",
        );
    }

    Recommendation::new(
        RecommendationKind::KeepGoing,
        "🌟 ¡Vas muy bien!",
        "Tu bienestar general está en buen estado. ¡Sigue así!",
        "Nuevos objetivos",
    )
}

pub fn mood_label(mood: f64) -> &'static str {
    if mood >= 8.0 {
        "Excelente"
    } else if mood >= 6.0 {
        "Bien"
    } else if mood >= 4.0 {
        "Regular"
    } else {
        "Necesitas apoyo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn metrics() -> WellnessMetrics {
        WellnessMetrics::seed(Utc::now())
    }

    #[test]
    fn test_seed_needs_water() {
        // seed has water 3 and nothing else alarming
        assert_eq!(
            dashboard_recommendation(&metrics()).kind,
            RecommendationKind::Hydration
        );
    }

    #[test]
    fn test_rule_order() {
        let mut m = metrics();
        m.mood = 3.0;
        m.stress = 9.0;
        assert_eq!(dashboard_recommendation(&m).kind, RecommendationKind::EmotionalSupport);

        let mut m = metrics();
        m.energy = 4.0;
        m.sleep = 5.0;
        m.stress = 8.0;
        assert_eq!(dashboard_recommendation(&m).kind, RecommendationKind::Rest);

        let mut m = metrics();
        m.stress = 7.0;
        assert_eq!(dashboard_recommendation(&m).kind, RecommendationKind::StressManagement);

        let mut m = metrics();
        m.water = 6.0;
        assert_eq!(dashboard_recommendation(&m).kind, RecommendationKind::KeepGoing);
    }

    #[test]
    fn test_high_anxiety_gets_support() {
        let mut m = metrics();
        m.anxiety = 7.0;
        assert_eq!(dashboard_recommendation(&m).kind, RecommendationKind::EmotionalSupport);
    }

    #[test]
    fn test_mood_label() {
        assert_eq!(mood_label(8.0), "Excelente");
        assert_eq!(mood_label(7.0), "Bien");
        assert_eq!(mood_label(4.0), "Regular");
        assert_eq!(mood_label(1.0), "Necesitas apoyo");
    }
}
