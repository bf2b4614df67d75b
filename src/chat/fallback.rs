use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// Topic detected in a user message, used to pick a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    MoodLow,
    MoodGood,
    Academic,
    Wellness,
    Motivation,
    Tips,
    General,
}

impl std::fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseCategory::MoodLow => write!(f, "mood_low"),
            ResponseCategory::MoodGood => write!(f, "mood_good"),
            ResponseCategory::Academic => write!(f, "academic"),
            ResponseCategory::Wellness => write!(f, "wellness"),
            ResponseCategory::Motivation => write!(f, "motivation"),
            ResponseCategory::Tips => write!(f, "tips"),
            ResponseCategory::General => write!(f, "general"),
        }
    }
}

const MOOD_LOW: &[&str] = &[
    "Entiendo que no te sientes muy bien hoy. Recuerda que es completamente normal tener días difíciles. ¿Te gustaría hablar sobre lo que te está preocupando?",
    "Parece que hoy ha sido un día complicado. Está bien sentirse así. ¿Qué te parece si hacemos un pequeño ejercicio de respiración juntos?",
    "Noto que tu ánimo está bajo. Tu bienestar es importante, y estoy aquí para apoyarte. ¿Hay algo específico que te está afectando?",
];

const MOOD_GOOD: &[&str] = &[
    "¡Me alegra saber que te sientes bien! 🌟 Aprovechemos esta energía positiva. ¿Hay algún objetivo que te gustaría trabajar hoy?",
    "¡Excelente! Cuando nos sentimos bien, es el momento perfecto para dar pasos hacia nuestras metas. ¿Qué te gustaría hacer hoy?",
    "Tu energía positiva es contagiosa. ¿Te parece si revisamos tus objetivos del día?",
];

const ACADEMIC: &[&str] = &[
    "Para estudiar mejor, te recomiendo la técnica Pomodoro: 25 minutos de estudio intenso + 5 minutos de descanso. ¿Has probado esta técnica?",
    "Si sientes que tienes mucha carga académica, hagamos un plan. ¿Qué materias son las más urgentes?",
    "Recuerda: es mejor estudiar un poco cada día que mucho en una sola sesión. ¿Cómo está tu organización de tiempo?",
];

const WELLNESS: &[&str] = &[
    "El autocuidado es fundamental. ¿Has tomado suficiente agua hoy? ¿Has hecho algún descanso activo?",
    "Tu bienestar físico y mental van de la mano. ¿Te gustaría que te guíe en un ejercicio de respiración?",
    "¿Sabías que caminar 10 minutos puede mejorar tu estado de ánimo? ¿Cuándo fue la última vez que saliste a tomar aire fresco?",
];

const MOTIVATION: &[&str] = &[
    "Como decía Marco Aurelio: 'Tienes poder sobre tu mente, no sobre los eventos externos. Date cuenta de esto, y encontrarás fuerza.'",
    "Cada pequeño paso cuenta. No necesitas ser perfecto, solo necesitas ser constante.",
    "Recuerda: el crecimiento sucede fuera de tu zona de confort, pero siempre a tu propio ritmo.",
];

const TIPS: &[&str] = &[
    "💡 Tip del día: Cuando te sientas abrumado, haz una lista de 3 cosas que SÍ puedes controlar ahora mismo.",
    "🌱 Dato curioso: Sonreír, incluso cuando no tienes ganas, puede activar las hormonas de la felicidad.",
    "☕ Si necesitas energía, prueba esto: 15 sentadillas + un vaso de agua. Es más efectivo que otra taza de café.",
];

const GENERAL_EXTRA: &[&str] = &[
    "Cuéntame más sobre eso. ¿Cómo te hace sentir?",
    "Entiendo. ¿Hay algo específico en lo que te gustaría trabajar?",
    "Es interesante lo que me cuentas. ¿Has intentado alguna estrategia para manejarlo?",
];

/// Keyword groups checked in order; the first hit decides the category.
const KEYWORDS: &[(ResponseCategory, &[&str])] = &[
    (ResponseCategory::MoodLow, &["triste", "mal", "deprimido", "bajo"]),
    (ResponseCategory::MoodGood, &["bien", "genial", "excelente", "feliz"]),
    (ResponseCategory::Academic, &["estudio", "examen", "tarea", "académico"]),
    (ResponseCategory::Wellness, &["cansado", "estrés", "ansiedad", "agua"]),
    (ResponseCategory::Motivation, &["motivación", "desanimado", "ayuda", "consejo"]),
    (ResponseCategory::Tips, &["tip", "dato", "curioso"]),
];

pub fn classify(message: &str) -> ResponseCategory {
    let message = message.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| message.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(ResponseCategory::General)
}

/// Ordered reply table for a category
pub fn replies(category: ResponseCategory) -> Vec<&'static str> {
    match category {
        ResponseCategory::MoodLow => MOOD_LOW.to_vec(),
        ResponseCategory::MoodGood => MOOD_GOOD.to_vec(),
        ResponseCategory::Academic => ACADEMIC.to_vec(),
        ResponseCategory::Wellness => WELLNESS.to_vec(),
        ResponseCategory::Motivation => MOTIVATION.to_vec(),
        ResponseCategory::Tips => TIPS.to_vec(),
        ResponseCategory::General => MOTIVATION
            .iter()
            .chain(WELLNESS)
            .chain(GENERAL_EXTRA)
            .copied()
            .collect(),
    }
}

/// Offline responder. Picks uniformly from the category table with its own
/// random source so a fixed seed gives a fixed conversation.
pub struct FallbackResponder {
    rng: StdRng,
}

impl FallbackResponder {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FallbackResponder { rng }
    }

    pub fn respond(&mut self, message: &str) -> (ResponseCategory, String) {
        let category = classify(message);
        let table = replies(category);
        let reply = table
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(GENERAL_EXTRA[0]);
        (category, reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("Me siento TRISTE"), ResponseCategory::MoodLow);
        assert_eq!(classify("Hoy estoy genial"), ResponseCategory::MoodGood);
        assert_eq!(classify("Mañana tengo examen"), ResponseCategory::Academic);
        assert_eq!(classify("Estoy cansado"), ResponseCategory::Wellness);
        assert_eq!(classify("Necesito motivación"), ResponseCategory::Motivation);
        assert_eq!(classify("Dame un tip"), ResponseCategory::Tips);
        assert_eq!(classify("¿Qué opinas del clima?"), ResponseCategory::General);
    }

    #[test]
    fn test_low_mood_wins_over_later_groups() {
        // "mal" and "examen" both match; mood comes first
        assert_eq!(classify("Me fue mal en el examen"), ResponseCategory::MoodLow);
    }

    #[test]
    fn test_general_table() {
        assert_eq!(replies(ResponseCategory::General).len(), 9);
    }

    #[test]
    fn test_reply_comes_from_category_table() {
        let mut responder = FallbackResponder::new(Some(3));
        for _ in 0..10 {
            let (category, reply) = responder.respond("tengo mucha tarea");
            assert_eq!(category, ResponseCategory::Academic);
            assert!(ACADEMIC.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_same_seed_same_replies() {
        let mut a = FallbackResponder::new(Some(11));
        let mut b = FallbackResponder::new(Some(11));
        for message in ["hola", "estoy triste", "dato curioso", "hola"] {
            assert_eq!(a.respond(message), b.respond(message));
        }
    }
}
