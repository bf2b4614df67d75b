use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WellnessError};

pub const ANONYMOUS_AUTHOR: &str = "Estudiante Anónimo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Nutrition,
    Sleep,
    Focus,
    Motivation,
    Anxiety,
    General,
}

impl PostCategory {
    pub const ALL: [PostCategory; 6] = [
        PostCategory::Nutrition,
        PostCategory::Sleep,
        PostCategory::Focus,
        PostCategory::Motivation,
        PostCategory::Anxiety,
        PostCategory::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PostCategory::Nutrition => "Alimentación Saludable",
            PostCategory::Sleep => "Mejor Descanso",
            PostCategory::Focus => "Concentración",
            PostCategory::Motivation => "Motivación",
            PostCategory::Anxiety => "Manejo de Ansiedad",
            PostCategory::General => "General",
        }
    }
}

impl std::fmt::Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostCategory::Nutrition => write!(f, "nutrition"),
            PostCategory::Sleep => write!(f, "sleep"),
            PostCategory::Focus => write!(f, "focus"),
            PostCategory::Motivation => write!(f, "motivation"),
            PostCategory::Anxiety => write!(f, "anxiety"),
            PostCategory::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for PostCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "nutrition" | "alimentacion" | "alimentación" => Ok(PostCategory::Nutrition),
            "sleep" | "sueño" | "sueno" => Ok(PostCategory::Sleep),
            "focus" | "concentracion" | "concentración" => Ok(PostCategory::Focus),
            "motivation" | "motivacion" | "motivación" => Ok(PostCategory::Motivation),
            "anxiety" | "ansiedad" => Ok(PostCategory::Anxiety),
            "general" => Ok(PostCategory::General),
            _ => Err(anyhow::anyhow!("Unknown community category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    pub category: PostCategory,
    pub members: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityPost {
    pub id: String,
    pub author: String,
    pub category: PostCategory,
    pub title: String,
    pub content: String,
    pub likes: u32,
    pub replies: u32,
    pub posted_at: DateTime<Utc>,
    pub is_helpful: bool,
    pub moderated: bool,
}

impl CommunityPost {
    /// Short relative age such as "2h" or "3d"
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let age = now.signed_duration_since(self.posted_at);
        if age.num_days() >= 1 {
            format!("{}d", age.num_days())
        } else if age.num_hours() >= 1 {
            format!("{}h", age.num_hours())
        } else {
            format!("{}m", age.num_minutes().max(0))
        }
    }
}

/// Anonymous, in-process community board
#[derive(Debug, Clone, Default)]
pub struct CommunityBoard {
    interests: Vec<Interest>,
    posts: Vec<CommunityPost>,
}

impl CommunityBoard {
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let interests = [234, 189, 156, 312, 98, 445]
            .into_iter()
            .zip(PostCategory::ALL)
            .map(|(members, category)| Interest { category, members })
            .collect();

        let post = |id: &str, author: &str, category, title: &str, content: &str, likes, replies, hours_ago| {
            CommunityPost {
                id: id.to_string(),
                author: author.to_string(),
                category,
                title: title.to_string(),
                content: content.to_string(),
                likes,
                replies,
                posted_at: now - Duration::hours(hours_ago),
                is_helpful: true,
                moderated: true,
            }
        };

        let posts = vec![
            post("1", ANONYMOUS_AUTHOR, PostCategory::Focus,
                 "Técnica que me cambió la vida para estudiar",
                 "Cuando me siento muy disperso, uso la técnica 5-4-3-2-1: identifico 5 cosas que veo, 4 que puedo tocar, 3 que escucho, 2 que huelo y 1 que saboreo. Me ayuda a estar presente antes de estudiar.",
                 47, 12, 2),
            post("2", "Luna_2024", PostCategory::Anxiety,
                 "Para días difíciles",
                 "En mis días más duros, me recuerdo que los sentimientos son como el clima: temporales. Esta frase me ayuda: \"No tienes que ser perfecto, solo tienes que intentarlo\".",
                 73, 28, 4),
            post("3", "Café_Student", PostCategory::Nutrition,
                 "Snacks que realmente funcionan",
                 "Dejé las galletas y ahora como almendras + una manzana cuando estudio. Mi concentración mejoró mucho y no tengo esos bajones de energía a media tarde.",
                 29, 8, 6),
            post("4", "Noche_Owl", PostCategory::Sleep,
                 "Rutina que me ayudó a dormir mejor",
                 "Apago todas las pantallas 1 hora antes de dormir y escribo 3 cosas buenas del día. Al principio era difícil, pero ahora duermo mucho mejor y me despierto más descansado.",
                 56, 15, 8),
            post("5", "Resiliente_22", PostCategory::Motivation,
                 "Cuando sientes que no puedes más",
                 "Recordatorio: está bien tomar descansos. Está bien no ser productivo todo el tiempo. Está bien pedir ayuda. Tu bienestar es más importante que cualquier calificación.",
                 94, 31, 12),
        ];

        CommunityBoard { interests, posts }
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    /// All posts, newest first
    pub fn posts(&self) -> Vec<&CommunityPost> {
        let mut posts: Vec<_> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        posts
    }

    /// Posts of one category, newest first. `General` lists everything.
    pub fn posts_in(&self, category: PostCategory) -> Vec<&CommunityPost> {
        self.posts()
            .into_iter()
            .filter(|p| category == PostCategory::General || p.category == category)
            .collect()
    }

    pub fn post(&self, post_id: &str) -> Option<&CommunityPost> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn publish(&mut self, category: PostCategory, title: &str, content: &str) -> Result<String> {
        self.publish_at(category, title, content, Utc::now())
    }

    pub fn publish_at(
        &mut self,
        category: PostCategory,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let content = content.trim();
        if content.is_empty() {
            return Err(WellnessError::EmptyMessage);
        }

        let title: String = match title.trim() {
            "" => content.chars().take(40).collect(),
            t => t.to_string(),
        };

        let id = uuid::Uuid::new_v4().to_string();
        self.posts.push(CommunityPost {
            id: id.clone(),
            author: ANONYMOUS_AUTHOR.to_string(),
            category,
            title,
            content: content.to_string(),
            likes: 0,
            replies: 0,
            posted_at: now,
            is_helpful: false,
            moderated: false,
        });
        tracing::info!(post_id = %id, %category, "Community post published");
        Ok(id)
    }

    pub fn like(&mut self, post_id: &str) -> Result<u32> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| WellnessError::PostNotFound(post_id.to_string()))?;
        post.likes += 1;
        Ok(post.likes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_board() {
        let now = Utc::now();
        let board = CommunityBoard::seeded(now);
        assert_eq!(board.interests().len(), 6);
        assert_eq!(board.interests()[5].members, 445);
        let posts = board.posts();
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[0].age_label(now), "2h");
    }

    #[test]
    fn test_posts_in_category() {
        let board = CommunityBoard::seeded(Utc::now());
        let sleep = board.posts_in(PostCategory::Sleep);
        assert_eq!(sleep.len(), 1);
        assert_eq!(sleep[0].author, "Noche_Owl");
        assert_eq!(board.posts_in(PostCategory::General).len(), 5);
    }

    #[test]
    fn test_publish_is_anonymous_and_newest() {
        let now = Utc::now();
        let mut board = CommunityBoard::seeded(now);
        let id = board
            .publish_at(PostCategory::Anxiety, "", "Respirar 4-7-8 me ayuda antes de exponer", now)
            .unwrap();
        let posts = board.posts();
        assert_eq!(posts[0].id, id);
        assert_eq!(posts[0].author, ANONYMOUS_AUTHOR);
        assert_eq!(posts[0].likes, 0);
        assert!(!posts[0].title.is_empty());
        assert_eq!(board.posts_in(PostCategory::Anxiety).len(), 2);
    }

    #[test]
    fn test_publish_rejects_empty() {
        let mut board = CommunityBoard::seeded(Utc::now());
        assert!(matches!(
            board.publish(PostCategory::General, "Hola", "   "),
            Err(WellnessError::EmptyMessage)
        ));
        assert_eq!(board.posts().len(), 5);
    }

    #[test]
    fn test_like() {
        let mut board = CommunityBoard::seeded(Utc::now());
        assert_eq!(board.like("5").unwrap(), 95);
        assert_eq!(board.post("5").unwrap().likes, 95);
        assert!(matches!(board.like("99"), Err(WellnessError::PostNotFound(_))));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("sueño".parse::<PostCategory>().unwrap(), PostCategory::Sleep);
        assert!("memes".parse::<PostCategory>().is_err());
    }
}
