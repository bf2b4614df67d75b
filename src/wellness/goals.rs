use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Academic,
    Wellness,
    Social,
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalCategory::Academic => write!(f, "academic"),
            GoalCategory::Wellness => write!(f, "wellness"),
            GoalCategory::Social => write!(f, "social"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyGoal {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: GoalCategory,
    /// Set once the pet has been rewarded for this goal
    #[serde(default)]
    pub rewarded: bool,
}

impl DailyGoal {
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: GoalCategory) -> Self {
        DailyGoal {
            id: id.into(),
            title: title.into(),
            completed: false,
            category,
            rewarded: false,
        }
    }
}

/// Result of a goal mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Pending goal is now completed. The pet is rewarded only the first
    /// time a goal is completed.
    Completed,
    /// Goal was already completed; nothing changed
    AlreadyCompleted,
    /// Completed goal was moved back to pending
    Reopened,
    /// No goal with that id; nothing changed
    NotFound,
}

pub fn starter_goals() -> Vec<DailyGoal> {
    vec![
        DailyGoal::new("1", "Tomar 8 vasos de agua", GoalCategory::Wellness),
        DailyGoal::new("2", "Revisar apuntes de cálculo", GoalCategory::Academic),
        DailyGoal::new("3", "Hacer 5 minutos de meditación", GoalCategory::Wellness),
        DailyGoal::new("4", "Llamar a un amigo", GoalCategory::Social),
    ]
}

/// Share of completed goals as a percentage. An empty list counts as 0.
pub fn progress(goals: &[DailyGoal]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }
    let completed = goals.iter().filter(|g| g.completed).count();
    completed as f64 / goals.len() as f64 * 100.0
}
