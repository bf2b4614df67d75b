pub mod goals;
pub mod metrics;
pub mod pet;
pub mod state;

pub use goals::{DailyGoal, GoalCategory, GoalOutcome};
pub use metrics::{Metric, MetricLevel, MetricsUpdate, WellnessMetrics};
pub use pet::{Pet, PetMood};
pub use state::{WellnessSnapshot, WellnessState};
