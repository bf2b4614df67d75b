use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::goals::{self, DailyGoal, GoalOutcome};
use super::metrics::{MetricsUpdate, WellnessMetrics};
use super::pet::Pet;
use crate::error::Result;

pub const MOTIVATIONAL_MESSAGES: [&str; 8] = [
    "Cada día es una nueva oportunidad para crecer 🌱",
    "Tu bienestar es una inversión, no un gasto ✨",
    "Pequeños pasos, grandes cambios 🚀",
    "Eres más fuerte de lo que crees 💪",
    "El autocuidado no es egoísta, es necesario 💚",
    "Progreso, no perfección 🌟",
    "Tu salud mental importa tanto como la física 🧠",
    "Celebra cada pequeña victoria 🎉",
];

const SEED_STREAK: u32 = 3;

/// Single source of truth for the user's metrics, pet and daily goals.
///
/// Every mutation has an `_at` variant taking the current time so callers
/// (and tests) control the clock.
#[derive(Debug, Clone)]
pub struct WellnessState {
    metrics: WellnessMetrics,
    pet: Pet,
    goals: Vec<DailyGoal>,
    streak: u32,
    motivational_message: String,
}

/// Serializable copy of the whole state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellnessSnapshot {
    pub metrics: WellnessMetrics,
    pub pet: Pet,
    pub goals: Vec<DailyGoal>,
    pub streak: u32,
    pub motivational_message: String,
    pub overall_score: f64,
}

impl WellnessState {
    pub fn new() -> Self {
        Self::with_rng(Utc::now(), &mut StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Utc::now(), &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let motivational_message = MOTIVATIONAL_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(MOTIVATIONAL_MESSAGES[0])
            .to_string();

        WellnessState {
            metrics: WellnessMetrics::seed(now),
            pet: Pet::seed(now),
            goals: goals::starter_goals(),
            streak: SEED_STREAK,
            motivational_message,
        }
    }

    pub fn metrics(&self) -> &WellnessMetrics {
        &self.metrics
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn goals(&self) -> &[DailyGoal] {
        &self.goals
    }

    pub fn goal(&self, goal_id: &str) -> Option<&DailyGoal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    pub fn completed_goals(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    pub fn goal_progress(&self) -> f64 {
        goals::progress(&self.goals)
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn motivational_message(&self) -> &str {
        &self.motivational_message
    }

    pub fn update_metrics(&mut self, update: MetricsUpdate) -> Result<()> {
        self.update_metrics_at(update, Utc::now())
    }

    pub fn update_metrics_at(&mut self, update: MetricsUpdate, now: DateTime<Utc>) -> Result<()> {
        self.metrics.apply(&update, now)?;
        debug!(?update, "Metrics updated");
        Ok(())
    }

    pub fn feed_pet(&mut self) {
        self.feed_pet_at(Utc::now())
    }

    pub fn feed_pet_at(&mut self, now: DateTime<Utc>) {
        self.pet.feed(now);
        info!(
            happiness = self.pet.happiness,
            health = self.pet.health,
            "Pet fed"
        );
    }

    /// Mark a goal as completed and reward the pet.
    ///
    /// Completion is one-way here: a goal that is already completed is left
    /// alone. Each goal rewards the pet at most once, even when it is
    /// reopened and completed again. An unknown id is a no-op reported as
    /// [`GoalOutcome::NotFound`].
    pub fn complete_goal(&mut self, goal_id: &str) -> GoalOutcome {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) else {
            debug!(goal_id, "Goal not found");
            return GoalOutcome::NotFound;
        };

        if goal.completed {
            return GoalOutcome::AlreadyCompleted;
        }

        goal.completed = true;
        if goal.rewarded {
            debug!(goal_id, "Goal completed again, already rewarded");
            return GoalOutcome::Completed;
        }

        goal.rewarded = true;
        self.pet.reward_goal();
        info!(
            goal_id,
            level = self.pet.level,
            happiness = self.pet.happiness,
            "Goal completed"
        );
        GoalOutcome::Completed
    }

    /// Flip a goal between pending and completed.
    ///
    /// Completing goes through [`complete_goal`](Self::complete_goal);
    /// reopening keeps the reward already granted, so cycling one goal never
    /// rewards it twice.
    pub fn toggle_goal(&mut self, goal_id: &str) -> GoalOutcome {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) else {
            return GoalOutcome::NotFound;
        };

        if !goal.completed {
            return self.complete_goal(goal_id);
        }

        goal.completed = false;
        debug!(goal_id, "Goal reopened");
        GoalOutcome::Reopened
    }

    pub fn overall_wellness_score(&self) -> f64 {
        self.metrics.overall_score()
    }

    pub fn decay_tick(&mut self) {
        self.decay_tick_at(Utc::now())
    }

    pub fn decay_tick_at(&mut self, now: DateTime<Utc>) {
        self.pet.decay(now);
        debug!(
            hours = self.pet.hours_since_fed(now),
            happiness = self.pet.happiness,
            health = self.pet.health,
            "Pet decay tick"
        );
    }

    pub fn snapshot(&self) -> WellnessSnapshot {
        WellnessSnapshot {
            metrics: self.metrics.clone(),
            pet: self.pet.clone(),
            goals: self.goals.clone(),
            streak: self.streak,
            motivational_message: self.motivational_message.clone(),
            overall_score: self.overall_wellness_score(),
        }
    }
}

impl Default for WellnessState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::metrics::Metric;
    use chrono::Duration;

    fn state_at(now: DateTime<Utc>) -> WellnessState {
        WellnessState::with_rng(now, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_seed_state() {
        let now = Utc::now();
        let state = state_at(now);
        assert_eq!(state.metrics().mood, 7.0);
        assert_eq!(state.metrics().water, 3.0);
        assert_eq!(state.pet().name, "Luna");
        assert_eq!(state.pet().level, 5.0);
        assert_eq!(state.pet().last_fed, now - Duration::hours(2));
        assert_eq!(state.goals().len(), 4);
        assert_eq!(state.streak(), 3);
        assert!(MOTIVATIONAL_MESSAGES.contains(&state.motivational_message()));
    }

    #[test]
    fn test_motivational_message_follows_seed() {
        let now = Utc::now();
        assert_eq!(
            state_at(now).motivational_message(),
            state_at(now).motivational_message()
        );
    }

    #[test]
    fn test_update_metrics_last_write_wins() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);
        let mut state = state_at(now);
        state.update_metrics_at(MetricsUpdate::single(Metric::Mood, 5.0), now).unwrap();
        state.update_metrics_at(MetricsUpdate::single(Metric::Mood, 5.0), later).unwrap();
        assert_eq!(state.metrics().mood, 5.0);
        assert_eq!(state.metrics().energy, 6.0);
        assert_eq!(state.metrics().last_updated, later);
    }

    #[test]
    fn test_seed_overall_score() {
        let state = state_at(Utc::now());
        assert_eq!(state.overall_wellness_score(), 6.6);
    }

    #[test]
    fn test_score_follows_metric_changes() {
        let mut state = state_at(Utc::now());
        state
            .update_metrics(MetricsUpdate {
                stress: Some(10.0),
                anxiety: Some(10.0),
                ..Default::default()
            })
            .unwrap();
        // positive 6.67, negative 10
        assert_eq!(state.overall_wellness_score(), 3.3);
    }

    #[test]
    fn test_complete_goal_rewards_once() {
        let mut state = state_at(Utc::now());
        assert_eq!(state.complete_goal("2"), GoalOutcome::Completed);
        assert!((state.pet().level - 5.1).abs() < 1e-9);
        assert_eq!(state.pet().happiness, 85.0);
        assert!(state.goal("2").unwrap().completed);

        assert_eq!(state.complete_goal("2"), GoalOutcome::AlreadyCompleted);
        assert!((state.pet().level - 5.1).abs() < 1e-9);
        assert_eq!(state.pet().happiness, 85.0);
    }

    #[test]
    fn test_complete_unknown_goal_is_noop() {
        let mut state = state_at(Utc::now());
        let before = state.snapshot();
        assert_eq!(state.complete_goal("missing"), GoalOutcome::NotFound);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_reward_happiness_capped() {
        let now = Utc::now();
        let mut state = state_at(now);
        state.feed_pet_at(now);
        state.feed_pet_at(now);
        for id in ["1", "2", "3", "4"] {
            state.complete_goal(id);
        }
        assert_eq!(state.pet().happiness, 100.0);
        assert!((state.pet().level - 5.4).abs() < 1e-9);
        assert_eq!(state.goal_progress(), 100.0);
    }

    #[test]
    fn test_toggle_goal() {
        let mut state = state_at(Utc::now());
        assert_eq!(state.toggle_goal("4"), GoalOutcome::Completed);
        assert_eq!(state.completed_goals(), 1);
        assert_eq!(state.toggle_goal("4"), GoalOutcome::Reopened);
        assert_eq!(state.completed_goals(), 0);
        assert!((state.pet().level - 5.1).abs() < 1e-9);
        assert_eq!(state.toggle_goal("nope"), GoalOutcome::NotFound);
    }

    #[test]
    fn test_toggle_cycles_reward_once() {
        let mut state = state_at(Utc::now());
        for _ in 0..10 {
            state.toggle_goal("1");
            state.toggle_goal("1");
        }
        assert!((state.pet().level - 5.1).abs() < 1e-9);
        assert_eq!(state.pet().happiness, 85.0);
        assert!(!state.goal("1").unwrap().completed);

        // reopened goal completed through complete_goal earns nothing either
        assert_eq!(state.complete_goal("1"), GoalOutcome::Completed);
        assert!((state.pet().level - 5.1).abs() < 1e-9);
        assert!(state.goal("1").unwrap().rewarded);
    }

    #[test]
    fn test_feed_then_decay() {
        let now = Utc::now();
        let mut state = state_at(now);
        state.decay_tick_at(now);
        assert_eq!(state.pet().happiness, 76.0);
        assert_eq!(state.pet().health, 83.0);

        state.feed_pet_at(now);
        assert_eq!(state.pet().happiness, 86.0);
        assert_eq!(state.pet().health, 88.0);

        // Fed just now: a tick at the same instant costs nothing
        state.decay_tick_at(now);
        assert_eq!(state.pet().happiness, 86.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = state_at(Utc::now());
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["pet"]["name"], "Luna");
        assert_eq!(json["goals"][1]["category"], "academic");
        assert_eq!(json["overall_score"], 6.6);
    }
}
