use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const MAX_VITALITY: f64 = 100.0;
const FEED_HAPPINESS: f64 = 10.0;
const FEED_HEALTH: f64 = 5.0;
const GOAL_HAPPINESS: f64 = 5.0;
const GOAL_LEVEL: f64 = 0.1;
const HAPPINESS_DECAY_PER_HOUR: f64 = 2.0;
const HEALTH_DECAY_PER_HOUR: f64 = 1.0;

/// Virtual pet whose vitality follows the user's engagement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub name: String,
    /// Grows with every rewarded goal; never decreases
    pub level: f64,
    /// 0.0 to 100.0
    pub happiness: f64,
    /// 0.0 to 100.0
    pub health: f64,
    pub last_fed: DateTime<Utc>,
}

impl Pet {
    pub fn seed(now: DateTime<Utc>) -> Self {
        Pet {
            name: "Luna".to_string(),
            level: 5.0,
            happiness: 80.0,
            health: 85.0,
            last_fed: now - Duration::hours(2),
        }
    }

    pub fn feed(&mut self, now: DateTime<Utc>) {
        self.happiness = (self.happiness + FEED_HAPPINESS).min(MAX_VITALITY);
        self.health = (self.health + FEED_HEALTH).min(MAX_VITALITY);
        self.last_fed = now;
    }

    /// Reward for a completed goal. The level has no upper bound.
    pub fn reward_goal(&mut self) {
        self.happiness = (self.happiness + GOAL_HAPPINESS).min(MAX_VITALITY);
        self.level += GOAL_LEVEL;
    }

    pub fn hours_since_fed(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = now.signed_duration_since(self.last_fed);
        (elapsed.num_milliseconds() as f64 / 3_600_000.0).max(0.0)
    }

    /// One decay step. The penalty for every hour since the last feeding is
    /// subtracted from the current values, so repeated ticks compound.
    pub fn decay(&mut self, now: DateTime<Utc>) {
        let hours = self.hours_since_fed(now);
        self.happiness = (self.happiness - hours * HAPPINESS_DECAY_PER_HOUR).clamp(0.0, MAX_VITALITY);
        self.health = (self.health - hours * HEALTH_DECAY_PER_HOUR).clamp(0.0, MAX_VITALITY);
    }

    pub fn mood(&self) -> PetMood {
        PetMood::from_happiness(self.happiness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetMood {
    Radiant,
    Content,
    Neutral,
    Sleepy,
}

impl PetMood {
    pub fn from_happiness(happiness: f64) -> Self {
        if happiness > 80.0 {
            PetMood::Radiant
        } else if happiness > 60.0 {
            PetMood::Content
        } else if happiness > 40.0 {
            PetMood::Neutral
        } else {
            PetMood::Sleepy
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PetMood::Radiant => "🐱✨",
            PetMood::Content => "🐱😊",
            PetMood::Neutral => "🐱😐",
            PetMood::Sleepy => "🐱😴",
        }
    }
}
