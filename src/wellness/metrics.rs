use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WellnessError};

/// One of the six self-reported wellness scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Mood,
    Energy,
    Stress,
    Sleep,
    Water,
    Anxiety,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Mood,
        Metric::Energy,
        Metric::Stress,
        Metric::Sleep,
        Metric::Water,
        Metric::Anxiety,
    ];

    /// Inclusive range accepted for this metric. Water is counted in glasses.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Metric::Water => (1.0, 8.0),
            _ => (1.0, 10.0),
        }
    }

    pub fn max(&self) -> f64 {
        self.range().1
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Mood => "Estado de ánimo",
            Metric::Energy => "Energía",
            Metric::Stress => "Estrés",
            Metric::Sleep => "Calidad del sueño",
            Metric::Water => "Hidratación",
            Metric::Anxiety => "Ansiedad",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Metric::Sleep => Some("hrs"),
            Metric::Water => Some("vasos"),
            _ => None,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Mood => write!(f, "mood"),
            Metric::Energy => write!(f, "energy"),
            Metric::Stress => write!(f, "stress"),
            Metric::Sleep => write!(f, "sleep"),
            Metric::Water => write!(f, "water"),
            Metric::Anxiety => write!(f, "anxiety"),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = WellnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mood" | "animo" | "ánimo" => Ok(Metric::Mood),
            "energy" | "energia" | "energía" => Ok(Metric::Energy),
            "stress" | "estres" | "estrés" => Ok(Metric::Stress),
            "sleep" | "sueño" | "sueno" => Ok(Metric::Sleep),
            "water" | "agua" => Ok(Metric::Water),
            "anxiety" | "ansiedad" => Ok(Metric::Anxiety),
            _ => Err(WellnessError::UnknownMetric(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellnessMetrics {
    pub mood: f64,
    pub energy: f64,
    pub stress: f64,
    pub sleep: f64,
    pub water: f64,
    pub anxiety: f64,
    pub last_updated: DateTime<Utc>,
}

impl WellnessMetrics {
    pub fn seed(now: DateTime<Utc>) -> Self {
        WellnessMetrics {
            mood: 7.0,
            energy: 6.0,
            stress: 4.0,
            sleep: 7.0,
            water: 3.0,
            anxiety: 3.0,
            last_updated: now,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Mood => self.mood,
            Metric::Energy => self.energy,
            Metric::Stress => self.stress,
            Metric::Sleep => self.sleep,
            Metric::Water => self.water,
            Metric::Anxiety => self.anxiety,
        }
    }

    fn slot(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Mood => &mut self.mood,
            Metric::Energy => &mut self.energy,
            Metric::Stress => &mut self.stress,
            Metric::Sleep => &mut self.sleep,
            Metric::Water => &mut self.water,
            Metric::Anxiety => &mut self.anxiety,
        }
    }

    /// Merge `update` into these metrics, clamping every provided value.
    ///
    /// The whole update is validated before anything is written, so a
    /// non-finite value leaves the metrics untouched.
    pub fn apply(&mut self, update: &MetricsUpdate, now: DateTime<Utc>) -> Result<()> {
        let fields = update.fields();
        for (metric, value) in &fields {
            if !value.is_finite() {
                return Err(WellnessError::InvalidMetric {
                    metric: metric.to_string(),
                    value: *value,
                });
            }
        }

        for (metric, value) in fields {
            *self.slot(metric) = metric.clamp(value);
        }
        self.last_updated = now;
        Ok(())
    }

    /// Composite 0-10 score: mean of mood, energy and sleep against the
    /// inverted mean of stress and anxiety, rounded to one decimal.
    pub fn overall_score(&self) -> f64 {
        let positive = (self.mood + self.energy + self.sleep) / 3.0;
        let negative = (self.stress + self.anxiety) / 2.0;
        let overall = (positive + (10.0 - negative)) / 2.0;
        (overall * 10.0).round() / 10.0
    }
}

/// Partial metrics record; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsUpdate {
    pub mood: Option<f64>,
    pub energy: Option<f64>,
    pub stress: Option<f64>,
    pub sleep: Option<f64>,
    pub water: Option<f64>,
    pub anxiety: Option<f64>,
}

impl MetricsUpdate {
    pub fn single(metric: Metric, value: f64) -> Self {
        let mut update = MetricsUpdate::default();
        update.set(metric, value);
        update
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Mood => &mut self.mood,
            Metric::Energy => &mut self.energy,
            Metric::Stress => &mut self.stress,
            Metric::Sleep => &mut self.sleep,
            Metric::Water => &mut self.water,
            Metric::Anxiety => &mut self.anxiety,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    fn fields(&self) -> Vec<(Metric, f64)> {
        [
            (Metric::Mood, self.mood),
            (Metric::Energy, self.energy),
            (Metric::Stress, self.stress),
            (Metric::Sleep, self.sleep),
            (Metric::Water, self.water),
            (Metric::Anxiety, self.anxiety),
        ]
        .into_iter()
        .filter_map(|(metric, value)| value.map(|v| (metric, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricLevel {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl MetricLevel {
    pub fn for_value(value: f64, max: f64) -> Self {
        let percentage = value / max * 100.0;
        if percentage >= 80.0 {
            MetricLevel::Excellent
        } else if percentage >= 60.0 {
            MetricLevel::Good
        } else if percentage >= 40.0 {
            MetricLevel::Fair
        } else {
            MetricLevel::NeedsAttention
        }
    }
}

impl std::fmt::Display for MetricLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricLevel::Excellent => write!(f, "Excelente"),
            MetricLevel::Good => write!(f, "Bueno"),
            MetricLevel::Fair => write!(f, "Regular"),
            MetricLevel::NeedsAttention => write!(f, "Necesita atención"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_score() {
        let metrics = WellnessMetrics::seed(Utc::now());
        assert_eq!(metrics.overall_score(), 6.6);
    }

    #[test]
    fn test_score_bounds() {
        let now = Utc::now();
        let mut metrics = WellnessMetrics::seed(now);
        for low in [1.0, 10.0] {
            for high in [1.0, 10.0] {
                metrics.mood = low;
                metrics.energy = low;
                metrics.sleep = low;
                metrics.stress = high;
                metrics.anxiety = high;
                let score = metrics.overall_score();
                assert!((0.0..=10.0).contains(&score), "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_apply_clamps() {
        let now = Utc::now();
        let mut metrics = WellnessMetrics::seed(now);
        let update = MetricsUpdate {
            mood: Some(14.0),
            water: Some(12.0),
            stress: Some(-3.0),
            ..Default::default()
        };
        metrics.apply(&update, now).unwrap();
        assert_eq!(metrics.mood, 10.0);
        assert_eq!(metrics.water, 8.0);
        assert_eq!(metrics.stress, 1.0);
        assert_eq!(metrics.energy, 6.0);
    }

    #[test]
    fn test_apply_rejects_nan_without_writing() {
        let now = Utc::now();
        let mut metrics = WellnessMetrics::seed(now);
        let update = MetricsUpdate {
            mood: Some(2.0),
            sleep: Some(f64::NAN),
            ..Default::default()
        };
        let err = metrics.apply(&update, now + chrono::Duration::minutes(1));
        assert!(matches!(err, Err(WellnessError::InvalidMetric { .. })));
        assert_eq!(metrics.mood, 7.0);
        assert_eq!(metrics.last_updated, now);
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("Agua".parse::<Metric>().unwrap(), Metric::Water);
        assert_eq!("stress".parse::<Metric>().unwrap(), Metric::Stress);
        assert!("focus".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_level() {
        assert_eq!(MetricLevel::for_value(8.0, 10.0), MetricLevel::Excellent);
        assert_eq!(MetricLevel::for_value(6.0, 10.0), MetricLevel::Good);
        assert_eq!(MetricLevel::for_value(4.0, 10.0), MetricLevel::Fair);
        assert_eq!(MetricLevel::for_value(3.0, 8.0), MetricLevel::NeedsAttention);
    }
}
