// Detection configuration
// Every window, threshold, band and tier boundary the core uses

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::RiskLevel;

/// Upper bound for rule windows: one year.
pub const MAX_WINDOW_MINUTES: u64 = 525_600;

/// Ceiling of the composite score scale.
pub const SCORE_CEILING: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RapidActivityConfig {
    pub window_minutes: u64,
    /// Alert when the window holds strictly more events than this.
    pub max_events: usize,
}

impl Default for RapidActivityConfig {
    fn default() -> Self {
        Self {
            window_minutes: 5,
            max_events: 50,
        }
    }
}

impl RapidActivityConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_window("rapid_activity", self.window_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceDropConfig {
    pub window_minutes: u64,
    /// Alert when the balance fell by at least this fraction.
    pub drop_fraction: f64,
}

impl Default for BalanceDropConfig {
    fn default() -> Self {
        Self {
            window_minutes: 10,
            drop_fraction: 0.30,
        }
    }
}

impl BalanceDropConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_window("balance_drop", self.window_minutes)?;
        if !self.drop_fraction.is_finite() || self.drop_fraction <= 0.0 || self.drop_fraction > 1.0 {
            return Err(DomainError::invalid_config(format!(
                "balance_drop.drop_fraction must be within (0, 1], got {}",
                self.drop_fraction
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSetConfig {
    pub rapid_activity: RapidActivityConfig,
    pub balance_drop: BalanceDropConfig,
}

impl RuleSetConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.rapid_activity.validate()?;
        self.balance_drop.validate()
    }
}

/// Two mutually exclusive bands for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub high_above: f64,
    pub high_points: u32,
    pub elevated_above: f64,
    pub elevated_points: u32,
}

impl ScoreBand {
    pub const fn new(high_above: f64, high_points: u32, elevated_above: f64, elevated_points: u32) -> Self {
        Self {
            high_above,
            high_points,
            elevated_above,
            elevated_points,
        }
    }

    pub fn points(&self, value: f64) -> u32 {
        if value > self.high_above {
            self.high_points
        } else if value > self.elevated_above {
            self.elevated_points
        } else {
            0
        }
    }

    fn validate(&self, name: &str) -> Result<(), DomainError> {
        if !self.high_above.is_finite() || !self.elevated_above.is_finite() {
            return Err(DomainError::invalid_config(format!(
                "scoring.{name} thresholds must be finite"
            )));
        }
        if self.high_above < self.elevated_above {
            return Err(DomainError::invalid_config(format!(
                "scoring.{name}.high_above must be >= elevated_above"
            )));
        }
        if self.high_points < self.elevated_points {
            return Err(DomainError::invalid_config(format!(
                "scoring.{name}.high_points must be >= elevated_points"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskTierThresholds {
    pub high: u32,
    pub medium: u32,
}

impl Default for RiskTierThresholds {
    fn default() -> Self {
        Self { high: 70, medium: 40 }
    }
}

impl RiskTierThresholds {
    pub fn classify(&self, score: u32) -> RiskLevel {
        if score >= self.high {
            RiskLevel::HIGH
        } else if score >= self.medium {
            RiskLevel::MEDIUM
        } else {
            RiskLevel::LOW
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.medium > self.high {
            return Err(DomainError::invalid_config(format!(
                "scoring.tiers.medium ({}) must not exceed scoring.tiers.high ({})",
                self.medium, self.high
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub bet_frequency: ScoreBand,
    pub balance_volatility: ScoreBand,
    pub session_duration: ScoreBand,
    pub loss_streak: ScoreBand,
    pub max_score: u32,
    pub tiers: RiskTierThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bet_frequency: ScoreBand::new(50.0, 30, 30.0, 15),
            balance_volatility: ScoreBand::new(0.5, 25, 0.3, 15),
            session_duration: ScoreBand::new(120.0, 20, 60.0, 10),
            loss_streak: ScoreBand::new(5.0, 25, 3.0, 15),
            max_score: SCORE_CEILING,
            tiers: RiskTierThresholds::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.bet_frequency.validate("bet_frequency")?;
        self.balance_volatility.validate("balance_volatility")?;
        self.session_duration.validate("session_duration")?;
        self.loss_streak.validate("loss_streak")?;
        if self.max_score == 0 || self.max_score > SCORE_CEILING {
            return Err(DomainError::invalid_config(format!(
                "scoring.max_score must be within 1..={SCORE_CEILING}, got {}",
                self.max_score
            )));
        }
        self.tiers.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub loss_streak_above: u32,
    pub long_session_minutes_above: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            loss_streak_above: 3,
            long_session_minutes_above: 90.0,
        }
    }
}

impl RecommendationConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.long_session_minutes_above.is_finite() || self.long_session_minutes_above < 0.0 {
            return Err(DomainError::invalid_config(
                "recommendations.long_session_minutes_above must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub rules: RuleSetConfig,
    pub scoring: ScoringConfig,
    pub recommendations: RecommendationConfig,
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.rules.validate()?;
        self.scoring.validate()?;
        self.recommendations.validate()
    }
}

fn validate_window(rule: &str, window_minutes: u64) -> Result<(), DomainError> {
    if window_minutes == 0 {
        return Err(DomainError::invalid_config(format!(
            "{rule}.window_minutes must be greater than 0"
        )));
    }
    if window_minutes > MAX_WINDOW_MINUTES {
        return Err(DomainError::invalid_config(format!(
            "{rule}.window_minutes must not exceed {MAX_WINDOW_MINUTES}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        DetectionConfig::default().validate().expect("defaults");
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = RapidActivityConfig {
            window_minutes: 0,
            max_events: 50,
        };
        assert!(matches!(config.validate(), Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn drop_fraction_must_be_in_unit_interval() {
        for drop_fraction in [-0.1, 0.0, 1.5, f64::NAN] {
            let config = BalanceDropConfig {
                window_minutes: 10,
                drop_fraction,
            };
            assert!(config.validate().is_err(), "{drop_fraction} accepted");
        }
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut config = ScoringConfig::default();
        config.loss_streak = ScoreBand::new(3.0, 25, 5.0, 15);
        assert!(config.validate().is_err());

        let mut config = ScoringConfig::default();
        config.bet_frequency = ScoreBand::new(50.0, 10, 30.0, 15);
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_tiers_are_rejected() {
        let mut config = ScoringConfig::default();
        config.tiers = RiskTierThresholds { high: 40, medium: 70 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn max_score_above_ceiling_is_rejected() {
        let config = ScoringConfig {
            max_score: 1000,
            ..ScoringConfig::default()
        };
        assert!(matches!(config.validate(), Err(DomainError::InvalidConfig(_))));

        let config = ScoringConfig {
            max_score: SCORE_CEILING,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_table_keeps_remaining_defaults() {
        let config: DetectionConfig = from_json(r#"{"rules":{"balance_drop":{"drop_fraction":0.5}}}"#);
        assert_eq!(config.rules.balance_drop.drop_fraction, 0.5);
        assert_eq!(config.rules.balance_drop.window_minutes, 10);
        assert_eq!(config.rules.rapid_activity, RapidActivityConfig::default());
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    fn from_json(raw: &str) -> DetectionConfig {
        serde_json::from_str(raw).expect("config")
    }
}
