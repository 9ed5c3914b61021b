use serde::Serialize;
use tracing::debug;

use crate::entities::{ScoringConfig, SessionMetrics};
use crate::error::DomainError;
use crate::value_objects::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    pub score: u32,
    pub risk_level: RiskLevel,
}

/// Sums the band points of every metric, clamps to `max_score` and maps the
/// result onto a tier.
pub fn score_metrics(metrics: &SessionMetrics, config: &ScoringConfig) -> Result<RiskScore, DomainError> {
    config.validate()?;

    let raw = config
        .bet_frequency
        .points(metrics.bet_frequency)
        .saturating_add(config.balance_volatility.points(metrics.balance_volatility))
        .saturating_add(config.session_duration.points(metrics.session_duration_minutes))
        .saturating_add(config.loss_streak.points(f64::from(metrics.loss_streak)));
    let score = raw.min(config.max_score);
    let risk_level = config.tiers.classify(score);

    debug!(raw, score, risk_level = %risk_level, "session metrics scored");
    Ok(RiskScore { score, risk_level })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RiskTierThresholds, ScoreBand};

    fn metrics(bet_frequency: f64, balance_volatility: f64, duration: f64, loss_streak: u32) -> SessionMetrics {
        SessionMetrics {
            bet_frequency,
            balance_volatility,
            session_duration_minutes: duration,
            loss_streak,
        }
    }

    fn score(metrics: SessionMetrics) -> RiskScore {
        score_metrics(&metrics, &ScoringConfig::default()).expect("score")
    }

    #[test]
    fn high_risk_player_scores_one_hundred() {
        let result = score(metrics(55.0, 0.55, 130.0, 6));
        assert_eq!(result.score, 100);
        assert_eq!(result.risk_level, RiskLevel::HIGH);
    }

    #[test]
    fn moderate_player_lands_in_medium() {
        let result = score(metrics(35.0, 0.35, 70.0, 2));
        assert_eq!(result.score, 40);
        assert_eq!(result.risk_level, RiskLevel::MEDIUM);
    }

    #[test]
    fn calm_player_scores_zero() {
        let result = score(metrics(10.0, 0.1, 20.0, 0));
        assert_eq!(result.score, 0);
        assert_eq!(result.risk_level, RiskLevel::LOW);
    }

    #[test]
    fn band_lower_bounds_are_exclusive() {
        assert_eq!(score(metrics(30.0, 0.3, 60.0, 3)).score, 0);
        assert_eq!(score(metrics(50.0, 0.5, 120.0, 5)).score, 15 + 15 + 10 + 15);
    }

    fn assert_non_decreasing(scores: impl IntoIterator<Item = u32>) {
        let mut previous = 0;
        for current in scores {
            assert!(current >= previous, "score fell from {previous} to {current}");
            previous = current;
        }
    }

    #[test]
    fn score_is_monotone_in_each_metric() {
        assert_non_decreasing(
            [0.0, 30.5, 50.5, 80.0]
                .into_iter()
                .map(|frequency| score(metrics(frequency, 0.4, 70.0, 4)).score),
        );
        assert_non_decreasing(
            [0.0, 0.31, 0.51, 2.0]
                .into_iter()
                .map(|volatility| score(metrics(40.0, volatility, 70.0, 4)).score),
        );
        assert_non_decreasing(
            [0.0, 61.0, 121.0, 600.0]
                .into_iter()
                .map(|duration| score(metrics(40.0, 0.4, duration, 4)).score),
        );
        assert_non_decreasing((0..10).map(|streak| score(metrics(40.0, 0.4, 70.0, streak)).score));
    }

    #[test]
    fn each_metric_alone_climbs_through_its_bands() {
        let volatility: Vec<u32> = [0.0, 0.31, 0.51]
            .into_iter()
            .map(|value| score(metrics(0.0, value, 0.0, 0)).score)
            .collect();
        assert_eq!(volatility, vec![0, 15, 25]);

        let duration: Vec<u32> = [0.0, 61.0, 121.0]
            .into_iter()
            .map(|value| score(metrics(0.0, 0.0, value, 0)).score)
            .collect();
        assert_eq!(duration, vec![0, 10, 20]);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let tiers = RiskTierThresholds::default();
        assert_eq!(tiers.classify(69), RiskLevel::MEDIUM);
        assert_eq!(tiers.classify(70), RiskLevel::HIGH);
        assert_eq!(tiers.classify(39), RiskLevel::LOW);
        assert_eq!(tiers.classify(40), RiskLevel::MEDIUM);
    }

    #[test]
    fn score_is_clamped_to_max() {
        let config = ScoringConfig {
            bet_frequency: ScoreBand::new(50.0, 80, 30.0, 40),
            ..ScoringConfig::default()
        };
        let result = score_metrics(&metrics(60.0, 0.6, 150.0, 6), &config).expect("score");
        assert_eq!(result.score, 100);

        let config = ScoringConfig {
            max_score: 50,
            tiers: RiskTierThresholds { high: 45, medium: 20 },
            ..ScoringConfig::default()
        };
        let result = score_metrics(&metrics(60.0, 0.6, 150.0, 6), &config).expect("score");
        assert_eq!(result.score, 50);
        assert_eq!(result.risk_level, RiskLevel::HIGH);
    }

    #[test]
    fn max_score_past_the_scale_is_rejected() {
        let config = ScoringConfig {
            bet_frequency: ScoreBand::new(50.0, 400, 30.0, 15),
            max_score: 1000,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            score_metrics(&metrics(60.0, 0.6, 150.0, 6), &config),
            Err(DomainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn nan_metrics_earn_no_points() {
        let result = score(metrics(f64::NAN, f64::NAN, f64::NAN, 0));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn invalid_scoring_config_is_rejected() {
        let config = ScoringConfig {
            max_score: 0,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            score_metrics(&metrics(1.0, 0.0, 0.0, 0), &config),
            Err(DomainError::InvalidConfig(_))
        ));
    }
}
