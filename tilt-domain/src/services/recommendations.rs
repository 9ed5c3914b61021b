use crate::entities::{RecommendationConfig, SessionMetrics};
use crate::services::scorer::RiskScore;
use crate::value_objects::{Recommendation, RiskLevel};

/// Tier base advice followed by metric-specific supplements. Never empty.
pub fn recommend(
    score: &RiskScore,
    metrics: &SessionMetrics,
    config: &RecommendationConfig,
) -> Vec<Recommendation> {
    let mut recommendations = match score.risk_level {
        RiskLevel::HIGH => vec![
            Recommendation::MandatoryBreak,
            Recommendation::VaultBalance,
            Recommendation::CalmingActivity,
        ],
        RiskLevel::MEDIUM => vec![
            Recommendation::SuggestedBreak,
            Recommendation::ReviewStats,
            Recommendation::ReduceStakes,
        ],
        RiskLevel::LOW => vec![Recommendation::Affirmation, Recommendation::KeepTracking],
    };

    if metrics.loss_streak > config.loss_streak_above {
        recommendations.push(Recommendation::VaryStrategy);
    }
    if metrics.session_duration_minutes > config.long_session_minutes_above {
        recommendations.push(Recommendation::FatigueWarning);
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(risk_level: RiskLevel) -> RiskScore {
        RiskScore { score: 0, risk_level }
    }

    fn metrics(duration: f64, loss_streak: u32) -> SessionMetrics {
        SessionMetrics {
            session_duration_minutes: duration,
            loss_streak,
            ..SessionMetrics::default()
        }
    }

    #[test]
    fn high_tier_with_long_losing_session_gets_all_advice() {
        let result = recommend(&risk(RiskLevel::HIGH), &metrics(150.0, 6), &RecommendationConfig::default());
        assert_eq!(
            result,
            vec![
                Recommendation::MandatoryBreak,
                Recommendation::VaultBalance,
                Recommendation::CalmingActivity,
                Recommendation::VaryStrategy,
                Recommendation::FatigueWarning,
            ]
        );
    }

    #[test]
    fn medium_tier_base_advice() {
        let result = recommend(&risk(RiskLevel::MEDIUM), &metrics(70.0, 2), &RecommendationConfig::default());
        assert_eq!(
            result,
            vec![
                Recommendation::SuggestedBreak,
                Recommendation::ReviewStats,
                Recommendation::ReduceStakes,
            ]
        );
    }

    #[test]
    fn low_tier_is_never_empty() {
        let result = recommend(&risk(RiskLevel::LOW), &metrics(0.0, 0), &RecommendationConfig::default());
        assert_eq!(result, vec![Recommendation::Affirmation, Recommendation::KeepTracking]);
    }

    #[test]
    fn supplement_thresholds_are_exclusive() {
        let config = RecommendationConfig::default();
        let at = recommend(&risk(RiskLevel::LOW), &metrics(90.0, 3), &config);
        assert_eq!(at.len(), 2);
        let above = recommend(&risk(RiskLevel::LOW), &metrics(90.5, 4), &config);
        assert_eq!(&above[2..], &[Recommendation::VaryStrategy, Recommendation::FatigueWarning]);
    }
}
