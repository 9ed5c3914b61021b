// Recommendation value object
// Serialized as its display text

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    MandatoryBreak,
    VaultBalance,
    CalmingActivity,
    SuggestedBreak,
    ReviewStats,
    ReduceStakes,
    Affirmation,
    KeepTracking,
    VaryStrategy,
    FatigueWarning,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::MandatoryBreak => "STOP: Take a mandatory break for at least 30 minutes",
            Recommendation::VaultBalance => "Vault your remaining balance to prevent further losses",
            Recommendation::CalmingActivity => "Practice deep breathing or meditation",
            Recommendation::SuggestedBreak => "WARNING: Consider taking a 10-minute break",
            Recommendation::ReviewStats => "Review your session stats before continuing",
            Recommendation::ReduceStakes => "Switch to lower stakes or different game",
            Recommendation::Affirmation => "You're playing well - stay focused",
            Recommendation::KeepTracking => "Keep tracking your sessions for insights",
            Recommendation::VaryStrategy => "Loss streak detected - vary your strategy",
            Recommendation::FatigueWarning => "Long session - fatigue may affect judgment",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}
