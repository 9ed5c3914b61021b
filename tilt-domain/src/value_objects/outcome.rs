// Wager outcome value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[serde(alias = "WIN", alias = "Win")]
    Win,
    #[serde(alias = "LOSS", alias = "Loss")]
    Loss,
    #[serde(alias = "PUSH", alias = "Push")]
    Push,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Push => "push",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(Outcome::Win),
            "loss" => Ok(Outcome::Loss),
            "push" => Ok(Outcome::Push),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_outcomes() {
        assert_eq!("WIN".parse::<Outcome>(), Ok(Outcome::Win));
        assert_eq!(" loss".parse::<Outcome>(), Ok(Outcome::Loss));
        assert_eq!("push".parse::<Outcome>(), Ok(Outcome::Push));
        assert!("bust".parse::<Outcome>().is_err());
    }

    #[test]
    fn deserializes_lower_and_upper_case() {
        let lower: Outcome = serde_json::from_str("\"loss\"").expect("lower");
        let upper: Outcome = serde_json::from_str("\"WIN\"").expect("upper");
        assert_eq!(lower, Outcome::Loss);
        assert_eq!(upper, Outcome::Win);
    }
}
