//! Intent taxonomy for question classification

use serde::{Deserialize, Serialize};

/// Closed taxonomy of question intents.
///
/// The router treats this set as exhaustive: anything that cannot be
/// classified lands on [`Intent::Unknown`], which downstream routing maps to
/// a block. New intents must be added here and to the routing table together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asks whether a statement is true ("is it true that ...")
    FactCheck,

    /// Asks for a quantity, price, or count
    Numerical,

    /// Asks to compare two or more things
    Comparison,

    /// Asks what something is or means
    Definition,

    /// Asks how to do something
    Procedure,

    /// Asks when something happened
    Temporal,

    /// Asks where something is
    Spatial,

    /// Asks for opinion or open-ended interpretation
    Interpretation,

    /// Personal statement or question about the speaker
    Personal,

    /// Small talk, greetings
    Conversational,

    /// Asks to produce new content (write, compose, invent)
    Generative,

    /// Explicitly disallowed input (prompt injection, policy violations)
    Blocked,

    /// Could not be classified; treated as low confidence
    Unknown,
}

impl Intent {
    /// Get the intent name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::FactCheck => "fact_check",
            Intent::Numerical => "numerical",
            Intent::Comparison => "comparison",
            Intent::Definition => "definition",
            Intent::Procedure => "procedure",
            Intent::Temporal => "temporal",
            Intent::Spatial => "spatial",
            Intent::Interpretation => "interpretation",
            Intent::Personal => "personal",
            Intent::Conversational => "conversational",
            Intent::Generative => "generative",
            Intent::Blocked => "blocked",
            Intent::Unknown => "unknown",
        }
    }

    /// Parse an intent from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fact_check" => Some(Intent::FactCheck),
            "numerical" => Some(Intent::Numerical),
            "comparison" => Some(Intent::Comparison),
            "definition" => Some(Intent::Definition),
            "procedure" => Some(Intent::Procedure),
            "temporal" => Some(Intent::Temporal),
            "spatial" => Some(Intent::Spatial),
            "interpretation" => Some(Intent::Interpretation),
            "personal" => Some(Intent::Personal),
            "conversational" => Some(Intent::Conversational),
            "generative" => Some(Intent::Generative),
            "blocked" => Some(Intent::Blocked),
            "unknown" => Some(Intent::Unknown),
            _ => None,
        }
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid intent: {}", s))
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
