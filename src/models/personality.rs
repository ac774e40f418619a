use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Feedback style profile requested for the LLM coach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Encouraging and nurturing
    #[default]
    Supportive,
    /// Straightforward and concise
    Direct,
    /// Detailed and analytical
    Critical,
    /// Light-hearted and fun
    Humorous,
    /// Wise and reflective
    Mentor,
    /// Formal and structured
    Professional,
}

impl Personality {
    pub const ALL: [Personality; 6] = [
        Personality::Supportive,
        Personality::Direct,
        Personality::Critical,
        Personality::Humorous,
        Personality::Mentor,
        Personality::Professional,
    ];

    /// Resolve a personality key, falling back to `Supportive` for anything unknown.
    ///
    /// Matching ignores case and surrounding whitespace. The fallback is silent:
    /// personality only styles the feedback, it never affects correctness.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .unwrap_or_default()
    }

    /// Lower-case key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            Personality::Supportive => "supportive",
            Personality::Direct => "direct",
            Personality::Critical => "critical",
            Personality::Humorous => "humorous",
            Personality::Mentor => "mentor",
            Personality::Professional => "professional",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// Stored sessions may carry keys from older clients; never fail on them.
impl<'de> Deserialize<'de> for Personality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Personality::from_key(&key))
    }
}
