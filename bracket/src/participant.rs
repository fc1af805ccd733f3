use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Skill of an AI participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl AiDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            AiDifficulty::Easy => "easy",
            AiDifficulty::Medium => "medium",
            AiDifficulty::Hard => "hard",
        }
    }
}

impl FromStr for AiDifficulty {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to `Medium`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "easy" => AiDifficulty::Easy,
            "hard" => AiDifficulty::Hard,
            _ => AiDifficulty::Medium,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParticipantKind {
    /// A person; `user_ref` is an opaque id from account management
    Human { user_ref: Option<String> },
    Ai { difficulty: AiDifficulty },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub alias: String,
    pub kind: ParticipantKind,
    pub wins: u32,
    pub losses: u32,
}

impl Participant {
    pub fn human(id: ParticipantId, alias: impl Into<String>, user_ref: Option<String>) -> Self {
        Self::with_kind(id, alias, ParticipantKind::Human { user_ref })
    }

    pub fn ai(id: ParticipantId, alias: impl Into<String>, difficulty: AiDifficulty) -> Self {
        Self::with_kind(id, alias, ParticipantKind::Ai { difficulty })
    }

    fn with_kind(id: ParticipantId, alias: impl Into<String>, kind: ParticipantKind) -> Self {
        Self {
            id,
            alias: alias.into(),
            kind,
            wins: 0,
            losses: 0,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.kind, ParticipantKind::Ai { .. })
    }

    pub fn difficulty(&self) -> Option<AiDifficulty> {
        match self.kind {
            ParticipantKind::Ai { difficulty } => Some(difficulty),
            ParticipantKind::Human { .. } => None,
        }
    }
}
