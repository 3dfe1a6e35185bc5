//! Religion data model.
//!
//! Each record type deserializes with explicit defaults: an absent text field
//! becomes `""`, an absent list becomes `[]`. A key that is present with the
//! wrong JSON type is rejected, so a record is either complete or not built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::religion::error::ReligionError;

pub const DEFAULT_LANGUAGE: &str = "Turkish";
pub const DEFAULT_COMPLEXITY: &str = "medium";
pub const UNNAMED_RELIGION: &str = "Unnamed Religion";

// ────────────────────────────────────────────────────────────────────────────
// Generation input
// ────────────────────────────────────────────────────────────────────────────

/// Caller-supplied knobs for one religion generation.
///
/// Only `language` selects behavior (the directive table); the rest is echoed
/// into the prompt as free text. `deity_type` is not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default = "default_complexity")]
    pub complexity: String,
    #[serde(default)]
    pub deity_type: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            theme: None,
            culture: None,
            complexity: default_complexity(),
            deity_type: None,
            language: default_language(),
        }
    }
}

fn default_complexity() -> String {
    DEFAULT_COMPLEXITY.to_string()
}

pub(crate) fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Deity archetype
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DeityType {
    /// Single deity
    Monotheistic,
    /// Multiple deities
    #[default]
    Polytheistic,
    /// God equals the universe
    Pantheistic,
    /// Everything has a spirit
    Animistic,
}

impl DeityType {
    pub const ALL: [DeityType; 4] = [
        DeityType::Monotheistic,
        DeityType::Polytheistic,
        DeityType::Pantheistic,
        DeityType::Animistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeityType::Monotheistic => "monotheistic",
            DeityType::Polytheistic => "polytheistic",
            DeityType::Pantheistic => "pantheistic",
            DeityType::Animistic => "animistic",
        }
    }
}

impl fmt::Display for DeityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeityType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DeityType::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| format!("invalid deity type '{value}'"))
    }
}

impl TryFrom<String> for DeityType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deity {
    pub name: String,
    pub title: String,
    /// Power domain (war, wisdom, nature, ...)
    pub domain: String,
    pub description: String,
    pub attributes: Vec<String>,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SacredText {
    pub title: String,
    pub content: String,
    pub chapters: Vec<String>,
    pub language: String,
    pub origin_story: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ritual {
    pub name: String,
    pub purpose: String,
    pub frequency: String,
    pub participants: String,
    pub steps: Vec<String>,
    pub materials_needed: Vec<String>,
    pub significance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoralRule {
    pub rule: String,
    pub description: String,
    /// Free text, e.g. Light / Medium / Heavy
    pub severity: String,
    pub punishment: String,
    pub reward: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legend {
    pub title: String,
    pub story: String,
    pub characters: Vec<String>,
    pub moral_lesson: String,
    pub cultural_impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPunishment {
    pub rewards: Vec<String>,
    pub punishments: Vec<String>,
    pub afterlife_concept: String,
    pub judgment_criteria: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbol {
    pub name: String,
    pub meaning: String,
    pub visual_description: String,
    pub usage_context: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Religion {
    pub name: String,
    pub description: String,
    pub deity_type: DeityType,
    /// Language the religion was generated in.
    pub language: String,
    pub deities: Vec<Deity>,
    pub sacred_texts: Vec<SacredText>,
    pub rituals: Vec<Ritual>,
    pub moral_rules: Vec<MoralRule>,
    pub legends: Vec<Legend>,
    pub reward_punishment: RewardPunishment,
    pub symbols: Vec<Symbol>,
    pub core_beliefs: Vec<String>,
    pub practices: Vec<String>,
    pub holy_places: Vec<String>,
    pub religious_leaders: String,
    pub creation_myth: String,
}

impl Default for Religion {
    fn default() -> Self {
        Self {
            name: UNNAMED_RELIGION.to_string(),
            description: String::new(),
            deity_type: DeityType::default(),
            language: default_language(),
            deities: Vec::new(),
            sacred_texts: Vec::new(),
            rituals: Vec::new(),
            moral_rules: Vec::new(),
            legends: Vec::new(),
            reward_punishment: RewardPunishment::default(),
            symbols: Vec::new(),
            core_beliefs: Vec::new(),
            practices: Vec::new(),
            holy_places: Vec::new(),
            religious_leaders: String::new(),
            creation_myth: String::new(),
        }
    }
}

impl Religion {
    /// Appends one generated component to the matching list.
    pub fn append_component(&mut self, component: Component) {
        match component {
            Component::Deity(deity) => self.deities.push(deity),
            Component::Ritual(ritual) => self.rituals.push(ritual),
            Component::Legend(legend) => self.legends.push(legend),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

/// Sub-entity categories that can be generated on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Deity,
    Ritual,
    Legend,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Deity => "deity",
            ComponentKind::Ritual => "ritual",
            ComponentKind::Legend => "legend",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = ReligionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "deity" => Ok(ComponentKind::Deity),
            "ritual" => Ok(ComponentKind::Ritual),
            "legend" => Ok(ComponentKind::Legend),
            other => Err(ReligionError::UnsupportedKind(other.to_string())),
        }
    }
}

/// A single typed component ready to be appended to a religion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Deity(Deity),
    Ritual(Ritual),
    Legend(Legend),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Deity(_) => ComponentKind::Deity,
            Component::Ritual(_) => ComponentKind::Ritual,
            Component::Legend(_) => ComponentKind::Legend,
        }
    }
}
