//! Response coercion: turns raw backend text into validated records.
//!
//! Flow: extract_json_object → serde_json::Value → typed record with defaults.
//! Extraction, JSON syntax and schema failures stay distinct error kinds.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::religion::error::{ReligionError, ReligionResult};
use crate::religion::models::{Component, ComponentKind, Religion};

/// Returns the first balanced JSON object in `raw`, starting at the first `{`.
///
/// The scanner tracks string literals and backslash escapes, so braces inside
/// strings do not count. When the braces never balance, the slice up to the
/// last `}` is returned and the JSON parser reports what is wrong with it.
pub fn extract_json_object(raw: &str) -> ReligionResult<&str> {
    let start = raw
        .find('{')
        .ok_or_else(|| ReligionError::Extraction("response contains no '{'".to_string()))?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    match raw.rfind('}') {
        Some(end) if end > start => Ok(&raw[start..=end]),
        _ => Err(ReligionError::Extraction(
            "response contains no '}' after the first '{'".to_string(),
        )),
    }
}

fn parse_json(raw: &str) -> ReligionResult<Value> {
    let json = extract_json_object(raw)?;
    serde_json::from_str(json).map_err(|e| ReligionError::Parse(e.to_string()))
}

fn coerce<T: DeserializeOwned>(value: Value) -> ReligionResult<T> {
    serde_json::from_value(value).map_err(|e| ReligionError::Schema(e.to_string()))
}

/// Coerces backend text into a complete `Religion` or fails as a whole.
pub fn parse_religion_payload(raw: &str) -> ReligionResult<Religion> {
    coerce(parse_json(raw)?)
}

/// Extracts the component mapping without binding it to a record type.
pub fn parse_component_payload(raw: &str) -> ReligionResult<Map<String, Value>> {
    match parse_json(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(ReligionError::Schema(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Binds a component mapping to the record type for `kind`.
pub fn component_from_payload(
    kind: ComponentKind,
    payload: Map<String, Value>,
) -> ReligionResult<Component> {
    let value = Value::Object(payload);
    Ok(match kind {
        ComponentKind::Deity => Component::Deity(coerce(value)?),
        ComponentKind::Ritual => Component::Ritual(coerce(value)?),
        ComponentKind::Legend => Component::Legend(coerce(value)?),
    })
}

/// Backend replies shared by the coercion, pipeline and router tests.
#[cfg(test)]
pub mod fixtures {
    pub const FULL_RELIGION: &str = r#"{
        "name": "X",
        "description": "Worship of the turning seasons",
        "deity_type": "monotheistic",
        "language": "English",
        "deities": [
            {
                "name": "Veyra",
                "title": "The Green Mother",
                "domain": "Growth",
                "description": "Keeper of every seed",
                "attributes": ["patient", "fertile"],
                "symbols": ["acorn", "spiral"]
            }
        ],
        "sacred_texts": [
            {
                "title": "Book of Roots",
                "content": "Hymns to the soil",
                "chapters": ["Sowing", "Harvest"],
                "language": "Old Tongue",
                "origin_story": "Carved into the first oak"
            }
        ],
        "rituals": [
            {
                "name": "Spring Kindling",
                "purpose": "Wake the fields",
                "frequency": "Yearly",
                "participants": "All villagers",
                "steps": ["gather", "sing"],
                "materials_needed": ["ash", "seed"],
                "significance": "Renewal"
            }
        ],
        "moral_rules": [
            {
                "rule": "Waste nothing",
                "description": "Every harvest is a gift",
                "severity": "Heavy",
                "punishment": "Barren fields",
                "reward": "Plenty"
            }
        ],
        "legends": [
            {
                "title": "The Long Winter",
                "story": "Veyra slept for a hundred years",
                "characters": ["Veyra", "Frost"],
                "moral_lesson": "Rest precedes growth",
                "cultural_impact": "Winter fasting"
            }
        ],
        "reward_punishment": {
            "rewards": ["rebirth as a tree"],
            "punishments": ["wandering as dust"],
            "afterlife_concept": "The Great Grove",
            "judgment_criteria": ["care for the land"]
        },
        "symbols": [
            {
                "name": "Acorn",
                "meaning": "Potential",
                "visual_description": "A golden acorn",
                "usage_context": "Worn at births"
            }
        ],
        "core_beliefs": ["all life returns to soil", "balance"],
        "practices": ["planting vows"],
        "holy_places": ["The First Oak"],
        "religious_leaders": "Grove wardens chosen by lot",
        "creation_myth": "The world sprouted from a single seed"
    }"#;

    pub const DEITY: &str = r#"Sure! Here is your deity:
        {"name": "Orun", "title": "Tide Father", "domain": "Sea", "description": "Moves the waters",
         "attributes": ["vast"], "symbols": ["shell"]}
        Hope this helps."#;

    pub const RITUAL: &str = r#"{"name": "Salt Walk", "purpose": "Cleansing", "steps": ["walk"]}"#;

    pub const LEGEND: &str = r#"{"title": "The Drowned Bell", "story": "A bell rings under the waves"}"#;

    /// Minimal religion reply with the given name.
    pub fn named_religion(name: &str) -> String {
        format!(r#"{{"name": "{name}", "deity_type": "animistic"}}"#)
    }
}
