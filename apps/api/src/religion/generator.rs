//! Religion generation pipeline.
//!
//! Flow: build prompt → one backend call → coerce response.
//! Variations and expansion re-run the same two steps with different inputs.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::llm_client::TextGenerator;
use crate::religion::coercion::{
    component_from_payload, parse_component_payload, parse_religion_payload,
};
use crate::religion::error::{ReligionError, ReligionResult};
use crate::religion::models::{Component, ComponentKind, GenerationParameters, Religion};
use crate::religion::prompts::{build_component_prompt, build_religion_prompt};

/// Culture rotation for variations, indexed by `i % len`.
pub const VARIATION_CULTURES: [&str; 5] = ["ancient", "modern", "fantasy", "futuristic", "tribal"];
/// Complexity rotation for variations, indexed by `i % len`.
pub const VARIATION_COMPLEXITIES: [&str; 3] = ["simple", "medium", "complex"];

#[derive(Clone)]
pub struct ReligionGenerator {
    backend: Arc<dyn TextGenerator>,
}

impl ReligionGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend }
    }

    /// Runs the full pipeline once and returns a schema-valid religion.
    pub async fn generate_religion(&self, params: &GenerationParameters) -> ReligionResult<Religion> {
        info!(
            "Generating religion: theme={:?}, culture={:?}, complexity={}, language={}",
            params.theme, params.culture, params.complexity, params.language
        );

        let prompt = build_religion_prompt(params);
        let raw = self
            .backend
            .generate(&prompt)
            .await
            .map_err(|e| ReligionError::Generation(format!("religion generation failed: {e}")))?;

        match parse_religion_payload(&raw) {
            Ok(religion) => {
                info!("Generated religion '{}'", religion.name);
                Ok(religion)
            }
            Err(e) => {
                error!("Religion coercion failed: {e}");
                Err(e)
            }
        }
    }

    /// Generates one free-standing component. When `existing` is given, its
    /// name and core beliefs are appended to the context for consistency.
    pub async fn generate_component(
        &self,
        kind: ComponentKind,
        context: &str,
        existing: Option<&Religion>,
    ) -> ReligionResult<Map<String, Value>> {
        let context = with_religion_context(context, existing);
        let prompt = build_component_prompt(kind, &context);

        let raw = self
            .backend
            .generate(&prompt)
            .await
            .map_err(|e| ReligionError::Generation(format!("component generation failed: {e}")))?;

        parse_component_payload(&raw)
    }

    /// Generates `count` religions on one theme, rotating culture and complexity.
    ///
    /// A failed variation is logged and skipped; survivors keep their order.
    pub async fn generate_variations(
        &self,
        base_theme: &str,
        count: usize,
        language: &str,
    ) -> Vec<Religion> {
        let mut variations = Vec::with_capacity(count);

        for index in 0..count {
            let params = variation_parameters(base_theme, index, language);
            match self.generate_religion(&params).await {
                Ok(religion) => variations.push(religion),
                Err(e) => warn!("Variation {} could not be generated: {e}", index + 1),
            }
        }

        info!(
            "Generated {}/{} variations for theme '{}'",
            variations.len(),
            count,
            base_theme
        );
        variations
    }

    /// Generates one component that fits `religion`.
    ///
    /// The kind is resolved before any backend call, so an unsupported kind
    /// fails with `UnsupportedKind` and nothing is generated. The caller
    /// appends the result with `Religion::append_component`.
    pub async fn expand_religion(
        &self,
        religion: &Religion,
        component_type: &str,
    ) -> ReligionResult<Component> {
        let kind: ComponentKind = component_type.parse()?;
        let context = format!("Generate a suitable {kind} for this religion.");

        let payload = self.generate_component(kind, &context, Some(religion)).await?;
        let component = component_from_payload(kind, payload)?;

        info!("Generated new {kind} for religion '{}'", religion.name);
        Ok(component)
    }
}

/// Parameters for the `index`-th variation of `base_theme`.
pub fn variation_parameters(base_theme: &str, index: usize, language: &str) -> GenerationParameters {
    GenerationParameters {
        theme: Some(base_theme.to_string()),
        culture: Some(VARIATION_CULTURES[index % VARIATION_CULTURES.len()].to_string()),
        complexity: VARIATION_COMPLEXITIES[index % VARIATION_COMPLEXITIES.len()].to_string(),
        deity_type: None,
        language: language.to_string(),
    }
}

fn with_religion_context(context: &str, existing: Option<&Religion>) -> String {
    match existing {
        Some(religion) => format!(
            "{context} Existing religion: {}. Core beliefs: {}",
            religion.name,
            religion.core_beliefs.join(", ")
        ),
        None => context.to_string(),
    }
}
