// Prompt templates for religion and component generation.
// Templates are filled by placeholder substitution; no call here has side effects.

use crate::religion::models::{ComponentKind, DeityType, GenerationParameters};

pub const FALLBACK_THEME: &str = "general";
pub const FALLBACK_CULTURE: &str = "universal";

/// One imperative sentence per supported language, written in that language.
/// The first entry doubles as the fallback for unknown languages.
pub const LANGUAGE_DIRECTIVES: &[(&str, &str)] = &[
    ("Turkish", "TÜM İÇERİĞİ TÜRKÇE OLARAK ÜRET. Din adı, açıklamalar, tanrı isimleri, ritüeller, efsaneler - her şey Türkçe olsun."),
    ("English", "GENERATE ALL CONTENT IN ENGLISH. Religion name, descriptions, deity names, rituals, legends - everything should be in English."),
    ("Spanish", "GENERA TODO EL CONTENIDO EN ESPAÑOL. Nombre de la religión, descripciones, nombres de deidades, rituales, leyendas - todo debe estar en español."),
    ("French", "GÉNÉREZ TOUT LE CONTENU EN FRANÇAIS. Nom de la religion, descriptions, noms des divinités, rituels, légendes - tout doit être en français."),
    ("German", "GENERIEREN SIE ALLE INHALTE AUF DEUTSCH. Religionsname, Beschreibungen, Gottheitsnamen, Rituale, Legenden - alles sollte auf Deutsch sein."),
    ("Italian", "GENERA TUTTO IL CONTENUTO IN ITALIANO. Nome della religione, descrizioni, nomi delle divinità, rituali, leggende - tutto dovrebbe essere in italiano."),
    ("Portuguese", "GERE TODO O CONTEÚDO EM PORTUGUÊS. Nome da religião, descrições, nomes das divindades, rituais, lendas - tudo deve estar em português."),
    ("Russian", "СОЗДАЙТЕ ВЕСЬ КОНТЕНТ НА РУССКОМ ЯЗЫКЕ. Название религии, описания, имена божеств, ритуалы, легенды - все должно быть на русском языке."),
    ("Arabic", "أنشئ كل المحتوى باللغة العربية. اسم الدين، الأوصاف، أسماء الآلهة، الطقوس، الأساطير - كل شيء يجب أن يكون باللغة العربية."),
    ("Japanese", "すべてのコンテンツを日本語で生成してください。宗教名、説明、神々の名前、儀式、伝説 - すべて日本語である必要があります。"),
    ("Chinese", "用中文生成所有内容。宗教名称、描述、神祇名称、仪式、传说 - 一切都应该是中文。"),
];

/// Religion prompt template.
/// Replace: {theme}, {culture}, {complexity}, {deity_type}, {language}, {language_instructions}
pub const RELIGION_PROMPT_TEMPLATE: &str = r#"You are a creative religion designer. Create a detailed religion system according to the following criteria:

Theme: {theme}
Culture: {culture}
Complexity: {complexity}
Deity Type: {deity_type}
Language: {language}

{language_instructions}

Please create a religion system in the following JSON format:

{
    "name": "Religion name",
    "description": "General description of the religion",
    "deity_type": "monotheistic|polytheistic|pantheistic|animistic",
    "language": "{language}",
    "deities": [
        {
            "name": "Deity name",
            "title": "Title",
            "domain": "Power domain",
            "description": "Description",
            "attributes": ["attribute1", "attribute2"],
            "symbols": ["symbol1", "symbol2"]
        }
    ],
    "sacred_texts": [
        {
            "title": "Sacred text name",
            "content": "Content summary",
            "chapters": ["chapter1", "chapter2"],
            "language": "Language",
            "origin_story": "How it was created"
        }
    ],
    "rituals": [
        {
            "name": "Ritual name",
            "purpose": "Purpose",
            "frequency": "Frequency",
            "participants": "Participants",
            "steps": ["step1", "step2"],
            "materials_needed": ["material1", "material2"],
            "significance": "Significance"
        }
    ],
    "moral_rules": [
        {
            "rule": "Rule",
            "description": "Description",
            "severity": "Light|Medium|Heavy",
            "punishment": "Punishment",
            "reward": "Reward"
        }
    ],
    "legends": [
        {
            "title": "Legend name",
            "story": "Story",
            "characters": ["character1", "character2"],
            "moral_lesson": "Moral lesson",
            "cultural_impact": "Cultural impact"
        }
    ],
    "reward_punishment": {
        "rewards": ["reward1", "reward2"],
        "punishments": ["punishment1", "punishment2"],
        "afterlife_concept": "Afterlife concept",
        "judgment_criteria": ["criterion1", "criterion2"]
    },
    "symbols": [
        {
            "name": "Symbol name",
            "meaning": "Meaning",
            "visual_description": "Visual description",
            "usage_context": "Usage context"
        }
    ],
    "core_beliefs": ["belief1", "belief2"],
    "practices": ["practice1", "practice2"],
    "holy_places": ["holy place1", "holy place2"],
    "religious_leaders": "Role of religious leaders",
    "creation_myth": "Creation myth"
}

IMPORTANT: Set the deity_type field to "{deity_type}" exactly. Create a deity system that matches this parameter.

- monotheistic: Single deity (example: Christianity, Islam)
- polytheistic: Multiple deities (example: Ancient Greek, Norse mythology)
- pantheistic: God=Universe (example: Spinoza's philosophy)
- animistic: Everything has a spirit (example: Shamanism, indigenous religions)

Please create a creative and detailed religion system. Fill every section and create a consistent mythology."#;

/// Replace: {context}
pub const DEITY_PROMPT_TEMPLATE: &str = r#"Design a creative deity/goddess. {context}

In JSON format:
{
    "name": "Deity name",
    "title": "Title",
    "domain": "Power domain",
    "description": "Description",
    "attributes": ["attribute1", "attribute2"],
    "symbols": ["symbol1", "symbol2"]
}"#;

/// Replace: {context}
pub const RITUAL_PROMPT_TEMPLATE: &str = r#"Design a detailed religious ritual. {context}

In JSON format:
{
    "name": "Ritual name",
    "purpose": "Purpose",
    "frequency": "Frequency",
    "participants": "Participants",
    "steps": ["step1", "step2"],
    "materials_needed": ["material1", "material2"],
    "significance": "Significance"
}"#;

/// Replace: {context}
pub const LEGEND_PROMPT_TEMPLATE: &str = r#"Write a mythological legend. {context}

In JSON format:
{
    "title": "Legend name",
    "story": "Story",
    "characters": ["character1", "character2"],
    "moral_lesson": "Moral lesson",
    "cultural_impact": "Cultural impact"
}"#;

/// Returns the generation directive for `language`, falling back to Turkish.
pub fn language_directive(language: &str) -> &'static str {
    LANGUAGE_DIRECTIVES
        .iter()
        .find(|(key, _)| *key == language)
        .unwrap_or(&LANGUAGE_DIRECTIVES[0])
        .1
}

/// Builds the full religion prompt. Missing theme, culture and archetype fall
/// back to "general", "universal" and "polytheistic".
pub fn build_religion_prompt(params: &GenerationParameters) -> String {
    let deity_type = non_empty(&params.deity_type).unwrap_or(DeityType::Polytheistic.as_str());

    fill_template(
        RELIGION_PROMPT_TEMPLATE,
        &[
            ("{theme}", non_empty(&params.theme).unwrap_or(FALLBACK_THEME)),
            ("{culture}", non_empty(&params.culture).unwrap_or(FALLBACK_CULTURE)),
            ("{complexity}", params.complexity.as_str()),
            ("{deity_type}", deity_type),
            ("{language_instructions}", language_directive(&params.language)),
            ("{language}", params.language.as_str()),
        ],
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Substitutes every `{key}` in one left-to-right pass. Inserted values are
/// never rescanned; braces that start no known key are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Builds the prompt for a single component with `context` inserted verbatim.
pub fn build_component_prompt(kind: ComponentKind, context: &str) -> String {
    let template = match kind {
        ComponentKind::Deity => DEITY_PROMPT_TEMPLATE,
        ComponentKind::Ritual => RITUAL_PROMPT_TEMPLATE,
        ComponentKind::Legend => LEGEND_PROMPT_TEMPLATE,
    };
    template.replace("{context}", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GenerationParameters {
        GenerationParameters::default()
    }

    #[test]
    fn test_unknown_language_gets_turkish_directive() {
        let prompt = build_religion_prompt(&GenerationParameters {
            language: "Klingon".to_string(),
            ..params()
        });
        assert!(prompt.contains(LANGUAGE_DIRECTIVES[0].1));
        assert!(prompt.contains("Language: Klingon"));
        assert!(prompt.contains(r#""language": "Klingon""#));
    }

    #[test]
    fn test_each_supported_language_gets_its_own_directive() {
        for (language, directive) in LANGUAGE_DIRECTIVES {
            assert_eq!(language_directive(language), *directive);
        }
        assert_eq!(LANGUAGE_DIRECTIVES.len(), 11);
    }

    #[test]
    fn test_language_lookup_is_exact_match() {
        assert_eq!(language_directive("english"), LANGUAGE_DIRECTIVES[0].1);
    }

    #[test]
    fn test_missing_parameters_use_fallback_words() {
        let prompt = build_religion_prompt(&params());
        assert!(prompt.contains("Theme: general"));
        assert!(prompt.contains("Culture: universal"));
        assert!(prompt.contains("Complexity: medium"));
        assert!(prompt.contains("Deity Type: polytheistic"));
        assert!(prompt.contains(r#"Set the deity_type field to "polytheistic" exactly"#));
    }

    #[test]
    fn test_empty_parameters_use_fallback_words() {
        let prompt = build_religion_prompt(&GenerationParameters {
            theme: Some(String::new()),
            culture: Some(String::new()),
            deity_type: Some(String::new()),
            ..params()
        });
        assert!(prompt.contains("Theme: general\n"));
        assert!(prompt.contains("Culture: universal\n"));
        assert!(prompt.contains("Deity Type: polytheistic\n"));
        assert!(prompt.contains(r#"Set the deity_type field to "polytheistic" exactly"#));
    }

    #[test]
    fn test_placeholders_inside_parameters_are_not_substituted() {
        let prompt = build_religion_prompt(&GenerationParameters {
            theme: Some("sea".to_string()),
            culture: Some("{theme} folk".to_string()),
            language: "{culture}".to_string(),
            ..params()
        });
        assert!(prompt.contains("Theme: sea\n"));
        assert!(prompt.contains("Culture: {theme} folk\n"));
        assert!(prompt.contains("Language: {culture}\n"));
    }

    #[test]
    fn test_fill_template_copies_unknown_braces() {
        let filled = fill_template(r#"{"a": "{x}", "b": {y}}"#, &[("{x}", "{y}")]);
        assert_eq!(filled, r#"{"a": "{y}", "b": {y}}"#);
    }

    #[test]
    fn test_parameters_are_echoed() {
        let prompt = build_religion_prompt(&GenerationParameters {
            theme: Some("nature".to_string()),
            culture: Some("ancient".to_string()),
            complexity: "complex".to_string(),
            deity_type: Some("animistic".to_string()),
            language: "English".to_string(),
        });
        assert!(prompt.contains("Theme: nature"));
        assert!(prompt.contains("Culture: ancient"));
        assert!(prompt.contains("Complexity: complex"));
        assert!(prompt.contains("Deity Type: animistic"));
        assert!(prompt.contains(r#"Set the deity_type field to "animistic" exactly"#));
        assert!(prompt.contains("GENERATE ALL CONTENT IN ENGLISH."));
    }

    #[test]
    fn test_prompt_lists_every_archetype_and_field() {
        let prompt = build_religion_prompt(&params());
        for archetype in DeityType::ALL {
            assert!(prompt.contains(&format!("- {}:", archetype.as_str())));
        }
        for field in [
            "\"deities\"",
            "\"sacred_texts\"",
            "\"rituals\"",
            "\"moral_rules\"",
            "\"legends\"",
            "\"reward_punishment\"",
            "\"symbols\"",
            "\"core_beliefs\"",
            "\"practices\"",
            "\"holy_places\"",
            "\"religious_leaders\"",
            "\"creation_myth\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(!prompt.contains("{theme}"));
        assert!(!prompt.contains("{language_instructions}"));
    }

    #[test]
    fn test_religion_prompt_is_deterministic() {
        assert_eq!(build_religion_prompt(&params()), build_religion_prompt(&params()));
    }

    #[test]
    fn test_component_prompt_embeds_context_verbatim() {
        let context = "Existing religion: Verdant Path. Core beliefs: balance, renewal";
        let prompt = build_component_prompt(ComponentKind::Ritual, context);
        assert!(prompt.starts_with("Design a detailed religious ritual."));
        assert!(prompt.contains(context));
        assert!(prompt.contains("\"materials_needed\""));
    }

    #[test]
    fn test_component_prompt_per_kind() {
        assert!(build_component_prompt(ComponentKind::Deity, "").contains("\"domain\""));
        assert!(build_component_prompt(ComponentKind::Legend, "").contains("\"moral_lesson\""));
    }
}
