// Handling rules for keyword blocks, keyed on the thesaurus title

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordHandling {
    Keyword,
    Theme,
    VariableMeasured,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub thesaurus_title: String,
    pub handling: KeywordHandling,
}

impl KeywordRule {
    pub fn new(thesaurus_title: impl Into<String>, handling: KeywordHandling) -> Self {
        Self {
            thesaurus_title: thesaurus_title.into(),
            handling,
        }
    }
}

pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("BODC Parameter Usage Vocabulary", KeywordHandling::VariableMeasured),
        KeywordRule::new(
            "International Standards Organisation ISO19115 Topic Categories",
            KeywordHandling::Theme,
        ),
        KeywordRule::new("GEMET - INSPIRE themes, version 1.0", KeywordHandling::Theme),
        KeywordRule::new("GemetInspireTheme", KeywordHandling::Theme),
        KeywordRule::new("Marine Institute Calendar Concept Scheme", KeywordHandling::Ignore),
    ]
}

/// Blocks without a thesaurus, or with an unlisted one, are plain keywords
pub fn handling_for(rules: &[KeywordRule], thesaurus_title: Option<&str>) -> KeywordHandling {
    thesaurus_title
        .and_then(|title| rules.iter().find(|rule| rule.thesaurus_title == title))
        .map(|rule| rule.handling)
        .unwrap_or(KeywordHandling::Keyword)
}
