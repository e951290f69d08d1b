//! Term entity and field validation
//!
//! A glossary entry carries three required fields (section, headword,
//! definition) and four optional ones. Optional fields are `None` when
//! absent; there is no empty-string-with-meaning state. `related_terms`
//! holds headword text, not ids: entries are weak references and may not
//! resolve to any stored term.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One stored glossary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub section: String,
    pub term: String,
    pub definition: String,
    pub usage_example: Option<String>,
    pub english_equivalent: Option<String>,
    pub related_terms: Option<Vec<String>>,
    pub source: Option<String>,
}

/// An unvalidated, id-less term payload submitted for creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTerm {
    pub section: String,
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub usage_example: Option<String>,
    #[serde(default)]
    pub english_equivalent: Option<String>,
    #[serde(default)]
    pub related_terms: Option<Vec<String>>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DraftTerm {
    /// Validate required fields and normalize the optional ones.
    ///
    /// Required fields must contain at least one non-whitespace character.
    /// `related_terms` entries are trimmed, empty entries dropped, and a
    /// list with zero survivors becomes `None`.
    pub fn validate(mut self) -> Result<DraftTerm> {
        if self.section.trim().is_empty() {
            return Err(Error::Validation("field 'section' is required".into()));
        }
        if self.term.trim().is_empty() {
            return Err(Error::Validation("field 'term' is required".into()));
        }
        if self.definition.trim().is_empty() {
            return Err(Error::Validation("field 'definition' is required".into()));
        }

        self.related_terms = self.related_terms.and_then(|entries| {
            let cleaned: Vec<String> = entries
                .iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            if cleaned.is_empty() { None } else { Some(cleaned) }
        });

        Ok(self)
    }

    /// Promote a validated draft to a stored term with the given id
    pub fn into_term(self, id: String) -> Term {
        Term {
            id,
            section: self.section,
            term: self.term,
            definition: self.definition,
            usage_example: self.usage_example,
            english_equivalent: self.english_equivalent,
            related_terms: self.related_terms,
            source: self.source,
        }
    }
}

impl Term {
    /// Case-insensitive substring match against the four searchable fields.
    ///
    /// `query_lower` must already be lowercased by the caller. Lowercasing
    /// happens in Rust rather than SQL because SQLite's LIKE only folds
    /// ASCII, and the dataset is bilingual.
    pub fn matches(&self, query_lower: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(query_lower);

        hit(&self.term)
            || hit(&self.definition)
            || self.english_equivalent.as_deref().is_some_and(hit)
            || self.usage_example.as_deref().is_some_and(hit)
    }
}

/// Split a delimited related-terms cell ("А, Б; В") into trimmed entries.
///
/// Accepts commas and semicolons as delimiters, drops empty entries, and
/// returns `None` when nothing survives.
pub fn split_related_terms(raw: &str) -> Option<Vec<String>> {
    let entries: Vec<String> = raw
        .split([',', ';'])
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect();
    if entries.is_empty() { None } else { Some(entries) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(section: &str, term: &str, definition: &str) -> DraftTerm {
        DraftTerm {
            section: section.to_string(),
            term: term.to_string(),
            definition: definition.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_minimal_draft() {
        let d = draft("Концепции", "Тест", "Описание").validate().unwrap();
        assert_eq!(d.term, "Тест");
        assert!(d.related_terms.is_none());
    }

    #[test]
    fn validate_rejects_missing_required_fields() {
        assert!(draft("", "Тест", "Описание").validate().is_err());
        assert!(draft("Концепции", "   ", "Описание").validate().is_err());
        assert!(draft("Концепции", "Тест", "").validate().is_err());
    }

    #[test]
    fn validate_normalizes_related_terms() {
        let mut d = draft("Концепции", "Тест", "Описание");
        d.related_terms = Some(vec!["  А ".into(), "".into(), "Б".into()]);
        let d = d.validate().unwrap();
        assert_eq!(d.related_terms, Some(vec!["А".to_string(), "Б".to_string()]));
    }

    #[test]
    fn validate_drops_empty_related_terms_list() {
        let mut d = draft("Концепции", "Тест", "Описание");
        d.related_terms = Some(vec!["  ".into(), "".into()]);
        assert!(d.validate().unwrap().related_terms.is_none());
    }

    #[test]
    fn split_related_terms_handles_mixed_delimiters() {
        assert_eq!(
            split_related_terms("А, Б;  В"),
            Some(vec!["А".to_string(), "Б".to_string(), "В".to_string()])
        );
        assert_eq!(split_related_terms(" ; , "), None);
        assert_eq!(split_related_terms(""), None);
    }

    #[test]
    fn matches_is_case_insensitive_including_cyrillic() {
        let term = draft("Концепции", "Рекурсия", "Функция вызывает сама себя")
            .into_term("id-1".into());
        assert!(term.matches("рекурсия"));
        assert!(term.matches("вызывает"));
        assert!(!term.matches("итерация"));
    }

    #[test]
    fn matches_skips_absent_optional_fields() {
        let mut d = draft("Концепции", "Стек", "Структура данных LIFO");
        d.english_equivalent = Some("Stack".into());
        let term = d.into_term("id-2".into());
        assert!(term.matches("stack"));
        // usage_example is None and must never match
        assert!(!term.matches("пример"));
    }

    #[test]
    fn wire_shape_uses_camel_case_and_null_optionals() {
        let term = draft("Концепции", "Тест", "Описание").into_term("id-3".into());
        let json = serde_json::to_value(&term).unwrap();
        assert_eq!(json["usageExample"], serde_json::Value::Null);
        assert_eq!(json["englishEquivalent"], serde_json::Value::Null);
        assert_eq!(json["relatedTerms"], serde_json::Value::Null);
        assert_eq!(json["term"], "Тест");
    }
}
