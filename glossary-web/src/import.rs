//! Spreadsheet import pipeline
//!
//! Converts an uploaded Excel workbook into a validated, fully-replacing
//! set of term records. Only the first worksheet is read; its first row
//! must be the header row. Each logical field accepts either its Russian
//! or its English header name, Russian checked first.
//!
//! The pipeline validates every row before anything destructive happens:
//! one bad row fails the whole import and the existing dataset survives.
//! The write itself goes through [`TermStore::replace_all`], which wipes
//! and re-inserts inside a single transaction.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use glossary_common::model::split_related_terms;
use glossary_common::{DraftTerm, Error, Result, TermStore};
use serde::Serialize;
use std::io::Cursor;
use tracing::info;

/// Result of a completed import, returned to the client as JSON
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub success: bool,
    pub count: usize,
    pub message: String,
}

/// Parse, validate, and atomically store an uploaded workbook
pub async fn import_spreadsheet(store: &dyn TermStore, payload: &[u8]) -> Result<ImportSummary> {
    let drafts = parse_spreadsheet(payload)?;
    let created = store.replace_all(drafts).await?;

    info!("Imported {} terms from spreadsheet", created.len());

    Ok(ImportSummary {
        success: true,
        count: created.len(),
        message: format!("Successfully imported {} terms", created.len()),
    })
}

/// Parse workbook bytes into draft terms
///
/// A sheet with only a header row (or nothing at all) yields an empty
/// list: importing it wipes the store, which is a valid state.
pub fn parse_spreadsheet(payload: &[u8]) -> Result<Vec<DraftTerm>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(payload))
        .map_err(|e| Error::Internal(format!("Failed to parse spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Internal("Spreadsheet has no worksheets".to_string()))?
        .map_err(|e| Error::Internal(format!("Failed to read worksheet: {}", e)))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let columns = ColumnMap::from_headers(&headers);

    let mut drafts = Vec::new();
    for (i, row) in rows.enumerate() {
        // Spreadsheet row numbers are 1-based and row 1 is the header
        let row_number = i + 2;
        if row.iter().all(|cell| cell_text(cell).is_none()) {
            continue;
        }
        drafts.push(columns.draft_from_row(row, row_number)?);
    }

    Ok(drafts)
}

/// Column indices resolved from the bilingual header row
#[derive(Debug)]
struct ColumnMap {
    section: Option<usize>,
    term: Option<usize>,
    definition: Option<usize>,
    usage_example: Option<usize>,
    english_equivalent: Option<usize>,
    related_terms: Option<usize>,
    source: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        let find = |names: [&str; 2]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h == name))
        };

        Self {
            section: find(["Раздел", "Section"]),
            term: find(["Термин", "Term"]),
            definition: find(["Определение", "Definition"]),
            usage_example: find(["Пример употребления", "Usage Example"]),
            english_equivalent: find(["Английский эквивалент", "English Equivalent"]),
            related_terms: find(["Смежные термины", "Related Terms"]),
            source: find(["Источник", "Source"]),
        }
    }

    fn draft_from_row(&self, row: &[Data], row_number: usize) -> Result<DraftTerm> {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(cell_text);

        let draft = DraftTerm {
            section: cell(self.section).unwrap_or_default(),
            term: cell(self.term).unwrap_or_default(),
            definition: cell(self.definition).unwrap_or_default(),
            usage_example: cell(self.usage_example),
            english_equivalent: cell(self.english_equivalent),
            related_terms: cell(self.related_terms)
                .as_deref()
                .and_then(split_related_terms),
            source: cell(self.source),
        };

        draft.validate().map_err(|e| match e {
            Error::Validation(msg) => {
                Error::Validation(format!("row {}: {}", row_number, msg))
            }
            other => other,
        })
    }
}

/// Trimmed text content of a cell; `None` for empty or blank cells
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn ru_columns() -> ColumnMap {
        let headers: Vec<String> = [
            "Раздел",
            "Термин",
            "Определение",
            "Пример употребления",
            "Английский эквивалент",
            "Смежные термины",
            "Источник",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        ColumnMap::from_headers(&headers)
    }

    #[test]
    fn maps_russian_headers() {
        let columns = ru_columns();
        let row = vec![
            s("Концепции"),
            s("Тест"),
            s("Описание"),
            Data::Empty,
            s("Test"),
            s("А, Б;  В"),
            Data::Empty,
        ];

        let draft = columns.draft_from_row(&row, 2).unwrap();
        assert_eq!(draft.section, "Концепции");
        assert_eq!(draft.term, "Тест");
        assert_eq!(draft.definition, "Описание");
        assert_eq!(draft.usage_example, None);
        assert_eq!(draft.english_equivalent, Some("Test".to_string()));
        assert_eq!(
            draft.related_terms,
            Some(vec!["А".to_string(), "Б".to_string(), "В".to_string()])
        );
        assert_eq!(draft.source, None);
    }

    #[test]
    fn maps_english_headers() {
        let headers: Vec<String> = ["Section", "Term", "Definition", "Related Terms"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = ColumnMap::from_headers(&headers);
        let row = vec![s("Networking"), s("Packet"), s("A unit of data"), s("Frame")];

        let draft = columns.draft_from_row(&row, 2).unwrap();
        assert_eq!(draft.section, "Networking");
        assert_eq!(draft.related_terms, Some(vec!["Frame".to_string()]));
        assert_eq!(draft.usage_example, None);
    }

    #[test]
    fn russian_header_wins_over_english() {
        // Both spellings present: the Russian column must be used
        let headers: Vec<String> = ["Section", "Раздел", "Термин", "Определение"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = ColumnMap::from_headers(&headers);
        let row = vec![s("ignored"), s("Концепции"), s("Тест"), s("Описание")];

        let draft = columns.draft_from_row(&row, 2).unwrap();
        assert_eq!(draft.section, "Концепции");
    }

    #[test]
    fn missing_required_column_names_the_row() {
        let headers: Vec<String> = ["Раздел", "Определение"].iter().map(|h| h.to_string()).collect();
        let columns = ColumnMap::from_headers(&headers);
        let row = vec![s("Концепции"), s("Описание")];

        let err = columns.draft_from_row(&row, 5).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 5"), "unexpected message: {}", message);
        assert!(message.contains("term"), "unexpected message: {}", message);
    }

    #[test]
    fn short_row_yields_absent_fields() {
        // Trailing empty cells are often omitted entirely by the writer
        let columns = ru_columns();
        let row = vec![s("Концепции"), s("Тест"), s("Описание")];

        let draft = columns.draft_from_row(&row, 2).unwrap();
        assert_eq!(draft.english_equivalent, None);
        assert_eq!(draft.related_terms, None);
    }

    #[test]
    fn related_terms_with_no_survivors_is_absent() {
        let columns = ru_columns();
        let row = vec![
            s("Концепции"),
            s("Тест"),
            s("Описание"),
            Data::Empty,
            Data::Empty,
            s(" ; , "),
            Data::Empty,
        ];

        let draft = columns.draft_from_row(&row, 2).unwrap();
        assert_eq!(draft.related_terms, None);
    }

    #[test]
    fn numeric_cells_stringify() {
        let headers: Vec<String> = ["Section", "Term", "Definition", "Source"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = ColumnMap::from_headers(&headers);
        let row = vec![s("Networking"), s("RFC"), s("Request for Comments"), Data::Int(791)];

        let draft = columns.draft_from_row(&row, 2).unwrap();
        assert_eq!(draft.source, Some("791".to_string()));
    }

    #[test]
    fn garbage_payload_is_a_parse_error() {
        let err = parse_spreadsheet(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
