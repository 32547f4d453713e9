//! CSV corpus provider
//!
//! Turns a review dump into the ordered list of documents the retrieval
//! engine indexes. Position in the returned list is the document id, so the
//! output must be stable for a given file.

use crate::error::ReviewRagError;
use crate::Result;
use std::path::Path;
use tracing::{debug, info};

/// Result of [`create_subset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetOutcome {
    /// Subset written from the source file
    Created { rows: usize },
    /// Source missing, previously written subset reused
    Existing,
}

/// Load up to `limit` documents from `column` of the CSV at `path`.
///
/// Empty and whitespace-only cells are dropped before the limit is applied.
pub fn load_corpus(path: &Path, column: &str, limit: usize) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ReviewRagError::not_found(format!(
            "corpus file {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let column_idx = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| {
            ReviewRagError::corpus(format!(
                "column '{}' not found in {}",
                column,
                path.display()
            ))
        })?;

    let mut documents = Vec::with_capacity(limit.min(1024));
    let mut dropped = 0usize;

    for record in reader.records() {
        if documents.len() >= limit {
            break;
        }

        let record = record?;
        match record.get(column_idx) {
            Some(text) if !text.trim().is_empty() => documents.push(text.to_string()),
            _ => dropped += 1,
        }
    }

    debug!("Dropped {} empty rows from {}", dropped, path.display());
    info!("Loaded {} documents from {}", documents.len(), path.display());

    Ok(documents)
}

/// Write the header and first `rows` records of `input` to `output`.
///
/// When `input` is missing an existing `output` is reused as-is; if both
/// are missing this fails with [`ReviewRagError::NotFound`].
pub fn create_subset(input: &Path, output: &Path, rows: usize) -> Result<SubsetOutcome> {
    if !input.exists() {
        if output.exists() {
            debug!("Source {} missing, keeping {}", input.display(), output.display());
            return Ok(SubsetOutcome::Existing);
        }
        return Err(ReviewRagError::not_found(format!(
            "Neither {} nor {} exist. Please add at least one dataset.",
            input.display(),
            output.display()
        )));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(input)?;
    let mut writer = csv::Writer::from_path(output)?;

    writer.write_record(reader.headers()?)?;

    let mut written = 0;
    for record in reader.records().take(rows) {
        writer.write_record(&record?)?;
        written += 1;
    }
    writer.flush()?;

    info!("Created {} with {} rows", output.display(), written);

    Ok(SubsetOutcome::Created { rows: written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const REVIEWS: &str = "Id,Score,Text\n\
        1,5,great taste\n\
        2,1,\n\
        3,2,too salty\n\
        4,5,   \n\
        5,4,\"excellent value, would buy again\"\n";

    #[test]
    fn test_load_corpus_drops_empty_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, REVIEWS).unwrap();

        let docs = load_corpus(&path, "Text", 100).unwrap();
        assert_eq!(
            docs,
            vec!["great taste", "too salty", "excellent value, would buy again"]
        );
    }

    #[test]
    fn test_load_corpus_limit_applies_after_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, REVIEWS).unwrap();

        let docs = load_corpus(&path, "Text", 2).unwrap();
        assert_eq!(docs, vec!["great taste", "too salty"]);
    }

    #[test]
    fn test_load_corpus_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, REVIEWS).unwrap();

        let err = load_corpus(&path, "Summary", 10).unwrap_err();
        assert!(matches!(err, ReviewRagError::Corpus(_)));
    }

    #[test]
    fn test_load_corpus_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_corpus(&dir.path().join("nope.csv"), "Text", 10).unwrap_err();
        assert!(matches!(err, ReviewRagError::NotFound(_)));
    }

    #[test]
    fn test_create_subset() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Reviews.csv");
        let output = dir.path().join("out").join("small_reviews.csv");
        fs::write(&input, REVIEWS).unwrap();

        let outcome = create_subset(&input, &output, 3).unwrap();
        assert_eq!(outcome, SubsetOutcome::Created { rows: 3 });

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("Id,Score,Text\n"));
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn test_create_subset_reuses_existing_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Reviews.csv");
        let output = dir.path().join("small_reviews.csv");
        fs::write(&output, REVIEWS).unwrap();

        let outcome = create_subset(&input, &output, 3).unwrap();
        assert_eq!(outcome, SubsetOutcome::Existing);
        assert_eq!(fs::read_to_string(&output).unwrap(), REVIEWS);
    }

    #[test]
    fn test_create_subset_both_missing() {
        let dir = tempdir().unwrap();
        let err = create_subset(
            &dir.path().join("Reviews.csv"),
            &dir.path().join("small_reviews.csv"),
            3,
        )
        .unwrap_err();
        assert!(matches!(err, ReviewRagError::NotFound(_)));
    }
}
