use crate::db::{Document, DocumentStore, Filter, FindOptions, StoredDocument};
use crate::error::AppError;
use crate::models::entry::Entry;
use crate::models::Entity;
use crate::validation;
use serde_json::Value;
use std::cmp::Ordering;

/// Orders two optional measurements so that an absent value ranks after
/// every present one.
pub fn cmp_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Any finite, non-negative number counts, integer or not. Missing, null,
/// negative and non-numeric values count as absent.
fn measurement(doc: &Document, field: &str) -> Option<f64> {
    doc.get(field)
        .and_then(Value::as_f64)
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
}

fn sort_key(doc: &Document) -> (Option<f64>, Option<f64>) {
    (measurement(doc, "total_time_ms"), measurement(doc, "best_lap_ms"))
}

/// Sorts entries by total time then best lap, keeping retrieval order for
/// exact ties, and attaches 1-based positions.
pub fn rank_entries(entries: Vec<StoredDocument>) -> Vec<Document> {
    let mut entries = entries;
    entries.sort_by(|a, b| {
        let (a_total, a_best) = sort_key(&a.body);
        let (b_total, b_best) = sort_key(&b.body);
        cmp_missing_last(a_total, b_total).then_with(|| cmp_missing_last(a_best, b_best))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let mut doc = entry.into_public();
            doc.insert("position".into(), Value::from(idx as u64 + 1));
            doc
        })
        .collect()
}

/// Ranks every entry recorded against `race_id`. The race itself is not
/// looked up; an unknown race simply has no entries.
pub fn rank(store: &dyn DocumentStore, race_id: &str) -> Result<Vec<Document>, AppError> {
    validation::validate_object_id(race_id, "Invalid race id")?;

    let entries = store.find(
        Entry::COLLECTION,
        &Filter::all().eq("race_id", race_id),
        &FindOptions::default(),
    )?;
    Ok(rank_entries(entries))
}
