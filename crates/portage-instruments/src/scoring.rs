//! Aggregation engine.
//!
//! The mutating operations update a live `Responses` map in place; the
//! `compute_*` functions are pure and recompute everything from the catalog
//! and the current map on every call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use portage_core::models::{DevelopmentalArea, ResponseItem, Responses, ScoreValue};

use crate::catalog::Catalog;
use crate::error::ScoringError;

/// Respondent attributed to an entry created by a note before any score.
pub const NOTE_PLACEHOLDER_RESPONDENT: &str = "Evaluator";

/// Derived score of one area. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AreaScore {
    pub area: DevelopmentalArea,
    pub label: String,
    /// Sum of the recorded scores of the area's questions.
    pub score: f64,
    /// Number of questions in the area, answered or not.
    pub total: usize,
    pub percentage: f64,
}

fn respondent(name: &str) -> Result<&str, ScoringError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScoringError::IdentityMissing);
    }
    Ok(name)
}

fn percentage(part: f64, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part / whole as f64 * 100.0
    }
}

/// Score one item, overwriting score, respondent and timestamp while keeping
/// any existing note.
pub fn record_score(
    responses: &mut Responses,
    question_id: &str,
    score: ScoreValue,
    respondent_name: &str,
    now: jiff::Timestamp,
) -> Result<ResponseItem, ScoringError> {
    let name = respondent(respondent_name)?;
    Ok(apply_score(responses, question_id, score, name, now))
}

fn apply_score(
    responses: &mut Responses,
    question_id: &str,
    score: ScoreValue,
    name: &str,
    now: jiff::Timestamp,
) -> ResponseItem {
    let notes = responses.get(question_id).and_then(|r| r.notes.clone());
    let item = ResponseItem {
        score,
        respondent_name: name.to_string(),
        answered_at: Some(now),
        notes,
    };
    responses.insert(question_id.to_string(), item.clone());
    item
}

/// Score every item of `question_ids` with one shared timestamp. Nothing is
/// written unless the respondent identity is present.
pub fn record_batch_score(
    responses: &mut Responses,
    question_ids: &BTreeSet<String>,
    score: ScoreValue,
    respondent_name: &str,
    now: jiff::Timestamp,
) -> Result<Vec<ResponseItem>, ScoringError> {
    let name = respondent(respondent_name)?;
    let items = question_ids
        .iter()
        .map(|id| apply_score(responses, id, score, name, now))
        .collect();
    tracing::debug!(count = question_ids.len(), "batch score applied");
    Ok(items)
}

/// Set the note of an item. Score, respondent and timestamp are untouched;
/// an item without an entry gets a placeholder that does not count as
/// answered. A blank note clears it, and clearing the note of a placeholder
/// removes the placeholder. Returns the entry left for the item, if any.
pub fn record_note(
    responses: &mut Responses,
    question_id: &str,
    note: &str,
) -> Option<ResponseItem> {
    let notes = if note.trim().is_empty() {
        None
    } else {
        Some(note.to_string())
    };

    let existing_scored = responses.get(question_id).map(ResponseItem::is_scored);
    match (existing_scored, notes) {
        (Some(scored), notes) if scored || notes.is_some() => {
            let existing = responses.get_mut(question_id)?;
            existing.notes = notes;
            Some(existing.clone())
        }
        (Some(_), _) => {
            responses.remove(question_id);
            None
        }
        (None, None) => None,
        (None, Some(notes)) => {
            let item = ResponseItem {
                score: ScoreValue::NotAchieved,
                respondent_name: NOTE_PLACEHOLDER_RESPONDENT.to_string(),
                answered_at: None,
                notes: Some(notes),
            };
            responses.insert(question_id.to_string(), item.clone());
            Some(item)
        }
    }
}

/// Attribute an already recorded item to another respondent without touching
/// its score or timestamp.
pub fn reassign_respondent(
    responses: &mut Responses,
    question_id: &str,
    respondent_name: &str,
) -> Result<ResponseItem, ScoringError> {
    let name = respondent(respondent_name)?;
    let item = responses
        .get_mut(question_id)
        .ok_or_else(|| ScoringError::NotRecorded(question_id.to_string()))?;
    item.respondent_name = name.to_string();
    Ok(item.clone())
}

fn scored<'a>(responses: &'a Responses, question_id: &str) -> Option<&'a ResponseItem> {
    responses.get(question_id).filter(|r| r.is_scored())
}

/// One score per catalog area, in catalog order.
pub fn compute_area_scores(catalog: &Catalog, responses: &Responses) -> Vec<AreaScore> {
    catalog
        .areas()
        .iter()
        .map(|&area| {
            let mut total = 0;
            let mut score = 0.0;
            for q in catalog.questions_in(area) {
                total += 1;
                if let Some(item) = scored(responses, &q.id) {
                    score += item.score.value();
                }
            }
            AreaScore {
                area,
                label: area.label().to_string(),
                score,
                total,
                percentage: percentage(score, total),
            }
        })
        .collect()
}

/// Share of an area's questions that have been answered, 0 for an empty area.
pub fn compute_area_progress(
    catalog: &Catalog,
    area: DevelopmentalArea,
    responses: &Responses,
) -> f64 {
    let mut total = 0;
    let mut answered = 0;
    for q in catalog.questions_in(area) {
        total += 1;
        if scored(responses, &q.id).is_some() {
            answered += 1;
        }
    }
    percentage(answered as f64, total)
}

/// Share of the whole catalog that has been answered. Responses for ids the
/// catalog does not know are ignored.
pub fn compute_global_progress(catalog: &Catalog, responses: &Responses) -> f64 {
    let answered = catalog
        .questions()
        .iter()
        .filter(|q| scored(responses, &q.id).is_some())
        .count();
    percentage(answered as f64, catalog.len())
}

/// Number of scored items per respondent.
pub fn compute_contributor_counts(responses: &Responses) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in responses.values().filter(|r| r.is_scored()) {
        *counts.entry(item.respondent_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Distinct respondents who scored at least one item, sorted by name.
pub fn contributors(responses: &Responses) -> Vec<String> {
    compute_contributor_counts(responses).into_keys().collect()
}
