use jiff::civil::date;
use portage_core::collection;
use portage_core::error::CoreError;
use portage_core::models::{Assessment, AssessmentStatus, Child, ChildProfile, Gender};

fn child(name: &str) -> Child {
    Child::register(ChildProfile {
        name: name.to_string(),
        birth_date: date(2022, 6, 1),
        gender: Gender::Male,
        guardian_name: "Guardian".to_string(),
        condition: String::new(),
    })
}

#[test]
fn register_defaults_blank_condition_to_none() {
    let c = child("Pedro");
    assert_eq!(c.condition, "None");
    assert_eq!(c.clinical_history, "");
    assert!(c.assessments.is_empty());
}

#[test]
fn insert_rejects_duplicate_ids() {
    let mut children = Vec::new();
    let c = child("Pedro");
    collection::insert(&mut children, c.clone()).unwrap();
    assert!(matches!(
        collection::insert(&mut children, c),
        Err(CoreError::DuplicateChild(_))
    ));
    assert_eq!(children.len(), 1);
}

#[test]
fn remove_cascades_assessments() {
    let mut c = child("Pedro");
    c.assessments.push(Assessment::new_draft(jiff::Timestamp::now()));
    c.assessments.push(Assessment::new_draft(jiff::Timestamp::now()));
    let id = c.id;
    let mut children = vec![c, child("Julia")];

    let removed = collection::remove(&mut children, id).unwrap();
    assert_eq!(removed.assessments.len(), 2);
    assert_eq!(children.len(), 1);
    assert!(collection::find(&children, id).is_none());
    assert!(children.iter().all(|c| c.assessments.is_empty()));
}

#[test]
fn remove_unknown_child_fails() {
    let mut children = vec![child("Julia")];
    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        collection::remove(&mut children, missing),
        Err(CoreError::ChildNotFound(id)) if id == missing
    ));
}

#[test]
fn upsert_replaces_by_id() {
    let mut c = child("Pedro");
    let mut children = vec![c.clone()];
    c.clinical_history = "updated".to_string();
    collection::upsert(&mut children, c.clone());
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].clinical_history, "updated");
}

#[test]
fn search_is_case_insensitive() {
    let children = vec![child("Pedro Alves"), child("Julia"), child("pedrinho")];
    let found = collection::search_by_name(&children, "PEDR");
    assert_eq!(found.len(), 2);
}

#[test]
fn history_is_sorted_newest_first_and_filters_drafts() {
    let mut c = child("Pedro");
    let mut old = Assessment::new_draft("2023-01-01T00:00:00Z".parse().unwrap());
    old.status = AssessmentStatus::Completed;
    let draft = Assessment::new_draft("2024-06-01T00:00:00Z".parse().unwrap());
    let mut recent = Assessment::new_draft("2024-01-01T00:00:00Z".parse().unwrap());
    recent.status = AssessmentStatus::Completed;
    c.assessments = vec![old.clone(), draft.clone(), recent.clone()];

    let ids: Vec<_> = c.assessments_by_date_desc().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![draft.id, recent.id, old.id]);

    let completed: Vec<_> = c.completed_assessments().iter().map(|a| a.id).collect();
    assert_eq!(completed, vec![recent.id, old.id]);
    assert_eq!(c.latest_assessment().map(|a| a.id), Some(draft.id));
}

#[test]
fn upsert_assessment_inserts_then_replaces() {
    let mut c = child("Pedro");
    let mut a = Assessment::new_draft(jiff::Timestamp::now());
    c.upsert_assessment(a.clone());
    a.summary_notes = "done".to_string();
    c.upsert_assessment(a.clone());
    assert_eq!(c.assessments.len(), 1);
    assert_eq!(c.assessment(a.id).unwrap().summary_notes, "done");
}
