use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jiff::civil::date;
use portage_core::models::{AssessmentStatus, Child, ChildProfile, DevelopmentalArea, Gender, ScoreValue};
use portage_instruments::catalog::{Catalog, Question};
use portage_session::error::SessionError;
use portage_session::identity::{Identity, NoPrompt};
use portage_session::preferences::{LAST_RESPONDENT, LAST_ROLE};
use portage_session::{AssessmentSession, MemoryPreferences, PreferenceStore, SessionContext};

fn catalog() -> Catalog {
    Catalog::new(vec![
        Question::new("q1", DevelopmentalArea::Language, "0-1", "first"),
        Question::new("q2", DevelopmentalArea::Language, "1-2", "second"),
        Question::new("q3", DevelopmentalArea::Motor, "0-1", "third"),
    ])
    .unwrap()
}

fn child() -> Child {
    Child::register(ChildProfile {
        name: "Bia".to_string(),
        birth_date: date(2021, 8, 20),
        gender: Gender::Female,
        guardian_name: "Rosa".to_string(),
        condition: "Down Syndrome".to_string(),
    })
}

fn context_with(name: Option<&str>, role: Option<&str>) -> (SessionContext, Arc<MemoryPreferences>) {
    let prefs = Arc::new(MemoryPreferences::new());
    if let Some(name) = name {
        prefs.set(LAST_RESPONDENT, name).unwrap();
    }
    if let Some(role) = role {
        prefs.set(LAST_ROLE, role).unwrap();
    }
    (SessionContext::new(Arc::new(NoPrompt), prefs.clone()), prefs)
}

fn now() -> jiff::Timestamp {
    "2024-05-01T10:00:00Z".parse().unwrap()
}

#[test]
fn start_emits_an_empty_draft_immediately() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), Some("Psychologist"));
    let (session, snapshot) = AssessmentSession::start(&catalog, child(), ctx, now());

    assert_eq!(snapshot.assessments.len(), 1);
    let assessment = &snapshot.assessments[0];
    assert_eq!(assessment.id, session.assessment().id);
    assert_eq!(assessment.status, AssessmentStatus::Draft);
    assert!(assessment.responses.is_empty());
    assert_eq!(assessment.date, now());
    assert_eq!(assessment.lead_professional_name, "Ana");
    assert_eq!(assessment.lead_professional_role, "Psychologist");
}

#[test]
fn scoring_updates_the_embedded_assessment() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());

    session.record_score("q1", ScoreValue::Achieved, now()).unwrap();
    let snapshot = session.record_score("q2", ScoreValue::Emerging, now()).unwrap();

    assert_eq!(snapshot.assessments.len(), 1);
    let responses = &snapshot.assessments[0].responses;
    assert_eq!(responses["q1"].respondent_name, "Ana");
    assert_eq!(responses["q2"].score, ScoreValue::Emerging);
    assert_eq!(snapshot.assessments[0].status, AssessmentStatus::Draft);

    let scores = session.area_scores();
    assert_eq!(scores[0].percentage, 75.0);
    assert!((session.global_progress() - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(session.area_progress(DevelopmentalArea::Motor), 0.0);
    assert_eq!(session.contributor_counts().get("Ana"), Some(&2));
}

#[test]
fn missing_identity_prompts_once_and_is_remembered() {
    let catalog = catalog();
    let prompts = Arc::new(AtomicUsize::new(0));
    let counter = prompts.clone();
    let prefs = Arc::new(MemoryPreferences::new());
    let ctx = SessionContext::new(
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Identity::Provided("Carla".to_string())
        }),
        prefs.clone(),
    );
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());

    session.record_score("q1", ScoreValue::Achieved, now()).unwrap();
    session.record_score("q3", ScoreValue::NotAchieved, now()).unwrap();

    assert_eq!(prompts.load(Ordering::SeqCst), 1);
    assert_eq!(session.response("q3").unwrap().respondent_name, "Carla");
    assert_eq!(prefs.get(LAST_RESPONDENT).as_deref(), Some("Carla"));
}

#[test]
fn declined_identity_abandons_the_scoring_action() {
    let catalog = catalog();
    let (ctx, _) = context_with(None, None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    let before = session.assessment().clone();

    let result = session.record_score("q1", ScoreValue::Achieved, now());
    assert!(matches!(result, Err(SessionError::IdentityMissing)));
    assert_eq!(session.assessment(), &before);
}

#[test]
fn declined_identity_abandons_the_whole_batch() {
    let catalog = catalog();
    let (ctx, _) = context_with(None, None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    let ids: BTreeSet<String> = ["q1", "q2", "q3"].iter().map(|s| s.to_string()).collect();

    let result = session.record_batch_score(&ids, ScoreValue::Emerging, now());
    assert!(matches!(result, Err(SessionError::IdentityMissing)));
    assert!(session.assessment().responses.is_empty());
}

#[test]
fn batch_with_unknown_question_changes_nothing() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    let ids: BTreeSet<String> = ["q1", "nope"].iter().map(|s| s.to_string()).collect();

    let result = session.record_batch_score(&ids, ScoreValue::Achieved, now());
    assert!(matches!(result, Err(SessionError::UnknownQuestion(id)) if id == "nope"));
    assert!(session.assessment().responses.is_empty());
}

#[test]
fn batch_scores_all_items_with_one_timestamp() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    let ids: BTreeSet<String> = ["q1", "q3"].iter().map(|s| s.to_string()).collect();

    let snapshot = session.record_batch_score(&ids, ScoreValue::Achieved, now()).unwrap();
    let responses = &snapshot.assessments[0].responses;
    assert_eq!(responses.len(), 2);
    assert!(responses.values().all(|r| r.answered_at == Some(now())));
}

#[test]
fn notes_do_not_need_an_identity() {
    let catalog = catalog();
    let (ctx, _) = context_with(None, None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());

    let snapshot = session.record_note("q2", "child was tired").unwrap();
    let item = &snapshot.assessments[0].responses["q2"];
    assert_eq!(item.notes.as_deref(), Some("child was tired"));
    assert!(!item.is_scored());
    assert_eq!(session.global_progress(), 0.0);
}

#[test]
fn finalize_without_role_is_rejected() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    session.record_score("q1", ScoreValue::Achieved, now()).unwrap();

    let result = session.finalize();
    assert!(matches!(result, Err(SessionError::FinalizeRejected(_))));
    assert_eq!(session.assessment().status, AssessmentStatus::Draft);
}

#[test]
fn finalize_without_name_is_rejected() {
    let catalog = catalog();
    let (ctx, _) = context_with(None, Some("OT"));
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());

    assert!(matches!(session.finalize(), Err(SessionError::FinalizeRejected(_))));
    assert_eq!(session.assessment().status, AssessmentStatus::Draft);
}

#[test]
fn finalize_with_professional_completes() {
    let catalog = catalog();
    let (ctx, prefs) = context_with(None, None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    session.set_lead_professional("Dr. Lima", "Neuropediatrician");
    session.set_summary_notes("Global delay, stronger in socialization.");

    let snapshot = session.finalize().unwrap();
    let assessment = &snapshot.assessments[0];
    assert_eq!(assessment.status, AssessmentStatus::Completed);
    assert_eq!(assessment.lead_professional_name, "Dr. Lima");
    assert_eq!(assessment.summary_notes, "Global delay, stronger in socialization.");
    assert_eq!(prefs.get(LAST_ROLE).as_deref(), Some("Neuropediatrician"));

    // Completion is terminal.
    let again = session.finalize().unwrap();
    assert_eq!(again.assessments[0].status, AssessmentStatus::Completed);
}

#[test]
fn resume_replaces_rather_than_duplicates() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    let snapshot = session.record_score("q1", ScoreValue::Achieved, now()).unwrap();
    let id = session.assessment().id;

    let (ctx, _) = context_with(Some("Bruno"), None);
    let mut resumed = AssessmentSession::resume(&catalog, snapshot, id, ctx).unwrap();
    let snapshot = resumed.record_score("q3", ScoreValue::Emerging, now()).unwrap();

    assert_eq!(snapshot.assessments.len(), 1);
    let counts = resumed.contributor_counts();
    assert_eq!(counts.get("Ana"), Some(&1));
    assert_eq!(counts.get("Bruno"), Some(&1));
}

#[test]
fn resume_unknown_assessment_fails() {
    let catalog = catalog();
    let (ctx, _) = context_with(None, None);
    let result = AssessmentSession::resume(&catalog, child(), uuid::Uuid::new_v4(), ctx);
    assert!(matches!(result, Err(SessionError::AssessmentNotFound { .. })));
}

#[test]
fn unknown_question_is_rejected() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    assert!(matches!(
        session.record_score("zz", ScoreValue::Achieved, now()),
        Err(SessionError::UnknownQuestion(_))
    ));
}

#[test]
fn reassigning_respondent_keeps_score() {
    let catalog = catalog();
    let (ctx, _) = context_with(Some("Ana"), None);
    let (mut session, _) = AssessmentSession::start(&catalog, child(), ctx, now());
    session.record_score("q1", ScoreValue::Emerging, now()).unwrap();

    let snapshot = session.reassign_respondent("q1", "Paula").unwrap();
    let item = &snapshot.assessments[0].responses["q1"];
    assert_eq!(item.respondent_name, "Paula");
    assert_eq!(item.score, ScoreValue::Emerging);
    assert!(matches!(
        session.reassign_respondent("q2", "Paula"),
        Err(SessionError::NotRecorded(_))
    ));
}
