use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use jiff::civil::date;
use portage_core::models::{Assessment, AssessmentStatus, Child, ChildProfile, Gender, ScoreValue};
use portage_instruments::Catalog;
use portage_instruments::scoring::record_score;
use portage_narrative::error::NarrativeError;
use portage_narrative::generator::BoxFuture;
use portage_narrative::{FAILURE_SENTINEL, NarrativeGenerator, ReportState, ReportView};

struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String, NarrativeError>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<String, NarrativeError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NarrativeGenerator for ScriptedGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(NarrativeError::Generation("no reply scripted".to_string()));
            }
            replies.remove(0)
        })
    }
}

fn child_with(status: AssessmentStatus) -> (Child, Assessment) {
    let mut child = Child::register(ChildProfile {
        name: "Bia".to_string(),
        birth_date: date(2021, 8, 20),
        gender: Gender::Female,
        guardian_name: "Rosa".to_string(),
        condition: "None".to_string(),
    });
    let now: jiff::Timestamp = "2024-05-01T10:00:00Z".parse().unwrap();
    let mut assessment = Assessment::new_draft(now);
    record_score(&mut assessment.responses, "L1", ScoreValue::Achieved, "Ana", now).unwrap();
    record_score(&mut assessment.responses, "M1", ScoreValue::Emerging, "Carlos", now).unwrap();
    assessment.status = status;
    child.upsert_assessment(assessment.clone());
    (child, assessment)
}

#[tokio::test]
async fn completed_assessment_generates_once_on_open() {
    let (child, assessment) = child_with(AssessmentStatus::Completed);
    let generator = ScriptedGenerator::new(vec![Ok("## Profile".to_string())]);
    let mut view =
        ReportView::new(Catalog::portage(), generator.clone(), child, assessment.id).unwrap();

    let state = view.open(date(2024, 5, 1)).await.clone();
    assert_eq!(state, ReportState::Ready("## Profile".to_string()));

    view.open(date(2024, 5, 1)).await;
    assert_eq!(generator.calls(), 1);

    let prompt = generator.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Multi-professional team involved: Ana, Carlos."));
    assert!(prompt.contains("Language: "));
}

#[tokio::test]
async fn draft_assessment_is_never_generated() {
    let (child, assessment) = child_with(AssessmentStatus::Draft);
    let generator = ScriptedGenerator::new(vec![Ok("text".to_string())]);
    let mut view =
        ReportView::new(Catalog::portage(), generator.clone(), child, assessment.id).unwrap();

    assert_eq!(view.open(date(2024, 5, 1)).await, &ReportState::NotRequested);
    assert!(!view.can_generate());
    assert_eq!(view.generate(date(2024, 5, 1)).await, &ReportState::NotRequested);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn failure_degrades_to_a_retryable_state() {
    let (child, assessment) = child_with(AssessmentStatus::Completed);
    let generator = ScriptedGenerator::new(vec![
        Ok(FAILURE_SENTINEL.to_string()),
        Err(NarrativeError::Generation("timeout".to_string())),
        Ok("Narrative".to_string()),
    ]);
    let mut view =
        ReportView::new(Catalog::portage(), generator.clone(), child, assessment.id).unwrap();

    assert!(matches!(view.open(date(2024, 5, 1)).await, ReportState::Unavailable(_)));
    assert!(view.can_generate());

    // Reopening does not retry on its own.
    view.open(date(2024, 5, 1)).await;
    assert_eq!(generator.calls(), 1);

    assert!(matches!(view.generate(date(2024, 5, 1)).await, ReportState::Unavailable(_)));
    assert_eq!(
        view.generate(date(2024, 5, 1)).await,
        &ReportState::Ready("Narrative".to_string())
    );
    assert!(!view.can_generate());
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn finalized_snapshot_enables_generation() {
    let (child, assessment) = child_with(AssessmentStatus::Draft);
    let generator = ScriptedGenerator::new(vec![Ok("Narrative".to_string())]);
    let mut view =
        ReportView::new(Catalog::portage(), generator.clone(), child.clone(), assessment.id)
            .unwrap();
    view.open(date(2024, 5, 1)).await;

    let mut finalized = child;
    let mut completed = assessment;
    completed.status = AssessmentStatus::Completed;
    finalized.upsert_assessment(completed);
    view.refresh(finalized);

    assert!(view.can_generate());
    view.generate(date(2024, 5, 1)).await;
    assert_eq!(generator.calls(), 1);
    assert!(view.results_table().unwrap().contains("| Language | 1/10 | 10% |"));
}

#[test]
fn unknown_assessment_is_rejected() {
    let (child, _) = child_with(AssessmentStatus::Completed);
    let generator = ScriptedGenerator::new(vec![]);
    let result = ReportView::new(Catalog::portage(), generator, child, uuid_v4());
    assert!(matches!(result, Err(NarrativeError::AssessmentNotFound { .. })));
}

fn uuid_v4() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}
