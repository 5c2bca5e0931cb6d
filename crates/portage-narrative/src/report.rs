//! Generation state of one results report.
//!
//! A report view is opened for one assessment of one child. When the
//! assessment is completed the narrative is generated automatically the first
//! time the view opens; after that, generation only happens on request.
//! Failures leave the view in [`ReportState::Unavailable`], from which the
//! user can ask again.

use std::sync::Arc;

use jiff::civil::Date;
use serde::Serialize;
use uuid::Uuid;

use portage_core::models::{Assessment, Child};
use portage_instruments::scoring::{compute_area_scores, contributors};
use portage_instruments::{AreaScore, Catalog};

use crate::error::NarrativeError;
use crate::generator::{NarrativeGenerator, accept_reply};
use crate::prompt::build_prompt;
use crate::tabulation::results_table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum ReportState {
    NotRequested,
    Generating,
    Ready(String),
    /// The last attempt failed. The user may trigger generation again.
    Unavailable(String),
}

pub struct ReportView<'c> {
    catalog: &'c Catalog,
    generator: Arc<dyn NarrativeGenerator>,
    child: Child,
    assessment_id: Uuid,
    state: ReportState,
    auto_attempted: bool,
}

impl<'c> ReportView<'c> {
    pub fn new(
        catalog: &'c Catalog,
        generator: Arc<dyn NarrativeGenerator>,
        child: Child,
        assessment_id: Uuid,
    ) -> Result<Self, NarrativeError> {
        if child.assessment(assessment_id).is_none() {
            return Err(NarrativeError::AssessmentNotFound {
                child_id: child.id,
                assessment_id,
            });
        }
        Ok(Self {
            catalog,
            generator,
            child,
            assessment_id,
            state: ReportState::NotRequested,
            auto_attempted: false,
        })
    }

    fn assessment(&self) -> Option<&Assessment> {
        self.child.assessment(self.assessment_id)
    }

    pub fn child(&self) -> &Child {
        &self.child
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    /// Only completed assessments are eligible for a narrative.
    pub fn is_eligible(&self) -> bool {
        self.assessment().is_some_and(Assessment::is_completed)
    }

    /// Whether a user-triggered generation makes sense right now.
    pub fn can_generate(&self) -> bool {
        self.is_eligible()
            && matches!(
                self.state,
                ReportState::NotRequested | ReportState::Unavailable(_)
            )
    }

    pub fn area_scores(&self) -> Vec<AreaScore> {
        self.assessment()
            .map(|a| compute_area_scores(self.catalog, &a.responses))
            .unwrap_or_default()
    }

    pub fn contributors(&self) -> Vec<String> {
        self.assessment()
            .map(|a| contributors(&a.responses))
            .unwrap_or_default()
    }

    pub fn results_table(&self) -> Result<String, NarrativeError> {
        results_table(&self.area_scores())
    }

    /// Replace the child snapshot, e.g. after the assessment was finalized.
    /// The generated text and the auto-generation flag are kept.
    pub fn refresh(&mut self, child: Child) {
        if child.id == self.child.id && child.assessment(self.assessment_id).is_some() {
            self.child = child;
        }
    }

    /// Called when the view is shown. Generates once, automatically, for a
    /// completed assessment.
    pub async fn open(&mut self, today: Date) -> &ReportState {
        if self.auto_attempted || !self.is_eligible() {
            return &self.state;
        }
        self.auto_attempted = true;
        self.run(today).await
    }

    /// User-triggered generation. Ignored while the assessment is a draft or
    /// a narrative is already available.
    pub async fn generate(&mut self, today: Date) -> &ReportState {
        if !self.can_generate() {
            return &self.state;
        }
        self.run(today).await
    }

    async fn run(&mut self, today: Date) -> &ReportState {
        self.state = ReportState::Generating;

        let scores = self.area_scores();
        let team = self.contributors();
        let result = match build_prompt(&self.child, &scores, &team, today) {
            Ok(prompt) => accept_reply(self.generator.generate(&prompt).await),
            Err(e) => Err(e),
        };

        self.state = match result {
            Ok(text) => {
                tracing::info!(
                    child_id = %self.child.id,
                    assessment_id = %self.assessment_id,
                    "narrative report generated"
                );
                ReportState::Ready(text)
            }
            Err(e) => {
                tracing::warn!(
                    child_id = %self.child.id,
                    assessment_id = %self.assessment_id,
                    error = %e,
                    "narrative report unavailable"
                );
                ReportState::Unavailable(e.to_string())
            }
        };
        &self.state
    }
}
