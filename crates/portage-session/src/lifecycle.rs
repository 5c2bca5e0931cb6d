use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use portage_core::models::{
    Assessment, AssessmentStatus, Child, DevelopmentalArea, ResponseItem, ScoreValue,
};
use portage_instruments::catalog::Catalog;
use portage_instruments::scoring::{self, AreaScore};

use crate::context::SessionContext;
use crate::error::SessionError;

/// An open evaluation of one child.
///
/// Every mutating method returns the owning `Child` with this assessment
/// inserted or replaced in its `assessments`; the caller forwards that
/// snapshot to the sync layer. Failed operations leave both the assessment
/// and the context untouched.
pub struct AssessmentSession<'c> {
    catalog: &'c Catalog,
    context: SessionContext,
    child: Child,
    assessment: Assessment,
}

impl<'c> AssessmentSession<'c> {
    /// Open a new draft for `child`. The returned snapshot must be persisted
    /// right away so the assessment id is durable before any answer.
    pub fn start(
        catalog: &'c Catalog,
        child: Child,
        context: SessionContext,
        now: jiff::Timestamp,
    ) -> (Self, Child) {
        let mut assessment = Assessment::new_draft(now);
        assessment.lead_professional_name = context.respondent().unwrap_or_default().to_string();
        assessment.lead_professional_role = context.role().unwrap_or_default().to_string();

        tracing::info!(
            child_id = %child.id,
            assessment_id = %assessment.id,
            "assessment started"
        );

        let mut session = Self {
            catalog,
            context,
            child,
            assessment,
        };
        let snapshot = session.snapshot();
        (session, snapshot)
    }

    /// Reopen an existing assessment of `child`.
    pub fn resume(
        catalog: &'c Catalog,
        child: Child,
        assessment_id: Uuid,
        context: SessionContext,
    ) -> Result<Self, SessionError> {
        let assessment = child
            .assessment(assessment_id)
            .cloned()
            .ok_or(SessionError::AssessmentNotFound {
                child_id: child.id,
                assessment_id,
            })?;
        tracing::debug!(child_id = %child.id, %assessment_id, "assessment resumed");
        Ok(Self {
            catalog,
            context,
            child,
            assessment,
        })
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn child(&self) -> &Child {
        &self.child
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    fn ensure_known(&self, question_id: &str) -> Result<(), SessionError> {
        if self.catalog.contains(question_id) {
            Ok(())
        } else {
            Err(SessionError::UnknownQuestion(question_id.to_string()))
        }
    }

    fn snapshot(&mut self) -> Child {
        if self.assessment.lead_professional_name.trim().is_empty()
            && let Some(name) = self.context.respondent()
        {
            self.assessment.lead_professional_name = name.to_string();
        }
        self.child.upsert_assessment(self.assessment.clone());
        self.child.clone()
    }

    /// Score one item as the current respondent, prompting for an identity
    /// when the session has none.
    pub fn record_score(
        &mut self,
        question_id: &str,
        score: ScoreValue,
        now: jiff::Timestamp,
    ) -> Result<Child, SessionError> {
        self.ensure_known(question_id)?;
        let respondent = self.context.resolve_respondent()?;
        scoring::record_score(
            &mut self.assessment.responses,
            question_id,
            score,
            &respondent,
            now,
        )?;
        Ok(self.snapshot())
    }

    /// Score a multi-selection with one shared timestamp. A declined identity
    /// prompt abandons the whole batch.
    pub fn record_batch_score(
        &mut self,
        question_ids: &BTreeSet<String>,
        score: ScoreValue,
        now: jiff::Timestamp,
    ) -> Result<Child, SessionError> {
        for id in question_ids {
            self.ensure_known(id)?;
        }
        let respondent = self.context.resolve_respondent()?;
        scoring::record_batch_score(
            &mut self.assessment.responses,
            question_ids,
            score,
            &respondent,
            now,
        )?;
        Ok(self.snapshot())
    }

    pub fn record_note(&mut self, question_id: &str, note: &str) -> Result<Child, SessionError> {
        self.ensure_known(question_id)?;
        scoring::record_note(&mut self.assessment.responses, question_id, note);
        Ok(self.snapshot())
    }

    pub fn reassign_respondent(
        &mut self,
        question_id: &str,
        respondent_name: &str,
    ) -> Result<Child, SessionError> {
        scoring::reassign_respondent(&mut self.assessment.responses, question_id, respondent_name)?;
        Ok(self.snapshot())
    }

    pub fn set_summary_notes(&mut self, text: &str) -> Child {
        self.assessment.summary_notes = text.to_string();
        self.snapshot()
    }

    /// Record the professional responsible for the assessment. Both values
    /// are remembered for the next session.
    pub fn set_lead_professional(&mut self, name: &str, role: &str) -> Child {
        self.assessment.lead_professional_name = name.trim().to_string();
        self.assessment.lead_professional_role = role.trim().to_string();
        if self.context.respondent().is_none() {
            self.context.set_respondent(name);
        }
        self.context.set_role(role);
        self.snapshot()
    }

    /// Move the assessment to `Completed`. Refused while the lead
    /// professional's name or role is missing.
    pub fn finalize(&mut self) -> Result<Child, SessionError> {
        if self.assessment.is_completed() {
            return Ok(self.snapshot());
        }

        let name = if self.assessment.lead_professional_name.trim().is_empty() {
            self.context.respondent().unwrap_or_default()
        } else {
            self.assessment.lead_professional_name.trim()
        };
        let role = self.assessment.lead_professional_role.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("lead professional name");
        }
        if role.is_empty() {
            missing.push("lead professional role");
        }
        if !missing.is_empty() {
            tracing::info!(
                assessment_id = %self.assessment.id,
                missing = ?missing,
                "finalize rejected"
            );
            return Err(SessionError::FinalizeRejected(format!(
                "missing {}",
                missing.join(" and ")
            )));
        }

        self.assessment.status = AssessmentStatus::Completed;
        tracing::info!(
            child_id = %self.child.id,
            assessment_id = %self.assessment.id,
            responses = self.assessment.responses.len(),
            "assessment finalized"
        );
        Ok(self.snapshot())
    }

    pub fn response(&self, question_id: &str) -> Option<&ResponseItem> {
        self.assessment.responses.get(question_id)
    }

    pub fn area_scores(&self) -> Vec<AreaScore> {
        scoring::compute_area_scores(self.catalog, &self.assessment.responses)
    }

    pub fn area_progress(&self, area: DevelopmentalArea) -> f64 {
        scoring::compute_area_progress(self.catalog, area, &self.assessment.responses)
    }

    pub fn global_progress(&self) -> f64 {
        scoring::compute_global_progress(self.catalog, &self.assessment.responses)
    }

    pub fn contributor_counts(&self) -> BTreeMap<String, usize> {
        scoring::compute_contributor_counts(&self.assessment.responses)
    }
}
