use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::response::Responses;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentStatus {
    #[default]
    Draft,
    Completed,
}

/// One evaluation pass over the inventory for one child.
///
/// `status` only ever moves from `Draft` to `Completed`; only completed
/// assessments are eligible for narrative reports and historical display.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub date: jiff::Timestamp,
    pub lead_professional_name: String,
    pub lead_professional_role: String,
    pub responses: Responses,
    pub status: AssessmentStatus,
    pub summary_notes: String,
}

/// Stored shape of an assessment. Older collections name the lead
/// professional fields `professionalName` and `professionalRole`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAssessment {
    id: Uuid,
    date: jiff::Timestamp,
    #[serde(default, alias = "professionalName")]
    lead_professional_name: String,
    #[serde(default, alias = "professionalRole")]
    lead_professional_role: String,
    #[serde(default)]
    responses: Responses,
    #[serde(default)]
    status: AssessmentStatus,
    #[serde(default)]
    summary_notes: String,
}

impl From<StoredAssessment> for Assessment {
    fn from(stored: StoredAssessment) -> Self {
        Self {
            id: stored.id,
            date: stored.date,
            lead_professional_name: stored.lead_professional_name,
            lead_professional_role: stored.lead_professional_role,
            responses: stored.responses,
            status: stored.status,
            summary_notes: stored.summary_notes,
        }
    }
}

impl<'de> Deserialize<'de> for Assessment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StoredAssessment::deserialize(deserializer).map(Self::from)
    }
}

impl Assessment {
    /// A fresh draft with no responses.
    pub fn new_draft(date: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            lead_professional_name: String::new(),
            lead_professional_role: String::new(),
            responses: Responses::new(),
            status: AssessmentStatus::Draft,
            summary_notes: String::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssessmentStatus::Completed
    }
}
