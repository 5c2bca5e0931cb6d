use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::assessment::Assessment;

pub const NO_CONDITION: &str = "None";

fn default_condition() -> String {
    NO_CONDITION.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    Other,
}

/// Demographic fields a clinician can edit after registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildProfile {
    pub name: String,
    pub birth_date: jiff::civil::Date,
    pub gender: Gender,
    pub guardian_name: String,
    pub condition: String,
}

/// A patient record. Owns its assessments exclusively: removing the child
/// removes every assessment with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Child {
    pub id: Uuid,
    pub name: String,
    pub birth_date: jiff::civil::Date,
    pub gender: Gender,
    #[serde(default)]
    pub guardian_name: String,
    #[serde(default = "default_condition")]
    pub condition: String,
    #[serde(default)]
    pub clinical_history: String,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Child {
    /// Register a new child with a fresh id, empty history and no assessments.
    /// A blank condition is stored as `"None"`.
    pub fn register(profile: ChildProfile) -> Self {
        let mut child = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            birth_date: profile.birth_date,
            gender: profile.gender,
            guardian_name: String::new(),
            condition: default_condition(),
            clinical_history: String::new(),
            assessments: Vec::new(),
        };
        child.apply_profile(profile);
        child
    }

    pub fn apply_profile(&mut self, profile: ChildProfile) {
        self.name = profile.name;
        self.birth_date = profile.birth_date;
        self.gender = profile.gender;
        self.guardian_name = profile.guardian_name;
        self.condition = if profile.condition.trim().is_empty() {
            default_condition()
        } else {
            profile.condition
        };
    }

    /// True when a diagnosis label other than the "None" default is recorded.
    pub fn has_condition(&self) -> bool {
        let condition = self.condition.trim();
        !condition.is_empty() && condition != NO_CONDITION
    }

    pub fn assessment(&self, id: Uuid) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.id == id)
    }

    /// Insert the assessment, or replace the one with the same id.
    pub fn upsert_assessment(&mut self, assessment: Assessment) {
        match self.assessments.iter_mut().find(|a| a.id == assessment.id) {
            Some(existing) => *existing = assessment,
            None => self.assessments.push(assessment),
        }
    }

    /// Assessments newest first. Storage order carries no meaning.
    pub fn assessments_by_date_desc(&self) -> Vec<&Assessment> {
        let mut sorted: Vec<&Assessment> = self.assessments.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Completed assessments newest first, for read-only history.
    pub fn completed_assessments(&self) -> Vec<&Assessment> {
        self.assessments_by_date_desc()
            .into_iter()
            .filter(|a| a.is_completed())
            .collect()
    }

    pub fn latest_assessment(&self) -> Option<&Assessment> {
        self.assessments.iter().max_by_key(|a| a.date)
    }
}
