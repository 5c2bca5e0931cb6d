use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use portage_core::models::DevelopmentalArea;

use crate::data;
use crate::error::CatalogError;

/// One scoring item of the inventory. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub area: DevelopmentalArea,
    /// Age bucket such as `"0-1"` or `"3-4"`. Only used for filtering and display.
    pub age_range_label: String,
    pub description: String,
}

impl Question {
    pub fn new(id: &str, area: DevelopmentalArea, age_range_label: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            area,
            age_range_label: age_range_label.to_string(),
            description: description.to_string(),
        }
    }
}

/// An ordered set of areas and the questions that belong to them.
#[derive(Debug, Clone)]
pub struct Catalog {
    areas: Vec<DevelopmentalArea>,
    questions: Vec<Question>,
}

static PORTAGE: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    areas: DevelopmentalArea::ALL.to_vec(),
    questions: data::portage_questions(),
});

impl Catalog {
    /// The built-in Portage checklist, loaded once per process.
    pub fn portage() -> &'static Catalog {
        &PORTAGE
    }

    /// Build a catalog whose areas are the distinct areas of `questions`, in
    /// order of first appearance.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut areas = Vec::new();
        for q in &questions {
            if !areas.contains(&q.area) {
                areas.push(q.area);
            }
        }
        Self::with_areas(areas, questions)
    }

    /// Build a catalog with an explicit area order. Declared areas may have
    /// no questions; every question's area must be declared.
    pub fn with_areas(
        areas: Vec<DevelopmentalArea>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion(q.id.clone()));
            }
            if !areas.contains(&q.area) {
                return Err(CatalogError::UndeclaredArea {
                    question_id: q.id.clone(),
                    area: q.area.id().to_string(),
                });
            }
        }
        let mut unique_areas = Vec::with_capacity(areas.len());
        for area in areas {
            if !unique_areas.contains(&area) {
                unique_areas.push(area);
            }
        }
        Ok(Self {
            areas: unique_areas,
            questions,
        })
    }

    pub fn areas(&self) -> &[DevelopmentalArea] {
        &self.areas
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn questions_in(&self, area: DevelopmentalArea) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.area == area)
    }

    /// Distinct age-range labels of an area, in catalog order.
    pub fn age_ranges(&self, area: DevelopmentalArea) -> Vec<&str> {
        let mut ranges: Vec<&str> = Vec::new();
        for q in self.questions_in(area) {
            if !ranges.contains(&q.age_range_label.as_str()) {
                ranges.push(&q.age_range_label);
            }
        }
        ranges
    }

    /// Questions of an area, optionally narrowed to one age-range label.
    pub fn filter(&self, area: DevelopmentalArea, age_range: Option<&str>) -> Vec<&Question> {
        self.questions_in(area)
            .filter(|q| age_range.is_none_or(|label| q.age_range_label == label))
            .collect()
    }
}
