//! Prompt for the narrative generator.

use jiff::Unit;
use jiff::civil::Date;
use serde::Serialize;

use portage_core::models::Child;
use portage_instruments::AreaScore;

use crate::error::NarrativeError;
use crate::render::render;

const TEMPLATE: &str = r#"As a senior specialist in child development and neurodiversity, analyse the Portage Inventory results of the child below.

Name: {{ name }}
Age: {{ age }}
Diagnosis/Condition: {{ condition }}
Clinical history: {{ clinical_history }}
{% if team %}
Multi-professional team involved: {{ team }}.
{% endif %}{% if condition_context %}
The child has been diagnosed with: {{ condition }}. Adapt your suggestions and analysis to the typical characteristics of this condition (for example muscular hypotonia, speech delays, or specific strengths).
{% endif %}
Results by area:
{% for line in score_lines %}{{ line }}
{% endfor %}
Please write a detailed clinical report with the following structure:
1. **General Profile**: current performance against chronological age.
2. **Analysis by Area**: what has been achieved and what is emerging.
3. **Specific Adaptations**: how the diagnosis influences these results and which adaptations are needed.
4. **Stimulation Plan**: 5 practical, playful activities focused on the areas with the largest gaps.

Answer in rich Markdown. Use bold for emphasis.
"#;

#[derive(Serialize)]
struct PromptData<'a> {
    name: &'a str,
    age: String,
    condition: &'a str,
    clinical_history: &'a str,
    team: Option<String>,
    condition_context: bool,
    score_lines: Vec<String>,
}

/// Completed years and months between `birth` and `today`. Zero when the
/// birth date lies in the future.
pub fn age_in_years_and_months(birth: Date, today: Date) -> (i16, i32) {
    if today <= birth {
        return (0, 0);
    }
    match birth.until((Unit::Year, today)) {
        Ok(span) => (span.get_years(), span.get_months()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to compute age");
            (0, 0)
        }
    }
}

pub fn format_age(birth: Date, today: Date) -> String {
    let (years, months) = age_in_years_and_months(birth, today);
    let years_unit = if years == 1 { "year" } else { "years" };
    let months_unit = if months == 1 { "month" } else { "months" };
    format!("{years} {years_unit} and {months} {months_unit}")
}

/// `label: pct% (score/total)` with one decimal on the percentage.
pub fn score_line(score: &AreaScore) -> String {
    format!(
        "{}: {:.1}% ({}/{})",
        score.label, score.percentage, score.score, score.total
    )
}

/// Build the generator prompt for one assessment. `contributors` are the
/// distinct respondent names of its recorded items; `today` fixes the age.
pub fn build_prompt(
    child: &Child,
    scores: &[AreaScore],
    contributors: &[String],
    today: Date,
) -> Result<String, NarrativeError> {
    let clinical_history = child.clinical_history.trim();
    let data = PromptData {
        name: &child.name,
        age: format_age(child.birth_date, today),
        condition: &child.condition,
        clinical_history: if clinical_history.is_empty() {
            "Not provided"
        } else {
            clinical_history
        },
        team: (!contributors.is_empty()).then(|| contributors.join(", ")),
        condition_context: child.has_condition(),
        score_lines: scores.iter().map(score_line).collect(),
    };
    render("prompt", TEMPLATE, &data)
}
