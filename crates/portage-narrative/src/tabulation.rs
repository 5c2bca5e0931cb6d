use serde::Serialize;

use portage_instruments::AreaScore;

use crate::error::NarrativeError;
use crate::render::render;

const TEMPLATE: &str = "| Area | Points | % |
|---|---|---|
{% for row in rows %}| {{ row.label }} | {{ row.points }} | {{ row.percent }}% |
{% endfor %}";

#[derive(Serialize)]
struct Row {
    label: String,
    points: String,
    percent: String,
}

#[derive(Serialize)]
struct Table {
    rows: Vec<Row>,
}

/// Markdown table of area scores: label, points over total, and the
/// percentage rounded to a whole number.
pub fn results_table(scores: &[AreaScore]) -> Result<String, NarrativeError> {
    let rows = scores
        .iter()
        .map(|s| Row {
            label: s.label.replace('|', "\\|"),
            points: format!("{}/{}", s.score, s.total),
            percent: format!("{:.0}", s.percentage),
        })
        .collect();
    render("results_table", TEMPLATE, &Table { rows })
}
