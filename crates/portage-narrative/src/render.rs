use serde::Serialize;
use tera::{Context, Tera};

use crate::error::NarrativeError;

/// Render a one-off Tera template with any serializable value as context.
pub(crate) fn render<T: Serialize>(
    name: &str,
    template: &str,
    data: &T,
) -> Result<String, NarrativeError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, template)
        .map_err(|e| NarrativeError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(data)?;
    let context =
        Context::from_value(value).map_err(|e| NarrativeError::TemplateRender(e.to_string()))?;

    Ok(tera.render(name, &context)?)
}
