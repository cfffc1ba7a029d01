//! Pathfinder 2e: name (shown with trait tags) and creature level.

use serde_json::Value;
use summons_model::DocWrapper;
use summons_types::Localizer;

use super::escape_html;
use crate::column::ColumnDefinition;

pub const LEVEL_POINTER: &str = "/system/details/level/value";

/// Trait tags as `<span class="tag">` markup, in trait order.
pub fn traits(creature: &DocWrapper) -> String {
    creature
        .traits()
        .into_iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
        .collect()
}

/// Name line followed by the trait tag row.
pub fn name_with_traits(creature: &DocWrapper) -> String {
    format!(
        r#"<div>{}</div><div class="justify-center tags">{}</div>"#,
        escape_html(creature.name()),
        traits(creature)
    )
}

pub fn columns(localizer: &dyn Localizer) -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new(localizer.localize("fs.menu.headers.name"), |w: &DocWrapper| {
            Some(Value::String(w.name().to_string()))
        })
        .with_render(name_with_traits),
        ColumnDefinition::pointer(localizer.localize("fs.menu.headers.level"), LEVEL_POINTER),
    ]
}
