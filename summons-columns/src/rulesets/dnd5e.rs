//! D&D 5e: name and challenge rating.

use serde_json::Value;
use summons_model::DocWrapper;
use summons_types::Localizer;

use crate::column::ColumnDefinition;

pub const CR_POINTER: &str = "/system/details/cr";

pub fn columns(localizer: &dyn Localizer) -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new(localizer.localize("fs.menu.headers.name"), |w: &DocWrapper| {
            Some(Value::String(w.name().to_string()))
        }),
        ColumnDefinition::pointer(localizer.localize("fs.menu.headers.cr"), CR_POINTER),
    ]
}
