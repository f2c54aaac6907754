//! Note editor tool wiring
//!
//! The block editor on the notes page is configured from JSON: each entry maps
//! a tool key to the plugin class the page registers under that name, either
//! bare (`"header": "Header"`) or with options
//! (`"list": { "class": "List", "inlineToolbar": true }`).

use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EditorTool {
    /// Key the editor knows the tool by.
    pub name: &'static str,
    /// Plugin class name on the page.
    pub class: &'static str,
    #[serde(rename = "inlineToolbar")]
    pub inline_toolbar: bool,
}

impl EditorTool {
    const fn plain(name: &'static str, class: &'static str) -> Self {
        Self { name, class, inline_toolbar: false }
    }

    const fn with_toolbar(name: &'static str, class: &'static str) -> Self {
        Self { name, class, inline_toolbar: true }
    }

    fn to_value(self) -> Value {
        if !self.inline_toolbar {
            return Value::String(self.class.to_string());
        }
        let mut entry = Map::new();
        entry.insert("class".to_string(), Value::String(self.class.to_string()));
        entry.insert("inlineToolbar".to_string(), Value::Bool(true));
        Value::Object(entry)
    }
}

const TOOLS: [EditorTool; 11] = [
    EditorTool::plain("header", "Header"),
    EditorTool::with_toolbar("checklist", "Checklist"),
    EditorTool::plain("code", "CodeTool"),
    EditorTool::plain("inlineCode", "InlineCode"),
    EditorTool::plain("delimiter", "Delimiter"),
    EditorTool::plain("embed", "Embed"),
    EditorTool::with_toolbar("list", "List"),
    EditorTool::plain("Marker", "Marker"),
    EditorTool::with_toolbar("table", "Table"),
    EditorTool::plain("underline", "Underline"),
    EditorTool::plain("quote", "Quote"),
];

/// Tools enabled in the note editor, in registration order.
pub fn note_editor_tools() -> &'static [EditorTool] {
    &TOOLS
}

/// Editor config as `{ "tools": { key: entry, ... } }`.
pub fn note_editor_config() -> Value {
    let tools: Map<String, Value> = note_editor_tools()
        .iter()
        .map(|tool| (tool.name.to_string(), tool.to_value()))
        .collect();
    let mut config = Map::new();
    config.insert("tools".to_string(), Value::Object(tools));
    Value::Object(config)
}

#[wasm_bindgen]
pub fn note_editor_tools_json() -> Result<String, JsValue> {
    serde_json::to_string(&note_editor_config()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eleven_tools_with_unique_keys() {
        let tools = note_editor_tools();
        assert_eq!(tools.len(), 11);
        let mut names: Vec<_> = tools.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_only_checklist_list_table_have_inline_toolbar() {
        let with_toolbar: Vec<_> = note_editor_tools()
            .iter()
            .filter(|t| t.inline_toolbar)
            .map(|t| t.name)
            .collect();
        assert_eq!(with_toolbar, vec!["checklist", "list", "table"]);
    }

    #[test]
    fn test_config_shape() {
        let config = note_editor_config();
        let tools = &config["tools"];
        assert_eq!(tools["header"], Value::String("Header".into()));
        assert_eq!(tools["code"], Value::String("CodeTool".into()));
        assert_eq!(tools["Marker"], Value::String("Marker".into()));
        assert_eq!(tools["table"]["class"], Value::String("Table".into()));
        assert_eq!(tools["table"]["inlineToolbar"], Value::Bool(true));
        assert!(tools["quote"].is_string());
    }

    #[test]
    fn test_json_export_parses_back() {
        let json = note_editor_tools_json().expect("json");
        let parsed: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, note_editor_config());
    }
}
