//! Field-level metadata
//!
//! Each entity field may carry two independent bags: how to render it in a
//! form, and how to show it as a table column.

use nestwrite_core::JsonPath;
use serde::{Deserialize, Serialize};

/// Input widget used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputWidget {
    /// Single-line text (default).
    #[default]
    Text,
    /// Multi-line text.
    Textarea,
    /// Numeric input.
    Number,
    /// Date picker.
    Date,
    /// Checkbox.
    Checkbox,
    /// Toggle switch.
    Switch,
    /// Select from a fixed list.
    Select,
    /// Select whose options are fetched from an endpoint.
    AsyncSelect,
    /// Not shown, but submitted.
    Hidden,
}

impl InputWidget {
    /// Does this widget need an [`OptionSource`]?
    pub fn needs_options(&self) -> bool {
        matches!(self, InputWidget::AsyncSelect)
    }
}

fn default_label_key() -> String {
    "name".to_string()
}

fn default_value_key() -> String {
    "id".to_string()
}

/// Where a relation field fetches its candidate options from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSource {
    /// Endpoint listing candidates
    pub endpoint: String,
    /// Key shown as the option label
    #[serde(default = "default_label_key")]
    pub label_key: String,
    /// Key submitted as the option value
    #[serde(default = "default_value_key")]
    pub value_key: String,
}

/// How a field renders in a form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldMeta {
    /// Widget kind
    #[serde(default)]
    pub widget: InputWidget,
    /// Field label
    pub label: String,
    /// Placeholder text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text under the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Section key; `None` puts the field in the default section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Must be filled before submitting
    #[serde(default)]
    pub required: bool,
    /// Candidate options for relation widgets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSource>,
}

/// How a field shows as a table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnMeta {
    /// Column header
    pub header: String,
    /// Path to the displayed value, e.g. `organizationNode.name`
    pub accessor: JsonPath,
    /// Named custom cell renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
}

/// Both metadata bags of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldLevelMeta {
    /// Form rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormFieldMeta>,
    /// Table rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableColumnMeta>,
}

/// A named field with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in payloads
    pub name: String,
    /// Metadata
    #[serde(flatten)]
    pub meta: FieldLevelMeta,
}

impl FieldDef {
    /// Is the field required in forms?
    pub fn is_required(&self) -> bool {
        self.meta.form.as_ref().is_some_and(|f| f.required)
    }
}
