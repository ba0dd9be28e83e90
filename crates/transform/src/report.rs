//! Per-field transform report.

use serde::Serialize;

/// What happened to one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Written unchanged (scalar or scalar-only list).
    Passed,
    /// Dropped because it is an audit field.
    OmittedAudit,
    /// Dropped because the value was null.
    OmittedNull,
    /// Dropped because nothing was left to write after cleaning.
    OmittedEmpty,
    /// Written as a bare id reference.
    Connected,
    /// Written as a to-one create.
    Created,
    /// Written as a to-one update.
    Updated,
    /// Written as a to-many create/update split.
    Many {
        /// Items in the create bucket
        created: usize,
        /// Items in the update bucket
        updated: usize,
    },
    /// A caller-built envelope, re-cleaned.
    Reenveloped,
    /// A list mixing objects and non-objects, written unchanged.
    PassedThroughMixedList,
}

impl FieldOutcome {
    /// Does the field appear in the output?
    pub fn is_written(&self) -> bool {
        !matches!(
            self,
            FieldOutcome::OmittedAudit | FieldOutcome::OmittedNull | FieldOutcome::OmittedEmpty
        )
    }
}

/// Outcome of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// Input key
    pub field: String,
    /// What was done with it
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

/// Outcomes of every input field, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// One entry per input key
    pub fields: Vec<FieldReport>,
}

impl TransformReport {
    pub(crate) fn record(&mut self, field: &str, outcome: FieldOutcome) {
        self.fields.push(FieldReport {
            field: field.to_string(),
            outcome,
        });
    }

    /// Outcome for a field, if it was in the input.
    pub fn outcome(&self, field: &str) -> Option<FieldOutcome> {
        self.fields
            .iter()
            .find(|r| r.field == field)
            .map(|r| r.outcome)
    }

    /// Fields whose lists mixed objects and non-objects.
    pub fn mixed_lists(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|r| r.outcome == FieldOutcome::PassedThroughMixedList)
            .map(|r| r.field.as_str())
            .collect()
    }

    /// Fields left out of the output.
    pub fn omitted(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|r| !r.outcome.is_written())
            .map(|r| r.field.as_str())
            .collect()
    }
}
