//! Data types exchanged with the Schedule of Classes site.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Term code (e.g. `FA25`) to human-readable label, in document order.
pub type TermMap = IndexMap<String, String>;

/// Department code to department name.
pub type DepartmentMap = IndexMap<String, String>;

/// A `{code, value}` record as served by the department and subject JSON endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeValue {
    pub code: String,
    pub value: String,
}

/// One form control, as a `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Name of the term selector field.
pub const TERM_FIELD: &str = "selectedTerm";
/// Name of the field carrying how many subjects were selected.
pub const SUBJECT_COUNT_FIELD: &str = "_selectedSubjects";
/// Name of the field carrying the joined subject codes.
pub const SUBJECT_LIST_FIELD: &str = "selectedSubjects";
/// Joins subject codes in [`SUBJECT_LIST_FIELD`].
pub const SUBJECT_DELIMITER: &str = ",";

/// Ordered form fields submitted to the results endpoint.
///
/// Built from the menu page's live inputs: any existing term/subject fields
/// are dropped and replaced by the caller's selection at the end, so each
/// reserved name appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePayload(Vec<FormField>);

impl SchedulePayload {
    pub fn new(form_fields: Vec<FormField>, term: &str, subjects: &[impl AsRef<str>]) -> Self {
        let reserved = [TERM_FIELD, SUBJECT_COUNT_FIELD, SUBJECT_LIST_FIELD];
        let mut fields: Vec<FormField> = form_fields
            .into_iter()
            .filter(|f| !reserved.contains(&f.name.as_str()))
            .collect();

        let joined = subjects
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(SUBJECT_DELIMITER);

        fields.push(FormField::new(TERM_FIELD, term));
        fields.push(FormField::new(SUBJECT_COUNT_FIELD, subjects.len().to_string()));
        fields.push(FormField::new(SUBJECT_LIST_FIELD, joined));

        Self(fields)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.0
    }

    /// All values for a field name, in order.
    pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Pairs in the shape `reqwest`'s form encoder expects.
    pub fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
