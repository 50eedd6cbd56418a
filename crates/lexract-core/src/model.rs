use crate::error::AnalysisError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which record layout a generation call asks for and is parsed as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Lists of discrete items per category, bullet-list executive summary.
    #[default]
    Structured,
    /// One free-text summary per category, Markdown executive summary.
    Narrative,
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordShape::Structured => write!(f, "structured"),
            RecordShape::Narrative => write!(f, "narrative"),
        }
    }
}

impl FromStr for RecordShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "structured" | "v1" => Ok(RecordShape::Structured),
            "narrative" | "v2" => Ok(RecordShape::Narrative),
            other => Err(format!(
                "unknown record shape '{other}' (expected 'structured' or 'narrative')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislativeSection {
    pub section_number: String,
    pub title: String,
    pub content_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityCriterion {
    pub criteria: String,
    /// e.g. "Age", "Income". Empty when the document gives none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

impl EligibilityCriterion {
    /// Category for display; "General" when none was given.
    pub fn display_category(&self) -> &str {
        if self.category.trim().is_empty() {
            "General"
        } else {
            &self.category
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub entitlement_name: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKeepingRequirement {
    pub requirement: String,
    /// How long records must be kept. Empty when not specified.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
}

/// Category content as lists of discrete items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<Definition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<LegislativeSection>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eligibility: Vec<EligibilityCriterion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entitlements: Vec<Entitlement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub record_keeping: Vec<RecordKeepingRequirement>,
}

/// Category content as one free-text summary each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub purpose: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<Definition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eligibility: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub obligations: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub penalties: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub record_keeping: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordBody {
    Structured(StructuredBody),
    Narrative(NarrativeBody),
}

impl RecordBody {
    pub fn shape(&self) -> RecordShape {
        match self {
            RecordBody::Structured(_) => RecordShape::Structured,
            RecordBody::Narrative(_) => RecordShape::Narrative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExecutiveSummary {
    Bullets(Vec<String>),
    Markdown(String),
}

impl Default for ExecutiveSummary {
    fn default() -> Self {
        ExecutiveSummary::Bullets(Vec::new())
    }
}

impl ExecutiveSummary {
    /// Summary points as plain bullet texts, whichever form the model used.
    ///
    /// Markdown blocks are split into lines. A leading `-`, `*` or `•`
    /// followed by whitespace is a marker and gets removed, in list items
    /// too. Blank entries are dropped.
    pub fn bullets(&self) -> Vec<String> {
        match self {
            ExecutiveSummary::Bullets(points) => points
                .iter()
                .map(|p| strip_bullet_marker(p))
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            ExecutiveSummary::Markdown(block) => block
                .lines()
                .map(strip_bullet_marker)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bullets().is_empty()
    }
}

/// `**Bold**` openings are not markers; only a marker followed by
/// whitespace or the end of the line is.
fn strip_bullet_marker(line: &str) -> &str {
    let line = line.trim();
    for marker in ['-', '*', '•'] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    line
}

/// Structured content extracted from one legal document.
///
/// Built once per analysis and never modified afterwards; fields are only
/// reachable through accessors. Serializes to the same flat JSON layout the
/// generation service returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalRecord {
    document_title: String,
    #[serde(flatten)]
    body: RecordBody,
    executive_summary: ExecutiveSummary,
}

#[derive(Deserialize)]
struct StructuredWire {
    document_title: String,
    #[serde(flatten)]
    body: StructuredBody,
    #[serde(default, deserialize_with = "null_as_default")]
    executive_summary: Vec<String>,
}

#[derive(Deserialize)]
struct NarrativeWire {
    document_title: String,
    #[serde(flatten)]
    body: NarrativeBody,
    #[serde(default, deserialize_with = "null_as_default")]
    executive_summary: String,
}

impl LegalRecord {
    pub fn new(
        document_title: impl Into<String>,
        body: RecordBody,
        executive_summary: ExecutiveSummary,
    ) -> Self {
        Self {
            document_title: document_title.into(),
            body,
            executive_summary,
        }
    }

    /// Parse and validate a generation response as a record of `shape`.
    ///
    /// `document_title` is the only required field; every other field falls
    /// back to an empty list or empty string when missing or null.
    pub fn from_json(json: &str, shape: RecordShape) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        Self::from_value(value, shape)
    }

    pub fn from_value(value: Value, shape: RecordShape) -> Result<Self, AnalysisError> {
        let invalid = |e: serde_json::Error| AnalysisError::Validation(e.to_string());
        match shape {
            RecordShape::Structured => {
                let wire: StructuredWire = serde_json::from_value(value).map_err(invalid)?;
                Ok(Self::new(
                    wire.document_title,
                    RecordBody::Structured(wire.body),
                    ExecutiveSummary::Bullets(wire.executive_summary),
                ))
            }
            RecordShape::Narrative => {
                let wire: NarrativeWire = serde_json::from_value(value).map_err(invalid)?;
                Ok(Self::new(
                    wire.document_title,
                    RecordBody::Narrative(wire.body),
                    ExecutiveSummary::Markdown(wire.executive_summary),
                ))
            }
        }
    }

    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    pub fn body(&self) -> &RecordBody {
        &self.body
    }

    pub fn shape(&self) -> RecordShape {
        self.body.shape()
    }

    pub fn executive_summary(&self) -> &ExecutiveSummary {
        &self.executive_summary
    }

    pub fn definitions(&self) -> &[Definition] {
        match &self.body {
            RecordBody::Structured(b) => &b.definitions,
            RecordBody::Narrative(b) => &b.definitions,
        }
    }

    pub fn sections(&self) -> &[LegislativeSection] {
        match &self.body {
            RecordBody::Structured(b) => &b.sections,
            RecordBody::Narrative(_) => &[],
        }
    }

    pub fn eligibility(&self) -> &[EligibilityCriterion] {
        match &self.body {
            RecordBody::Structured(b) => &b.eligibility,
            RecordBody::Narrative(_) => &[],
        }
    }

    pub fn entitlements(&self) -> &[Entitlement] {
        match &self.body {
            RecordBody::Structured(b) => &b.entitlements,
            RecordBody::Narrative(_) => &[],
        }
    }

    pub fn record_keeping(&self) -> &[RecordKeepingRequirement] {
        match &self.body {
            RecordBody::Structured(b) => &b.record_keeping,
            RecordBody::Narrative(_) => &[],
        }
    }

    /// The record without `document_title` and `executive_summary`.
    pub fn raw_data(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(ref mut map) = value {
            map.remove("document_title");
            map.remove("executive_summary");
        }
        Ok(value)
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
