use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Structured CV evaluation returned by the model and relayed to the caller.
///
/// The schema marks nothing as required and the model is not always exact
/// about types, so every field tolerates absence, `null`, and numbers sent as
/// strings. Keys outside the schema are kept in `extra` and relayed as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvReview {
    #[serde(deserialize_with = "lenient_number")]
    pub overall_score: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub scores: Scores,
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
    #[serde(deserialize_with = "null_as_default")]
    pub strengths: Vec<Strength>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Keywords,
    #[serde(deserialize_with = "null_as_default")]
    pub line_by_line: Vec<SectionNote>,
    #[serde(deserialize_with = "null_as_default")]
    pub action_plan: Vec<ActionStep>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sub-scores, each 0 – 100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scores {
    #[serde(deserialize_with = "lenient_number")]
    pub ats: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub format: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub content: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub impact: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    /// "High" | "Medium" | "Low", in the review language
    #[serde(deserialize_with = "lenient_text")]
    pub impact: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strength {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    #[serde(deserialize_with = "lenient_text_list")]
    pub well_used: Vec<String>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub missing: Vec<String>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub suggestions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionNote {
    #[serde(deserialize_with = "lenient_text")]
    pub section: String,
    #[serde(deserialize_with = "lenient_text")]
    pub whats_working: String,
    #[serde(deserialize_with = "lenient_text")]
    pub needs_improvement: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionStep {
    #[serde(deserialize_with = "lenient_number")]
    pub week: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub focus: String,
    #[serde(deserialize_with = "lenient_text_list")]
    pub steps: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a number, a numeric string, or `null`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(value_to_text)
        .unwrap_or_default())
}

/// Accepts an array of scalars, a single string, or `null`.
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_text).collect(),
        Some(other) => value_to_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}
