use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One time-bounded span of transcribed speech.
///
/// Every field defaults when absent so that a sparse or partially-populated
/// upstream response still formats cleanly instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Transcribed text for this span.
    #[serde(default)]
    pub text: String,

    /// Start of the span, in seconds.
    #[serde(default)]
    pub start: f64,

    /// End of the span, in seconds.
    #[serde(default)]
    pub end: f64,
}

/// The raw response of an Audion `flow` call.
///
/// The response is treated as opaque except for one path:
/// `content.output.utterances[]`. Keeping the full value around means the
/// `json` output format is a true identity transform, and any upstream fields
/// we do not interpret pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptionResult {
    raw: Value,
}

impl TranscriptionResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The raw upstream value, unchanged.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }

    /// Extract the ordered utterance sequence.
    ///
    /// Absent or malformed nested data yields an empty sequence, never an
    /// error. Individual utterances missing fields deserialize with defaults;
    /// an utterance that is not an object at all becomes an empty default.
    pub fn utterances(&self) -> Vec<Utterance> {
        let Some(items) = self
            .raw
            .pointer("/content/output/utterances")
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
            .collect()
    }
}

impl From<Value> for TranscriptionResult {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}
