//! Normalization registry
//!
//! Each [`IngestKind`] declares a [`KindSchema`]: an ordered list of field
//! rules that bring a payload into the shape the downstream consumer reads.
//! The schema table is the single place the per-kind policy lives; adding a
//! kind means adding a variant and an arm in [`IngestKind::schema`], which
//! the compiler forces to be exhaustive.
//!
//! Normalization is a pure, total function of `(kind, payload)`. Missing
//! optional keys degrade to defaults, never to errors.
//!
//! | Policy | Effect on `payload[key]` |
//! |--------|--------------------------|
//! | `Stringify` | Value replaced by its canonical JSON text unless it is already JSON text; absent stays absent |
//! | `CoerceList` | Absent/null → `[]`, list kept, anything else → `[value]` |
//! | `KeepObjects` | Only object elements of the list survive; non-list → `[]` |
//! | `Rebuild` | Like `KeepObjects`, then each element is rebuilt to a fixed record |

use crate::error::{json_type_name, LedgerError, LedgerResult};
use crate::json::{is_truthy, to_canonical_text};
use crate::kind::IngestKind;
use serde_json::{Map, Value};

/// A JSON object payload.
pub type Payload = Map<String, Value>;

/// Fixed sub-schema for elements of a rebuilt collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Name field, kept when truthy
    pub name_field: &'static str,
    /// Field the name falls back to
    pub name_fallback: &'static str,
    /// Free-text paragraph field, `null` when absent
    pub text_field: &'static str,
    /// List field, `[]` when absent
    pub list_field: &'static str,
    /// Field stored as canonical JSON text, `"{}"` when absent
    pub encoded_field: &'static str,
}

/// How one field of a payload is corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Store the value as canonical JSON text
    Stringify,
    /// Ensure the value is a list
    CoerceList,
    /// Drop non-object list elements
    KeepObjects,
    /// Drop non-object list elements and rebuild the rest
    Rebuild(&'static RecordSchema),
}

/// A field name paired with its policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Top-level key in the payload
    pub key: &'static str,
    /// Correction applied to that key
    pub policy: FieldPolicy,
}

/// The canonical-shape declaration of a kind.
///
/// Rules are applied in order. An empty rule list is a passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSchema {
    /// Field rules, applied in order
    pub rules: &'static [FieldRule],
}

impl KindSchema {
    /// True if the kind stores payloads unmodified.
    pub fn is_passthrough(&self) -> bool {
        self.rules.is_empty()
    }
}

const fn stringify(key: &'static str) -> FieldRule {
    FieldRule {
        key,
        policy: FieldPolicy::Stringify,
    }
}

const fn coerce_list(key: &'static str) -> FieldRule {
    FieldRule {
        key,
        policy: FieldPolicy::CoerceList,
    }
}

// =============================================================================
// Schema table
// =============================================================================

static REP_ANALYSIS_RECORD: RecordSchema = RecordSchema {
    name_field: "repName",
    name_fallback: "name",
    text_field: "summaryParagraph",
    list_field: "bulletPoints",
    encoded_field: "metrics",
};

static REP_INSIGHT_RECORD: RecordSchema = RecordSchema {
    name_field: "repName",
    name_fallback: "name",
    text_field: "analysisParagraph",
    list_field: "bulletPoints",
    encoded_field: "dealFlags",
};

static WEIGHTED_PIPELINE: KindSchema = KindSchema {
    rules: &[
        stringify("weightedWeekTables"),
        stringify("topMovers"),
        stringify("totals"),
        stringify("aiAnalysis"),
    ],
};

static PIPELINE_PROGRESSION: KindSchema = KindSchema {
    rules: &[stringify("chartData")],
};

static WON_LOST_ANALYSIS: KindSchema = KindSchema {
    rules: &[
        stringify("won_lost_summary"),
        stringify("tables"),
        stringify("chart_data"),
    ],
};

static REP_OVERVIEWS: KindSchema = KindSchema {
    rules: &[stringify("reps")],
};

static REP_ANALYSIS_FOCUS: KindSchema = KindSchema {
    rules: &[stringify("representatives")],
};

static REP_ANALYSES: KindSchema = KindSchema {
    rules: &[FieldRule {
        key: "analyses",
        policy: FieldPolicy::Rebuild(&REP_ANALYSIS_RECORD),
    }],
};

static REP_INSIGHTS: KindSchema = KindSchema {
    rules: &[FieldRule {
        key: "insights",
        policy: FieldPolicy::Rebuild(&REP_INSIGHT_RECORD),
    }],
};

static PIPELINE_DEALS: KindSchema = KindSchema {
    rules: &[coerce_list("deals")],
};

static PASSTHROUGH: KindSchema = KindSchema { rules: &[] };

static PIPELINE_STAGES: KindSchema = KindSchema {
    rules: &[coerce_list("stages")],
};

static TEAM_PERFORMANCE: KindSchema = KindSchema {
    rules: &[coerce_list("members")],
};

static REP_RGA_DATA: KindSchema = KindSchema {
    rules: &[stringify("tableByRep")],
};

static PIPELINE_DEVELOPMENT: KindSchema = KindSchema {
    rules: &[
        FieldRule {
            key: "insights",
            policy: FieldPolicy::KeepObjects,
        },
        stringify("totals"),
    ],
};

impl IngestKind {
    /// The canonical-shape declaration for this kind.
    pub fn schema(&self) -> &'static KindSchema {
        match self {
            IngestKind::TotalPipelineOverview
            | IngestKind::TotalDealValuePipeline
            | IngestKind::QualificationWeightedPipeline => &WEIGHTED_PIPELINE,
            IngestKind::PipelineProgression => &PIPELINE_PROGRESSION,
            IngestKind::WonLostAnalysis => &WON_LOST_ANALYSIS,
            IngestKind::RepOverviews => &REP_OVERVIEWS,
            IngestKind::RepAnalysisFocus => &REP_ANALYSIS_FOCUS,
            IngestKind::RepAnalyses => &REP_ANALYSES,
            IngestKind::RepInsights => &REP_INSIGHTS,
            IngestKind::PipelineDeals => &PIPELINE_DEALS,
            IngestKind::PipelineMetrics => &PASSTHROUGH,
            IngestKind::PipelineStages => &PIPELINE_STAGES,
            IngestKind::TeamPerformance => &TEAM_PERFORMANCE,
            IngestKind::RepRgaData => &REP_RGA_DATA,
            IngestKind::PipelineDevelopment => &PIPELINE_DEVELOPMENT,
        }
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a payload for its kind.
///
/// # Examples
///
/// ```
/// use runledger_core::{normalize, IngestKind};
/// use serde_json::json;
///
/// let payload = json!({"deals": {"id": 1}}).as_object().unwrap().clone();
/// let out = normalize(IngestKind::PipelineDeals, payload);
/// assert_eq!(out["deals"], json!([{"id": 1}]));
/// ```
pub fn normalize(kind: IngestKind, mut payload: Payload) -> Payload {
    for rule in kind.schema().rules {
        apply_rule(rule, &mut payload);
    }
    payload
}

/// Normalize a payload whose kind is still a raw string.
///
/// Fails with `UnsupportedKind` for names outside the enumeration.
pub fn normalize_named(kind: &str, payload: Payload) -> LedgerResult<Payload> {
    let kind: IngestKind = kind.parse()?;
    Ok(normalize(kind, payload))
}

/// Normalize an arbitrary JSON value, which must be an object.
pub fn normalize_value(kind: IngestKind, payload: Value) -> LedgerResult<Payload> {
    match payload {
        Value::Object(map) => Ok(normalize(kind, map)),
        other => Err(LedgerError::validation(format!(
            "payload must be an object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn apply_rule(rule: &FieldRule, payload: &mut Payload) {
    match rule.policy {
        FieldPolicy::Stringify => {
            if let Some(value) = payload.get_mut(rule.key) {
                encode_in_place(value);
            }
        }
        FieldPolicy::CoerceList => {
            let coerced = match payload.get_mut(rule.key).map(Value::take) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items,
                Some(other) => vec![other],
            };
            payload.insert(rule.key.to_string(), Value::Array(coerced));
        }
        FieldPolicy::KeepObjects => {
            let kept = object_elements(rule.key, payload.get(rule.key))
                .map(|entry| Value::Object(entry.clone()))
                .collect();
            payload.insert(rule.key.to_string(), Value::Array(kept));
        }
        FieldPolicy::Rebuild(schema) => {
            let rebuilt = object_elements(rule.key, payload.get(rule.key))
                .map(|entry| Value::Object(rebuild_record(schema, entry)))
                .collect();
            payload.insert(rule.key.to_string(), Value::Array(rebuilt));
        }
    }
}

/// Replace a value with its canonical text.
///
/// A string that already parses as JSON is taken to be encoded and left
/// alone. Plain text is encoded like any other value, so its stored form is
/// a quoted JSON string.
fn encode_in_place(value: &mut Value) {
    if let Value::String(text) = value {
        if serde_json::from_str::<Value>(text).is_ok() {
            return;
        }
    }
    *value = Value::String(to_canonical_text(value));
}

/// Object elements of a collection field; anything but a non-empty list
/// yields nothing.
fn object_elements<'a>(
    key: &'a str,
    collection: Option<&'a Value>,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    let items: &[Value] = match collection {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    let dropped = items.iter().filter(|v| !v.is_object()).count();
    if dropped > 0 {
        tracing::debug!(
            target: "runledger::normalize",
            field = key,
            dropped,
            "Dropped non-object elements"
        );
    }
    items.iter().filter_map(Value::as_object)
}

fn rebuild_record(schema: &RecordSchema, entry: &Map<String, Value>) -> Map<String, Value> {
    let name = match entry.get(schema.name_field) {
        Some(v) if is_truthy(v) => v.clone(),
        _ => entry.get(schema.name_fallback).cloned().unwrap_or(Value::Null),
    };
    let text = entry.get(schema.text_field).cloned().unwrap_or(Value::Null);
    let list = entry
        .get(schema.list_field)
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let mut encoded = entry
        .get(schema.encoded_field)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    encode_in_place(&mut encoded);

    let mut record = Map::new();
    record.insert(schema.name_field.to_string(), name);
    record.insert(schema.text_field.to_string(), text);
    record.insert(schema.list_field.to_string(), list);
    record.insert(schema.encoded_field.to_string(), encoded);
    record
}
