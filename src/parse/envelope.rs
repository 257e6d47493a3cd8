//! Response envelope parsing and error classification.
//!
//! Every eBay response wraps its payload in a single `<opType>Response`
//! element carrying an acknowledgement code. A call succeeded only when
//! `Ack` is exactly `Success`; anything else (including `Warning`) is
//! reported as a [`EbayError::Request`] or [`EbayError::System`] with the
//! envelope attached.

use serde_json::{Map, Value};
use tracing::debug;

use crate::clients::ebay::{Classification, EbayError, ResponseError, SeverityCode};
use crate::config::EbayConfig;
use crate::context::RequestContext;
use crate::parse::flatten::{Depth, Flattener};
use crate::parse::policy::ArrayFieldPolicy;
use crate::parse::scalar::ScalarCoercion;
use crate::parse::shape::{collapse_single, is_blank};

const ACK_KEY: &str = "Ack";
const LOWER_ACK_KEY: &str = "ack";
const ERRORS_KEY: &str = "Errors";
const ERROR_MESSAGE_KEY: &str = "errorMessage";
const SUCCESS: &str = "Success";

/// Flattens responses and classifies their envelopes.
///
/// # Example
///
/// ```rust
/// use ebay_api::{RequestContext, ResponseParser, ServiceName};
/// use serde_json::json;
///
/// let parser = ResponseParser::default();
/// let context = RequestContext::new(ServiceName::Trading, "GeteBayOfficialTime").unwrap();
/// let tree = json!({"GeteBayOfficialTimeResponse": {
///     "Ack": ["Success"],
///     "Timestamp": ["2015-10-11T15:01:00.222Z"]
/// }});
///
/// let data = parser.parse_envelope(tree, &context).unwrap();
/// assert_eq!(data["Timestamp"], "2015-10-11T15:01:00.222Z");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseParser {
    policy: ArrayFieldPolicy,
    coercion: ScalarCoercion,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(ArrayFieldPolicy::builtin().clone(), ScalarCoercion::default())
    }
}

impl ResponseParser {
    /// Creates a parser with an explicit policy and coercion.
    #[must_use]
    pub const fn new(policy: ArrayFieldPolicy, coercion: ScalarCoercion) -> Self {
        Self { policy, coercion }
    }

    /// Creates a parser using the built-in table merged with the config's
    /// extra array fields, and the config's coercion policy.
    #[must_use]
    pub fn from_config(config: &EbayConfig) -> Self {
        let mut policy = ArrayFieldPolicy::builtin().clone();
        policy.merge(config.array_fields());
        Self::new(policy, config.scalar_coercion().clone())
    }

    /// Returns the array-field policy.
    #[must_use]
    pub const fn policy(&self) -> &ArrayFieldPolicy {
        &self.policy
    }

    /// Returns the scalar coercion policy.
    #[must_use]
    pub const fn coercion(&self) -> &ScalarCoercion {
        &self.coercion
    }

    /// Returns a flattener bound to this parser's policies.
    #[must_use]
    pub const fn flattener<'a>(&'a self, context: Option<&'a RequestContext>) -> Flattener<'a> {
        Flattener::new(&self.policy, &self.coercion, context)
    }

    /// Flattens `tree`, locates the response envelope and classifies it.
    ///
    /// # Errors
    ///
    /// - [`EbayError::Client`] if no envelope can be found
    /// - [`EbayError::Request`] or [`EbayError::System`] if `Ack` is not
    ///   `Success`; the flattened envelope is available via
    ///   [`EbayError::data`]
    pub fn parse_envelope(&self, tree: Value, context: &RequestContext) -> Result<Value, EbayError> {
        let flattener = self.flattener(Some(context));
        let flattened = flattener.flatten(tree, context.parse_depth());

        let Value::Object(mut root) = flattened else {
            return Err(missing_envelope(context, Some(flattened)));
        };
        let Some(key) = locate_envelope_key(&root, context) else {
            return Err(missing_envelope(context, Some(Value::Object(root))));
        };
        debug!(envelope = %key, "Located response envelope");

        let envelope = match root.remove(&key).map(collapse_single) {
            Some(Value::Object(envelope)) => envelope,
            other => return Err(missing_envelope(context, other)),
        };
        let envelope = normalize_ack(envelope, &flattener);

        if matches!(envelope.get(ACK_KEY), Some(Value::String(ack)) if ack == SUCCESS) {
            return Ok(Value::Object(envelope));
        }

        let error = classify_failure(envelope, context, &flattener);
        debug!(
            classification = %error.classification,
            severity = %error.severity_code,
            message = %error.message,
            "Response reported a failure"
        );
        Err(EbayError::from_response(error))
    }
}

/// Parses an envelope with the built-in policy and default coercion.
///
/// # Errors
///
/// See [`ResponseParser::parse_envelope`].
pub fn parse_envelope(tree: Value, context: &RequestContext) -> Result<Value, EbayError> {
    ResponseParser::default().parse_envelope(tree, context)
}

fn missing_envelope(context: &RequestContext, data: Option<Value>) -> EbayError {
    EbayError::Client {
        message: format!("Response missing {} element", context.envelope_key()),
        data,
    }
}

/// Finds `<opType>Response`, or else the single key shaped like `<Name>Response`.
fn locate_envelope_key(root: &Map<String, Value>, context: &RequestContext) -> Option<String> {
    let expected = context.envelope_key();
    if root.contains_key(&expected) {
        return Some(expected);
    }

    let mut candidates = root.keys().filter(|key| is_response_key(key));
    match (candidates.next(), candidates.next()) {
        (Some(key), None) => Some(key.clone()),
        _ => None,
    }
}

fn is_response_key(key: &str) -> bool {
    key.strip_suffix("Response")
        .and_then(|prefix| prefix.chars().last())
        .is_some_and(|c| c.is_ascii_alphabetic())
}

/// Renames `ack` to `Ack` and flattens its value fully.
fn normalize_ack(envelope: Map<String, Value>, flattener: &Flattener<'_>) -> Map<String, Value> {
    let has_upper = envelope.contains_key(ACK_KEY);

    envelope
        .into_iter()
        .map(|(key, value)| {
            let is_ack = key == ACK_KEY || (key == LOWER_ACK_KEY && !has_upper);
            if is_ack {
                (ACK_KEY.to_string(), flattener.flatten(value, Depth::Unlimited))
            } else {
                (key, value)
            }
        })
        .collect()
}

fn classify_failure(
    envelope: Map<String, Value>,
    context: &RequestContext,
    flattener: &Flattener<'_>,
) -> ResponseError {
    let details = envelope.get(ACK_KEY).cloned().unwrap_or(Value::Null);

    let records: Vec<Value> = match envelope.get(ERRORS_KEY) {
        Some(errors) if !is_blank(errors) => match errors.clone() {
            Value::Array(items) => items,
            other => vec![other],
        },
        _ => Vec::new(),
    }
    .into_iter()
    .map(|record| flattener.flatten(record, Depth::Unlimited))
    .collect();

    let mut severity: Option<SeverityCode> = None;
    let mut classification = Classification::RequestError;
    let mut errors = Vec::new();
    let mut messages = Vec::new();

    if records.is_empty() {
        if let Some(error_message) = envelope.get(ERROR_MESSAGE_KEY) {
            let flattened = flattener.flatten(error_message.clone(), Depth::Unlimited);
            let text = match &flattened {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            if !text.trim().is_empty() {
                messages.push(text);
            }
            errors.push(flattened);
        }
    } else {
        for record in records {
            let summary = RecordSummary::from_record(&record);
            severity = severity.max(summary.severity);
            if let Some(class) = summary.classification {
                classification = classification.max(class);
            }
            messages.push(summary.message);
            errors.push(record);
        }
    }

    let message = if messages.is_empty() {
        format!("Bad ack code: {}", ack_text(&details))
    } else {
        messages.join(", ")
    };

    ResponseError {
        message,
        severity_code: severity.unwrap_or(SeverityCode::Error),
        classification,
        errors,
        details,
        context: context.clone(),
        exchange: None,
        data: Value::Object(envelope),
    }
}

fn ack_text(ack: &Value) -> String {
    match ack {
        Value::Null => "(none)".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// One error record reduced to what the composite message needs.
#[derive(Debug)]
struct RecordSummary {
    message: String,
    severity: Option<SeverityCode>,
    classification: Option<Classification>,
}

impl RecordSummary {
    fn from_record(record: &Value) -> Self {
        let severity = field_text(record, "SeverityCode").and_then(|s| SeverityCode::parse(&s));
        let classification =
            field_text(record, "ErrorClassification").and_then(|c| Classification::parse(&c));

        let text = field_text(record, "LongMessage")
            .or_else(|| field_text(record, "ShortMessage"))
            .unwrap_or_else(|| "Unknown error".to_string());

        let mut message = match severity {
            Some(severity) => format!("{severity}: {text}"),
            None => text,
        };
        if let Some(code) = field_text(record, "ErrorCode") {
            message.push_str(&format!(" ({code})"));
        }

        Self {
            message,
            severity,
            classification,
        }
    }
}

fn field_text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
