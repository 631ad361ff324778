use serde_json::{Map, Value};

/// Answer text used when the backend JSON carries no `answer` field.
pub const NO_ANSWER: &str = "No answer returned";

const FENCE: &str = "```";

/// Structured answer extracted from a query reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    pub answer: String,
    pub evidence: Vec<String>,
}

impl QueryAnswer {
    fn from_object(map: &Map<String, Value>) -> Self {
        let answer = match map.get("answer") {
            Some(Value::String(text)) => text.clone(),
            None | Some(Value::Null) => NO_ANSWER.to_string(),
            Some(other) => other.to_string(),
        };
        let evidence = match map.get("evidence") {
            Some(Value::Array(items)) => items.iter().map(value_to_line).collect(),
            _ => Vec::new(),
        };
        Self { answer, evidence }
    }
}

/// Normalize the `result` field of a query reply.
///
/// Anything that is not a JSON string yields `None`. Strings go through
/// [`normalize_text`].
pub fn normalize(raw: Option<&Value>) -> Option<QueryAnswer> {
    match raw {
        Some(Value::String(text)) => normalize_text(text),
        _ => None,
    }
}

/// Best-effort, total conversion of LLM output into a [`QueryAnswer`].
///
/// Stage one removes every markdown fence marker (with its optional language
/// tag) and trims the result. Stage two parses the cleaned text as a JSON
/// object; when that fails, the first `{` that starts a complete JSON object is
/// used instead, so prose around the object or several objects in a row still
/// produce the first one. Embedded objects count only when they carry an
/// `answer` or `evidence` key. Scalars, arrays and prose yield `None`.
pub fn normalize_text(raw: &str) -> Option<QueryAnswer> {
    let cleaned = strip_fences(raw);
    let cleaned = cleaned.trim();
    parse_object(cleaned)
        .or_else(|| first_embedded_object(cleaned))
        .map(|map| QueryAnswer::from_object(&map))
}

/// Fences alternate opener/closer; only an opener carries a language tag.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut opening = true;
    while let Some(idx) = rest.find(FENCE) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + FENCE.len()..];
        if opening {
            let tag_len = rest
                .find(|c: char| !is_tag_char(c))
                .unwrap_or(rest.len());
            rest = &rest[tag_len..];
        }
        opening = !opening;
    }
    out.push_str(rest);
    out
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Embedded candidates must look like an answer, so quoted log records are skipped.
fn first_embedded_object(text: &str) -> Option<Map<String, Value>> {
    text.match_indices('{').find_map(|(idx, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[idx..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(map)))
                if map.contains_key("answer") || map.contains_key("evidence") =>
            {
                Some(map)
            }
            _ => None,
        }
    })
}

fn value_to_line(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
