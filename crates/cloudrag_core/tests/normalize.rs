use cloudrag_core::{normalize, normalize_text, QueryAnswer, NO_ANSWER};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn answer(text: &str, evidence: &[&str]) -> QueryAnswer {
    QueryAnswer {
        answer: text.to_string(),
        evidence: evidence.iter().map(|s| s.to_string()).collect(),
    }
}

fn fence(body: &str, tag: &str) -> String {
    format!("```{tag}\n{body}\n```")
}

#[test]
fn plain_json_is_read_verbatim() {
    let raw = r#"{"answer": "OOM kill", "evidence": ["line 1", "line 2"]}"#;
    assert_eq!(
        normalize_text(raw),
        Some(answer("OOM kill", &["line 1", "line 2"]))
    );
}

#[test]
fn fenced_json_matches_plain_json() {
    let samples = [
        r#"{"answer": "yes", "evidence": []}"#,
        r#"{"answer": "postgres restarted twice", "evidence": ["a", "b", "c"]}"#,
        r#"{"evidence": ["only evidence"]}"#,
    ];
    for sample in samples {
        let plain = normalize_text(sample);
        assert!(plain.is_some(), "sample should parse: {sample}");
        assert_eq!(normalize_text(&fence(sample, "json")), plain);
        assert_eq!(normalize_text(&fence(sample, "")), plain);
        assert_eq!(normalize_text(&format!("  \n{}\n\n", fence(sample, "json"))), plain);
    }
}

#[test]
fn non_string_inputs_yield_none() {
    assert_eq!(normalize(None), None);
    assert_eq!(normalize(Some(&Value::Null)), None);
    assert_eq!(normalize(Some(&json!(42))), None);
    assert_eq!(normalize(Some(&json!({"answer": "x"}))), None);
    assert_eq!(normalize(Some(&json!(["x"]))), None);
}

#[test]
fn prose_yields_none() {
    assert_eq!(normalize_text("not json at all"), None);
    assert_eq!(normalize_text("Sorry, I can't answer that."), None);
    assert_eq!(normalize_text(""), None);
    assert_eq!(normalize_text("```json\n```"), None);
}

#[test]
fn scalars_and_arrays_yield_none() {
    assert_eq!(normalize_text("42"), None);
    assert_eq!(normalize_text("\"just a string\""), None);
    assert_eq!(normalize_text("null"), None);
}

#[test]
fn missing_answer_uses_fallback() {
    assert_eq!(
        normalize_text(r#"{"evidence": ["a","b"]}"#),
        Some(answer(NO_ANSWER, &["a", "b"]))
    );
}

#[test]
fn missing_or_mistyped_evidence_is_empty() {
    assert_eq!(normalize_text(r#"{"answer": "x"}"#), Some(answer("x", &[])));
    assert_eq!(
        normalize_text(r#"{"answer": "x", "evidence": "one line"}"#),
        Some(answer("x", &[]))
    );
    assert_eq!(
        normalize_text(r#"{"answer": "x", "evidence": null}"#),
        Some(answer("x", &[]))
    );
}

#[test]
fn string_input_goes_through_text_pipeline() {
    let wrapped = json!(fence(r#"{"answer":"OOM kill","evidence":["log line 1"]}"#, "json"));
    assert_eq!(
        normalize(Some(&wrapped)),
        Some(answer("OOM kill", &["log line 1"]))
    );
}

#[test]
fn prose_around_fence_uses_first_object() {
    let raw = format!(
        "Here is what I found:\n{}\nLet me know if you need more.",
        fence(r#"{"answer": "disk full", "evidence": ["ENOSPC"]}"#, "json")
    );
    assert_eq!(normalize_text(&raw), Some(answer("disk full", &["ENOSPC"])));
}

#[test]
fn multiple_blocks_use_the_first_object() {
    let raw = format!(
        "{}\n{}",
        fence(r#"{"answer": "first", "evidence": []}"#, "json"),
        fence(r#"{"answer": "second", "evidence": []}"#, "json")
    );
    assert_eq!(normalize_text(&raw), Some(answer("first", &[])));
}

#[test]
fn non_string_answer_is_rendered_as_json() {
    assert_eq!(
        normalize_text(r#"{"answer": true, "evidence": []}"#),
        Some(answer("true", &[]))
    );
}

#[test]
fn normalization_is_deterministic() {
    let raw = fence(r#"{"answer": "a", "evidence": ["b"]}"#, "json");
    assert_eq!(normalize_text(&raw), normalize_text(&raw));
}

#[test]
fn closing_fence_followed_by_word_keeps_the_word() {
    let raw = r#"{"answer":"run ```sql SELECT 1```now","evidence":[]}"#;
    assert_eq!(normalize_text(raw), Some(answer("run  SELECT 1now", &[])));
}

#[test]
fn fenced_reply_with_trailing_prose_keeps_the_prose() {
    let raw = "```json\n{\"answer\": \"disk full\", \"evidence\": []}\n```done";
    assert_eq!(normalize_text(raw), Some(answer("disk full", &[])));
}

#[test]
fn quoted_log_record_in_prose_is_not_an_answer() {
    let raw = r#"The pod logged {"level":"error"} twice; I cannot say why."#;
    assert_eq!(normalize_text(raw), None);
}

#[test]
fn answer_after_quoted_log_record_is_still_found() {
    let raw = r#"Saw {"level":"error"} then: {"evidence": ["oom at 10:02"]}"#;
    assert_eq!(normalize_text(raw), Some(answer(NO_ANSWER, &["oom at 10:02"])));
}
