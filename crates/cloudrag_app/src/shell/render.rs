use std::fmt::Write as _;

use cloudrag_core::{ActionKind, AppViewModel, Phase, ResultView};
use serde_json::Value;

const TITLE: &str = "CloudRAG - Log Analysis";
const NO_ANSWER_TEXT: &str = "No structured answer; no evidence available.";

pub(crate) const PROMPT: &str = "> ";

pub(crate) fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {TITLE} ==");

    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{notice}");
    }

    match view.phase {
        Phase::Idle => {
            if view.notice.is_none() {
                let _ = writeln!(out, "Ready. Type `help` for commands.");
            }
        }
        Phase::Loading => {
            let label = view
                .pending
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "request".to_string());
            let _ = writeln!(out, "Loading {label}... (other commands are disabled)");
        }
        Phase::Failed => {
            if let Some(error) = &view.error {
                let _ = writeln!(out, "Error: {error}");
            }
        }
        Phase::Success => render_result(&mut out, &view.result),
    }

    if let Some(finished_at) = &view.finished_at {
        let _ = writeln!(out, "(completed {finished_at})");
    }
    out
}

pub(crate) fn busy_line(view: &AppViewModel) -> String {
    match view.pending {
        Some(kind) => format!("Still waiting for {kind}; try again when it finishes."),
        None => "Still waiting for the previous request.".to_string(),
    }
}

fn render_result(out: &mut String, result: &ResultView) {
    match result {
        ResultView::Empty => {}
        ResultView::Answer(answer) => {
            let _ = writeln!(out, "Answer: {}", answer.answer);
            if answer.evidence.is_empty() {
                let _ = writeln!(out, "Evidence: none");
            } else {
                let _ = writeln!(out, "Evidence:");
                for (idx, line) in answer.evidence.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", idx + 1, line);
                }
            }
        }
        ResultView::NoAnswer => {
            let _ = writeln!(out, "{NO_ANSWER_TEXT}");
        }
        ResultView::Refresh { report, raw } => match report {
            Some(report) => {
                let _ = writeln!(out, "{}", report.summary_line());
            }
            None => write_raw(out, ActionKind::Refresh, raw),
        },
        ResultView::Raw { kind, body } => write_raw(out, *kind, body),
    }
}

fn write_raw(out: &mut String, kind: ActionKind, body: &Value) {
    let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
    let _ = writeln!(out, "{} result:", heading(kind));
    let _ = writeln!(out, "{pretty}");
}

fn heading(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Query => "Query",
        ActionKind::Agent => "Agent",
        ActionKind::Refresh => "Refresh",
        ActionKind::Summary => "Summary",
        ActionKind::Health => "Health",
        ActionKind::Errors => "Errors",
    }
}
