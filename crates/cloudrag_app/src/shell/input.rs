use cloudrag_core::Msg;

pub(crate) const HELP: &str = "\
Commands:
  query <question>   ask a question about the ingested logs (alias: q)
  agent <prompt>     ask the log agent
  refresh            pull and ingest new logs
  summary            show the log summary
  health             show the health report
  errors             show recent error logs
  help               show this list (alias: ?)
  quit               exit (alias: exit)";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    /// Messages to feed through `update`, in order.
    Actions(Vec<Msg>),
    Help,
    Quit,
}

impl Command {
    /// Whether the command starts a backend request.
    pub(crate) fn is_action(&self) -> bool {
        matches!(self, Command::Actions(msgs) if !msgs.is_empty())
    }
}

/// Parse one input line. Unknown commands produce a hint for the user.
pub(crate) fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Actions(Vec::new()),
        "query" | "q" => Command::Actions(vec![
            Msg::InputChanged(rest.to_string()),
            Msg::QuerySubmitted,
        ]),
        "agent" => Command::Actions(vec![
            Msg::InputChanged(rest.to_string()),
            Msg::AgentSubmitted,
        ]),
        "refresh" => Command::Actions(vec![Msg::RefreshClicked]),
        "summary" => Command::Actions(vec![Msg::SummaryClicked]),
        "health" => Command::Actions(vec![Msg::HealthClicked]),
        "errors" => Command::Actions(vec![Msg::ErrorsClicked]),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(format!(
                "Unknown command `{other}`. Type `help` for the list."
            ))
        }
    };
    Ok(command)
}
