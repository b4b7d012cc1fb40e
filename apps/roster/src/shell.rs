//! Interactive mode: one line in, one event (or display request) out.

use client_core::{
    ClientError, ClientEvent, EmployeeApi, Field, RosterClient, SortKey, UiError,
    UiErrorContext, UiEvent,
};
use shared::domain::EmployeeId;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;

use crate::ui;

pub const HELP: &str = "\
commands:
  list                      show the roster
  search <text>             filter by name, email, department or phone
  sort <key>|none           name-asc, name-desc, salary-asc, salary-desc
  add                       open an empty form
  edit <id>                 open the form for an employee
  set <field> <value>       fill a form field (name, email, phone, salary,
                            department, startDate, notes)
  submit | cancel           save or discard the open form
  click <control>           press a rendered control, e.g. edit-3
  delete <id>               delete an employee
  refresh | stats | help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Event(UiEvent),
    Click(String),
    List,
    Stats,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "stats" => ShellCommand::Stats,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "refresh" => ShellCommand::Event(UiEvent::Refresh),
        "search" => ShellCommand::Event(UiEvent::Search(rest.to_string())),
        "sort" => {
            let key = match rest {
                "" | "none" => None,
                raw => Some(raw.parse::<SortKey>().map_err(|err| err.to_string())?),
            };
            ShellCommand::Event(UiEvent::Sort(key))
        }
        "add" => ShellCommand::Event(UiEvent::Add),
        "edit" => ShellCommand::Event(UiEvent::Edit(parse_id(rest)?)),
        "delete" | "rm" => ShellCommand::Event(UiEvent::Delete(parse_id(rest)?)),
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = Field::parse(name).ok_or_else(|| format!("unknown field '{name}'"))?;
            ShellCommand::Event(UiEvent::SetField(field, value.trim().to_string()))
        }
        "submit" | "save" => ShellCommand::Event(UiEvent::Submit),
        "cancel" => ShellCommand::Event(UiEvent::Cancel),
        "click" => {
            if rest.is_empty() {
                return Err("click needs a control key, e.g. edit-3".to_string());
            }
            ShellCommand::Click(rest.to_string())
        }
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<EmployeeId, String> {
    raw.trim()
        .parse::<i64>()
        .map(EmployeeId)
        .map_err(|_| format!("expected a numeric employee id, got '{raw}'"))
}

fn context_for(event: &UiEvent) -> UiErrorContext {
    match event {
        UiEvent::Refresh => UiErrorContext::Load,
        UiEvent::Submit => UiErrorContext::Submit,
        UiEvent::Delete(_) => UiErrorContext::Delete,
        _ => UiErrorContext::General,
    }
}

/// Runs the read-eval-render loop until `quit` or end of input.
pub async fn run<A, R, W>(client: &RosterClient<A>, input: R, mut output: W) -> anyhow::Result<()>
where
    A: EmployeeApi,
    R: tokio::io::AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut notifications = client.subscribe();
    if let Err(err) = client.fetch_all().await {
        let error = UiError::from_client_error(UiErrorContext::Load, &err);
        output.write_all(ui::render_error(&error).as_bytes()).await?;
    }
    output
        .write_all(ui::render_view(&client.view().await).as_bytes())
        .await?;
    output.write_all(b"type 'help' for commands\n> ").await?;
    output.flush().await?;

    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        let mut out = String::new();
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => out.push_str(HELP),
            Ok(Some(ShellCommand::List)) => out.push_str(&ui::render_view(&client.view().await)),
            Ok(Some(ShellCommand::Stats)) => {
                if let Some(stats) = &client.view().await.stats {
                    out.push_str(&ui::render_stats(stats));
                }
            }
            Ok(Some(ShellCommand::Click(key))) => {
                let result = client.dispatch(&key).await;
                out.push_str(&after_event(client, UiErrorContext::General, result).await);
            }
            Ok(Some(ShellCommand::Event(event))) => {
                debug!(event = event.name(), "shell event");
                let context = context_for(&event);
                let result = client.handle(event).await;
                out.push_str(&after_event(client, context, result).await);
            }
            Err(message) => {
                out.push_str(&message);
                out.push('\n');
            }
        }

        loop {
            match notifications.try_recv() {
                Ok(ClientEvent::RosterReplaced { count }) => {
                    debug!(count, "roster replaced");
                }
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        out.push_str("> ");
        output.write_all(out.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}

async fn after_event<A: EmployeeApi>(
    client: &RosterClient<A>,
    context: UiErrorContext,
    result: Result<(), ClientError>,
) -> String {
    let mut out = String::new();
    match result {
        // the form shows the failing field itself
        Err(ClientError::Validation(_)) => {}
        Err(err) => {
            let error = UiError::from_client_error(context, &err);
            out.push_str(&ui::render_error(&error));
        }
        Ok(()) => {}
    }
    let surface = client.surface().await;
    if surface.is_open() {
        out.push_str(&ui::render_surface(&surface));
    } else {
        out.push_str(&ui::render_view(&client.view().await));
    }
    out
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
