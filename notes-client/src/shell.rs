//! Line-oriented front end over `NotesClient`.
//!
//! One command per line. Output is plain text so the loop can be driven
//! from a terminal or a pipe.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::analysis::AnalysisEntry;
use crate::api_client::NotesBackend;
use crate::controller::NotesClient;
use notes_client_types::Note;

pub const HELP: &str = "\
commands:
  list | ls              reload and show all notes
  show <name>            show one note and its analysis
  add <name>             start a new note
  edit <name>            edit an existing note's content
  content <text>         set the draft content (\\n line break, \\\\ backslash)
  save                   create or update from the draft
  cancel                 discard the draft
  delete | rm <name>     delete a note
  analyze <name>         review a note with the model
  reload <name>          repeat the last review of a note
  help                   this text
  quit | exit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show(String),
    Add(String),
    Edit(String),
    Content(String),
    Save,
    Cancel,
    Delete(String),
    Analyze(String),
    Reload(String),
    Help,
    Quit,
}

/// Parse one input line. Empty lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let name = |usage: &str| -> Result<String, String> {
        let name = rest.trim();
        if name.is_empty() {
            Err(format!("usage: {} <name>", usage))
        } else {
            Ok(name.to_string())
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "show" => Command::Show(name("show")?),
        "add" | "new" => Command::Add(name("add")?),
        "edit" => Command::Edit(name("edit")?),
        "content" => Command::Content(unescape_content(rest)),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "delete" | "rm" => Command::Delete(name("delete")?),
        "analyze" => Command::Analyze(name("analyze")?),
        "reload" => Command::Reload(name("reload")?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(command))
}

/// Expand `\n` to a line break and `\\` to a backslash. Any other
/// backslash is kept as typed, as is trailing whitespace.
fn unescape_content(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('\\') => text.push('\\'),
            Some(other) => {
                text.push('\\');
                text.push(other);
            }
            None => text.push('\\'),
        }
    }
    text
}

enum Flow {
    Continue,
    Quit,
}

/// Read commands from `input` until EOF or `quit`.
pub async fn run<B, R, W>(
    client: &mut NotesClient<B>,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    B: NotesBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{}", prompt(client))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                if let Flow::Quit = execute(client, command, out).await? {
                    break;
                }
            }
            Err(msg) => writeln!(out, "error: {}", msg)?,
        }
    }
    Ok(())
}

fn prompt<B: NotesBackend>(client: &NotesClient<B>) -> String {
    match client.editor().editing() {
        Some(name) => format!("notes [editing {}]> ", name),
        None if !client.editor().draft().name.is_empty() => {
            format!("notes [new {}]> ", client.editor().draft().name)
        }
        None => "notes> ".to_string(),
    }
}

async fn execute<B, W>(
    client: &mut NotesClient<B>,
    command: Command,
    out: &mut W,
) -> std::io::Result<Flow>
where
    B: NotesBackend,
    W: Write,
{
    match command {
        Command::List => {
            if let Err(e) = client.refresh().await {
                writeln!(out, "error: {} (showing cached notes)", e)?;
            }
            render_notes(client, out)?;
        }
        Command::Show(name) => match client.note(&name) {
            Some(note) => render_note(note, client.analyses().get(&note.name), out)?,
            None => writeln!(out, "error: no note named '{}'", name)?,
        },
        Command::Add(name) => {
            client.cancel_edit();
            match client.set_draft_name(&name) {
                Ok(()) => writeln!(
                    out,
                    "new note '{}': set its text with 'content', then 'save'",
                    name
                )?,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        Command::Edit(name) => match client.begin_edit(&name) {
            Ok(()) => {
                writeln!(out, "editing '{}', current content:", name)?;
                writeln!(out, "{}", client.editor().draft().content)?;
            }
            Err(e) => writeln!(out, "error: {}", e)?,
        },
        Command::Content(text) => {
            client.set_draft_content(&text);
            writeln!(out, "draft updated ({} chars)", text.chars().count())?;
        }
        Command::Save => {
            let name = client.editor().draft().name.clone();
            match client.submit_draft().await {
                Ok(()) => report_write(client, "saved", &name, out)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        Command::Cancel => {
            client.cancel_edit();
            writeln!(out, "draft discarded")?;
        }
        Command::Delete(name) => match client.delete(&name).await {
            Ok(()) => report_write(client, "deleted", &name, out)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        },
        Command::Analyze(name) => {
            if client.analyze_note(&name).await.is_err() && client.note(&name).is_none() {
                writeln!(out, "error: no note named '{}'", name)?;
            } else {
                render_analysis(client.analyses().get(&name), out)?;
            }
        }
        Command::Reload(name) => match client.reanalyze(&name).await {
            Ok(false) => writeln!(
                out,
                "no analysis yet for '{}'; run 'analyze {}' first",
                name, name
            )?,
            Ok(true) | Err(_) => render_analysis(client.analyses().get(&name), out)?,
        },
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Confirm a write. The write can succeed while the follow-up reload fails;
/// say so, since the list on screen is then stale.
fn report_write<B: NotesBackend, W: Write>(
    client: &NotesClient<B>,
    verb: &str,
    name: &str,
    out: &mut W,
) -> std::io::Result<()> {
    match client.last_error() {
        Some(e) => writeln!(out, "{} '{}' (list not refreshed: {})", verb, name, e),
        None => writeln!(out, "{} '{}'", verb, name),
    }
}

fn render_notes<B: NotesBackend, W: Write>(
    client: &NotesClient<B>,
    out: &mut W,
) -> std::io::Result<()> {
    if client.notes().is_empty() {
        return writeln!(out, "(no notes)");
    }
    for note in client.notes() {
        render_note(note, client.analyses().get(&note.name), out)?;
    }
    Ok(())
}

fn render_note<W: Write>(
    note: &Note,
    analysis: Option<&AnalysisEntry>,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "## {}", note.name)?;
    writeln!(out, "{}", note.content)?;
    if analysis.is_some() {
        render_analysis(analysis, out)?;
    }
    writeln!(out)
}

fn render_analysis<W: Write>(
    analysis: Option<&AnalysisEntry>,
    out: &mut W,
) -> std::io::Result<()> {
    match analysis {
        Some(entry) => {
            writeln!(
                out,
                "Analysis ({}):",
                entry.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
            writeln!(out, "{}", entry.display_text())?;
            if let Some(reason) = entry.failure_reason() {
                writeln!(out, "({})", reason)?;
            }
            Ok(())
        }
        None => writeln!(out, "(no analysis)"),
    }
}
