//! Interactive chat REPL.
//!
//! Reads operator input with rustyline, posts questions to the backend, and
//! renders the transcript with colored output. Slash commands cover the
//! ingestion flows so the operator never has to leave the chat. Each send is
//! awaited before the next prompt, which is what prevents duplicate
//! in-flight requests.

use crate::ingest;
use crate::status::{UploadState, UploadTracker};
use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use magpie_client::{ChatService, KnowledgeService};
use magpie_core::message::{ChatMessage, Transcript};
use magpie_core::session::SessionContext;

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/help".to_string(),
                "/ingest".to_string(),
                "/upload".to_string(),
                "/status".to_string(),
                "/logout".to_string(),
                "/quit".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_help() {
    println!("{}", "Commands:".bright_black());
    println!("{}", "  /ingest <url> [selector]   add a web page to the knowledge base".bright_black());
    println!("{}", "  /upload <file.pdf>         add a PDF to the knowledge base".bright_black());
    println!("{}", "  /status                    show session and ingestion status".bright_black());
    println!("{}", "  /logout                    clear the stored session token".bright_black());
    println!("{}", "  /quit                      leave the chat".bright_black());
    println!("{}", "Anything else is sent to the assistant as a question.".bright_black());
}

fn print_status(session: &SessionContext, tracker: &UploadTracker) {
    if session.is_authenticated() {
        println!("{}", "Session: logged in".green());
    } else {
        println!("{}", "Session: not logged in".yellow());
    }
    match tracker.state() {
        UploadState::Idle => println!("{}", "Ingestion: idle".bright_black()),
        UploadState::Uploading => println!("{}", "Ingestion: in progress".bright_black()),
        UploadState::Succeeded(message) => println!("{}", format!("Ingestion: {message}").green()),
        UploadState::Failed(message) => println!("{}", format!("Ingestion: {message}").red()),
    }
}

/// Runs the chat loop until the operator quits, logs out, or the session
/// expires.
pub async fn run(
    session: Arc<SessionContext>,
    chat: ChatService,
    knowledge: KnowledgeService,
    expired: Arc<AtomicBool>,
) -> Result<()> {
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    let tracker = UploadTracker::new();
    let mut transcript = Transcript::new();

    println!("{}", "=== Magpie Chat ===".bright_magenta().bold());
    println!("{}", "Welcome to AI Chat Assistant".bright_blue());
    println!("{}", "Ask me anything and I'll help you find answers!".bright_black());
    println!("{}", "Type '/help' for commands, '/quit' to exit.".bright_black());
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if matches!(trimmed, "/quit" | "quit" | "exit") {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed == "/help" {
                    print_help();
                    continue;
                }
                if trimmed == "/status" {
                    print_status(&session, &tracker);
                    continue;
                }
                if trimmed == "/logout" {
                    session.logout()?;
                    println!("{}", "Logged out.".bright_green());
                    break;
                }
                if let Some(rest) = trimmed.strip_prefix("/ingest") {
                    let mut parts = rest.split_whitespace();
                    match parts.next() {
                        Some(url) => {
                            let selector = parts.next();
                            let _ = ingest::submit_url_flow(&knowledge, &tracker, url, selector)
                                .await;
                        }
                        None => println!("{}", "Usage: /ingest <url> [selector]".yellow()),
                    }
                    if expired.load(Ordering::SeqCst) {
                        break;
                    }
                    continue;
                }
                if let Some(rest) = trimmed.strip_prefix("/upload") {
                    match rest.split_whitespace().next() {
                        Some(path) => {
                            let _ =
                                ingest::upload_pdf_flow(&knowledge, &tracker, Path::new(path))
                                    .await;
                        }
                        None => println!("{}", "Usage: /upload <file.pdf>".yellow()),
                    }
                    if expired.load(Ordering::SeqCst) {
                        break;
                    }
                    continue;
                }
                if trimmed.starts_with('/') {
                    println!("{}", "Unknown command".bright_black());
                    continue;
                }

                let user_message = ChatMessage::user(trimmed);
                println!("{}", format!("> {}", user_message.content).green());
                transcript.push(user_message);

                println!("{}", "AI is typing...".bright_black());
                match chat.send(trimmed).await {
                    Ok(reply) => {
                        let assistant = ChatMessage::assistant(reply.answer);
                        for line in assistant.content.lines() {
                            println!("{}", line.bright_blue());
                        }
                        println!();
                        transcript.push(assistant);
                    }
                    Err(err) if err.is_unauthorized() => {
                        println!("{}", "Session expired. Please log in again.".yellow());
                        break;
                    }
                    Err(err) => {
                        println!("{}", "Something went wrong. Please try again.".red());
                        tracing::debug!("chat send failed: {err}");
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
