use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use riley_core::command::{ConsoleCommand, builtin_commands};
use riley_core::session::{Message, MessageRole};
use riley_core::user::{DEFAULT_USER_ID, DefaultUserService, UserService};
use riley_core::{Mode, SettingsRepository};
use riley_execution::MockBackend;
use riley_execution::tracing_layer::{ConsoleEvent, ConsoleEventLayer};
use riley_infrastructure::TomlSettingsRepository;
use riley_interaction::voice::{MockRecognizer, NoSpeech};
use riley_interaction::{ConsoleSession, InteractionResult};

#[derive(Parser)]
#[command(name = "riley")]
#[command(about = "Riley AI - a terminal console for the Riley assistant", long_about = None)]
struct Cli {
    /// Start in this mode instead of the configured default
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Simulated backend latency in milliseconds
    #[arg(long, default_value_t = 2000)]
    latency_ms: u64,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with voice output enabled
    #[arg(long)]
    voice: bool,

    /// User identifier sent with every request
    #[arg(long, default_value = DEFAULT_USER_ID)]
    user: String,

    /// Show router and backend activity
    #[arg(short, long)]
    verbose: bool,
}

fn parse_mode(value: &str) -> std::result::Result<Mode, String> {
    Mode::parse(value).map_err(|e| e.to_string())
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
    modes: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: builtin_commands().iter().map(|cmd| cmd.invocation()).collect(),
            modes: Mode::all().into_iter().map(|mode| mode.to_string()).collect(),
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

        if let Some(partial) = line.strip_prefix("/mode ") {
            let candidates = self
                .modes
                .iter()
                .filter(|mode| mode.starts_with(partial))
                .map(|mode| Pair {
                    display: mode.clone(),
                    replacement: mode.clone(),
                })
                .collect();
            Ok(("/mode ".len(), candidates))
        } else if line.starts_with('/') {
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

/// Installs the subscriber.
///
/// Quiet runs log warnings to stderr. Verbose runs send `riley*` events to the
/// returned channel instead, so they can be printed between replies.
fn init_tracing(verbose: bool) -> Option<mpsc::UnboundedReceiver<ConsoleEvent>> {
    let default_directive = if verbose {
        "warn,riley=debug,riley_core=debug,riley_execution=debug,riley_infrastructure=debug,riley_interaction=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if verbose {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(ConsoleEventLayer::new(event_tx))
            .init();
        Some(event_rx)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
        None
    }
}

fn print_message(message: &Message) {
    match message.role {
        MessageRole::User => println!("{}", format!("> {}", message.content).green()),
        MessageRole::Assistant => {
            let label = match (&message.source, &message.emotion) {
                (Some(source), Some(emotion)) => format!("[Riley | {} | {}]", source, emotion),
                _ => "[Riley]".to_string(),
            };
            println!("{}", label.bright_magenta());
            for line in message.content.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
    }
}

fn print_result(result: &InteractionResult) {
    match result {
        InteractionResult::NoOp => {}
        InteractionResult::Reply(message) => print_message(message),
        InteractionResult::ModeChanged { announcement, .. } => print_message(announcement),
        InteractionResult::VoiceToggled { enabled, notice } => {
            let state = if *enabled { "on" } else { "off" };
            println!("{}", format!("Voice {}", state).yellow());
            if let Some(notice) = notice {
                println!("{}", notice.bright_black());
            }
        }
        InteractionResult::Transcript(Some(text)) => {
            println!("{}", format!("Heard: {}", text).yellow());
            println!("{}", "Edit it below and press Enter to send.".bright_black());
        }
        InteractionResult::Transcript(None) => {
            println!("{}", "Nothing heard (is voice on? try /voice)".bright_black());
        }
        InteractionResult::History(messages) => {
            for message in messages {
                print_message(message);
            }
        }
        InteractionResult::Notice(text) => {
            for line in text.lines() {
                println!("{}", line.bright_black());
            }
        }
        InteractionResult::Busy => {
            println!(
                "{}",
                "Riley is still working on the last request. Use /cancel to abort it.".yellow()
            );
        }
        InteractionResult::Cancelled => println!("{}", "Request cancelled.".yellow()),
        InteractionResult::Error(e) => eprintln!("{}", format!("Error: {}", e).red()),
    }
}

/// Entry point for the Riley REPL.
///
/// Each line is handled on a background task so `/cancel` and `/status`
/// stay usable while a request is in flight. Results come back through an
/// mpsc channel and are printed by a dedicated task.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let console_events = init_tracing(cli.verbose);

    // ===== Backend Initialization =====
    let repository = match &cli.config {
        Some(path) => TomlSettingsRepository::with_path(path.clone()),
        None => TomlSettingsRepository::new()?,
    };
    let mut settings = repository.load().await?;
    if let Some(mode) = cli.mode {
        settings.default_mode = mode;
    }
    if cli.voice {
        settings.voice_enabled = true;
    }
    info!(config = %repository.path().display(), "Settings loaded");

    let backend = Arc::new(MockBackend::with_latency(Duration::from_millis(cli.latency_ms)));
    let user_service: Arc<dyn UserService> = Arc::new(DefaultUserService::new(cli.user.clone()));
    let session = Arc::new(
        ConsoleSession::new(settings, backend, user_service)
            .with_speech(Arc::new(NoSpeech), Arc::new(MockRecognizer::default())),
    );

    let (response_tx, mut response_rx) = mpsc::channel::<InteractionResult>(32);

    let response_handler = tokio::spawn(async move {
        while let Some(result) = response_rx.recv().await {
            print_result(&result);
        }
    });

    if let Some(mut events) = console_events {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let line = format!(
                    "  {} {} {}",
                    event.level,
                    event.message,
                    event.fields_summary()
                );
                println!("{}", line.dimmed());
            }
        });
    }

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Riley AI ===".bright_magenta().bold());
    println!(
        "{}",
        "Type to chat, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
    for message in session.messages().await {
        print_message(&message);
    }

    // Transcript from /listen, offered as the next line's initial text
    let mut draft: Option<String> = None;

    // ===== Main REPL Loop =====
    loop {
        let prompt = format!("riley:{}> ", session.current_mode().await);
        let readline = match draft.take() {
            Some(text) => rl.readline_with_initial(&prompt, (&text, "")),
            None => rl.readline(&prompt),
        };

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                // Listening runs inline so the transcript can fill the next prompt.
                if matches!(ConsoleCommand::parse(&line), Ok(Some(ConsoleCommand::Listen))) {
                    if session.voice_enabled().await {
                        println!("{}", "Listening... (Ctrl-C to stop)".yellow());
                    }
                    let result = tokio::select! {
                        result = session.handle_input(&line) => result,
                        _ = tokio::signal::ctrl_c() => {
                            println!("{}", "Stopped listening.".yellow());
                            InteractionResult::NoOp
                        }
                    };
                    if let InteractionResult::Transcript(Some(text)) = &result {
                        draft = Some(text.clone());
                    }
                    print_result(&result);
                    continue;
                }

                let tx = response_tx.clone();
                let session = Arc::clone(&session);

                tokio::spawn(async move {
                    let result = session.handle_input(&line).await;
                    let _ = tx.send(result).await;
                });
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                if session.cancel_pending().await {
                    println!("{}", "Cancelling the request in progress.".yellow());
                } else {
                    println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                }
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    session.cancel_pending().await;
    drop(response_tx);

    // In-flight tasks hold their own senders; give them a moment to finish.
    let _ = tokio::time::timeout(Duration::from_secs(1), response_handler).await;

    Ok(())
}
