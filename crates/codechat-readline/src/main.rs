use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use codechat_application::{ChatSession, SendOutcome, THINKING_PLACEHOLDER};
use codechat_core::context::{ContextProvider, ContextSource};
use codechat_core::conversation::MessageRole;
use codechat_core::secret::CredentialProvider;
use codechat_infrastructure::{ConfigService, EnvCredential};
use codechat_interaction::{FileEditor, GeminiApiAgent, LineRange, RequestBuilder};

mod commands;
mod completion;
mod logging;

use commands::{HELP_TEXT, ReplCommand};
use completion::CliHelper;

const CONTEXT_PREVIEW_LINES: usize = 8;

#[derive(Parser)]
#[command(name = "codechat")]
#[command(about = "Chat with Gemini about the code you are working on", long_about = None)]
struct Cli {
    /// Document to use as code context
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Initial line selection within the document, e.g. 10-42
    #[arg(short, long, requires = "file")]
    select: Option<LineRange>,

    /// Gemini model id (overrides config.toml)
    #[arg(short, long)]
    model: Option<String>,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

type Session = ChatSession<FileEditor, GeminiApiAgent, EnvCredential>;

/// Assistant replies look the same whether they carry an answer or a failure.
fn format_reply(content: &str) -> String {
    let mut out = format!("[{}]", MessageRole::Assistant.label())
        .bright_magenta()
        .to_string();
    for line in content.lines() {
        out.push('\n');
        out.push_str(&line.bright_blue().to_string());
    }
    out
}

fn print_context(session: &Session) {
    let context = session.context();
    let document = session
        .editor()
        .document()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    let selection = session
        .editor()
        .selection()
        .map(|range| format!(", lines {range}"))
        .unwrap_or_default();

    let label = match context.source {
        ContextSource::Selection | ContextSource::FullDocument => context.source.to_string().green(),
        ContextSource::Empty => context.source.to_string().yellow(),
        ContextSource::Error => context.source.to_string().red(),
    };
    println!("{} {} ({}{})", "Context:".bold(), label, document, selection.bright_black());

    for line in context.text.lines().take(CONTEXT_PREVIEW_LINES) {
        println!("  {}", line.bright_black());
    }
    let total = context.text.lines().count();
    if total > CONTEXT_PREVIEW_LINES {
        println!(
            "  {}",
            format!("... {} more lines", total - CONTEXT_PREVIEW_LINES).bright_black()
        );
    }
}

fn print_history(session: &Session) {
    let messages = session.messages();
    if messages.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for message in messages {
        let header = format!(
            "{} {} {}",
            message.id,
            message.role.label(),
            message.timestamp.format("%H:%M:%S")
        );
        match message.role {
            MessageRole::User => println!("{}", header.green()),
            MessageRole::Assistant => println!("{}", header.bright_magenta()),
        }
        println!("{}", message.content);
        println!();
    }
}

/// The main entry point for the codechat REPL.
///
/// 1. Loads config.toml and applies CLI overrides
/// 2. Builds the session (file editor, Gemini agent, environment credential)
/// 3. Reads lines; plain text is sent, slash commands drive the context
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("{}", format!("Logging disabled: {err:#}").yellow());
            None
        }
    };

    // ===== Configuration =====
    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    if let Some(model) = cli.model {
        config.model.model_name = model;
    }

    // ===== Session =====
    let mut editor = FileEditor::new();
    if let Some(path) = cli.file {
        editor.open(path);
    }
    if let Some(range) = cli.select {
        editor.select(range);
    }

    let agent = GeminiApiAgent::from_config(&config.model)?;
    let model_name = agent.model().to_string();
    let credentials = EnvCredential::new(config.model.api_key_env.clone());
    let credential_missing = credentials.api_key().trim().is_empty();

    let context_provider =
        ContextProvider::new(editor).with_empty_placeholder(config.context.empty_placeholder.clone());
    let mut session: Session = ChatSession::new(context_provider, agent, credentials)
        .with_request_builder(RequestBuilder::new(config.context.preamble.clone()));
    session.refresh_context();
    tracing::info!(model = %model_name, source = ?session.context_source(), "codechat started");

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== codechat ===".bright_magenta().bold());
    println!("{}", format!("Model: {model_name}").bright_black());
    if credential_missing {
        println!(
            "{}",
            format!(
                "{} is not set; replies will explain how to configure it.",
                config.model.api_key_env
            )
            .yellow()
        );
    }
    print_context(&session);
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match ReplCommand::parse(&line) {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Send(text) => {
                        println!("{}", THINKING_PLACEHOLDER.bright_black());
                        // The session is borrowed mutably until the reply is in,
                        // so sends never overlap
                        match session.send(&text).await {
                            SendOutcome::Replied { content, .. } => {
                                println!("{}\n", format_reply(&content))
                            }
                            SendOutcome::Ignored => {}
                        }
                    }
                    ReplCommand::Refresh => {
                        session.refresh_context();
                        print_context(&session);
                    }
                    ReplCommand::Context => print_context(&session),
                    ReplCommand::Open(path) => {
                        session.editor_mut().open(path);
                        session.refresh_context();
                        print_context(&session);
                    }
                    ReplCommand::Select(range) => {
                        session.editor_mut().select(range);
                        session.refresh_context();
                        print_context(&session);
                    }
                    ReplCommand::ClearSelection => {
                        session.editor_mut().clear_selection();
                        session.refresh_context();
                        print_context(&session);
                    }
                    ReplCommand::History => print_history(&session),
                    ReplCommand::Help => println!("{}", HELP_TEXT.bright_black()),
                    ReplCommand::Invalid(usage) => println!("{}", usage.yellow()),
                    ReplCommand::Unknown(command) => {
                        println!("{}", format!("Unknown command: {command}").bright_black())
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
