//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::chat::ReplNavigator;
use parley_application::{
    IgnoreReason, MessagePipeline, Navigator, SessionDirectory, SubmitOutcome,
};
use parley_domain::SessionId;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Interactive chat REPL
pub struct ChatRepl {
    pipeline: Arc<MessagePipeline>,
    directory: Arc<dyn SessionDirectory>,
    navigator: Arc<ReplNavigator>,
    history_file: Option<PathBuf>,
    quiet: bool,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(
        pipeline: Arc<MessagePipeline>,
        directory: Arc<dyn SessionDirectory>,
        navigator: Arc<ReplNavigator>,
    ) -> Self {
        Self {
            pipeline,
            directory,
            navigator,
            history_file: None,
            quiet: false,
        }
    }

    /// Override the input history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Suppress the welcome banner and transcript headers
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("parley").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if !self.quiet {
            self.print_welcome();
        }
        self.apply_pending_navigation();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        self.apply_pending_navigation();
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Activate the most recently requested session, if a navigation
    /// request is pending, and render its transcript.
    fn apply_pending_navigation(&self) {
        let Some(id) = self.navigator.take_pending() else {
            return;
        };

        self.pipeline.activate(id.clone());
        if !self.quiet {
            println!();
            println!("{}", ConsoleFormatter::session_header(&id));
            print!(
                "{}",
                ConsoleFormatter::format_transcript(&self.pipeline.snapshot())
            );
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Parley - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Commands:");
        println!("  /new            - Start a new session");
        println!("  /sessions       - Browse known sessions");
        println!("  /open <token>   - Switch to a session");
        println!("  /help           - Show this help");
        println!("  /quit           - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return true;
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /new             - Start a new session");
                println!("  /sessions        - Browse known sessions");
                println!("  /open <token>    - Switch to a session");
                println!("  /help, /h, /?    - Show this help");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
            }
            "/new" => match self.directory.create_session().await {
                Ok(id) => self.navigator.go_to(&id),
                Err(e) => eprintln!("Could not create a session: {}", e),
            },
            "/sessions" => match self.directory.list().await {
                Ok(entries) => {
                    println!();
                    print!("{}", ConsoleFormatter::format_session_list(&entries));
                    println!();
                }
                Err(e) => eprintln!("Could not list sessions: {}", e),
            },
            _ if cmd.starts_with("/open") => {
                let token = cmd.trim_start_matches("/open").trim();
                match SessionId::parse(token) {
                    Some(id) => self.navigator.go_to(&id),
                    None => println!("Usage: /open <token>"),
                }
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_message(&self, line: &str) {
        let before = self.pipeline.snapshot().len();

        match self.pipeline.submit(line).await {
            SubmitOutcome::Replied | SubmitOutcome::Errored => {
                // Render only what the exchange appended after the user's
                // own line.
                let snapshot = self.pipeline.snapshot();
                let tail = snapshot.get(before + 1..).unwrap_or(&[]);
                println!();
                print!("{}", ConsoleFormatter::format_transcript(tail));
            }
            SubmitOutcome::Ignored(IgnoreReason::Busy) => {
                println!("(the assistant is still replying, one message at a time)");
            }
            SubmitOutcome::Ignored(IgnoreReason::NoSession) => {
                println!("No active session. Use /new to start one.");
            }
            SubmitOutcome::Ignored(IgnoreReason::Blank) => {}
            SubmitOutcome::Stale => {
                // The REPL is sequential; a stale result here means a
                // navigation raced the reply. Nothing to render.
                debug!("stale completion discarded");
            }
        }
    }
}
