//! Interactive REPL for Pharmabridge
//!
//! Provides the main user interaction loop.

use std::io::{self, BufRead, Write};

use crate::cli::commands::{handle_command, CommandResult};
use crate::core::Result;
use crate::session::ChatSession;

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    session: ChatSession,
}

impl Repl {
    /// Create a REPL over an existing session
    pub fn new(session: ChatSession) -> Self {
        Self { session }
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match handle_command(input, &mut self.session).await {
                Ok(CommandResult::Exit) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(CommandResult::Handled(output)) => {
                    println!("{}\n", output);
                    continue;
                }
                Ok(CommandResult::Continue(message)) => {
                    match self.session.send(&message).await {
                        Ok(transcript) => {
                            if let Some(reply) = transcript
                                .iter()
                                .rev()
                                .find(|m| m.role == "assistant")
                            {
                                println!("\nAssistant:\n{}\n", reply.content);
                            }
                            let agents = self.session.completed_agents();
                            if !agents.is_empty() {
                                println!("[agents: {}]\n", agents.join(", "));
                            }
                        }
                        Err(e) => {
                            eprintln!("\nError: {}\n", e);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Command error: {}\n", e);
                }
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        println!();
        println!("Pharmabridge AI - drug repurposing intelligence assistant");
        println!("Executor: {}", self.session.executor_name());
        println!();
        println!("Commands: help, new, list, open, delete, agents, exit");
        println!("─────────────────────────────────────────────────────────");
    }
}
