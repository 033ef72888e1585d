//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::core::Result;
use crate::session::ChatSession;

/// Result of parsing a command
pub enum CommandResult {
    /// Continue processing as normal input
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
}

/// Parse and handle special commands
pub async fn handle_command(input: &str, session: &mut ChatSession) -> Result<CommandResult> {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),

        "help" | "?" => Ok(CommandResult::Handled(help_text())),

        "new" => {
            session.reset();
            Ok(CommandResult::Handled(
                "Started a new conversation.".to_string(),
            ))
        }

        "list" => {
            let conversations = session.conversations().await?;
            if conversations.is_empty() {
                return Ok(CommandResult::Handled("No conversations yet.".to_string()));
            }
            let output = conversations
                .iter()
                .map(|c| format!("  {}  {}  {}", c.id, c.created_at, c.title))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(CommandResult::Handled(format!("Conversations:\n{}", output)))
        }

        "open" => {
            if args.is_empty() {
                return Ok(CommandResult::Handled("Usage: open <id>".to_string()));
            }
            let messages = session.open(args).await?;
            let transcript = messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(CommandResult::Handled(format!(
                "Opened {} ({} messages)\n{}",
                args,
                messages.len(),
                transcript
            )))
        }

        "delete" => {
            if args.is_empty() {
                return Ok(CommandResult::Handled("Usage: delete <id>".to_string()));
            }
            session.delete_conversation(args).await?;
            Ok(CommandResult::Handled(format!("Deleted {}", args)))
        }

        "agents" => {
            let agents = session.completed_agents();
            if agents.is_empty() {
                Ok(CommandResult::Handled(
                    "No agents were consulted on the last turn.".to_string(),
                ))
            } else {
                Ok(CommandResult::Handled(format!(
                    "Agents consulted: {}",
                    agents.join(", ")
                )))
            }
        }

        _ => Ok(CommandResult::Continue(input.to_string())),
    }
}

/// Help text for REPL commands
fn help_text() -> String {
    "\
Commands:
  help, ?        Show this help
  new            Start a new conversation
  list           List your conversations
  open <id>      Open a conversation
  delete <id>    Delete a conversation
  agents         Show agents consulted on the last turn
  exit, quit     Leave the REPL

Anything else is sent to the assistant."
        .to_string()
}
