//! Console formatter for transcripts and session lists

use colored::Colorize;
use parley_domain::{Message, RecencyGroup, Role, SessionEntry, SessionId};

/// Formats transcripts and session lists for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable colored output globally.
    pub fn set_color_enabled(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// Header line shown when a session becomes active.
    pub fn session_header(id: &SessionId) -> String {
        format!("── Session {} ──", id).yellow().bold().to_string()
    }

    /// Render messages in insertion order, one block per message.
    pub fn format_transcript(messages: &[Message]) -> String {
        let mut output = String::new();

        for message in messages {
            let marker = match message.role {
                Role::User => "you".cyan().bold(),
                Role::Assistant => "assistant".green().bold(),
                Role::Error => "error".red().bold(),
            };
            output.push_str(&format!("{}: {}\n", marker, message.content));
        }

        output
    }

    /// Render the session list under recency group headers, preserving
    /// the directory's newest-first order within each group.
    pub fn format_session_list(entries: &[SessionEntry]) -> String {
        let mut output = String::new();

        for group in RecencyGroup::display_order() {
            let members: Vec<&SessionEntry> =
                entries.iter().filter(|e| e.recency == group).collect();
            if members.is_empty() {
                continue;
            }

            output.push_str(&format!("{}\n", group.label().cyan().bold()));
            for entry in members {
                output.push_str(&format!("  {}  {}\n", entry.id, entry.title));
            }
        }

        if output.is_empty() {
            output.push_str("No sessions yet. Use /new to start one.\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn transcript_renders_roles_in_order() {
        plain();
        let messages = vec![
            Message::assistant("Hello!"),
            Message::user("Hi"),
            Message::error("backend down"),
        ];

        let output = ConsoleFormatter::format_transcript(&messages);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "assistant: Hello!");
        assert_eq!(lines[1], "you: Hi");
        assert_eq!(lines[2], "error: backend down");
    }

    #[test]
    fn session_list_groups_in_display_order() {
        plain();
        let entries = vec![
            SessionEntry::new(
                SessionId::parse("aaaaaaaa").unwrap(),
                "Fresh",
                RecencyGroup::Today,
            ),
            SessionEntry::new(
                SessionId::parse("bbbbbbbb").unwrap(),
                "Old",
                RecencyGroup::PreviousWeek,
            ),
        ];

        let output = ConsoleFormatter::format_session_list(&entries);
        let today = output.find("Today").unwrap();
        let previous = output.find("Previous 7 Days").unwrap();
        assert!(today < previous);
        assert!(output.contains("aaaaaaaa  Fresh"));
        assert!(output.contains("bbbbbbbb  Old"));
        assert!(!output.contains("Yesterday"));
    }

    #[test]
    fn empty_session_list_has_hint() {
        plain();
        let output = ConsoleFormatter::format_session_list(&[]);
        assert!(output.contains("/new"));
    }
}
