//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use otln_core::{Document, TopicRecord};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a project summary: the displayed note plus topic lines
    pub fn print_status(&self, document: &Document) {
        match self.format {
            OutputFormat::Human => {
                match document.current_note() {
                    Some(note) => println!("Current note: {}", note),
                    None => println!("No more notes."),
                }
                println!("Pending notes: {}", document.pending_count());
                println!();
                let topics = document.topics_by_number();
                if topics.is_empty() {
                    println!("No topics yet.");
                } else {
                    for topic in topics {
                        println!("{}", topic.summary());
                    }
                }
            }
            OutputFormat::Json => {
                let topics: Vec<_> = document.topics_by_number();
                println!(
                    "{}",
                    serde_json::json!({
                        "current_note": document.current_note(),
                        "pending": document.pending_notes().collect::<Vec<_>>(),
                        "topics": topics,
                    })
                );
            }
            OutputFormat::Quiet => {
                if let Some(note) = document.current_note() {
                    println!("{}", note);
                }
            }
        }
    }

    /// Print topic summary lines in display order
    pub fn print_topics(&self, topics: &[&TopicRecord]) {
        match self.format {
            OutputFormat::Human => {
                if topics.is_empty() {
                    println!("No topics found.");
                    return;
                }
                for topic in topics {
                    println!("{}", topic.summary());
                }
                println!("\n{} topic(s)", topics.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(topics).unwrap());
            }
            OutputFormat::Quiet => {
                for topic in topics {
                    println!("{}", topic.name);
                }
            }
        }
    }

    /// Print one topic with its notes
    pub fn print_topic(&self, topic: &TopicRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("{}", topic.summary());
                for note in &topic.notes {
                    println!("  - {}", truncate_line(note, 76));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(topic).unwrap());
            }
            OutputFormat::Quiet => {
                for note in &topic.notes {
                    println!("{}", note);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate to first line and max length, adding "..." if truncated
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    if first_line.len() <= max_len {
        first_line.to_string()
    } else {
        format!("{}...", &first_line[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
        assert_eq!(truncate_line("a very long single line", 10), "a very ...");
    }
}
