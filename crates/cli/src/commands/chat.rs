//! Chat command handler.
//!
//! Interactive conversation over stdin. One question is answered at a time;
//! the transcript lives for the duration of the session.

use super::{format_sources, open_engine, RecordsArgs};
use clap::Args;
use medassist_assistant::{suggested_questions, Conversation};
use medassist_core::{config::AppConfig, AppError, AppResult};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Chat with the assistant about a patient's records
#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(flatten)]
    pub records: RecordsArgs,
}

/// What a line of input asks the session to do.
#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Question(&'a str),
    Suggest,
    Clear,
    Quit,
    Empty,
}

fn parse_input(line: &str) -> ChatInput<'_> {
    match line.trim() {
        "" => ChatInput::Empty,
        "/quit" | "/exit" => ChatInput::Quit,
        "/clear" => ChatInput::Clear,
        "/suggest" => ChatInput::Suggest,
        question => ChatInput::Question(question),
    }
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let engine = open_engine(config, &self.records).await?;
        let mut conversation = Conversation::new();

        if let Some(greeting) = conversation.messages().first() {
            println!("{}", greeting.content);
        }
        println!("Type /suggest for example questions, /clear to start over, /quit to leave.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("\n> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_input(&line) {
                ChatInput::Empty => continue,
                ChatInput::Quit => break,
                ChatInput::Clear => {
                    conversation.clear();
                    println!("Conversation cleared.");
                }
                ChatInput::Suggest => {
                    for question in suggested_questions() {
                        println!("  - {}", question);
                    }
                }
                ChatInput::Question(question) => {
                    match conversation.send(&engine, question).await {
                        Ok(reply) => {
                            println!("{}{}", reply.content, format_sources(&reply.sources))
                        }
                        Err(AppError::Query(reason)) => println!("{}", reason),
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        tracing::info!(messages = conversation.len(), "Chat session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  "), ChatInput::Empty);
        assert_eq!(parse_input("/quit"), ChatInput::Quit);
        assert_eq!(parse_input("/exit\n"), ChatInput::Quit);
        assert_eq!(parse_input("/clear"), ChatInput::Clear);
        assert_eq!(parse_input("/suggest"), ChatInput::Suggest);
        assert_eq!(
            parse_input("  What was my blood pressure reading? "),
            ChatInput::Question("What was my blood pressure reading?")
        );
    }
}
