// MoodMate terminal chat
// Line based front end for the companion actor

use anyhow::{Context, Result};
use moodmate_core::actors::companion::CompanionHandle;
use moodmate_core::actors::traits::ChatCompanion;
use moodmate_core::brain::Companion;
use moodmate_core::chat::{ChatMessage, Sender};
use moodmate_core::config::CompanionConfig;
use moodmate_core::telemetry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "Commands: /history, /reset, /lang <code>, /quit";

fn render(message: &ChatMessage) -> String {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "moodmate",
    };
    match message.emotion {
        Some(mood) => format!("[{}] {} ({})", who, message.text, mood),
        None => format!("[{}] {}", who, message.text),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = CompanionConfig::from_env().context("Invalid MOODMATE_* configuration")?;
    telemetry::init(config.log_format);
    info!("Starting MoodMate (locale: {})", config.locale);

    let companion = Companion::from_config(&config).context("Failed to load companion tables")?;
    let handle = CompanionHandle::new(companion);
    let mut locale = config.locale.clone();

    for message in handle.history().await? {
        println!("{}", render(&message));
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "/quit" => break,
            "/history" => {
                for message in handle.history().await? {
                    println!("{}", render(&message));
                }
            }
            "/reset" => {
                for message in handle.set_locale(locale.clone()).await? {
                    println!("{}", render(&message));
                }
            }
            _ if input.starts_with("/lang") => {
                match input.split_whitespace().nth(1) {
                    Some(code) => {
                        locale = code.to_string();
                        for message in handle.set_locale(locale.clone()).await? {
                            println!("{}", render(&message));
                        }
                    }
                    None => println!("{}", HELP),
                }
            }
            _ if input.starts_with('/') => println!("{}", HELP),
            _ => match handle.chat(input.to_string()).await {
                Ok(Some(reply)) => println!("{}", render(&reply)),
                Ok(None) => {}
                Err(e) => warn!("Companion failed to answer: {}", e),
            },
        }
    }

    handle.shutdown().await?;
    info!("Goodbye");
    Ok(())
}
