//! Command-line interface parsing and handling
//!
//! This module parses arguments, sets up tracing and dispatches to the chat
//! loop or one of the one-shot commands.

pub mod model_list;
pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::core::config::{Config, ConfigKey};
use crate::core::endpoint::{EndpointOverrides, EndpointSettings};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "genyx")]
#[command(version)]
#[command(about = "A line-oriented chat client for OpenAI-compatible endpoints")]
#[command(
    long_about = "GENYX keeps several independent conversations in memory and sends each \
message, together with the history of its conversation, to an OpenAI-compatible \
chat-completions endpoint.\n\n\
Environment Variables:\n\
  GENYX_API_KEY     Bearer credential for the endpoint\n\
  HF_TOKEN          Used when GENYX_API_KEY is not set\n\
  RUST_LOG          Log filter (default: warn)\n\n\
Commands inside the chat:\n\
  /help             List commands\n\
  /new              Start a new conversation\n\
  /sessions         List conversations\n\
  /switch <id|n>    Switch conversation\n\
  /quit             Leave"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to request completions from
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(short = 'b', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Bearer credential; overrides GENYX_API_KEY and HF_TOKEN
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// Send a single message and print the reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List models offered by the endpoint
    Models,
    /// Set a configuration value, or print the configuration when no value is given
    Set {
        /// Configuration key (model, base-url, max-tokens, temperature, system-prompt)
        key: Option<String>,
        /// Value to store (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Remove a configuration value so its default applies again
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log_file.clone())?;

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let overrides = EndpointOverrides {
        base_url: args.base_url,
        model: args.model,
        api_key: args.api_key,
    };

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            run_chat(EndpointSettings::resolve(&config, overrides)).await
        }
        Commands::Say { prompt } => {
            let config = Config::load()?;
            let exit_code = run_say(EndpointSettings::resolve(&config, overrides), prompt).await?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
        Commands::Models => {
            let config = Config::load()?;
            list_models(&EndpointSettings::resolve(&config, overrides)).await
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match apply_set(&mut config, key.as_deref(), &value) {
                Ok(Some(message)) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Ok(None) => config.print_all(),
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_unset(&mut config, &key) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}

/// Applies `genyx set`. `Ok(None)` means there was nothing to store and the
/// configuration should be printed instead.
fn apply_set(config: &mut Config, key: Option<&str>, value: &[String]) -> Result<Option<String>, String> {
    let Some(key) = key else {
        return Ok(None);
    };
    let key = parse_key(key)?;
    if value.is_empty() {
        return Ok(None);
    }

    let value = value.join(" ");
    config.set_key(key, &value)?;
    Ok(Some(format!("Set {} to: {value}", key.as_str())))
}

fn apply_unset(config: &mut Config, key: &str) -> Result<String, String> {
    let key = parse_key(key)?;
    config.unset_key(key);
    Ok(format!("Unset {}", key.as_str()))
}

fn parse_key(name: &str) -> Result<ConfigKey, String> {
    ConfigKey::parse(name).ok_or_else(|| {
        let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
        format!("Unknown config key: {name} (expected one of {})", known.join(", "))
    })
}
