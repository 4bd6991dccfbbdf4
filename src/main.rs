mod config;
mod dispatch;
mod error;
mod help;
mod params;
mod registry;
mod remote;
mod render;
mod shell;
mod tokenizer;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

use config::Config;
use registry::Registry;
use remote::SlackClient;
use render::Renderer;
use shell::Shell;

#[derive(Parser)]
#[command(
    name = "slack-shell",
    version,
    about = "Interactive shell for the Slack Web API",
    long_about = "Type resource.action commands with key=value arguments and get the API response back as JSON. Run without a subcommand to start the shell."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// API token (falls back to api.token in the config file)
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single command and exit
    Exec {
        /// Command in resource.action form (e.g. chat.postMessage)
        command: String,

        /// Arguments as key=value
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List known commands with their usage
    Commands {
        /// Only commands starting with this prefix
        prefix: Option<String>,
    },

    /// Show or create the configuration file
    Config {
        /// Write the default config file
        #[arg(long)]
        create: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => {
            let config = Config::load()?;
            let client = SlackClient::new(&config.api, config.resolve_token(cli.token.as_deref()))?;
            let shell = Shell::new(&client, renderer(&config));
            shell.run(&config.shell)?;
        }

        Some(Commands::Exec { command, args }) => {
            let config = Config::load()?;
            let client = SlackClient::new(&config.api, config.resolve_token(cli.token.as_deref()))?;
            let shell = Shell::new(&client, renderer(&config));

            let mut tokens = Vec::with_capacity(args.len() + 1);
            tokens.push(command);
            tokens.extend(args);

            let mut out = io::stdout().lock();
            let ok = shell
                .execute(&tokens, &mut out)
                .context("Failed to write output")?;
            out.flush()?;
            if !ok {
                std::process::exit(1);
            }
        }

        Some(Commands::Commands { prefix }) => {
            print_commands(prefix.as_deref().unwrap_or(""))?;
        }

        Some(Commands::Config { create }) => {
            if create {
                let path = Config::create_default()?;
                println!("Created: {}", path.display());
            } else {
                config::show_config()?;
            }
        }
    }

    Ok(())
}

fn renderer(config: &Config) -> Renderer {
    Renderer::new(config.display.indent, config.display.colors)
}

fn print_commands(prefix: &str) -> Result<()> {
    let prefix = prefix.to_ascii_lowercase();
    let mut out = io::stdout().lock();
    for spec in Registry::global().iter() {
        let name = spec.name();
        if !name.to_ascii_lowercase().starts_with(&prefix) {
            continue;
        }
        writeln!(out, "{}", format!("{name} {}", spec.usage).trim_end())?;
    }
    Ok(())
}
