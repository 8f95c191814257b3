mod auth;
mod cli;
mod client;
mod commands;
mod config;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(command) = cli::parse_command(&args) else {
        cli::print_usage();
        std::process::exit(1);
    };

    commands::run(command).await
}
