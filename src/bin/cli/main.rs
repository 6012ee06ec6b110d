use std::{env, ops::ControlFlow};

use anyhow::Result;
use clap::ArgMatches;
use dotenvy::dotenv;
use reedline::Signal;

use bookfinder::{config::Config, types::key::BookKey};

mod command_parser;
mod logger;
mod prompt;
mod repl;
mod session;

use session::Session;

async fn handle_matches(matches: &ArgMatches, session: &Session) -> Result<ControlFlow<()>> {
    match matches.subcommand() {
        Some(("search", matches)) => {
            let terms = matches
                .get_many::<String>("terms")
                .map(|x| x.cloned().collect::<Vec<String>>())
                .unwrap_or_default()
                .join(" ");
            session.search(&terms).await?;
        }
        Some(("show", matches)) => {
            let key = matches
                .get_one::<String>("key")
                .map(String::as_str)
                .unwrap_or_default();
            session.show(BookKey::parse(key)?).await?;
        }
        Some(("open", matches)) => {
            let position = matches.get_one::<usize>("position").copied().unwrap_or(0);
            session.open(position).await?;
        }
        Some(("pick", _)) => session.pick().await?,
        Some(("exit", _)) => return Ok(ControlFlow::Break(())),
        Some((name, _)) => anyhow::bail!("Unknown command {name}"),
        None => anyhow::bail!("No command given"),
    }
    Ok(ControlFlow::Continue(()))
}

async fn handle_command(command: &str, session: &Session) -> Result<ControlFlow<()>> {
    let command = match shlex::split(command) {
        Some(command) => command,
        None => anyhow::bail!("Invalid command"),
    };
    if command.is_empty() {
        return Ok(ControlFlow::Continue(()));
    }
    let matches = command_parser::arg_parser().try_get_matches_from(command)?;
    handle_matches(&matches, session).await
}

async fn run_repl(session: &Session) -> Result<()> {
    let mut repl = repl::Repl::new(
        command_parser::generate_completions(),
        Some(session.config.history_location()),
    );
    loop {
        match repl.read_line(session.status()) {
            Ok(Signal::Success(buffer)) => match handle_command(&buffer, session).await {
                Ok(ControlFlow::Break(())) => break,
                Ok(ControlFlow::Continue(())) => (),
                Err(e) => println!("{}", session.config.output_error.format_str(e)),
            },
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nAborted!");
                break;
            }
            Err(e) => {
                println!("{}", session.config.output_error.format_str(e));
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args_parsed = command_parser::arg_parser_cli().get_matches_from(env::args_os().skip(1));

    dotenv().ok();
    let config = Config::read_config()?;

    let verbose = args_parsed
        .subcommand()
        .map(|(_, matches)| matches!(matches.try_get_one::<bool>("verbose"), Ok(Some(true))))
        .unwrap_or(false);
    logger::init(&config, verbose)?;

    match args_parsed.subcommand() {
        Some(("config", _)) => {
            print!("{}", Config::default_as_string()?);
            Ok(())
        }
        Some(("repl", _)) => run_repl(&Session::new(config)?).await,
        _ => {
            handle_matches(&args_parsed, &Session::new(config)?).await?;
            Ok(())
        }
    }
}
