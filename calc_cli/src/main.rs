//! # Calculator CLI
//!
//! Line-oriented front end for `calc_core`. Reads one command per line from
//! stdin and runs it against a single calculator session, so memory and
//! chain state carry over between lines:
//!
//! ```text
//! > chain 10
//! chain = 10
//! > chain_add 5
//! chain = 15
//! > {"op": "chain_divide", "value": 0}
//! error[DIVISION_BY_ZERO]: Cannot divide by zero in 'chain_divide'
//! ```
//!
//! Passing a command as arguments runs it once and exits:
//! `calc_cli divide 1 0` exits with status 1.

mod logging;
mod output;
mod parse;
mod settings;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use calc_core::Session;
use clap::Parser;
use tracing::info;

use crate::output::{render_error, render_output, render_parse_error};
use crate::parse::{parse_line, parse_words, Line};
use crate::settings::{OutputFormat, Settings};

#[derive(Parser, Debug)]
#[command(name = "calc_cli", version, about = "Calculator command interpreter")]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON objects
    #[arg(long)]
    json: bool,

    /// Decimal places for floating-point results
    #[arg(short, long)]
    precision: Option<usize>,

    /// Log filter, e.g. `debug` or `calc_core=trace`
    #[arg(long)]
    log_level: Option<String>,

    /// Do not print a prompt in interactive mode
    #[arg(long)]
    no_prompt: bool,

    /// Run a single command (e.g. `add 2 3`) and exit
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

impl Cli {
    fn apply_to(&self, settings: &mut Settings) {
        if self.json {
            settings.output = OutputFormat::Json;
        }
        if self.precision.is_some() {
            settings.precision = self.precision;
        }
        if let Some(level) = &self.log_level {
            settings.logging.default = level.clone();
        }
        if self.no_prompt {
            settings.prompt = false;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    cli.apply_to(&mut settings);
    logging::init(&settings.logging);

    let mut session = Session::new();

    if !cli.command.is_empty() {
        let words: Vec<&str> = cli.command.iter().map(String::as_str).collect();
        return Ok(run_once(&mut session, &words, &settings));
    }

    run_interactive(&mut session, &settings)?;
    Ok(ExitCode::SUCCESS)
}

fn run_once(session: &mut Session, words: &[&str], settings: &Settings) -> ExitCode {
    let command = match parse_words(words) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", render_parse_error(&e, settings));
            return ExitCode::FAILURE;
        }
    };
    match session.execute(&command) {
        Ok(output) => {
            println!("{}", render_output(&output, settings));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", render_error(&e, settings));
            ExitCode::FAILURE
        }
    }
}

fn run_interactive(session: &mut Session, settings: &Settings) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let show_prompt = settings.prompt && stdin.is_terminal();
    let mut stdout = io::stdout();

    loop {
        if show_prompt {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let rendered = match parse_line(&line) {
            Ok(Line::Skip) => continue,
            Ok(Line::Quit) => break,
            Ok(Line::Command(command)) => match session.execute(&command) {
                Ok(output) => render_output(&output, settings),
                Err(e) => render_error(&e, settings),
            },
            Err(e) => render_parse_error(&e, settings),
        };
        writeln!(stdout, "{rendered}")?;
    }

    info!(
        executed = session.executed(),
        failed = session.failed(),
        "session finished"
    );
    Ok(())
}
