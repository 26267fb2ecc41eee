use clap::Parser;
use console::style;
use ivy::interpret;
use ivy_source::Source;
use ivy_value::{Scope, Value};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a `tracing` filter directive (e.g. `ivy_eval=trace`).
const LOG_ENV: &str = "IVY_LOG";

#[derive(Parser, Debug)]
#[command(name = "ivy")]
#[command(about = "Runs an ivy script, or starts an interactive session when no script is given.")]
struct Cli {
    /// Script to run.
    script: Option<PathBuf>,

    /// Raise the log level (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn print_value(value: Option<Value>) {
    if let Some(value) = value {
        // `Display` already unwraps return signals
        println!("{}", value);
    }
}

/// Runs a script in a fresh scope. Exits the process with status 1 if the script fails.
fn run_file(path: &Path) -> io::Result<()> {
    let content = fs::read_to_string(path)?;
    let name = path.display().to_string();
    let source = Source::with_name(&name, &content);

    match interpret(source.content, &Scope::new()) {
        Ok(value) => print_value(value),
        Err(err) => {
            eprint!("{}", source.report(&err.to_diagnostic()));
            process::exit(1);
        }
    }
    Ok(())
}

fn repl() -> io::Result<()> {
    let scope: Rc<Scope> = Scope::new(); // lives for the whole session
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Starting REPL...");
    loop {
        print!(">> ");
        stdout.flush()?;

        let input = match lines.next() {
            Some(line) => line?,
            None => return Ok(()), // end of input
        };

        let source = Source::with_name("<repl>", &input);
        match interpret(source.content, &scope) {
            Ok(value) => print_value(value),
            Err(err) => {
                debug!(error = ?err, "input rejected");
                eprint!("{}", source.report(&err.to_diagnostic()));
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.script {
        Some(path) => run_file(path),
        None => repl(),
    };
    if let Err(err) = result {
        eprintln!("{}: {}", style("error").red().bold(), err);
        process::exit(1);
    }
}
