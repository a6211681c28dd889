mod highlighter;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use quotient::{Coordinator, EngineOptions, render_error};
use reedline::{
    DefaultPrompt, DefaultPromptSegment, EditCommand, Emacs, FileBackedHistory, KeyCode,
    KeyModifiers, Keybindings, Reedline, ReedlineEvent, Signal, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;
use std::time::Duration;

use crate::highlighter::Highlighter;

const HISTORY_SIZE: usize = 1000;

/// Quotient - distributed arithmetic expression evaluator
///
/// Settings not given on the command line are read from TIME_ADDITION_MS,
/// TIME_SUBTRACTION_MS, TIME_MULTIPLICATIONS_MS, TIME_DIVISIONS_MS,
/// COMPUTING_POWER and WORKER_BACKOFF_MS.
#[derive(Parser, Debug)]
#[command(name = "quotient")]
#[command(about = "Evaluate arithmetic expressions on a pool of workers", long_about = None)]
struct Args {
    /// Number of workers
    #[arg(long)]
    workers: Option<usize>,

    /// Simulated cost of an addition, in milliseconds
    #[arg(long)]
    add_ms: Option<u64>,

    /// Simulated cost of a subtraction, in milliseconds
    #[arg(long)]
    sub_ms: Option<u64>,

    /// Simulated cost of a multiplication, in milliseconds
    #[arg(long)]
    mul_ms: Option<u64>,

    /// Simulated cost of a division, in milliseconds
    #[arg(long)]
    div_ms: Option<u64>,

    /// How long an idle worker waits before polling again, in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    backoff_ms: Option<u64>,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

impl Args {
    fn engine_options(&self) -> EngineOptions {
        let mut options = EngineOptions::from_env();
        if let Some(count) = self.workers {
            options = options.with_workers(count);
        }
        let costs = &mut options.costs;
        costs.add_ms = self.add_ms.unwrap_or(costs.add_ms);
        costs.sub_ms = self.sub_ms.unwrap_or(costs.sub_ms);
        costs.mul_ms = self.mul_ms.unwrap_or(costs.mul_ms);
        costs.div_ms = self.div_ms.unwrap_or(costs.div_ms);
        if let Some(ms) = self.backoff_ms {
            options.workers.backoff = Duration::from_millis(ms);
        }
        options
    }
}

fn add_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline() -> Result<(Reedline, DefaultPrompt)> {
    let mut keybindings = default_emacs_keybindings();
    add_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let mut line_editor = Reedline::create()
        .with_highlighter(Box::new(Highlighter))
        .with_edit_mode(edit_mode);

    if let Some(dir) = dirs::data_dir() {
        let history = FileBackedHistory::with_file(HISTORY_SIZE, dir.join("quotient_history"))
            .into_diagnostic()?;
        line_editor = line_editor.with_history(Box::new(history));
    }

    let prompt = DefaultPrompt::new(DefaultPromptSegment::Empty, DefaultPromptSegment::Empty);

    Ok((line_editor, prompt))
}

async fn interpret_input(coordinator: &Coordinator, input: &str, debug_parse: bool) {
    let input = input.trim();
    if input.is_empty() {
        return;
    }

    if input == ":list" {
        for record in coordinator.expressions() {
            match record.result {
                Some(value) => println!("{}  {} = {}", record.status, record.expression, value),
                None => println!("{}  {}", record.status, record.expression),
            }
        }
        return;
    }

    if debug_parse {
        match coordinator.compile(input) {
            Ok(ast) => {
                println!("=== Parsed AST ===");
                println!("{}", ast);
                println!();
            }
            Err(e) => {
                render_error(&e, input);
                return;
            }
        }
    }

    match coordinator.evaluate(input).await {
        Ok(value) => println!("{}", value),
        Err(e) => render_error(&e, input),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = args.engine_options();
    tracing::debug!(?options, "starting");
    let coordinator = Coordinator::new(options);
    let workers = coordinator.spawn_workers();

    let outcome = run(&args, &coordinator).await;
    workers.shutdown().await;
    outcome
}

async fn run(args: &Args, coordinator: &Coordinator) -> Result<()> {
    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        interpret_input(coordinator, expr, args.debug_parse).await;
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline()?;

        println!("Quotient REPL - Type expressions to evaluate, :list to show history (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = line_editor.read_line(&prompt).into_diagnostic()?;

            match sig {
                Signal::Success(buffer) => {
                    interpret_input(coordinator, &buffer, args.debug_parse).await;
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.into_diagnostic()?;
            interpret_input(coordinator, &line, args.debug_parse).await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_backoff_is_rejected() {
        assert!(Args::try_parse_from(["quotient", "--backoff-ms", "0", "1+1"]).is_err());

        let args = Args::try_parse_from(["quotient", "--backoff-ms", "1", "1+1"]).unwrap();
        assert_eq!(args.backoff_ms, Some(1));
        assert_eq!(args.engine_options().workers.backoff, Duration::from_millis(1));
    }
}
