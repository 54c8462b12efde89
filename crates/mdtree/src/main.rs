//! mdtree CLI - convert markdown to a self-contained HTML page with a table
//! of contents tree.

mod convert;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use convert::ConvertArgs;
use output::Output;

/// mdtree - Markdown to HTML with a table of contents tree.
#[derive(Parser)]
#[command(name = "mdtree", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.convert.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
