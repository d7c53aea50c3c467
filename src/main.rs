use clap::Parser;
use docfields::report::report_paths;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docfields",
    version,
    about = "List the field types used in legacy Word (.doc) documents"
)]
struct Cli {
    /// Documents to inspect, reported in the order given
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = report_paths(&mut out, &cli.paths)?;
    out.flush()?;

    log::info!(
        "{} document(s) inspected, {} failed",
        summary.inspected,
        summary.failed
    );
    Ok(())
}
