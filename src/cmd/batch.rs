use crate::reports;
use bodyforge::batch;
use bodyforge::config::Config;
use bodyforge::error::BfResult;
use bodyforge::solver::BodySolver;
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: Config,

    /// CSV of raw measurements; header row holds the labels, optional `id` column.
    #[arg(short, long)]
    pub input: String,

    /// Where to write JSON lines. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &BatchArgs, config: &Config, solver: &BodySolver) -> BfResult<()> {
    let rows = batch::load_rows(&args.input)?;
    let outcomes = batch::solve_all(solver, &rows);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for outcome in &outcomes {
        serde_json::to_writer(&mut writer, outcome)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    if !config.output.json {
        reports::print_batch_summary(&outcomes);
    }
    Ok(())
}
