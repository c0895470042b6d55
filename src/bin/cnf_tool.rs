use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cnf_toolkit::XorCNF;
use tracing::info;

/// Inspect and transform DIMACS / XOR-CNF formulas.
#[derive(Debug, Parser)]
#[command(name = "cnf-tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print nvars and clause counts for a DIMACS/XOR-CNF file.
    Stats {
        /// Path to a DIMACS (or x-extended XOR-CNF) file.
        path: PathBuf,
    },
    /// Expand all XOR clauses via Tseitin and emit the equivalent plain CNF.
    ToCnf {
        /// Path to a DIMACS/XOR-CNF input file.
        path: PathBuf,
        /// Write the expanded CNF here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Stats { path } => stats(&path),
        Command::ToCnf { path, output } => to_cnf(&path, output.as_deref()),
    }
}

fn read_formula(path: &std::path::Path) -> Result<XorCNF> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    XorCNF::from_dimacs(&text).with_context(|| format!("parsing {} as DIMACS", path.display()))
}

fn stats(path: &std::path::Path) -> Result<()> {
    let formula = read_formula(path)?;
    info!(path = %path.display(), "parsed formula");
    println!("nvars: {}", formula.nvars());
    println!("ordinary clauses: {}", formula.cnf().len());
    println!("xor clauses: {}", formula.xors().len());
    Ok(())
}

fn to_cnf(path: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let formula = read_formula(path)?;
    let expanded = formula.to_cnf();
    info!(
        from_xor_clauses = formula.xors().len(),
        expanded_clauses = expanded.len(),
        "expanded xor clauses via tseitin"
    );

    let combined = XorCNF::from_parts(expanded, cnf_toolkit::XorClauseList::new());
    let dimacs = combined.to_dimacs();

    match output {
        Some(path) => fs::write(path, dimacs).with_context(|| format!("writing {}", path.display()))?,
        None => print!("{dimacs}"),
    }
    Ok(())
}
