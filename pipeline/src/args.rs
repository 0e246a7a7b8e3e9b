use std::path::PathBuf;

use clap::Parser;
use optimization::OptimizationArgs;

#[derive(Parser)]
pub struct Cli {
    /// JSON program to optimize (read from stdin when absent).
    pub input: Option<PathBuf>,

    /// Where to write the result (stdout when absent).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print Core syntax instead of JSON.
    ///
    /// Every name carries its unique as a `_N` suffix; names with the same suffix denote the
    /// same binder, so an unrolled copy `f_N` is what `Main.f_N` refers to inside it.
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub optimization_args: OptimizationArgs,
}
