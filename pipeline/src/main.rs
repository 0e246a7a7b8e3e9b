use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use args::Cli;
use clap::Parser;
use core_ir::CoreProgram;
use log::{error, info};
use optimization::CaseLiberator;
use serde::Deserialize;
use thiserror::Error;

mod args;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to access standard streams: {0}")]
    Stdio(#[from] io::Error),
    #[error("malformed program: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a program of any nesting depth, growing the stack as the tree gets deeper.
fn read_program(reader: impl Read) -> Result<CoreProgram, PipelineError> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    deserializer.disable_recursion_limit();
    let program = CoreProgram::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(program)
}

fn load_program(input: Option<&Path>) -> Result<CoreProgram, PipelineError> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(|source| PipelineError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_program(BufReader::new(file))
        }
        None => read_program(io::stdin().lock()),
    }
}

fn write_program(program: &CoreProgram, pretty: bool, mut writer: impl Write) -> io::Result<()> {
    if pretty {
        writeln!(writer, "{}", program)?;
    } else {
        serde_json::to_writer(&mut writer, program)?;
        writeln!(writer)?;
    }
    writer.flush()
}

fn store_program(
    program: &CoreProgram,
    pretty: bool,
    output: Option<&Path>,
) -> Result<(), PipelineError> {
    match output {
        Some(path) => File::create(path)
            .and_then(|file| write_program(program, pretty, BufWriter::new(file)))
            .map_err(|source| PipelineError::Io {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(write_program(program, pretty, io::stdout().lock())?),
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let program = load_program(cli.input.as_deref())?;
    let bindings = program.bindings.len();
    let (program, counts) =
        CaseLiberator::liberate(program, &cli.optimization_args.liberate_case_args);
    info!(
        "processed {} top-level bindings ({} simplifications)",
        bindings,
        counts.values().sum::<usize>()
    );
    store_program(&program, cli.pretty, cli.output.as_deref())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
