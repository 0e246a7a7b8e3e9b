mod args;
mod environment;
mod liberate_case;

pub use args::{LiberateCaseArgs, OptimizationArgs};
pub use environment::{Level, LiberationEnvironment};
pub use liberate_case::CaseLiberator;

/// Named tallies of the simplifications a pass performed.
pub type SimplifierCounts = counter::Counter<String>;
