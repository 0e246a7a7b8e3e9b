use clap::{arg, Args};

#[derive(Args, Clone, Debug, PartialEq)]
pub struct LiberateCaseArgs {
    #[arg(long)]
    pub no_liberate_case: bool,

    /// Largest right-hand side (in size units) a recursive group may have and still be unrolled.
    #[arg(long, default_value_t = 2000)]
    pub liberate_case_threshold: usize,

    #[arg(long)]
    pub no_liberate_case_threshold: bool,
}

impl LiberateCaseArgs {
    pub fn bomb_out_size(&self) -> Option<usize> {
        if self.no_liberate_case_threshold {
            None
        } else {
            Some(self.liberate_case_threshold)
        }
    }
}

impl Default for LiberateCaseArgs {
    fn default() -> Self {
        LiberateCaseArgs {
            no_liberate_case: false,
            liberate_case_threshold: 2000,
            no_liberate_case_threshold: false,
        }
    }
}

#[derive(Args)]
pub struct OptimizationArgs {
    #[command(flatten)]
    pub liberate_case_args: LiberateCaseArgs,
}
