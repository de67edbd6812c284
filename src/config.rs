use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::artifacts::ArtifactPaths;

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate a health-insurance premium from a JSON record")]
pub struct PredictArgs {
    #[arg(short, long, env = "PREMIUM_ARTIFACTS", default_value = "artifacts",
    help = "Directory holding the model and scaler artifacts")]
    pub artifacts: PathBuf,
    #[arg(short, long, help = "JSON record to score (stdin when absent)")]
    pub input: Option<PathBuf>,
    #[arg(long, help = "Write the scaled feature row to this CSV file")]
    pub features_out: Option<PathBuf>,
    #[arg(long, help = "Skip the input form range and vocabulary checks")]
    pub skip_form_checks: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Verbose level: -v for debug, -vv for trace (info otherwise)")]
    pub verbose: u8,
}

impl PredictArgs {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::from_dir(&self.artifacts)
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
