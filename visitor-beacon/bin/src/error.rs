use std::path::PathBuf;

use snafu::Snafu;

use crate::config;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Could not load environment file, error: {source}"))]
    LoadEnvFile { source: dotenvy::Error },

    #[snafu(display("{source}"))]
    Config { source: config::Error },

    #[snafu(display("Static directory {} does not exist", path.display()))]
    StaticDirNotFound { path: PathBuf },

    #[snafu(display("Could not initialize logger, error: {source}"))]
    InitializeLogger { source: beacon_cli_common::config::LogError },

    #[snafu(display("Could not initialize tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },

    #[snafu(display("{source}"))]
    Serve { source: visitor_beacon_server::Error },
}

impl From<config::Error> for Error {
    fn from(source: config::Error) -> Self { Self::Config { source } }
}

impl From<visitor_beacon_server::Error> for Error {
    fn from(source: visitor_beacon_server::Error) -> Self { Self::Serve { source } }
}

pub trait CommandError {
    fn exit_code(&self) -> exitcode::ExitCode;
}

impl CommandError for Error {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::LoadEnvFile { .. } | Self::Config { .. } => exitcode::CONFIG,
            Self::StaticDirNotFound { .. } => exitcode::NOINPUT,
            Self::InitializeLogger { .. } => exitcode::CANTCREAT,
            Self::InitializeTokioRuntime { .. } => exitcode::OSERR,
            Self::Serve { .. } => exitcode::SOFTWARE,
        }
    }
}
