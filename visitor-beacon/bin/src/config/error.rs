use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Could not open config from {}, error: {source}", filename.display()))]
    OpenConfig { filename: PathBuf, source: std::io::Error },

    #[snafu(display("Count not parse config from {}, error: {source}", filename.display()))]
    ParseConfig { filename: PathBuf, source: serde_yaml::Error },

    #[snafu(display("{source}"))]
    ResolveLogFilePath { source: beacon_cli_common::config::LogError },

    #[snafu(display("Could not resolve static directory {}, error: {source}", path.display()))]
    ResolveStaticDir { path: PathBuf, source: std::io::Error },
}
