mod cli;
mod command;
mod config;
mod env_file;
mod error;
mod shadow {
    #![allow(clippy::needless_raw_string_hashes)]
    use shadow_rs::shadow;
    shadow!(build);

    pub use self::build::*;
}

use clap::Parser;

use self::{cli::Cli, error::CommandError};

fn main() {
    if let Err(err) = env_file::load().map_err(Box::new).and_then(|()| Cli::parse().run()) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
