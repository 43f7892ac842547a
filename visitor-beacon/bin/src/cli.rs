use std::{io, io::Write, path::PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use snafu::ensure;
use utoipa::OpenApi;
use visitor_beacon_server::ApiDoc;

use crate::{
    command::run_server,
    config::{Config, Secrets},
    error, shadow,
};

#[derive(Debug, Parser)]
#[command(author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about,
    long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        long = "config",
        short = 'c',
        env = "VISITOR_BEACON_CONFIG_FILE_PATH",
        help = "Specify a configuration file"
    )]
    config_file_path: Option<PathBuf>,

    #[command(flatten)]
    secrets: SecretArgs,
}

#[derive(Clone, Debug, Args)]
struct SecretArgs {
    #[clap(long, env = "IPINFO_TOKEN", hide_env_values = true, help = "Geolocation service token")]
    ipinfo_token: Option<String>,

    #[clap(
        long,
        env = "IPQUALITYSCORE_KEY",
        hide_env_values = true,
        help = "Proxy/VPN risk service key"
    )]
    ipqualityscore_key: Option<String>,

    #[clap(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true, help = "Telegram bot token")]
    telegram_bot_token: Option<String>,

    #[clap(long, env = "CHAT_ID", hide_env_values = true, help = "Telegram chat receiving reports")]
    chat_id: Option<String>,
}

impl From<SecretArgs> for Secrets {
    fn from(
        SecretArgs { ipinfo_token, ipqualityscore_key, telegram_bot_token, chat_id }: SecretArgs,
    ) -> Self {
        Self {
            geo_token: ipinfo_token,
            risk_key: ipqualityscore_key,
            bot_token: telegram_bot_token,
            chat_id,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(about = "Print version information")]
    Version,

    #[clap(about = "Output shell completion code for the specified shell (bash, zsh, fish)")]
    Completion { shell: Shell },

    #[clap(about = "Output default configuration")]
    DefaultConfig,

    #[clap(about = "Run server")]
    #[command(visible_alias = "run")]
    Server,

    #[clap(about = "Output `OpenApi` document")]
    OpenApi,
}

impl Cli {
    pub fn run(self) -> Result<(), Box<error::Error>> {
        match self.command {
            Command::Version => {
                io::stdout()
                    .write_all(Self::command().render_long_version().as_bytes())
                    .expect("failed to write to stdout");
            }
            Command::Completion { shell } => {
                let mut command = Self::command();
                let bin_name = command.get_name().to_string();
                clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
            }
            Command::DefaultConfig => {
                let config_text =
                    serde_yaml::to_string(&Config::default()).expect("`Config` is serializable");
                io::stdout().write_all(config_text.as_bytes()).expect("failed to write to stdout");
            }
            Command::Server => {
                let config = self.load_config()?;
                run_server(config)?;
            }
            Command::OpenApi => {
                io::stdout()
                    .write_all(
                        ApiDoc::openapi()
                            .to_yaml()
                            .expect("ApiDoc should be valid yaml")
                            .as_bytes(),
                    )
                    .expect("failed to write to stdout");
            }
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn load_config(&self) -> Result<Config, error::Error> {
        let mut config = Config::load_or_default(self.config_file_path.as_deref())?;
        config.apply_secrets(self.secrets.clone().into());
        ensure!(
            config.web.static_dir.is_dir(),
            error::StaticDirNotFoundSnafu { path: config.web.static_dir.clone() }
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() { Cli::command().debug_assert(); }

    #[test]
    fn test_parse_secrets_from_flags() {
        let cli = Cli::try_parse_from([
            "visitor-beacon",
            "--ipinfo-token",
            "geo",
            "--chat-id=-100",
            "run",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Server));
        let secrets = Secrets::from(cli.secrets);
        assert_eq!(secrets.geo_token.as_deref(), Some("geo"));
        assert_eq!(secrets.chat_id.as_deref(), Some("-100"));
    }

    fn parse_with_config(name: &str, content: &str) -> (Cli, PathBuf) {
        let path = std::env::temp_dir().join(format!("visitor-beacon-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        let cli =
            Cli::try_parse_from(["visitor-beacon", "--config", path.to_str().unwrap(), "run"]).unwrap();
        (cli, path)
    }

    #[test]
    fn test_load_config_requires_static_dir() {
        let (cli, path) = parse_with_config(
            "missing-static-dir.yaml",
            "web:\n  static_dir: /nonexistent/visitor-beacon/public\n",
        );

        let err = cli.load_config().unwrap_err();
        assert!(matches!(err, error::Error::StaticDirNotFound { .. }), "{err}");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_config_with_static_dir() {
        let static_dir = std::env::temp_dir();
        let (cli, path) = parse_with_config(
            "static-dir.yaml",
            &format!("web:\n  static_dir: {}\n", static_dir.display()),
        );

        let config = cli.load_config().unwrap();
        assert!(config.web.static_dir.is_dir());

        std::fs::remove_file(path).unwrap();
    }
}
