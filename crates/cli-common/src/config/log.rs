use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    fs::OpenOptions,
    io,
    path::PathBuf,
    str::FromStr,
};

use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use snafu::{ResultExt, Snafu};
use tracing_subscriber::{
    fmt::{format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Per-target levels appended to the base `info` level.
const DEFAULT_DIRECTIVES: &[(&str, &str)] = &[
    ("visitor_beacon", "info"),
    ("visitor_beacon_server", "info"),
    ("notification", "info"),
    ("tower_http", "info"),
    ("reqwest", "warn"),
    ("hyper", "warn"),
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not resolve log file path {}, error: {source}", path.display()))]
    ResolveFilePath { path: PathBuf, source: io::Error },

    #[snafu(display("Could not open log file {}, error: {source}", path.display()))]
    OpenFile { path: PathBuf, source: io::Error },

    #[snafu(display("Could not connect to journald, error: {source}"))]
    ConnectJournald { source: io::Error },

    #[snafu(display("Invalid log filters `{filters}`, error: {source}"))]
    ParseFilters { filters: String, source: tracing_subscriber::filter::ParseError },

    #[snafu(display("Could not install the global logger, error: {source}"))]
    InstallSubscriber { source: tracing_subscriber::util::TryInitError },
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_outputs")]
    pub outputs: Vec<LogOutput>,

    /// Appends every event to this file, in addition to `outputs`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default = "LogConfig::default_log_filters")]
    pub log_filters: String,

    #[serde(default = "LogConfig::default_log_formatter")]
    #[serde_as(as = "DisplayFromStr")]
    pub formatter: LogFormatter,

    /// Emits `time.busy` and `time.idle` when a span closes.
    #[serde(default)]
    pub show_fn_latency: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            outputs: Self::default_outputs(),
            file_path: None,
            log_filters: Self::default_log_filters(),
            formatter: Self::default_log_formatter(),
            show_fn_latency: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn default_outputs() -> Vec<LogOutput> { vec![LogOutput::Stdout] }

    #[must_use]
    pub fn default_log_filters() -> String {
        std::iter::once("info".to_string())
            .chain(DEFAULT_DIRECTIVES.iter().map(|(target, level)| format!("{target}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[inline]
    #[must_use]
    pub const fn default_log_formatter() -> LogFormatter { LogFormatter::Pretty }

    /// Expands `~` and relative segments of `file_path` in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the path can not be resolved.
    pub fn resolve_file_path(&mut self) -> Result<(), Error> {
        if let Some(path) = &self.file_path {
            let resolved = path
                .try_resolve()
                .with_context(|_| ResolveFilePathSnafu { path: path.clone() })?
                .into_owned();
            self.file_path = Some(resolved);
        }
        Ok(())
    }

    /// Installs the global logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the filters are invalid, an output can not be opened
    /// or a global logger is already installed.
    pub fn init(&self) -> Result<(), Error> {
        let filter = self.env_filter()?;
        let span_events = if self.show_fn_latency { FmtSpan::CLOSE } else { FmtSpan::NONE };

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(self.outputs.len() + 1);
        for output in &self.outputs {
            layers.push(output.layer(&self.formatter, span_events.clone())?);
        }
        if let Some(path) = &self.file_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|_| OpenFileSnafu { path: path.clone() })?;
            layers.push(self.formatter.layer(file, span_events));
        }

        tracing_subscriber::registry()
            .with(layers)
            .with(filter)
            .try_init()
            .context(InstallSubscriberSnafu)
    }

    fn env_filter(&self) -> Result<EnvFilter, Error> {
        EnvFilter::try_new(&self.log_filters)
            .with_context(|_| ParseFiltersSnafu { filters: self.log_filters.clone() })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOutput {
    Stdout,
    Stderr,
    Journald,
}

impl LogOutput {
    fn layer(self, formatter: &LogFormatter, span_events: FmtSpan) -> Result<BoxedLayer, Error> {
        Ok(match self {
            Self::Stdout => formatter.layer(io::stdout, span_events),
            Self::Stderr => formatter.layer(io::stderr, span_events),
            Self::Journald => tracing_journald::layer().context(ConnectJournaldSnafu)?.boxed(),
        })
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LogFormatter {
    Pretty,
    Json,
}

impl LogFormatter {
    fn layer<W>(&self, writer: W, span_events: FmtSpan) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_target(true)
            .with_span_events(span_events)
            .with_writer(writer);

        match self {
            Self::Pretty => layer.pretty().boxed(),
            Self::Json => layer.json().flatten_event(true).boxed(),
        }
    }
}

impl FromStr for LogFormatter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            _ => Ok(Self::Pretty),
        }
    }
}

impl Display for LogFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}
