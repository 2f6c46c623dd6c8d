//! Logging to stderr.

use anyhow::Context as _;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct LoggingArgs {
    /// Additional logging to stderr.
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Remove timestamps from logs so that they are deterministic.
    ///
    /// This option is intended for internal tests only.
    #[arg(long = "simplify-log-format", hide = true)]
    pub(crate) simplify_log_format: bool,
}

impl LoggingArgs {
    /// The most detailed level that will be written.
    pub fn level(&self) -> log::LevelFilter {
        match self.verbose {
            false => log::LevelFilter::Debug,
            true => log::LevelFilter::Trace,
        }
    }
}

/// Install a [`log`] global logger based on user-provided `options`.
///
/// Fails if a logger was already installed.
pub fn install(options: &LoggingArgs) -> Result<(), anyhow::Error> {
    use log::LevelFilter::{Error, Off};

    let logger = simplelog::WriteLogger::new(
        options.level(),
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_time_level(if options.simplify_log_format {
                Off
            } else {
                Error
            })
            .build(),
        std::io::stderr(),
    );
    let max_level = simplelog::SharedLogger::level(&*logger);

    log::set_boxed_logger(logger).context("failed to initialize logging")?;
    log::set_max_level(max_level);
    Ok(())
}
