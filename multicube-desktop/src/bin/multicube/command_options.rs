//! Command line option parsing.

use clap::Parser;

use multicube_desktop::config_files::ConfigArgs;
use multicube_desktop::logging::LoggingArgs;
use multicube_desktop::script::Script;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "multicube", author, about, version,
    help_template = "\
{name} {version}
{author}
{about-with-newline}
{usage-heading}
    {usage}

{all-args}{after-help}",
)]
pub(crate) struct MulticubeArgs {
    /// Number of ticks to run the game for.
    #[arg(long = "ticks", value_name = "N", default_value = "600")]
    pub(crate) ticks: u64,

    /// Seed for the random layout of the shell.
    ///
    /// Takes precedence over a seed in the configuration file.
    /// If neither is given, a seed is picked at random and logged.
    #[arg(long = "seed", value_name = "INTEGER")]
    pub(crate) seed: Option<u64>,

    /// Input to play, as comma-separated segments of inputs joined by “+” and
    /// followed by a tick count; for example: right*80,up+left*30,idle*10
    ///
    /// Once the script runs out, there is no input.
    #[arg(long = "script", value_name = "SCRIPT", default_value = "")]
    pub(crate) script: Script,

    #[command(flatten)]
    pub(crate) config: ConfigArgs,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}
