use crate::config::{Configuration, DEFAULT_THEME};
use crate::discovery;
use crate::error::ConfigError;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Parser)]
#[command(name = "leafwind")]
#[command(version = "0.1.0")]
#[command(about = "Load, validate and export a utility-CSS theme configuration")]
pub struct CliArgs {
    /// Configuration file (default: discovered, then the built-in theme)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Validate the configuration and print a summary
    Check,
    /// Print the configuration in the generator's input format
    Export {
        #[arg(long, short = 'f', value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// List the files the content globs select
    Files,
    /// Run the generator and write the stylesheet
    Build {
        /// Stylesheet output path (stdout if omitted)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Generator command
        #[arg(long, default_value_t = String::from("npx"))]
        generator: String,

        /// Generator arguments; `{config}` is replaced by the module path
        #[arg(long = "generator-arg", allow_hyphen_values = true)]
        generator_args: Vec<String>,

        /// Where to write the generated config module
        #[arg(long, default_value = "tailwind.config.cjs")]
        module: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Module,
    Toml,
}

impl CliArgs {
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Check)
    }

    /// `--config` first, then a discovered file, then the built-in theme.
    pub fn load_config(&self) -> Result<Configuration, ConfigError> {
        self.load_config_in(Path::new("."))
    }

    /// An explicit `--config` scans relative to its own directory. Discovered
    /// files and the built-in theme scan `working_dir`, so a user-wide theme
    /// applies to the project it is run in.
    pub fn load_config_in(&self, working_dir: &Path) -> Result<Configuration, ConfigError> {
        if let Some(path) = &self.config {
            return Configuration::from_file(path);
        }
        match discovery::find_config_file_in(working_dir) {
            Some(path) => {
                info!("Using configuration {}", path.display());
                Configuration::from_file_in(&path, working_dir)
            }
            None => {
                info!("No configuration file found, using the built-in theme");
                Configuration::from_toml_str_in(DEFAULT_THEME, working_dir)
            }
        }
    }
}

/// Parse the process arguments. Help and version requests come back as
/// errors too; `clap::Error::exit` prints them with the right exit code.
pub fn parse_args() -> Result<CliArgs, clap::Error> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args)
}
