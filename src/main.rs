use anyhow::{Context, Result};
use leafwind::cli::{self, CliCommand, ExportFormat};
use leafwind::config::Configuration;
use leafwind::export;
use leafwind::generator::{ExternalGenerator, Generator, GeneratorConfig};
use log::warn;

/// Parse arguments, load and validate the configuration, then run the
/// requested subcommand. Validation errors exit non-zero with the offending
/// entry named in the message.
fn main() -> Result<()> {
    let cli_args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    // Initialize logger (set RUST_LOG env var to control verbosity)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = cli_args
        .load_config()
        .context("Configuration is invalid")?;

    match cli_args.command() {
        CliCommand::Check => print_summary(&config),
        CliCommand::Export { format } => {
            let rendered = match format {
                ExportFormat::Json => serde_json::to_string_pretty(&export::to_json(&config))?,
                ExportFormat::Module => export::to_module(&config)?,
                ExportFormat::Toml => config.to_toml_string()?,
            };
            println!("{}", rendered);
        }
        CliCommand::Files => {
            for path in config.content.walk() {
                println!("{}", path.display());
            }
        }
        CliCommand::Build {
            out,
            generator,
            generator_args,
            module,
        } => {
            let mut generator_config = GeneratorConfig::tailwind(module);
            generator_config.command = generator;
            if !generator_args.is_empty() {
                generator_config.args = generator_args;
            }

            let command = generator_config.command.clone();
            let output = ExternalGenerator::new(generator_config)
                .with_context(|| format!("Cannot run generator `{}`", command))?
                .generate(&config)
                .context("Generator failed")?;

            if !output.unmatched_safelist.is_empty() {
                warn!(
                    "{} safelist entries produced no CSS",
                    output.unmatched_safelist.len()
                );
            }

            match out {
                Some(path) => std::fs::write(&path, &output.stylesheet)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{}", output.stylesheet),
            }
        }
    }

    Ok(())
}

fn print_summary(config: &Configuration) {
    let theme = &config.theme;
    println!("Configuration OK");
    println!("  content globs:  {}", config.content.patterns().len());
    println!("  safelist:       {}", config.safelist.len());
    println!("  color entries:  {}", theme.colors.entries().len());
    for group in theme.colors.seasonal_groups() {
        println!("    seasonal:     {}", group.name);
    }
    for font in &theme.fonts {
        println!("  font {}:      {}", font.name, font.css_value());
    }
    println!("  keyframes:      {}", theme.keyframes.len());
    for binding in &theme.animations {
        println!("  animation {:<14} {}", binding.name, binding.shorthand());
    }
    println!("  plugins:        {}", config.plugins.len());
}
