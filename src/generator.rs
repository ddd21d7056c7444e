// src/generator.rs - Handing the configuration to a utility-class generator

use crate::config::Configuration;
use crate::export;
use log::{debug, info, warn};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use thiserror::Error;

/// Placeholder in generator arguments replaced by the module path
pub const CONFIG_PLACEHOLDER: &str = "{config}";

/// Class selectors, including escaped characters (`hover\:text-red`)
static CLASS_SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.((?:\\.|[A-Za-z_-])(?:\\.|[A-Za-z0-9_-])*)").unwrap());

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Generator {0} not found")]
    NotFound(String),
    #[error("Generator I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to render generator config: {0}")]
    Render(#[from] serde_json::Error),
    #[error("Generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub stylesheet: String,
    /// Safelist entries (class or pattern source) with no selector in the stylesheet
    pub unmatched_safelist: Vec<String>,
}

/// The external tool that turns a configuration into CSS
pub trait Generator {
    fn generate(&self, config: &Configuration) -> Result<GeneratorOutput, GeneratorError>;
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Where the rendered config module is written before the command runs.
    /// Relative paths resolve against the working directory, not the
    /// directory the generator runs in.
    pub module_path: PathBuf,
}

impl GeneratorConfig {
    /// `npx tailwindcss --config <module>`; the stylesheet goes to stdout.
    pub fn tailwind(module_path: PathBuf) -> Self {
        Self {
            command: "npx".to_string(),
            args: vec![
                "tailwindcss".to_string(),
                "--config".to_string(),
                CONFIG_PLACEHOLDER.to_string(),
            ],
            module_path,
        }
    }
}

/// Runs a generator as a subprocess and reads the stylesheet from its stdout
pub struct ExternalGenerator {
    config: GeneratorConfig,
}

impl ExternalGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        // Validate generator is available
        let status = Command::new(&config.command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| GeneratorError::NotFound(config.command.clone()))?;
        if !status.success() {
            return Err(GeneratorError::NotFound(config.command.clone()));
        }
        Ok(Self { config })
    }

    /// Skip the `--version` probe, for commands that don't support it.
    pub fn without_probe(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Absolute module path, so the generator finds it from the content root
    fn module_path(&self) -> Result<PathBuf, GeneratorError> {
        Ok(std::path::absolute(&self.config.module_path)?)
    }

    fn args(&self, module_path: &Path) -> Vec<String> {
        let module = module_path.to_string_lossy();
        self.config
            .args
            .iter()
            .map(|arg| arg.replace(CONFIG_PLACEHOLDER, &module))
            .collect()
    }
}

impl Generator for ExternalGenerator {
    fn generate(&self, config: &Configuration) -> Result<GeneratorOutput, GeneratorError> {
        let module = export::to_module(config)?;
        let module_path = self.module_path()?;
        if let Some(parent) = module_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&module_path, module)?;
        debug!("Wrote generator config to {}", module_path.display());

        let args = self.args(&module_path);
        info!("Running {} {}", self.config.command, args.join(" "));
        let output = Command::new(&self.config.command)
            .args(&args)
            .current_dir(config.content.root())
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(GeneratorError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stylesheet = String::from_utf8_lossy(&output.stdout).to_string();
        let unmatched_safelist = unmatched_safelist(config, &stylesheet);
        for entry in &unmatched_safelist {
            warn!("Safelist entry {:?} produced no CSS", entry);
        }

        Ok(GeneratorOutput {
            stylesheet,
            unmatched_safelist,
        })
    }
}

/// Class names used in selectors, unescaped. Declaration values such as
/// `url(leaf.png)` are not scanned.
pub fn class_names(stylesheet: &str) -> BTreeSet<String> {
    let stylesheet = COMMENT_RE.replace_all(stylesheet, "");
    selector_preludes(&stylesheet)
        .into_iter()
        .flat_map(|prelude| CLASS_SELECTOR_RE.captures_iter(prelude))
        .map(|caps| caps[1].replace('\\', ""))
        .collect()
}

/// Text in front of each `{` that belongs to a style rule. At-rule
/// preludes (`@media`, `@keyframes`) are skipped.
fn selector_preludes(stylesheet: &str) -> Vec<&str> {
    let mut preludes = Vec::new();
    let mut start = 0;

    for (i, c) in stylesheet.char_indices() {
        match c {
            '{' => {
                let prelude = stylesheet[start..i].trim();
                if !prelude.is_empty() && !prelude.starts_with('@') {
                    preludes.push(prelude);
                }
                start = i + 1;
            }
            '}' | ';' => start = i + 1,
            _ => {}
        }
    }

    preludes
}

pub fn unmatched_safelist(config: &Configuration, stylesheet: &str) -> Vec<String> {
    let classes = class_names(stylesheet);
    config
        .safelist
        .unmatched(classes.iter().map(String::as_str))
        .into_iter()
        .map(|entry| entry.as_str().to_string())
        .collect()
}
