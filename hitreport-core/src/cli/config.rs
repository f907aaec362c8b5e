use crate::conf::{ReportOptions, load_options};
use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a configuration file and exit
    Check {
        /// Path to the TOML options file
        #[arg(default_value = "hitreport.toml")]
        path: PathBuf,
    },

    /// Print resolved configuration
    Dump {
        /// Options file to resolve; built-in defaults when omitted
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Toml,
    Json,
    Yaml,
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(&path),
        ConfigCmd::Dump { path, json, yaml } => {
            let format = if json {
                DumpFormat::Json
            } else if yaml {
                DumpFormat::Yaml
            } else {
                DumpFormat::Toml
            };
            dump(path.as_deref(), format)
        }
    }
}

pub fn check(path: &Path) -> Result<()> {
    let options = load_options(path)?;

    println!("✔ Config loaded successfully");
    if options.read_from_stdin {
        println!("✔ reading from stdin");
    } else if !options.input_files.is_empty() {
        println!("✔ {} input files", options.input_files.len());
    } else {
        println!(
            "✔ searching {} for '{}'{}",
            options.log_dir.display(),
            options.access_glob,
            if options.recurse { " recursively" } else { "" }
        );
    }
    println!(
        "✔ report to {}",
        options
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string())
    );

    Ok(())
}

pub fn dump(path: Option<&Path>, format: DumpFormat) -> Result<()> {
    let options = match path {
        Some(path) => load_options(path)?,
        None => ReportOptions::default(),
    };

    println!("{}", render_options(&options, format)?);
    Ok(())
}

pub fn render_options(options: &ReportOptions, format: DumpFormat) -> Result<String> {
    Ok(match format {
        DumpFormat::Toml => toml::to_string_pretty(options)?,
        DumpFormat::Json => serde_json::to_string_pretty(options)?,
        DumpFormat::Yaml => serde_yaml::to_string(options)?,
    })
}
