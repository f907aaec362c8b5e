use crate::conf::error::ConfigError;
use crate::conf::options::ReportOptions;
use std::fs;
use std::path::Path;

/// Reads and validates a TOML options file.
pub fn load_options(path: &Path) -> Result<ReportOptions, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_options(path, &contents)
}

/// `path` is only used to label errors.
pub fn parse_options(path: &Path, contents: &str) -> Result<ReportOptions, ConfigError> {
    let options: ReportOptions =
        toml::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;

    options.validate()?;
    Ok(options)
}
