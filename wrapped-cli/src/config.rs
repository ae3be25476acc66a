use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use wrapped_metrics::AggregateOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub metrics: AggregateOptions,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Per-invocation overrides from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub strip_organic: bool,
    pub limit: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Effective aggregation options after command-line overrides
    pub fn options(&self, overrides: &Overrides) -> AggregateOptions {
        let mut options = self.metrics.clone();
        if overrides.strip_organic {
            options.strip_organic = true;
        }
        if let Some(limit) = overrides.limit {
            options.dashboard_limit = limit;
        }
        options
    }

    /// Effective output format after command-line overrides
    pub fn format(&self, overrides: &Overrides) -> OutputFormat {
        overrides.format.unwrap_or(self.output.format)
    }
}

/// State directory: `$WRAPPED_HOME` when set and non-empty, else `~/.wrapped`
pub fn wrapped_home() -> Result<PathBuf> {
    resolve_home(std::env::var_os("WRAPPED_HOME"), std::env::var_os("HOME"))
}

fn resolve_home(wrapped_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = wrapped_home.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home
        .filter(|h| !h.is_empty())
        .context("neither WRAPPED_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".wrapped"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(wrapped_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let dir = wrapped_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    let p = dir.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    let s = toml::to_string_pretty(&cfg).context("serialize config")?;
    println!("# {}", config_path()?.display());
    print!("{s}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let cfg = parse_config(
            r#"
[metrics]
strip_organic = true

[output]
format = "json"
"#,
        )
        .unwrap();
        assert!(cfg.metrics.strip_organic);
        assert_eq!(cfg.metrics.dashboard_limit, 10);
        assert_eq!(cfg.metrics.slide_limit, 5);
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(parse_config("[output]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::default();
        let overrides = Overrides {
            strip_organic: true,
            limit: Some(3),
            format: Some(OutputFormat::Json),
        };
        let options = cfg.options(&overrides);
        assert!(options.strip_organic);
        assert_eq!(options.dashboard_limit, 3);
        assert_eq!(cfg.format(&overrides), OutputFormat::Json);
        assert_eq!(cfg.format(&Overrides::default()), OutputFormat::Text);
    }

    #[test]
    fn test_home_override() {
        let dir = resolve_home(Some("/tmp/wrapped-state".into()), Some("/home/me".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/wrapped-state"));

        let dir = resolve_home(Some(OsString::new()), Some("/home/me".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/home/me/.wrapped"));

        let dir = resolve_home(None, Some("/home/me".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/home/me/.wrapped"));

        assert!(resolve_home(None, None).is_err());
    }

    #[test]
    fn test_roundtrip_default() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }
}
