use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Tunables threaded through the components. The interactive binary runs
/// on `default_config()`; the loader is library/test surface (the external
/// contract consumes no file and no environment variables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub history_max: usize,
    pub line_max: usize,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "simple-shell$ ".to_string(),
            history_max: 200,
            line_max: 1024,
        }
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path).map_err(ConfigError::Io)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(ConfigError::Io)?;
            src.push_str(&line);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: no '=' found: {}",
                    lineno + 1,
                    line
                )));
            };
            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "history_max" => match value.trim().parse::<usize>() {
                    Ok(n) if n > 0 => config.history_max = n,
                    _ => {
                        return Err(ConfigError::Parse(format!(
                            "line {}: history_max must be a positive integer: {}",
                            lineno + 1,
                            line
                        )));
                    }
                },
                "line_max" => match value.trim().parse::<usize>() {
                    Ok(n) if n > 0 => config.line_max = n,
                    _ => {
                        return Err(ConfigError::Parse(format!(
                            "line {}: line_max must be a positive integer: {}",
                            lineno + 1,
                            line
                        )));
                    }
                },
                key => {
                    return Err(ConfigError::Parse(format!(
                        "line {}: unknown key: {}",
                        lineno + 1,
                        key
                    )));
                }
            }
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigLoader::default_config();
        assert_eq!(config.prompt, "simple-shell$ ");
        assert_eq!(config.history_max, 200);
        assert_eq!(config.line_max, 1024);
    }

    #[test]
    fn test_load_from_str() {
        let config = ConfigLoader::load_from_str(
            "# comment\nprompt=sh> \nhistory_max=50\nline_max=2048\n",
        )
        .unwrap();
        assert_eq!(config.prompt, "sh> ");
        assert_eq!(config.history_max, 50);
        assert_eq!(config.line_max, 2048);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::load_from_str("history_max=10\n").unwrap();
        assert_eq!(config.history_max, 10);
        assert_eq!(config.prompt, "simple-shell$ ");
        assert_eq!(config.line_max, 1024);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        assert!(ConfigLoader::load_from_str("colour=red\n").is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(ConfigLoader::load_from_str("history_max=0\n").is_err());
        assert!(ConfigLoader::load_from_str("line_max=none\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prompt=% ").unwrap();
        writeln!(file, "history_max=3").unwrap();
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.prompt, "% ");
        assert_eq!(config.history_max, 3);
    }
}
