// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::RunOptions;

/// Defaults for `stac-task run`, loaded from an optional YAML file.
///
/// Every field is optional; command-line flags override whatever is set here.
///
/// # Example
/// ```yaml
/// logging: debug
/// workdir: /scratch/tasks
/// save_workdir: false
/// upload: true
/// validate: true
/// output: /scratch/tasks/output.json
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSettings {
    pub logging: Option<String>,
    pub workdir: Option<PathBuf>,
    pub save_workdir: Option<bool>,
    pub upload: Option<bool>,
    pub validate: Option<bool>,
    pub output: Option<String>,
}

impl RunnerSettings {
    /// Run options with file values applied over the built-in defaults.
    pub fn run_options(&self) -> RunOptions {
        let defaults = RunOptions::default();
        RunOptions {
            workdir: self.workdir.clone(),
            save_workdir: self.save_workdir,
            upload: self.upload.unwrap_or(defaults.upload),
            validate: self.validate.unwrap_or(defaults.validate),
        }
    }
}

/// Load runner settings from a YAML file
pub fn load_settings<P: AsRef<Path>>(
    path: P,
) -> Result<RunnerSettings, Box<dyn std::error::Error + Send + Sync>> {
    let content = fs::read_to_string(path)?;
    let settings: RunnerSettings = serde_yaml::from_str(&content)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_settings() {
        let yaml = r#"
logging: debug
workdir: /scratch/tasks
save_workdir: true
upload: false
validate: false
output: out.json
"#;
        let settings: RunnerSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.logging.as_deref(), Some("debug"));
        assert_eq!(settings.output.as_deref(), Some("out.json"));

        let options = settings.run_options();
        assert_eq!(options.workdir, Some(PathBuf::from("/scratch/tasks")));
        assert_eq!(options.save_workdir, Some(true));
        assert!(!options.upload);
        assert!(!options.validate);
    }

    #[test]
    fn empty_settings_use_defaults() {
        let settings: RunnerSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, RunnerSettings::default());

        let options = settings.run_options();
        assert!(options.upload);
        assert!(options.validate);
        assert!(options.workdir.is_none());
        assert!(options.save_workdir.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<RunnerSettings, _> = serde_yaml::from_str("uplaod: false");
        assert!(result.is_err());
    }

    #[test]
    fn load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "validate: false").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.validate, Some(false));

        assert!(load_settings("/definitely/not/here.yaml").is_err());
    }
}
