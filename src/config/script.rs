use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{borrow::Cow, path::Path};
use tracing::{debug, warn};

use crate::{ext::PathDisplayExt, tree::MissingParentPolicy};

const SETTINGS_KEY: &str = "settings";
const COMMANDS_KEY: &str = "commands";
const MISSING_PARENT_KEY: &str = "missingParent";

/// A command script: optional settings plus the lines to run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub settings: ScriptSettings,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSettings {
    pub missing_parent: Option<MissingParentPolicy>,
}

impl Script {
    pub async fn read(path: &Path) -> Result<Self, ScriptLoadError> {
        debug!("Reading script file: {}", path.display_best_effort());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display_best_effort(),
        })?;
        debug!("Read {} bytes of script", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display_best_effort(),
        })?;
        contents.as_str().try_into()
    }

    fn section<'a, 'input>(
        top_level: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
        key: &'static str,
    ) -> Option<&'a Yaml<'input>> {
        top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key))))
    }

    fn parse_settings(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<ScriptSettings, ScriptLoadError> {
        let mut settings = ScriptSettings::default();
        let Some(section) = Self::section(top_level, SETTINGS_KEY) else {
            return Ok(settings);
        };
        let section = section.as_mapping().context(SettingsNotMapSnafu)?;

        for (key, value) in section {
            match key.as_str() {
                Some(MISSING_PARENT_KEY) => {
                    let policy = value
                        .as_str()
                        .and_then(MissingParentPolicy::from_setting)
                        .with_context(|| InvalidSettingSnafu {
                            key: MISSING_PARENT_KEY,
                            value: format!("{value:?}"),
                        })?;
                    settings.missing_parent = Some(policy);
                }
                _ => warn!("Ignoring unknown script setting {:?}", key),
            }
        }

        Ok(settings)
    }

    fn parse_commands(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<String>, ScriptLoadError> {
        let Some(section) = Self::section(top_level, COMMANDS_KEY) else {
            return Ok(Vec::new());
        };

        let commands = section
            .as_sequence()
            .context(CommandsNotSequenceSnafu)?
            .iter()
            .filter_map(|entry| {
                let line = entry.as_str().map(str::to_string);
                if line.is_none() {
                    debug!("Skipping non-text command entry: {:?}", entry);
                }
                line
            })
            .collect();

        Ok(commands)
    }
}

impl TryFrom<&str> for Script {
    type Error = ScriptLoadError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedScriptSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let script = Script {
            settings: Self::parse_settings(top_level)?,
            commands: Self::parse_commands(top_level)?,
        };
        debug!(
            "Parsed script with {} commands and settings {:?}",
            script.commands.len(),
            script.settings
        );

        Ok(script)
    }
}

#[derive(Debug, Snafu)]
pub enum ScriptLoadError {
    #[snafu(display("Failed to read the script file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Script file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the script file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted script file"))]
    MalformedScript,
    #[snafu(display("Top level of the script should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Settings section should be a map"))]
    SettingsNotMap,
    #[snafu(display("Commands section should be a list"))]
    CommandsNotSequence,
    #[snafu(display("Invalid value {} for setting '{}'", value, key))]
    InvalidSetting { key: String, value: String },
}
