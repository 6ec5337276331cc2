//! Output formats for command results

use crate::shared::error::EverestError;
use serde::Serialize;
use std::fmt::Display;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render<T: Serialize + Display>(&self, value: &T) -> Result<String, EverestError> {
        match self {
            OutputFormat::Text => Ok(value.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
        }
    }
}
