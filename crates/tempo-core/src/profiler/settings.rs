// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Start-up settings for the profiler.

use crate::profiler::state::ProfilerState;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Environment variable overriding [`ProfilerSettings::state`].
pub const ENV_PROFILER_STATE: &str = "TEMPO_PROFILER";
/// Environment variable overriding [`ProfilerSettings::annotation`].
pub const ENV_ANNOTATION_BACKEND: &str = "TEMPO_ANNOTATION";
/// Environment variable overriding [`ProfilerSettings::capture_session`].
pub const ENV_CAPTURE_SESSION: &str = "TEMPO_CAPTURE";

/// Which range-annotation tooling to route device ranges to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationBackend {
    /// Ranges are dropped.
    #[default]
    None,
    /// Ranges become `tracing` spans.
    Tracing,
    /// Ranges go to NVTX (requires the `nvtx` feature of `tempo-infra`).
    Nvtx,
}

impl AnnotationBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "" => Some(Self::None),
            "tracing" => Some(Self::Tracing),
            "nvtx" => Some(Self::Nvtx),
            _ => None,
        }
    }
}

/// Settings applied once, before any instrumented work starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerSettings {
    /// The initial channel switch.
    pub state: ProfilerState,
    /// Where device ranges are sent.
    pub annotation: AnnotationBackend,
    /// If `true`, the host brackets its measurement window with a device
    /// profiler capture.
    pub capture_session: bool,
}

impl ProfilerSettings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Applies the `TEMPO_*` environment variables on top of the defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name. Unset variables leave the
    /// current value untouched.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        if let Some(value) = lookup(ENV_PROFILER_STATE) {
            self.state = value
                .parse()
                .map_err(|_| SettingsError::invalid(ENV_PROFILER_STATE, &value))?;
        }
        if let Some(value) = lookup(ENV_ANNOTATION_BACKEND) {
            self.annotation = AnnotationBackend::parse(&value)
                .ok_or_else(|| SettingsError::invalid(ENV_ANNOTATION_BACKEND, &value))?;
        }
        if let Some(value) = lookup(ENV_CAPTURE_SESSION) {
            self.capture_session = parse_flag(&value)
                .ok_or_else(|| SettingsError::invalid(ENV_CAPTURE_SESSION, &value))?;
        }
        log::debug!("Profiler settings resolved: {:?}", self);
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// An error raised while resolving [`ProfilerSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable held a value that does not name a valid option.
    InvalidValue {
        /// The variable or key that was read.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The settings document could not be parsed.
    Parse(String),
}

impl SettingsError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
        }
    }
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{value}' for {key}")
            }
            SettingsError::Parse(msg) => write!(f, "Failed to parse profiler settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}
