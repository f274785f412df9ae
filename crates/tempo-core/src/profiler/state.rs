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

//! The profiler's channel switch.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Which instrumentation channels are active.
///
/// The two channels are independent bits: bit 0 enables host (CPU) timing and
/// bit 1 enables device range annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProfilerState {
    /// Nothing is recorded. This is the zero-cost path.
    #[default]
    #[serde(rename = "disabled")]
    Disabled = 0,
    /// Host timing only.
    #[serde(rename = "cpu")]
    EnabledCpu = 0b01,
    /// Device range annotation only.
    #[serde(rename = "device")]
    EnabledDevice = 0b10,
    /// Host timing and device range annotation.
    #[serde(rename = "all")]
    EnabledAll = 0b11,
}

impl ProfilerState {
    const CPU_BIT: u8 = 0b01;
    const DEVICE_BIT: u8 = 0b10;

    /// Builds a state from the two independent channels.
    pub fn from_channels(cpu: bool, device: bool) -> Self {
        match (cpu, device) {
            (false, false) => Self::Disabled,
            (true, false) => Self::EnabledCpu,
            (false, true) => Self::EnabledDevice,
            (true, true) => Self::EnabledAll,
        }
    }

    /// Decodes the bit representation. Unknown high bits are ignored.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::from_channels(bits & Self::CPU_BIT != 0, bits & Self::DEVICE_BIT != 0)
    }

    /// Returns the bit representation used for atomic storage.
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// `true` unless the state is [`ProfilerState::Disabled`].
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    /// `true` if host timing is active.
    #[inline]
    pub fn is_cpu_timing_enabled(self) -> bool {
        self.bits() & Self::CPU_BIT != 0
    }

    /// `true` if device range annotation is active.
    #[inline]
    pub fn is_device_annotation_enabled(self) -> bool {
        self.bits() & Self::DEVICE_BIT != 0
    }

    /// The canonical lowercase name, as accepted by [`FromStr`] and serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::EnabledCpu => "cpu",
            Self::EnabledDevice => "device",
            Self::EnabledAll => "all",
        }
    }
}

impl Display for ProfilerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`ProfilerState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProfilerStateError(
    /// The rejected input.
    pub String,
);

impl Display for ParseProfilerStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown profiler state '{}' (expected off, cpu, device or all)",
            self.0
        )
    }
}

impl std::error::Error for ParseProfilerStateError {}

impl FromStr for ProfilerState {
    type Err = ParseProfilerStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "disabled" | "none" | "0" => Ok(Self::Disabled),
            "cpu" | "host" => Ok(Self::EnabledCpu),
            "device" | "gpu" | "cuda" => Ok(Self::EnabledDevice),
            "all" | "on" | "1" => Ok(Self::EnabledAll),
            _ => Err(ParseProfilerStateError(s.to_string())),
        }
    }
}
