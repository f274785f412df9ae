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

//! Error types for the device session-control path.

use std::fmt::{self, Display};

/// A specialized `Result` type for device runtime calls.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// A failed call into the device runtime.
///
/// Carries enough context to abort with a useful diagnostic: the runtime
/// call that failed, the device it targeted (when known), and the raw status
/// code with the driver's description of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceError {
    /// The runtime entry point that failed (e.g. `"cudaSetDevice"`).
    pub operation: &'static str,
    /// The device index the call targeted, if any.
    pub device: Option<u32>,
    /// The raw status code returned by the runtime.
    pub code: i32,
    /// The runtime's description of the status code.
    pub message: String,
}

impl DeviceError {
    /// Creates an error for a failed runtime call.
    pub fn new(operation: &'static str, code: i32, message: impl Into<String>) -> Self {
        Self {
            operation,
            device: None,
            code,
            message: message.into(),
        }
    }

    /// Attaches the device index the failed call targeted. An index that is
    /// already set is kept.
    pub fn on_device(mut self, device: u32) -> Self {
        self.device.get_or_insert(device);
        self
    }
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.operation)?;
        if let Some(device) = self.device {
            write!(f, " on device {device}")?;
        }
        write!(f, " with status {}: {}", self.code, self.message)
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = DeviceError::new("cudaDeviceSynchronize", 700, "an illegal memory access")
            .on_device(3);
        assert_eq!(
            err.to_string(),
            "cudaDeviceSynchronize failed on device 3 with status 700: an illegal memory access"
        );
    }

    #[test]
    fn test_on_device_keeps_first_index() {
        let err = DeviceError::new("cudaSetDevice", 101, "invalid device ordinal")
            .on_device(1)
            .on_device(0);
        assert_eq!(err.device, Some(1));

        let err = DeviceError::new("cudaProfilerStart", 1, "boom");
        assert_eq!(err.to_string(), "cudaProfilerStart failed with status 1: boom");
    }
}
