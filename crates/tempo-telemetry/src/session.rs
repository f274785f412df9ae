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

//! Device session control: capture start/stop and the all-device barrier.
//!
//! Unlike event recording, failures here are fatal: the plain variants log
//! the full diagnostic and abort the process, since measurement cannot go on
//! from an unknown device state. The `try_` variants return the error
//! instead.

use crate::profiler::Profiler;
use tempo_core::profiler::{DeviceError, DeviceResult};

impl Profiler {
    /// Blocks until every visible device has finished its outstanding work,
    /// then reselects the device that was current on entry.
    ///
    /// Does nothing when the device runtime is unavailable.
    pub fn try_synchronize_all_devices(&self) -> DeviceResult<()> {
        let device = &self.device;
        if !device.is_available() {
            return Ok(());
        }

        let current = device.current_device()?;
        let count = device.device_count()?;
        log::trace!(
            "Synchronizing {} {} device(s), current device {}",
            count,
            device.backend_name(),
            current
        );
        for index in 0..count {
            device.set_device(index).map_err(|e| e.on_device(index))?;
            device.synchronize().map_err(|e| e.on_device(index))?;
        }
        device
            .set_device(current)
            .map_err(|e| e.on_device(current))?;
        Ok(())
    }

    /// Starts the device-wide capture, then waits for every device to go
    /// idle so the capture window starts from a quiesced state.
    pub fn try_profiler_start(&self) -> DeviceResult<()> {
        if !self.device.is_available() {
            return Ok(());
        }
        self.device.profiler_start()?;
        log::info!("Device profiler capture started ({})", self.device.backend_name());
        self.try_synchronize_all_devices()
    }

    /// Stops the device-wide capture.
    pub fn try_profiler_stop(&self) -> DeviceResult<()> {
        if !self.device.is_available() {
            return Ok(());
        }
        self.device.profiler_stop()?;
        log::info!("Device profiler capture stopped ({})", self.device.backend_name());
        Ok(())
    }

    /// See [`Profiler::try_synchronize_all_devices`].
    ///
    /// # Aborts
    ///
    /// Aborts the process if any device call fails.
    pub fn synchronize_all_devices(&self) {
        if let Err(e) = self.try_synchronize_all_devices() {
            fatal(e);
        }
    }

    /// See [`Profiler::try_profiler_start`].
    ///
    /// # Aborts
    ///
    /// Aborts the process if any device call fails.
    pub fn profiler_start(&self) {
        if let Err(e) = self.try_profiler_start() {
            fatal(e);
        }
    }

    /// See [`Profiler::try_profiler_stop`].
    ///
    /// # Aborts
    ///
    /// Aborts the process if the device call fails.
    pub fn profiler_stop(&self) {
        if let Err(e) = self.try_profiler_stop() {
            fatal(e);
        }
    }
}

#[cold]
fn fatal(error: DeviceError) -> ! {
    log::error!("Device session control failed: {error}");
    std::process::abort();
}
