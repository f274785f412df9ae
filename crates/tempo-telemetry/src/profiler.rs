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

//! The profiler service: channel switch plus the wired backends.

use crate::recorder::HostEventRecorder;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use tempo_core::profiler::{
    Clock, DeviceRuntime, EventRecorder, MonotonicClock, NoopDeviceRuntime, NoopRangeAnnotator,
    ProfilerState, RangeAnnotator,
};

static GLOBAL_PROFILER: OnceLock<Profiler> = OnceLock::new();

/// Holds the channel switch and the backends every event and session call
/// goes through.
///
/// The state is a single relaxed atomic so that the disabled check on the hot
/// path is one load. It is meant to be written once, before instrumented work
/// starts; changing it while events are in flight is unsupported and may
/// leave an event half-recorded.
#[derive(Debug)]
pub struct Profiler {
    state: AtomicU8,
    pub(crate) recorder: Arc<dyn EventRecorder>,
    pub(crate) annotator: Arc<dyn RangeAnnotator>,
    pub(crate) device: Arc<dyn DeviceRuntime>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Profiler {
    /// Creates a disabled profiler that reports to the process-wide
    /// [`HostEventRecorder`], with no annotation tooling and no device support.
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ProfilerState::Disabled.bits()),
            recorder: HostEventRecorder::global(),
            annotator: Arc::new(NoopRangeAnnotator),
            device: Arc::new(NoopDeviceRuntime),
            clock: Arc::new(MonotonicClock),
        }
    }

    /// Sets the initial state.
    pub fn with_state(self, state: ProfilerState) -> Self {
        self.set_state(state);
        self
    }

    /// Replaces the event aggregator.
    pub fn with_recorder(mut self, recorder: Arc<dyn EventRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Replaces the range-annotation backend.
    pub fn with_annotator(mut self, annotator: Arc<dyn RangeAnnotator>) -> Self {
        self.annotator = annotator;
        self
    }

    /// Replaces the device runtime used for session control.
    pub fn with_device_runtime(mut self, device: Arc<dyn DeviceRuntime>) -> Self {
        self.device = device;
        self
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Installs `profiler` as the process-wide instance.
    ///
    /// Must happen before the first call to [`Profiler::global`]. If a global
    /// profiler already exists the argument is handed back unchanged.
    pub fn install_global(profiler: Profiler) -> Result<(), Profiler> {
        let mut candidate = Some(profiler);
        GLOBAL_PROFILER.get_or_init(|| {
            let profiler = candidate.take().unwrap_or_default();
            log::info!(
                "Installed global profiler (state: {}, device backend: {})",
                profiler.state(),
                profiler.device.backend_name()
            );
            profiler
        });
        match candidate {
            None => Ok(()),
            Some(rejected) => {
                log::warn!("A global profiler is already installed; keeping the existing one.");
                Err(rejected)
            }
        }
    }

    /// Returns the process-wide profiler, creating a default one on first use.
    pub fn global() -> &'static Profiler {
        GLOBAL_PROFILER.get_or_init(Profiler::new)
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> ProfilerState {
        ProfilerState::from_bits(self.state.load(Ordering::Relaxed))
    }

    /// Overwrites the state. See the type-level docs for the write-before-use
    /// contract.
    pub fn set_state(&self, state: ProfilerState) {
        let previous = self.state.swap(state.bits(), Ordering::Relaxed);
        if previous != state.bits() {
            log::debug!(
                "Profiler state changed: {} -> {}",
                ProfilerState::from_bits(previous),
                state
            );
        }
    }

    /// `true` unless the state is disabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// `true` if host timing is active.
    #[inline]
    pub fn is_cpu_timing_enabled(&self) -> bool {
        self.state().is_cpu_timing_enabled()
    }

    /// `true` if device range annotation is active.
    #[inline]
    pub fn is_device_annotation_enabled(&self) -> bool {
        self.state().is_device_annotation_enabled()
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
