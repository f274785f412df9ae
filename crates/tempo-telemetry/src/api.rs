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

//! Process-wide entry points acting on [`Profiler::global`].

use crate::profiler::Profiler;
use crate::record_event::RecordEvent;
use std::borrow::Cow;
use tempo_core::profiler::{EventType, ProfilerState};

/// Starts a region on the global profiler.
#[inline]
pub fn begin<'a>(name: impl Into<Cow<'a, str>>, event_type: EventType) -> RecordEvent<'a> {
    Profiler::global().begin(name, event_type)
}

/// Sets the global channel switch. Call before instrumented work starts;
/// `ProfilerState::Disabled` resets it.
pub fn set_profiler_state(state: ProfilerState) {
    Profiler::global().set_state(state);
}

/// The global channel switch.
#[inline]
pub fn profiler_state() -> ProfilerState {
    Profiler::global().state()
}

/// `true` unless the global profiler is disabled.
#[inline]
pub fn is_enabled() -> bool {
    Profiler::global().is_enabled()
}

/// `true` if global host timing is active.
#[inline]
pub fn is_cpu_timing_enabled() -> bool {
    Profiler::global().is_cpu_timing_enabled()
}

/// `true` if global device range annotation is active.
#[inline]
pub fn is_device_annotation_enabled() -> bool {
    Profiler::global().is_device_annotation_enabled()
}

/// Opens a named range through the global annotator.
#[inline]
pub fn push_range(name: &str) {
    Profiler::global().push_range(name);
}

/// Closes the innermost range through the global annotator.
#[inline]
pub fn pop_range() {
    Profiler::global().pop_range();
}

/// Starts the device capture and synchronizes every device.
///
/// # Aborts
///
/// Aborts the process if a device call fails.
pub fn profiler_start() {
    Profiler::global().profiler_start();
}

/// Stops the device capture.
///
/// # Aborts
///
/// Aborts the process if the device call fails.
pub fn profiler_stop() {
    Profiler::global().profiler_stop();
}

/// Waits for every visible device to finish its outstanding work.
///
/// # Aborts
///
/// Aborts the process if a device call fails.
pub fn synchronize_all_devices() {
    Profiler::global().synchronize_all_devices();
}
