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

//! # Tempo Telemetry
//!
//! The profiler service. It owns the channel switch, times scoped regions on
//! the host, forwards named ranges to the device annotation tooling, and
//! brackets measurement windows with device-wide synchronization.
//!
//! Most call sites use the process-wide free functions re-exported here
//! ([`begin`], [`set_profiler_state`], [`profiler_start`], ...), which act on
//! [`Profiler::global`]. Embedders that need isolated instances (tests, multiple
//! engines in one process) construct their own [`Profiler`].

#![warn(missing_docs)]

pub mod annotation;
pub mod api;
pub mod profiler;
pub mod record_event;
pub mod recorder;
pub mod session;

pub use api::{
    begin, is_cpu_timing_enabled, is_device_annotation_enabled, is_enabled, pop_range,
    profiler_start, profiler_state, profiler_stop, push_range, set_profiler_state,
    synchronize_all_devices,
};
pub use profiler::Profiler;
pub use record_event::RecordEvent;
pub use recorder::{HostEvent, HostEventRecorder};
pub use tempo_core::{EventType, ProfilerState};
