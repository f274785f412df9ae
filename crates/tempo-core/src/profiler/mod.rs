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

//! Provides the foundational traits and data structures for host/device profiling.
//!
//! This module defines the "common language" of the profiler: which channels
//! are switched on, how a recorded event is classified, and the narrow
//! contracts through which timing results and device annotations leave the
//! process.
//!
//! This module defines the abstract "what" of profiling, while
//! `tempo-telemetry` drives the recording itself and `tempo-infra` provides
//! the concrete device and tooling backends.

pub mod backend;
pub mod error;
pub mod event;
pub mod settings;
pub mod state;

pub use self::backend::{
    Clock, DeviceRuntime, EventRecorder, MonotonicClock, NoopDeviceRuntime, NoopEventRecorder,
    NoopRangeAnnotator, RangeAnnotator,
};
pub use self::error::{DeviceError, DeviceResult};
pub use self::event::EventType;
pub use self::settings::{
    AnnotationBackend, ProfilerSettings, SettingsError, ENV_ANNOTATION_BACKEND, ENV_CAPTURE_SESSION,
    ENV_PROFILER_STATE,
};
pub use self::state::{ParseProfilerStateError, ProfilerState};
