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

//! Contracts for everything the profiler talks to outside its own state.
//!
//! Each optional capability has a real implementation (in `tempo-infra`, when
//! the matching tooling is compiled in) and a no-op implementation defined
//! here, so the profiler's control flow is the same whichever is selected.

use crate::profiler::error::DeviceResult;
use crate::profiler::event::EventType;
use std::fmt::Debug;
use std::time::Instant;

/// The event aggregator that receives finished host timings.
///
/// Implementations must accept concurrent calls from many threads.
pub trait EventRecorder: Send + Sync + Debug {
    /// Records one finished region.
    fn record_event(&self, name: &str, duration_ms: f64, event_type: EventType);
}

/// A named-range annotation API consumed by external timeline viewers.
///
/// The range stack is per thread and strictly LIFO. Callers must pop in the
/// reverse order of their pushes on each thread; the annotator does not check.
pub trait RangeAnnotator: Send + Sync + Debug {
    /// Opens a named range on the calling thread.
    fn push_range(&self, name: &str);

    /// Closes the innermost range opened on the calling thread.
    fn pop_range(&self);
}

/// The device runtime used to bracket a measurement window.
///
/// Device indices are the runtime's ordinals, `0..device_count()`.
pub trait DeviceRuntime: Send + Sync + Debug {
    /// A short name for logs (e.g. `"cuda"`).
    fn backend_name(&self) -> &'static str;

    /// `false` when no device support is compiled in. The profiler issues no
    /// other call on an unavailable runtime.
    fn is_available(&self) -> bool;

    /// The device currently selected on the calling thread.
    fn current_device(&self) -> DeviceResult<u32>;

    /// The number of visible devices.
    fn device_count(&self) -> DeviceResult<u32>;

    /// Selects `device` for subsequent calls on the calling thread.
    fn set_device(&self, device: u32) -> DeviceResult<()>;

    /// Blocks until all outstanding work on the selected device has finished.
    fn synchronize(&self) -> DeviceResult<()>;

    /// Starts the device-wide profiler capture.
    fn profiler_start(&self) -> DeviceResult<()>;

    /// Stops the device-wide profiler capture.
    fn profiler_stop(&self) -> DeviceResult<()>;
}

/// A monotonic time source.
pub trait Clock: Send + Sync + Debug {
    /// Reads the current instant.
    fn now(&self) -> Instant;
}

/// The standard monotonic clock, backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// An aggregator that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventRecorder;

impl EventRecorder for NoopEventRecorder {
    #[inline]
    fn record_event(&self, _name: &str, _duration_ms: f64, _event_type: EventType) {}
}

/// Used when no annotation tooling is compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRangeAnnotator;

impl RangeAnnotator for NoopRangeAnnotator {
    #[inline]
    fn push_range(&self, _name: &str) {}

    #[inline]
    fn pop_range(&self) {}
}

/// Used when no device support is compiled in. Reports itself unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDeviceRuntime;

impl DeviceRuntime for NoopDeviceRuntime {
    fn backend_name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn current_device(&self) -> DeviceResult<u32> {
        Ok(0)
    }

    fn device_count(&self) -> DeviceResult<u32> {
        Ok(0)
    }

    fn set_device(&self, _device: u32) -> DeviceResult<()> {
        Ok(())
    }

    fn synchronize(&self) -> DeviceResult<()> {
        Ok(())
    }

    fn profiler_start(&self) -> DeviceResult<()> {
        Ok(())
    }

    fn profiler_stop(&self) -> DeviceResult<()> {
        Ok(())
    }
}
