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

//! Instrumented test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use tempo_core::profiler::{
    Clock, DeviceError, DeviceResult, DeviceRuntime, EventRecorder, EventType, RangeAnnotator,
};

/// A real monotonic clock that counts how often it is read.
#[derive(Debug, Default)]
pub struct CountingClock {
    reads: AtomicUsize,
}

impl CountingClock {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for CountingClock {
    fn now(&self) -> Instant {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Instant::now()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub name: String,
    pub duration_ms: f64,
    pub event_type: EventType,
}

/// An aggregator that keeps every call in order.
#[derive(Debug, Default)]
pub struct RecordingRecorder {
    calls: Mutex<Vec<Recorded>>,
}

impl RecordingRecorder {
    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

impl EventRecorder for RecordingRecorder {
    fn record_event(&self, name: &str, duration_ms: f64, event_type: EventType) {
        self.calls.lock().unwrap().push(Recorded {
            name: name.to_string(),
            duration_ms,
            event_type,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeCall {
    Push(String),
    Pop,
}

/// An annotator that keeps every push/pop in order.
#[derive(Debug, Default)]
pub struct RecordingAnnotator {
    calls: Mutex<Vec<RangeCall>>,
}

impl RecordingAnnotator {
    pub fn calls(&self) -> Vec<RangeCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RangeAnnotator for RecordingAnnotator {
    fn push_range(&self, name: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(RangeCall::Push(name.to_string()));
    }

    fn pop_range(&self) {
        self.calls.lock().unwrap().push(RangeCall::Pop);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    CurrentDevice,
    DeviceCount,
    SetDevice(u32),
    Synchronize,
    ProfilerStart,
    ProfilerStop,
}

/// A device runtime with a fixed device count that logs every call and can
/// be told to fail one named operation.
#[derive(Debug)]
pub struct ScriptedDevices {
    available: bool,
    count: u32,
    current: Mutex<u32>,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<DeviceCall>>,
}

impl ScriptedDevices {
    pub fn new(count: u32, current: u32) -> Self {
        Self {
            available: true,
            count,
            current: Mutex::new(current),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(4, 0)
        }
    }

    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn selected(&self) -> u32 {
        *self.current.lock().unwrap()
    }

    fn call(&self, operation: &'static str, call: DeviceCall) -> DeviceResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(operation) {
            return Err(DeviceError::new(operation, 999, "scripted failure"));
        }
        Ok(())
    }
}

impl DeviceRuntime for ScriptedDevices {
    fn backend_name(&self) -> &'static str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn current_device(&self) -> DeviceResult<u32> {
        self.call("current_device", DeviceCall::CurrentDevice)?;
        Ok(self.selected())
    }

    fn device_count(&self) -> DeviceResult<u32> {
        self.call("device_count", DeviceCall::DeviceCount)?;
        Ok(self.count)
    }

    fn set_device(&self, device: u32) -> DeviceResult<()> {
        self.call("set_device", DeviceCall::SetDevice(device))?;
        *self.current.lock().unwrap() = device;
        Ok(())
    }

    fn synchronize(&self) -> DeviceResult<()> {
        self.call("synchronize", DeviceCall::Synchronize)
    }

    fn profiler_start(&self) -> DeviceResult<()> {
        self.call("profiler_start", DeviceCall::ProfilerStart)
    }

    fn profiler_stop(&self) -> DeviceResult<()> {
        self.call("profiler_stop", DeviceCall::ProfilerStop)
    }
}
