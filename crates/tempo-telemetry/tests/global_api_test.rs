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

//! Exercises the process-wide entry points. Everything lives in one test
//! because the global profiler can only be installed once per process.

mod common;

use common::{DeviceCall, RangeCall, RecordingAnnotator, RecordingRecorder, ScriptedDevices};
use std::sync::Arc;
use tempo_telemetry::{EventType, Profiler, ProfilerState};

#[test]
fn test_global_profiler_lifecycle() {
    let recorder = Arc::new(RecordingRecorder::default());
    let annotator = Arc::new(RecordingAnnotator::default());
    let devices = Arc::new(ScriptedDevices::new(1, 0));

    let profiler = Profiler::new()
        .with_recorder(recorder.clone())
        .with_annotator(annotator.clone())
        .with_device_runtime(devices.clone());
    Profiler::install_global(profiler).expect("First installation should succeed");
    assert!(
        Profiler::install_global(Profiler::new()).is_err(),
        "A second installation must be rejected"
    );

    // Starts disabled.
    assert_eq!(tempo_telemetry::profiler_state(), ProfilerState::Disabled);
    tempo_telemetry::begin("ignored", EventType::Ordinary).end();
    assert!(recorder.calls().is_empty());

    tempo_telemetry::set_profiler_state(ProfilerState::EnabledAll);
    assert!(tempo_telemetry::is_enabled());
    assert!(tempo_telemetry::is_cpu_timing_enabled());
    assert!(tempo_telemetry::is_device_annotation_enabled());

    tempo_telemetry::profiler_start();
    let name = String::from("step");
    tempo_telemetry::begin(name.as_str(), EventType::Computation).end();
    tempo_telemetry::push_range("manual");
    tempo_telemetry::pop_range();
    tempo_telemetry::synchronize_all_devices();
    tempo_telemetry::profiler_stop();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "step");
    assert_eq!(
        annotator.calls(),
        vec![
            RangeCall::Push("step".to_string()),
            RangeCall::Pop,
            RangeCall::Push("manual".to_string()),
            RangeCall::Pop,
        ]
    );
    let device_calls = devices.calls();
    assert_eq!(device_calls.first(), Some(&DeviceCall::ProfilerStart));
    assert_eq!(device_calls.last(), Some(&DeviceCall::ProfilerStop));

    // Reset.
    tempo_telemetry::set_profiler_state(ProfilerState::Disabled);
    assert!(!tempo_telemetry::is_enabled());
}
