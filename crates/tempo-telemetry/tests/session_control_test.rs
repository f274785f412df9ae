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

mod common;

use common::{DeviceCall, ScriptedDevices};
use std::env;
use std::panic::{self, AssertUnwindSafe};
use std::process::{self, Command, Output};
use std::sync::Arc;
use std::thread;
use tempo_telemetry::Profiler;

/// Set on a re-executed copy of this binary to select the failure it runs.
const FATAL_SCENARIO_ENV: &str = "TEMPO_FATAL_SCENARIO";

fn profiler_on(devices: &Arc<ScriptedDevices>) -> Profiler {
    Profiler::new().with_device_runtime(devices.clone())
}

#[test]
fn test_synchronize_visits_every_device_and_restores_current() {
    let devices = Arc::new(ScriptedDevices::new(3, 1));
    let profiler = profiler_on(&devices);

    profiler.synchronize_all_devices();

    assert_eq!(
        devices.calls(),
        vec![
            DeviceCall::CurrentDevice,
            DeviceCall::DeviceCount,
            DeviceCall::SetDevice(0),
            DeviceCall::Synchronize,
            DeviceCall::SetDevice(1),
            DeviceCall::Synchronize,
            DeviceCall::SetDevice(2),
            DeviceCall::Synchronize,
            DeviceCall::SetDevice(1),
        ]
    );
    assert_eq!(devices.selected(), 1, "The original device must be reselected");
}

#[test]
fn test_synchronize_with_no_devices_still_restores() {
    let devices = Arc::new(ScriptedDevices::new(0, 0));
    let profiler = profiler_on(&devices);

    profiler.synchronize_all_devices();

    assert_eq!(
        devices.calls(),
        vec![
            DeviceCall::CurrentDevice,
            DeviceCall::DeviceCount,
            DeviceCall::SetDevice(0),
        ]
    );
}

#[test]
fn test_absent_device_support_makes_no_calls() {
    let devices = Arc::new(ScriptedDevices::unavailable());
    let profiler = profiler_on(&devices);

    profiler.profiler_start();
    profiler.synchronize_all_devices();
    profiler.profiler_stop();

    assert!(devices.calls().is_empty());
}

#[test]
fn test_profiler_start_captures_then_synchronizes() {
    let devices = Arc::new(ScriptedDevices::new(2, 0));
    let profiler = profiler_on(&devices);

    profiler.profiler_start();

    assert_eq!(
        devices.calls(),
        vec![
            DeviceCall::ProfilerStart,
            DeviceCall::CurrentDevice,
            DeviceCall::DeviceCount,
            DeviceCall::SetDevice(0),
            DeviceCall::Synchronize,
            DeviceCall::SetDevice(1),
            DeviceCall::Synchronize,
            DeviceCall::SetDevice(0),
        ]
    );
    let starts = devices
        .calls()
        .into_iter()
        .filter(|c| *c == DeviceCall::ProfilerStart)
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn test_profiler_stop_only_stops() {
    let devices = Arc::new(ScriptedDevices::new(2, 0));
    let profiler = profiler_on(&devices);

    profiler.profiler_stop();

    assert_eq!(devices.calls(), vec![DeviceCall::ProfilerStop]);
}

#[test]
fn test_try_variants_return_the_error() {
    let devices = Arc::new(ScriptedDevices::new(2, 0).failing_on("profiler_start"));
    let profiler = profiler_on(&devices);

    let err = profiler
        .try_profiler_start()
        .expect_err("The scripted start failure should surface");
    assert_eq!(err.operation, "profiler_start");
    assert_eq!(err.code, 999);
    assert_eq!(
        devices.calls(),
        vec![DeviceCall::ProfilerStart],
        "No synchronization after a failed start"
    );

    let devices = Arc::new(ScriptedDevices::new(3, 0).failing_on("set_device"));
    let err = profiler_on(&devices)
        .try_synchronize_all_devices()
        .expect_err("The scripted select failure should surface");
    assert_eq!(err.device, Some(0));
}

// --- Fatal path ---
//
// A fatal failure aborts the process, so each scenario runs in a copy of
// this test binary and the parent inspects how the child exited.

fn run_fatal_scenario(scenario: &str) {
    match scenario {
        "profiler_start" => {
            let devices = Arc::new(ScriptedDevices::new(2, 0).failing_on("profiler_start"));
            profiler_on(&devices).profiler_start();
        }
        "profiler_stop" => {
            let devices = Arc::new(ScriptedDevices::new(2, 0).failing_on("profiler_stop"));
            profiler_on(&devices).profiler_stop();
        }
        "synchronize" => {
            let devices = Arc::new(ScriptedDevices::new(2, 1).failing_on("synchronize"));
            profiler_on(&devices).synchronize_all_devices();
        }
        "worker_thread" => {
            let devices = Arc::new(ScriptedDevices::new(2, 0).failing_on("profiler_start"));
            let profiler = profiler_on(&devices);
            let _ = thread::spawn(move || profiler.profiler_start()).join();
        }
        "catch_unwind" => {
            let devices = Arc::new(ScriptedDevices::new(2, 0).failing_on("profiler_start"));
            let profiler = profiler_on(&devices);
            let _ = panic::catch_unwind(AssertUnwindSafe(|| profiler.profiler_start()));
        }
        other => panic!("unknown fatal scenario '{other}'"),
    }
}

#[test]
fn fatal_scenario_entry() {
    let Ok(scenario) = env::var(FATAL_SCENARIO_ENV) else {
        return;
    };
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Error)
        .try_init();
    run_fatal_scenario(&scenario);
    // Only reached if the failure did not end the process.
    process::exit(0);
}

fn run_in_child(scenario: &str) -> Output {
    let exe = env::current_exe().expect("The test binary path should be known");
    Command::new(exe)
        .args([
            "fatal_scenario_entry",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(FATAL_SCENARIO_ENV, scenario)
        .output()
        .expect("The test binary should be re-executable")
}

fn assert_aborted(output: &Output, diagnostic: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !output.status.success(),
        "The process should not survive a fatal failure, stderr: {stderr}"
    );
    assert_ne!(
        output.status.code(),
        Some(101),
        "A panic is not an abort, stderr: {stderr}"
    );
    assert!(
        stderr.contains(diagnostic),
        "Expected '{diagnostic}' in stderr: {stderr}"
    );
}

#[test]
fn test_failed_capture_start_aborts() {
    let output = run_in_child("profiler_start");
    assert_aborted(
        &output,
        "Device session control failed: profiler_start failed with status 999: scripted failure",
    );
}

#[test]
fn test_failed_capture_stop_aborts() {
    let output = run_in_child("profiler_stop");
    assert_aborted(&output, "profiler_stop failed with status 999");
}

#[test]
fn test_failed_synchronize_aborts() {
    let output = run_in_child("synchronize");
    assert_aborted(&output, "synchronize failed on device 0 with status 999");
}

#[test]
fn test_fatal_failure_on_worker_thread_ends_the_process() {
    let output = run_in_child("worker_thread");
    assert_aborted(&output, "profiler_start failed");
}

#[test]
fn test_fatal_failure_cannot_be_caught() {
    let output = run_in_child("catch_unwind");
    assert_aborted(&output, "profiler_start failed");
}
