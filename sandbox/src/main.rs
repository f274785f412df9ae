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

//! Runs a small instrumented workload through the global profiler.
//!
//! Configure with `TEMPO_PROFILER=off|cpu|device|all`,
//! `TEMPO_ANNOTATION=none|tracing|nvtx` and `TEMPO_CAPTURE=1`.

use anyhow::{anyhow, Result};
use std::thread;
use std::time::Duration;
use tempo_core::{AnnotationBackend, ProfilerSettings};
use tempo_telemetry::{EventType, HostEvent, HostEventRecorder, Profiler};
use tracing_subscriber::fmt::format::FmtSpan;

const WORKERS: usize = 4;
const STEPS: usize = 3;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = ProfilerSettings::from_env()?;
    log::info!("Profiler settings: {:?}", settings);

    if settings.annotation == AnnotationBackend::Tracing {
        let subscriber = tracing_subscriber::fmt()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let profiler = Profiler::new()
        .with_annotator(tempo_infra::range_annotator(settings.annotation))
        .with_device_runtime(tempo_infra::device_runtime())
        .with_state(settings.state);
    Profiler::install_global(profiler)
        .map_err(|_| anyhow!("a global profiler was installed before start-up"))?;

    if settings.capture_session {
        tempo_telemetry::profiler_start();
    }

    run_workload();

    if settings.capture_session {
        tempo_telemetry::synchronize_all_devices();
        tempo_telemetry::profiler_stop();
    }

    report(&HostEventRecorder::global().take_events());
    Ok(())
}

fn run_workload() {
    let program = tempo_telemetry::begin("program", EventType::Program);

    let compile = tempo_telemetry::begin("compile", EventType::Compile);
    simulate_work(Duration::from_millis(4));
    compile.end();

    thread::scope(|s| {
        for worker in 0..WORKERS {
            s.spawn(move || {
                for step in 0..STEPS {
                    let name = format!("worker{worker}/step{step}");
                    let event = tempo_telemetry::begin(name, EventType::Instruction);

                    let upload = tempo_telemetry::begin("upload", EventType::DataTransfer);
                    simulate_work(Duration::from_millis(1));
                    upload.end();

                    let compute = tempo_telemetry::begin("compute", EventType::Computation);
                    simulate_work(Duration::from_millis(2 + worker as u64));
                    compute.end();

                    event.end();
                }
            });
        }
    });

    program.end();
}

fn simulate_work(duration: Duration) {
    thread::sleep(duration);
}

fn report(events: &[HostEvent]) {
    if events.is_empty() {
        log::info!("No host events recorded (set TEMPO_PROFILER=cpu or all to time regions)");
        return;
    }
    log::info!("Recorded {} host events:", events.len());
    for event in events {
        log::info!(
            "  {:<20} {:>9.3} ms  [{}]",
            event.name,
            event.duration_ms,
            event.event_type
        );
    }
}
