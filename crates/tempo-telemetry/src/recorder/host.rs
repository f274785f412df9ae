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

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tempo_core::profiler::{EventRecorder, EventType};

/// One finished host region, as delivered by [`crate::RecordEvent::end`].
#[derive(Debug, Clone, PartialEq)]
pub struct HostEvent {
    /// The region's name.
    pub name: String,
    /// Elapsed wall time on a monotonic clock, in milliseconds.
    pub duration_ms: f64,
    /// The region's classification.
    pub event_type: EventType,
}

/// In-memory event aggregator using a `Mutex<Vec<_>>`.
///
/// This implementation provides:
/// - Thread-safe appends from any number of threads
/// - Insertion order preserved per thread
/// - No summarization; consumers drain the raw events and report on them
///
/// A poisoned lock is recovered rather than propagated, so a panic on one
/// instrumented thread never stops the others from recording.
#[derive(Debug, Default)]
pub struct HostEventRecorder {
    events: Mutex<Vec<HostEvent>>,
}

static GLOBAL_RECORDER: OnceLock<Arc<HostEventRecorder>> = OnceLock::new();

impl HostEventRecorder {
    /// Create a new, empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new recorder with room for `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// The process-wide recorder used by default profilers.
    pub fn global() -> Arc<HostEventRecorder> {
        GLOBAL_RECORDER
            .get_or_init(|| Arc::new(HostEventRecorder::new()))
            .clone()
    }

    /// Snapshot of all events recorded so far
    pub fn events(&self) -> Vec<HostEvent> {
        self.lock().clone()
    }

    /// Remove and return all recorded events
    pub fn take_events(&self) -> Vec<HostEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HostEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventRecorder for HostEventRecorder {
    fn record_event(&self, name: &str, duration_ms: f64, event_type: EventType) {
        self.lock().push(HostEvent {
            name: name.to_string(),
            duration_ms,
            event_type,
        });
    }
}
