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

//! Scoped, explicitly-ended event recording.

use crate::profiler::Profiler;
use std::borrow::Cow;
use std::time::Instant;
use tempo_core::profiler::EventType;

/// One measured region of code.
///
/// Created with [`RecordEvent::begin`] (or [`crate::begin`]) at the start of the
/// region and closed with [`RecordEvent::end`]. Ending consumes the value, so
/// the duration is reported at most once.
///
/// There is no `Drop` fallback: an event that is dropped without
/// `end` reports nothing, and a range it pushed stays open on the annotation
/// tool's stack. Nested events on one thread must be ended in reverse order of
/// creation.
#[must_use = "a RecordEvent reports nothing until `end()` is called"]
#[derive(Debug)]
pub struct RecordEvent<'a> {
    profiler: &'a Profiler,
    name: Cow<'a, str>,
    event_type: EventType,
    start: Option<Instant>,
    range_pushed: bool,
}

impl<'a> RecordEvent<'a> {
    /// Starts a region on `profiler`.
    ///
    /// When profiling is disabled nothing is read or pushed, and a borrowed
    /// `name` is not copied. Otherwise the clock is read if host timing is on,
    /// and a range named `name` is pushed if device annotation is on.
    pub fn begin(
        profiler: &'a Profiler,
        name: impl Into<Cow<'a, str>>,
        event_type: EventType,
    ) -> Self {
        let mut event = Self {
            profiler,
            name: name.into(),
            event_type,
            start: None,
            range_pushed: false,
        };

        let state = profiler.state();
        if !state.is_enabled() {
            return event;
        }

        if state.is_cpu_timing_enabled() {
            event.start = Some(profiler.clock.now());
        }
        if state.is_device_annotation_enabled() {
            profiler.push_range(&event.name);
            event.range_pushed = true;
        }
        event
    }

    /// Closes the region.
    ///
    /// Reports the elapsed milliseconds to the aggregator if the clock was
    /// read at `begin`, then pops the range if one was pushed. The state is
    /// not re-read: a state change after `begin` does not affect `end`.
    pub fn end(self) {
        if let Some(start) = self.start {
            let elapsed = self.profiler.clock.now().saturating_duration_since(start);
            let duration_ms = elapsed.as_secs_f64() * 1e3;
            self.profiler
                .recorder
                .record_event(&self.name, duration_ms, self.event_type);
        }
        if self.range_pushed {
            self.profiler.pop_range();
        }
    }

    /// The region's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The region's classification.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// `true` if a start time was captured, i.e. `end` will report a duration.
    pub fn is_timed(&self) -> bool {
        self.start.is_some()
    }

    /// `true` if `end` will pop an annotation range.
    pub fn has_range(&self) -> bool {
        self.range_pushed
    }
}

impl Profiler {
    /// Starts a region on this profiler. See [`RecordEvent::begin`].
    pub fn begin<'a>(
        &'a self,
        name: impl Into<Cow<'a, str>>,
        event_type: EventType,
    ) -> RecordEvent<'a> {
        RecordEvent::begin(self, name, event_type)
    }

    /// Runs `f` inside a region and ends the region when `f` returns.
    ///
    /// If `f` unwinds, the region is never ended and nothing is reported.
    pub fn scope<'a, R>(
        &'a self,
        name: impl Into<Cow<'a, str>>,
        event_type: EventType,
        f: impl FnOnce() -> R,
    ) -> R {
        let event = self.begin(name, event_type);
        let result = f();
        event.end();
        result
    }
}
