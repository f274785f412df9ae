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

//! Ranges as `tracing` spans.

use std::cell::RefCell;
use tempo_core::profiler::RangeAnnotator;
use tracing::span::EnteredSpan;

thread_local! {
    static OPEN_RANGES: RefCell<Vec<EnteredSpan>> = const { RefCell::new(Vec::new()) };
}

/// Turns each range into an entered `tracing` span.
///
/// Entered spans are not `Send`, so they live on a thread-local stack that
/// mirrors the per-thread range stack of tools like NVTX. Any
/// `tracing-subscriber` layer then sees the ranges as properly nested spans,
/// with the range name in the `name` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanRangeAnnotator;

impl SpanRangeAnnotator {
    /// Creates the annotator.
    pub fn new() -> Self {
        Self
    }

    /// Number of ranges still open on the calling thread.
    pub fn open_ranges() -> usize {
        OPEN_RANGES.with(|stack| stack.borrow().len())
    }
}

impl RangeAnnotator for SpanRangeAnnotator {
    fn push_range(&self, name: &str) {
        let span = tracing::info_span!(target: "tempo::range", "range", name = %name).entered();
        OPEN_RANGES.with(|stack| stack.borrow_mut().push(span));
    }

    fn pop_range(&self) {
        // An unmatched pop is ignored; dropping the guard exits the span.
        let span = OPEN_RANGES.with(|stack| stack.borrow_mut().pop());
        drop(span);
    }
}
