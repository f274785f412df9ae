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

//! Named-range pass-through to the annotation tooling.
//!
//! Nothing is stored here; the per-thread range stack belongs to the tool
//! behind the configured [`RangeAnnotator`](tempo_core::profiler::RangeAnnotator).

use crate::profiler::Profiler;

impl Profiler {
    /// Opens a named range on the calling thread.
    ///
    /// Forwards unconditionally; the channel switch is checked by
    /// [`RecordEvent`](crate::RecordEvent), not here.
    #[inline]
    pub fn push_range(&self, name: &str) {
        self.annotator.push_range(name);
    }

    /// Closes the innermost range opened on the calling thread.
    #[inline]
    pub fn pop_range(&self) {
        self.annotator.pop_range();
    }
}
