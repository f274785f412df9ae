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

//! NVTX range backend.

use std::ffi::{c_char, c_int, CString};
use tempo_core::profiler::RangeAnnotator;

mod ffi {
    use std::ffi::{c_char, c_int};

    #[link(name = "nvToolsExt")]
    extern "C" {
        pub fn nvtxRangePushA(message: *const c_char) -> c_int;
        pub fn nvtxRangePop() -> c_int;
    }
}

/// Forwards ranges to `nvtxRangePushA` / `nvtxRangePop`, so they show up in
/// Nsight Systems timelines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NvtxRangeAnnotator;

impl NvtxRangeAnnotator {
    /// Creates the annotator.
    pub fn new() -> Self {
        Self
    }
}

/// Interior NULs are replaced rather than rejected: skipping the push would
/// leave the matching pop closing someone else's range.
fn range_message(name: &str) -> CString {
    CString::new(name.replace('\0', " ")).unwrap_or_default()
}

impl RangeAnnotator for NvtxRangeAnnotator {
    fn push_range(&self, name: &str) {
        let message = range_message(name);
        let ptr: *const c_char = message.as_ptr();
        // SAFETY: `ptr` is a valid NUL-terminated string for the duration of
        // the call; NVTX copies the message.
        let _depth: c_int = unsafe { ffi::nvtxRangePushA(ptr) };
    }

    fn pop_range(&self) {
        // SAFETY: no arguments; an unmatched pop returns a negative depth.
        let _depth: c_int = unsafe { ffi::nvtxRangePop() };
    }
}
