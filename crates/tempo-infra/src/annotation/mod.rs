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

//! Range-annotation backends and their start-up selection.

#[cfg(feature = "nvtx")]
mod nvtx;
mod span;

#[cfg(feature = "nvtx")]
pub use nvtx::NvtxRangeAnnotator;
pub use span::SpanRangeAnnotator;

use std::sync::Arc;
use tempo_core::profiler::{AnnotationBackend, NoopRangeAnnotator, RangeAnnotator};

/// Resolves the configured backend to an annotator.
///
/// Requesting NVTX in a build without the `nvtx` feature logs a warning and
/// falls back to the no-op annotator; annotation is never a reason to fail
/// start-up.
pub fn range_annotator(backend: AnnotationBackend) -> Arc<dyn RangeAnnotator> {
    match backend {
        AnnotationBackend::None => Arc::new(NoopRangeAnnotator),
        AnnotationBackend::Tracing => Arc::new(SpanRangeAnnotator::new()),
        AnnotationBackend::Nvtx => nvtx_or_noop(),
    }
}

#[cfg(feature = "nvtx")]
fn nvtx_or_noop() -> Arc<dyn RangeAnnotator> {
    Arc::new(NvtxRangeAnnotator::new())
}

#[cfg(not(feature = "nvtx"))]
fn nvtx_or_noop() -> Arc<dyn RangeAnnotator> {
    log::warn!("NVTX annotation requested but the `nvtx` feature is not enabled; ranges are dropped");
    Arc::new(NoopRangeAnnotator)
}
