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

//! # Tempo Infra
//!
//! Concrete implementations of the profiler's backend contracts.
//!
//! Which device runtime exists is decided at build time (the `cuda`
//! feature); which annotation backend is used is decided at start-up from
//! [`ProfilerSettings`](tempo_core::ProfilerSettings). Everything that is not
//! compiled in resolves to the no-op backends from `tempo-core`.

#![warn(missing_docs)]

pub mod annotation;
pub mod device;

pub use annotation::{range_annotator, SpanRangeAnnotator};
pub use device::device_runtime;

#[cfg(feature = "cuda")]
pub use device::CudaDeviceRuntime;
#[cfg(feature = "nvtx")]
pub use annotation::NvtxRangeAnnotator;
