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

//! Device runtime backends.

#[cfg(feature = "cuda")]
mod cuda;

#[cfg(feature = "cuda")]
pub use cuda::CudaDeviceRuntime;

use std::sync::Arc;
use tempo_core::profiler::DeviceRuntime;
#[cfg(not(feature = "cuda"))]
use tempo_core::profiler::NoopDeviceRuntime;

/// Returns the device runtime compiled into this build.
///
/// With the `cuda` feature this is [`CudaDeviceRuntime`]; otherwise an
/// unavailable no-op runtime, which turns session control into a no-op.
pub fn device_runtime() -> Arc<dyn DeviceRuntime> {
    #[cfg(feature = "cuda")]
    {
        log::info!("Device session control backed by the CUDA driver");
        Arc::new(CudaDeviceRuntime::new())
    }
    #[cfg(not(feature = "cuda"))]
    {
        log::debug!("No device runtime compiled in; session control is a no-op");
        Arc::new(NoopDeviceRuntime)
    }
}
