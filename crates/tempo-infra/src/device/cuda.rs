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

//! CUDA backend on top of the `cudarc` driver bindings.
//!
//! The device that is "current" for a thread is the device of the context
//! bound to it; selecting a device binds that device's primary context.

use cudarc::driver::result as cuda_result;
use cudarc::driver::sys as cuda_sys;
use cudarc::driver::{CudaContext, DriverError};
use std::collections::BTreeMap;
use std::fmt;
use std::ptr;
use std::sync::{Arc, Mutex, PoisonError};
use tempo_core::profiler::{DeviceError, DeviceResult, DeviceRuntime};

/// Session control through the CUDA driver API.
pub struct CudaDeviceRuntime {
    available: bool,
    /// Primary contexts retained for every device selected so far.
    contexts: Mutex<BTreeMap<u32, Arc<CudaContext>>>,
}

impl CudaDeviceRuntime {
    /// Loads and initializes the driver.
    ///
    /// If the driver library is missing or `cuInit` fails, the runtime reports
    /// itself unavailable and session control becomes a no-op.
    pub fn new() -> Self {
        // cudarc panics when the driver library cannot be loaded.
        let available = std::panic::catch_unwind(|| cuda_result::init().is_ok()).unwrap_or(false);
        if !available {
            log::warn!("CUDA driver could not be initialized; device session control is disabled");
        }
        Self {
            available,
            contexts: Mutex::new(BTreeMap::new()),
        }
    }

    fn context(&self, device: u32) -> DeviceResult<Arc<CudaContext>> {
        let mut contexts = self
            .contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(ctx) = contexts.get(&device) {
            return Ok(ctx.clone());
        }
        let ctx = CudaContext::new(device as usize)
            .map_err(|e| device_error("cuDevicePrimaryCtxRetain", e).on_device(device))?;
        contexts.insert(device, ctx.clone());
        Ok(ctx)
    }

    /// Makes sure the calling thread has a context bound, binding the one of
    /// the current device otherwise. Capture control needs one.
    fn ensure_bound(&self) -> DeviceResult<()> {
        if current_context()?.is_none() {
            self.set_device(0)?;
        }
        Ok(())
    }
}

impl Default for CudaDeviceRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CudaDeviceRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let retained = self
            .contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("CudaDeviceRuntime")
            .field("available", &self.available)
            .field("retained_contexts", &retained)
            .finish()
    }
}

/// Maps a driver error to a [`DeviceError`]. The message is the status name,
/// which needs no call back into the driver.
fn device_error(operation: &'static str, error: DriverError) -> DeviceError {
    DeviceError::new(operation, error.0 as i32, format!("{:?}", error.0))
}

fn check(operation: &'static str, status: cuda_sys::CUresult) -> DeviceResult<()> {
    if status == cuda_sys::CUresult::CUDA_SUCCESS {
        Ok(())
    } else {
        Err(device_error(operation, DriverError(status)))
    }
}

fn to_ordinal(operation: &'static str, value: i32) -> DeviceResult<u32> {
    u32::try_from(value).map_err(|_| {
        DeviceError::new(operation, -1, format!("driver returned negative value {value}"))
    })
}

fn current_context() -> DeviceResult<Option<cuda_sys::CUcontext>> {
    let mut ctx: cuda_sys::CUcontext = ptr::null_mut();
    // SAFETY: the out-pointer is a valid, writable CUcontext.
    check("cuCtxGetCurrent", unsafe { cuda_sys::cuCtxGetCurrent(&mut ctx) })?;
    Ok((!ctx.is_null()).then_some(ctx))
}

impl DeviceRuntime for CudaDeviceRuntime {
    fn backend_name(&self) -> &'static str {
        "cuda"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn current_device(&self) -> DeviceResult<u32> {
        // Without a bound context the runtime convention is device 0.
        if current_context()?.is_none() {
            return Ok(0);
        }
        let mut device: cuda_sys::CUdevice = 0;
        // SAFETY: a context is bound and the out-pointer is a valid CUdevice.
        check("cuCtxGetDevice", unsafe {
            cuda_sys::cuCtxGetDevice(&mut device)
        })?;
        to_ordinal("cuCtxGetDevice", device)
    }

    fn device_count(&self) -> DeviceResult<u32> {
        let count = CudaContext::device_count().map_err(|e| device_error("cuDeviceGetCount", e))?;
        to_ordinal("cuDeviceGetCount", count)
    }

    fn set_device(&self, device: u32) -> DeviceResult<()> {
        self.context(device)?
            .bind_to_thread()
            .map_err(|e| device_error("cuCtxSetCurrent", e).on_device(device))
    }

    fn synchronize(&self) -> DeviceResult<()> {
        // SAFETY: no arguments; blocks until the bound context is idle.
        check("cuCtxSynchronize", unsafe { cuda_sys::cuCtxSynchronize() })
    }

    fn profiler_start(&self) -> DeviceResult<()> {
        self.ensure_bound()?;
        // SAFETY: no arguments; a context is bound to the calling thread.
        check("cuProfilerStart", unsafe { cuda_sys::cuProfilerStart() })
    }

    fn profiler_stop(&self) -> DeviceResult<()> {
        self.ensure_bound()?;
        // SAFETY: no arguments; a context is bound to the calling thread.
        check("cuProfilerStop", unsafe { cuda_sys::cuProfilerStop() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_status_maps_to_device_error() {
        let err = check(
            "cuCtxSynchronize",
            cuda_sys::CUresult::CUDA_ERROR_INVALID_CONTEXT,
        )
        .expect_err("A non-success status is an error");

        assert_eq!(err.operation, "cuCtxSynchronize");
        assert_eq!(err.code, 201);
        assert_eq!(err.message, "CUDA_ERROR_INVALID_CONTEXT");
        assert_eq!(err.device, None);
    }

    #[test]
    fn test_success_status_is_ok() {
        assert_eq!(check("cuCtxSynchronize", cuda_sys::CUresult::CUDA_SUCCESS), Ok(()));
    }

    #[test]
    fn test_negative_ordinal_is_rejected() {
        let err = to_ordinal("cuDeviceGetCount", -3).expect_err("Negative counts are invalid");
        assert_eq!(err.code, -1);
        assert!(err.message.contains("-3"));
    }
}
