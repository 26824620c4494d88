//! The calls into the compute driver that the utilities depend on.
//!
//! All the selection and build helpers are written against [`Driver`] instead of a concrete API
//! so that the same logic runs against the native runtime and against tables in tests. The
//! driver owns the enumeration of platforms and devices; nothing here caches its answers.
#[cfg(feature = "opencl")]
pub mod opencl;

use crate::device::{DeviceInfo, DeviceType, PlatformInfo};
use crate::error::Error;

#[cfg(feature = "opencl")]
pub use self::opencl::OpenCl;

/// A compute driver, such as the OpenCL ICD loader.
///
/// Objects returned by the driver release their resources when dropped. A context keeps its
/// device association alive for as long as any program created in it.
pub trait Driver {
    type Platform;
    type Device;
    type Context;
    type Program;

    /// List all platforms, in the driver's order.
    fn platforms(&self) -> Result<Vec<Self::Platform>, Error>;

    /// List the devices of a platform that match the type filter, in the driver's order.
    fn devices(
        &self,
        platform: &Self::Platform,
        kind: DeviceType,
    ) -> Result<Vec<Self::Device>, Error>;

    fn platform_info(&self, platform: &Self::Platform, info: PlatformInfo) -> Result<String, Error>;

    fn device_info(&self, device: &Self::Device, info: DeviceInfo) -> Result<String, Error>;

    /// Create a context containing exactly one device.
    fn create_context(&self, device: &Self::Device) -> Result<Self::Context, Error>;

    fn program_with_source(
        &self,
        context: &Self::Context,
        source: &str,
    ) -> Result<Self::Program, Error>;

    /// Create a program from one precompiled binary per device.
    fn program_with_binaries(
        &self,
        context: &Self::Context,
        devices: &[Self::Device],
        binaries: &[Vec<u8>],
    ) -> Result<Self::Program, Error>;

    /// Compile or link the program for one device.
    fn build(
        &self,
        program: &mut Self::Program,
        device: &Self::Device,
        options: &str,
    ) -> Result<(), Error>;

    /// The compiler output of the last build of `program` for `device`.
    fn build_log(&self, program: &Self::Program, device: &Self::Device) -> Result<String, Error>;

    /// The compiled binaries of a built program, one per device of the program.
    fn binaries(&self, program: &Self::Program) -> Result<Vec<Vec<u8>>, Error>;
}
