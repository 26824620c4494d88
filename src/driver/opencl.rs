//! The native driver, through the ICD loader.
use opencl3::context::Context;
use opencl3::device::Device;
use opencl3::platform::{get_platforms, Platform};
use opencl3::program::Program;

use super::Driver;
use crate::device::{DeviceInfo, DeviceType, PlatformInfo};
use crate::error::{Error, Status};

/// The OpenCL runtimes installed on this machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenCl;

impl Driver for OpenCl {
    type Platform = Platform;
    type Device = Device;
    type Context = Context;
    type Program = Program;

    fn platforms(&self) -> Result<Vec<Platform>, Error> {
        Ok(get_platforms()?)
    }

    fn devices(&self, platform: &Platform, kind: DeviceType) -> Result<Vec<Device>, Error> {
        let ids = platform.get_devices(kind.bits())?;
        Ok(ids.into_iter().map(Device::new).collect())
    }

    fn platform_info(&self, platform: &Platform, info: PlatformInfo) -> Result<String, Error> {
        let value = match info {
            PlatformInfo::Name => platform.name(),
            PlatformInfo::Vendor => platform.vendor(),
            PlatformInfo::Version => platform.version(),
            PlatformInfo::Profile => platform.profile(),
            PlatformInfo::Extensions => platform.extensions(),
        }?;

        Ok(value)
    }

    fn device_info(&self, device: &Device, info: DeviceInfo) -> Result<String, Error> {
        let value = match info {
            DeviceInfo::Name => device.name(),
            DeviceInfo::Vendor => device.vendor(),
            DeviceInfo::Version => device.version(),
            DeviceInfo::DriverVersion => device.driver_version(),
            DeviceInfo::LanguageVersion => device.opencl_c_version(),
            DeviceInfo::Extensions => device.extensions(),
        }?;

        Ok(value)
    }

    fn create_context(&self, device: &Device) -> Result<Context, Error> {
        Ok(Context::from_device(device)?)
    }

    fn program_with_source(&self, context: &Context, source: &str) -> Result<Program, Error> {
        Ok(Program::create_from_source(context, source)?)
    }

    fn program_with_binaries(
        &self,
        context: &Context,
        devices: &[Device],
        binaries: &[Vec<u8>],
    ) -> Result<Program, Error> {
        if devices.len() != binaries.len() {
            return Err(Error::with_message(
                Status::INVALID_VALUE,
                format!("{} binaries for {} devices", binaries.len(), devices.len()),
            ));
        }

        let ids: Vec<_> = devices.iter().map(Device::id).collect();
        let binaries: Vec<&[u8]> = binaries.iter().map(Vec::as_slice).collect();
        // SAFETY: the id and binary slices have the same length and outlive the call.
        let program = unsafe { Program::create_from_binary(context, &ids, &binaries) }?;
        Ok(program)
    }

    fn build(&self, program: &mut Program, device: &Device, options: &str) -> Result<(), Error> {
        Ok(program.build(&[device.id()], options)?)
    }

    fn build_log(&self, program: &Program, device: &Device) -> Result<String, Error> {
        Ok(program.get_build_log(device.id())?)
    }

    fn binaries(&self, program: &Program) -> Result<Vec<Vec<u8>>, Error> {
        Ok(program.get_binaries()?)
    }
}
