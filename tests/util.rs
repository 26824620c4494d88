// This is almost certainly not all used in all tests.
#![allow(dead_code)]
use std::cell::Cell;

use cl_sdk::device::{DeviceInfo, DeviceType, PlatformInfo};
use cl_sdk::driver::Driver;
use cl_sdk::error::{Error, Status};

/// Source text that the fake compiler rejects.
pub const BROKEN: &str = "__kernel void broken(";
/// The log the fake compiler produces for broken sources.
pub const BROKEN_LOG: &str = "<source>:1:22: error: expected parameter declarator";

pub fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct FakeDevice {
    pub name: &'static str,
    pub bits: u64,
    pub extensions: &'static str,
    pub language: &'static str,
}

pub struct FakePlatform {
    pub name: &'static str,
    pub vendor: &'static str,
    pub version: &'static str,
    pub extensions: &'static str,
    pub devices: Vec<FakeDevice>,
}

/// A driver answering from tables, counting the objects it creates.
#[derive(Default)]
pub struct Fake {
    pub platforms: Vec<FakePlatform>,
    /// Fail platform enumeration with this status.
    pub platform_error: Option<Status>,
    /// Fail build log queries with this status.
    pub log_error: Option<Status>,
    pub contexts: Cell<usize>,
    pub builds: Cell<usize>,
    pub from_source: Cell<usize>,
    pub from_binaries: Cell<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceRef {
    pub platform: usize,
    pub device: usize,
}

#[derive(Debug)]
pub struct FakeContext {
    pub device: DeviceRef,
}

#[derive(Debug)]
pub struct FakeProgram {
    /// Source text, or the bytes of the binary it was created from.
    pub code: String,
    pub built: bool,
    pub log: String,
    pub options: Vec<String>,
}

/// Two platforms, the first with a GPU and a CPU, the second with one accelerator.
pub fn two_platforms() -> Fake {
    Fake {
        platforms: vec![
            FakePlatform {
                name: "Portable Platform",
                vendor: "Example Vendor",
                version: "OpenCL 3.0 portable",
                extensions: "cl_khr_icd cl_khr_extended_versioning",
                devices: vec![
                    FakeDevice {
                        name: "gpu0",
                        bits: DeviceType::Gpu.bits() | DeviceType::Default.bits(),
                        extensions: "cl_khr_fp64 cl_khr_gl_sharing",
                        language: "OpenCL C 3.0",
                    },
                    FakeDevice {
                        name: "cpu0",
                        bits: DeviceType::Cpu.bits(),
                        extensions: "cl_khr_fp64",
                        language: "OpenCL C 1.2",
                    },
                ],
            },
            FakePlatform {
                name: "Accelerated Platform",
                vendor: "Other Vendor",
                version: "OpenCL 1.2 accelerated",
                extensions: "cl_khr_icd",
                devices: vec![FakeDevice {
                    name: "acc0",
                    bits: DeviceType::Accelerator.bits(),
                    extensions: "",
                    language: "OpenCL C 1.2",
                }],
            },
        ],
        ..Fake::default()
    }
}

impl Fake {
    fn device(&self, device: &DeviceRef) -> &FakeDevice {
        &self.platforms[device.platform].devices[device.device]
    }

    fn bump(counter: &Cell<usize>) {
        counter.set(counter.get() + 1);
    }
}

impl Driver for Fake {
    type Platform = usize;
    type Device = DeviceRef;
    type Context = FakeContext;
    type Program = FakeProgram;

    fn platforms(&self) -> Result<Vec<usize>, Error> {
        if let Some(status) = self.platform_error {
            return Err(Error::new(status));
        }

        Ok((0..self.platforms.len()).collect())
    }

    fn devices(&self, platform: &usize, kind: DeviceType) -> Result<Vec<DeviceRef>, Error> {
        let platform = *platform;
        Ok(self.platforms[platform]
            .devices
            .iter()
            .enumerate()
            .filter(|(_, device)| kind.matches(device.bits))
            .map(|(device, _)| DeviceRef { platform, device })
            .collect())
    }

    fn platform_info(&self, platform: &usize, info: PlatformInfo) -> Result<String, Error> {
        let platform = &self.platforms[*platform];
        Ok(match info {
            PlatformInfo::Name => platform.name,
            PlatformInfo::Vendor => platform.vendor,
            PlatformInfo::Version => platform.version,
            PlatformInfo::Profile => "FULL_PROFILE",
            PlatformInfo::Extensions => platform.extensions,
        }
        .to_owned())
    }

    fn device_info(&self, device: &DeviceRef, info: DeviceInfo) -> Result<String, Error> {
        let device = self.device(device);
        Ok(match info {
            DeviceInfo::Name => device.name,
            DeviceInfo::Vendor => "Example Vendor",
            DeviceInfo::Version => "OpenCL 3.0",
            DeviceInfo::DriverVersion => "1.0.0",
            DeviceInfo::LanguageVersion => device.language,
            DeviceInfo::Extensions => device.extensions,
        }
        .to_owned())
    }

    fn create_context(&self, device: &DeviceRef) -> Result<FakeContext, Error> {
        Self::bump(&self.contexts);
        Ok(FakeContext { device: *device })
    }

    fn program_with_source(&self, _: &FakeContext, source: &str) -> Result<FakeProgram, Error> {
        Self::bump(&self.from_source);
        Ok(FakeProgram {
            code: source.to_owned(),
            built: false,
            log: String::new(),
            options: vec![],
        })
    }

    fn program_with_binaries(
        &self,
        _: &FakeContext,
        devices: &[DeviceRef],
        binaries: &[Vec<u8>],
    ) -> Result<FakeProgram, Error> {
        if devices.len() != binaries.len() || binaries.len() != 1 {
            return Err(Error::new(Status::INVALID_VALUE));
        }

        let code = String::from_utf8(binaries[0].clone())
            .map_err(|_| Error::new(Status::INVALID_BINARY))?;

        Self::bump(&self.from_binaries);
        Ok(FakeProgram {
            code,
            built: false,
            log: String::new(),
            options: vec![],
        })
    }

    fn build(&self, program: &mut FakeProgram, _: &DeviceRef, options: &str) -> Result<(), Error> {
        Self::bump(&self.builds);
        program.options.push(options.to_owned());

        if program.code.contains(BROKEN) {
            program.log = BROKEN_LOG.to_owned();
            return Err(Error::new(Status::BUILD_PROGRAM_FAILURE));
        }

        if options.contains("-cl-unknown-option") {
            return Err(Error::new(Status::INVALID_BUILD_OPTIONS));
        }

        program.built = true;
        Ok(())
    }

    fn build_log(&self, program: &FakeProgram, _: &DeviceRef) -> Result<String, Error> {
        match self.log_error {
            Some(status) => Err(Error::new(status)),
            None => Ok(program.log.clone()),
        }
    }

    fn binaries(&self, program: &FakeProgram) -> Result<Vec<Vec<u8>>, Error> {
        if !program.built {
            return Err(Error::new(Status::INVALID_PROGRAM_EXECUTABLE));
        }

        // The fake binary is just the source, which keeps it loadable and recognizable.
        Ok(vec![program.code.clone().into_bytes()])
    }
}
