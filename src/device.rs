//! Describes which device to use, independent of any driver.
use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Status};

/// The kind of device to enumerate on a platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    #[default]
    All,
    Cpu,
    Gpu,
    Accelerator,
    Custom,
    /// Whatever the platform considers its default device.
    Default,
}

/// Platform index, device index and device type, identifying one device.
///
/// The indices refer to the enumeration order of the driver at the time the triplet is resolved.
/// The device index counts only the devices matching `kind`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Triplet {
    pub platform: usize,
    pub device: usize,
    pub kind: DeviceType,
}

/// Textual platform properties that can be queried from a driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformInfo {
    Name,
    Vendor,
    Version,
    Profile,
    Extensions,
}

/// Textual device properties that can be queried from a driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceInfo {
    Name,
    Vendor,
    Version,
    DriverVersion,
    /// The highest supported version of the kernel language.
    LanguageVersion,
    Extensions,
}

impl DeviceType {
    /// The bitfield value of the native API.
    pub fn bits(self) -> u64 {
        match self {
            DeviceType::Default => 1 << 0,
            DeviceType::Cpu => 1 << 1,
            DeviceType::Gpu => 1 << 2,
            DeviceType::Accelerator => 1 << 3,
            DeviceType::Custom => 1 << 4,
            DeviceType::All => 0xFFFF_FFFF,
        }
    }

    /// The name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::All => "all",
            DeviceType::Cpu => "cpu",
            DeviceType::Gpu => "gpu",
            DeviceType::Accelerator => "acc",
            DeviceType::Custom => "cus",
            DeviceType::Default => "def",
        }
    }

    /// Check if a device reporting the type bits `bits` is included in this selection.
    pub fn matches(self, bits: u64) -> bool {
        match self {
            DeviceType::All => true,
            other => bits & other.bits() != 0,
        }
    }
}

impl Triplet {
    pub fn new(platform: usize, device: usize, kind: DeviceType) -> Self {
        Triplet {
            platform,
            device,
            kind,
        }
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s {
            "all" => DeviceType::All,
            "cpu" => DeviceType::Cpu,
            "gpu" => DeviceType::Gpu,
            "acc" => DeviceType::Accelerator,
            "cus" => DeviceType::Custom,
            "def" => DeviceType::Default,
            other => {
                return Err(Error::with_message(
                    Status::INVALID_DEVICE_TYPE,
                    format!("Unknown device type `{}`", other),
                ))
            }
        })
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.platform, self.device, self.kind)
    }
}
