//! Resolve a [`Triplet`] against the driver's enumeration.
use crate::device::{DeviceInfo, PlatformInfo, Triplet};
use crate::driver::Driver;
use crate::error::Error;

/// A device found by enumeration, together with the platform it belongs to.
pub struct Selection<D: Driver> {
    pub platform: D::Platform,
    pub device: D::Device,
}

/// One platform of an enumeration, with its name already queried.
pub struct PlatformEntry<D: Driver> {
    pub index: usize,
    pub name: String,
    pub platform: D::Platform,
}

/// One device of a platform, with its name already queried.
pub struct DeviceEntry<D: Driver> {
    pub index: usize,
    pub name: String,
    pub device: D::Device,
}

/// Find the device a triplet refers to.
///
/// The driver is asked for platforms and devices on every call. A platform or device index past
/// the end of the respective list fails with `INDEX_OUT_OF_RANGE`, any enumeration failure is
/// returned as the driver reported it.
pub fn select<D: Driver>(
    driver: &D,
    triplet: &Triplet,
    operation: &str,
) -> Result<Selection<D>, Error> {
    let mut platforms = driver.platforms()?;

    if triplet.platform >= platforms.len() {
        return Err(Error::index_out_of_range("platform", triplet.platform, operation));
    }

    let platform = platforms.swap_remove(triplet.platform);
    let mut devices = driver.devices(&platform, triplet.kind)?;

    if triplet.device >= devices.len() {
        return Err(Error::index_out_of_range("device", triplet.device, operation));
    }

    let device = devices.swap_remove(triplet.device);

    if log::log_enabled!(log::Level::Info) {
        let platform_name = driver
            .platform_info(&platform, PlatformInfo::Name)
            .unwrap_or_default();
        let device_name = driver
            .device_info(&device, DeviceInfo::Name)
            .unwrap_or_default();
        log::info!("Selected platform: {}", platform_name);
        log::info!("Selected device: {}", device_name);
    }

    Ok(Selection { platform, device })
}

/// Get the device a triplet refers to.
pub fn get_device<D: Driver>(driver: &D, triplet: &Triplet) -> Result<D::Device, Error> {
    Ok(select(driver, triplet, "get_device()")?.device)
}

/// Create a context for the single device a triplet refers to.
///
/// No context is created unless both indices are valid.
pub fn get_context<D: Driver>(driver: &D, triplet: &Triplet) -> Result<D::Context, Error> {
    let selection = select(driver, triplet, "get_context()")?;
    driver.create_context(&selection.device)
}

/// Enumerate platforms together with their names.
pub fn list_platforms<D: Driver>(driver: &D) -> Result<Vec<PlatformEntry<D>>, Error> {
    driver
        .platforms()?
        .into_iter()
        .enumerate()
        .map(|(index, platform)| {
            let name = driver.platform_info(&platform, PlatformInfo::Name)?;
            Ok(PlatformEntry {
                index,
                name,
                platform,
            })
        })
        .collect()
}

/// Enumerate the devices of a platform, matching the type filter of the triplet convention.
pub fn list_devices<D: Driver>(
    driver: &D,
    platform: &D::Platform,
    kind: crate::device::DeviceType,
) -> Result<Vec<DeviceEntry<D>>, Error> {
    driver
        .devices(platform, kind)?
        .into_iter()
        .enumerate()
        .map(|(index, device)| {
            let name = driver.device_info(&device, DeviceInfo::Name)?;
            Ok(DeviceEntry {
                index,
                name,
                device,
            })
        })
        .collect()
}

/// Print the names of a device and its platform to standard output.
pub fn print_device_info<D: Driver>(driver: &D, selection: &Selection<D>) -> Result<(), Error> {
    let platform = driver.platform_info(&selection.platform, PlatformInfo::Vendor)?;
    let device = driver.device_info(&selection.device, DeviceInfo::Name)?;
    println!("Selected platform: {}", platform);
    println!("Selected device: {}\n", device);
    Ok(())
}

/// Check the extension string of a platform for a name.
pub fn platform_supports_extension<D: Driver>(
    driver: &D,
    platform: &D::Platform,
    extension: &str,
) -> Result<bool, Error> {
    let extensions = driver.platform_info(platform, PlatformInfo::Extensions)?;
    Ok(extensions.split_whitespace().any(|ext| ext == extension))
}

/// Check the extension string of a device for a name.
pub fn device_supports_extension<D: Driver>(
    driver: &D,
    device: &D::Device,
    extension: &str,
) -> Result<bool, Error> {
    let extensions = driver.device_info(device, DeviceInfo::Extensions)?;
    Ok(extensions.split_whitespace().any(|ext| ext == extension))
}

/// Check if the platform version string contains a fragment such as `"OpenCL 3."`.
pub fn platform_version_contains<D: Driver>(
    driver: &D,
    platform: &D::Platform,
    fragment: &str,
) -> Result<bool, Error> {
    Ok(driver
        .platform_info(platform, PlatformInfo::Version)?
        .contains(fragment))
}

/// Check if the kernel language version of a device contains a fragment such as `"C 2."`.
pub fn language_version_contains<D: Driver>(
    driver: &D,
    device: &D::Device,
    fragment: &str,
) -> Result<bool, Error> {
    Ok(driver
        .device_info(device, DeviceInfo::LanguageVersion)?
        .contains(fragment))
}
