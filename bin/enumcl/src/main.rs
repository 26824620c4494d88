use cl_sdk::cli::{Diagnostic, Parsed, Parser};
use cl_sdk::context;
use cl_sdk::device::{DeviceInfo, DeviceType, PlatformInfo};
use cl_sdk::driver::{Driver, OpenCl};
use cl_sdk::Error;

fn main() {
    let mut diagnostic = Diagnostic::default();

    let parsed = Parser::new("enumcl", "Lists the OpenCL platforms and devices of this machine.")
        .group(&mut diagnostic)
        .parse();

    if let Parsed::Usage(usage) = parsed {
        usage.print();
        std::process::exit(usage.exit_code());
    }

    env_logger::Builder::new()
        .filter_level(diagnostic.log_level())
        .parse_default_env()
        .init();

    if let Err(err) = enumerate(&OpenCl, &diagnostic) {
        err.report();
        std::process::exit(err.status().code());
    }
}

fn enumerate<D: Driver>(driver: &D, diagnostic: &Diagnostic) -> Result<(), Error> {
    let platforms = context::list_platforms(driver)?;

    if !diagnostic.quiet {
        println!("Enumerated {} platforms.\n", platforms.len());
    }

    for entry in &platforms {
        let vendor = driver.platform_info(&entry.platform, PlatformInfo::Vendor)?;
        let version = driver.platform_info(&entry.platform, PlatformInfo::Version)?;

        println!("Platform[{}]:", entry.index);
        println!("\tName:           {}", entry.name);
        println!("\tVendor:         {}", vendor);
        println!("\tDriver Version: {}", version);

        let devices = context::list_devices(driver, &entry.platform, DeviceType::All)?;
        log::debug!("{} devices on {}", devices.len(), entry.name);

        for device in &devices {
            // A device failing its queries does not hide the others.
            if let Err(err) = print_device(driver, device.index, &device.name, &device.device) {
                eprintln!("Error getting device info for device {}: {}", device.index, err);
            }
        }

        println!();
    }

    Ok(())
}

fn print_device<D: Driver>(
    driver: &D,
    index: usize,
    name: &str,
    device: &D::Device,
) -> Result<(), Error> {
    let vendor = driver.device_info(device, DeviceInfo::Vendor)?;
    let version = driver.device_info(device, DeviceInfo::Version)?;
    let language = driver.device_info(device, DeviceInfo::LanguageVersion)?;
    let driver_version = driver.device_info(device, DeviceInfo::DriverVersion)?;

    println!("Device[{}]:", index);
    println!("\tName:           {}", name);
    println!("\tVendor:         {}", vendor);
    println!("\tDevice Version: {}", version);
    println!("\tC Version:      {}", language);
    println!("\tDriver Version: {}", driver_version);
    Ok(())
}
