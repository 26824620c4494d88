use std::ffi::c_void;

use clap::{Arg, ArgMatches};
use opencl3::command_queue::{CommandQueue, CL_QUEUE_PROFILING_ENABLE};
use opencl3::kernel::{ExecuteKernel, Kernel};
use opencl3::memory::{Buffer, CL_MEM_COPY_HOST_PTR, CL_MEM_READ_ONLY, CL_MEM_READ_WRITE};
use opencl3::types::{cl_float, CL_BLOCKING};

use cl_sdk::cli::{self, Diagnostic, OptionGroup, ParseState, Parsed, Parser, SingleDevice};
use cl_sdk::device::Triplet;
use cl_sdk::driver::{Driver, OpenCl};
use cl_sdk::random::Pcg32;
use cl_sdk::{context, file, program, timing};
use cl_sdk::{Error, Status};

const KERNEL_LOCATION: &str = "./saxpy.cl";

struct SaxpyOptions {
    length: usize,
}

impl OptionGroup for SaxpyOptions {
    fn args(&self) -> Vec<Arg> {
        vec![cli::value_arg("length", 'l', "(positive integer)", "Length of input")]
    }

    fn parse(&mut self, id: &str, matches: &ArgMatches) -> ParseState {
        match id {
            "length" => cli::parse_unsigned(matches, id, &mut self.length),
            _ => ParseState::NotParsed,
        }
    }
}

fn main() {
    let mut diagnostic = Diagnostic::default();
    let mut single = SingleDevice::default();
    let mut saxpy = SaxpyOptions { length: 1 << 20 };

    let parsed = Parser::new("saxpy", "Demonstrates typical OpenCL application layout.")
        .group(&mut diagnostic)
        .group(&mut single)
        .group(&mut saxpy)
        .parse();

    if let Parsed::Usage(usage) = parsed {
        usage.print();
        std::process::exit(usage.exit_code());
    }

    env_logger::Builder::new()
        .filter_level(diagnostic.log_level())
        .parse_default_env()
        .init();

    if let Err(err) = run(&diagnostic, &single.triplet, saxpy.length) {
        err.report();
        std::process::exit(err.status().code());
    }
}

fn run(diagnostic: &Diagnostic, triplet: &Triplet, length: usize) -> Result<(), Error> {
    let driver = OpenCl;
    let selection = context::select(&driver, triplet, "saxpy")?;
    let context = driver.create_context(&selection.device)?;
    let queue =
        CommandQueue::create_default_with_properties(&context, CL_QUEUE_PROFILING_ENABLE, 0)?;

    if !diagnostic.quiet {
        context::print_device_info(&driver, &selection)?;
    }

    let source = file::read_text_file(KERNEL_LOCATION)?;
    let program =
        program::build_from_source(&driver, &context, &selection.device, &source, None)?;
    let kernel = Kernel::create(&program, "saxpy")?;

    let mut rng = Pcg32::new(111111, -222i64 as u64);
    let a = rng.next_f32_range(-100.0, 100.0);
    let mut x = host_buffer(length)?;
    let mut y = host_buffer(length)?;
    rng.fill_floats_range(&mut x, -100.0, 100.0);
    rng.fill_floats_range(&mut y, -100.0, 100.0);

    // SAFETY: both host pointers are valid for `length` floats, which are copied on creation.
    let buf_x = unsafe {
        Buffer::<cl_float>::create(
            &context,
            CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR,
            length,
            x.as_mut_ptr() as *mut c_void,
        )?
    };
    let buf_y = unsafe {
        Buffer::<cl_float>::create(
            &context,
            CL_MEM_READ_WRITE | CL_MEM_COPY_HOST_PTR,
            length,
            y.as_mut_ptr() as *mut c_void,
        )?
    };

    // SAFETY: the arguments match the kernel signature and the buffers hold `length` floats.
    let kernel_event = unsafe {
        ExecuteKernel::new(&kernel)
            .set_arg(&a)
            .set_arg(&buf_x)
            .set_arg(&buf_y)
            .set_global_work_size(length)
            .enqueue_nd_range(&queue)?
    };

    // The reference result, while the device is busy.
    for (y, x) in y.iter_mut().zip(&x) {
        *y = a.mul_add(*x, *y);
    }

    // SAFETY: the read is blocking and `x` holds `length` floats.
    let read_event = unsafe {
        queue.enqueue_read_buffer(&buf_y, CL_BLOCKING, 0, &mut x, &[kernel_event.get()])?
    };
    read_event.wait()?;

    match timing::execution_time(&kernel_event) {
        Ok(time) => log::info!("Kernel execution time: {:?}", time),
        Err(err) => log::warn!("Kernel execution time not available: {}", err),
    }

    let mut result = Ok(());
    for (idx, (expected, actual)) in y.iter().zip(&x).enumerate() {
        if expected != actual {
            println!("Verification failed! {} != {} at index {}", expected, actual, idx);
            result = Err(Error::new(Status::INVALID_VALUE));
            if !diagnostic.verbose {
                break;
            }
        }
    }

    if result.is_ok() {
        println!("Verification passed.");
    }

    result
}

fn host_buffer(length: usize) -> Result<Vec<cl_float>, Error> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(length)?;
    buffer.resize(length, 0.0);
    Ok(buffer)
}
