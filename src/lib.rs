//! ## Quick guide
//!
//! 1. Parse the command line with a [`cli::Parser`], composed of the option groups you need
//! 2. Resolve the chosen [`device::Triplet`] with [`context::get_context`]
//! 3. Build your program with [`program::build_program`], which prints the build log on failure
//! 4. Fill host buffers with reproducible data from [`random::Pcg32`]
//! 5. Enqueue, then measure the completed events with [`timing::execution_time`]
//!
//! All helpers are written against the [`driver::Driver`] trait. The native implementation is
//! `driver::OpenCl`, available with the `opencl` feature. For images, see [`image::read`] and
//! [`image::write`].
pub mod cli;
pub mod context;
pub mod device;
pub mod driver;
pub mod error;
pub mod file;
pub mod image;
pub mod program;
pub mod random;
pub mod timing;

pub use crate::error::{Error, Status};
