//! Status codes and the error type shared by all utilities.
//!
//! Every native status code passes through [`Status`] unchanged. The library adds a few codes of
//! its own in the `-2000` range, next to the codes of the native API.
use core::fmt;
use std::collections::TryReserveError;

/// A status code of the native API, or one of the library extension codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Status(pub i32);

/// An operation failed with a status code and, maybe, some text explaining why.
#[derive(Debug)]
pub struct Error {
    status: Status,
    message: Option<String>,
}

macro_rules! status_table {
    ($($(#[$attr:meta])* $name:ident = $code:literal),* $(,)?) => {
        impl Status {
            $($(#[$attr])* pub const $name: Status = Status($code);)*

            /// The symbolic name of a known status code.
            pub fn name(self) -> Option<&'static str> {
                Some(match self.0 {
                    $($code => concat!("CL_", stringify!($name)),)*
                    _ => return None,
                })
            }
        }
    };
}

status_table! {
    SUCCESS = 0,
    DEVICE_NOT_FOUND = -1,
    DEVICE_NOT_AVAILABLE = -2,
    COMPILER_NOT_AVAILABLE = -3,
    MEM_OBJECT_ALLOCATION_FAILURE = -4,
    OUT_OF_RESOURCES = -5,
    OUT_OF_HOST_MEMORY = -6,
    PROFILING_INFO_NOT_AVAILABLE = -7,
    MEM_COPY_OVERLAP = -8,
    IMAGE_FORMAT_MISMATCH = -9,
    IMAGE_FORMAT_NOT_SUPPORTED = -10,
    BUILD_PROGRAM_FAILURE = -11,
    MAP_FAILURE = -12,
    MISALIGNED_SUB_BUFFER_OFFSET = -13,
    EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST = -14,
    COMPILE_PROGRAM_FAILURE = -15,
    LINKER_NOT_AVAILABLE = -16,
    LINK_PROGRAM_FAILURE = -17,
    DEVICE_PARTITION_FAILED = -18,
    KERNEL_ARG_INFO_NOT_AVAILABLE = -19,
    INVALID_VALUE = -30,
    INVALID_DEVICE_TYPE = -31,
    INVALID_PLATFORM = -32,
    INVALID_DEVICE = -33,
    INVALID_CONTEXT = -34,
    INVALID_QUEUE_PROPERTIES = -35,
    INVALID_COMMAND_QUEUE = -36,
    INVALID_HOST_PTR = -37,
    INVALID_MEM_OBJECT = -38,
    INVALID_IMAGE_FORMAT_DESCRIPTOR = -39,
    INVALID_IMAGE_SIZE = -40,
    INVALID_SAMPLER = -41,
    INVALID_BINARY = -42,
    INVALID_BUILD_OPTIONS = -43,
    INVALID_PROGRAM = -44,
    INVALID_PROGRAM_EXECUTABLE = -45,
    INVALID_KERNEL_NAME = -46,
    INVALID_KERNEL_DEFINITION = -47,
    INVALID_KERNEL = -48,
    INVALID_ARG_INDEX = -49,
    INVALID_ARG_VALUE = -50,
    INVALID_ARG_SIZE = -51,
    INVALID_KERNEL_ARGS = -52,
    INVALID_WORK_DIMENSION = -53,
    INVALID_WORK_GROUP_SIZE = -54,
    INVALID_WORK_ITEM_SIZE = -55,
    INVALID_GLOBAL_OFFSET = -56,
    INVALID_EVENT_WAIT_LIST = -57,
    INVALID_EVENT = -58,
    INVALID_OPERATION = -59,
    INVALID_GL_OBJECT = -60,
    INVALID_BUFFER_SIZE = -61,
    INVALID_MIP_LEVEL = -62,
    INVALID_GLOBAL_WORK_SIZE = -63,
    INVALID_PROPERTY = -64,
    INVALID_IMAGE_DESCRIPTOR = -65,
    INVALID_COMPILER_OPTIONS = -66,
    INVALID_LINKER_OPTIONS = -67,
    INVALID_DEVICE_PARTITION_COUNT = -68,
    INVALID_PIPE_SIZE = -69,
    INVALID_DEVICE_QUEUE = -70,
    INVALID_SPEC_ID = -71,
    MAX_SIZE_RESTRICTION_EXCEEDED = -72,
    /// A platform or device index does not exist in the enumeration.
    UTIL_INDEX_OUT_OF_RANGE = -2000,
    /// The device can not share objects with the graphics API.
    UTIL_DEVICE_NOT_INTEROPERABLE = -2001,
    /// Reading or writing a file failed.
    UTIL_FILE_OPERATION_ERROR = -2002,
}

impl Status {
    pub const INDEX_OUT_OF_RANGE: Status = Status::UTIL_INDEX_OUT_OF_RANGE;
    pub const DEVICE_NOT_INTEROPERABLE: Status = Status::UTIL_DEVICE_NOT_INTEROPERABLE;
    pub const FILE_OPERATION_ERROR: Status = Status::UTIL_FILE_OPERATION_ERROR;
    /// An image file extension or pixel layout that no codec handles.
    pub const UNSUPPORTED_FORMAT: Status = Status::IMAGE_FORMAT_NOT_SUPPORTED;

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Status::SUCCESS
    }
}

impl Error {
    pub fn new(status: Status) -> Self {
        Error {
            status,
            message: None,
        }
    }

    pub fn with_message(status: Status, message: impl Into<String>) -> Self {
        Error {
            status,
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Descriptive text, if the failing operation provided any.
    ///
    /// For failed builds this is the compiler log.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Print a human readable label for this error to standard error.
    ///
    /// Nothing is printed for a success status.
    pub fn report(&self) {
        let _ = self.write_report(&mut std::io::stderr().lock());
    }

    fn write_report(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        if self.status.is_success() {
            return Ok(());
        }

        writeln!(out, "\nError: {}", self.status)?;
        if let Some(message) = &self.message {
            writeln!(out, "{}", message)?;
        }

        Ok(())
    }

    pub(crate) fn index_out_of_range(what: &str, index: usize, operation: &str) -> Self {
        Error::with_message(
            Status::INDEX_OUT_OF_RANGE,
            format!("Invalid {} index {} provided for {}", what, index, operation),
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown error: {}", self.0),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.status, message),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for Error {}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        Error::new(status)
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::with_message(Status::OUT_OF_HOST_MEMORY, err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_message(Status::FILE_OPERATION_ERROR, err.to_string())
    }
}

impl From<::image::ImageError> for Error {
    fn from(err: ::image::ImageError) -> Self {
        use ::image::ImageError;

        let status = match &err {
            ImageError::Unsupported(_) => Status::UNSUPPORTED_FORMAT,
            ImageError::IoError(_) => Status::FILE_OPERATION_ERROR,
            ImageError::Limits(_) => Status::OUT_OF_HOST_MEMORY,
            _ => Status::INVALID_ARG_VALUE,
        };

        Error::with_message(status, err.to_string())
    }
}

#[cfg(feature = "opencl")]
impl From<opencl3::error_codes::ClError> for Error {
    fn from(err: opencl3::error_codes::ClError) -> Self {
        Error::new(Status(err.0))
    }
}
