//! # Process Termination
//!
//! The parser is a fail-fast front end: invalid arguments end the program
//! with a diagnostic, and help or version requests end it successfully. This
//! module maps an [`Exit`](crate::Exit) onto the process. Without the `std`
//! feature there is no process to end, and fatal errors panic instead.

use crate::error::Error;
#[cfg(feature = "std")]
use crate::error::Exit;

/// Print the output of `exit` and terminate the process with the matching
/// status.
///
/// Help and version text are written to standard output, errors to standard
/// error prefixed with `error: `.
#[cfg(feature = "std")]
pub fn terminate(exit: &Exit<'_>) -> ! {
    match exit {
        Exit::Help(v) | Exit::Version(v) => {
            if !v.is_empty() {
                std::println!("{}", v);
            }
        },
        Exit::Error(_) => {
            std::eprintln!("{}", exit);
        },
    }

    std::process::exit(exit.code())
}

/// Report a fatal error and do not return.
#[cfg(feature = "std")]
pub fn fatal(error: Error<'_>) -> ! {
    terminate(&Exit::Error(error))
}

/// Report a fatal error and do not return.
#[cfg(not(feature = "std"))]
pub fn fatal(error: Error<'_>) -> ! {
    panic!("error: {}", error)
}
