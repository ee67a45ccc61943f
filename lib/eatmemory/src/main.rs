//! # eatmemory
//!
//! Allocate the requested amount of memory and hold on to it, either for a
//! given number of seconds, until ENTER is pressed, or until the process is
//! killed.

use eatmemory::{eat, size, sysmem};
use std::io::BufRead;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn help() -> String {
    let mut v = format!(
        "eatmemory {} - https://github.com/julman99/eatmemory\n\n\
         Usage: eatmemory [-t <seconds>] <size>\n\
         Size can be specified in kilobytes, megabytes or gigabytes in the following way:\n\
         #             # Bytes      example: 1024\n\
         #K            # Kilobytes  example: 512K\n\
         #M            # Megabytes  example: 15M\n\
         #G            # Gigabytes  example: 2G\n",
        VERSION,
    );
    if sysmem::free().is_some() {
        v.push_str("#%            # Percent    example: 50%\n");
    }
    v.push_str(
        "\n\
         Options:\n\
         -t <seconds>  Exit after specified number of seconds\n",
    );
    v
}

fn configure(parser: &mut args::Parser<'_>) -> Result<(), args::mem::Exhausted> {
    parser.add_flag("help h ?")?;
    parser.add_integer_option("timeout t", -1)?;
    parser.set_version_text(VERSION)?;
    Ok(())
}

fn fail(error: impl core::fmt::Display) -> ExitCode {
    eprintln!("error: {}", error);
    ExitCode::FAILURE
}

fn wait(timeout: i32) {
    // SAFETY: `isatty()` has no preconditions on the file descriptor.
    let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) } == 1;

    if let Ok(secs) = u64::try_from(timeout) {
        println!("Done, sleeping for {} seconds before exiting...", secs);
        std::thread::sleep(std::time::Duration::from_secs(secs));
    } else if interactive {
        println!("Done, press ENTER to free the memory");
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
    } else {
        println!("Done, kill this process to free the memory");
        loop {
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv = std::env::args_os()
        .map(|v| v.into_string())
        .collect::<Result<Vec<_>, _>>();
    let argv = match argv {
        Ok(v) => v,
        Err(_) => return fail(eatmemory::Error::ArgumentNotUtf8),
    };
    let mut parser = args::Parser::new();

    if let Err(e) = configure(&mut parser) {
        return fail(e);
    }

    if !parser.parse(argv.as_slice()) {
        return fail(args::mem::Exhausted);
    }

    if parser.found("help") {
        print!("{}", help());
        return ExitCode::SUCCESS;
    }
    if parser.positional_count() != 1 {
        print!("{}", help());
        return ExitCode::FAILURE;
    }

    let timeout = parser.value_int("timeout");
    let total = sysmem::total();
    let free = sysmem::free();

    println!("Currently total memory: {}", size::Bytes(total));
    println!("Currently avail memory: {}", size::Bytes(free));

    let bytes = match size::parse(parser.positional_at(0), free) {
        Ok(v) => v,
        Err(e) => return fail(e),
    };
    let Ok(bytes) = usize::try_from(bytes) else {
        return fail(eatmemory::Error::SizeOverflow);
    };

    println!(
        "Eating {} in chunks of {}...",
        size::Bytes(Some(bytes as u64)),
        size::Bytes(Some(eat::CHUNK as u64)),
    );
    tracing::info!(bytes, chunk = eat::CHUNK, "allocating");

    let meal = match eat::eat(bytes, eat::CHUNK) {
        Ok(v) => v,
        Err(e) => return fail(e),
    };

    tracing::info!(bytes = meal.len(), chunks = meal.chunks(), "holding memory");
    wait(timeout);
    drop(meal);

    ExitCode::SUCCESS
}
