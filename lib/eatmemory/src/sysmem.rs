//! # System Memory Statistics
//!
//! Query the total and free physical memory of the system. The values are
//! only available on Linux, where they are derived from the page counts
//! reported by `sysconf(3)`.

#[cfg(target_os = "linux")]
fn pages(name: libc::c_int) -> Option<u64> {
    // SAFETY: `sysconf()` has no preconditions and only reads system state.
    let (pages, page_size) = unsafe {
        (libc::sysconf(name), libc::sysconf(libc::_SC_PAGESIZE))
    };

    let pages = u64::try_from(pages).ok()?;
    let page_size = u64::try_from(page_size).ok()?;
    pages.checked_mul(page_size)
}

/// Yield the total physical memory in bytes, if known.
pub fn total() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        pages(libc::_SC_PHYS_PAGES)
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Yield the currently free physical memory in bytes, if known.
pub fn free() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        pages(libc::_SC_AVPHYS_PAGES)
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}
