//! Address-based parking on a 32-bit state word.
//!
//! Linux uses `futex`, Windows uses `WaitOnAddress`; other targets fall back to
//! a yield loop. Spurious wakeups are possible everywhere, so callers re-check
//! their condition in a loop.

use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(windows)]
use windows_sys::Win32::System::Threading::{WaitOnAddress, WakeByAddressAll, INFINITE};

#[cfg(target_os = "linux")]
use libc::{SYS_futex, FUTEX_PRIVATE_FLAG, FUTEX_WAIT, FUTEX_WAKE};

#[cfg(target_os = "linux")]
#[inline]
fn futex_wait(addr: &AtomicU32, expected: u32) {
    // SAFETY: `addr` is a live, aligned `u32` for the duration of the call; a
    // null timeout means "wait until woken or the word changes".
    unsafe {
        libc::syscall(
            SYS_futex,
            addr.as_ptr(),
            FUTEX_WAIT | FUTEX_PRIVATE_FLAG,
            expected,
            core::ptr::null::<libc::timespec>(),
        );
    }
}

#[cfg(target_os = "linux")]
#[inline]
fn futex_wake(addr: &AtomicU32, count: i32) {
    // SAFETY: waking never dereferences beyond the address itself.
    unsafe {
        libc::syscall(SYS_futex, addr.as_ptr(), FUTEX_WAKE | FUTEX_PRIVATE_FLAG, count);
    }
}

/// Blocks while `addr` still holds `expected`.
///
/// Returns immediately if the word already differs.
#[inline]
pub fn wait_on_u32(addr: &AtomicU32, expected: u32) {
    if addr.load(Ordering::Acquire) != expected {
        return;
    }

    #[cfg(target_os = "linux")]
    futex_wait(addr, expected);

    #[cfg(windows)]
    // SAFETY: both pointers are valid for `size_of::<u32>()` bytes.
    unsafe {
        let expected_ptr = (&expected as *const u32).cast();
        WaitOnAddress(
            addr.as_ptr().cast(),
            expected_ptr,
            core::mem::size_of::<u32>(),
            INFINITE,
        );
    }

    #[cfg(not(any(windows, target_os = "linux")))]
    while addr.load(Ordering::Acquire) == expected {
        std::thread::yield_now();
    }
}

/// Wakes every thread parked on `addr`.
#[inline]
pub fn wake_all_u32(addr: &AtomicU32) {
    #[cfg(target_os = "linux")]
    futex_wake(addr, i32::MAX);

    #[cfg(windows)]
    // SAFETY: `addr` is a live address; waking does not read through it.
    unsafe {
        WakeByAddressAll(addr.as_ptr().cast());
    }

    #[cfg(not(any(windows, target_os = "linux")))]
    let _ = addr;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_wait_returns_when_word_differs() {
        let word = AtomicU32::new(3);
        wait_on_u32(&word, 0);
        assert_eq!(word.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_wake_releases_parked_thread() {
        let word = Arc::new(AtomicU32::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let waiter = {
            let word = Arc::clone(&word);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                while word.load(Ordering::Acquire) == 0 {
                    wait_on_u32(&word, 0);
                }
                word.load(Ordering::Acquire)
            })
        };

        barrier.wait();
        word.store(1, Ordering::Release);
        wake_all_u32(&word);

        assert_eq!(waiter.join().unwrap(), 1);
    }
}
