//! Per-thread scratch buffers for rendering log lines.
//!
//! Each calling thread owns one pair of reusable `String` buffers,
//! allocated on its first formatting call and freed by the thread-local
//! destructor when the thread exits. No other thread ever touches them,
//! so the formatting path takes no lock.

use std::cell::RefCell;
use std::collections::TryReserveError;

/// Capacity of the timestamp buffer; `YYYY-MM-DD HH:MM:SS,mmm` is 23 bytes.
pub const TIMESTAMP_CAPACITY: usize = 32;
/// Capacity of the message buffer; longer messages are truncated to fit.
pub const MESSAGE_CAPACITY: usize = 4096;

pub struct ThreadScratch {
    pub timestamp: String,
    pub message: String,
}

thread_local! {
    static SCRATCH: RefCell<ThreadScratch> = const {
        RefCell::new(ThreadScratch {
            timestamp: String::new(),
            message: String::new(),
        })
    };
}

impl ThreadScratch {
    fn reserve(&mut self) -> Result<(), TryReserveError> {
        if self.timestamp.capacity() == 0 {
            self.timestamp.try_reserve_exact(TIMESTAMP_CAPACITY)?;
        }
        if self.message.capacity() == 0 {
            self.message.try_reserve_exact(MESSAGE_CAPACITY)?;
        }
        Ok(())
    }
}

/// Runs `f` with the calling thread's scratch buffers, cleared but keeping
/// their allocations.
///
/// # Errors
/// Returns the allocation error from the thread's first call if the buffers
/// cannot be reserved; callers fall back to a static message.
pub fn with<R>(f: impl FnOnce(&mut ThreadScratch) -> R) -> Result<R, TryReserveError> {
    SCRATCH.with(|cell| {
        let mut scratch = cell.borrow_mut();
        scratch.reserve()?;
        scratch.timestamp.clear();
        scratch.message.clear();
        Ok(f(&mut scratch))
    })
}
