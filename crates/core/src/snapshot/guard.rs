//! Dump pass serialization.
//!
//! Only one dump pass may read registers at a time in the process. A pass holds a
//! `DumpGuard` for its whole duration; a second pass blocks in [`DumpGuard::acquire`]
//! until the first guard is dropped. A panicking pass poisons nothing: the lock protects
//! no data, so the next pass simply takes it.

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

static DUMP_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive right to run a dump pass, released on drop.
#[derive(Debug)]
pub struct DumpGuard {
    _lock: MutexGuard<'static, ()>,
}

impl DumpGuard {
    /// Blocks until no other pass is running, then takes the guard.
    pub fn acquire() -> Self {
        let lock = DUMP_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        Self { _lock: lock }
    }

    /// Takes the guard only if no other pass is running.
    pub fn try_acquire() -> Option<Self> {
        match DUMP_LOCK.try_lock() {
            Ok(lock) => Some(Self { _lock: lock }),
            Err(TryLockError::Poisoned(poisoned)) => Some(Self {
                _lock: poisoned.into_inner(),
            }),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}
