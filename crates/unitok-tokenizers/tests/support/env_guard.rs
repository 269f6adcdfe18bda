// Environment variable guard for tests that read `UNITOK_*` settings.
//
// Pair with `#[serial(unitok_env)]`: the lock below only orders threads that
// go through a guard, not other readers of the process environment.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores the variable's previous value (or absence) on drop.
#[derive(Debug)]
pub struct EnvGuard {
    key: String,
    old: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn new(key: &str) -> Self {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|e| e.into_inner());
        Self { key: key.to_string(), old: env::var(key).ok(), _lock: lock }
    }

    /// Guard `key` and set it to `val`.
    pub fn set(key: &str, val: &str) -> Self {
        let guard = Self::new(key);
        // SAFETY: ENV_LOCK is held and callers are #[serial].
        unsafe { env::set_var(key, val) };
        guard
    }

    pub fn remove(&self) {
        // SAFETY: as in `set`.
        unsafe { env::remove_var(&self.key) };
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held until this guard is gone.
        unsafe {
            match &self.old {
                Some(val) => env::set_var(&self.key, val),
                None => env::remove_var(&self.key),
            }
        }
    }
}
