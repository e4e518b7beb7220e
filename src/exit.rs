//! Process-wide deferred calls, fired when the process exits normally.
//!
//! This is the degraded fallback: registrations are not tied to any scope and only run
//! from the `atexit` hook (or an explicit [`run_exit_cleanups`]). Abnormal termination
//! such as `abort` or a fatal signal skips them.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::{Lazy, OnceCell};

use crate::{
    error::DeferError,
    stack::{Call, DeferStack},
};

/// Process-wide stack. Only `Send + 'static` calls are ever pushed onto it.
struct ExitStack(DeferStack<'static>);

// SAFETY: `defer_at_exit` is the only way in and it requires every cleanup and handle to
// be `Send`, so the boxed calls may move to whichever thread drains the stack.
unsafe impl Send for ExitStack {}

static EXIT_STACK: Lazy<Mutex<ExitStack>> =
    Lazy::new(|| Mutex::new(ExitStack(DeferStack::new())));

static EXIT_HOOK: OnceCell<()> = OnceCell::new();

/// Records `cleanup(handle)` to run at process exit, after every call registered later.
pub fn defer_at_exit<T, F>(cleanup: F, handle: Option<T>) -> Result<(), DeferError>
where
    F: FnOnce(T) + Send + 'static,
    T: Send + 'static,
{
    install_exit_hook()?;
    EXIT_STACK
        .lock()
        .map_err(|_| DeferError::Poisoned)?
        .0
        .push(cleanup, handle)
}

/// Pops and fires pending exit calls one at a time, returns how many were popped.
///
/// The lock is released before each call, so a cleanup may register further exit calls;
/// those fire in the same drain.
pub fn run_exit_cleanups() -> usize {
    let mut popped = 0;
    while let Some(call) = pop_exit_call() {
        call();
        popped += 1;
    }
    popped
}

pub fn pending_exit_cleanups() -> usize {
    EXIT_STACK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .0
        .len()
}

fn pop_exit_call() -> Option<Call<'static>> {
    EXIT_STACK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .0
        .pop()
}

/// Installs the `atexit` hook once. Concurrent callers wait for the first attempt, and a
/// failed attempt leaves the cell empty so nothing is pushed without a hook behind it.
fn install_exit_hook() -> Result<(), DeferError> {
    EXIT_HOOK
        .get_or_try_init(|| {
            // SAFETY: `drain_at_exit` is a plain `extern "C" fn()` that lives for the whole process.
            match unsafe { libc::atexit(drain_at_exit) } {
                0 => Ok(()),
                _ => Err(DeferError::ExitHookUnavailable),
            }
        })
        .map(|_| ())
}

extern "C" fn drain_at_exit() {
    let popped = run_exit_cleanups();
    log::debug!("ran {popped} deferred exit cleanups");
}
