use std::fs::File;

use crate::hooks::{ReleaseHooks, SystemHooks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Pending,
    Fired,
}

/// A (cleanup, handle) pair bound to the scope that holds it.
///
/// Dropping the value fires the cleanup, so the call runs on every exit path of the
/// enclosing block: fall-through, early return, `?` or panic unwind. Values dropped at
/// the end of a block go in reverse declaration order, which gives last-registered,
/// first-run ordering for free.
///
/// The cleanup runs only when both the cleanup and the handle are present. A fired call
/// is inert: its handle is gone and later drops do nothing.
#[must_use = "the cleanup fires as soon as the guard is dropped"]
pub struct DeferredCall<T, F>
where
    F: FnOnce(T),
{
    cleanup: Option<F>,
    handle: Option<T>,
    state: CallState,
}

impl<T, F> DeferredCall<T, F>
where
    F: FnOnce(T),
{
    pub fn new(cleanup: F, handle: Option<T>) -> Self {
        Self::from_parts(Some(cleanup), handle)
    }

    /// Builds a call whose cleanup may be absent. A missing cleanup is skipped at fire time.
    pub fn from_parts(cleanup: Option<F>, handle: Option<T>) -> Self {
        Self {
            cleanup,
            handle,
            state: CallState::Pending,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == CallState::Pending
    }

    /// The handle the cleanup will receive, `None` once fired or if registered null.
    pub fn handle(&self) -> Option<&T> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut T> {
        self.handle.as_mut()
    }

    /// Runs the cleanup now instead of at scope exit.
    ///
    /// Returns whether the cleanup was actually invoked. The call moves to `Fired` either
    /// way, so a second `fire` or the eventual drop is a no-op.
    pub fn fire(&mut self) -> bool {
        if self.state == CallState::Fired {
            return false;
        }
        self.state = CallState::Fired;

        match (self.cleanup.take(), self.handle.take()) {
            (Some(cleanup), Some(handle)) => {
                cleanup(handle);
                true
            }
            (None, _) => {
                log::trace!("deferred call has no cleanup, skipping");
                false
            }
            (_, None) => {
                log::trace!("deferred call has a null handle, skipping");
                false
            }
        }
    }
}

impl<T, F> Drop for DeferredCall<T, F>
where
    F: FnOnce(T),
{
    fn drop(&mut self) {
        self.fire();
    }
}

/// Registers `cleanup(handle)` to run when the returned guard leaves scope.
pub fn register_cleanup<T, F>(cleanup: F, handle: Option<T>) -> DeferredCall<T, F>
where
    F: FnOnce(T),
{
    DeferredCall::new(cleanup, handle)
}

/// Releases `memory` through the system deallocator at scope exit.
pub fn defer_release_memory<T: 'static>(
    memory: Option<Box<T>>,
) -> DeferredCall<Box<T>, impl FnOnce(Box<T>)> {
    defer_release_memory_with(&SystemHooks, memory)
}

/// Closes `file` at scope exit, flushing pending writes first.
pub fn defer_release_file(file: Option<File>) -> DeferredCall<File, impl FnOnce(File)> {
    defer_release_file_with(&SystemHooks, file)
}

pub fn defer_release_memory_with<'h, H, T>(
    hooks: &'h H,
    memory: Option<Box<T>>,
) -> DeferredCall<Box<T>, impl FnOnce(Box<T>) + 'h>
where
    H: ReleaseHooks + ?Sized,
    T: 'static,
{
    register_cleanup(
        move |memory: Box<T>| {
            log::debug!("releasing memory at {:p}", &*memory);
            hooks.release_memory(memory);
        },
        memory,
    )
}

pub fn defer_release_file_with<'h, H>(
    hooks: &'h H,
    file: Option<File>,
) -> DeferredCall<File, impl FnOnce(File) + 'h>
where
    H: ReleaseHooks + ?Sized,
{
    register_cleanup(
        move |file: File| {
            if let Err(e) = hooks.close_file(file) {
                log::warn!("failed to close deferred file: {e}");
            }
        },
        file,
    )
}

/// Mimics defer() in Go via the use of Drop destructors.
/// The body runs once when the enclosing scope exits.
#[macro_export]
macro_rules! defer {
    ($($data: tt)*) => (
        let _deferred = $crate::defer::DeferredCall::new(
            |()| -> () { $($data)* },
            ::core::option::Option::Some(()),
        );
    )
}

/// Binds `register_cleanup(cleanup, handle)` to the enclosing scope.
#[macro_export]
macro_rules! defer_call {
    ($cleanup: expr, $handle: expr) => {
        let _deferred = $crate::defer::register_cleanup($cleanup, $handle);
    };
}
