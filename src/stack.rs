//! Stack-emulated deferred calls.
//!
//! For code that cannot tie a cleanup to a scope-local guard, calls are pushed onto an
//! explicit [`DeferStack`] and popped in LIFO order. [`DeferStack::scope`] marks a
//! nesting level: leaving the returned [`StackScope`] fires everything pushed since.

use crate::{defer::DeferredCall, error::DeferError};

pub(crate) type Call<'a> = Box<dyn FnOnce() + 'a>;

pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    /// Capacity allocated on the first push.
    pub initial_capacity: usize,
    /// Hard limit on pending calls, `None` for unbounded.
    pub max_capacity: Option<usize>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: None,
        }
    }
}

/// Growable LIFO of pending deferred calls.
///
/// Capacity starts at zero, jumps to `initial_capacity` on the first push and doubles
/// from there (capped at `max_capacity`). It never shrinks. Calls still pending when the
/// stack is dropped fire then.
pub struct DeferStack<'a> {
    calls: Vec<Call<'a>>,
    capacity: usize,
    config: StackConfig,
}

impl<'a> DeferStack<'a> {
    pub fn new() -> Self {
        Self::with_config(StackConfig::default())
    }

    pub fn with_config(config: StackConfig) -> Self {
        Self {
            calls: Vec::new(),
            capacity: 0,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Records `cleanup(handle)` on top of the stack.
    ///
    /// When the stack cannot grow the call is rejected with an error and will never fire.
    pub fn push<T, F>(&mut self, cleanup: F, handle: Option<T>) -> Result<(), DeferError>
    where
        F: FnOnce(T) + 'a,
        T: 'a,
    {
        if self.calls.len() == self.capacity {
            self.grow()?;
        }
        self.calls.push(Box::new(move || {
            DeferredCall::new(cleanup, handle).fire();
        }));
        Ok(())
    }

    /// Opens a nested scope. Calls pushed through it fire when it is dropped.
    pub fn scope(&mut self) -> StackScope<'_, 'a> {
        let mark = self.calls.len();
        StackScope { stack: self, mark }
    }

    /// Pops and fires every pending call, returns how many were popped.
    pub fn unwind(&mut self) -> usize {
        self.unwind_to(0)
    }

    /// Pops and fires calls until only `mark` remain.
    pub fn unwind_to(&mut self, mark: usize) -> usize {
        let mut popped = 0;
        while self.calls.len() > mark {
            if let Some(call) = self.calls.pop() {
                call();
                popped += 1;
            }
        }
        popped
    }

    pub(crate) fn pop(&mut self) -> Option<Call<'a>> {
        self.calls.pop()
    }

    fn grow(&mut self) -> Result<(), DeferError> {
        let doubled = match self.capacity {
            0 => self.config.initial_capacity.max(1),
            capacity => capacity.saturating_mul(2),
        };
        let requested = match self.config.max_capacity {
            Some(limit) if self.capacity >= limit => {
                return Err(DeferError::CapacityExceeded { limit });
            }
            Some(limit) => doubled.min(limit),
            None => doubled,
        };

        self.calls
            .try_reserve_exact(requested - self.calls.len())
            .map_err(|source| DeferError::AllocationFailed { requested, source })?;
        log::trace!("deferred call stack grew {} -> {requested}", self.capacity);
        self.capacity = requested;
        Ok(())
    }
}

impl Default for DeferStack<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeferStack<'_> {
    fn drop(&mut self) {
        self.unwind();
    }
}

/// One nesting level of a [`DeferStack`], see [`DeferStack::scope`].
///
/// A scope only reaches the calls pushed since it was opened. Calls below its mark
/// belong to enclosing scopes and fire after it is gone.
pub struct StackScope<'s, 'a> {
    stack: &'s mut DeferStack<'a>,
    mark: usize,
}

impl<'a> StackScope<'_, 'a> {
    /// Stack depth at which this scope was opened.
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// Pending calls registered in this scope, nested scopes included.
    pub fn len(&self) -> usize {
        self.stack.len().saturating_sub(self.mark)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push<T, F>(&mut self, cleanup: F, handle: Option<T>) -> Result<(), DeferError>
    where
        F: FnOnce(T) + 'a,
        T: 'a,
    {
        self.stack.push(cleanup, handle)
    }

    /// Opens a scope nested inside this one.
    pub fn scope(&mut self) -> StackScope<'_, 'a> {
        self.stack.scope()
    }

    /// Fires this scope's pending calls now, leaving enclosing scopes untouched.
    pub fn unwind(&mut self) -> usize {
        self.stack.unwind_to(self.mark)
    }
}

impl Drop for StackScope<'_, '_> {
    fn drop(&mut self) {
        self.stack.unwind_to(self.mark);
    }
}
