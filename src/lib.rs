//! Scope Defer
//!
//! Runs a cleanup callback with a handle when the enclosing scope exits. The primary
//! path binds the call to a guard value ([`DeferredCall`]) whose `Drop` fires it. The
//! fallback path records calls on an explicit [`DeferStack`], or on a process-wide stack
//! drained at exit ([`defer_at_exit`]).
//!
//! ```
//! use scope_defer::{defer_call, register_cleanup};
//!
//! let order = std::cell::RefCell::new(Vec::new());
//! {
//!     defer_call!(|name| order.borrow_mut().push(name), Some("A"));
//!     let _b = register_cleanup(|name| order.borrow_mut().push(name), Some("B"));
//! }
//! assert_eq!(*order.borrow(), ["B", "A"]);
//! ```

pub mod defer;
pub mod error;
pub mod exit;
pub mod hooks;
pub mod stack;

pub use defer::{
    defer_release_file, defer_release_file_with, defer_release_memory,
    defer_release_memory_with, register_cleanup, CallState, DeferredCall,
};
pub use error::DeferError;
pub use exit::{defer_at_exit, pending_exit_cleanups, run_exit_cleanups};
pub use hooks::{ReleaseHooks, SystemHooks};
pub use stack::{DeferStack, StackConfig, StackScope};
