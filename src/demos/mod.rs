use std::io;

use scope_defer::DeferredCall;

pub mod file;
pub mod resource;
pub mod socket;
pub mod stack;

/// Borrows the resource a pending deferred call still holds.
pub fn handle_of<T, F>(call: &mut DeferredCall<T, F>) -> io::Result<&mut T>
where
    F: FnOnce(T),
{
    call.handle_mut()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "deferred handle already released"))
}
