use std::{
    any::Any,
    fs::File,
    io::{self, Write},
};

/// Release primitives used by the `defer_release_*` helpers.
///
/// The helpers are generic over this trait, so the hook set is picked at compile time.
/// Swap in a different implementation through the `_with` variants.
pub trait ReleaseHooks {
    fn release_memory(&self, memory: Box<dyn Any>);
    fn close_file(&self, file: File) -> io::Result<()>;
}

/// Standard deallocation and file-close primitives.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHooks;

impl ReleaseHooks for SystemHooks {
    fn release_memory(&self, memory: Box<dyn Any>) {
        drop(memory);
    }

    /// Flushes userspace buffers, then closes the descriptor on drop.
    fn close_file(&self, mut file: File) -> io::Result<()> {
        file.flush()?;
        drop(file);
        Ok(())
    }
}
