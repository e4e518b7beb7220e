use std::io;

use scope_defer::{defer_at_exit, pending_exit_cleanups, DeferError, DeferStack};

use crate::constants::*;

fn announce(message: &'static str) {
    log::info!("{message}");
}

fn to_io(e: DeferError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

pub fn run() -> io::Result<()> {
    log::info!("Example 1: Explicit defer stack with nested scopes");
    let mut stack = DeferStack::new();
    {
        let mut outer = stack.scope();
        outer
            .push(announce, Some("Outer scope cleanup ran"))
            .map_err(to_io)?;
        {
            let mut inner = outer.scope();
            inner
                .push(announce, Some("Inner scope cleanup ran (registered first)"))
                .map_err(to_io)?;
            inner
                .push(announce, Some("Inner scope cleanup ran (registered second)"))
                .map_err(to_io)?;
        }
        log::info!("Back in outer scope, {} pending", outer.len());
    }
    log::info!("Stack capacity after unwinding: {}", stack.capacity());

    log::info!("Example 2: Process-wide exit cleanup");
    defer_at_exit(announce, Some(EXIT_MESSAGE)).map_err(to_io)?;
    log::info!(
        "Registered exit cleanup, {} pending until the process exits",
        pending_exit_cleanups()
    );

    Ok(())
}
