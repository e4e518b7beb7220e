use std::{io, sync::Mutex};

use scope_defer::register_cleanup;

use super::handle_of;
use crate::constants::*;

struct DbConnection {
    connection_string: String,
    connected: bool,
}

impl DbConnection {
    fn open(connection_string: &str) -> Self {
        Self {
            connection_string: connection_string.to_owned(),
            connected: true,
        }
    }

    fn close(self) {
        if self.connected {
            log::info!("Closing database connection: {}", self.connection_string);
        }
    }
}

struct Texture {
    id: u32,
    bound: bool,
}

impl Texture {
    fn bind(&mut self) {
        log::info!("Binding texture {}", self.id);
        self.bound = true;
    }

    fn unbind(&mut self) {
        if self.bound {
            log::info!("Unbinding texture {}", self.id);
            self.bound = false;
        }
    }
}

pub fn run() -> io::Result<()> {
    log::info!("Example 1: Database connection");
    {
        let mut conn = register_cleanup(
            DbConnection::close,
            Some(DbConnection::open(DB_CONNECTION_STRING)),
        );
        log::info!(
            "Connected to database: {}",
            handle_of(&mut conn)?.connection_string
        );
    }

    log::info!("Example 2: Mutex handling");
    {
        let mutex = Mutex::new(0u32);
        let guard = mutex
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "demo mutex poisoned"))?;
        let mut locked = register_cleanup(
            |guard| {
                drop(guard);
                log::info!("Mutex unlocked");
            },
            Some(guard),
        );
        log::info!("Mutex locked");

        **handle_of(&mut locked)? += 1;
        log::info!("Performing work with mutex locked");
    }

    log::info!("Example 3: Texture resource");
    {
        let mut tex = register_cleanup(
            |mut tex: Texture| tex.unbind(),
            Some(Texture {
                id: TEXTURE_ID,
                bound: false,
            }),
        );
        let texture = handle_of(&mut tex)?;
        texture.bind();
        log::info!("Using texture {} for rendering", texture.id);
    }

    Ok(())
}
