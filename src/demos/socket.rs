use std::io;

use scope_defer::register_cleanup;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpSocket, TcpStream},
};

use super::handle_of;
use crate::constants::*;

/// Cleanup that closes any socket type by dropping it.
fn close_socket<S>(label: &'static str) -> impl FnOnce(S) {
    move |socket| {
        drop(socket);
        log::info!("Closed {label} socket");
    }
}

pub async fn run() -> io::Result<()> {
    log::info!("Example 1: Basic socket operations");
    {
        let socket = TcpSocket::new_v4()?;
        let _socket = register_cleanup(close_socket::<TcpSocket>("basic"), Some(socket));
        log::info!("Socket created successfully");
    }

    log::info!("Example 2: Socket with address binding");
    {
        let listener = TcpListener::bind(LOOPBACK_ADDR).await?;
        let addr = listener.local_addr()?;
        let _listener = register_cleanup(close_socket::<TcpListener>("bound"), Some(listener));
        log::info!("Socket bound to {addr}");
    }

    log::info!("Example 3: Multiple sockets");
    {
        let server = TcpListener::bind(LOOPBACK_ADDR).await?;
        let addr = server.local_addr()?;
        let mut server = register_cleanup(close_socket::<TcpListener>("server"), Some(server));

        let client = TcpStream::connect(addr).await?;
        let mut client = register_cleanup(close_socket::<TcpStream>("client"), Some(client));

        let (accepted, peer) = handle_of(&mut server)?.accept().await?;
        let mut accepted = register_cleanup(close_socket::<TcpStream>("accepted"), Some(accepted));
        log::info!("Server and client sockets created, peer {peer}");

        handle_of(&mut client)?.write_all(PING).await?;
        let mut received = vec![0u8; PING.len()];
        handle_of(&mut accepted)?.read_exact(&mut received).await?;
        log::info!("Server received {}", String::from_utf8_lossy(&received));
    }

    Ok(())
}
