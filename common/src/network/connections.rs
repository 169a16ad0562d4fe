use crate::constants::TIMEOUT_SECONDS;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Intenta conectarse a un `SocketAddr` y devuelve el `TcpStream` si tuvo éxito.
/// El intento se corta a los `TIMEOUT_SECONDS` para no colgar el arranque.
pub async fn connect(server_addr: SocketAddr) -> Option<TcpStream> {
    match timeout(
        Duration::from_secs(TIMEOUT_SECONDS),
        TcpStream::connect(server_addr),
    )
    .await
    {
        Ok(Ok(stream)) => Some(stream),
        Ok(Err(e)) => {
            eprintln!("Failed to connect to {}: {}", server_addr, e);
            None
        }
        Err(_) => {
            eprintln!("Connection to {} timed out", server_addr);
            None
        }
    }
}
