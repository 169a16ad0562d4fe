use actix::dev::ToEnvelope;
use actix::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader, ReadHalf};
use tokio::net::TcpStream;

use crate::logger::Logger;
use crate::messages::shared_messages::NetworkMessage;

/// Lee líneas JSON del socket y las parsea a [`NetworkMessage`] en el
/// borde: una línea que no parsea se loguea y se descarta, nunca tira
/// abajo al actor destino. Al cerrarse el stream se sintetiza un
/// `ConnectionClosed`.
pub struct SocketReader<A: Actor + Handler<NetworkMessage>> {
    reader: Option<BufReader<ReadHalf<TcpStream>>>,
    destination: Addr<A>,
    logger: Logger,
}

impl<A> SocketReader<A>
where
    A: Actor + Handler<NetworkMessage>,
{
    pub fn new(read_half: ReadHalf<TcpStream>, destination: Addr<A>) -> Self {
        Self {
            reader: Some(BufReader::new(read_half)),
            destination,
            logger: Logger::new("SocketReader"),
        }
    }
}

impl<A> Actor for SocketReader<A>
where
    A: Actor + Handler<NetworkMessage> + 'static,
    A::Context: ToEnvelope<A, NetworkMessage>,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let destination = self.destination.clone();
        let logger = self.logger.clone();
        let Some(reader) = self.reader.take() else {
            logger.error("SocketReader started without a stream");
            return;
        };

        ctx.spawn(
            async move {
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    match serde_json::from_str::<NetworkMessage>(&line) {
                        Ok(message) => destination.do_send(message),
                        Err(e) => {
                            logger.warn(format!("Dropping unparseable line: {} ({})", line, e));
                        }
                    }
                }
                destination.do_send(NetworkMessage::ConnectionClosed);
            }
            .into_actor(self),
        );
    }
}
