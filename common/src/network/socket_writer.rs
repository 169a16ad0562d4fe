use actix::prelude::*;
use std::collections::VecDeque;
use tokio::io::{AsyncWriteExt, BufWriter, WriteHalf};
use tokio::net::TcpStream;

use crate::logger::Logger;
use crate::messages::shared_messages::NetworkMessage;

/// Serializa [`NetworkMessage`]s como JSON delimitado por línea y los
/// escribe al socket. Mantiene una cola para que los mensajes salgan en
/// el orden en que llegaron. Si el socket falla, el writer se descarta
/// y la cola se limpia; la capa de arriba ya trata cada fallo como
/// terminal para esa acción.
pub struct SocketWriter {
    writer: Option<BufWriter<WriteHalf<TcpStream>>>,
    queue: VecDeque<NetworkMessage>,
    logger: Logger,
}

impl SocketWriter {
    pub fn new(write_half: WriteHalf<TcpStream>) -> Self {
        Self {
            writer: Some(BufWriter::new(write_half)),
            queue: VecDeque::new(),
            logger: Logger::new("SocketWriter"),
        }
    }
}

impl Actor for SocketWriter {
    type Context = Context<Self>;
}

struct ProcessQueue;

impl Message for ProcessQueue {
    type Result = ();
}

impl Handler<NetworkMessage> for SocketWriter {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) {
        if self.writer.is_none() {
            self.logger
                .warn(format!("Socket closed, dropping outbound message: {:?}", msg));
            return;
        }
        self.queue.push_back(msg);
        if self.queue.len() == 1 {
            ctx.notify(ProcessQueue);
        }
    }
}

impl Handler<ProcessQueue> for SocketWriter {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _msg: ProcessQueue, _ctx: &mut Self::Context) -> Self::Result {
        if let (Some(mut writer), Some(msg)) = (self.writer.take(), self.queue.front().cloned()) {
            let fut = async move {
                let serialized = match serde_json::to_string(&msg) {
                    Ok(s) => s,
                    Err(e) => return Err(format!("Error serializing message: {:?}", e)),
                };
                if let Err(e) = writer.write_all(format!("{}\n", serialized).as_bytes()).await {
                    return Err(format!("Error writing to socket: {:?}", e));
                }
                // Flush para que el mensaje salga ahora y no quede en el buffer
                if let Err(e) = writer.flush().await {
                    return Err(format!("Error flushing socket: {:?}", e));
                }
                Ok(writer)
            };

            Box::pin(fut.into_actor(self).map(move |res, act, ctx| match res {
                Ok(writer) => {
                    act.writer = Some(writer);
                    act.queue.pop_front();
                    if !act.queue.is_empty() {
                        ctx.notify(ProcessQueue);
                    }
                }
                Err(err_msg) => {
                    // Writer inválido: se descarta junto con lo encolado
                    act.writer = None;
                    act.queue.clear();
                    act.logger.error(err_msg);
                }
            }))
        } else {
            Box::pin(async {}.into_actor(self))
        }
    }
}
