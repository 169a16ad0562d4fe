use actix::prelude::*;
use common::logger::Logger;

use crate::messages::internal_messages::{BoardChanged, ErrorNotice};

/// Actor UIHandler: interfaz humano-sistema del repartidor.
///
/// Es un sumidero fino: dibuja el tablero que le publica el Workflow y
/// muestra errores. Ninguna decisión vive acá.
pub struct UIHandler {
    pub logger: Logger,
}

impl UIHandler {
    pub fn new(logger: Logger) -> Self {
        UIHandler { logger }
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("UIHandler started");
    }
}

impl Handler<BoardChanged> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: BoardChanged, _ctx: &mut Self::Context) -> Self::Result {
        if msg.rows.is_empty() {
            self.logger.info("No orders assigned right now.");
            return;
        }
        self.logger.info("--- Order board ---");
        for row in &msg.rows {
            let order = &row.order;
            self.logger.info(format!(
                "Order {} [{}] {} — ${}.{:02}",
                order.order_id,
                order.status,
                order.address,
                order.total_cents / 100,
                order.total_cents % 100,
            ));
            for availability in &row.actions {
                let mark = if availability.enabled { "[x]" } else { "[ ]" };
                self.logger
                    .info(format!("    {} {}", mark, availability.action.label()));
            }
        }
    }
}

impl Handler<ErrorNotice> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ErrorNotice, _ctx: &mut Self::Context) -> Self::Result {
        self.logger
            .error(format!("Order {}: {}", msg.order_id, msg.message));
    }
}
