use actix::Message;
use serde::{Deserialize, Serialize};

use crate::types::dtos::OrderDTO;

/// Snapshot del tablero: todas las órdenes asignadas al repartidor.
#[derive(Message, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[rtype(result = "()")]
pub struct AssignedOrders {
    pub orders: Vec<OrderDTO>,
}

/// Resultado autoritativo de un cambio de estado. También llega por
/// cambios hechos fuera de este cliente (otro operador, el backend).
#[derive(Message, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[rtype(result = "()")]
pub struct OrderUpdated {
    pub order: OrderDTO,
}

/// El backend rechazó la transición pedida. El mensaje es legible para
/// humanos y se muestra tal cual; no hay reintento automático.
#[derive(Message, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[rtype(result = "()")]
pub struct StatusChangeRejected {
    pub order_id: u64,
    pub message: String,
}
