use crate::messages::courier_messages::*;
use crate::messages::order_messages::*;
use crate::types::dtos::TransitionRequest;
use actix::prelude::*;
use serde::{Deserialize, Serialize};

/// Todos los mensajes que viajan por la red entre el repartidor y el
/// servicio de órdenes, en JSON delimitado por línea.
///
/// Cada variante envuelve su struct; ver la documentación de cada una.
#[derive(Serialize, Deserialize, Debug, Message, Clone, PartialEq)]
#[serde(tag = "type")]
#[rtype(result = "()")]
pub enum NetworkMessage {
    // Courier -> servicio de órdenes
    /// El repartidor se registra en el servicio.
    RegisterCourier(RegisterCourier),
    /// Pide el tablero de órdenes asignadas.
    RequestAssignedOrders(RequestAssignedOrders),
    /// Pide una transición de estado (semántica PATCH /orders/{id}/status).
    ChangeOrderStatus(TransitionRequest),

    // Servicio de órdenes -> courier
    /// Snapshot del tablero de órdenes asignadas.
    AssignedOrders(AssignedOrders),
    /// Una orden fue actualizada en el backend.
    OrderUpdated(OrderUpdated),
    /// El backend rechazó un cambio de estado.
    StatusChangeRejected(StatusChangeRejected),

    /// Sintetizado localmente cuando la conexión TCP se cierra.
    ConnectionClosed,
}
