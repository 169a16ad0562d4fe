use actix::Message;
use serde::{Deserialize, Serialize};

/// El repartidor se presenta ante el servicio de órdenes al conectarse.
#[derive(Message, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct RegisterCourier {
    pub courier_id: String,
}

/// Pide el tablero de órdenes asignadas al repartidor.
#[derive(Message, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct RequestAssignedOrders {
    pub courier_id: String,
}
