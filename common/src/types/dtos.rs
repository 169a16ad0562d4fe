use serde::{Deserialize, Serialize};

use crate::types::failure_reason::DeliveryFailureReason;
use crate::types::order_status::OrderStatus;

/// Un ítem dentro de una orden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemDTO {
    /// Nombre del producto.
    pub name: String,
    /// Cantidad pedida.
    pub quantity: u32,
    /// Precio unitario en centavos.
    pub unit_price_cents: u64,
}

/// Vista de una orden tal como la publica el servicio de órdenes.
/// Este cliente la lee; la mutación autoritativa ocurre en el backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDTO {
    /// ID de la orden.
    pub order_id: u64,
    /// Estado actual de la orden.
    pub status: OrderStatus,
    /// ID del cliente que realizó la orden.
    pub customer_id: String,
    /// Dirección de entrega.
    pub address: String,
    /// Total de la orden en centavos.
    pub total_cents: u64,
    /// Ítems de la orden.
    pub items: Vec<OrderItemDTO>,
    /// Allow-list por orden calculada por el backend: estados alcanzables
    /// ahora mismo según sus reglas de negocio. Si falta, el cliente cae
    /// al grafo de transiciones local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_transitions: Option<Vec<OrderStatus>>,
    /// Marca de tiempo de la última actualización de la orden.
    pub time_stamp: std::time::SystemTime,
}

impl Eq for OrderDTO {}

impl PartialEq for OrderDTO {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
    }
}

impl std::hash::Hash for OrderDTO {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
    }
}

/// Comando efímero de cambio de estado. Se envía al servicio de órdenes
/// y se descarta: el core nunca lo persiste.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionRequest {
    /// ID de la orden a transicionar.
    pub order_id: u64,
    /// Estado destino solicitado.
    pub to: OrderStatus,
    /// Motivo de la falla; solo cuando `to` es `DeliveryFailed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DeliveryFailureReason>,
    /// Nota libre del repartidor; nunca un string vacío.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_sin_nota_no_serializa_el_campo() {
        let request = TransitionRequest {
            order_id: 7,
            to: OrderStatus::DeliveryFailed,
            reason: Some(DeliveryFailureReason::NoAnswer),
            note: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("note"));
        assert!(json.contains("NO_ANSWER"));
    }

    #[test]
    fn test_orden_sin_allow_list_deserializa() {
        let json = r#"{
            "order_id": 1,
            "status": "PREPARING",
            "customer_id": "client-9",
            "address": "Av. Paseo Colon 850",
            "total_cents": 125000,
            "items": [],
            "time_stamp": {"secs_since_epoch": 0, "nanos_since_epoch": 0}
        }"#;
        let order: OrderDTO = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert!(order.allowed_transitions.is_none());
    }
}
