use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado del ciclo de vida de una orden, tal como lo publica el
/// servicio de órdenes. El backend es la única autoridad que muta
/// este estado; los clientes sólo lo leen y piden transiciones.
///
/// `Unknown` captura cualquier string que el backend envíe y esta
/// versión del cliente no reconozca: nunca se serializa hacia afuera
/// y resuelve siempre a "sin acciones disponibles".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,        // La orden fue creada y espera confirmación
    Confirmed,      // El comercio confirmó la orden
    Preparing,      // La orden está en preparación
    OutForDelivery, // El repartidor salió con la orden
    DeliveryFailed, // El intento de entrega falló
    Delivered,      // La orden fue entregada al cliente
    Canceled,       // La orden fue cancelada
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Un estado terminal no tiene transiciones salientes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Confirmed => write!(f, "Confirmed"),
            OrderStatus::Preparing => write!(f, "Preparing"),
            OrderStatus::OutForDelivery => write!(f, "Out for Delivery"),
            OrderStatus::DeliveryFailed => write!(f, "Delivery Failed"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Canceled => write!(f, "Canceled"),
            OrderStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializa_estados_conocidos() {
        let status: OrderStatus = serde_json::from_str("\"OUT_FOR_DELIVERY\"").unwrap();
        assert_eq!(status, OrderStatus::OutForDelivery);
    }

    #[test]
    fn test_string_desconocido_mapea_a_unknown() {
        // Un backend más nuevo puede inventar estados que este cliente
        // no conoce: se degrada a Unknown en vez de fallar el parseo.
        let status: OrderStatus = serde_json::from_str("\"RETURNED_TO_HUB\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_estados_terminales() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert!(!OrderStatus::Unknown.is_terminal());
    }
}
