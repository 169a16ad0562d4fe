use crate::types::order_status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Una arista dirigida del grafo de transiciones legales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl Transition {
    pub fn new(from: OrderStatus, to: OrderStatus) -> Self {
        Self { from, to }
    }
}

/// Grafo de transiciones por defecto. Es un *fallback* local: se usa
/// únicamente cuando el backend no envió la allow-list de la orden.
/// `Delivered` y `Canceled` son terminales y no tienen aristas salientes.
pub fn default_transition_graph() -> Vec<Transition> {
    use crate::types::order_status::OrderStatus::*;
    vec![
        Transition::new(Pending, Confirmed),
        Transition::new(Pending, Canceled),
        Transition::new(Confirmed, Preparing),
        Transition::new(Confirmed, Canceled),
        Transition::new(Preparing, OutForDelivery),
        Transition::new(Preparing, Canceled),
        Transition::new(OutForDelivery, Delivered),
        Transition::new(OutForDelivery, DeliveryFailed),
        Transition::new(DeliveryFailed, OutForDelivery),
        Transition::new(DeliveryFailed, Canceled),
    ]
}

/// Calcula el conjunto efectivo de estados destino legales para una orden.
///
/// La allow-list del backend, si vino y no está vacía, es autoritativa:
/// el backend aplica reglas de negocio (asignación de repartidor, ventanas
/// horarias) que el cliente no ve, así que el grafo estático nunca la
/// pisa. Sin allow-list se cae al grafo local, y un estado terminal o
/// `Unknown` queda sin destinos.
pub fn collect_allowed_targets(
    server_allowed: Option<&[OrderStatus]>,
    current: OrderStatus,
    graph: &[Transition],
) -> HashSet<OrderStatus> {
    if let Some(allowed) = server_allowed {
        if !allowed.is_empty() {
            return allowed.iter().copied().collect();
        }
    }
    graph
        .iter()
        .filter(|edge| edge.from == current)
        .map(|edge| edge.to)
        .collect()
}

/// Test de pertenencia puro: un conjunto vacío no permite nada y
/// `Unknown` nunca es un destino válido, venga de donde venga.
pub fn is_transition_allowed(candidate: OrderStatus, allowed: &HashSet<OrderStatus>) -> bool {
    candidate != OrderStatus::Unknown && allowed.contains(&candidate)
}
