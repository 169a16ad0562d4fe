use common::types::dtos::OrderDTO;
use common::types::order_status::OrderStatus;
use common::types::transition::{
    collect_allowed_targets, default_transition_graph, is_transition_allowed,
};

/// Acciones que el repartidor puede disparar sobre una orden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourierAction {
    /// Salir a entregar (Preparing → OutForDelivery).
    StartDelivery,
    /// Marcar entregada (OutForDelivery → Delivered).
    MarkDelivered,
    /// Registrar entrega fallida (OutForDelivery → DeliveryFailed).
    /// No transiciona directo: abre el grabador de fallas.
    RecordFailure,
}

impl CourierAction {
    /// Estado en el que la acción tiene sentido.
    pub fn source(&self) -> OrderStatus {
        match self {
            CourierAction::StartDelivery => OrderStatus::Preparing,
            CourierAction::MarkDelivered => OrderStatus::OutForDelivery,
            CourierAction::RecordFailure => OrderStatus::OutForDelivery,
        }
    }

    /// Estado destino que la acción solicita.
    pub fn target(&self) -> OrderStatus {
        match self {
            CourierAction::StartDelivery => OrderStatus::OutForDelivery,
            CourierAction::MarkDelivered => OrderStatus::Delivered,
            CourierAction::RecordFailure => OrderStatus::DeliveryFailed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourierAction::StartDelivery => "Out for delivery",
            CourierAction::MarkDelivered => "Mark delivered",
            CourierAction::RecordFailure => "Delivery failed",
        }
    }
}

/// Una acción y si está habilitada para la orden en este momento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionAvailability {
    pub action: CourierAction,
    pub enabled: bool,
}

/// Calcula la disponibilidad de cada acción para una orden. `busy`
/// indica que la orden ya tiene una transición en vuelo: mientras tanto
/// todas las acciones quedan deshabilitadas.
///
/// Se recalcula fresca en cada render; el conjunto permitido nunca se
/// cachea ni se muta.
pub fn available_actions(order: &OrderDTO, busy: bool) -> Vec<ActionAvailability> {
    let graph = default_transition_graph();
    let allowed = collect_allowed_targets(
        order.allowed_transitions.as_deref(),
        order.status,
        &graph,
    );

    [
        CourierAction::StartDelivery,
        CourierAction::MarkDelivered,
        CourierAction::RecordFailure,
    ]
    .into_iter()
    .map(|action| ActionAvailability {
        action,
        enabled: !busy
            && order.status == action.source()
            && is_transition_allowed(action.target(), &allowed),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::dtos::OrderDTO;

    fn test_order(status: OrderStatus, allowed: Option<Vec<OrderStatus>>) -> OrderDTO {
        OrderDTO {
            order_id: 1,
            status,
            customer_id: "client-1".to_string(),
            address: "Av. Las Heras 2214".to_string(),
            total_cents: 150_000,
            items: vec![],
            allowed_transitions: allowed,
            time_stamp: std::time::SystemTime::now(),
        }
    }

    fn enabled_of(rows: &[ActionAvailability], action: CourierAction) -> bool {
        rows.iter()
            .find(|row| row.action == action)
            .map(|row| row.enabled)
            .unwrap_or(false)
    }

    #[test]
    fn test_preparing_con_allow_list_habilita_solo_salir() {
        let order = test_order(
            OrderStatus::Preparing,
            Some(vec![OrderStatus::OutForDelivery]),
        );
        let rows = available_actions(&order, false);
        assert!(enabled_of(&rows, CourierAction::StartDelivery));
        assert!(!enabled_of(&rows, CourierAction::MarkDelivered));
        assert!(!enabled_of(&rows, CourierAction::RecordFailure));
    }

    #[test]
    fn test_out_for_delivery_habilita_entrega_y_falla() {
        let order = test_order(
            OrderStatus::OutForDelivery,
            Some(vec![OrderStatus::Delivered, OrderStatus::DeliveryFailed]),
        );
        let rows = available_actions(&order, false);
        assert!(!enabled_of(&rows, CourierAction::StartDelivery));
        assert!(enabled_of(&rows, CourierAction::MarkDelivered));
        assert!(enabled_of(&rows, CourierAction::RecordFailure));
    }

    #[test]
    fn test_allow_list_restringe_aunque_el_grafo_permita() {
        // El backend solo permite la entrega: registrar falla queda
        // deshabilitado aunque el grafo local tenga esa arista.
        let order = test_order(
            OrderStatus::OutForDelivery,
            Some(vec![OrderStatus::Delivered]),
        );
        let rows = available_actions(&order, false);
        assert!(enabled_of(&rows, CourierAction::MarkDelivered));
        assert!(!enabled_of(&rows, CourierAction::RecordFailure));
    }

    #[test]
    fn test_sin_allow_list_usa_el_grafo_local() {
        let order = test_order(OrderStatus::OutForDelivery, None);
        let rows = available_actions(&order, false);
        assert!(enabled_of(&rows, CourierAction::MarkDelivered));
        assert!(enabled_of(&rows, CourierAction::RecordFailure));
    }

    #[test]
    fn test_orden_ocupada_deshabilita_todo() {
        let order = test_order(OrderStatus::OutForDelivery, None);
        let rows = available_actions(&order, true);
        assert!(rows.iter().all(|row| !row.enabled));
    }

    #[test]
    fn test_estado_terminal_sin_acciones() {
        let order = test_order(OrderStatus::Delivered, None);
        let rows = available_actions(&order, false);
        assert!(rows.iter().all(|row| !row.enabled));
    }

    #[test]
    fn test_estado_desconocido_sin_acciones() {
        let order = test_order(OrderStatus::Unknown, None);
        let rows = available_actions(&order, false);
        assert!(rows.iter().all(|row| !row.enabled));
    }
}
