use actix::prelude::*;
use common::types::dtos::OrderDTO;
use common::types::failure_reason::DeliveryFailureReason;
use common::types::order_status::OrderStatus;

use crate::actions::ActionAvailability;

/// Arranca el flujo del repartidor: registro y pedido del tablero.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct StartRunning;

/// Vuelve a pedir el tablero de órdenes al servicio.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RefreshBoard;

/// Pedido interno de transición de estado, emitido por la UI o por el
/// grabador de entregas fallidas. El Workflow valida y despacha.
#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "()")]
pub struct SubmitTransition {
    pub order_id: u64,
    pub to: OrderStatus,
    pub reason: Option<DeliveryFailureReason>,
    pub note: Option<String>,
}

/// Conecta el Workflow con el grabador de fallas una vez arrancados ambos.
#[derive(Message)]
#[rtype(result = "()")]
pub struct AttachRecorder {
    pub open: Recipient<OpenRecorder>,
    pub outcomes: Recipient<FailureOutcome>,
}

/// Conecta el Workflow con la UI.
#[derive(Message)]
#[rtype(result = "()")]
pub struct AttachUi {
    pub board: Recipient<BoardChanged>,
    pub errors: Recipient<ErrorNotice>,
}

/// Resultado de un intento de registrar una entrega fallida.
#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "()")]
pub enum FailureOutcome {
    /// El backend aceptó la transición a `DeliveryFailed`.
    Accepted { order_id: u64 },
    /// El intento no prosperó; el mensaje se muestra al usuario.
    Rejected { order_id: u64, message: String },
}

/// Abre una sesión de registro de entrega fallida para una orden.
/// La UI lo manda al Workflow, que valida contra el tablero antes de
/// reenviarlo al grabador.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct OpenRecorder {
    pub order_id: u64,
}

/// Cambia el motivo seleccionado en la sesión abierta.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SetReason {
    pub reason: DeliveryFailureReason,
}

/// Cambia la nota libre de la sesión abierta.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SetNote {
    pub note: String,
}

/// Envía la falla registrada al Workflow.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SubmitFailure;

/// Fila del tablero: la orden y sus acciones con disponibilidad.
#[derive(Debug, Clone)]
pub struct BoardRow {
    pub order: OrderDTO,
    pub actions: Vec<ActionAvailability>,
}

/// El tablero cambió; la UI lo vuelve a dibujar.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct BoardChanged {
    pub rows: Vec<BoardRow>,
}

/// Error a mostrar al usuario, textual y sin reintento automático.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ErrorNotice {
    pub order_id: u64,
    pub message: String,
}
