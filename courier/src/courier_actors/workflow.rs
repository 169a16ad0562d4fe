use actix::prelude::*;
use common::logger::Logger;
use common::messages::shared_messages::NetworkMessage;
use common::messages::{RegisterCourier, RequestAssignedOrders};
use common::types::dtos::{OrderDTO, TransitionRequest};
use common::types::order_status::OrderStatus;
use common::types::transition::{
    collect_allowed_targets, default_transition_graph, is_transition_allowed,
};
use std::collections::HashMap;

use crate::actions::{available_actions, CourierAction};
use crate::messages::internal_messages::{
    AttachRecorder, AttachUi, BoardChanged, BoardRow, ErrorNotice, FailureOutcome, OpenRecorder,
    RefreshBoard, StartRunning, SubmitTransition,
};

/// Transición en vuelo para una orden: a lo sumo una por orden.
#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    request_id: u64,
    to: OrderStatus,
}

/// Actor Workflow: decide qué acciones ofrece el tablero del repartidor
/// y despacha los pedidos de transición al servicio de órdenes.
///
/// Nunca muta el estado de una orden localmente: el único efecto local
/// de un envío es el marcador en vuelo, que deshabilita la acción hasta
/// que el backend conteste.
pub struct Workflow {
    /// ID del repartidor.
    pub courier_id: String,
    /// Tablero cacheado, reemplazado desde las respuestas del backend.
    orders: HashMap<u64, OrderDTO>,
    /// Marcador en vuelo por orden; un segundo click es un no-op.
    in_flight: HashMap<u64, PendingTransition>,
    /// Fuente monótona de IDs de pedido.
    next_request_id: u64,
    /// Salida hacia el servicio de órdenes.
    outbound: Recipient<NetworkMessage>,
    /// Grabador de entregas fallidas, si está conectado.
    recorder_open: Option<Recipient<OpenRecorder>>,
    recorder_outcomes: Option<Recipient<FailureOutcome>>,
    /// UI, si está conectada.
    ui_board: Option<Recipient<BoardChanged>>,
    ui_errors: Option<Recipient<ErrorNotice>>,
    logger: Logger,
}

impl Workflow {
    pub fn new(courier_id: String, outbound: Recipient<NetworkMessage>) -> Self {
        let logger = Logger::new(format!("Workflow {}", &courier_id));
        Self {
            courier_id,
            orders: HashMap::new(),
            in_flight: HashMap::new(),
            next_request_id: 1,
            outbound,
            recorder_open: None,
            recorder_outcomes: None,
            ui_board: None,
            ui_errors: None,
            logger,
        }
    }

    /// Recalcula el tablero y lo publica a la UI si hay una conectada.
    fn publish_board(&self) {
        let Some(ui) = &self.ui_board else {
            return;
        };
        let mut rows: Vec<BoardRow> = self
            .orders
            .values()
            .map(|order| BoardRow {
                order: order.clone(),
                actions: available_actions(order, self.in_flight.contains_key(&order.order_id)),
            })
            .collect();
        rows.sort_by_key(|row| row.order.order_id);
        ui.do_send(BoardChanged { rows });
    }

    fn surface_error(&self, order_id: u64, message: String) {
        self.logger.error(format!("Order {}: {}", order_id, message));
        if let Some(ui) = &self.ui_errors {
            ui.do_send(ErrorNotice { order_id, message });
        }
    }

    /// Avisa al grabador de fallas el resultado de su propio envío.
    fn notify_recorder(&self, outcome: FailureOutcome) {
        if let Some(recorder) = &self.recorder_outcomes {
            recorder.do_send(outcome);
        }
    }
}

impl Actor for Workflow {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("Workflow started");
    }
}

impl Handler<StartRunning> for Workflow {
    type Result = ();

    fn handle(&mut self, _msg: StartRunning, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info("Registering courier and requesting the order board");
        self.outbound
            .do_send(NetworkMessage::RegisterCourier(RegisterCourier {
                courier_id: self.courier_id.clone(),
            }));
        self.outbound
            .do_send(NetworkMessage::RequestAssignedOrders(RequestAssignedOrders {
                courier_id: self.courier_id.clone(),
            }));
    }
}

impl Handler<RefreshBoard> for Workflow {
    type Result = ();

    fn handle(&mut self, _msg: RefreshBoard, _ctx: &mut Self::Context) -> Self::Result {
        self.outbound
            .do_send(NetworkMessage::RequestAssignedOrders(RequestAssignedOrders {
                courier_id: self.courier_id.clone(),
            }));
    }
}

impl Handler<AttachRecorder> for Workflow {
    type Result = ();

    fn handle(&mut self, msg: AttachRecorder, _ctx: &mut Self::Context) -> Self::Result {
        self.recorder_open = Some(msg.open);
        self.recorder_outcomes = Some(msg.outcomes);
    }
}

impl Handler<OpenRecorder> for Workflow {
    type Result = ();

    fn handle(&mut self, msg: OpenRecorder, _ctx: &mut Self::Context) -> Self::Result {
        let Some(order) = self.orders.get(&msg.order_id) else {
            self.surface_error(msg.order_id, "Order is not on your board".to_string());
            return;
        };

        // El diálogo solo se abre si la acción está disponible ahora;
        // si no, el usuario se entera antes de tipear motivo y nota.
        let busy = self.in_flight.contains_key(&msg.order_id);
        let failure_enabled = available_actions(order, busy)
            .iter()
            .any(|row| row.action == CourierAction::RecordFailure && row.enabled);
        if !failure_enabled {
            self.surface_error(
                msg.order_id,
                format!(
                    "Recording a delivery failure is not available while the order is {}",
                    order.status
                ),
            );
            return;
        }

        if let Some(recorder) = &self.recorder_open {
            recorder.do_send(msg);
        } else {
            self.logger
                .warn("No failure recorder attached, cannot open the dialog");
        }
    }
}

impl Handler<AttachUi> for Workflow {
    type Result = ();

    fn handle(&mut self, msg: AttachUi, _ctx: &mut Self::Context) -> Self::Result {
        self.ui_board = Some(msg.board);
        self.ui_errors = Some(msg.errors);
        self.publish_board();
    }
}

impl Handler<SubmitTransition> for Workflow {
    type Result = ();

    fn handle(&mut self, msg: SubmitTransition, _ctx: &mut Self::Context) -> Self::Result {
        let Some(order) = self.orders.get(&msg.order_id) else {
            // También es un fallo terminal para esta acción: se muestra
            // y, si venía del grabador, este vuelve a Collecting.
            self.surface_error(msg.order_id, "Order is not on your board".to_string());
            if msg.to == OrderStatus::DeliveryFailed {
                self.notify_recorder(FailureOutcome::Rejected {
                    order_id: msg.order_id,
                    message: "Order is not on your board".to_string(),
                });
            }
            return;
        };

        if self.in_flight.contains_key(&msg.order_id) {
            // Segundo click mientras el primero está en vuelo: no-op.
            self.logger.warn(format!(
                "Transition already in flight for order {}, ignoring",
                msg.order_id
            ));
            if msg.to == OrderStatus::DeliveryFailed {
                self.notify_recorder(FailureOutcome::Rejected {
                    order_id: msg.order_id,
                    message: "Another update for this order is still in progress".to_string(),
                });
            }
            return;
        }

        let graph = default_transition_graph();
        let allowed =
            collect_allowed_targets(order.allowed_transitions.as_deref(), order.status, &graph);
        if !is_transition_allowed(msg.to, &allowed) {
            // Transición ilegal: se omite la acción, no se llama a la red.
            self.logger.warn(format!(
                "Transition {} -> {} not allowed for order {}, nothing sent",
                order.status, msg.to, msg.order_id
            ));
            if msg.to == OrderStatus::DeliveryFailed {
                self.notify_recorder(FailureOutcome::Rejected {
                    order_id: msg.order_id,
                    message: format!("Transition to {} is not allowed right now", msg.to),
                });
            }
            return;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight.insert(
            msg.order_id,
            PendingTransition {
                request_id,
                to: msg.to,
            },
        );

        self.logger.info(format!(
            "Requesting {} for order {} (request {})",
            msg.to, msg.order_id, request_id
        ));
        self.outbound
            .do_send(NetworkMessage::ChangeOrderStatus(TransitionRequest {
                order_id: msg.order_id,
                to: msg.to,
                reason: msg.reason,
                note: msg.note,
            }));

        // Mientras la transición está en vuelo la acción queda deshabilitada
        self.publish_board();
    }
}

impl Handler<NetworkMessage> for Workflow {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, _ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::AssignedOrders(board) => {
                self.logger
                    .info(format!("Received order board with {} orders", board.orders.len()));
                self.orders = board
                    .orders
                    .into_iter()
                    .map(|order| (order.order_id, order))
                    .collect();
                self.publish_board();
            }

            NetworkMessage::OrderUpdated(update) => {
                let order_id = update.order.order_id;
                self.logger.info(format!(
                    "Order {} updated by the backend, now {}",
                    order_id, update.order.status
                ));
                let pending = self.in_flight.remove(&order_id);
                // La vista cacheada se invalida con la respuesta autoritativa
                self.orders.insert(order_id, update.order);
                if let Some(pending) = pending {
                    self.logger
                        .info(format!("Request {} settled", pending.request_id));
                    if pending.to == OrderStatus::DeliveryFailed {
                        self.notify_recorder(FailureOutcome::Accepted { order_id });
                    }
                }
                self.publish_board();
            }

            NetworkMessage::StatusChangeRejected(rejection) => {
                let pending = self.in_flight.remove(&rejection.order_id);
                // El estado mostrado no cambia; la acción vuelve a estar disponible
                self.surface_error(rejection.order_id, rejection.message.clone());
                if let Some(pending) = pending {
                    if pending.to == OrderStatus::DeliveryFailed {
                        self.notify_recorder(FailureOutcome::Rejected {
                            order_id: rejection.order_id,
                            message: rejection.message,
                        });
                    }
                }
                self.publish_board();
            }

            NetworkMessage::ConnectionClosed => {
                self.logger
                    .error("Connection to the order service closed");
            }

            other => {
                self.logger
                    .warn(format!("Unhandled NetworkMessage in Workflow: {:?}", other));
            }
        }
    }
}
