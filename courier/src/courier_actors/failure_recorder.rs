use actix::prelude::*;
use common::logger::Logger;
use common::types::failure_reason::DeliveryFailureReason;
use common::types::order_status::OrderStatus;

use crate::messages::internal_messages::{
    FailureOutcome, OpenRecorder, SetNote, SetReason, SubmitFailure, SubmitTransition,
};

/// Estado del grabador de entregas fallidas. Una sola sesión a la vez.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderState {
    /// Sin sesión abierta.
    Idle,
    /// Diálogo abierto: se están cargando motivo y nota.
    Collecting {
        order_id: u64,
        reason: DeliveryFailureReason,
        note: String,
    },
    /// Pedido en vuelo hacia el Workflow / backend.
    Submitting {
        order_id: u64,
        reason: DeliveryFailureReason,
        note: String,
    },
}

/// Actor FailureRecorder: el sub-flujo que captura motivo y nota antes
/// de transicionar una orden a `DeliveryFailed`.
///
/// Solo se abre desde una orden en `OutForDelivery`. Si el backend
/// rechaza el envío, la sesión vuelve a `Collecting` con lo que el
/// usuario había cargado; no se pierde nada en un submit fallido.
pub struct FailureRecorder {
    state: RecorderState,
    workflow: Recipient<SubmitTransition>,
    logger: Logger,
}

impl FailureRecorder {
    pub fn new(workflow: Recipient<SubmitTransition>) -> Self {
        Self {
            state: RecorderState::Idle,
            workflow,
            logger: Logger::new("FailureRecorder"),
        }
    }
}

impl Actor for FailureRecorder {
    type Context = Context<Self>;
}

impl Handler<OpenRecorder> for FailureRecorder {
    type Result = ();

    fn handle(&mut self, msg: OpenRecorder, _ctx: &mut Self::Context) -> Self::Result {
        match &self.state {
            RecorderState::Idle => {
                self.logger.info(format!(
                    "Recording delivery failure for order {}",
                    msg.order_id
                ));
                self.state = RecorderState::Collecting {
                    order_id: msg.order_id,
                    reason: DeliveryFailureReason::default(),
                    note: String::new(),
                };
            }
            RecorderState::Collecting { order_id, .. }
            | RecorderState::Submitting { order_id, .. } => {
                self.logger.warn(format!(
                    "A failure session for order {} is already active, ignoring open for order {}",
                    order_id, msg.order_id
                ));
            }
        }
    }
}

impl Handler<SetReason> for FailureRecorder {
    type Result = ();

    fn handle(&mut self, msg: SetReason, _ctx: &mut Self::Context) -> Self::Result {
        if let RecorderState::Collecting { reason, .. } = &mut self.state {
            *reason = msg.reason;
        } else {
            self.logger.warn("SetReason without an open session, ignoring");
        }
    }
}

impl Handler<SetNote> for FailureRecorder {
    type Result = ();

    fn handle(&mut self, msg: SetNote, _ctx: &mut Self::Context) -> Self::Result {
        if let RecorderState::Collecting { note, .. } = &mut self.state {
            *note = msg.note;
        } else {
            self.logger.warn("SetNote without an open session, ignoring");
        }
    }
}

impl Handler<SubmitFailure> for FailureRecorder {
    type Result = ();

    fn handle(&mut self, _msg: SubmitFailure, _ctx: &mut Self::Context) -> Self::Result {
        let RecorderState::Collecting { order_id, reason, note } = self.state.clone() else {
            self.logger.warn("SubmitFailure without an open session, ignoring");
            return;
        };

        // Nota vacía viaja como ausente, no como string vacío
        let trimmed = note.trim();
        let outbound_note = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };

        self.logger.info(format!(
            "Submitting delivery failure for order {}: {}",
            order_id, reason
        ));
        self.workflow.do_send(SubmitTransition {
            order_id,
            to: OrderStatus::DeliveryFailed,
            reason: Some(reason),
            note: outbound_note,
        });
        self.state = RecorderState::Submitting { order_id, reason, note };
    }
}

impl Handler<FailureOutcome> for FailureRecorder {
    type Result = ();

    fn handle(&mut self, msg: FailureOutcome, _ctx: &mut Self::Context) -> Self::Result {
        let RecorderState::Submitting { order_id, reason, note } = self.state.clone() else {
            // Resultado de un envío que no es nuestro (p.ej. la UI mandó
            // la falla directo al Workflow); no hay sesión que cerrar.
            return;
        };

        match msg {
            FailureOutcome::Accepted { order_id: accepted_id } if accepted_id == order_id => {
                self.logger
                    .info(format!("Delivery failure recorded for order {}", order_id));
                self.state = RecorderState::Idle;
            }
            FailureOutcome::Rejected { order_id: rejected_id, message }
                if rejected_id == order_id =>
            {
                // El diálogo queda abierto con lo que el usuario cargó
                self.logger.error(format!(
                    "Failure submit rejected for order {}: {}",
                    order_id, message
                ));
                self.state = RecorderState::Collecting { order_id, reason, note };
            }
            other => {
                self.logger.warn(format!(
                    "Outcome for a different order while submitting {}: {:?}",
                    order_id, other
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Actor buzón: captura lo que el recorder le manda al Workflow.
    struct WorkflowStub {
        submitted: Vec<SubmitTransition>,
    }

    impl Actor for WorkflowStub {
        type Context = Context<Self>;
    }

    impl Handler<SubmitTransition> for WorkflowStub {
        type Result = ();

        fn handle(&mut self, msg: SubmitTransition, _ctx: &mut Self::Context) -> Self::Result {
            self.submitted.push(msg);
        }
    }

    struct GetSubmitted;

    impl Message for GetSubmitted {
        type Result = Vec<SubmitTransition>;
    }

    impl Handler<GetSubmitted> for WorkflowStub {
        type Result = MessageResult<GetSubmitted>;

        fn handle(&mut self, _msg: GetSubmitted, _ctx: &mut Self::Context) -> Self::Result {
            MessageResult(self.submitted.clone())
        }
    }

    struct GetState;

    impl Message for GetState {
        type Result = RecorderState;
    }

    impl Handler<GetState> for FailureRecorder {
        type Result = MessageResult<GetState>;

        fn handle(&mut self, _msg: GetState, _ctx: &mut Self::Context) -> Self::Result {
            MessageResult(self.state.clone())
        }
    }

    async fn recorder_pair() -> (Addr<FailureRecorder>, Addr<WorkflowStub>) {
        let stub = WorkflowStub { submitted: vec![] }.start();
        let recorder = FailureRecorder::new(stub.clone().recipient()).start();
        (recorder, stub)
    }

    #[actix_rt::test]
    async fn test_abrir_arranca_con_motivo_por_defecto() {
        let (recorder, _stub) = recorder_pair().await;
        recorder.send(OpenRecorder { order_id: 10 }).await.unwrap();

        let state = recorder.send(GetState).await.unwrap();
        assert_eq!(
            state,
            RecorderState::Collecting {
                order_id: 10,
                reason: DeliveryFailureReason::NoAnswer,
                note: String::new(),
            }
        );
    }

    #[actix_rt::test]
    async fn test_nota_vacia_viaja_como_ausente() {
        let (recorder, stub) = recorder_pair().await;
        recorder.send(OpenRecorder { order_id: 11 }).await.unwrap();
        recorder
            .send(SetNote {
                note: "   ".to_string(),
            })
            .await
            .unwrap();
        recorder.send(SubmitFailure).await.unwrap();

        let submitted = stub.send(GetSubmitted).await.unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].to, OrderStatus::DeliveryFailed);
        assert_eq!(submitted[0].reason, Some(DeliveryFailureReason::NoAnswer));
        assert_eq!(submitted[0].note, None);
    }

    #[actix_rt::test]
    async fn test_nota_se_recorta_antes_de_enviar() {
        let (recorder, stub) = recorder_pair().await;
        recorder.send(OpenRecorder { order_id: 12 }).await.unwrap();
        recorder
            .send(SetReason {
                reason: DeliveryFailureReason::UnsafeLocation,
            })
            .await
            .unwrap();
        recorder
            .send(SetNote {
                note: "  no lighting in the alley  ".to_string(),
            })
            .await
            .unwrap();
        recorder.send(SubmitFailure).await.unwrap();

        let submitted = stub.send(GetSubmitted).await.unwrap();
        assert_eq!(
            submitted[0].note.as_deref(),
            Some("no lighting in the alley")
        );
        assert_eq!(
            submitted[0].reason,
            Some(DeliveryFailureReason::UnsafeLocation)
        );
    }

    #[actix_rt::test]
    async fn test_rechazo_preserva_lo_cargado() {
        let (recorder, _stub) = recorder_pair().await;
        recorder.send(OpenRecorder { order_id: 13 }).await.unwrap();
        recorder
            .send(SetReason {
                reason: DeliveryFailureReason::WrongAddress,
            })
            .await
            .unwrap();
        recorder
            .send(SetNote {
                note: "Street does not match the map".to_string(),
            })
            .await
            .unwrap();
        recorder.send(SubmitFailure).await.unwrap();
        recorder
            .send(FailureOutcome::Rejected {
                order_id: 13,
                message: "validation failed".to_string(),
            })
            .await
            .unwrap();

        // Vuelve a Collecting con motivo y nota intactos
        let state = recorder.send(GetState).await.unwrap();
        assert_eq!(
            state,
            RecorderState::Collecting {
                order_id: 13,
                reason: DeliveryFailureReason::WrongAddress,
                note: "Street does not match the map".to_string(),
            }
        );
    }

    #[actix_rt::test]
    async fn test_exito_cierra_la_sesion() {
        let (recorder, _stub) = recorder_pair().await;
        recorder.send(OpenRecorder { order_id: 14 }).await.unwrap();
        recorder.send(SubmitFailure).await.unwrap();
        recorder
            .send(FailureOutcome::Accepted { order_id: 14 })
            .await
            .unwrap();

        let state = recorder.send(GetState).await.unwrap();
        assert_eq!(state, RecorderState::Idle);
    }

    #[actix_rt::test]
    async fn test_orden_fuera_del_tablero_no_deja_la_sesion_colgada() {
        use crate::courier_actors::workflow::Workflow;
        use crate::messages::internal_messages::{AttachRecorder, RefreshBoard};
        use common::messages::shared_messages::NetworkMessage;

        struct NetSink;

        impl Actor for NetSink {
            type Context = Context<Self>;
        }

        impl Handler<NetworkMessage> for NetSink {
            type Result = ();

            fn handle(&mut self, _msg: NetworkMessage, _ctx: &mut Self::Context) -> Self::Result {}
        }

        let sink = NetSink.start();
        let workflow = Workflow::new("courier-1".to_string(), sink.recipient()).start();
        let recorder = FailureRecorder::new(workflow.clone().recipient()).start();
        workflow
            .send(AttachRecorder {
                open: recorder.clone().recipient(),
                outcomes: recorder.clone().recipient(),
            })
            .await
            .unwrap();

        // El tablero está vacío: la orden 99 no es de este repartidor
        recorder.send(OpenRecorder { order_id: 99 }).await.unwrap();
        recorder.send(SubmitFailure).await.unwrap();

        // Drenamos el mailbox del Workflow para que procese el envío
        workflow.send(RefreshBoard).await.unwrap();

        // El rechazo devolvió la sesión a Collecting con lo cargado;
        // el diálogo sigue usable, no queda en Submitting para siempre
        let state = recorder.send(GetState).await.unwrap();
        assert_eq!(
            state,
            RecorderState::Collecting {
                order_id: 99,
                reason: DeliveryFailureReason::NoAnswer,
                note: String::new(),
            }
        );
    }

    #[actix_rt::test]
    async fn test_no_abre_dos_sesiones_a_la_vez() {
        let (recorder, _stub) = recorder_pair().await;
        recorder.send(OpenRecorder { order_id: 15 }).await.unwrap();
        recorder.send(OpenRecorder { order_id: 16 }).await.unwrap();

        let state = recorder.send(GetState).await.unwrap();
        assert_eq!(
            state,
            RecorderState::Collecting {
                order_id: 15,
                reason: DeliveryFailureReason::NoAnswer,
                note: String::new(),
            }
        );
    }
}
