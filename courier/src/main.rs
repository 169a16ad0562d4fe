use actix::prelude::*;
use colored::Color;
use common::constants::{ORDER_SERVICE_IP, ORDER_SERVICE_PORT};
use common::logger::Logger;
use common::network::connections::connect;
use common::network::socket_reader::SocketReader;
use common::network::socket_writer::SocketWriter;
use common::types::failure_reason::DeliveryFailureReason;
use common::types::order_status::OrderStatus;
use std::env;
use std::net::SocketAddr;
use tokio::io::{split, AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;

mod actions;
mod courier_actors;
mod messages;

use courier_actors::failure_recorder::FailureRecorder;
use courier_actors::ui_handler::UIHandler;
use courier_actors::workflow::Workflow;
use messages::internal_messages::{
    AttachRecorder, AttachUi, OpenRecorder, RefreshBoard, SetNote, SetReason, StartRunning,
    SubmitFailure, SubmitTransition,
};

fn parse_reason(raw: &str) -> Option<DeliveryFailureReason> {
    match raw.to_uppercase().as_str() {
        "NO_ANSWER" => Some(DeliveryFailureReason::NoAnswer),
        "WRONG_ADDRESS" => Some(DeliveryFailureReason::WrongAddress),
        "UNSAFE_LOCATION" => Some(DeliveryFailureReason::UnsafeLocation),
        "CUSTOMER_REQUESTED_RESCHEDULE" => Some(DeliveryFailureReason::CustomerRequestedReschedule),
        _ => None,
    }
}

fn print_help(logger: &Logger) {
    logger.info("Commands:");
    logger.info("  board                 - refresh the order board");
    logger.info("  out <order_id>        - mark an order out for delivery");
    logger.info("  delivered <order_id>  - mark an order delivered");
    logger.info("  fail <order_id>       - open the delivery-failure dialog");
    logger.info("  reason <REASON>       - set the failure reason");
    logger.info("  note <free text>      - set the failure note");
    logger.info("  send                  - submit the recorded failure");
}

fn handle_command(
    line: &str,
    logger: &Logger,
    workflow: &Addr<Workflow>,
    recorder: &Addr<FailureRecorder>,
) {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match command {
        "" => {}
        "help" => print_help(logger),
        "board" => workflow.do_send(RefreshBoard),
        "out" | "delivered" => match rest.parse::<u64>() {
            Ok(order_id) => {
                let to = if command == "out" {
                    OrderStatus::OutForDelivery
                } else {
                    OrderStatus::Delivered
                };
                workflow.do_send(SubmitTransition {
                    order_id,
                    to,
                    reason: None,
                    note: None,
                });
            }
            Err(_) => logger.warn(format!("Usage: {} <order_id>", command)),
        },
        "fail" => match rest.parse::<u64>() {
            // El Workflow valida contra el tablero antes de abrir el diálogo
            Ok(order_id) => workflow.do_send(OpenRecorder { order_id }),
            Err(_) => logger.warn("Usage: fail <order_id>"),
        },
        "reason" => match parse_reason(rest) {
            Some(reason) => recorder.do_send(SetReason { reason }),
            None => logger.warn(
                "Valid reasons: NO_ANSWER, WRONG_ADDRESS, UNSAFE_LOCATION, \
                 CUSTOMER_REQUESTED_RESCHEDULE",
            ),
        },
        "note" => recorder.do_send(SetNote {
            note: rest.to_string(),
        }),
        "send" => recorder.do_send(SubmitFailure),
        other => logger.warn(format!("Unknown command: {} (try 'help')", other)),
    }
}

#[actix::main]
async fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Uso: {} <courier_id>", args[0]);
        std::process::exit(1);
    }
    let courier_id = args[1].clone();
    let logger = Logger::with_color(format!("Courier {}", &courier_id), Color::Cyan);

    let server_addr: SocketAddr = format!("{}:{}", ORDER_SERVICE_IP, ORDER_SERVICE_PORT)
        .parse()
        .expect("Dirección IP inválida");

    // Conexión al servicio de órdenes
    let Some(stream) = connect(server_addr).await else {
        logger.error("Failed to connect to the order service. Try again later.");
        std::process::exit(1);
    };
    let (read_half, write_half) = split(stream);

    let writer = SocketWriter::new(write_half).start();
    let workflow = Workflow::new(courier_id.clone(), writer.recipient()).start();
    let _reader = SocketReader::new(read_half, workflow.clone()).start();
    let recorder = FailureRecorder::new(workflow.clone().recipient()).start();
    let ui = UIHandler::new(logger.clone()).start();

    workflow.do_send(AttachRecorder {
        open: recorder.clone().recipient(),
        outcomes: recorder.clone().recipient(),
    });
    workflow.do_send(AttachUi {
        board: ui.clone().recipient(),
        errors: ui.recipient(),
    });
    workflow.do_send(StartRunning);
    print_help(&logger);

    // Loop de comandos por stdin
    let input_logger = logger.clone();
    let workflow_for_input = workflow.clone();
    let recorder_for_input = recorder.clone();
    actix::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            handle_command(
                line.trim(),
                &input_logger,
                &workflow_for_input,
                &recorder_for_input,
            );
        }
    });

    ctrl_c().await?;
    logger.info("Ctrl-C received, shutting down...");
    Ok(())
}
