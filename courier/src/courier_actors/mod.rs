pub mod failure_recorder;
pub mod ui_handler;
pub mod workflow;
