pub mod dtos;
pub mod failure_reason;
pub mod order_status;
pub mod transition;
