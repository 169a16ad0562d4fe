pub mod courier_messages;
pub mod order_messages;
pub mod shared_messages;

// Reexport conjunto para `use common::messages::*`
pub use courier_messages::*;
pub use order_messages::*;
pub use shared_messages::*;
