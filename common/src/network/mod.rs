pub mod connections;
pub mod socket_reader;
pub mod socket_writer;
