pub const ORDER_SERVICE_IP: &str = "127.0.0.1";
pub const ORDER_SERVICE_PORT: u16 = 8090;
pub const TIMEOUT_SECONDS: u64 = 2;
