pub mod codec;

mod server;

pub use server::GatewayHandler;
