mod coap;

pub use coap::start_coap_server;
