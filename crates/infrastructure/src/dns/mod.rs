pub mod forwarding;

mod upstream_resolver;

pub use upstream_resolver::UpstreamResolver;
