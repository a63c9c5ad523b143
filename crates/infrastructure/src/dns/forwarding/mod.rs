mod answer_parser;
mod forwarder;
mod query_builder;

pub use answer_parser::{AnswerParser, AnswerSection};
pub use forwarder::DnsForwarder;
pub use query_builder::QueryBuilder;
