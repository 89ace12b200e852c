// souschef - routes user requests to specialized conversational agents and
// normalizes their free-form output into typed responses

pub mod agents;
pub mod api;
pub mod engine;
pub mod http;
