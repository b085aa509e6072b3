/// Outbound services: HTTP transport, dispatch and provider wiring
pub mod dispatcher;
pub mod mapper;
pub mod provider;
pub mod template;
pub mod transport;
