//! Application services for the client registry.

mod registry;

pub use registry::{ClientAction, ClientService, ClientServiceError, ClientServiceResult};
