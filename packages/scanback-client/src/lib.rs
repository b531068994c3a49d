pub mod api;
pub mod controller;
pub mod params;
pub mod render;
pub mod session;

mod error;

pub use api::{HttpRecordApi, RecordApi};
pub use controller::{ErrorKind, View};
pub use error::{Error, Operation, Result};
pub use session::Session;
