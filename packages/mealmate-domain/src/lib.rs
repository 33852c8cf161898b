pub mod document;
pub mod event;

mod error;

pub use document::{DocumentMetadata, EventDocument, project};
pub use error::Error;
pub use event::{Coordinates, Event};

pub type Result<T, E = Error> = std::result::Result<T, E>;
