pub mod graph;
pub mod history;
pub mod prompt;
pub mod retriever;
pub mod state;

mod error;

pub use error::Error;
pub use graph::{AgentGraph, CompiledAgent};
pub use retriever::{
	EventSearchRetriever, RetrieveOptions, Retriever, RetrieverInput, ScopeFilter,
	ScopedRetriever,
};
pub use state::{InvocationState, RequestSnapshot};

pub type Result<T, E = Error> = std::result::Result<T, E>;
