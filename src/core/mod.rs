//! URL resolution, retrieval and runtime plumbing.

pub mod http;
pub mod logging;
pub mod retrieval;
pub mod selection;

pub use retrieval::{
    DEFAULT_API_BASE, RetrievalClient, RetrievalResult, SelectionJson, TOKEN_HEADER,
};
pub use selection::{SelectionReference, UrlShape, resolve};
