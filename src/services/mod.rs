//! Service implementations for the Swarm API.
//!
//! A call flows codec → transport → pipeline: [`RequestCodec`] builds the
//! request, the transport sends it, and [`pipeline`] turns whatever comes back
//! into an [`ApiResponse`](crate::types::ApiResponse).

mod codec;
pub mod pipeline;
mod parts;

pub use codec::{Endpoint, RequestCodec, JSON_CONTENT_TYPE};
pub use parts::PartsService;
