//! Type definitions for the Swarm API.

pub mod models;
pub mod requests;
pub mod responses;
mod serde_helpers;

pub use models::{PartNumber, PartResults};
pub use requests::{PartInformationRequest, PartRequest, SearchPartRequest};
pub use responses::{ApiResponse, SearchPartResponse, ServiceResult, ThrottleResponse};
