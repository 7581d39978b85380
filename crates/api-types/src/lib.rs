//! API types shared between the deskdrop server and its clients.
//!
//! This crate contains:
//! - Row types (e.g., `Workspace`, `Report`) - the API representation of database entities
//! - Request types (e.g., `CreateWorkspaceRequest`, `SubmitReportRequest`) - API input types
//! - Shared enums (e.g., `VenueType`, `Level`)

pub mod favorite;
pub mod report;
pub mod user;
pub mod workspace;

pub use favorite::*;
pub use report::*;
pub use user::*;
pub use workspace::*;
