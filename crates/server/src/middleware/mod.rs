//! HTTP middleware stack for the tracker API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (permissive; the frontend is served from another origin)

pub mod auth;
pub mod request_id;

pub use auth::{OWNER_HEADER, RequireOwner};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
