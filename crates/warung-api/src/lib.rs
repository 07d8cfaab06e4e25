//! # warung-api
//!
//! HTTP API layer for warung-site-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The bound page and site document as JSON
//! - Per-visitor cart sessions driving the checkout lifecycle
//! - Operator mutators that rebind only the affected sections
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/site` | Site document |
//! | GET | `/api/v1/site/regions` | Bound page regions |
//! | GET | `/api/v1/site/findings` | Validation findings |
//! | POST | `/api/v1/sessions` | Start a cart session |
//! | GET | `/api/v1/sessions/{id}` | Session view |
//! | POST | `/api/v1/sessions/{id}/items` | Add item |
//! | PUT | `/api/v1/sessions/{id}/items/{label}` | Set quantity |
//! | DELETE | `/api/v1/sessions/{id}/items/{label}` | Remove item |
//! | POST/DELETE | `/api/v1/sessions/{id}/review` | Open or close checkout view |
//! | POST | `/api/v1/sessions/{id}/checkout` | Compose order message |
//! | POST | `/api/v1/sessions/{id}/handoff` | Confirm or cancel handoff |
//! | POST | `/api/v1/inquiry` | Contact form message |
//! | POST | `/api/v1/direct-order` | Single item message |
//! | PUT | `/admin/{name,colors,handle,contact}` | Document mutators |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, SessionStore, SiteState};
