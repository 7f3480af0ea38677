//! HTTP surface: router, handlers, shared state and error mapping.
//!
//! | Route                   | Handler                     |
//! |-------------------------|-----------------------------|
//! | `GET  /health`          | [`handlers::health`]        |
//! | `POST /generate-script` | [`handlers::script`]        |
//! | `POST /generate-voice`  | [`handlers::voice`]         |

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::{build_cors_layer, build_router};
pub use state::AppState;
