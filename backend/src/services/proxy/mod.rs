//! # API Forwarding Service
//!
//! Relays every request under the configured API mount (by default `/api`) to the
//! upstream REST backend, so the browser only ever talks to this host.
//!
//! ## Sub-modules:
//! - `forward`: the handler and the upstream client it uses.

mod forward;

use actix_web::web::{route, scope};
use actix_web::Scope;

pub use forward::Upstream;

/// Mounts the forwarder at `mount` (e.g. `/api`). Everything below it, including the
/// trailing slash the backend expects, is passed on unchanged.
pub fn configure_routes(mount: &str) -> Scope {
    scope(mount).route("/{tail:.*}", route().to(forward::process))
}
