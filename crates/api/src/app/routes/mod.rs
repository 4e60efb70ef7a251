use axum::{
    routing::{get, post},
    Router,
};

use crate::middleware::{self, AuthState};

pub mod checkout;
pub mod packs;
pub mod system;

/// Router for everything under `/api`.
///
/// Mutating catalog routes sit behind the admin gate; reads and checkout are
/// public.
pub fn router(auth_state: AuthState) -> Router {
    let admin = Router::new()
        .route("/packs", post(packs::create_pack))
        .route("/packs/:id", axum::routing::put(packs::update_pack).delete(packs::delete_pack))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::admin_middleware,
        ));

    Router::new()
        .route("/packs", get(packs::list_packs))
        .route("/packs/featured", get(packs::get_featured_pack))
        .route("/packs/:id", get(packs::get_pack))
        .route("/checkout", post(checkout::checkout))
        .merge(admin)
}
