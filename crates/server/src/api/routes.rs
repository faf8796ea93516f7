use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, labels, meta, middleware, orders, passes, scan, supplies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health, config, credentials
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        .route("/token", put(handlers::set_token))
        // Packing pipeline
        .route("/scan", post(scan::run_scan))
        // Orders
        .route("/orders/new", get(orders::new_orders))
        .route("/orders", get(orders::list_orders))
        .route("/orders/{order_id}/meta", get(meta::get_meta))
        .route("/orders/{order_id}/meta/{kind}", put(meta::write_meta))
        // Supplies
        .route("/supplies", post(supplies::create_supply))
        .route("/supplies/{supply_id}/orders", get(supplies::supply_orders))
        .route(
            "/supplies/{supply_id}/orders/{order_id}",
            patch(supplies::add_order),
        )
        .route("/supplies/{supply_id}/deliver", patch(supplies::deliver))
        .route("/supplies/{supply_id}/qr", get(supplies::supply_qr))
        // Boxes
        .route("/supplies/{supply_id}/boxes", post(supplies::add_boxes))
        .route("/supplies/{supply_id}/boxes", get(supplies::list_boxes))
        .route("/supplies/{supply_id}/boxes", delete(supplies::delete_boxes))
        .route(
            "/supplies/{supply_id}/boxes/stickers",
            post(supplies::box_stickers),
        )
        // Labels
        .route("/labels", post(labels::order_stickers))
        .route("/labels/print", post(labels::print_stickers))
        // Passes
        .route("/passes", get(passes::list_passes))
        .route("/passes", post(passes::create_pass))
        .route("/passes/offices", get(passes::pass_offices))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
