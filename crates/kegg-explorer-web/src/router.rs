//! Router construction for the proxy server.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/search", get(handlers::search::search))
        // Gene -> pathways
        .route(
            "/api/kegg/pathways_for_gene/:gen_id",
            get(handlers::gene_pathways::pathways_for_gene),
        )
        .route(
            "/api/kegg/pathways_for_gene",
            get(handlers::gene_pathways::missing_gene_id),
        )
        .route(
            "/api/kegg/pathways_for_gene/",
            get(handlers::gene_pathways::missing_gene_id),
        )
        // Pathway -> graph
        .route(
            "/api/kegg/pathway_graph/:pathway_id",
            get(handlers::pathway_graph::pathway_graph),
        )
        .route(
            "/api/kegg/pathway_graph",
            get(handlers::pathway_graph::missing_pathway_id),
        )
        .route(
            "/api/kegg/pathway_graph/",
            get(handlers::pathway_graph::missing_pathway_id),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
