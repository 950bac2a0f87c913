// Ice Planner - Web Server
// JSON API over the cost plan, seeded per-request from query parameters

use axum::{
    extract::RawQuery,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use ice_planner::{CostPlan, SeedParams};

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Plan response: raw inputs and derived values plus the formatted display
/// strings the rendering layer shows.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    #[serde(flatten)]
    plan: CostPlan,
    total_display: String,
    cost_per_player_display: String,
}

impl From<CostPlan> for PlanResponse {
    fn from(plan: CostPlan) -> Self {
        Self {
            total_display: plan.total_display(),
            cost_per_player_display: plan.cost_per_player_display(),
            plan,
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/plan?iceCost=..&hours=..&coachCost=..&jerseyCost=..&numPlayers=..
///
/// Stateless: each request derives a plan from the defaults plus the
/// recognized query overrides. Unknown keys and unparseable values are
/// ignored, never rejected.
async fn get_plan(RawQuery(query): RawQuery) -> impl IntoResponse {
    let params = SeedParams::from_query(query.as_deref().unwrap_or(""));

    let mut plan = CostPlan::new();
    params.apply_to(&mut plan);

    let response: PlanResponse = plan.into();
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🏒 Ice Planner - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/plan", get(get_plan));

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/plan?numPlayers=12");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
