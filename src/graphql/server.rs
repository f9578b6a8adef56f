//! HTTP transport for the schema.

use async_graphql::Value;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};

use super::UserbaseSchema;
use crate::config::{Environment, ServerSettings};
use crate::error::{Result, STORAGE_UNAVAILABLE};

pub const GRAPHQL_PATH: &str = "/graphql";

async fn graphql_handler(State(schema): State<UserbaseSchema>, req: GraphQLRequest) -> Response {
    let response = schema.execute(req.into_inner()).await;
    let status = if storage_unavailable(&response) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, GraphQLResponse::from(response)).into_response()
}

fn storage_unavailable(response: &async_graphql::Response) -> bool {
    let unavailable = Value::from(STORAGE_UNAVAILABLE);
    response.errors.iter().any(|err| {
        err.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .is_some_and(|code| *code == unavailable)
    })
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn graphdoc(State(schema): State<UserbaseSchema>) -> String {
    schema.sdl()
}

/// Routes: `POST /graphql`, plus `/graphiql` and `/graphdoc` in development.
pub fn router(schema: UserbaseSchema, environment: Environment) -> Router {
    let mut router: Router<UserbaseSchema> =
        Router::new().route(GRAPHQL_PATH, post(graphql_handler));

    if environment.is_development() {
        router = router
            .route("/graphiql", get(graphiql))
            .route("/graphdoc", get(graphdoc));
    }

    router.with_state(schema)
}

pub async fn run_server(schema: UserbaseSchema, settings: &ServerSettings) -> Result<()> {
    let app = router(schema, settings.environment);
    let addr = settings.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(environment = %settings.environment, "GraphQL endpoint: http://{}{}", addr, GRAPHQL_PATH);
    if settings.environment.is_development() {
        tracing::info!("GraphiQL: http://{}/graphiql", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
