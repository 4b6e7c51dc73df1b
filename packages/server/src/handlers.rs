//! HTTP handler functions for the toolbox API.

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, QueryPayloadError},
    web,
};
use sakila_server_models::{ApiError, ApiHealth, EnumSearchParams};
use sakila_toolbox::{
    ToolboxError,
    enums::{DEFAULT_ENUM_SEARCH_LIMIT, lookup_enum},
};
use sakila_toolbox_models::{NAMESPACE, TOOLBOX_TITLE, enum_definitions};

use crate::AppState;

/// Maps a toolbox failure onto a status code. Caller mistakes keep their
/// message; anything else is logged and reported generically.
fn error_response(e: &ToolboxError, context: &str) -> HttpResponse {
    match e {
        ToolboxError::UnknownTool { .. } | ToolboxError::UnknownEnum { .. } => {
            HttpResponse::NotFound().json(ApiError::new(e.to_string()))
        }
        e if e.is_argument_error() => HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
        e => {
            log::error!("Failed to {context}: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(format!("Failed to {context}")))
        }
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        namespace: NAMESPACE.to_string(),
        title: TOOLBOX_TITLE.to_string(),
    })
}

/// Rejects malformed query strings with an [`ApiError`] body.
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");
    InternalError::from_response(err, HttpResponse::BadRequest().json(ApiError::new(message)))
        .into()
}

/// `GET /api/tools`
pub async fn tools(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.registry.definitions())
}

/// `POST /api/tools/{name}`
///
/// Runs a tool with the JSON object in the body. An empty body means no
/// arguments.
pub async fn call_tool(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let name = path.into_inner();

    let input = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(input) => input,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(ApiError::new(format!("Invalid JSON body: {e}")));
            }
        }
    };

    match state.registry.call(&state.toolbox, &name, &input).await {
        Ok(chart) => HttpResponse::Ok().json(chart),
        Err(e) => error_response(&e, &format!("run tool {name}")),
    }
}

/// `GET /api/enums`
pub async fn enums() -> HttpResponse {
    HttpResponse::Ok().json(enum_definitions())
}

/// `GET /api/enums/{name}/search`
///
/// Lists members whose label contains `query`, capped at `limit`.
pub async fn enum_search(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<EnumSearchParams>,
) -> HttpResponse {
    let name = path.into_inner();
    let source = match lookup_enum(&name) {
        Ok(source) => source,
        Err(e) => return error_response(&e, "search enum"),
    };

    let limit = params.limit.unwrap_or(DEFAULT_ENUM_SEARCH_LIMIT);

    match source.search(&state.toolbox, &params.query, limit).await {
        Ok(candidates) => HttpResponse::Ok().json(candidates),
        Err(e) => error_response(&e, &format!("search enum {name}")),
    }
}

/// `GET /api/enums/{name}/best-match`
///
/// Returns the first member matching `query`, or `null`.
pub async fn enum_best_match(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<EnumSearchParams>,
) -> HttpResponse {
    let name = path.into_inner();
    let source = match lookup_enum(&name) {
        Ok(source) => source,
        Err(e) => return error_response(&e, "search enum"),
    };

    match source.find_best_match(&state.toolbox, &params.query).await {
        Ok(candidate) => HttpResponse::Ok().json(candidate),
        Err(e) => error_response(&e, &format!("match enum {name}")),
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use actix_web::{App, http::StatusCode, test};
    use sakila_database::{QueryError, QueryExecutor};
    use sakila_query_models::{QueryArgs, QueryRow, QueryValue};
    use sakila_toolbox::state::State;
    use serde_json::{Value, json};

    use super::*;
    use crate::configure;

    #[derive(Default)]
    struct CannedExecutor {
        rows: BTreeMap<&'static str, Vec<QueryRow>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl QueryExecutor for CannedExecutor {
        async fn run_query(
            &self,
            query_name: &str,
            _args: &QueryArgs,
        ) -> Result<Vec<QueryRow>, QueryError> {
            if self.fail {
                return Err(QueryError::Execution {
                    message: "server closed the connection".to_string(),
                });
            }
            Ok(self.rows.get(query_name).cloned().unwrap_or_default())
        }
    }

    fn stores() -> Vec<QueryRow> {
        [(1, "Store 1 - Lethbridge"), (2, "Store 2 - Woodridge")]
            .into_iter()
            .map(|(key, label)| {
                [("key", QueryValue::Int(key)), ("label", label.into())]
                    .into_iter()
                    .collect()
            })
            .collect()
    }

    fn app_state(executor: CannedExecutor) -> web::Data<AppState> {
        web::Data::new(AppState::new(State::new(Arc::new(executor))))
    }

    macro_rules! init_app {
        ($executor:expr) => {
            test::init_service(
                App::new()
                    .app_data(app_state($executor))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = init_app!(CannedExecutor::default());

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;

        assert!(health.healthy);
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health.namespace, "gd-sakila");
        assert_eq!(health.title, "Sakila Explorer");
    }

    #[actix_web::test]
    async fn lists_tools_and_enums() {
        let app = init_app!(CannedExecutor::default());

        let req = test::TestRequest::get().uri("/api/tools").to_request();
        let tools: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "actor_with_most_films");

        let req = test::TestRequest::get().uri("/api/enums").to_request();
        let enums: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(enums.len(), 3);
    }

    #[actix_web::test]
    async fn calls_a_tool_with_defaults() {
        let mut executor = CannedExecutor::default();
        executor.rows.insert(
            "film_length_distribution_by_category",
            vec![
                [
                    ("category_name", QueryValue::from("Sports")),
                    ("avg_length_minutes", QueryValue::Real(128.2)),
                ]
                .into_iter()
                .collect(),
            ],
        );
        let app = init_app!(executor);

        let req = test::TestRequest::post()
            .uri("/api/tools/film_length_distribution_by_category")
            .to_request();
        let chart: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(chart["info"]["chartType"], "hbar");
        assert_eq!(chart["data"]["rows"], json!([["Sports", 128.2]]));
    }

    #[actix_web::test]
    async fn maps_errors_to_status_codes() {
        let app = init_app!(CannedExecutor::default());

        let req = test::TestRequest::post()
            .uri("/api/tools/drop_everything")
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/tools/monthly_rental_revenue")
            .set_json(json!({ "start_date": "not a date" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/enums/yes_no/search")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_query_string_gets_a_json_error() {
        let app = init_app!(CannedExecutor::default());

        let req = test::TestRequest::get()
            .uri("/api/enums/store/search?limit=-1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ApiError = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Invalid query parameters"));
    }

    #[actix_web::test]
    async fn query_failure_is_a_server_error() {
        let app = init_app!(CannedExecutor {
            fail: true,
            ..CannedExecutor::default()
        });

        let req = test::TestRequest::post()
            .uri("/api/tools/film_category_distribution")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Failed to run tool film_category_distribution");
    }

    #[actix_web::test]
    async fn searches_and_matches_enum_members() {
        let mut executor = CannedExecutor::default();
        executor.rows.insert("store_enum", stores());
        let app = init_app!(executor);

        let req = test::TestRequest::get()
            .uri("/api/enums/store/search?query=store&limit=1")
            .to_request();
        let found: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found, vec![json!({ "key": 1, "label": "Store 1 - Lethbridge" })]);

        let req = test::TestRequest::get()
            .uri("/api/enums/store/best-match?query=ridge")
            .to_request();
        let best: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(best["key"], 1);
    }
}
