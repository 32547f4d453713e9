use actix_web::{get, post, web, HttpResponse, ResponseError};
use tracing::{error, info};

use crate::error::ApiError;
use crate::render::IndexPage;
use crate::state::AppState;
use crate::types::QueryForm;

fn render_page(
    state: &AppState,
    page: &IndexPage,
    status: actix_web::http::StatusCode,
) -> actix_web::Result<HttpResponse> {
    let html = state
        .templates
        .render_index(page)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Empty search form
#[get("/")]
pub async fn index(state: web::Data<AppState>) -> actix_web::Result<HttpResponse> {
    render_page(&state, &IndexPage::default(), actix_web::http::StatusCode::OK)
}

/// Search form submission
#[post("/")]
pub async fn submit(
    form: web::Form<QueryForm>,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let query = form.query.trim();

    if query.is_empty() {
        return render_page(&state, &IndexPage::blank_query(), actix_web::http::StatusCode::OK);
    }

    info!("Search form query: {}", query);

    match state.engine.search(query, &state.search_options).await {
        Ok(hits) => render_page(
            &state,
            &IndexPage::with_results(query, hits),
            actix_web::http::StatusCode::OK,
        ),
        Err(e) => {
            let err = ApiError(e);
            error!("Search failed: {}", err);
            let page = IndexPage {
                query: query.to_string(),
                error: Some("Search is temporarily unavailable. Please try again.".to_string()),
                ..IndexPage::default()
            };
            render_page(&state, &page, err.status_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use crate::render::{BLANK_QUERY_MESSAGE, NO_RESULTS_MESSAGE};
    use crate::test_support::ingested_state;

    fn body_text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_get_renders_form() {
        let app = test::init_service(
            App::new()
                .app_data(ingested_state().await)
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(&test::read_body(resp).await);
        assert!(html.contains("name=\"query\""));
    }

    #[actix_web::test]
    async fn test_blank_submission_shows_prompt() {
        let app = test::init_service(
            App::new()
                .app_data(ingested_state().await)
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_form([("query", "   ")])
            .to_request();
        let html = body_text(&test::call_and_read_body(&app, req).await);

        assert!(html.contains(BLANK_QUERY_MESSAGE));
        assert!(!html.contains(NO_RESULTS_MESSAGE));
    }

    #[actix_web::test]
    async fn test_submission_renders_escaped_results() {
        let app = test::init_service(
            App::new()
                .app_data(ingested_state().await)
                .configure(crate::configure),
        )
        .await;

        // A query identical to a document embeds to the same vector: distance 0
        let req = test::TestRequest::post()
            .uri("/")
            .set_form([("query", "<i>excellent</i> value")])
            .to_request();
        let html = body_text(&test::call_and_read_body(&app, req).await);

        assert!(html.contains("Rank 1 | Distance: 0.000"));
        assert!(html.contains("&lt;i&gt;excellent"));
        assert!(!html.contains("<i>excellent"));
        assert!(!html.contains(BLANK_QUERY_MESSAGE));
    }
}
