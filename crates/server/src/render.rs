//! HTML rendering of the search page

use minijinja::Environment;
use reviewrag_vector::SearchHit;
use serde::Serialize;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Shown when the submitted question is blank
pub const BLANK_QUERY_MESSAGE: &str = "Please enter a question.";

/// Shown when nothing is within the distance threshold
pub const NO_RESULTS_MESSAGE: &str = "No relevant reviews found for this query.";

/// One result row
#[derive(Debug, Clone, Serialize)]
pub struct HitView {
    pub rank: usize,
    pub distance: String,
    pub text: String,
}

impl From<SearchHit> for HitView {
    fn from(hit: SearchHit) -> Self {
        Self {
            rank: hit.rank,
            distance: format!("{:.3}", hit.distance),
            text: hit.text,
        }
    }
}

/// Data for the search page
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexPage {
    pub query: String,
    pub results: Vec<HitView>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl IndexPage {
    pub fn with_results(query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        let message = hits.is_empty().then(|| NO_RESULTS_MESSAGE.to_string());
        Self {
            query: query.into(),
            results: hits.into_iter().map(HitView::from).collect(),
            message,
            error: None,
        }
    }

    pub fn blank_query() -> Self {
        Self {
            message: Some(BLANK_QUERY_MESSAGE.to_string()),
            ..Self::default()
        }
    }
}

/// Page templates, HTML-autoescaped
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, page: &IndexPage) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(page)
    }
}
