use crate::api::models::QueryRequest;
use crate::carousel::{CarouselController, Direction};
use crate::client::{QueryClient, payload_from_response};
use crate::data_models::ResultPayload;
use crate::error::SearchError;
use crate::layout::render_results;
use crate::view::{Element, Node, render_html};

pub const LOADING: &str = "Loading...";

/// The two mount points a search writes to: the results container and the
/// error line. Carousel state lives here too since it belongs to whatever is
/// currently in the results container.
#[derive(Debug, Default)]
pub struct RenderContext {
    results: Vec<Node>,
    error: String,
    carousels: CarouselController,
}

impl RenderContext {
    pub fn new() -> RenderContext {
        RenderContext::default()
    }

    pub fn results(&self) -> &[Node] {
        &self.results
    }

    pub fn results_html(&self) -> String {
        render_html(&self.results)
    }

    pub fn error_message(&self) -> &str {
        &self.error
    }

    pub fn carousels(&self) -> &CarouselController {
        &self.carousels
    }

    fn replace_results(&mut self, nodes: Vec<Node>) {
        self.results = nodes;
        self.carousels = CarouselController::attach(&mut self.results);
    }

    pub fn show_loading(&mut self) {
        self.replace_results(vec![Element::new("p").text(LOADING).into()]);
        self.error.clear();
    }

    pub fn show_error(&mut self, err: &SearchError) {
        self.error = err.user_message();
    }

    pub fn clear_results(&mut self) {
        self.replace_results(Vec::new());
    }

    /// Rebuilds the results container from scratch.
    pub fn display_results(&mut self, payload: &ResultPayload) {
        self.replace_results(render_results(payload));
    }

    pub fn navigate(&mut self, carousel_id: &str, direction: Direction) -> Option<usize> {
        self.carousels
            .navigate(&mut self.results, carousel_id, direction)
    }
}

/// Handles user actions against an injected client and render context.
pub struct SearchController<C> {
    client: C,
    ctx: RenderContext,
}

impl<C: QueryClient> SearchController<C> {
    pub fn new(client: C) -> SearchController<C> {
        SearchController::with_context(client, RenderContext::new())
    }

    pub fn with_context(client: C, ctx: RenderContext) -> SearchController<C> {
        SearchController { client, ctx }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit button handler.
    ///
    /// Whatever happens, the outcome is already rendered when this returns;
    /// the result is handed back for callers that want it.
    pub async fn on_submit(&mut self, raw_query: &str) -> Result<(), SearchError> {
        let request = self.begin_submit(raw_query)?;
        let response = self.client.send(&request).await;
        self.finish_submit(response.and_then(payload_from_response))
    }

    /// Validates the query and puts the context in its loading state.
    /// An empty query only sets the error line and leaves results untouched.
    pub fn begin_submit(&mut self, raw_query: &str) -> Result<QueryRequest, SearchError> {
        match QueryRequest::new(raw_query) {
            Ok(request) => {
                tracing::info!("Submitting query: {}", request.query);
                self.ctx.show_loading();
                Ok(request)
            }
            Err(e) => {
                self.ctx.show_error(&e);
                Err(e)
            }
        }
    }

    /// Applies the outcome of a request. Overlapping requests are not
    /// tracked; the last one to finish owns the display.
    pub fn finish_submit(&mut self, outcome: Result<ResultPayload, SearchError>) -> Result<(), SearchError> {
        match outcome {
            Ok(payload) => {
                self.ctx.display_results(&payload);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Search failed: {e}");
                self.ctx.show_error(&e);
                self.ctx.clear_results();
                Err(e)
            }
        }
    }

    /// Carousel prev/next handler. `None` if no such carousel is on screen.
    pub fn on_carousel_nav(&mut self, carousel_id: &str, direction: Direction) -> Option<usize> {
        self.ctx.navigate(carousel_id, direction)
    }
}
