//! Ordered route table and the handlers behind it.

use std::fs;
use std::path::PathBuf;

use crate::assets;
use crate::decode::url_decode_lossy;
use crate::http::{InboundRequest, RouteOutcome};
use crate::index::SearchEngine;
use crate::json;
use crate::suggest;

/// Maximum number of hits returned by `/api/search`.
pub const SEARCH_LIMIT: usize = 20;

/// Image extensions and their content types, in the order they are checked.
/// `.png` is last so that it only wins when nothing else matched.
const IMAGE_TYPES: &[(&str, &str)] = &[
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".webp", "image/webp"),
    (".png", "image/png"),
];

/// Handler selected for a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Html,
    Css,
    Script,
    Image,
    Search,
    Document,
    Status,
    Suggestions,
}

#[derive(Debug, Clone, Copy)]
enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
    /// Substring match against any image extension, anywhere in the path.
    ImageExtension,
}

impl Matcher {
    fn matches(self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => path == expected,
            Self::Prefix(prefix) => path.starts_with(prefix),
            Self::ImageExtension => IMAGE_TYPES.iter().any(|(ext, _)| path.contains(ext)),
        }
    }
}

/// Evaluated top to bottom; the first match wins.
const ROUTES: &[(Matcher, Route)] = &[
    (Matcher::Exact("/"), Route::Html),
    (Matcher::Exact("/index.html"), Route::Html),
    (Matcher::Exact("/style.css"), Route::Css),
    (Matcher::Exact("/script.js"), Route::Script),
    (Matcher::ImageExtension, Route::Image),
    (Matcher::Prefix("/api/search"), Route::Search),
    (Matcher::Prefix("/api/document"), Route::Document),
    (Matcher::Exact("/api/status"), Route::Status),
    (Matcher::Prefix("/api/suggestions"), Route::Suggestions),
];

/// Route lookup for a raw path token (query string included).
pub fn route(path: &str) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(matcher, _)| matcher.matches(path))
        .map(|&(_, route)| route)
}

/// Content type of an image path, by the first extension in check order.
pub fn image_content_type(path: &str) -> &'static str {
    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| path.contains(ext))
        .map(|&(_, content_type)| content_type)
        .unwrap_or("image/png")
}

/// Dispatches requests against the document collection and web assets.
pub struct Router {
    engine: SearchEngine,
    asset_roots: Vec<PathBuf>,
}

impl Router {
    pub fn new(engine: SearchEngine, asset_roots: Vec<PathBuf>) -> Self {
        Self {
            engine,
            asset_roots,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn dispatch(&self, request: &InboundRequest) -> RouteOutcome {
        let Some(route) = route(&request.path) else {
            return RouteOutcome::NotFound;
        };
        match route {
            Route::Html => self.static_asset("web/index.html", "text/html", false),
            Route::Css => self.static_asset("web/style.css", "text/css", false),
            Route::Script => self.static_asset("web/script.js", "application/javascript", false),
            Route::Image => {
                let relative = format!("web{}", request.path);
                self.static_asset(&relative, image_content_type(&request.path), true)
            }
            Route::Search => self.search(request),
            Route::Document => self.document(request),
            Route::Status => {
                RouteOutcome::Json(json::status_to_json(self.engine.document_count()).into_bytes())
            }
            Route::Suggestions => self.suggestions(request),
        }
    }

    fn static_asset(&self, relative: &str, content_type: &'static str, cors: bool) -> RouteOutcome {
        match assets::resolve_file(&self.asset_roots, relative) {
            Some(body) => RouteOutcome::StaticAsset {
                body,
                content_type,
                cors,
            },
            None => RouteOutcome::NotFound,
        }
    }

    fn search(&self, request: &InboundRequest) -> RouteOutcome {
        let query = decoded_param(request, "?q=");
        let results = self.engine.search(&query, SEARCH_LIMIT);
        RouteOutcome::Json(json::results_to_json(&results).into_bytes())
    }

    fn document(&self, request: &InboundRequest) -> RouteOutcome {
        let file_path = decoded_param(request, "?path=");
        match fs::read(&file_path) {
            Ok(content) if !content.is_empty() => RouteOutcome::Json(json::content_to_json(&content)),
            _ => RouteOutcome::NotFound,
        }
    }

    fn suggestions(&self, request: &InboundRequest) -> RouteOutcome {
        let query = decoded_param(request, "?q=");
        let suggestions = suggest::suggestions(&query, self.engine.documents());
        RouteOutcome::Json(json::suggestions_to_json(&suggestions).into_bytes())
    }
}

fn decoded_param(request: &InboundRequest, marker: &str) -> String {
    request
        .param(marker)
        .map(url_decode_lossy)
        .unwrap_or_default()
}
