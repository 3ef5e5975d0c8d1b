//! HTTP server rendering pages on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{FromRequest, Query, State},
    http::{header, Method, Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::helpers::url_for;
use crate::pages::{EnquiryForm, EnquiryKind, PageQuery, PageStatus, Rendered, SiteRenderer};
use crate::routes::{self, Page};
use crate::templates::STYLESHEET;
use crate::{store, Site};

type SharedSite = Arc<SiteRenderer>;

/// Errors a page request can end in
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A template failed to render
    #[error("failed to render page: {0}")]
    Render(#[from] anyhow::Error),

    /// The path exists but not for this method
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Render(e) => {
                tracing::error!(error = %e, "Page render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            AppError::MethodNotAllowed(method) => {
                tracing::debug!(%method, "Method not allowed");
                StatusCode::METHOD_NOT_ALLOWED.into_response()
            }
        }
    }
}

/// Build the application router.
///
/// Pages are resolved through the route table; anything the table does not
/// know redirects to the site root.
pub fn router(site: SharedSite, static_dir: &std::path::Path) -> Router {
    let home = url_for(site.config(), "/");
    let root = site.config().root.trim_end_matches('/').to_string();

    let app = Router::new()
        .route("/assets/site.css", get(stylesheet))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(dispatch)
        .with_state(site);

    let app = if root.is_empty() {
        app
    } else {
        Router::new()
            .nest(&root, app)
            .fallback(move || async move { Redirect::to(&home) })
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let store = store::open(site);
    let renderer = Arc::new(SiteRenderer::new(site.config.clone(), store)?);
    let app = router(renderer, &site.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!(
        "http://{}:{}{}",
        ip,
        port,
        url_for(&site.config, "/")
    );
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLESHEET,
    )
}

/// Fallback handler serving every page of the route table
async fn dispatch(
    State(site): State<SharedSite>,
    request: Request<Body>,
) -> Result<Response, AppError> {
    let uri = request.uri().clone();
    let method = request.method().clone();

    let Some((page, id)) = routes::resolve(uri.path()) else {
        tracing::debug!(path = uri.path(), "Unknown path, redirecting to root");
        return Ok(Redirect::to(&url_for(site.config(), "/")).into_response());
    };

    // Reads still in flight when the client goes away are cancelled
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let rendered = if method == Method::POST {
        let kind = match page {
            Page::Contact => EnquiryKind::Contact,
            Page::Admissions => EnquiryKind::Admissions,
            _ => return Err(AppError::MethodNotAllowed(method)),
        };
        let form = match Form::<EnquiryForm>::from_request(request, &()).await {
            Ok(Form(form)) => form,
            Err(rejection) => return Ok(rejection.into_response()),
        };
        site.render_enquiry(kind, &form)?
    } else if method == Method::GET || method == Method::HEAD {
        match id {
            Some(id) => site.render_course(&id, &cancel).await?,
            None => {
                let query = Query::<PageQuery>::try_from_uri(&uri)
                    .map(|Query(query)| query)
                    .unwrap_or_default();
                site.render(page, &query, &cancel).await?
            }
        }
    } else {
        return Err(AppError::MethodNotAllowed(method));
    };

    Ok(page_response(rendered))
}

fn page_response(rendered: Rendered) -> Response {
    let status = match rendered.status {
        PageStatus::Ok => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
        PageStatus::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Html(rendered.html)).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
