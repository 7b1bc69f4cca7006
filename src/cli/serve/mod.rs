//! Documentation host: serves built pages, answers misses through the
//! missing-page resolver.

mod lifecycle;
mod path;
mod request;
mod response;

pub use path::resolve_file;

use crate::{
    catalog::ConfigCatalog,
    config::HostConfig,
    log,
    logger::LogSink,
    resolve::NotFoundResolver,
    store::FsStore,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Everything a request handler reads, shared across worker threads.
pub struct ServeState {
    pub config: Arc<HostConfig>,
    pub catalog: ConfigCatalog,
    pub store: FsStore,
}

impl ServeState {
    pub fn new(config: Arc<HostConfig>) -> Self {
        let catalog = ConfigCatalog::from_config(&config);
        Self {
            config,
            catalog,
            store: FsStore,
        }
    }
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &HostConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    crate::core::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    Ok(BoundServer { server })
}

impl BoundServer {
    /// Start the request loop (blocking).
    pub fn run(self, state: ServeState) -> Result<()> {
        let threads = state.config.serve.threads;
        if state.catalog.is_empty() {
            log!("warning"; "no projects configured, every request gets the default 404 page");
        } else {
            log!("serve"; "{} projects, {} worker threads", state.catalog.len(), threads);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("failed to create thread pool")?;

        let state = Arc::new(state);
        for request in self.server.incoming_requests() {
            let state = Arc::clone(&state);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &state) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, state: &ServeState) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !response::is_supported_method(request.method()) {
        return response::respond_method_not_allowed(request);
    }

    let config = &state.config;
    let doc = request::doc_request(&request, &config.domain);

    if let Some(path) = path::resolve_file(&state.catalog, &config.storage, &doc) {
        return response::respond_file(request, &path);
    }

    let sink = LogSink;
    let outcome =
        NotFoundResolver::new(&state.catalog, &state.store, &config.storage, &sink).resolve(&doc);
    response::respond_not_found(request, outcome, &doc)
}
