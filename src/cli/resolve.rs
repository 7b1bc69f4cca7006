//! `docserve resolve`: show how the server would answer a URL.

use anyhow::{Context, Result, bail};
use serde_json::{Value as JsonValue, json};
use std::path::Path;

use crate::catalog::ConfigCatalog;
use crate::config::HostConfig;
use crate::logger::LogSink;
use crate::resolve::{DocRequest, NotFoundOutcome, NotFoundResolver};
use crate::store::FsStore;

/// What the server would send for a URL.
#[derive(Debug)]
enum Answer {
    /// The page exists and is served as-is.
    Page(std::path::PathBuf),
    Missing(NotFoundOutcome),
}

pub fn run_resolve(url: &str, json: bool, config: &HostConfig) -> Result<()> {
    let parsed = url::Url::parse(url).with_context(|| format!("invalid URL `{url}`"))?;
    let Some(request) = DocRequest::from_url(&parsed) else {
        bail!("URL `{url}` has no host");
    };

    let catalog = ConfigCatalog::from_config(config);
    let answer = answer(&catalog, config, &request);

    if json {
        let value = to_json(&answer, &config.storage.root);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", describe(&answer));
    }
    Ok(())
}

fn answer(catalog: &ConfigCatalog, config: &HostConfig, request: &DocRequest) -> Answer {
    if let Some(path) = super::serve::resolve_file(catalog, &config.storage, request) {
        return Answer::Page(path);
    }
    let store = FsStore;
    let sink = LogSink;
    let resolver = NotFoundResolver::new(catalog, &store, &config.storage, &sink);
    Answer::Missing(resolver.resolve(request))
}

fn describe(answer: &Answer) -> String {
    match answer {
        Answer::Page(path) => format!("200 {}", path.display()),
        Answer::Missing(NotFoundOutcome::Redirect(redirect)) => {
            format!("{} -> {}", redirect.status, redirect.location)
        }
        Answer::Missing(NotFoundOutcome::Custom(page)) => format!(
            "404 {} [project: {}] [version: {}]",
            page.resolved.full.display(),
            page.project,
            page.version.as_deref().unwrap_or("default")
        ),
        Answer::Missing(NotFoundOutcome::Default) => "404 platform default page".to_string(),
    }
}

fn to_json(answer: &Answer, root: &Path) -> JsonValue {
    let display = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();
    match answer {
        Answer::Page(path) => json!({
            "outcome": "page",
            "status": 200,
            "path": display(path),
        }),
        Answer::Missing(NotFoundOutcome::Redirect(redirect)) => json!({
            "outcome": "redirect",
            "status": redirect.status,
            "location": redirect.location,
        }),
        Answer::Missing(NotFoundOutcome::Custom(page)) => json!({
            "outcome": "custom",
            "status": 404,
            "project": page.project,
            "version": page.version,
            "path": display(&page.resolved.full),
            "content_type": page.content_type,
        }),
        Answer::Missing(NotFoundOutcome::Default) => json!({
            "outcome": "default",
            "status": 404,
        }),
    }
}
