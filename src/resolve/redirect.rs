//! Redirect Resolver: configured redirects with self-redirect suppression.

use super::{Classified, DocPath, DocRequest, ResolveError, resolve_path};
use crate::catalog::Catalog;
use crate::core::url::{is_absolute, split_query};
use crate::logger::Diagnostics;
use crate::model::{Project, REST, RedirectKind, RedirectRule};

/// An HTTP redirect to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Absolute target URL for the `Location` header.
    pub location: String,
    /// 301 or 302, as configured on the rule.
    pub status: u16,
}

/// Result of looking for a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Redirect(Redirect),
    /// A rule matched but points back at the request URL itself.
    Suppressed { url: String },
    NoMatch,
}

impl RedirectOutcome {
    pub fn into_redirect(self) -> Option<Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            Self::Suppressed { .. } | Self::NoMatch => None,
        }
    }
}

/// Find the redirect for a classified request.
///
/// A rule whose absolute target equals the absolute request URL is not
/// followed: a warning goes to `sink` and the outcome is `Suppressed`.
pub fn try_redirect(
    catalog: &dyn Catalog,
    request: &DocRequest,
    classified: &Classified,
    sink: &dyn Diagnostics,
) -> RedirectOutcome {
    let (path, _) = split_query(&classified.remaining);
    let Some(rule) = catalog.redirect(&classified.project, path) else {
        return RedirectOutcome::NoMatch;
    };

    let virtual_host = classified.routing.is_virtual_host();
    let target = rule_target(&rule, &classified.project, path, &classified.doc, virtual_host);
    let location = request.absolute_for(&target);

    if location == request.absolute_url() {
        sink.warn("redirect", &ResolveError::RedirectLoop(location.clone()).to_string());
        return RedirectOutcome::Suppressed { url: location };
    }

    sink.debug(
        "redirect",
        &format!("{} -> {} ({})", request.absolute_url(), location, rule.status),
    );
    RedirectOutcome::Redirect(Redirect {
        location,
        status: rule.status,
    })
}

/// Target (absolute URL or host-relative path) of a matching rule.
fn rule_target(
    rule: &RedirectRule,
    project: &Project,
    path: &str,
    doc: &DocPath,
    virtual_host: bool,
) -> String {
    match rule.kind {
        RedirectKind::Exact => {
            let target = match rule.from.strip_suffix(REST) {
                Some(prefix) => format!("{}{}", rule.to, &path[prefix.len().min(path.len())..]),
                None => rule.to.clone(),
            };
            if virtual_host || is_absolute(&target) {
                target
            } else {
                format!("/docs/{}/{}", project.slug, target.trim_start_matches('/'))
            }
        }
        RedirectKind::Prefix => {
            let remainder = &path[rule.from.len().min(path.len())..];
            resolve_path(project, None, None, remainder, virtual_host)
        }
        RedirectKind::Page => resolve_path(
            project,
            doc.version.as_deref(),
            doc.language.as_deref(),
            &rule.to,
            virtual_host,
        ),
    }
}
