//! Read-only records the resolvers work on.

mod project;
mod redirect;

pub use project::{LATEST, Privacy, Project, Version};
pub use redirect::{REST, RedirectKind, RedirectRule};
