//! Configuration section definitions.
//!
//! Each module corresponds to a section in `docserve.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `domain`   | `[domain]`     | Host routing (subdomains, platform)  |
//! | `serve`    | `[serve]`      | HTTP server                          |
//! | `storage`  | `[storage]`    | Public/private content trees         |
//!
//! Projects live in the top-level `[[projects]]` array.

mod domain;
mod serve;
mod storage;

pub use domain::DomainConfig;
pub use serve::ServeConfig;
pub use storage::StorageConfig;
