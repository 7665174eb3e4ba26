pub mod append;
pub mod config;
pub mod get;
pub mod init;
pub mod load_all;
pub mod ping;
pub mod probe;
pub mod replace;
pub mod secrets;
pub mod tables;

use crate::backend;
use crate::config::Config;
use crate::core::Repository;
use crate::errors::AppResult;

/// One CLI invocation is one session: a fresh repository and cache.
pub(crate) fn open_session(cfg: &Config) -> AppResult<Repository> {
    let backend = backend::connect(cfg, false)?;
    Ok(Repository::new(backend))
}
