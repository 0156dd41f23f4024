use axum::extract::FromRef;

use crate::library::Library;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type SharedLibrary = Arc<Library>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub library: SharedLibrary,
    pub hash: String,
}

impl FromRef<ServerState> for SharedLibrary {
    fn from_ref(input: &ServerState) -> Self {
        input.library.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
