use axum::extract::FromRef;

use crate::auth::TokenSigner;
use crate::board_store::BoardStore;
use crate::gateway::MutationGateway;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedBoardStore = Arc<dyn BoardStore>;
pub type GuardedGateway = Arc<MutationGateway>;
pub type GuardedTokenSigner = Arc<TokenSigner>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub board_store: GuardedBoardStore,
    pub gateway: GuardedGateway,
    pub token_signer: GuardedTokenSigner,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedBoardStore {
    fn from_ref(input: &ServerState) -> Self {
        input.board_store.clone()
    }
}

impl FromRef<ServerState> for GuardedGateway {
    fn from_ref(input: &ServerState) -> Self {
        input.gateway.clone()
    }
}

impl FromRef<ServerState> for GuardedTokenSigner {
    fn from_ref(input: &ServerState) -> Self {
        input.token_signer.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
