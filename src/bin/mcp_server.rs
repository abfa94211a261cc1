//! Pokemon Gacha MCP Server
//!
//! A Model Context Protocol server over stdio (rmcp) that exposes the gacha
//! machines, collection and drop-rate statistics for LLM interaction.
//! Logs go to stderr; stdout carries the protocol.

use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard};

use pokemon_gacha::mcp_interface::*;
use pokemon_gacha::{GachaSession, GameConfig, GameData, PullRng, SaveManager};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};

/// Everything a tool call may touch, behind one lock.
#[derive(Debug)]
struct GachaState {
    session: GachaSession,
    rng: PullRng,
    saves: SaveManager,
    gold_cheat_amount: u64,
}

impl GachaState {
    /// Writes the save file. The write blocks, so the worker thread hands its
    /// other tasks off first; the state lock stays held so saves never interleave.
    fn persist(&self) {
        let saved = tokio::task::block_in_place(|| self.saves.save(self.session.profile()));
        if let Err(e) = saved {
            log::warn!("Could not write save file: {}", e);
        }
    }
}

#[derive(Debug, Clone)]
pub struct PokemonGachaService {
    tool_router: ToolRouter<PokemonGachaService>,
    state: Arc<Mutex<GachaState>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PullRequest {
    #[schemars(description = "Machine to pull from: 'red', 'blue', 'yellow', or 'items'")]
    pub machine: String,
    #[schemars(description = "Number of pulls: 1 or 10")]
    pub count: u8,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CollectionRequest {
    #[schemars(description = "Show the item bag instead of the Pokedex")]
    #[serde(default)]
    pub items: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StatisticsRequest {
    #[schemars(description = "Machine to analyse: 'red', 'blue', 'yellow', or 'items'")]
    pub machine: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupPokemonRequest {
    #[schemars(description = "Pokemon name or Pokedex number")]
    pub pokemon: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupItemRequest {
    #[schemars(description = "Item name or number")]
    pub item: String,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

#[tool_router]
impl PokemonGachaService {
    fn new(state: GachaState) -> Self {
        Self {
            tool_router: Self::tool_router(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, GachaState>, McpError> {
        self.state
            .lock()
            .map_err(|_| internal_error("Gacha state lock poisoned".to_string()))
    }

    #[tool(description = "List the gacha machines with prices and drop rates")]
    async fn list_machines(&self) -> Result<CallToolResult, McpError> {
        let state = self.lock()?;
        let text = display_machines(&state.session);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Buy 1 or 10 pulls from a machine")]
    async fn pull(
        &self,
        Parameters(request): Parameters<PullRequest>,
    ) -> Result<CallToolResult, McpError> {
        let context = parse_context(&request.machine).map_err(internal_error)?;
        let kind = parse_pull_kind(request.count).map_err(internal_error)?;

        let mut guard = self.lock()?;
        let state = &mut *guard;
        let text = match execute_pull(&mut state.session, context, kind, &mut state.rng) {
            Ok(result) => {
                state.persist();
                result
            }
            Err(e) => format!("Error: {}", e),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Show the Pokedex or item bag with completion")]
    async fn collection(
        &self,
        Parameters(request): Parameters<CollectionRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut state = self.lock()?;
        let text = display_collection(&mut state.session, request.items);
        state.persist();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Drop-rate statistics and expected pulls for a machine")]
    async fn statistics(
        &self,
        Parameters(request): Parameters<StatisticsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let context = parse_context(&request.machine).map_err(internal_error)?;
        let state = self.lock()?;
        let text = match display_statistics(&state.session, context) {
            Ok(result) => result,
            Err(e) => format!("Error: {}", e),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up a Pokemon's rarity and drop rates")]
    async fn lookup_pokemon(
        &self,
        Parameters(request): Parameters<LookupPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = self.lock()?;
        let text = handle_lookup_pokemon_command(&state.session, &request.pokemon);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up an item's rarity, value and drop rate")]
    async fn lookup_item(
        &self,
        Parameters(request): Parameters<LookupItemRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = self.lock()?;
        let text = handle_lookup_item_command(&state.session, &request.item);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Add the configured amount of Pokedollars")]
    async fn add_gold(&self) -> Result<CallToolResult, McpError> {
        let mut state = self.lock()?;
        let amount = state.gold_cheat_amount;
        let text = execute_add_gold(&mut state.session, amount);
        state.persist();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Clear all Pokemon, items and pull history, keeping gold")]
    async fn reset_collection(&self) -> Result<CallToolResult, McpError> {
        let mut state = self.lock()?;
        let text = execute_reset_collection(&mut state.session);
        state.persist();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for PokemonGachaService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    log::info!("Pokemon Gacha MCP Server starting...");

    let config = GameConfig::from_env()?;
    let data = GameData::load(&config.data_dir)?;
    let saves = SaveManager::new(config.save_path.clone());
    let profile = saves.load(config.starting_gold);
    let session = GachaSession::new(data, profile)?;

    let service = PokemonGachaService::new(GachaState {
        session,
        rng: PullRng::new_random(),
        saves,
        gold_cheat_amount: config.gold_cheat_amount,
    });
    let transport = (stdin(), stdout());

    log::info!("Starting MCP server with transport...");
    let server = service.serve(transport).await?;

    let quit_reason = server.waiting().await?;
    log::info!("Pokemon Gacha MCP Server exiting: {:?}", quit_reason);
    Ok(())
}
