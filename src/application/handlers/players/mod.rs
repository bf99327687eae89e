//! Player CRUD handlers.

mod list_players;
mod save_player;

pub use list_players::{GetPlayerHandler, GetPlayerQuery, ListPlayersHandler};
pub use save_player::{
    CreatePlayerCommand, CreatePlayerHandler, DeletePlayerCommand, DeletePlayerHandler,
    UpdatePlayerCommand, UpdatePlayerHandler,
};
