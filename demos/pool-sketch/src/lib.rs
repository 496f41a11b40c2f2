use wasm_bindgen::prelude::*;
use potshot_engine::*;

mod ball;
mod config;
mod cue;
mod game;
mod rack;
mod session;
mod table;

#[cfg(test)]
mod testing;

use game::PoolGame;

potshot_web::export_game!(PoolGame, "pool-sketch", vectors);
