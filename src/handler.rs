// HTTP handler bindings for the arena endpoints
//
// Thin wrappers that deserialize the request, hand it to the managed Bot and
// serialize whatever it returns. No game logic lives here.

use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::Value;

use gold_snake::bot::Bot;
use gold_snake::types::{GameState, StartRequest};

/// GET / endpoint
/// Returns snake name, appearance, taunt and state
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Called when a game starts, answers appearance and a taunt
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<StartRequest>) -> Json<Value> {
    Json(bot.start(&start_req))
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(bot: &rocket::State<Bot>, move_req: Json<GameState>) -> Json<Value> {
    Json(bot.get_move(&move_req).await)
}

/// POST /end endpoint
/// Called when a game ends
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<StartRequest>) -> Status {
    bot.end(&end_req.game_id);

    Status::Ok
}
