// HTTP handler bindings for the game host
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's lifecycle methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting Bot instance from Rocket's managed state
// - Delegating to Bot methods
// - Serializing responses, including turn failures

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use serde_json::{json, Value};

use cheese_race_bot::bot::Bot;
use cheese_race_bot::types::TurnRequest;

/// GET / endpoint
/// Returns agent metadata
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Called when a game starts
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<TurnRequest>) -> Status {
    bot.start(&start_req);

    Status::Ok
}

/// POST /turn endpoint
/// Called each turn; answers with one of the offered action labels.
/// Malformed snapshots are reported as 422 so the host sees an agent fault.
#[post("/turn", format = "json", data = "<turn_req>")]
pub async fn turn(
    bot: &rocket::State<Bot>,
    turn_req: Json<TurnRequest>,
) -> Result<Json<Value>, status::Custom<Json<Value>>> {
    match bot.get_move(&turn_req).await {
        Ok(action) => Ok(Json(json!({ "action": action }))),
        Err(e) => Err(status::Custom(
            Status::UnprocessableEntity,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// POST /end endpoint
/// Called when a game ends
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<TurnRequest>) -> Status {
    bot.end(&end_req);

    Status::Ok
}
