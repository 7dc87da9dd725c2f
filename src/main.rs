mod config;
mod db;
mod error;
mod handlers;
mod models;
mod object_id;
mod services;
mod state;
mod validation;

use config::Config;
use ntex::web;
use ntex_cors::Cors;
use state::AppState;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config);

    log::info!("Racing UI backend starting on {}", bind_addr);

    web::HttpServer::new(move || {
        web::App::new()
            .state(state.clone())
            .wrap(web::middleware::Logger::default())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                    .max_age(3600)
                    .finish(),
            )
            .configure(handlers::routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Db, DocumentStore};
    use crate::models::entry::Entry;
    use crate::models::Entity;
    use crate::object_id::ObjectId;
    use ntex::http::StatusCode;
    use ntex::web::test;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn test_config() -> Config {
        Config::from_lookup(|_| None)
    }

    fn with_store() -> (Arc<AppState>, Arc<Db>) {
        let db = Arc::new(Db::open_in_memory().unwrap());
        let store: Arc<dyn DocumentStore> = db.clone();
        (AppState::new(test_config(), Some(store)), db)
    }

    fn insert_entry(db: &Db, race_id: &str, player: &str, total: Option<u64>, best: Option<u64>) {
        let entry = Entry {
            race_id: race_id.into(),
            player_name: player.into(),
            vehicle_code: "comet5".into(),
            total_time_ms: total,
            best_lap_ms: best,
            laps_completed: 0,
            position: None,
        };
        db.insert_one(Entry::COLLECTION, services::to_document(&entry).unwrap())
            .unwrap();
    }

    #[ntex::test]
    async fn test_root_message() {
        let app = test::init_service(web::App::new().configure(handlers::routes)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!({"message": "Racing UI Backend Ready"}));
    }

    #[ntex::test]
    async fn test_schema_lists_all_models() {
        let app = test::init_service(web::App::new().configure(handlers::routes)).await;
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/schema").to_request()).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let names: Vec<_> = body["models"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Vehicle", "Map", "Race", "Entry"]);
        assert_eq!(body["models"][0]["fields"][0], "name");
    }

    #[ntex::test]
    async fn test_data_endpoints_without_store() {
        let state = AppState::new(test_config(), None);
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        for uri in ["/maps", "/vehicles", "/races", "/leaderboard/507f1f77bcf86cd799439011"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
            assert_eq!(body["error"], "Database not configured");
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/test").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["connection_status"], "Not Connected");
    }

    #[ntex::test]
    async fn test_seed_then_list_catalog() {
        let (state, _db) = with_store();
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::post().uri("/seed").to_request()).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!({"status": "ok", "seeded": true}));

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/vehicles").to_request()).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let vehicles = body.as_array().unwrap();
        assert_eq!(vehicles.len(), 3);
        assert_eq!(vehicles[0]["code"], "zentorno");
        assert!(vehicles[0]["id"].is_string());
        assert!(vehicles[0].get("_id").is_none());

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/maps").to_request()).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[ntex::test]
    async fn test_create_and_list_races() {
        let (state, _db) = with_store();
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/races")
            .set_json(&json!({"map_code": "downtown_dash", "laps": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/races").to_request()).await;
        let races: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(races[0]["id"], id.as_str());
        assert_eq!(races[0]["status"], "pending");
        assert_eq!(races[0]["allowed_vehicle_codes"], json!([]));
    }

    #[ntex::test]
    async fn test_create_race_rejects_out_of_range_laps() {
        let (state, db) = with_store();
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/races")
            .set_json(&json!({"map_code": "downtown_dash", "laps": 0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(db.list_collection_names().unwrap().is_empty());
    }

    #[ntex::test]
    async fn test_create_race_malformed_body_is_structured_error() {
        let (state, db) = with_store();
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/races")
            .set_json(&json!({"laps": 3}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("map_code"));
        assert!(db.list_collection_names().unwrap().is_empty());
    }

    #[ntex::test]
    async fn test_leaderboard_ranks_entries() {
        let (state, db) = with_store();
        let race_id = ObjectId::new().to_string();
        insert_entry(&db, &race_id, "A", Some(120_000), Some(30_000));
        insert_entry(&db, &race_id, "B", None, Some(29_000));
        insert_entry(&db, &race_id, "C", Some(120_000), Some(29_500));
        insert_entry(&db, &race_id, "D", None, None);

        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;
        let uri = format!("/leaderboard/{}", race_id);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let order: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| (e["player_name"].as_str().unwrap().to_string(), e["position"].as_u64().unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("C".to_string(), 1),
                ("A".to_string(), 2),
                ("B".to_string(), 3),
                ("D".to_string(), 4)
            ]
        );
    }

    #[ntex::test]
    async fn test_leaderboard_rejects_malformed_id() {
        let (state, _db) = with_store();
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/leaderboard/not-a-race").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["error"], "Invalid race id");
    }

    #[ntex::test]
    async fn test_leaderboard_for_unknown_race_is_empty() {
        let (state, _db) = with_store();
        let app = test::init_service(
            web::App::new().state(state).configure(handlers::routes),
        )
        .await;

        let uri = format!("/leaderboard/{}", ObjectId::new());
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!([]));
    }
}
