pub mod catalog;
pub mod leaderboard;
pub mod races;
pub mod system;

use ntex::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(system::root))
        .route("/test", web::get().to(system::check_environment))
        .route("/schema", web::get().to(system::schema_info))
        .route("/seed", web::post().to(system::seed))
        .route("/maps", web::get().to(catalog::get_maps))
        .route("/vehicles", web::get().to(catalog::get_vehicles))
        .route("/races", web::post().to(races::create_race))
        .route("/races", web::get().to(races::list_races))
        .route("/leaderboard/{race_id}", web::get().to(leaderboard::get_leaderboard));
}
