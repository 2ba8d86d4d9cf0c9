use actix_files::Files;
use actix_web::{middleware, App, HttpServer};
use std::env;

// The itinerary backend listens on 8080 during development
const DEFAULT_PORT: u16 = 3000;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let dist_dir = env::var("DIST_DIR").unwrap_or_else(|_| "./dist".to_string());

    log::info!("Serving {dist_dir} on 0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/", &dist_dir).index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
