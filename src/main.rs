use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use tera::Tera;

use attesta::db::establish_connection_pool;
use attesta::models::config::ServerConfig;
use attesta::repository::DieselRepository;
use attesta::services::pdf::CertificateStamper;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to create a database pool: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let stamper = CertificateStamper::new(&config.stamp);

    let tera = match Tera::new(&config.templates_glob) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Starting Attesta on {}:{}", config.bind_address, config.port);

    let bind_address = (config.bind_address.clone(), config.port);
    let assets_dir = config.assets_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(stamper.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(actix_files::Files::new("/assets", assets_dir.clone()))
            .configure(attesta::routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
