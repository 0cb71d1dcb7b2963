#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use env_logger::Env;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("reviewdesk failed to start: {err}");
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(feature = "ssr")]
async fn run() -> reviewdesk::error::Result<()> {
    use actix_files::Files;
    use actix_web::{middleware, web, App, HttpServer};
    use log::info;
    use reviewdesk::config::{self, Settings};
    use reviewdesk::db::Database;
    use reviewdesk::notifier;
    use reviewdesk::routes::{self, AppState};

    let settings = Settings::from_env()?;

    // Initialize the database
    config::ensure_database_dir(&settings.database_path)?;
    let db = Database::new(&settings.database_path)?;
    db.create_schema().await?;
    info!(
        "Review store ready with {} review(s)",
        db.count_reviews().await?
    );

    let notifier = notifier::from_settings(settings.mail.as_ref())?;
    let state = web::Data::new(AppState::from_settings(db, notifier, &settings));
    let assets_dir = settings.assets_dir.clone();
    let addr = settings.bind_address();
    info!("listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .service(Files::new("/assets", &assets_dir))
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // the server needs the `ssr` feature; the library alone only provides
    // the models, validation and view components
}
