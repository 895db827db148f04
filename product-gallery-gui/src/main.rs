mod app;

use product_gallery_core::GalleryConfig;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            // Default to info level, but allow override via RUST_LOG
            // Example: RUST_LOG=product_gallery_core::pagination=debug
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_gallery_core=info,product_gallery_gui=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    init_logging();

    let config = match GalleryConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    iced::application("Product Gallery", app::update, app::view)
        .run_with(move || app::initialize(config))
}
