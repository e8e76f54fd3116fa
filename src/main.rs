use axum::ServiceExt;
use blog::config::{Config, StoreKind};
use blog::generate::GenAiWriter;
use blog::media::{ImageKit, LocalMedia, MediaService};
use blog::store::{BlogStore, FileStore, MemoryStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog=info,tower_http=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return run_command(&command, args.collect());
    }

    let config = Config::from_env()?;
    let state = Arc::new(blog::state::State::new(
        config.admin.clone(),
        open_store(&config).await?,
        open_media(&config).await?,
        Arc::new(GenAiWriter::new(config.genai_model.clone())),
    ));

    let app = blog::app(state, config.cors_origin.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Listening on {}", config.bind);

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn run_command(command: &str, args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    match (command, args.as_slice()) {
        ("hash-password", [password]) => {
            println!("{}", blog::auth::hash_password(password)?);
            Ok(())
        }
        _ => Err("usage: blog [hash-password <password>]".into()),
    }
}

async fn open_store(config: &Config) -> Result<Arc<dyn BlogStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn BlogStore> = match config.store {
        StoreKind::File => {
            tracing::info!("Using file store at {:?}", config.store_path);
            Arc::new(FileStore::open(&config.store_path).await?)
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store, nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(store)
}

async fn open_media(config: &Config) -> Result<Arc<dyn MediaService>, Box<dyn std::error::Error>> {
    let media: Arc<dyn MediaService> = match &config.imagekit {
        Some(imagekit) => {
            tracing::info!("Uploading images to ImageKit ({})", imagekit.url_endpoint);
            Arc::new(ImageKit::new(
                imagekit.private_key.clone(),
                imagekit.url_endpoint.clone(),
            ))
        }
        None => {
            let root = config.store_path.join("media");
            tracing::info!("Storing images locally in {root:?}");
            Arc::new(LocalMedia::open(root, &config.public_url).await?)
        }
    };

    Ok(media)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Error listening for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
