use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use cardscan_ocr::{OcrBackend, ScanPipeline};
use tracing_subscriber::EnvFilter;

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path = match std::env::var("CARDSCAN_DB") {
        Ok(path) => PathBuf::from(path),
        Err(_) => default_db_path()?,
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = cardscan_storage::create_db(&db_path).await?;
    tracing::info!("Contact store: {}", db_path.display());

    let state = routes::AppState {
        db,
        pipeline: Arc::new(ScanPipeline::new(build_recognizer())),
    };
    let app = routes::create_router(state);

    let addr: SocketAddr = std::env::var("CARDSCAN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
        .parse()?;
    tracing::info!("Server running on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "cardscan", "Cardscan")
        .ok_or_else(|| anyhow::anyhow!("could not determine data directory"))?;
    Ok(dirs.data_dir().join("cardscan.db"))
}

#[cfg(feature = "tesseract")]
fn build_recognizer() -> Arc<dyn OcrBackend> {
    use cardscan_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    let data_path = std::env::var("TESSDATA_PREFIX").ok();
    Arc::new(TesseractRecognizer::new(data_path, "eng"))
}

#[cfg(not(feature = "tesseract"))]
fn build_recognizer() -> Arc<dyn OcrBackend> {
    tracing::warn!("built without the `tesseract` feature; OCR returns empty text");
    Arc::new(cardscan_ocr::MockRecognizer::new(""))
}
