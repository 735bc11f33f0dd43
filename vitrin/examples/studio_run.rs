use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use vitrin::gateway::GeminiGateway;
use vitrin::intake::UploadedFile;
use vitrin::pipeline::{download_file_name, StepStatus, Studio};
use vitrin::Client;

fn output_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VITRIN_OUTPUT_DIR") {
        return PathBuf::from(dir);
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("output")
}

#[tokio::main]
async fn main() -> vitrin::Result<()> {
    tracing_subscriber::fmt::init();

    let Some(photo_path) = std::env::args().nth(1) else {
        eprintln!("usage: studio_run <product-photo>");
        return Ok(());
    };

    let client = Client::from_env()?;
    let studio = Studio::new(GeminiGateway::new(client));

    let file = UploadedFile::from_path(&photo_path)?;
    studio.accept_upload(file.data().clone(), file.media_type());
    studio.generate().await;

    let state = studio.state();
    for step in &state.steps {
        let marker = match &step.status {
            StepStatus::Pending => "..",
            StepStatus::InProgress => ">>",
            StepStatus::Completed => "ok",
            StepStatus::Error(_) => "!!",
        };
        println!("[{marker}] {}", step.label);
    }

    if let Some(error) = &state.error {
        println!("hata: {error}");
        return Ok(());
    }

    let output_dir = output_dir();
    std::fs::create_dir_all(&output_dir)?;
    for (index, uri) in state.images.iter().enumerate() {
        let Some((_, payload)) = uri.split_once(',') else {
            continue;
        };
        let bytes = STANDARD.decode(payload).map_err(|err| vitrin::Error::Parse {
            message: format!("invalid data URI payload: {err}"),
        })?;
        let filename = output_dir.join(download_file_name(index));
        std::fs::write(&filename, bytes)?;
        println!("saved {}", filename.display());
    }
    Ok(())
}
