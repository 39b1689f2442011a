use std::{path::Path, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    ClipboardWriter, ControllerEvent, HttpRecipeService, NoopClipboard, RecipeController,
    RequestState, SelectedImage, Submission, DEFAULT_SERVER_URL,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod clipboard;
mod render;

use clipboard::SystemClipboard;

/// Turn a photo of your ingredients into a recipe.
#[derive(Parser, Debug)]
struct Args {
    /// Photo to upload. Omitting it reports the missing-image message.
    #[arg(long)]
    image: Option<PathBuf>,
    /// Free-text dietary preference; empty means "any".
    #[arg(long, default_value = "")]
    preference: String,
    #[arg(long, env = "SNAPDISH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Copy the recipe to the system clipboard after it arrives.
    #[arg(long)]
    copy: bool,
    /// Print the structured recipe as JSON instead of the terminal layout.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let service = HttpRecipeService::new(&args.server_url)
        .with_context(|| format!("invalid server url '{}'", args.server_url))?;
    let clipboard: Arc<dyn ClipboardWriter> = if args.copy {
        Arc::new(SystemClipboard)
    } else {
        Arc::new(NoopClipboard)
    };
    let controller = RecipeController::new(Arc::new(service), clipboard);
    let event_log = tokio::spawn(log_events(controller.subscribe_events()));

    if let Some(path) = &args.image {
        controller.select_image(Some(load_image(path).await?)).await;
    }
    controller.set_preference(args.preference.as_str()).await;

    match controller.submit().await {
        Ok(Submission::Issued(in_flight)) => {
            eprintln!("Generating...");
            in_flight.finished().await;
        }
        Ok(Submission::AlreadyPending) => anyhow::bail!("a recipe request is already pending"),
        Err(err) => {
            eprintln!("{err}");
            event_log.abort();
            return Ok(ExitCode::FAILURE);
        }
    }

    let code = match controller.request_state().await {
        RequestState::Succeeded { raw_recipe_text } => {
            if args.json {
                let recipe = controller
                    .parsed_recipe()
                    .await
                    .context("recipe disappeared after success")?;
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print!("{}", render::render_recipe(&raw_recipe_text));
            }
            if args.copy {
                controller
                    .copy_recipe()
                    .await
                    .context("failed to copy the recipe")?;
                eprintln!("Copied!");
            }
            ExitCode::SUCCESS
        }
        RequestState::Failed { message } => {
            if let Some(diagnostic) = controller.last_diagnostic().await {
                warn!(
                    detail = %diagnostic.detail,
                    transient = diagnostic.transient,
                    "recipe request failed"
                );
            }
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        state => anyhow::bail!("request ended in unexpected state {state:?}"),
    };

    event_log.abort();
    Ok(code)
}

async fn load_image(path: &Path) -> Result<SelectedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    info!(%filename, %media_type, size_bytes = bytes.len(), "image loaded");
    Ok(SelectedImage::new(bytes, media_type, filename))
}

async fn log_events(mut events: broadcast::Receiver<ControllerEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => debug!(event = event.name(), ?event, "controller event"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "controller event log lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
