use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cli::Args;
use crate::config::TimberCropConfig;
use crate::core::controller::{BatchController, BatchSummary, ControllerState};
use crate::lot::queue::ImageQueue;
use crate::lot::workspace::LotWorkspace;
use crate::render::image::PreviewWriter;
use crate::session::script::{EventSource, LineEvents, ScriptedEvents};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every queued image was handled
    Exhausted(BatchSummary),
    /// The event source closed first; the current image is still pending
    Interrupted {
        summary: BatchSummary,
        remaining: usize,
    },
}

/// Resolve settings, prepare the lot and drive it from the chosen event source
pub fn run(args: Args) -> Result<RunOutcome> {
    let config = effective_config(&args)?;
    if args.save_config {
        config.save();
    }

    let stdin = std::io::stdin();
    let root = match args.root {
        Some(root) => root,
        None => pick_folder()?,
    };
    let lot_id = match args.lot {
        Some(lot_id) => lot_id,
        None => prompt_lot(&mut stdin.lock())?,
    };

    let workspace = LotWorkspace::ensure_with(&root, &lot_id, &config.layout())?;
    let queue = ImageQueue::from_dir(&workspace.source_dir)?;
    log::info!(
        "Lot {}: {} files in {}",
        workspace.lot_id,
        queue.len(),
        workspace.source_dir.display()
    );

    let mut controller = BatchController::new(workspace, queue, config.bounds());
    if let Some(path) = &config.preview_path {
        log::info!("Writing preview to {}", path.display());
        controller = controller.with_preview(PreviewWriter::new(path, config.outline_color));
    }

    match &args.script {
        Some(path) => drive(&mut controller, &mut ScriptedEvents::from_path(path)?),
        None => drive(&mut controller, &mut LineEvents::new(stdin.lock())),
    }
}

/// Feed events to `controller` until the queue is exhausted or the source closes
pub fn drive(controller: &mut BatchController, source: &mut dyn EventSource) -> Result<RunOutcome> {
    let mut state = controller.start()?;

    while state != ControllerState::Terminated {
        let Some(event) = source.next_event()? else {
            let remaining = controller.remaining();
            log::warn!(
                "Input closed with {} files still queued; the current image was left in place",
                remaining
            );
            return Ok(RunOutcome::Interrupted {
                summary: controller.summary(),
                remaining,
            });
        };
        log::trace!("Event {:?}", event);
        state = controller.handle(event)?;
    }

    Ok(RunOutcome::Exhausted(controller.summary()))
}

fn effective_config(args: &Args) -> Result<TimberCropConfig> {
    let mut config = match &args.config {
        Some(path) => TimberCropConfig::load_from(path)?,
        None => TimberCropConfig::load(),
    };

    if let Some(width) = args.width {
        config.display_width = width;
    }
    if let Some(height) = args.height {
        config.display_height = height;
    }
    if let Some(preview) = &args.preview {
        config.preview_path = Some(preview.clone());
    }
    config.validate()?;
    Ok(config)
}

fn pick_folder() -> Result<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select the folder of images to process")
        .pick_folder()
        .context("No appropriate folder was chosen")
}

fn prompt_lot(input: &mut impl BufRead) -> Result<String> {
    eprint!("Input lot number for this batch of images: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read lot number")?;
    let lot_id = line.trim();
    if lot_id.is_empty() {
        bail!("No name was given for the lot number");
    }
    Ok(lot_id.to_string())
}
