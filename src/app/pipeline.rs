//! Generation pipeline - runs prompt branches on workers, applies results.
//!
//! On send exactly one branch runs: storyboard (batch of five scene
//! prompts), image-to-image (a reference image is attached), or plain
//! text-to-image. A failed branch falls back to the deterministic
//! placeholder URL so the panel always resolves and never sticks in a
//! loading state. Everything that touches the network or disk runs inside
//! `run_branch` on a background worker; `apply_generation` mutates UI state
//! when the frame loop drains the event channel.

use super::{AppEvent, MaterializedImage, PipelineError, PipelineEvent, Promptboard};
use crate::api::models::{GeneratedImage, ImageSize, IMAGE_TO_IMAGE};
use crate::api::{ApiError, GenerationClient, mock_image_url};
use crate::background::TaskResult;
use crate::constants::STORYBOARD_SCENES;
use crate::image_cache::ImageCache;
use crate::notifications::Toast;
use crate::types::{CanvasImage, ChatMessage, ImageOrigin};
use gpui::*;
use std::sync::Arc;
use tracing::warn;

/// Scene suffixes for the storyboard template. The first already carries
/// its separator; the rest are joined as `"{prompt} - {suffix}"`.
const STORYBOARD_SCENE_SUFFIXES: [&str; STORYBOARD_SCENES] = [
    " - Scene 1: Opening shot with shoebox",
    "Scene 2: Close-up of boombox interaction",
    "Scene 3: Neighborhood walking scene",
    "Scene 4: Bus stop flashback moment",
    "Scene 5: College hostel contemplation",
];

/// Derive the five scene prompts for a storyboard run.
pub fn storyboard_prompts(base: &str) -> Vec<String> {
    STORYBOARD_SCENE_SUFFIXES
        .iter()
        .enumerate()
        .map(|(index, suffix)| {
            if index == 0 {
                format!("{}{}", base, suffix)
            } else {
                format!("{} - {}", base, suffix)
            }
        })
        .collect()
}

/// Which generation branch a send resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineBranch {
    Text,
    /// Conditioning image as a data URL or remote URL
    Edit { reference: String },
    Storyboard,
}

impl PipelineBranch {
    fn job_name(&self) -> &'static str {
        match self {
            PipelineBranch::Text => "generate_image",
            PipelineBranch::Edit { .. } => "edit_image",
            PipelineBranch::Storyboard => "generate_storyboard",
        }
    }
}

/// Run one branch to completion. Never panics and never returns early: a
/// failed branch still materializes the placeholder image when it can.
pub fn run_branch(
    client: &GenerationClient,
    cache: &ImageCache,
    branch: PipelineBranch,
    prompt: &str,
    model: &str,
    size: ImageSize,
    template: Option<String>,
) -> PipelineEvent {
    match branch {
        PipelineBranch::Text => run_single(
            cache,
            prompt,
            model,
            template,
            client.generate_image(prompt, model, size),
        ),
        // Editing always uses the image-to-image model, whatever the
        // selector says.
        PipelineBranch::Edit { reference } => run_single(
            cache,
            prompt,
            IMAGE_TO_IMAGE,
            template,
            client.edit_image(&reference, prompt, IMAGE_TO_IMAGE, size),
        ),
        PipelineBranch::Storyboard => run_storyboard(client, cache, prompt, model, size, template),
    }
}

fn run_single(
    cache: &ImageCache,
    prompt: &str,
    model: &str,
    template: Option<String>,
    result: Result<crate::api::models::GenerationResponse, ApiError>,
) -> PipelineEvent {
    let (reference, error) = match result {
        Ok(response) => match response.images.first().and_then(GeneratedImage::reference) {
            Some(reference) => (reference.to_string(), None),
            None => (
                mock_image_url(prompt),
                Some(PipelineError {
                    message: "The service returned no image".to_string(),
                    auth: false,
                }),
            ),
        },
        Err(api_error) => {
            warn!(error = %api_error, "Generation failed, using placeholder");
            (mock_image_url(prompt), Some(PipelineError::from_api(&api_error)))
        }
    };
    let used_fallback = error.is_some();

    match materialize(cache, &reference, prompt) {
        Ok(image) => PipelineEvent {
            prompt: prompt.to_string(),
            model: model.to_string(),
            template,
            images: vec![image],
            failed_scenes: 0,
            used_fallback,
            error,
        },
        Err(message) => PipelineEvent {
            prompt: prompt.to_string(),
            model: model.to_string(),
            template,
            images: Vec::new(),
            failed_scenes: 0,
            used_fallback,
            // Keep the API failure when there was one: it explains why we
            // were on the placeholder path at all.
            error: error.or(Some(PipelineError {
                message,
                auth: false,
            })),
        },
    }
}

fn run_storyboard(
    client: &GenerationClient,
    cache: &ImageCache,
    base_prompt: &str,
    model: &str,
    size: ImageSize,
    template: Option<String>,
) -> PipelineEvent {
    let prompts = storyboard_prompts(base_prompt);
    let references = client.generate_batch(&prompts, model, size);

    let mut images = Vec::new();
    let mut failed_scenes = 0;
    for (scene_prompt, reference) in prompts.iter().zip(&references) {
        if reference.is_empty() {
            failed_scenes += 1;
            continue;
        }
        match materialize(cache, reference, scene_prompt) {
            Ok(image) => images.push(image),
            Err(message) => {
                warn!(%message, "Scene image could not be materialized");
                failed_scenes += 1;
            }
        }
    }

    if images.is_empty() {
        // Every scene failed; resolve with one placeholder for the base
        // prompt so the canvas still gets something.
        let reference = mock_image_url(base_prompt);
        let error = Some(PipelineError {
            message: "All storyboard scenes failed".to_string(),
            auth: false,
        });
        return match materialize(cache, &reference, base_prompt) {
            Ok(image) => PipelineEvent {
                prompt: base_prompt.to_string(),
                model: model.to_string(),
                template,
                images: vec![image],
                failed_scenes,
                used_fallback: true,
                error,
            },
            Err(_) => PipelineEvent {
                prompt: base_prompt.to_string(),
                model: model.to_string(),
                template,
                images: Vec::new(),
                failed_scenes,
                used_fallback: true,
                error,
            },
        };
    }

    PipelineEvent {
        prompt: base_prompt.to_string(),
        model: model.to_string(),
        template,
        images,
        failed_scenes,
        used_fallback: false,
        error: None,
    }
}

/// Turn one image reference into a cache file plus its metadata.
fn materialize(
    cache: &ImageCache,
    reference: &str,
    prompt: &str,
) -> Result<MaterializedImage, String> {
    let path = cache.materialize(reference).map_err(|e| e.to_string())?;
    let dimensions = ImageCache::dimensions(&path);
    let origin = if reference.starts_with("http://") || reference.starts_with("https://") {
        ImageOrigin::Url(reference.to_string())
    } else {
        ImageOrigin::Inline
    };
    Ok(MaterializedImage {
        path,
        origin,
        prompt: prompt.to_string(),
        dimensions,
    })
}

impl Promptboard {
    /// Queue a generation job. Returns false when no cache directory is
    /// available, in which case nothing was spawned.
    pub(super) fn spawn_generation(
        &mut self,
        prompt: String,
        branch: PipelineBranch,
        template: Option<String>,
    ) -> bool {
        let Some(cache) = self.system.image_cache.as_ref().map(Arc::clone) else {
            self.ui.toast_manager.push(
                Toast::error("No writable cache directory found").with_source("storage"),
            );
            return false;
        };

        let client = self.account.generation.clone();
        let model = self.chat.model.clone();
        let size = self.chat.size;
        let tx = self.system.events_tx.clone();
        let job_name = branch.job_name();

        // Clones for synthesizing an event if the executor drops the job.
        let cb_prompt = prompt.clone();
        let cb_model = model.clone();
        let cb_template = template.clone();

        self.system.background.spawn(
            job_name,
            move || Ok(run_branch(&client, &cache, branch, &prompt, &model, size, template)),
            move |result: TaskResult<PipelineEvent>| {
                let event = result.unwrap_or_else(|message| PipelineEvent {
                    prompt: cb_prompt,
                    model: cb_model,
                    template: cb_template,
                    images: Vec::new(),
                    failed_scenes: 0,
                    used_fallback: false,
                    error: Some(PipelineError {
                        message,
                        auth: false,
                    }),
                });
                let _ = tx.send(AppEvent::Generation(event));
            },
        );
        true
    }

    /// Apply one finished generation to the conversation and the canvas.
    pub(super) fn apply_generation(
        &mut self,
        event: PipelineEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.chat.generating = false;

        if let Some(error) = &event.error {
            if error.auth {
                self.ui.toast_manager
                    .push(Toast::error(error.message.clone()).with_source("auth"));
                self.open_key_modal(cx);
            } else {
                self.ui.toast_manager
                    .push(Toast::error(error.message.clone()).with_source("generation"));
            }
        }

        if event.images.is_empty() {
            self.chat.messages.push(
                ChatMessage::assistant("Image generation failed. Try again.")
                    .with_template(event.template.clone()),
            );
            cx.notify();
            return;
        }

        let mut paths = Vec::with_capacity(event.images.len());
        for produced in &event.images {
            let id = self.canvas.board.next_image_id();
            let mut image = CanvasImage::new(
                id,
                produced.path.clone(),
                produced.origin.clone(),
                produced.prompt.clone(),
                event.model.clone(),
            );
            if let Some((w, h)) = produced.dimensions {
                image.apply_natural_size(w, h);
            }
            self.canvas.board.add_image(image);
            paths.push(produced.path.clone());
        }

        self.chat.messages.push(
            ChatMessage::assistant(assistant_summary(&event))
                .with_images(paths)
                .with_template(event.template.clone()),
        );

        if event.error.is_none() {
            if event.failed_scenes > 0 {
                self.ui.toast_manager.push(
                    Toast::info(format!(
                        "{} of {} scenes failed",
                        event.failed_scenes, STORYBOARD_SCENES
                    ))
                    .with_source("generation"),
                );
            } else if event.images.len() > 1 {
                self.ui.toast_manager
                    .push(Toast::success("Storyboard generated").with_source("generation"));
            } else {
                self.ui.toast_manager
                    .push(Toast::success("Image generated").with_source("generation"));
            }
        }

        cx.notify();
    }
}

fn assistant_summary(event: &PipelineEvent) -> String {
    if event.used_fallback {
        "The image service was unavailable, so a placeholder was generated instead.".to_string()
    } else if event.images.len() > 1 || event.failed_scenes > 0 {
        let total = event.images.len() + event.failed_scenes;
        if event.failed_scenes > 0 {
            format!(
                "Generated {} of {} storyboard scenes.",
                event.images.len(),
                total
            )
        } else {
            format!("Generated {} storyboard scenes.", event.images.len())
        }
    } else {
        "Generated 1 image.".to_string()
    }
}
