//! The select → edit → caption stage machine around the crop engine.
//!
//! A [`CropWorkflow`] owns everything one crop dialog needs: the selected
//! [`SourceImage`], the live [`TransformState`], the rasterizer and, after
//! confirming, the [`OutputImage`]. User actions arrive as [`Command`]s (plus
//! `select`, `set_caption` and `submit`, which carry data) so the machine can
//! be driven deterministically without a UI.
//!
//! # Stages
//!
//! ```text
//! Select --select--> Edit --confirm--> Caption --submit--> Completed
//!    ^                |  ^                |
//!    +------back------+  +------back------+       (two-step: Edit --confirm--> Completed)
//!
//! any live stage --cancel--> Closed
//! ```
//!
//! # Export boundary
//!
//! Encoding may run asynchronously on the host. [`CropWorkflow::begin_confirm`]
//! rasterizes immediately, capturing the transform at that instant, and marks
//! the workflow as processing; [`CropWorkflow::finish_confirm`] takes the
//! encode result. While processing only `Cancel` is accepted.

mod caption;
mod error;
mod stage;

pub use caption::CaptionDraft;
pub use error::WorkflowError;
pub use stage::{Command, Stage, WorkflowVariant};

use std::fmt;

use crate::config::{ConfigError, CropConfig};
use crate::decode::{DecodeError, SelectedFile, SourceImage};
use crate::encode::{export_jpeg, EncodeError, OutputImage};
use crate::raster::{CpuRasterizer, Rasterizer, Surface};
use crate::transform::TransformState;

/// The finished post content handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPost {
    /// The exported square image.
    pub image: OutputImage,
    /// Submitted caption; `None` in the two-step variant.
    pub caption: Option<String>,
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The workflow is now in this stage.
    Moved(Stage),
    /// The workflow completed and handed over its post.
    Completed(CompletedPost),
}

impl Outcome {
    /// Stage after the command.
    pub fn stage(&self) -> Stage {
        match self {
            Outcome::Moved(stage) => *stage,
            Outcome::Completed(_) => Stage::Completed,
        }
    }
}

/// A rasterized surface waiting to be encoded.
#[derive(Debug)]
pub struct PendingCommit {
    surface: Surface,
    quality: u8,
    file_name: String,
}

impl PendingCommit {
    /// The surface drawn at confirm time.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Transform the surface was drawn with.
    pub fn state(&self) -> TransformState {
        self.surface.state()
    }

    /// Encode the surface as the final JPEG.
    pub fn encode(self) -> Result<OutputImage, EncodeError> {
        export_jpeg(self.surface, self.quality, &self.file_name)
    }
}

/// One crop dialog, from picking an image to handing over the result.
pub struct CropWorkflow {
    config: CropConfig,
    rasterizer: Box<dyn Rasterizer>,
    stage: Stage,
    source: Option<SourceImage>,
    transform: TransformState,
    output: Option<OutputImage>,
    caption: CaptionDraft,
    processing: bool,
}

impl fmt::Debug for CropWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropWorkflow")
            .field("stage", &self.stage)
            .field("variant", &self.config.variant)
            .field("transform", &self.transform)
            .field("has_source", &self.source.is_some())
            .field("has_output", &self.output.is_some())
            .field("processing", &self.processing)
            .finish_non_exhaustive()
    }
}

impl CropWorkflow {
    /// Workflow rendering with the CPU rasterizer.
    pub fn new(config: CropConfig) -> Result<Self, ConfigError> {
        let rasterizer = CpuRasterizer::new(config.background, config.filter);
        Self::with_rasterizer(config, Box::new(rasterizer))
    }

    /// Workflow rendering with a platform-specific rasterizer.
    pub fn with_rasterizer(
        config: CropConfig,
        rasterizer: Box<dyn Rasterizer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transform: TransformState::new(config.zoom),
            config,
            rasterizer,
            stage: Stage::Select,
            source: None,
            output: None,
            caption: CaptionDraft::new(),
            processing: false,
        })
    }

    /// Seed the caption step with the caption of a post being edited.
    /// Submitting it unchanged is refused with `NoChanges`.
    pub fn with_existing_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = CaptionDraft::editing(caption);
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.config.variant
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Current (uncommitted) transform.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Output produced by the last confirm, while on the caption step.
    pub fn output(&self) -> Option<&OutputImage> {
        self.output.as_ref()
    }

    pub fn caption(&self) -> &str {
        self.caption.text()
    }

    /// True between `begin_confirm` and `finish_confirm`.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// CSS transform for the live preview.
    pub fn css_transform(&self) -> String {
        self.transform.css_transform()
    }

    /// Take the picked file and move to the edit step.
    ///
    /// The source starts out pending; call [`CropWorkflow::load`] (or use
    /// [`CropWorkflow::select_and_load`]) before confirming.
    pub fn select(&mut self, file: SelectedFile) -> Result<(), WorkflowError> {
        if self.stage != Stage::Select {
            return Err(self.reject("select an image"));
        }
        if !file.may_be_image() {
            tracing::warn!(mime_type = %file.mime_type, "selected file is not an image");
            return Err(WorkflowError::Decode(DecodeError::InvalidFormat));
        }

        tracing::debug!(
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            bytes = file.bytes.len(),
            "image selected"
        );
        self.source = Some(SourceImage::pending(file));
        self.enter_edit();
        Ok(())
    }

    /// Decode the selected source. On failure the source stays pending.
    pub fn load(&mut self) -> Result<(), WorkflowError> {
        if self.stage != Stage::Edit {
            return Err(self.reject("load the image"));
        }
        let max_edge = self.config.max_source_edge;
        let source = self.source.as_mut().ok_or(WorkflowError::NoSourceImage)?;
        source.load(max_edge)?;
        Ok(())
    }

    /// Select and decode in one go. If decoding fails the selection is
    /// undone and the workflow stays on the select step.
    pub fn select_and_load(&mut self, file: SelectedFile) -> Result<(), WorkflowError> {
        self.select(file)?;
        if let Err(err) = self.load() {
            tracing::warn!(error = %err, "selected image failed to load");
            self.source = None;
            self.set_stage(Stage::Select);
            return Err(err);
        }
        Ok(())
    }

    /// Apply a user command.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, WorkflowError> {
        if command == Command::Cancel {
            return self.close().map(Outcome::Moved);
        }
        if self.processing {
            tracing::warn!(command = command.as_str(), "command rejected while processing");
            return Err(WorkflowError::Busy);
        }

        match (self.stage, command) {
            (Stage::Edit, Command::ZoomIn) => self.transform.zoom_in(),
            (Stage::Edit, Command::ZoomOut) => self.transform.zoom_out(),
            (Stage::Edit, Command::Rotate) => self.transform.rotate(),
            (Stage::Edit, Command::Confirm) => {
                let pending = self.begin_confirm()?;
                let encoded = pending.encode();
                return self.finish_confirm(encoded);
            }
            (Stage::Edit, Command::Back) => {
                self.source = None;
                self.transform.reset();
                self.set_stage(Stage::Select);
            }
            (Stage::Caption, Command::Back) => {
                self.output = None;
                self.enter_edit();
            }
            _ => return Err(self.reject(command.as_str())),
        }

        Ok(Outcome::Moved(self.stage))
    }

    /// Rasterize the current transform and mark the workflow as processing.
    ///
    /// The returned commit holds the surface drawn right now; later
    /// transform commands are refused until [`CropWorkflow::finish_confirm`].
    pub fn begin_confirm(&mut self) -> Result<PendingCommit, WorkflowError> {
        if self.processing {
            return Err(WorkflowError::Busy);
        }
        if self.stage != Stage::Edit {
            return Err(self.reject("confirm"));
        }

        let source = self.source.as_ref().ok_or(WorkflowError::NoSourceImage)?;
        let surface = self
            .rasterizer
            .rasterize(source, &self.transform, self.config.output_side)
            .inspect_err(|err| tracing::warn!(error = %err, "confirm blocked"))?;

        self.processing = true;
        Ok(PendingCommit {
            surface,
            quality: self.config.jpeg_quality,
            file_name: self.config.output_file_name.clone(),
        })
    }

    /// Complete a confirm started with [`CropWorkflow::begin_confirm`].
    ///
    /// A failed encode leaves the workflow on the edit step, ready to retry.
    /// Results arriving after a cancel are discarded.
    pub fn finish_confirm(
        &mut self,
        encoded: Result<OutputImage, EncodeError>,
    ) -> Result<Outcome, WorkflowError> {
        if !self.processing {
            return Err(self.reject("finish confirming"));
        }
        self.processing = false;

        let image = encoded.map_err(|err| {
            tracing::warn!(error = %err, "export failed");
            WorkflowError::EncodeFailure(err.to_string())
        })?;

        match self.config.variant {
            WorkflowVariant::ThreeStep => {
                self.output = Some(image);
                self.set_stage(Stage::Caption);
                Ok(Outcome::Moved(Stage::Caption))
            }
            WorkflowVariant::TwoStep => {
                self.source = None;
                self.set_stage(Stage::Completed);
                Ok(Outcome::Completed(CompletedPost {
                    image,
                    caption: None,
                }))
            }
        }
    }

    /// Replace the caption text on the caption step.
    pub fn set_caption(&mut self, text: impl Into<String>) -> Result<(), WorkflowError> {
        if self.stage != Stage::Caption {
            return Err(self.reject("edit the caption"));
        }
        self.caption.set_text(text);
        Ok(())
    }

    /// Hand over the output and caption, completing the workflow.
    pub fn submit(&mut self) -> Result<CompletedPost, WorkflowError> {
        if self.stage != Stage::Caption {
            return Err(self.reject("submit"));
        }
        let caption = self
            .caption
            .validate()
            .inspect_err(|err| tracing::warn!(error = %err, "submit blocked"))?;
        let image = self
            .output
            .take()
            .ok_or_else(|| self.reject("submit"))?;

        self.source = None;
        self.set_stage(Stage::Completed);
        Ok(CompletedPost {
            image,
            caption: Some(caption),
        })
    }

    /// Render the current transform at the preview side.
    pub fn render_preview(&self) -> Result<Surface, WorkflowError> {
        if self.stage != Stage::Edit {
            return Err(self.reject("preview"));
        }
        let source = self.source.as_ref().ok_or(WorkflowError::NoSourceImage)?;
        Ok(self
            .rasterizer
            .rasterize(source, &self.transform, self.config.preview_side)?)
    }

    fn close(&mut self) -> Result<Stage, WorkflowError> {
        match self.stage {
            Stage::Closed => Ok(Stage::Closed),
            Stage::Completed => Err(self.reject(Command::Cancel.as_str())),
            _ => {
                if self.processing {
                    tracing::debug!("discarding outstanding export");
                }
                self.source = None;
                self.output = None;
                self.processing = false;
                self.transform.reset();
                self.set_stage(Stage::Closed);
                Ok(Stage::Closed)
            }
        }
    }

    fn enter_edit(&mut self) {
        self.transform.reset();
        self.set_stage(Stage::Edit);
    }

    fn set_stage(&mut self, stage: Stage) {
        tracing::debug!(from = %self.stage, to = %stage, "workflow stage changed");
        self.stage = stage;
    }

    fn reject(&self, action: &'static str) -> WorkflowError {
        tracing::warn!(stage = %self.stage, action, "workflow action rejected");
        WorkflowError::InvalidTransition {
            stage: self.stage,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use crate::raster::RasterError;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn config(variant: WorkflowVariant) -> CropConfig {
        let mut config = CropConfig::with_variant(variant);
        config.output_side = 32;
        config.preview_side = 16;
        config
    }

    fn workflow(variant: WorkflowVariant) -> CropWorkflow {
        CropWorkflow::new(config(variant)).unwrap()
    }

    fn png_file(width: u32, height: u32) -> SelectedFile {
        let pixels = vec![140u8; (width * height * 3) as usize];
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        SelectedFile::new(bytes, "image/png", "noodles.png")
    }

    /// Three-step workflow sitting on the edit step with a loaded image.
    fn editing() -> CropWorkflow {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        wf.select_and_load(png_file(60, 30)).unwrap();
        wf
    }

    #[derive(Debug)]
    struct NoSurface;

    impl Rasterizer for NoSurface {
        fn rasterize(
            &self,
            _source: &SourceImage,
            _state: &TransformState,
            side: u32,
        ) -> Result<Surface, RasterError> {
            Err(RasterError::SurfaceUnavailable { side })
        }
    }

    #[test]
    fn test_starts_on_select() {
        let wf = workflow(WorkflowVariant::ThreeStep);
        assert_eq!(wf.stage(), Stage::Select);
        assert!(wf.source().is_none());
        assert!(wf.transform().is_identity());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CropConfig::default();
        config.jpeg_quality = 0;
        assert!(matches!(
            CropWorkflow::new(config),
            Err(ConfigError::InvalidQuality(0))
        ));
    }

    #[test]
    fn test_nothing_past_select_without_image() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        for command in [
            Command::ZoomIn,
            Command::ZoomOut,
            Command::Rotate,
            Command::Confirm,
            Command::Back,
        ] {
            assert!(matches!(
                wf.apply(command),
                Err(WorkflowError::InvalidTransition {
                    stage: Stage::Select,
                    ..
                })
            ));
        }
        assert!(wf.submit().is_err());
        assert_eq!(wf.stage(), Stage::Select);
    }

    #[test]
    fn test_select_enters_edit_with_reset_transform() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        wf.select(png_file(10, 10)).unwrap();

        assert_eq!(wf.stage(), Stage::Edit);
        assert!(wf.transform().is_identity());
        assert!(!wf.source().unwrap().is_ready());
    }

    #[test]
    fn test_select_rejects_non_image() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        let file = SelectedFile::new(b"hello".to_vec(), "text/plain", "notes.txt");

        assert!(matches!(wf.select(file), Err(WorkflowError::Decode(_))));
        assert_eq!(wf.stage(), Stage::Select);
    }

    #[test]
    fn test_untyped_capture_is_sniffed() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        let png = png_file(12, 8);
        let capture = SelectedFile::new(png.bytes, "", "capture");

        wf.select_and_load(capture).unwrap();
        assert_eq!(wf.stage(), Stage::Edit);
        assert_eq!(wf.source().unwrap().dimensions(), Some((12, 8)));
    }

    #[test]
    fn test_undrawable_output_side_rejected_up_front() {
        let mut config = config(WorkflowVariant::ThreeStep);
        config.output_side = 20_000;
        assert!(matches!(
            CropWorkflow::new(config),
            Err(ConfigError::SideTooLarge {
                side: 20_000,
                ..
            })
        ));
    }

    #[test]
    fn test_select_then_cancel_closes_without_output() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        wf.select(png_file(10, 10)).unwrap();

        let outcome = wf.apply(Command::Cancel).unwrap();
        assert_eq!(outcome, Outcome::Moved(Stage::Closed));
        assert_eq!(wf.stage(), Stage::Closed);
        assert!(wf.source().is_none());
        assert!(wf.output().is_none());
    }

    #[test]
    fn test_cancel_is_idempotent_once_closed() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        wf.apply(Command::Cancel).unwrap();
        assert_eq!(wf.apply(Command::Cancel).unwrap().stage(), Stage::Closed);
        assert!(wf.apply(Command::Rotate).is_err());
    }

    #[test]
    fn test_confirm_before_load_is_not_ready() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        wf.select(png_file(10, 10)).unwrap();
        wf.apply(Command::Rotate).unwrap();

        assert!(matches!(
            wf.apply(Command::Confirm),
            Err(WorkflowError::ImageNotReady)
        ));
        assert_eq!(wf.stage(), Stage::Edit);
        assert!(!wf.is_processing());
        assert_eq!(wf.transform().rotation_degrees(), 90);

        wf.load().unwrap();
        assert_eq!(wf.apply(Command::Confirm).unwrap().stage(), Stage::Caption);
    }

    #[test]
    fn test_failed_load_returns_to_select() {
        let mut wf = workflow(WorkflowVariant::ThreeStep);
        let broken = SelectedFile::new(b"garbage".to_vec(), "image/jpeg", "broken.jpg");

        assert!(matches!(
            wf.select_and_load(broken),
            Err(WorkflowError::Decode(_))
        ));
        assert_eq!(wf.stage(), Stage::Select);
        assert!(wf.source().is_none());
    }

    #[test]
    fn test_three_step_happy_path() {
        let mut wf = editing();
        wf.apply(Command::ZoomIn).unwrap();
        wf.apply(Command::Rotate).unwrap();
        assert_eq!(wf.css_transform(), "scale(1.1) rotate(90deg)");

        assert_eq!(wf.apply(Command::Confirm).unwrap(), Outcome::Moved(Stage::Caption));
        let output = wf.output().unwrap();
        assert_eq!(output.side, 32);
        assert_eq!(output.mime_type, "image/jpeg");

        wf.set_caption("Hand-pulled noodles").unwrap();
        let post = wf.submit().unwrap();

        assert_eq!(post.caption.as_deref(), Some("Hand-pulled noodles"));
        assert_eq!(post.image.file_name, "cropped.jpg");
        let decoded = decode_image(&post.image.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (32, 32));
        assert_eq!(wf.stage(), Stage::Completed);
        assert!(wf.output().is_none());
    }

    #[test]
    fn test_empty_caption_blocks_submit() {
        let mut wf = editing();
        wf.apply(Command::Confirm).unwrap();

        assert!(matches!(wf.submit(), Err(WorkflowError::EmptyCaption)));
        assert_eq!(wf.stage(), Stage::Caption);
        assert!(wf.output().is_some());

        wf.set_caption("   ").unwrap();
        assert!(matches!(wf.submit(), Err(WorkflowError::EmptyCaption)));
        assert_eq!(wf.stage(), Stage::Caption);
    }

    #[test]
    fn test_unchanged_existing_caption_blocks_submit() {
        let mut wf = CropWorkflow::new(config(WorkflowVariant::ThreeStep))
            .unwrap()
            .with_existing_caption("Dumplings");
        wf.select_and_load(png_file(20, 20)).unwrap();
        wf.apply(Command::Confirm).unwrap();

        assert_eq!(wf.caption(), "Dumplings");
        assert!(matches!(wf.submit(), Err(WorkflowError::NoChanges)));

        wf.set_caption("Dumplings, cash only").unwrap();
        assert!(wf.submit().is_ok());
    }

    #[test]
    fn test_two_step_completes_on_confirm() {
        let mut wf = workflow(WorkflowVariant::TwoStep);
        wf.select_and_load(png_file(30, 60)).unwrap();

        match wf.apply(Command::Confirm).unwrap() {
            Outcome::Completed(post) => {
                assert_eq!(post.caption, None);
                assert_eq!(post.image.side, 32);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(wf.stage(), Stage::Completed);
        assert!(wf.set_caption("x").is_err());
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut wf = workflow(WorkflowVariant::TwoStep);
        wf.select_and_load(png_file(8, 8)).unwrap();
        wf.apply(Command::Confirm).unwrap();

        assert!(wf.apply(Command::Back).is_err());
        assert!(wf.apply(Command::Cancel).is_err());
        assert_eq!(wf.stage(), Stage::Completed);
    }

    #[test]
    fn test_back_from_edit_discards_source() {
        let mut wf = editing();
        wf.apply(Command::Rotate).unwrap();

        assert_eq!(wf.apply(Command::Back).unwrap().stage(), Stage::Select);
        assert!(wf.source().is_none());
        assert!(wf.transform().is_identity());

        wf.select(png_file(4, 4)).unwrap();
        assert_eq!(wf.stage(), Stage::Edit);
    }

    #[test]
    fn test_back_from_caption_reedits_original() {
        let mut wf = editing();
        wf.apply(Command::ZoomIn).unwrap();
        wf.apply(Command::Confirm).unwrap();
        wf.set_caption("draft").unwrap();

        assert_eq!(wf.apply(Command::Back).unwrap().stage(), Stage::Edit);
        assert!(wf.output().is_none());
        assert!(wf.transform().is_identity());
        assert_eq!(wf.source().unwrap().dimensions(), Some((60, 30)));

        // The draft survives a round trip through the edit step.
        wf.apply(Command::Confirm).unwrap();
        assert_eq!(wf.caption(), "draft");
    }

    #[test]
    fn test_commit_reflects_state_at_confirm() {
        let mut wf = editing();
        wf.apply(Command::Rotate).unwrap();

        let pending = wf.begin_confirm().unwrap();
        assert!(wf.is_processing());
        assert_eq!(pending.state().rotation_degrees(), 90);
        assert_eq!(pending.surface().side(), 32);

        // Transform edits are refused until the export settles.
        assert!(matches!(wf.apply(Command::Rotate), Err(WorkflowError::Busy)));
        assert!(matches!(wf.apply(Command::Back), Err(WorkflowError::Busy)));
        assert!(matches!(wf.begin_confirm(), Err(WorkflowError::Busy)));
        assert_eq!(wf.transform().rotation_degrees(), 90);

        let encoded = pending.encode();
        assert_eq!(wf.finish_confirm(encoded).unwrap().stage(), Stage::Caption);
        assert!(!wf.is_processing());
    }

    #[test]
    fn test_encode_failure_keeps_edit_step() {
        let mut wf = editing();
        let _pending = wf.begin_confirm().unwrap();

        let failed = Err(EncodeError::EncodingFailed("out of memory".to_string()));
        assert!(matches!(
            wf.finish_confirm(failed),
            Err(WorkflowError::EncodeFailure(_))
        ));
        assert_eq!(wf.stage(), Stage::Edit);
        assert!(!wf.is_processing());
        assert!(wf.output().is_none());

        // Retrying works.
        assert_eq!(wf.apply(Command::Confirm).unwrap().stage(), Stage::Caption);
    }

    #[test]
    fn test_cancel_while_processing_discards_result() {
        let mut wf = editing();
        let pending = wf.begin_confirm().unwrap();

        assert_eq!(wf.apply(Command::Cancel).unwrap().stage(), Stage::Closed);
        assert!(!wf.is_processing());

        let late = pending.encode();
        assert!(matches!(
            wf.finish_confirm(late),
            Err(WorkflowError::InvalidTransition {
                stage: Stage::Closed,
                ..
            })
        ));
        assert!(wf.output().is_none());
    }

    #[test]
    fn test_finish_without_begin_rejected() {
        let mut wf = editing();
        let result = wf.finish_confirm(Err(EncodeError::EncodingFailed("x".to_string())));
        assert!(matches!(result, Err(WorkflowError::InvalidTransition { .. })));
    }

    #[test]
    fn test_surface_failure_blocks_confirm() {
        let mut wf =
            CropWorkflow::with_rasterizer(config(WorkflowVariant::ThreeStep), Box::new(NoSurface))
                .unwrap();
        wf.select_and_load(png_file(8, 8)).unwrap();

        assert!(matches!(
            wf.apply(Command::Confirm),
            Err(WorkflowError::SurfaceUnavailable { side: 32 })
        ));
        assert_eq!(wf.stage(), Stage::Edit);
        assert!(!wf.is_processing());
    }

    #[test]
    fn test_preview_uses_preview_side() {
        let mut wf = editing();
        wf.apply(Command::ZoomOut).unwrap();

        let preview = wf.render_preview().unwrap();
        assert_eq!(preview.side(), 16);
        assert_eq!(preview.state().zoom(), 0.9);
    }

    #[test]
    fn test_caption_only_on_caption_step() {
        let mut wf = editing();
        assert!(matches!(
            wf.set_caption("too early"),
            Err(WorkflowError::InvalidTransition {
                stage: Stage::Edit,
                ..
            })
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::DecodedImage;
    use proptest::prelude::*;

    const COMMANDS: [Command; 6] = [
        Command::ZoomIn,
        Command::ZoomOut,
        Command::Rotate,
        Command::Confirm,
        Command::Back,
        Command::Cancel,
    ];

    fn editing() -> CropWorkflow {
        let mut config = CropConfig::default();
        config.output_side = 8;
        config.preview_side = 8;
        let mut wf = CropWorkflow::new(config).unwrap();
        wf.select(SelectedFile::new(Vec::new(), "image/png", "p.png"))
            .unwrap();
        // Swap in decoded pixels directly; decoding is covered elsewhere.
        wf.source = Some(SourceImage::from_decoded(
            SelectedFile::new(Vec::new(), "image/png", "p.png"),
            DecodedImage::filled(12, 6, [50, 100, 150]),
        ));
        wf
    }

    proptest! {
        /// Property: Any command sequence keeps the workflow consistent.
        #[test]
        fn prop_command_sequences_stay_consistent(
            commands in proptest::collection::vec(prop::sample::select(COMMANDS.to_vec()), 0..24),
        ) {
            let mut wf = editing();

            for command in commands {
                let _ = wf.apply(command);

                let state = wf.transform();
                prop_assert!(!wf.is_processing());
                prop_assert!((0.5..=3.0).contains(&state.zoom()));
                prop_assert!(state.rotation_degrees() % 90 == 0 && state.rotation_degrees() < 360);
                prop_assert_eq!(wf.output().is_some(), wf.stage() == Stage::Caption);
                prop_assert_eq!(
                    wf.source().is_some(),
                    matches!(wf.stage(), Stage::Edit | Stage::Caption)
                );
            }
        }

        /// Property: Once closed, nothing but cancel succeeds.
        #[test]
        fn prop_closed_is_terminal(
            commands in proptest::collection::vec(prop::sample::select(COMMANDS.to_vec()), 1..12),
        ) {
            let mut wf = editing();
            wf.apply(Command::Cancel).unwrap();

            for command in commands {
                let result = wf.apply(command);
                prop_assert_eq!(result.is_ok(), command == Command::Cancel);
                prop_assert_eq!(wf.stage(), Stage::Closed);
            }
        }
    }
}
