//! Crop session bindings.
//!
//! [`JsCropSession`] wraps one [`CropWorkflow`] for the crop dialog. The page
//! forwards button presses as commands and reads the stage back to decide
//! what to render.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropSession } from '@spotcrop/wasm';
//!
//! const session = new JsCropSession({ outputSide: 1080, variant: 'threeStep' }, undefined);
//! session.select_image(bytes, file.type, file.name);
//! session.apply('zoomIn');
//! img.style.transform = session.css_transform;
//!
//! session.begin_confirm();
//! await new Promise(requestAnimationFrame); // let the spinner paint
//! session.finish_confirm();                 // -> 'caption'
//!
//! session.set_caption('Best dumplings in town');
//! const post = session.submit();
//! ```

use spotcrop_core::workflow::PendingCommit;
use spotcrop_core::{
    Command, CompletedPost, ConfigError, CropConfig, CropWorkflow, Outcome, SelectedFile, Stage,
    WorkflowError,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsCompletedPost, JsDecodedImage, JsOutputImage};

/// One crop dialog, driven from JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    workflow: CropWorkflow,
    pending: Option<PendingCommit>,
    completed: Option<CompletedPost>,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session. `config` is a partial `CropConfig` object; missing
    /// fields (or `undefined`) fall back to the defaults. Pass
    /// `existing_caption` when editing a post that already has one.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        existing_caption: Option<String>,
    ) -> Result<JsCropSession, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Self::from_config(config, existing_caption)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current stage name: `select`, `edit`, `caption`, `completed` or `closed`.
    #[wasm_bindgen(getter)]
    pub fn stage(&self) -> String {
        self.workflow.stage().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.workflow.transform().zoom()
    }

    /// Rotation in degrees, one of 0, 90, 180, 270.
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.workflow.transform().rotation_degrees()
    }

    /// CSS `transform` value for the live preview image.
    #[wasm_bindgen(getter)]
    pub fn css_transform(&self) -> String {
        self.workflow.css_transform()
    }

    /// True while an export is in flight; disable the controls.
    #[wasm_bindgen(getter)]
    pub fn is_processing(&self) -> bool {
        self.workflow.is_processing()
    }

    #[wasm_bindgen(getter)]
    pub fn caption(&self) -> String {
        self.workflow.caption().to_string()
    }

    /// Hand the picked file to the session and decode it.
    pub fn select_image(
        &mut self,
        bytes: Vec<u8>,
        mime_type: String,
        file_name: String,
    ) -> Result<(), JsValue> {
        self.select_file(SelectedFile::new(bytes, mime_type, file_name))
            .map_err(rejected)
    }

    /// Apply a command by name (`zoomIn`, `zoomOut`, `rotate`, `confirm`,
    /// `back`, `cancel`). Returns the new stage name.
    pub fn apply(&mut self, command: &str) -> Result<String, JsValue> {
        let command = Command::parse(command)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown command: {command}")))?;
        self.run(command).map(|stage| stage.to_string()).map_err(rejected)
    }

    /// Rasterize the current transform and start exporting. Call
    /// `finish_confirm` once the UI has shown its busy state.
    pub fn begin_confirm(&mut self) -> Result<(), JsValue> {
        self.begin().map_err(rejected)
    }

    /// Encode the surface captured by `begin_confirm`. Returns the new stage.
    pub fn finish_confirm(&mut self) -> Result<String, JsValue> {
        self.finish().map(|stage| stage.to_string()).map_err(rejected)
    }

    pub fn set_caption(&mut self, text: String) -> Result<(), JsValue> {
        self.workflow.set_caption(text).map_err(rejected)
    }

    /// Submit the caption and take the finished post.
    pub fn submit(&mut self) -> Result<JsCompletedPost, JsValue> {
        self.workflow.submit().map(JsCompletedPost::from).map_err(rejected)
    }

    /// The post completed by a two-step confirm, if not yet taken.
    pub fn take_completed(&mut self) -> Option<JsCompletedPost> {
        self.completed.take().map(JsCompletedPost::from)
    }

    /// The exported image while on the caption step.
    pub fn output(&self) -> Option<JsOutputImage> {
        self.workflow.output().cloned().map(JsOutputImage::from)
    }

    /// Render the current transform at the preview side.
    pub fn preview(&self) -> Result<JsDecodedImage, JsValue> {
        self.workflow
            .render_preview()
            .map(|surface| JsDecodedImage::from_decoded(surface.into_image()))
            .map_err(rejected)
    }
}

impl JsCropSession {
    pub(crate) fn from_config(
        config: CropConfig,
        existing_caption: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut workflow = CropWorkflow::new(config)?;
        if let Some(caption) = existing_caption {
            workflow = workflow.with_existing_caption(caption);
        }
        Ok(Self {
            workflow,
            pending: None,
            completed: None,
        })
    }

    fn select_file(&mut self, file: SelectedFile) -> Result<(), WorkflowError> {
        self.workflow.select_and_load(file)
    }

    fn run(&mut self, command: Command) -> Result<Stage, WorkflowError> {
        if command == Command::Cancel {
            self.pending = None;
        }
        let outcome = self.workflow.apply(command)?;
        Ok(self.settle(outcome))
    }

    fn begin(&mut self) -> Result<(), WorkflowError> {
        let pending = self.workflow.begin_confirm()?;
        self.pending = Some(pending);
        Ok(())
    }

    fn finish(&mut self) -> Result<Stage, WorkflowError> {
        let Some(pending) = self.pending.take() else {
            return Err(WorkflowError::InvalidTransition {
                stage: self.workflow.stage(),
                action: "finish confirming",
            });
        };
        let outcome = self.workflow.finish_confirm(pending.encode())?;
        Ok(self.settle(outcome))
    }

    fn settle(&mut self, outcome: Outcome) -> Stage {
        let stage = outcome.stage();
        if let Outcome::Completed(post) = outcome {
            self.completed = Some(post);
        }
        stage
    }
}

/// Report a rejected action on the browser console and convert it for JS.
fn rejected(err: WorkflowError) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
