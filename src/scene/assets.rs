//! Background asset resolution.
//!
//! Textures, meshes and sounds are resolved off the frame thread and reported
//! back through a channel that the engine polls once per tick. A missing file
//! only leaves its proxy without a visual; the timeline never waits on
//! assets.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use super::{PropId, Stage};
use crate::audio::Cue;
use crate::character::CharacterId;
use crate::error::CutsceneError;

/// What kind of file an asset is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Image applied to a surface or skin.
    Texture,
    /// Mesh file.
    Mesh,
    /// Sound clip.
    Sound,
}

/// Where a resolved asset gets attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSlot {
    /// Texture of a prop.
    Prop(PropId),
    /// Skin of a character.
    Skin(CharacterId),
    /// Mesh held in a character's right hand.
    HeldItem(CharacterId),
    /// Sound behind an audio cue.
    Sound(Cue),
}

/// One asset to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Path relative to the asset root.
    pub path: String,
    /// File kind.
    pub kind: AssetKind,
    /// Attachment slot.
    pub slot: AssetSlot,
}

/// Result of resolving one request.
#[derive(Debug)]
pub struct AssetReport {
    /// The request.
    pub request: AssetRequest,
    /// File size in bytes, or why it could not be read.
    pub outcome: Result<u64, String>,
}

/// Everything a scene needs loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    requests: Vec<AssetRequest>,
}

impl AssetManifest {
    /// Empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request.
    pub fn request(
        &mut self,
        path: impl Into<String>,
        kind: AssetKind,
        slot: AssetSlot,
    ) {
        self.requests.push(AssetRequest {
            path: path.into(),
            kind,
            slot,
        });
    }

    /// Requests for every texture and mesh the stage references, plus the
    /// audio cues.
    #[must_use]
    pub fn for_stage(stage: &Stage) -> Self {
        let mut manifest = Self::new();
        for (id, prop) in stage.props() {
            if let Some(texture) = &prop.texture {
                manifest.request(
                    texture.clone(),
                    AssetKind::Texture,
                    AssetSlot::Prop(id),
                );
            }
        }
        for (id, character) in stage.characters() {
            if let Some(skin) = &character.skin {
                manifest.request(
                    skin.clone(),
                    AssetKind::Texture,
                    AssetSlot::Skin(id),
                );
            }
            if let Some(item) = &character.held_item {
                manifest.request(
                    item.clone(),
                    AssetKind::Mesh,
                    AssetSlot::HeldItem(id),
                );
            }
        }
        for cue in Cue::ALL {
            manifest.request(
                cue.asset_path(),
                AssetKind::Sound,
                AssetSlot::Sound(cue),
            );
        }
        manifest
    }

    /// The requests.
    #[must_use]
    pub fn requests(&self) -> &[AssetRequest] {
        &self.requests
    }

    /// Number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// No requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

fn resolve(root: &Path, request: &AssetRequest) -> Result<u64, String> {
    let path = root.join(&request.path);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        Ok(_) => Err(format!("{} is not a file", path.display())),
        Err(e) => Err(format!("{}: {e}", path.display())),
    }
}

/// Resolves a manifest on a background thread.
pub struct AssetLoader {
    report_rx: mpsc::Receiver<AssetReport>,
    thread: Option<std::thread::JoinHandle<()>>,
    pending: usize,
}

impl AssetLoader {
    /// Spawn the loader thread.
    ///
    /// # Errors
    ///
    /// Returns [`CutsceneError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn(
        root: PathBuf,
        manifest: AssetManifest,
    ) -> Result<Self, CutsceneError> {
        let (report_tx, report_rx) = mpsc::channel();
        let pending = manifest.len();

        let thread = std::thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                for request in manifest.requests {
                    let outcome = resolve(&root, &request);
                    if report_tx.send(AssetReport { request, outcome }).is_err()
                    {
                        break;
                    }
                }
            })
            .map_err(CutsceneError::ThreadSpawn)?;

        Ok(Self {
            report_rx,
            thread: Some(thread),
            pending,
        })
    }

    /// Non-blocking drain of finished reports.
    pub fn poll(&mut self) -> Vec<AssetReport> {
        let reports: Vec<AssetReport> = self.report_rx.try_iter().collect();
        self.pending = self.pending.saturating_sub(reports.len());
        if self.pending == 0 {
            if let Some(handle) = self.thread.take() {
                let _ = handle.join();
            }
        }
        reports
    }

    /// Requests not yet reported.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Attach a resolved asset to the stage, logging failures.
pub fn attach(stage: &mut Stage, report: &AssetReport) {
    let loaded = match &report.outcome {
        Ok(bytes) => {
            log::debug!("asset {} ({bytes} bytes)", report.request.path);
            true
        }
        Err(reason) => {
            log::warn!("asset {} failed to load: {reason}", report.request.path);
            false
        }
    };
    match report.request.slot {
        AssetSlot::Prop(id) => {
            if let Some(prop) = stage.prop_mut(id) {
                prop.visual_loaded = loaded;
            }
        }
        AssetSlot::Skin(id) => {
            if let Some(c) = stage.character_mut(id) {
                c.visual_loaded = loaded;
            }
        }
        AssetSlot::HeldItem(_) | AssetSlot::Sound(_) => {}
    }
}
