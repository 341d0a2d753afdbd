use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tree_core::AssetState;

/// Image dimensions read from the file header; pixels are never decoded.
fn probe(path: &Path) -> AssetState {
    match image::image_dimensions(path) {
        Ok((width, height)) if width > 0 && height > 0 => AssetState::Ready { width, height },
        Ok(_) => {
            log::warn!("[assets] {} has no pixels, using placeholder", path.display());
            AssetState::Failed
        }
        Err(e) => {
            log::warn!("[assets] {} unreadable ({e}), using placeholder", path.display());
            AssetState::Failed
        }
    }
}

/// Probe every photo on a worker thread; results arrive whenever they are
/// ready and the frame loop drains them without waiting.
pub fn spawn_probe(paths: Vec<PathBuf>) -> Receiver<(usize, AssetState)> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("photo-probe".into())
        .spawn(move || {
            for (index, path) in paths.iter().enumerate() {
                if tx.send((index, probe(path))).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        log::error!("[assets] probe thread failed to start: {e}");
    }
    rx
}
