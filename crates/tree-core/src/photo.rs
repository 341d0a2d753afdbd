//! Photo assets, placeholder fallback, and the framed-card geometry each
//! photo sizes from its image's aspect ratio.

use glam::Vec2;

use crate::constants::{
    FRAME_BOTTOM_MARGIN, FRAME_MAX_SIDE, FRAME_SIDE_MARGIN, PHOTO_DEFAULT_COUNT, PHOTO_LIMIT,
};

/// Load progress reported by whoever fetches and decodes the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetState {
    #[default]
    Pending,
    Ready {
        width: u32,
        height: u32,
    },
    Failed,
}

/// An image reference supplied by the upload collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoAsset {
    pub source: String,
    pub state: AssetState,
}

impl PhotoAsset {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: AssetState::Pending,
        }
    }

    /// Width over height once the image is known; `None` until then.
    pub fn aspect(&self) -> Option<f32> {
        match self.state {
            AssetState::Ready { width, height } if width > 0 && height > 0 => {
                Some(width as f32 / height as f32)
            }
            _ => None,
        }
    }
}

/// A built-in card shown when an image is missing, loading, or broken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceholderDesign {
    pub name: &'static str,
    pub aspect: f32,
    pub accent: [f32; 3],
}

pub const PLACEHOLDERS: [PlaceholderDesign; 4] = [
    PlaceholderDesign {
        name: "snowflake",
        aspect: 1.0,
        accent: [0.75, 0.85, 1.0],
    },
    PlaceholderDesign {
        name: "gift",
        aspect: 4.0 / 3.0,
        accent: [0.85, 0.15, 0.2],
    },
    PlaceholderDesign {
        name: "bell",
        aspect: 3.0 / 4.0,
        accent: [0.95, 0.78, 0.3],
    },
    PlaceholderDesign {
        name: "holly",
        aspect: 1.0,
        accent: [0.15, 0.55, 0.25],
    },
];

/// Placeholder used by the photo at `index`; stable for the photo's lifetime.
#[inline]
pub fn placeholder_index(index: usize) -> usize {
    index % PLACEHOLDERS.len()
}

/// What a photo object currently shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhotoContent {
    Image { aspect: f32 },
    Placeholder(usize),
}

impl PhotoContent {
    pub fn resolve(index: usize, asset: Option<&PhotoAsset>) -> Self {
        match asset.and_then(PhotoAsset::aspect) {
            Some(aspect) => PhotoContent::Image { aspect },
            None => PhotoContent::Placeholder(placeholder_index(index)),
        }
    }

    pub fn aspect(&self) -> f32 {
        match *self {
            PhotoContent::Image { aspect } => aspect,
            PhotoContent::Placeholder(i) => PLACEHOLDERS[i].aspect,
        }
    }
}

/// Number of photo objects for a supplied asset list.
#[inline]
pub fn photo_population_size(asset_count: usize) -> usize {
    if asset_count == 0 {
        PHOTO_DEFAULT_COUNT
    } else {
        asset_count.min(PHOTO_LIMIT)
    }
}

/// Card geometry in object-local units, centered on the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoFrame {
    pub frame_size: Vec2,
    pub photo_size: Vec2,
    /// Center of the photo area relative to the frame center.
    pub photo_offset: Vec2,
    pub caption_height: f32,
}

/// Size a frame so its longest side fits [`FRAME_MAX_SIDE`] while keeping the
/// side and bottom margins fixed.
pub fn frame_geometry(aspect: f32) -> PhotoFrame {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let max_w = FRAME_MAX_SIDE - 2.0 * FRAME_SIDE_MARGIN;
    let max_h = FRAME_MAX_SIDE - FRAME_SIDE_MARGIN - FRAME_BOTTOM_MARGIN;
    let photo_w = max_w.min(max_h * aspect);
    let photo_size = Vec2::new(photo_w, photo_w / aspect);
    let frame_size = Vec2::new(
        photo_size.x + 2.0 * FRAME_SIDE_MARGIN,
        photo_size.y + FRAME_SIDE_MARGIN + FRAME_BOTTOM_MARGIN,
    );
    // top edge of the photo sits one side margin below the top of the frame
    let photo_center_y = frame_size.y * 0.5 - FRAME_SIDE_MARGIN - photo_size.y * 0.5;
    PhotoFrame {
        frame_size,
        photo_size,
        photo_offset: Vec2::new(0.0, photo_center_y),
        caption_height: FRAME_BOTTOM_MARGIN,
    }
}
