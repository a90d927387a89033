//! Thumbforge composes platform-sized thumbnails: a cover-fitted background, a style
//! overlay, a greedily wrapped and stroked title, an optional subtitle, and PNG export.
//!
//! Rendering runs in two stages:
//!
//! - [`compose_plan`] lays out a [`ThumbnailPlan`] from [`RenderParams`] and a [`TextMeasure`]
//! - [`Renderer`] rasterizes the plan into a [`ThumbCanvas`] with `vello_cpu`
//!
//! [`encode_png`] / [`save_png`] serialize the finished canvas.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod config;
mod export;
mod foundation;
mod params;
mod platform;
mod render;
mod text;

pub use crate::foundation::color::parse_color;
pub use crate::foundation::core::{Point, Rect, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{ThumbError, ThumbResult};

pub use crate::assets::decode::{
    Bitmap, MAX_IMAGE_SIDE, decode_background, decode_image, load_background,
};
pub use crate::assets::fonts::{FontBook, FontFace, PREFERRED_FAMILIES};
pub use crate::assets::loader::{BackgroundLoader, LoadState};
pub use crate::compose::compiler::compose_plan;
pub use crate::compose::cover::{CoverPlacement, cover_fit};
pub use crate::compose::plan::{
    DrawOp, RectRole, TextOp, TextShadow, TextStroke, ThumbnailPlan,
};
pub use crate::config::file::{Defaults, FontPaths, PlatformEntry, ThumbConfig};
pub use crate::export::png::{encode_png, export_file_name, png_data_uri, save_png};
pub use crate::params::model::{
    DEFAULT_BACKGROUND, PLACEHOLDER_TITLE, RenderParams, Style, StyleSelection,
};
pub use crate::platform::table::{DEFAULT_TITLE_SCALE, PlatformSpec, PlatformTable, SizePreset};
pub use crate::render::blur::{blur_rgba8_premul, radius_for_sigma};
pub use crate::render::canvas::ThumbCanvas;
pub use crate::render::composite::{PremulRgba8, over, over_in_place};
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::renderer::Renderer;
pub use crate::text::shaper::{FixedAdvance, FontRole, TextMeasure, TextShaper};
pub use crate::text::wrap::wrap_words;
