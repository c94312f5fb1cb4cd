mod primitives;
mod retained;
mod scene;

pub use primitives::{Color, SurfaceStyle};
pub use retained::{RetainedScene, RetainedSurface, SceneElement};
pub use scene::{
    Attr, AttrList, AttrValue, ElementId, ElementIdAllocator, ElementKind, PointerEventKind,
    SceneBatch, SceneCommand, StyleTag, TextAnchor,
};

use crate::error::ScatterResult;

/// Contract implemented by any drawing surface.
///
/// Surfaces receive validated, ordered scene batches so chart logic never
/// touches backend-specific drawing APIs.
pub trait Surface {
    fn apply(&mut self, batch: &SceneBatch) -> ScatterResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextSurface, CairoRenderStats, CairoSurface};
