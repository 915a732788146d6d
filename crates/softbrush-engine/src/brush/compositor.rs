use crate::paint::Color;
use crate::raster::{AlphaSurface, CompositeOp, Context, RasterTarget};

/// Clears the preview and paints `color` through the whole `mask`.
///
/// Mask coverage `a` yields `color` scaled by `a`; a saturated mask pixel
/// yields `color` itself. The preview's drawing state is unchanged afterwards.
pub fn composite_preview<S: RasterTarget>(preview: &mut Context<S>, mask: &AlphaSurface, color: Color) {
    preview.clear();

    let mut g = preview.save();
    g.set_source_color(color);
    g.set_operator(CompositeOp::Over);
    g.mask_surface(mask, (0, 0));
}
