use crate::{
    assets::fonts::FontBook,
    compose::compiler::compose_plan,
    compose::plan::ThumbnailPlan,
    foundation::error::ThumbResult,
    params::model::RenderParams,
    render::canvas::ThumbCanvas,
    render::cpu::CpuRasterizer,
    text::shaper::TextShaper,
};

/// Turns [`RenderParams`] into pixels: compose a plan, then rasterize it.
///
/// Holds the shaped fonts and raster caches; reuse one renderer across renders.
pub struct Renderer {
    shaper: TextShaper,
    raster: CpuRasterizer,
}

impl Renderer {
    pub fn new(fonts: &FontBook) -> ThumbResult<Self> {
        Ok(Self {
            shaper: TextShaper::new(fonts)?,
            raster: CpuRasterizer::new(),
        })
    }

    /// Renderer over the installed system fonts.
    pub fn from_system_fonts() -> ThumbResult<Self> {
        Self::new(&FontBook::from_system()?)
    }

    /// Layout only, measured with the real faces.
    pub fn plan(&mut self, params: &RenderParams) -> ThumbnailPlan {
        compose_plan(params, &mut self.shaper)
    }

    /// Full repaint of `canvas` from `params`.
    ///
    /// The canvas is resized to the platform preset and cleared first, so nothing from a
    /// previous render survives.
    #[tracing::instrument(skip_all, fields(platform = %params.platform.id, style = %params.style))]
    pub fn render(&mut self, canvas: &mut ThumbCanvas, params: &RenderParams) -> ThumbResult<()> {
        params.validate()?;
        canvas.reset(params.size())?;
        let plan = self.plan(params);
        self.raster.rasterize(&plan, canvas, &mut self.shaper)?;
        tracing::debug!(size = %plan.size, "rendered thumbnail");
        Ok(())
    }

    /// Render into a fresh canvas.
    pub fn render_new(&mut self, params: &RenderParams) -> ThumbResult<ThumbCanvas> {
        let mut canvas = ThumbCanvas::new(params.size())?;
        self.render(&mut canvas, params)?;
        Ok(canvas)
    }
}
