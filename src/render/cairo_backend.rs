use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::{FontDescription, Weight};
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ScatterError, ScatterResult};
use crate::render::{
    Attr, AttrValue, Color, ElementId, ElementKind, RetainedScene, SceneBatch, SceneElement,
    StyleTag, Surface, SurfaceStyle, TextAnchor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub circles_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
    pub tooltips_drawn: usize,
}

/// Optional extension trait for surfaces that can paint into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextSurface {
    fn draw_on_cairo_context(&mut self, context: &Context) -> ScatterResult<CairoRenderStats>;
}

/// Cairo + Pango + PangoCairo surface.
///
/// Batches are retained exactly like [`crate::render::RetainedSurface`];
/// pixels are only produced when [`CairoSurface::draw`] runs, using whatever
/// values the transitions have reached at that point.
#[derive(Debug)]
pub struct CairoSurface {
    scene: RetainedScene,
    surface: ImageSurface,
    style: SurfaceStyle,
    last_stats: CairoRenderStats,
}

#[derive(Debug, Clone, Copy)]
struct Inherited {
    font_size_px: f64,
    anchor: TextAnchor,
    alpha: f64,
}

impl CairoSurface {
    pub fn new(canvas: Viewport, style: SurfaceStyle) -> ScatterResult<Self> {
        if !canvas.is_valid() {
            return Err(ScatterError::InvalidViewport {
                width: canvas.width,
                height: canvas.height,
            });
        }
        style.validate()?;

        let width = i32::try_from(canvas.width)
            .map_err(|_| ScatterError::Backend("canvas width exceeds i32".to_owned()))?;
        let height = i32::try_from(canvas.height)
            .map_err(|_| ScatterError::Backend("canvas height exceeds i32".to_owned()))?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;

        Ok(Self {
            scene: RetainedScene::new(),
            surface,
            style,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn scene(&self) -> &RetainedScene {
        &self.scene
    }

    #[must_use]
    pub fn image(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn style(&self) -> SurfaceStyle {
        self.style
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        self.scene.advance(elapsed_ms);
    }

    pub fn settle(&mut self) {
        self.scene.settle();
    }

    /// Paints the current scene onto the offscreen image.
    pub fn draw(&mut self) -> ScatterResult<CairoRenderStats> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.draw_with_context(&context)
    }

    pub fn write_png(&mut self, path: impl AsRef<Path>) -> ScatterResult<()> {
        let path = path.as_ref();
        self.surface.flush();
        let mut file = File::create(path).map_err(|source| ScatterError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            ScatterError::Backend(format!("failed to write png {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "wrote png");
        Ok(())
    }

    fn draw_with_context(&mut self, context: &Context) -> ScatterResult<CairoRenderStats> {
        apply_color(context, self.style.background, 1.0);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let inherited = Inherited {
            font_size_px: self.style.default_font_size_px,
            anchor: TextAnchor::Start,
            alpha: 1.0,
        };
        let mut stats = CairoRenderStats::default();
        for child in self.scene.children(ElementId::ROOT) {
            draw_element(context, &self.scene, &self.style, *child, inherited, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(stats)
    }
}

impl Surface for CairoSurface {
    fn apply(&mut self, batch: &SceneBatch) -> ScatterResult<()> {
        batch.validate()?;
        self.scene.apply(batch)
    }
}

impl CairoContextSurface for CairoSurface {
    fn draw_on_cairo_context(&mut self, context: &Context) -> ScatterResult<CairoRenderStats> {
        self.draw_with_context(context)
    }
}

fn draw_element(
    context: &Context,
    scene: &RetainedScene,
    style: &SurfaceStyle,
    id: ElementId,
    inherited: Inherited,
    stats: &mut CairoRenderStats,
) -> ScatterResult<()> {
    let Some(element) = scene.element(id) else {
        return Ok(());
    };
    let inherited = Inherited {
        font_size_px: element
            .number(Attr::FontSize)
            .unwrap_or(inherited.font_size_px),
        anchor: match element.attr(Attr::TextAnchor) {
            Some(AttrValue::Anchor(anchor)) => anchor,
            _ => inherited.anchor,
        },
        alpha: inherited.alpha * element.number(Attr::Opacity).unwrap_or(1.0).clamp(0.0, 1.0),
    };
    if inherited.alpha <= 0.0 {
        return Ok(());
    }

    match element.kind() {
        ElementKind::Group => {
            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            match element.attr(Attr::Transform) {
                Some(AttrValue::Translate { x, y }) => context.translate(x, y),
                Some(AttrValue::Rotate(degrees)) => context.rotate(degrees.to_radians()),
                _ => {}
            }
            for child in element.children() {
                draw_element(context, scene, style, *child, inherited, stats)?;
            }
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
        }
        ElementKind::Circle => {
            let cx = element.number(Attr::Cx).unwrap_or(0.0);
            let cy = element.number(Attr::Cy).unwrap_or(0.0);
            let r = element.number(Attr::R).unwrap_or(0.0);
            context.new_sub_path();
            context.arc(cx, cy, r, 0.0, TAU);
            apply_color(context, style.state_circle_fill, inherited.alpha);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            apply_color(context, style.state_circle_stroke, inherited.alpha);
            context.set_line_width(1.0);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke circle", err))?;
            stats.circles_drawn += 1;
        }
        ElementKind::Line => {
            apply_color(context, style.axis_line, inherited.alpha);
            context.set_line_width(1.0);
            context.move_to(
                element.number(Attr::X1).unwrap_or(0.0),
                element.number(Attr::Y1).unwrap_or(0.0),
            );
            context.line_to(
                element.number(Attr::X2).unwrap_or(0.0),
                element.number(Attr::Y2).unwrap_or(0.0),
            );
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        ElementKind::Text => {
            draw_text(context, style, element, inherited);
            stats.texts_drawn += 1;
        }
        ElementKind::Tooltip => {
            draw_tooltip(context, style, element, inherited.alpha)?;
            stats.tooltips_drawn += 1;
        }
    }
    Ok(())
}

fn draw_text(context: &Context, style: &SurfaceStyle, element: &SceneElement, inherited: Inherited) {
    let Some(text) = element.text() else {
        return;
    };
    let (color, weight) = if element.has_tag(StyleTag::Active) {
        (style.caption_active, Weight::Bold)
    } else if element.has_tag(StyleTag::Inactive) {
        (style.caption_inactive, Weight::Normal)
    } else if element.has_tag(StyleTag::StateText) {
        (style.state_text, Weight::Bold)
    } else {
        (style.axis_text, Weight::Normal)
    };

    let layout = pangocairo::functions::create_layout(context);
    let mut font_description =
        FontDescription::from_string(&format!("Sans {}px", inherited.font_size_px));
    font_description.set_weight(weight);
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);

    let (text_width, _) = layout.pixel_size();
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let x = element.number(Attr::X).unwrap_or(0.0);
    let y = element.number(Attr::Y).unwrap_or(0.0) + element.number(Attr::Dy).unwrap_or(0.0);
    let x = match inherited.anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - f64::from(text_width) / 2.0,
        TextAnchor::End => x - f64::from(text_width),
    };

    apply_color(context, color, inherited.alpha);
    context.move_to(x, y - baseline);
    pangocairo::functions::show_layout(context, &layout);
}

fn draw_tooltip(
    context: &Context,
    style: &SurfaceStyle,
    element: &SceneElement,
    alpha: f64,
) -> ScatterResult<()> {
    let Some(text) = element.text() else {
        return Ok(());
    };
    let layout = pangocairo::functions::create_layout(context);
    let font_description =
        FontDescription::from_string(&format!("Sans {}px", style.tooltip_font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_alignment(pango::Alignment::Center);
    layout.set_text(text);

    let (width, height) = layout.pixel_size();
    let padding = style.tooltip_padding_px;
    let width = f64::from(width) + padding * 2.0;
    let height = f64::from(height) + padding * 2.0;
    let x = element.number(Attr::X).unwrap_or(0.0);
    let y = element.number(Attr::Y).unwrap_or(0.0);

    apply_color(context, style.tooltip_background, alpha);
    context.rectangle(x, y, width, height);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill tooltip", err))?;

    apply_color(context, style.tooltip_text, alpha);
    context.move_to(x + padding, y + padding);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

fn apply_color(context: &Context, color: Color, alpha: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ScatterError {
    ScatterError::Backend(format!("{prefix}: {err}"))
}
