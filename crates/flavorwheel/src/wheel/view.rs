use super::interaction::RadialSelector;
use super::model::{Ring, Segment, WheelConfiguration};
use super::selection::{Label, Selection};
use super::theme::{WheelTheme, tint};
use super::{
    CATEGORY_FONT_SIZE, CATEGORY_IDLE_ALPHA, FONT_FACE, HUB_CAPTION, HUB_FONT_SIZE,
    INNER_LINE_WIDTH, LABEL_MIN_SPAN, OUTER_LINE_WIDTH, SUB_LABEL_FONT_SIZE,
    SUB_LABEL_IDLE_ALPHA,
};
use crate::geometry::{Point, WheelGeometry};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caption {
    pub position: Point,
    pub font_size: f64,
    pub bold: bool,
}

/// One annular sector ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShape<'a> {
    pub segment: Segment,
    pub label: &'a Label,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill: Srgba<f64>,
    pub line_width: f64,
    pub caption: Option<Caption>,
}

impl SegmentShape<'_> {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout<'a> {
    pub geometry: WheelGeometry,
    pub segments: Vec<SegmentShape<'a>>,
}

impl<'a> WheelLayout<'a> {
    /// Everything the painter needs, derived only from its inputs. Outer sectors
    /// come first for each category, followed by that category's sub-sectors.
    pub fn compute(
        config: &'a WheelConfiguration,
        geometry: &WheelGeometry,
        selected: &Selection,
        hovered: Option<&Label>,
    ) -> Self {
        let highlighted = |label: &Label| selected.contains(label) || hovered == Some(label);
        let span = config.sector_span();
        let mut segments = Vec::new();

        for (sector, category) in config.categories().iter().enumerate() {
            let start = config.sector_start(sector);
            let end = start + span;
            let alpha = if highlighted(&category.name) {
                1.0
            } else {
                CATEGORY_IDLE_ALPHA
            };

            segments.push(SegmentShape {
                segment: Segment::Category { sector },
                label: &category.name,
                start_angle: start,
                end_angle: end,
                inner_radius: geometry.inner_radius,
                outer_radius: geometry.outer_radius,
                fill: tint(category.color, alpha),
                line_width: OUTER_LINE_WIDTH,
                caption: Some(Caption {
                    position: geometry.point_at(geometry.outer_label_radius(), start + span / 2.0),
                    font_size: CATEGORY_FONT_SIZE,
                    bold: true,
                }),
            });

            let sub_span = config.sub_span(sector);
            let legible = is_legible(sub_span);

            for (index, sub_label) in category.sub_labels.iter().enumerate() {
                let sub_start = start + index as f64 * sub_span;
                let alpha = if highlighted(sub_label) {
                    1.0
                } else {
                    SUB_LABEL_IDLE_ALPHA
                };

                segments.push(SegmentShape {
                    segment: Segment::SubLabel { sector, index },
                    label: sub_label,
                    start_angle: sub_start,
                    end_angle: sub_start + sub_span,
                    inner_radius: geometry.hub_radius,
                    outer_radius: geometry.inner_radius,
                    fill: tint(category.color, alpha),
                    line_width: INNER_LINE_WIDTH,
                    caption: legible.then(|| Caption {
                        position: geometry
                            .point_at(geometry.inner_label_radius(), sub_start + sub_span / 2.0),
                        font_size: SUB_LABEL_FONT_SIZE,
                        bold: false,
                    }),
                });
            }
        }

        Self {
            geometry: *geometry,
            segments,
        }
    }

    pub fn ring(&self, ring: Ring) -> impl Iterator<Item = &SegmentShape<'a>> {
        self.segments.iter().filter(move |s| s.segment.ring() == ring)
    }
}

/// Whether a sub-sector of `span` radians is wide enough to carry its caption.
pub fn is_legible(span: f64) -> bool {
    span >= LABEL_MIN_SPAN
}

struct SegmentRenderer<'s, 'a> {
    shape: &'s SegmentShape<'a>,
    center: Point,
}

impl<'s, 'a> SegmentRenderer<'s, 'a> {
    fn new(shape: &'s SegmentShape<'a>, center: Point) -> Self {
        Self { shape, center }
    }

    fn draw(&self, cr: &Context, theme: &WheelTheme) -> Result<(), cairo::Error> {
        self.draw_sector(cr, theme)?;
        if let Some(caption) = &self.shape.caption {
            draw_text(cr, self.shape.label, caption, theme.text)?;
        }
        Ok(())
    }

    fn draw_sector(&self, cr: &Context, theme: &WheelTheme) -> Result<(), cairo::Error> {
        let shape = self.shape;
        cr.new_path();
        cr.arc(
            self.center.x,
            self.center.y,
            shape.outer_radius,
            shape.start_angle,
            shape.end_angle,
        );
        cr.arc_negative(
            self.center.x,
            self.center.y,
            shape.inner_radius,
            shape.end_angle,
            shape.start_angle,
        );
        cr.close_path();

        set_source(cr, shape.fill);
        cr.fill_preserve()?;

        set_source(cr, theme.border);
        cr.set_line_width(shape.line_width);
        cr.stroke()
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_text(
    cr: &Context,
    text: &str,
    caption: &Caption,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_source(cr, color);
    let weight = if caption.bold {
        cairo::FontWeight::Bold
    } else {
        cairo::FontWeight::Normal
    };
    cr.select_font_face(FONT_FACE, cairo::FontSlant::Normal, weight);
    cr.set_font_size(caption.font_size);

    // centered on both axes
    let ext = cr.text_extents(text)?;
    cr.move_to(
        caption.position.x - (ext.width() / 2.0 + ext.x_bearing()),
        caption.position.y - (ext.height() / 2.0 + ext.y_bearing()),
    );
    cr.show_text(text)
}

fn draw_hub(cr: &Context, geometry: &WheelGeometry, theme: &WheelTheme) -> Result<(), cairo::Error> {
    let center = geometry.center;
    cr.new_path();
    cr.arc(center.x, center.y, geometry.hub_radius, 0.0, TAU);

    set_source(cr, theme.hub_fill);
    cr.fill_preserve()?;

    set_source(cr, theme.hub_border);
    cr.set_line_width(OUTER_LINE_WIDTH);
    cr.stroke()?;

    let caption = Caption {
        position: center,
        font_size: HUB_FONT_SIZE,
        bold: true,
    };
    draw_text(cr, HUB_CAPTION, &caption, theme.hub_text)
}

pub fn draw_layout(
    cr: &Context,
    layout: &WheelLayout<'_>,
    theme: &WheelTheme,
) -> Result<(), cairo::Error> {
    for shape in &layout.segments {
        SegmentRenderer::new(shape, layout.geometry.center).draw(cr, theme)?;
    }
    draw_hub(cr, &layout.geometry, theme)
}

/// Paints the wheel for the caller's current selection. The surface is expected to
/// be cleared (or freshly allocated) by the host.
pub fn draw(
    cr: &Context,
    wheel: &RadialSelector,
    selected: &Selection,
    theme: &WheelTheme,
) -> Result<(), cairo::Error> {
    for unknown in selected.iter().filter(|l| wheel.config.find(l).is_none()) {
        log::trace!("Ignoring selected label not on the wheel: {}", unknown);
    }

    let layout = WheelLayout::compute(&wheel.config, &wheel.geometry, selected, wheel.hovered());
    draw_layout(cr, &layout, theme)
}
