use flavorwheel::wheel::WheelTheme;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Wheel colors from the toolkit theme. Segment gaps take the view background so
/// they read as gaps on both light and dark themes; the hub colors can be set from
/// a user stylesheet with `@define-color teawise_hub_fill ...` and friends.
pub fn wheel_theme(context: &gtk::StyleContext) -> WheelTheme {
    let fallback = WheelTheme::default();
    WheelTheme {
        border: lookup_color(context, "theme_base_color", fallback.border, Some(1.0)),
        text: lookup_color(context, "teawise_text_color", fallback.text, None),
        hub_fill: lookup_color(context, "teawise_hub_fill", fallback.hub_fill, None),
        hub_border: lookup_color(context, "teawise_hub_border", fallback.hub_border, None),
        hub_text: lookup_color(context, "teawise_hub_text", fallback.hub_text, None),
    }
}

fn lookup_color(
    context: &gtk::StyleContext,
    name: &str,
    fallback: Srgba<f64>,
    alpha_override: Option<f64>,
) -> Srgba<f64> {
    context
        .lookup_color(name)
        .map(|c| to_srgba(&c, alpha_override))
        .unwrap_or(fallback)
}

fn to_srgba(color: &gdk::RGBA, alpha_override: Option<f64>) -> Srgba<f64> {
    let (r, g, b, a) = (
        color.red() as f64,
        color.green() as f64,
        color.blue() as f64,
        color.alpha() as f64,
    );
    Srgba::new(r, g, b, alpha_override.unwrap_or(a))
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.teawise-wheel {
    background: none;
    background-color: transparent;
}

.teawise-hover {
    font-weight: bold;
}

.teawise-status {
    opacity: 0.7;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
