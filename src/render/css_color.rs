//! CSS color string resolution for raster backends.
//!
//! Covers the notations dashboards actually hand to charts: hex forms,
//! `rgb()`/`rgba()`, `hsl()`/`hsla()` in comma or space syntax, and the full
//! table of named colors.

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// CSS Color Module Level 4 named colors, sorted by name.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aliceblue", (240, 248, 255)),
    ("antiquewhite", (250, 235, 215)),
    ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)),
    ("azure", (240, 255, 255)),
    ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)),
    ("black", (0, 0, 0)),
    ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)),
    ("blueviolet", (138, 43, 226)),
    ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)),
    ("cadetblue", (95, 158, 160)),
    ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)),
    ("coral", (255, 127, 80)),
    ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkcyan", (0, 139, 139)),
    ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)),
    ("darkmagenta", (139, 0, 139)),
    ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)),
    ("darkorchid", (153, 50, 204)),
    ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)),
    ("darkseagreen", (143, 188, 143)),
    ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)),
    ("darkslategrey", (47, 79, 79)),
    ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)),
    ("deeppink", (255, 20, 147)),
    ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)),
    ("dimgrey", (105, 105, 105)),
    ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)),
    ("floralwhite", (255, 250, 240)),
    ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)),
    ("gainsboro", (220, 220, 220)),
    ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)),
    ("goldenrod", (218, 165, 32)),
    ("gray", (128, 128, 128)),
    ("green", (0, 128, 0)),
    ("greenyellow", (173, 255, 47)),
    ("grey", (128, 128, 128)),
    ("honeydew", (240, 255, 240)),
    ("hotpink", (255, 105, 180)),
    ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lavenderblush", (255, 240, 245)),
    ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)),
    ("lightblue", (173, 216, 230)),
    ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)),
    ("lightgoldenrodyellow", (250, 250, 210)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightgrey", (211, 211, 211)),
    ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)),
    ("lightseagreen", (32, 178, 170)),
    ("lightskyblue", (135, 206, 250)),
    ("lightslategray", (119, 136, 153)),
    ("lightslategrey", (119, 136, 153)),
    ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)),
    ("magenta", (255, 0, 255)),
    ("maroon", (128, 0, 0)),
    ("mediumaquamarine", (102, 205, 170)),
    ("mediumblue", (0, 0, 205)),
    ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)),
    ("mediumseagreen", (60, 179, 113)),
    ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)),
    ("mediumturquoise", (72, 209, 204)),
    ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)),
    ("mintcream", (245, 255, 250)),
    ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)),
    ("navajowhite", (255, 222, 173)),
    ("navy", (0, 0, 128)),
    ("oldlace", (253, 245, 230)),
    ("olive", (128, 128, 0)),
    ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)),
    ("orangered", (255, 69, 0)),
    ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)),
    ("palegreen", (152, 251, 152)),
    ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)),
    ("rosybrown", (188, 143, 143)),
    ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)),
    ("salmon", (250, 128, 114)),
    ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)),
    ("seashell", (255, 245, 238)),
    ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)),
    ("slategrey", (112, 128, 144)),
    ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)),
    ("steelblue", (70, 130, 180)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("thistle", (216, 191, 216)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];

/// Parses one CSS color value.
pub fn parse_css_color(input: &str) -> ChartResult<Color> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(invalid(input, "color value cannot be empty"));
    }

    if let Some(hex) = normalized.strip_prefix('#') {
        return parse_hex(input, hex);
    }
    if let Some(args) = function_args(&normalized, &["rgb", "rgba"]) {
        return parse_rgb_function(input, args);
    }
    if let Some(args) = function_args(&normalized, &["hsl", "hsla"]) {
        return parse_hsl_function(input, args);
    }
    if normalized == "transparent" {
        return Ok(Color::TRANSPARENT);
    }

    NAMED_COLORS
        .binary_search_by(|(name, _)| name.cmp(&normalized.as_str()))
        .map(|index| {
            let (r, g, b) = NAMED_COLORS[index].1;
            Color::from_rgb8(r, g, b, 1.0)
        })
        .map_err(|_| invalid(input, "unsupported color notation"))
}

/// Converts HSL (hue in degrees, saturation/lightness in `0..=1`) to RGBA.
#[must_use]
pub fn hsl_to_color(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Color {
    let hue = if hue.is_finite() {
        hue.rem_euclid(360.0) / 360.0
    } else {
        0.0
    };
    let saturation = clamp_unit(saturation);
    let lightness = clamp_unit(lightness);
    let alpha = clamp_unit(alpha);

    if saturation == 0.0 {
        return Color::rgba(lightness, lightness, lightness, alpha);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    Color::rgba(
        hue_to_channel(p, q, hue + 1.0 / 3.0),
        hue_to_channel(p, q, hue),
        hue_to_channel(p, q, hue - 1.0 / 3.0),
        alpha,
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn parse_hex(input: &str, hex: &str) -> ChartResult<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(input, "hex color contains non-hex digits"));
    }
    let digit = |index: usize| -> ChartResult<u8> {
        let pair = match hex.len() {
            3 | 4 => hex[index..=index].repeat(2),
            _ => hex[index * 2..index * 2 + 2].to_owned(),
        };
        u8::from_str_radix(&pair, 16).map_err(|_| invalid(input, "invalid hex digit"))
    };

    match hex.len() {
        3 | 6 => Ok(Color::from_rgb8(digit(0)?, digit(1)?, digit(2)?, 1.0)),
        4 | 8 => Ok(Color::from_rgb8(
            digit(0)?,
            digit(1)?,
            digit(2)?,
            f64::from(digit(3)?) / 255.0,
        )),
        _ => Err(invalid(
            input,
            "hex color must have 3, 4, 6, or 8 digits",
        )),
    }
}

fn parse_rgb_function(input: &str, args: &str) -> ChartResult<Color> {
    let (channels, alpha) = split_components(args);
    let [red, green, blue] = channels.as_slice() else {
        return Err(invalid(input, "rgb() expects three channels"));
    };
    Ok(Color::rgba(
        parse_rgb_channel(input, red)?,
        parse_rgb_channel(input, green)?,
        parse_rgb_channel(input, blue)?,
        parse_alpha(input, alpha)?,
    ))
}

fn parse_hsl_function(input: &str, args: &str) -> ChartResult<Color> {
    let (channels, alpha) = split_components(args);
    let [hue, saturation, lightness] = channels.as_slice() else {
        return Err(invalid(input, "hsl() expects three components"));
    };
    let hue = parse_number(input, hue.trim_end_matches("deg"))?;
    let saturation = parse_number(input, saturation.trim_end_matches('%'))? / 100.0;
    let lightness = parse_number(input, lightness.trim_end_matches('%'))? / 100.0;
    Ok(hsl_to_color(
        hue,
        saturation,
        lightness,
        parse_alpha(input, alpha)?,
    ))
}

fn function_args<'a>(input: &'a str, names: &[&str]) -> Option<&'a str> {
    let open = input.find('(')?;
    if !names.contains(&input[..open].trim()) {
        return None;
    }
    input[open + 1..].trim_end().strip_suffix(')')
}

// Accepts `a, b, c[, alpha]` and `a b c[ / alpha]`.
fn split_components(args: &str) -> (Vec<&str>, Option<&str>) {
    if args.contains(',') {
        let mut parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let alpha = if parts.len() == 4 { parts.pop() } else { None };
        return (parts, alpha);
    }
    let (channels, alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };
    (channels.split_whitespace().collect(), alpha)
}

fn parse_rgb_channel(input: &str, raw: &str) -> ChartResult<f64> {
    let value = match raw.strip_suffix('%') {
        Some(percent) => parse_number(input, percent)? / 100.0,
        None => parse_number(input, raw)? / 255.0,
    };
    Ok(clamp_unit(value))
}

fn parse_alpha(input: &str, raw: Option<&str>) -> ChartResult<f64> {
    let Some(raw) = raw else {
        return Ok(1.0);
    };
    let value = match raw.strip_suffix('%') {
        Some(percent) => parse_number(input, percent)? / 100.0,
        None => parse_number(input, raw)?,
    };
    Ok(clamp_unit(value))
}

fn parse_number(input: &str, raw: &str) -> ChartResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(input, "color component is not a finite number")),
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn invalid(input: &str, reason: &str) -> ChartError {
    ChartError::InvalidData(format!("invalid color `{input}`: {reason}"))
}
