//! Turning one icon into a `<symbol>` element.
//!
//! The reader is lenient on purpose: rectangle stripping is a substring edit
//! and can leave dangling end tags or stray text behind. Dangling end tags
//! are dropped instead of failing the whole sprite.
//!
//! The symbol body is written first and the start tag last, so the root's
//! geometry is kept even when text precedes the root `<svg>`.

use crate::config::{BoxSizing, ShapeConfig, SvgConfig};
use quick_xml::{
    Reader, Writer,
    events::{BytesCData, BytesEnd, BytesStart, BytesText, Event},
};
use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use std::{borrow::Cow, sync::LazyLock};

static URL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\([ \t\r\n]*#([^) \t\r\n]+)[ \t\r\n]*\)").unwrap());

static CLASS_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z_][-A-Za-z0-9_]*)").unwrap());

/// A rendered symbol and the size it occupies.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ShapeMarkup {
    pub markup: String,
    pub geometry: Option<Geometry>,
}

/// viewBox of a symbol plus its outer dimensions, padding included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Geometry {
    pub view_box: [f64; 4],
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    fn view_box_attr(&self, precision: usize) -> String {
        self.view_box
            .iter()
            .map(|v| round_number(*v, precision))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render `content` as `<symbol id="{id}" viewBox="...">...</symbol>`.
///
/// The root `<svg>` is replaced by the symbol; its viewBox is kept (or
/// derived from width/height) and its other attributes are dropped.
/// Declarations, doctypes, comments and processing instructions go away.
pub(super) fn symbol_markup(
    id: &str,
    content: &str,
    shape: &ShapeConfig,
    svg: &SvgConfig,
) -> Result<ShapeMarkup, quick_xml::Error> {
    let namespace = Namespace::for_shape(id, content, svg)?;
    let namespace = namespace.as_ref();

    let mut body = Writer::new(Vec::with_capacity(content.len()));
    let mut reader = lenient_reader(content);
    let mut geometry = None;
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut root_open = false;
    let mut in_style = false;

    loop {
        match reader.read_event()? {
            Event::Start(elem) => {
                if depth == 0 && !root_seen && is_svg(&elem) {
                    root_seen = true;
                    root_open = true;
                    geometry = root_geometry(&elem, shape);
                } else {
                    in_style |= is_style(&elem);
                    body.write_event(Event::Start(rewrite_element(&elem, shape, namespace)))?;
                }
                depth += 1;
            }
            Event::Empty(elem) => {
                if depth == 0 && !root_seen && is_svg(&elem) {
                    root_seen = true;
                    geometry = root_geometry(&elem, shape);
                } else {
                    body.write_event(Event::Empty(rewrite_element(&elem, shape, namespace)))?;
                }
            }
            Event::End(elem) => {
                // Dangling end tag
                if depth == 0 {
                    continue;
                }
                depth -= 1;
                if depth == 0 && root_open {
                    root_open = false;
                    continue;
                }
                if elem.local_name().as_ref() == b"style" {
                    in_style = false;
                }
                body.write_event(Event::End(elem))?;
            }
            Event::Text(text) if depth == 0 && text.iter().all(u8::is_ascii_whitespace) => {}
            Event::Text(text) if in_style => match namespace.and_then(|ns| ns.rewrite_css(&text)) {
                Some(css) => body.write_event(Event::Text(BytesText::from_escaped(css)))?,
                None => body.write_event(Event::Text(text))?,
            },
            Event::CData(data) if in_style => match namespace.and_then(|ns| ns.rewrite_css(&data)) {
                Some(css) => body.write_event(Event::CData(BytesCData::new(css)))?,
                None => body.write_event(Event::CData(data))?,
            },
            Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_) => {}
            Event::Eof => break,
            event => body.write_event(event)?,
        }
    }

    let body = body.into_inner();
    let mut start = BytesStart::new("symbol");
    start.push_attribute(("id", id));
    if let Some(geometry) = &geometry {
        start.push_attribute(("viewBox", geometry.view_box_attr(shape.precision).as_str()));
        if shape.dimension_attributes {
            start.push_attribute(("width", round_number(geometry.width, shape.precision).as_str()));
            start.push_attribute(("height", round_number(geometry.height, shape.precision).as_str()));
        }
    }

    let mut out = Writer::new(Vec::with_capacity(body.len() + 96));
    out.write_event(Event::Start(start))?;
    out.get_mut().extend_from_slice(&body);
    out.write_event(Event::End(BytesEnd::new("symbol")))?;

    Ok(ShapeMarkup {
        markup: String::from_utf8_lossy(&out.into_inner()).into_owned(),
        geometry,
    })
}

/// Names defined in one shape and the prefix that makes them sprite-unique.
///
/// `None` sets mean that kind of name is left alone.
struct Namespace {
    prefix: String,
    ids: Option<FxHashSet<String>>,
    classes: Option<FxHashSet<String>>,
}

impl Namespace {
    fn for_shape(id: &str, content: &str, svg: &SvgConfig) -> Result<Option<Self>, quick_xml::Error> {
        if !svg.namespace_ids && !svg.namespace_classnames {
            return Ok(None);
        }
        let (ids, classes) = collect_names(content)?;
        Ok(Some(Self {
            prefix: format!("{id}_"),
            ids: svg.namespace_ids.then_some(ids),
            classes: svg.namespace_classnames.then_some(classes),
        }))
    }

    /// Prefix `id` and `class` values and rewrite `#id` / `url(#id)`
    /// references to ids defined in this shape. Other values are returned
    /// untouched.
    fn rewrite<'v>(&self, key: &[u8], value: &'v [u8]) -> Cow<'v, [u8]> {
        match key {
            b"id" if self.ids.is_some() => {
                return Cow::Owned([self.prefix.as_bytes(), value].concat());
            }
            b"class" if self.classes.is_some() => {
                let classes = value
                    .split(u8::is_ascii_whitespace)
                    .filter(|class| !class.is_empty())
                    .map(|class| [self.prefix.as_bytes(), class].concat())
                    .collect::<Vec<_>>();
                return Cow::Owned(classes.join(&b' '));
            }
            _ => {}
        }

        let Some(ids) = &self.ids else {
            return Cow::Borrowed(value);
        };
        let Ok(text) = std::str::from_utf8(value) else {
            return Cow::Borrowed(value);
        };

        if let Some(target) = text.strip_prefix('#')
            && ids.contains(target)
        {
            return Cow::Owned(format!("#{}{}", self.prefix, target).into_bytes());
        }

        match self.rewrite_url_refs(ids, text) {
            Cow::Owned(replaced) => Cow::Owned(replaced.into_bytes()),
            Cow::Borrowed(_) => Cow::Borrowed(value),
        }
    }

    fn rewrite_url_refs<'t>(&self, ids: &FxHashSet<String>, text: &'t str) -> Cow<'t, str> {
        if !text.contains("url(") {
            return Cow::Borrowed(text);
        }
        URL_REF.replace_all(text, |caps: &Captures<'_>| {
            let target = &caps[1];
            if ids.contains(target) {
                format!("url(#{}{})", self.prefix, target)
            } else {
                caps[0].to_string()
            }
        })
    }

    /// Rewrite class selectors and `url(#id)` inside a stylesheet. `None`
    /// when nothing changed.
    fn rewrite_css(&self, raw: &[u8]) -> Option<String> {
        let css = std::str::from_utf8(raw).ok()?;
        let mut out = css.to_string();

        if let Some(classes) = &self.classes {
            out = CLASS_SELECTOR
                .replace_all(&out, |caps: &Captures<'_>| {
                    let class = &caps[1];
                    if classes.contains(class) {
                        format!(".{}{}", self.prefix, class)
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned();
        }
        if let Some(ids) = &self.ids {
            out = self.rewrite_url_refs(ids, &out).into_owned();
        }

        (out != css).then_some(out)
    }
}

fn lenient_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    reader
}

/// Every `id` value and every class name used in `content`.
fn collect_names(content: &str) -> Result<(FxHashSet<String>, FxHashSet<String>), quick_xml::Error> {
    let mut reader = lenient_reader(content);
    let mut ids = FxHashSet::default();
    let mut classes = FxHashSet::default();

    loop {
        match reader.read_event()? {
            Event::Start(elem) | Event::Empty(elem) => {
                for attr in elem.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"id" => {
                            ids.insert(String::from_utf8_lossy(&attr.value).into_owned());
                        }
                        b"class" => {
                            let value = String::from_utf8_lossy(&attr.value);
                            classes.extend(value.split_ascii_whitespace().map(str::to_string));
                        }
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((ids, classes))
}

#[inline]
fn is_svg(elem: &BytesStart<'_>) -> bool {
    elem.local_name().as_ref() == b"svg"
}

#[inline]
fn is_style(elem: &BytesStart<'_>) -> bool {
    elem.local_name().as_ref() == b"style"
}

fn rewrite_element(
    elem: &BytesStart<'_>,
    shape: &ShapeConfig,
    namespace: Option<&Namespace>,
) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);

    for attr in elem.attributes().flatten() {
        let key = attr.key.as_ref();
        if shape.strips(key) {
            continue;
        }
        let value = match namespace {
            Some(namespace) => namespace.rewrite(key, &attr.value),
            None => Cow::Borrowed(&*attr.value),
        };
        // Raw bytes: the value is already escaped in the source
        out.push_attribute((key, value.as_ref()));
    }

    out
}

/// Geometry of a root element after size limits and padding.
///
/// The viewBox comes from the root, or `0 0 width height` when both
/// dimensions are numeric. Explicit width/height set the natural size,
/// otherwise the viewBox size is used.
fn root_geometry(root: &BytesStart<'_>, shape: &ShapeConfig) -> Option<Geometry> {
    let mut view_box = None;
    let mut width = None;
    let mut height = None;

    for attr in root.attributes().flatten() {
        match attr.key.as_ref() {
            b"viewBox" => view_box = parse_view_box(&attr.value),
            b"width" => width = parse_length(&attr.value),
            b"height" => height = parse_length(&attr.value),
            _ => {}
        }
    }

    let view_box = match view_box {
        Some(view_box) => view_box,
        None => [0.0, 0.0, width?, height?],
    };
    if !(view_box[2] > 0.0 && view_box[3] > 0.0) {
        return None;
    }

    let natural = (width.unwrap_or(view_box[2]), height.unwrap_or(view_box[3]));
    Some(layout(view_box, natural, shape))
}

/// Apply the maximum size and padding to a shape of `natural` size.
fn layout(view_box: [f64; 4], natural: (f64, f64), shape: &ShapeConfig) -> Geometry {
    let max = (shape.max_width, shape.max_height);
    let pad = shape.padding;

    let (inner, outer) = match shape.box_sizing {
        BoxSizing::Content => {
            let inner = fit(natural, max);
            (inner, (inner.0 + 2.0 * pad, inner.1 + 2.0 * pad))
        }
        BoxSizing::Padding => {
            let outer = fit(natural, max);
            ((outer.0 - 2.0 * pad, outer.1 - 2.0 * pad), outer)
        }
        BoxSizing::Icon => {
            let outer = fit((natural.0 + 2.0 * pad, natural.1 + 2.0 * pad), max);
            ((outer.0 - 2.0 * pad, outer.1 - 2.0 * pad), outer)
        }
    };

    // Padding eats the whole shape: keep it unpadded
    if pad <= 0.0 || inner.0 <= 0.0 || inner.1 <= 0.0 {
        let (width, height) = if pad <= 0.0 { inner } else { outer };
        return Geometry {
            view_box,
            width,
            height,
        };
    }

    // Padding in viewBox units
    let [x, y, w, h] = view_box;
    let pad_x = pad * w / inner.0;
    let pad_y = pad * h / inner.1;
    Geometry {
        view_box: [x - pad_x, y - pad_y, w + 2.0 * pad_x, h + 2.0 * pad_y],
        width: outer.0,
        height: outer.1,
    }
}

/// Scale `size` down, keeping its aspect ratio, until it fits `max`.
fn fit(size: (f64, f64), max: (f64, f64)) -> (f64, f64) {
    if size.0 <= max.0 && size.1 <= max.1 {
        return size;
    }
    let scale = (max.0 / size.0).min(max.1 / size.1);
    (size.0 * scale, size.1 * scale)
}

fn parse_view_box(value: &[u8]) -> Option<[f64; 4]> {
    let text = std::str::from_utf8(value).ok()?;
    let mut parts = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse::<f64>);
    let view_box = [
        parts.next()?.ok()?,
        parts.next()?.ok()?,
        parts.next()?.ok()?,
        parts.next()?.ok()?,
    ];
    parts.next().is_none().then_some(view_box)
}

/// Parse a plain or `px` length.
fn parse_length(value: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(value).ok()?.trim();
    let text = text.strip_suffix("px").unwrap_or(text);
    text.trim().parse().ok()
}

/// Format with at most `precision` decimals, without trailing zeros.
pub(super) fn round_number(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$}");
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
