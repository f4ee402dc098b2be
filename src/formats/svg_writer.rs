//! Streaming SVG Writer
//!
//! Writes planisphere parts directly to any `std::io::Write` implementation.
//! Page units are millimetres. Numbers are written with fixed precision and
//! attributes in a fixed order, so the same drawing always produces the same
//! bytes.

use std::fmt;
use std::io::{self, Write};

use crate::astro::Point;

/// Error type for SVG writing operations
#[derive(Debug)]
pub enum SvgError {
    Io(io::Error),
    InvalidState(String),
}

impl From<io::Error> for SvgError {
    fn from(e: io::Error) -> Self {
        SvgError::Io(e)
    }
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::Io(e) => write!(f, "IO error: {}", e),
            SvgError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for SvgError {}

pub type Result<T> = std::result::Result<T, SvgError>;

/// An RGBA colour with components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// Stroke and fill for a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
    pub dotted: bool,
}

/// Default stroke width in millimetres
pub const LINE_WIDTH: f64 = 0.25;

impl Style {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: LINE_WIDTH,
            dotted: false,
        }
    }

    pub fn stroke(color: Color) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width: LINE_WIDTH,
            dotted: false,
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn dotted(mut self) -> Self {
        self.dotted = true;
        self
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Start,
    #[default]
    Middle,
    End,
}

/// Vertical text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Baseline,
}

/// How a run of text is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in millimetres
    pub size: f64,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Clockwise rotation about the anchor, degrees
    pub rotation: f64,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            h_align: HAlign::Middle,
            v_align: VAlign::Middle,
            rotation: 0.0,
            bold: false,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Page geometry for a drawing
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    pub x_min: f64,
    pub y_min: f64,
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    /// Write the `<?xml ...?>` prolog; off when the SVG is inlined into HTML
    pub prolog: bool,
    /// Prepended to every element id, so several drawings can share one page
    pub id_prefix: Option<String>,
}

/// Streaming SVG writer
pub struct SvgWriter<W: Write> {
    writer: W,
    config: SvgConfig,
    started: bool,
    open_groups: usize,
    clip_count: usize,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(writer: W, config: SvgConfig) -> Self {
        Self {
            writer,
            config,
            started: false,
            open_groups: 0,
            clip_count: 0,
        }
    }

    /// Write the opening `<svg>` tag
    pub fn write_start(&mut self) -> Result<()> {
        if self.started {
            return Err(SvgError::InvalidState("write_start called twice".to_string()));
        }

        if self.config.prolog {
            writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        }
        writeln!(
            self.writer,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}mm\" height=\"{}mm\" viewBox=\"{} {} {} {}\">",
            num(self.config.width),
            num(self.config.height),
            num(self.config.x_min),
            num(self.config.y_min),
            num(self.config.width),
            num(self.config.height)
        )?;
        if let Some(ref title) = self.config.title {
            writeln!(self.writer, "  <title>{}</title>", escape_text(title))?;
        }

        self.started = true;
        Ok(())
    }

    fn ensure_started(&self, what: &str) -> Result<()> {
        if !self.started {
            return Err(SvgError::InvalidState(format!(
                "Must call write_start before {}",
                what
            )));
        }
        Ok(())
    }

    fn element_id(&self, id: &str) -> String {
        match self.config.id_prefix {
            Some(ref prefix) => format!("{}-{}", prefix, id),
            None => id.to_string(),
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.open_groups + 1)
    }

    pub fn write_circle(&mut self, centre: Point, radius: f64, style: &Style) -> Result<()> {
        self.ensure_started("write_circle")?;
        writeln!(
            self.writer,
            "{}<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{} />",
            self.indent(),
            num(centre.x),
            num(centre.y),
            num(radius),
            style_attrs(style)
        )?;
        Ok(())
    }

    /// An annulus centred on the origin
    pub fn write_ring(&mut self, inner: f64, outer: f64, style: &Style) -> Result<()> {
        self.ensure_started("write_ring")?;
        writeln!(
            self.writer,
            "{}<path d=\"{} {}\" fill-rule=\"evenodd\"{} />",
            self.indent(),
            circle_path(outer),
            circle_path(inner),
            style_attrs(style)
        )?;
        Ok(())
    }

    pub fn write_polyline(&mut self, points: &[Point], closed: bool, style: &Style) -> Result<()> {
        self.ensure_started("write_polyline")?;
        if points.len() < 2 {
            return Ok(());
        }

        let mut d = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&format!("{} {}", num(p.x), num(p.y)));
        }
        if closed {
            d.push_str(" Z");
        }

        writeln!(self.writer, "{}<path d=\"{}\"{} />", self.indent(), d, style_attrs(style))?;
        Ok(())
    }

    pub fn write_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<()> {
        self.ensure_started("write_text")?;

        let anchor = match style.h_align {
            HAlign::Start => "start",
            HAlign::Middle => "middle",
            HAlign::End => "end",
        };
        let baseline = match style.v_align {
            VAlign::Top => "hanging",
            VAlign::Middle => "central",
            VAlign::Baseline => "alphabetic",
        };

        write!(
            self.writer,
            "{}<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\" fill=\"{}\"",
            self.indent(),
            num(at.x),
            num(at.y),
            num(style.size),
            anchor,
            baseline,
            style.color.hex()
        )?;
        if !style.color.is_opaque() {
            write!(self.writer, " fill-opacity=\"{}\"", num(style.color.a))?;
        }
        if style.bold {
            write!(self.writer, " font-weight=\"bold\"")?;
        }
        if style.rotation != 0.0 {
            write!(
                self.writer,
                " transform=\"rotate({} {} {})\"",
                num(style.rotation),
                num(at.x),
                num(at.y)
            )?;
        }
        writeln!(self.writer, ">{}</text>", escape_text(text))?;
        Ok(())
    }

    /// Open a named group
    pub fn begin_group(&mut self, id: &str) -> Result<()> {
        self.ensure_started("begin_group")?;
        let id = self.element_id(id);
        writeln!(self.writer, "{}<g id=\"{}\">", self.indent(), escape_text(&id))?;
        self.open_groups += 1;
        Ok(())
    }

    /// Open a group clipped to a circle about the origin
    pub fn begin_clip_circle(&mut self, radius: f64) -> Result<()> {
        self.ensure_started("begin_clip_circle")?;
        self.clip_count += 1;
        let id = escape_text(&self.element_id(&format!("clip{}", self.clip_count)));
        let indent = self.indent();
        writeln!(self.writer, "{}<clipPath id=\"{}\">", indent, id)?;
        writeln!(self.writer, "{}  <circle cx=\"0\" cy=\"0\" r=\"{}\" />", indent, num(radius))?;
        writeln!(self.writer, "{}</clipPath>", indent)?;
        writeln!(self.writer, "{}<g clip-path=\"url(#{})\">", indent, id)?;
        self.open_groups += 1;
        Ok(())
    }

    pub fn end_group(&mut self) -> Result<()> {
        if self.open_groups == 0 {
            return Err(SvgError::InvalidState(
                "end_group called without an open group".to_string(),
            ));
        }
        self.open_groups -= 1;
        writeln!(self.writer, "{}</g>", self.indent())?;
        Ok(())
    }

    /// Write the closing `</svg>` tag
    pub fn write_end(&mut self) -> Result<()> {
        self.ensure_started("write_end")?;
        if self.open_groups != 0 {
            return Err(SvgError::InvalidState(format!(
                "{} group(s) still open at write_end",
                self.open_groups
            )));
        }
        writeln!(self.writer, "</svg>")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Format a length or angle with three decimals, without a negative zero
pub fn num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = if s == "-0.000" { "0.000".to_string() } else { s };
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn circle_path(radius: f64) -> String {
    format!(
        "M{} 0 A{r} {r} 0 1 0 {} 0 A{r} {r} 0 1 0 {} 0 Z",
        num(radius),
        num(-radius),
        num(radius),
        r = num(radius)
    )
}

fn style_attrs(style: &Style) -> String {
    let mut attrs = String::new();
    match style.fill {
        Some(color) => {
            attrs.push_str(&format!(" fill=\"{}\"", color.hex()));
            if !color.is_opaque() {
                attrs.push_str(&format!(" fill-opacity=\"{}\"", num(color.a)));
            }
        }
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(color) = style.stroke {
        attrs.push_str(&format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            color.hex(),
            num(style.line_width)
        ));
        if !color.is_opaque() {
            attrs.push_str(&format!(" stroke-opacity=\"{}\"", num(color.a)));
        }
        if style.dotted {
            attrs.push_str(&format!(
                " stroke-dasharray=\"{} {}\"",
                num(style.line_width),
                num(style.line_width * 2.0)
            ));
        }
    }
    attrs
}

/// Escape text content and attribute values
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SvgConfig {
        SvgConfig {
            x_min: -10.0,
            y_min: -10.0,
            width: 20.0,
            height: 20.0,
            title: Some("Test & <wheel>".to_string()),
            prolog: true,
            id_prefix: None,
        }
    }

    fn render<F: FnOnce(&mut SvgWriter<&mut Vec<u8>>) -> Result<()>>(f: F) -> String {
        let mut output = Vec::new();
        let mut writer = SvgWriter::new(&mut output, config());
        writer.write_start().unwrap();
        f(&mut writer).unwrap();
        writer.write_end().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-2.5), "-2.5");
        assert_eq!(num(0.0), "0");
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::BLACK.hex(), "#000000");
        assert_eq!(Color::rgba(0.9, 0.9, 0.9, 1.0).hex(), "#e6e6e6");
        assert_eq!(Color::rgba(2.0, -1.0, 0.5, 1.0).hex(), "#ff0080");
    }

    #[test]
    fn test_document_structure() {
        let svg = render(|w| w.write_circle(Point::new(0.0, 0.0), 5.0, &Style::fill(Color::BLACK)));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"-10 -10 20 20\""));
        assert!(svg.contains("<title>Test &amp; &lt;wheel&gt;</title>"));
        assert!(svg.contains("<circle cx=\"0\" cy=\"0\" r=\"5\" fill=\"#000000\" />"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_write_before_start_fails() {
        let mut output = Vec::new();
        let mut writer = SvgWriter::new(&mut output, config());
        let err = writer
            .write_circle(Point::default(), 1.0, &Style::fill(Color::BLACK))
            .unwrap_err();
        assert!(matches!(err, SvgError::InvalidState(_)));
    }

    #[test]
    fn test_unbalanced_groups_rejected() {
        let mut output = Vec::new();
        let mut writer = SvgWriter::new(&mut output, config());
        writer.write_start().unwrap();
        writer.begin_clip_circle(5.0).unwrap();
        assert!(writer.write_end().is_err());
        writer.end_group().unwrap();
        assert!(writer.end_group().is_err());
        writer.write_end().unwrap();
    }

    #[test]
    fn test_clip_ids_are_unique() {
        let svg = render(|w| {
            w.begin_clip_circle(5.0)?;
            w.end_group()?;
            w.begin_clip_circle(6.0)?;
            w.end_group()
        });
        assert!(svg.contains("id=\"clip1\""));
        assert!(svg.contains("id=\"clip2\""));
    }

    #[test]
    fn test_id_prefix_applies_to_groups_and_clips() {
        let mut output = Vec::new();
        let config = SvgConfig {
            id_prefix: Some("holder".to_string()),
            ..config()
        };
        let mut writer = SvgWriter::new(&mut output, config);
        writer.write_start().unwrap();
        writer.begin_group("text").unwrap();
        writer.begin_clip_circle(5.0).unwrap();
        writer.end_group().unwrap();
        writer.end_group().unwrap();
        writer.write_end().unwrap();

        let svg = String::from_utf8(output).unwrap();
        assert!(svg.contains("<g id=\"holder-text\">"));
        assert!(svg.contains("<clipPath id=\"holder-clip1\">"));
        assert!(svg.contains("url(#holder-clip1)"));
        assert!(!svg.contains("id=\"clip1\""));
    }

    #[test]
    fn test_dotted_stroke_and_opacity() {
        let style = Style::stroke(Color::rgba(0.25, 0.25, 0.25, 0.5)).dotted();
        let svg = render(|w| w.write_polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], false, &style));
        assert!(svg.contains("d=\"M0 0 L1 1\""));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("stroke-opacity=\"0.5\""));
    }

    #[test]
    fn test_text_escaped_and_rotated() {
        let style = TextStyle::new(2.0, Color::BLACK).rotated(90.0);
        let svg = render(|w| w.write_text("A<B", Point::new(1.0, 2.0), &style));
        assert!(svg.contains(">A&lt;B</text>"));
        assert!(svg.contains("transform=\"rotate(90 1 2)\""));
    }

    #[test]
    fn test_short_polyline_skipped() {
        let svg = render(|w| w.write_polyline(&[Point::new(0.0, 0.0)], true, &Style::stroke(Color::BLACK)));
        assert!(!svg.contains("<path"));
    }
}
