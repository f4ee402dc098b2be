//! Instruction document
//!
//! Assembles the parts of one planisphere into a single printable HTML page:
//! a title, the parts inlined as SVG, and instructions for cutting out,
//! assembling and using the planisphere.

use std::io::{self, Write};

use super::svg_writer::escape_text;

/// One printed part with its caption
#[derive(Debug, Clone)]
pub struct DocumentPart {
    pub heading: String,
    pub caption: String,
    /// Complete `<svg>` element, without XML prolog
    pub svg: String,
}

/// Everything that goes into the instruction document
#[derive(Debug, Clone)]
pub struct InstructionDocument {
    /// e.g. `52°N`
    pub latitude_label: String,
    pub southern: bool,
    pub parts: Vec<DocumentPart>,
}

const STYLE: &str = "body { font-family: sans-serif; max-width: 190mm; margin: 0 auto; }
h1 { font-size: 20pt; }
h2 { font-size: 14pt; }
.part { page-break-before: always; text-align: center; }
.part svg { max-width: 100%; height: auto; }
.caption { font-style: italic; }";

impl InstructionDocument {
    fn assembly_steps(&self) -> Vec<String> {
        vec![
            "Print every page at 100% scale onto thin card. Do not let the printer fit the page.".to_string(),
            "Cut out the star wheel around its outer circle.".to_string(),
            "Cut out the holder around its outer circle. Cut out the horizon window and the four curved slots \
             that show the date scale, leaving the narrow bridges between them in place."
                .to_string(),
            "Lay the holder over the star wheel and push a paper fastener through both central marks, so that \
             the wheel turns freely underneath the holder."
                .to_string(),
            "If you printed the altitude and azimuth grid onto transparent film, fix it over the horizon window."
                .to_string(),
        ]
    }

    fn usage_steps(&self) -> Vec<String> {
        let (facing, mark) = if self.southern { ("north", 'N') } else { ("south", 'S') };
        vec![
            "Turn the star wheel until today's date, on the wheel, lines up with the time of night, on the holder's outer ring."
                .to_string(),
            format!(
                "Hold the planisphere above your head, facing {}, with the edge marked {} nearest the horizon in front of you.",
                facing, mark
            ),
            "The stars inside the window are those above the horizon. The centre of the window, \
             marked on the grid, is directly overhead."
                .to_string(),
            "Times on the holder are local mean solar time. Add an hour while daylight saving time is in force, \
             and correct by four minutes for every degree you are east or west of your time zone's central meridian."
                .to_string(),
        ]
    }
}

/// Write the instruction document as HTML
pub fn write_instructions<W: Write>(mut writer: W, doc: &InstructionDocument) -> io::Result<()> {
    let title = format!("Planisphere for latitude {}", doc.latitude_label);

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html lang=\"en\">")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "<meta charset=\"utf-8\">")?;
    writeln!(writer, "<title>{}</title>", escape_text(&title))?;
    writeln!(writer, "<style>\n{}\n</style>", STYLE)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "<h1>{}</h1>", escape_text(&title))?;
    writeln!(
        writer,
        "<p>A planisphere shows which stars are above the horizon at any time of night on any date of the year. \
         This one is drawn for observers at latitude {}.</p>",
        escape_text(&doc.latitude_label)
    )?;

    writeln!(writer, "<h2>Making the planisphere</h2>")?;
    write_list(&mut writer, &doc.assembly_steps())?;

    writeln!(writer, "<h2>Using the planisphere</h2>")?;
    write_list(&mut writer, &doc.usage_steps())?;

    for part in &doc.parts {
        writeln!(writer, "<div class=\"part\">")?;
        writeln!(writer, "<h2>{}</h2>", escape_text(&part.heading))?;
        write!(writer, "{}", part.svg)?;
        writeln!(writer, "<p class=\"caption\">{}</p>", escape_text(&part.caption))?;
        writeln!(writer, "</div>")?;
    }

    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

fn write_list<W: Write>(writer: &mut W, items: &[String]) -> io::Result<()> {
    writeln!(writer, "<ol>")?;
    for item in items {
        writeln!(writer, "<li>{}</li>", escape_text(item))?;
    }
    writeln!(writer, "</ol>")?;
    Ok(())
}
