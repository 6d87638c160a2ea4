//! PDF report over the full ticket collection.
//!
//! Layout is computed first as plain text blocks (`ticket_blocks`) so the
//! content can be tested without rendering; `render` then draws the blocks
//! onto A4 pages with printpdf. A ticket block is committed to the current
//! page in full: if it does not fit, a new page is started first.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::models::Ticket;

pub const REPORT_TITLE: &str = "Relatório de Chamados - Netcom Telecom";
pub const REPORT_FILENAME: &str = "relatorio_chamados.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TOP_MM: f32 = PAGE_HEIGHT_MM - MARGIN_MM;
const HEADING_LINE_MM: f32 = 8.0;
const BODY_LINE_MM: f32 = 6.0;
const BLOCK_GAP_MM: f32 = 6.0;
const WRAP_COLUMNS: usize = 90;

/// One ticket's contribution to the report.
#[derive(Debug, PartialEq, Eq)]
pub struct TicketBlock {
    pub heading: String,
    pub lines: Vec<String>,
}

impl TicketBlock {
    fn height_mm(&self) -> f32 {
        HEADING_LINE_MM + self.lines.len() as f32 * BODY_LINE_MM + BLOCK_GAP_MM
    }
}

/// Text content of the report, one block per ticket in store order.
pub fn ticket_blocks(tickets: &[Ticket]) -> Vec<TicketBlock> {
    tickets
        .iter()
        .map(|t| {
            let mut lines = vec![
                format!("Cliente: {}", t.client),
                format!("Status: {}", t.status),
            ];
            lines.extend(wrap(&format!("Descrição: {}", t.description), WRAP_COLUMNS));
            TicketBlock {
                heading: format!("ID: {} - Título: {}", t.id, t.title),
                lines,
            }
        })
        .collect()
}

/// Greedy word wrap; a single overlong word gets its own line.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render the collection as PDF bytes.
pub fn render(tickets: &[Ticket]) -> anyhow::Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "conteúdo");
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow::anyhow!("font load failed: {}", e))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!("font load failed: {}", e))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_MM;

    layer.use_text(REPORT_TITLE, 22.0, Mm(MARGIN_MM + 10.0), Mm(y), &bold);
    y -= 15.0;

    for block in ticket_blocks(tickets) {
        if y - block.height_mm() < MARGIN_MM {
            layer = add_page(&doc);
            y = TOP_MM;
        }
        draw_block(&layer, &block, &mut y, &bold, &regular);
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("pdf serialization failed: {}", e))
}

fn add_page(doc: &printpdf::PdfDocumentReference) -> PdfLayerReference {
    let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "conteúdo");
    doc.get_page(page).get_layer(page_layer)
}

fn draw_block(
    layer: &PdfLayerReference,
    block: &TicketBlock,
    y: &mut f32,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
) {
    layer.use_text(block.heading.as_str(), 14.0, Mm(MARGIN_MM), Mm(*y), bold);
    *y -= HEADING_LINE_MM;
    for line in &block.lines {
        layer.use_text(line.as_str(), 11.0, Mm(MARGIN_MM), Mm(*y), regular);
        *y -= BODY_LINE_MM;
    }
    *y -= BLOCK_GAP_MM;
}
