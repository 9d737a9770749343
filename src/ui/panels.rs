use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use plotters::style::RGBColor;

use crate::app::ViewerContent;
use crate::data::format::StyledTable;

const CAPTION_COLOR: Color32 = Color32::from_rgb(0xfb, 0x00, 0xff);
const HEADER_BG: Color32 = Color32::from_rgb(0x00, 0xc8, 0xd6);
const HEADER_FG: Color32 = Color32::from_rgb(0x1f, 0x38, 0x64);

fn to_color32(c: RGBColor) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

// ---------------------------------------------------------------------------
// Top bar – caption
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, title: &str, content: &ViewerContent) {
    ui.add_space(4.0);
    match content {
        ViewerContent::Table(_) => {
            ui.label(RichText::new(title).size(22.0).strong().color(CAPTION_COLOR));
        }
        ViewerContent::Image { .. } => {
            ui.heading(title);
        }
    }
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Central panel – styled table
// ---------------------------------------------------------------------------

/// Render the table with the header colours of the HTML view and, in
/// heat-map mode, per-cell backgrounds.
pub fn table_view(ui: &mut Ui, styled: &StyledTable) {
    let table = styled.table();
    let names = table.column_names();

    TableBuilder::new(ui)
        .striped(styled.heat_scale().is_none())
        .cell_layout(egui::Layout::centered_and_justified(
            egui::Direction::LeftToRight,
        ))
        .column(Column::auto().at_least(32.0))
        .columns(Column::auto().at_least(80.0), names.len())
        .header(26.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.painter().rect_filled(ui.max_rect(), 0.0, HEADER_BG);
            });
            for name in &names {
                header.col(|ui: &mut Ui| {
                    ui.painter().rect_filled(ui.max_rect(), 0.0, HEADER_BG);
                    ui.label(RichText::new(*name).strong().color(HEADER_FG));
                });
            }
        })
        .body(|mut body| {
            for row in 0..table.n_rows() {
                body.row(22.0, |mut table_row| {
                    table_row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(row.to_string()).strong());
                    });
                    for col in 0..names.len() {
                        table_row.col(|ui: &mut Ui| {
                            let Some(cell) = styled.cell(row, col) else {
                                return;
                            };
                            match cell.colors {
                                Some((bg, fg)) => {
                                    ui.painter()
                                        .rect_filled(ui.max_rect(), 0.0, to_color32(bg));
                                    ui.label(RichText::new(cell.text).color(to_color32(fg)));
                                }
                                None => {
                                    ui.label(cell.text);
                                }
                            }
                        });
                    }
                });
            }
        });
}
