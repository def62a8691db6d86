//! printpdf によるPDF書き出し
//!
//! レイアウトは共通ライブラリの `render_pdf` が決め、ここでは描画命令を
//! そのままページに写すだけ。座標は上端基準mmからPDF座標へ変換する。

use crate::error::{InfraCheckError, Result};
use infracheck_common::export::pdf_core::{self, FontWeight, PdfOp, PdfReport, Rgb};
use infracheck_common::layout::{mm_to_pt, PdfLayout};
use infracheck_common::ChecklistRecord;
use printpdf::path::PaintMode;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// チェックリストをPDFファイルとして保存
pub fn generate_pdf(record: &ChecklistRecord, conclusion: &str, output_path: &Path) -> Result<()> {
    let report = pdf_core::render_pdf(record, conclusion);
    let bytes = render_to_bytes(&report)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    std::io::Write::write_all(&mut writer, &bytes)?;
    Ok(())
}

/// レイアウト済みレポートをPDFバイト列に変換
pub fn render_to_bytes(report: &PdfReport) -> Result<Vec<u8>> {
    let layout = &report.layout;
    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(&report.title, width, height, "Layer 1");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| InfraCheckError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| InfraCheckError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?,
    };

    for (index, page) in report.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        for op in &page.ops {
            draw_op(&layer, layout, &fonts, op);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| InfraCheckError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))
}

/// 上端基準の矩形を printpdf の Rect に変換
fn rect(layout: &PdfLayout, x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(
        Mm(x),
        Mm(layout.to_pdf_y_mm(y + h)),
        Mm(x + w),
        Mm(layout.to_pdf_y_mm(y)),
    )
}

fn draw_op(layer: &PdfLayerReference, layout: &PdfLayout, fonts: &Fonts, op: &PdfOp) {
    match op {
        PdfOp::Text { text, x_mm, y_mm, size_pt, weight, color: c } => {
            layer.set_fill_color(color(*c));
            layer.use_text(
                text.as_str(),
                *size_pt,
                Mm(*x_mm),
                Mm(layout.to_pdf_y_mm(*y_mm)),
                fonts.get(*weight),
            );
        }
        PdfOp::Line { from_mm, to_mm, width_mm, color: c } => {
            layer.set_outline_color(color(*c));
            layer.set_outline_thickness(mm_to_pt(*width_mm));
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(from_mm.0), Mm(layout.to_pdf_y_mm(from_mm.1))), false),
                    (Point::new(Mm(to_mm.0), Mm(layout.to_pdf_y_mm(to_mm.1))), false),
                ],
                is_closed: false,
            });
        }
        PdfOp::FillRect { x_mm, y_mm, width_mm, height_mm, color: c } => {
            layer.set_fill_color(color(*c));
            layer.add_rect(rect(layout, *x_mm, *y_mm, *width_mm, *height_mm).with_mode(PaintMode::Fill));
        }
        PdfOp::DashedRect { x_mm, y_mm, width_mm, height_mm, line_width_mm, dash_mm, color: c } => {
            let dash = mm_to_pt(*dash_mm).round().max(1.0) as i64;
            layer.set_outline_color(color(*c));
            layer.set_outline_thickness(mm_to_pt(*line_width_mm));
            layer.set_line_dash_pattern(LineDashPattern {
                dash_1: Some(dash),
                gap_1: Some(dash),
                ..Default::default()
            });
            layer.add_rect(rect(layout, *x_mm, *y_mm, *width_mm, *height_mm).with_mode(PaintMode::Stroke));
            layer.set_line_dash_pattern(LineDashPattern::default());
        }
    }
}
