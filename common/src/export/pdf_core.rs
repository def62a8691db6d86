//! PDF export core shared by the CLI backend and tests.
//!
//! レコードを描画命令（PdfOp）のページ列に変換する。実際のPDF書き出しは
//! CLI側の printpdf バックエンドが担当する。
//!
//! 縦方向はカーソル（上端からのmm）で管理し、描画の前に必ず
//! `ensure_space` で残り高さを確認し、足りなければ改ページする。

use super::{bool_to_text, format_date_time, or_default};
use crate::layout::{
    pt_to_mm, PdfLayout, FONT_BODY_PT, FONT_CAPTION_PT, FONT_ITEM_PT, FONT_SECTION_PT,
    FONT_SUBSECTION_PT, FONT_SUBTITLE_PT, FONT_TITLE_PT,
};
use crate::types::ChecklistRecord;

/// RGB色（0-255）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const NAVY: Rgb = Rgb(0, 51, 102);
    pub const DARK_GRAY: Rgb = Rgb(50, 50, 50);
    pub const MID_GRAY: Rgb = Rgb(80, 80, 80);
    pub const STAMP_GRAY: Rgb = Rgb(150, 150, 150);
    pub const RULE_GRAY: Rgb = Rgb(200, 200, 200);
    pub const ROW_FILL: Rgb = Rgb(245, 247, 250);
    pub const ALICE_BLUE: Rgb = Rgb(240, 248, 255);
    pub const ISSUE_RED: Rgb = Rgb(200, 50, 50);
    pub const TEXT_RED: Rgb = Rgb(180, 0, 0);

    /// 0.0-1.0 の成分に変換
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// 描画命令。座標はすべてmm、Yはページ上端から
#[derive(Debug, Clone, PartialEq)]
pub enum PdfOp {
    /// テキスト（Yはベースライン）
    Text {
        text: String,
        x_mm: f32,
        y_mm: f32,
        size_pt: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Line {
        from_mm: (f32, f32),
        to_mm: (f32, f32),
        width_mm: f32,
        color: Rgb,
    },
    /// 塗りつぶし矩形（Yは上端）
    FillRect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        color: Rgb,
    },
    /// 破線の枠（押印欄）
    DashedRect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        line_width_mm: f32,
        dash_mm: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub ops: Vec<PdfOp>,
}

/// レイアウト済みのPDFレポート
#[derive(Debug, Clone, PartialEq)]
pub struct PdfReport {
    pub title: String,
    pub layout: PdfLayout,
    pub pages: Vec<PdfPage>,
}

impl PdfReport {
    /// 全ページのテキストを描画順に列挙
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| {
            page.ops.iter().filter_map(|op| match op {
                PdfOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
        })
    }
}

// ============================================
// 文字幅の近似（Helvetica）
// ============================================

/// 1文字の幅（em単位の近似値）
fn char_width_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.25,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | '-' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.85,
        c if c.is_uppercase() => 0.68,
        _ => 0.55,
    }
}

/// テキスト幅（mm）
pub fn text_width_mm(text: &str, size_pt: f32, weight: FontWeight) -> f32 {
    let em: f32 = text.chars().map(char_width_em).sum();
    let factor = match weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => 1.06,
    };
    pt_to_mm(em * size_pt) * factor
}

/// 指定幅に収まるよう単語単位で折り返す（改行は保持、長い単語は文字単位で分割）
pub fn split_text_to_size(text: &str, size_pt: f32, weight: FontWeight, max_width_mm: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, size_pt, weight) <= max_width_mm;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if current.chars().count() > 1 && !fits(&current) {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
        }
        lines.push(current);
    }
    lines
}

// ============================================
// 描画カーソル
// ============================================

const PAIR_LINE_MM: f32 = 6.0;
const PARAGRAPH_LINE_MM: f32 = 5.0;
const ITEM_LINE_MM: f32 = 5.0;
const PROBLEM_LINE_MM: f32 = 4.0;

/// ページ送りを管理する描画キャンバス
struct PdfCanvas {
    layout: PdfLayout,
    pages: Vec<PdfPage>,
    current: PdfPage,
    y: f32,
}

impl PdfCanvas {
    fn new(layout: PdfLayout) -> Self {
        let y = layout.top_y_mm;
        Self {
            layout,
            pages: Vec::new(),
            current: PdfPage::default(),
            y,
        }
    }

    fn margin(&self) -> f32 {
        self.layout.margin_mm
    }

    fn content_width(&self) -> f32 {
        self.layout.content_width_mm()
    }

    /// 残り高さが足りなければ改ページ
    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y + needed_mm > self.layout.page_break_y_mm {
            let finished = std::mem::take(&mut self.current);
            self.pages.push(finished);
            self.y = self.layout.top_y_mm;
        }
    }

    /// 改ページせずに収まるか
    fn fits(&self, needed_mm: f32) -> bool {
        self.y + needed_mm <= self.layout.page_break_y_mm
    }

    /// 1ページに確保できる最大の高さ
    fn page_capacity(&self) -> f32 {
        self.layout.page_break_y_mm - self.layout.top_y_mm
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn push(&mut self, op: PdfOp) {
        self.current.ops.push(op);
    }

    fn text_at(&mut self, text: impl Into<String>, x_mm: f32, y_mm: f32, size_pt: f32, weight: FontWeight, color: Rgb) {
        self.push(PdfOp::Text {
            text: text.into(),
            x_mm,
            y_mm,
            size_pt,
            weight,
            color,
        });
    }

    fn centered_text(&mut self, text: &str, size_pt: f32, weight: FontWeight, color: Rgb) {
        let width = text_width_mm(text, size_pt, weight);
        let x = (self.layout.page_width_mm - width) / 2.0;
        let y = self.y;
        self.text_at(text, x, y, size_pt, weight, color);
    }

    fn horizontal_rule(&mut self, color: Rgb, width_mm: f32) {
        let y = self.y;
        self.push(PdfOp::Line {
            from_mm: (self.margin(), y),
            to_mm: (self.layout.right_x_mm(), y),
            width_mm,
            color,
        });
    }

    /// 区切り線 + 10mm送り
    fn draw_rule(&mut self) {
        self.horizontal_rule(Rgb::RULE_GRAY, 0.5);
        self.advance(10.0);
    }

    fn add_title(&mut self, text: &str) {
        self.ensure_space(15.0);
        let (x, y) = (self.margin(), self.y);
        self.text_at(text, x, y, FONT_SECTION_PT, FontWeight::Bold, Rgb::NAVY);
        self.advance(8.0);
    }

    fn add_subtitle(&mut self, text: &str) {
        self.ensure_space(10.0);
        let (x, y) = (self.margin(), self.y);
        self.text_at(text, x, y, FONT_SUBSECTION_PT, FontWeight::Bold, Rgb::DARK_GRAY);
        self.advance(6.0);
    }

    /// "ラベル: 値" の行（値は折り返し）
    fn add_pair(&mut self, label: &str, value: &str, indent: f32) {
        self.ensure_space(7.0);
        let label_x = self.margin() + indent;
        let y = self.y;
        self.text_at(format!("{}:", label), label_x, y, FONT_BODY_PT, FontWeight::Bold, Rgb::BLACK);

        let label_width = text_width_mm(&format!("{}: ", label), FONT_BODY_PT, FontWeight::Bold);
        let value_x = label_x + label_width;
        let max_width = (self.content_width() - indent - label_width).max(10.0);
        let lines = split_text_to_size(value, FONT_BODY_PT, FontWeight::Regular, max_width);
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                self.ensure_space(PAIR_LINE_MM);
            }
            let y = self.y;
            self.text_at(line, value_x, y, FONT_BODY_PT, FontWeight::Regular, Rgb::BLACK);
            self.advance(PAIR_LINE_MM);
        }
    }

    /// 一覧の1行（背景付き）。見出しは折り返し、詳細行は見出しの下に続ける
    fn add_item_row(&mut self, header: &str, header_weight: FontWeight, detail: Option<String>) {
        let x = self.margin() + 2.0;
        let mut lines: Vec<(String, FontWeight)> =
            split_text_to_size(header, FONT_ITEM_PT, header_weight, self.content_width() - 4.0)
                .into_iter()
                .map(|line| (line, header_weight))
                .collect();
        if let Some(detail) = detail {
            lines.extend(
                split_text_to_size(&detail, FONT_ITEM_PT, FontWeight::Regular, self.content_width() - 4.0)
                    .into_iter()
                    .map(|line| (line, FontWeight::Regular)),
            );
        }

        let height = lines.len() as f32 * ITEM_LINE_MM + 4.0;
        self.ensure_space((height + 1.0).min(self.page_capacity()));
        let (y, width) = (self.y, self.content_width());
        let available = self.layout.page_break_y_mm - y + 4.0;
        self.push(PdfOp::FillRect {
            x_mm: self.margin(),
            y_mm: y - 4.0,
            width_mm: width,
            height_mm: height.min(available),
            color: Rgb::ROW_FILL,
        });

        for (k, (line, weight)) in lines.into_iter().enumerate() {
            if k > 0 {
                self.ensure_space(ITEM_LINE_MM);
            }
            let y = self.y;
            self.text_at(line, x, y, FONT_ITEM_PT, weight, Rgb::BLACK);
            self.advance(ITEM_LINE_MM);
        }
        self.advance(2.0);
    }

    fn add_paragraph(&mut self, text: &str, indent: f32) {
        self.add_colored_paragraph(text, indent, Rgb::BLACK);
    }

    fn add_colored_paragraph(&mut self, text: &str, indent: f32, color: Rgb) {
        self.ensure_space(10.0);
        let x = self.margin() + indent;
        let lines = split_text_to_size(text, FONT_BODY_PT, FontWeight::Regular, self.content_width() - indent);
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                self.ensure_space(PARAGRAPH_LINE_MM);
            }
            let y = self.y;
            self.text_at(line, x, y, FONT_BODY_PT, FontWeight::Regular, color);
            self.advance(PARAGRAPH_LINE_MM);
        }
        self.advance(2.0);
    }

    fn finish(mut self) -> Vec<PdfPage> {
        self.pages.push(self.current);
        self.pages
    }
}

// ============================================
// レポート本体
// ============================================

/// チェックリストをPDFページ列にレイアウト
pub fn render_pdf(record: &ChecklistRecord, conclusion: &str) -> PdfReport {
    render_pdf_with_layout(record, conclusion, PdfLayout::a4())
}

pub fn render_pdf_with_layout(record: &ChecklistRecord, conclusion: &str, layout: PdfLayout) -> PdfReport {
    let mut canvas = PdfCanvas::new(layout.clone());

    write_header(&mut canvas, record);
    write_infrastructure(&mut canvas, record);
    write_machines(&mut canvas, record);
    write_network_and_satisfaction(&mut canvas, record);
    write_conclusion(&mut canvas, record, conclusion);
    write_signature(&mut canvas, record);

    PdfReport {
        title: format!("Relatório de Checklist - {}", record.location_name),
        layout,
        pages: canvas.finish(),
    }
}

fn write_header(canvas: &mut PdfCanvas, data: &ChecklistRecord) {
    canvas.centered_text("Relatório de Checklist", FONT_TITLE_PT, FontWeight::Bold, Rgb::NAVY);
    canvas.advance(8.0);
    canvas.centered_text("Infraestrutura de TI", FONT_SUBTITLE_PT, FontWeight::Bold, Rgb::MID_GRAY);
    canvas.advance(15.0);
    canvas.horizontal_rule(Rgb::NAVY, 0.5);
    canvas.advance(10.0);

    canvas.add_pair("Local", &data.location_name, 0.0);
    canvas.add_pair("Data e Hora", &format_date_time(&data.visit_date), 0.0);
    canvas.add_pair("Responsável Local", or_default(&data.responsible_name, "N/A"), 0.0);
    canvas.add_pair("Técnico Responsável", &data.technician_name, 0.0);
    canvas.advance(5.0);
    canvas.draw_rule();
}

fn write_infrastructure(canvas: &mut PdfCanvas, data: &ChecklistRecord) {
    canvas.add_title("1. CPD / Infraestrutura");
    canvas.add_pair("Organização dos Cabos", data.cable_condition.label(), 0.0);
    if !data.cable_notes.is_empty() {
        canvas.add_paragraph(&format!("Obs: {}", data.cable_notes), 5.0);
    }
    canvas.advance(3.0);

    canvas.add_subtitle("Switches de Rede");
    if data.switches.is_empty() {
        canvas.add_paragraph("Nenhum switch registrado.", 5.0);
    } else {
        for (i, sw) in data.switches.iter().enumerate() {
            canvas.add_item_row(
                &format!("#{} | Qtd: {} | {} {}", i + 1, sw.quantity, sw.brand, sw.model),
                FontWeight::Bold,
                Some(format!(
                    "Portas: {} | Status: {}",
                    sw.ports,
                    if sw.condition_ok { "OK" } else { "Defeito" }
                )),
            );
            if !sw.notes.is_empty() {
                canvas.add_paragraph(&format!("Obs: {}", sw.notes), 5.0);
            }
            canvas.advance(2.0);
        }
    }
    canvas.advance(3.0);

    canvas.add_subtitle("Antenas Wi-Fi");
    if data.antennas.is_empty() {
        canvas.add_paragraph("Nenhuma antena registrada.", 5.0);
    } else {
        for (i, ant) in data.antennas.iter().enumerate() {
            canvas.add_item_row(
                &format!(
                    "#{} | Qtd: {} | {} | Status: {}",
                    i + 1,
                    ant.quantity,
                    ant.brand,
                    if ant.is_working { "OK" } else { "Falha" }
                ),
                FontWeight::Regular,
                None,
            );
            if !ant.notes.is_empty() {
                canvas.add_paragraph(&format!("Obs: {}", ant.notes), 5.0);
            }
            canvas.advance(2.0);
        }
    }
    canvas.advance(3.0);

    canvas.add_subtitle("Firewall");
    canvas.add_pair("Existe Firewall?", bool_to_text(data.has_firewall), 0.0);
    if data.has_firewall {
        canvas.add_pair("Marca", data.firewall_brand.as_str(), 5.0);
        canvas.add_pair(
            "Status",
            if data.firewall_working { "Operacional" } else { "Falha" },
            5.0,
        );
        if !data.firewall_notes.is_empty() {
            canvas.add_paragraph(&format!("Obs: {}", data.firewall_notes), 5.0);
        }
    }
}

fn write_machines(canvas: &mut PdfCanvas, data: &ChecklistRecord) {
    canvas.advance(5.0);
    canvas.add_title("2. Máquinas e Computadores");
    canvas.add_pair("Todas as máquinas OK?", bool_to_text(data.all_machines_ok), 0.0);

    if data.all_machines_ok {
        return;
    }
    canvas.advance(3.0);
    for (i, pm) in data.problematic_machines.iter().enumerate() {
        let problem_lines = split_text_to_size(
            &format!("Problema: {}", pm.problem_description),
            FONT_ITEM_PT,
            FontWeight::Regular,
            canvas.content_width() - 3.0,
        );
        canvas.ensure_space(20.0);

        let (x, y) = (canvas.margin(), canvas.y);
        canvas.text_at(
            format!("Máquina #{}: {}", i + 1, pm.identifier),
            x + 3.0,
            y + 4.0,
            FONT_BODY_PT,
            FontWeight::Bold,
            Rgb::BLACK,
        );
        canvas.text_at(
            format!("Proc: {} | Win11: {}", pm.processor_gen, bool_to_text(pm.os_updated)),
            x + 3.0,
            y + 9.0,
            FONT_ITEM_PT,
            FontWeight::Regular,
            Rgb::BLACK,
        );
        canvas.advance(14.0);

        // 左の赤線は改ページごとに区切って引き直す
        let mut bar_top = y;
        for line in problem_lines {
            if !canvas.fits(PROBLEM_LINE_MM) {
                push_issue_bar(canvas, x, bar_top);
                canvas.ensure_space(PROBLEM_LINE_MM);
                bar_top = canvas.y - PROBLEM_LINE_MM;
            }
            let y = canvas.y;
            canvas.text_at(line, x + 3.0, y, FONT_ITEM_PT, FontWeight::Regular, Rgb::TEXT_RED);
            canvas.advance(PROBLEM_LINE_MM);
        }
        push_issue_bar(canvas, x, bar_top);
    }
}

/// 問題端末ブロックの左線（bar_top から現在行の直下まで）
fn push_issue_bar(canvas: &mut PdfCanvas, x: f32, bar_top: f32) {
    let bottom = canvas.y - PROBLEM_LINE_MM + 1.0;
    canvas.push(PdfOp::Line {
        from_mm: (x, bar_top),
        to_mm: (x, bottom),
        width_mm: 0.1,
        color: Rgb::ISSUE_RED,
    });
}

fn write_network_and_satisfaction(canvas: &mut PdfCanvas, data: &ChecklistRecord) {
    canvas.advance(5.0);
    canvas.add_title("3. Pontos de Rede");
    canvas.add_pair(
        "Estado Geral",
        if data.network_points_ok { "Bons" } else { "Com defeitos" },
        0.0,
    );
    canvas.add_paragraph(
        &format!("Observações: {}", or_default(&data.network_points_notes, "Nenhuma.")),
        0.0,
    );

    canvas.advance(5.0);
    canvas.add_title("4. Satisfação");
    canvas.add_pair("Usuários Satisfeitos?", bool_to_text(data.employees_satisfied), 0.0);
    if !data.employees_satisfied {
        canvas.add_colored_paragraph(&format!("Reclamações: {}", data.complaints), 0.0, Rgb::TEXT_RED);
    }
}

fn write_conclusion(canvas: &mut PdfCanvas, data: &ChecklistRecord, conclusion: &str) {
    // 結論と署名欄が同じページに収まるよう余裕を確保
    canvas.ensure_space(50.0);
    canvas.draw_rule();
    canvas.add_title("Conclusão Técnica");

    let lines = split_text_to_size(
        conclusion.trim_end(),
        FONT_BODY_PT,
        FontWeight::Regular,
        canvas.content_width() - 10.0,
    );
    let wanted = (lines.len() as f32 * PARAGRAPH_LINE_MM + 5.0).max(30.0);
    let available = canvas.layout.page_break_y_mm - canvas.y;
    let (x, y, width) = (canvas.margin(), canvas.y, canvas.content_width());
    canvas.push(PdfOp::FillRect {
        x_mm: x,
        y_mm: y,
        width_mm: width,
        height_mm: wanted.min(available),
        color: Rgb::ALICE_BLUE,
    });
    canvas.advance(5.0);
    for line in lines {
        canvas.ensure_space(PARAGRAPH_LINE_MM);
        let y = canvas.y;
        canvas.text_at(line, x + 5.0, y, FONT_BODY_PT, FontWeight::Regular, Rgb::BLACK);
        canvas.advance(PARAGRAPH_LINE_MM);
    }
    canvas.advance(10.0);

    if !data.observations.is_empty() {
        canvas.add_subtitle("Observações Gerais");
        canvas.add_paragraph(&data.observations, 0.0);
    }
}

fn write_signature(canvas: &mut PdfCanvas, data: &ChecklistRecord) {
    canvas.ensure_space(40.0);
    canvas.advance(15.0);

    let (x, y) = (canvas.margin(), canvas.y);
    canvas.push(PdfOp::Line {
        from_mm: (x, y),
        to_mm: (x + 80.0, y),
        width_mm: 0.5,
        color: Rgb::BLACK,
    });
    canvas.text_at(data.technician_name.clone(), x, y + 5.0, FONT_BODY_PT, FontWeight::Bold, Rgb::BLACK);
    canvas.text_at("Técnico Responsável", x, y + 10.0, FONT_BODY_PT, FontWeight::Regular, Rgb::BLACK);

    // 押印欄（破線）
    let box_x = canvas.layout.right_x_mm() - 60.0;
    let box_y = y - 10.0;
    canvas.push(PdfOp::DashedRect {
        x_mm: box_x,
        y_mm: box_y,
        width_mm: 60.0,
        height_mm: 30.0,
        line_width_mm: 0.2,
        dash_mm: 2.0,
        color: Rgb::STAMP_GRAY,
    });
    let caption = "Carimbo";
    let caption_x = box_x + 30.0 - text_width_mm(caption, FONT_CAPTION_PT, FontWeight::Regular) / 2.0;
    canvas.text_at(caption, caption_x, box_y + 15.0, FONT_CAPTION_PT, FontWeight::Regular, Rgb::STAMP_GRAY);
}
