//! レイアウト設定モジュール
//!
//! mm基準のPDFレイアウト定義（Source of Truth）。
//! Y座標はページ上端からの距離（mm）で扱い、描画時にPDF座標へ変換する。

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 左右余白・ページ先頭位置（mm）
pub const MARGIN_MM: f32 = 20.0;
pub const TOP_Y_MM: f32 = 20.0;

/// この位置を超える描画は改ページしてから行う（mm、上から）
pub const PAGE_BREAK_Y_MM: f32 = 280.0;

/// 本文幅（mm）
pub const CONTENT_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 170mm

// ============================================
// フォントサイズ（pt）
// ============================================

pub const FONT_TITLE_PT: f32 = 18.0;
pub const FONT_SUBTITLE_PT: f32 = 14.0;
pub const FONT_SECTION_PT: f32 = 14.0;
pub const FONT_SUBSECTION_PT: f32 = 12.0;
pub const FONT_BODY_PT: f32 = 10.0;
pub const FONT_ITEM_PT: f32 = 9.0;
pub const FONT_CAPTION_PT: f32 = 8.0;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

// ============================================
// レイアウト設定構造体
// ============================================

/// PDFレイアウト設定
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    /// ページ幅（mm）
    pub page_width_mm: f32,
    /// ページ高さ（mm）
    pub page_height_mm: f32,
    /// 左右余白（mm）
    pub margin_mm: f32,
    /// 改ページ後の開始位置（mm、上から）
    pub top_y_mm: f32,
    /// 改ページ判定位置（mm、上から）
    pub page_break_y_mm: f32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PdfLayout {
    /// A4縦
    pub fn a4() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            top_y_mm: TOP_Y_MM,
            page_break_y_mm: PAGE_BREAK_Y_MM,
        }
    }

    /// 本文幅（mm）
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    /// 右端のX座標（mm）
    pub fn right_x_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm
    }

    /// 上端基準のY座標をPDF座標（下端基準）に変換
    pub fn to_pdf_y_mm(&self, y_from_top_mm: f32) -> f32 {
        self.page_height_mm - y_from_top_mm
    }
}

// ============================================
// ヘルパー関数
// ============================================

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}
