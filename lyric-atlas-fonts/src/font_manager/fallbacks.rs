//! Font fallback chain configuration.
//!
//! Defines the priority order of fallback fonts for lyric text.

/// Fallback font families in priority order.
///
/// Searched in order when the primary font cannot render a glyph. Japanese
/// lyrics are the main reason glyphs go missing, so CJK families come
/// first:
/// 1. Japanese UI and print fonts
/// 2. Chinese and Korean fonts
/// 3. Broad-coverage Latin/Unicode fonts
pub const FALLBACK_FAMILIES: &[&str] = &[
    // Japanese
    "Meiryo",
    "Yu Gothic",
    "MS Gothic",
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "Source Han Sans JP",
    "Hiragino Sans",
    "Hiragino Kaku Gothic ProN",
    // Chinese / Korean
    "Microsoft YaHei",
    "SimHei",
    "Noto Sans CJK SC",
    "Noto Sans CJK TC",
    "Malgun Gothic",
    "Noto Sans CJK KR",
    // General coverage
    "Segoe UI",
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Arial Unicode MS",
];
