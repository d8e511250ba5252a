pub mod indicators_report;

use rust_xlsxwriter::{Format, FormatBorder};

pub use indicators_report::generate_indicators_report;

/// Cabeçalho azul, texto branco, negrito, borda fina.
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

/// Formato número decimal #,##0.00
pub fn create_number_format() -> Format {
    Format::new().set_num_format("#,##0.00")
}

/// Formato inteiro #,##0
pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}

/// Formato percentual 0.0%
pub fn create_percent_format() -> Format {
    Format::new().set_num_format("0.0%")
}
