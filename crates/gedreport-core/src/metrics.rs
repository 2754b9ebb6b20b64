//! Text measurement
//!
//! The export engine only needs to know how wide a string is at a given
//! font size. [`HelveticaMetrics`] answers that from the standard Helvetica
//! AFM widths, which matches the font the PDF writer embeds by name.

/// Width of text in the same unit as the page geometry
pub trait TextMeasure {
    fn width(&self, text: &str, font_size: f64) -> f64;
}

/// Standard 14 Helvetica metrics (units per 1000 em)
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl TextMeasure for HelveticaMetrics {
    fn width(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
        units as f64 * font_size / 1000.0
    }
}

/// Advance width of one character in 1/1000 em
pub fn char_width(c: char) -> u16 {
    if c.is_ascii() {
        return ASCII_WIDTHS
            .get((c as usize).wrapping_sub(32))
            .copied()
            .unwrap_or(0);
    }

    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'è' | 'é' | 'ê' | 'ë' | 'ñ' | 'ò' | 'ó' | 'ô'
        | 'õ' | 'ö' | 'ù' | 'ú' | 'û' | 'ü' | 'ð' | 'ø' | 'ß' => 556,
        'ì' | 'í' | 'î' | 'ï' => 278,
        'ç' | 'ý' | 'ÿ' => 500,
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'È' | 'É' | 'Ê' | 'Ë' | 'Ý' => 667,
        'Ì' | 'Í' | 'Î' | 'Ï' => 278,
        'Ç' | 'Ñ' | 'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ð' => 722,
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 778,
        'Æ' | 'Œ' => 1000,
        'æ' | 'œ' => 889,
        '\u{a0}' => 278,
        '«' | '»' => 556,
        '°' => 400,
        '–' => 556,
        '—' | '…' | '‰' => 1000,
        '‘' | '’' | '‚' => 222,
        '“' | '”' | '„' => 333,
        '•' => 350,
        '€' => 556,
        c if c.is_uppercase() => 667,
        _ => 556,
    }
}

/// Helvetica widths for U+0020..=U+007E
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
