//! French number, currency, and date formatting

use crate::{FrTextError, Result};
use chrono::{Datelike, NaiveDate};

/// Number names 0-16 (17-19 are composed from "dix")
const UNITS: [&str; 17] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize",
];

/// Tens up to sixty (70-99 are built on soixante / quatre-vingt)
const TENS: [&str; 7] = [
    "", "dix", "vingt", "trente", "quarante", "cinquante", "soixante",
];

/// Month names
const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Currency wording used for amounts in words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyNames {
    /// Symbol printed after formatted amounts (e.g. "DA")
    pub symbol: String,
    pub major_singular: String,
    pub major_plural: String,
    pub minor_singular: String,
    pub minor_plural: String,
}

impl CurrencyNames {
    /// Algerian dinar
    pub fn dinar() -> Self {
        Self {
            symbol: "DA".to_string(),
            major_singular: "dinar".to_string(),
            major_plural: "dinars".to_string(),
            minor_singular: "centime".to_string(),
            minor_plural: "centimes".to_string(),
        }
    }

    /// Euro
    pub fn euro() -> Self {
        Self {
            symbol: "€".to_string(),
            major_singular: "euro".to_string(),
            major_plural: "euros".to_string(),
            minor_singular: "centime".to_string(),
            minor_plural: "centimes".to_string(),
        }
    }
}

impl Default for CurrencyNames {
    fn default() -> Self {
        Self::dinar()
    }
}

/// French text formatting utilities
pub struct FrFormatter;

impl FrFormatter {
    /// Format an integer as French words
    pub fn format_number(n: i64) -> String {
        format_number_words(n)
    }

    /// Format an amount as French words with currency names
    pub fn format_amount(amount: f64, currency: &CurrencyNames) -> String {
        format_amount_words(amount, currency)
    }

    /// Format a money amount with separators and symbol
    pub fn format_money(amount: f64, currency: &CurrencyNames) -> String {
        format_money(amount, &currency.symbol)
    }

    /// Format a date as dd/mm/yyyy
    pub fn format_date_short(date: NaiveDate) -> String {
        format_date_short(date)
    }

    /// Format a date as "17 octobre 2026"
    pub fn format_date_long(date: NaiveDate) -> String {
        format_date_long(date)
    }
}

/// Format an integer as French words (traditional spelling)
///
/// # Examples
/// ```
/// use fr_text::format_number_words;
/// assert_eq!(format_number_words(0), "zéro");
/// assert_eq!(format_number_words(71), "soixante et onze");
/// assert_eq!(format_number_words(35000), "trente-cinq mille");
/// ```
pub fn format_number_words(n: i64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let words = spell(n.unsigned_abs(), true);
    if n < 0 {
        format!("moins {words}")
    } else {
        words
    }
}

/// Spell a non-zero number
///
/// `plural_ok` is false when the number is directly followed by "mille",
/// which keeps "cent" and "quatre-vingt" invariable.
fn spell(n: u64, plural_ok: bool) -> String {
    const SCALES: [(u64, &str, &str); 2] = [
        (1_000_000_000, "milliard", "milliards"),
        (1_000_000, "million", "millions"),
    ];

    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;

    for (scale, singular, plural) in SCALES {
        let count = rest / scale;
        rest %= scale;
        if count > 0 {
            let noun = if count > 1 { plural } else { singular };
            parts.push(format!("{} {noun}", spell(count, true)));
        }
    }

    let thousands = rest / 1000;
    rest %= 1000;
    match thousands {
        0 => {}
        1 => parts.push("mille".to_string()),
        t => parts.push(format!("{} mille", below_thousand(t, false))),
    }

    if rest > 0 {
        parts.push(below_thousand(rest, plural_ok));
    }

    parts.join(" ")
}

fn below_thousand(n: u64, plural_ok: bool) -> String {
    let hundreds = (n / 100) as usize;
    let rest = n % 100;

    let mut parts: Vec<String> = Vec::new();
    match hundreds {
        0 => {}
        1 => parts.push("cent".to_string()),
        h if rest == 0 && plural_ok => parts.push(format!("{} cents", UNITS[h])),
        h => parts.push(format!("{} cent", UNITS[h])),
    }

    if rest > 0 {
        parts.push(below_hundred(rest, plural_ok));
    }

    parts.join(" ")
}

fn below_hundred(n: u64, plural_ok: bool) -> String {
    let n = n as usize;
    match n {
        0..=16 => UNITS[n].to_string(),
        17..=19 => format!("dix-{}", UNITS[n - 10]),
        20..=69 => {
            let tens = TENS[n / 10];
            match n % 10 {
                0 => tens.to_string(),
                1 => format!("{tens} et un"),
                u => format!("{tens}-{}", UNITS[u]),
            }
        }
        71 => "soixante et onze".to_string(),
        70..=79 => format!("soixante-{}", below_hundred((n - 60) as u64, plural_ok)),
        80 if plural_ok => "quatre-vingts".to_string(),
        80 => "quatre-vingt".to_string(),
        _ => format!("quatre-vingt-{}", below_hundred((n - 80) as u64, plural_ok)),
    }
}

/// Format an amount in words with currency names
///
/// # Examples
/// ```
/// use fr_text::{format_amount_words, CurrencyNames};
/// let dinar = CurrencyNames::dinar();
/// assert_eq!(format_amount_words(35000.0, &dinar), "trente-cinq mille dinars");
/// assert_eq!(format_amount_words(1.5, &dinar), "un dinar et cinquante centimes");
/// ```
pub fn format_amount_words(amount: f64, currency: &CurrencyNames) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }

    let total_minor = (amount.abs() * 100.0).round() as u64;
    let major = total_minor / 100;
    let minor = total_minor % 100;

    let major_words = || {
        let noun = if major == 1 {
            &currency.major_singular
        } else {
            &currency.major_plural
        };
        // "un million de dinars"
        let joiner = if major >= 1_000_000 && major % 1_000_000 == 0 {
            " de "
        } else {
            " "
        };
        format!("{}{joiner}{noun}", format_number_words(major as i64))
    };
    let minor_words = || {
        let noun = if minor == 1 {
            &currency.minor_singular
        } else {
            &currency.minor_plural
        };
        format!("{} {noun}", format_number_words(minor as i64))
    };

    let words = match (major, minor) {
        (0, 0) => format!("{} {}", UNITS[0], currency.major_singular),
        (_, 0) => major_words(),
        (0, _) => minor_words(),
        _ => format!("{} et {}", major_words(), minor_words()),
    };

    if amount < 0.0 && total_minor > 0 {
        format!("moins {words}")
    } else {
        words
    }
}

/// Format a money amount as "35 000,00 DA"
pub fn format_money(amount: f64, symbol: &str) -> String {
    let number = render_float("# ###,##", amount);
    if symbol.is_empty() {
        number
    } else {
        format!("{number} {symbol}")
    }
}

/// Format a date as dd/mm/yyyy
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a date in long French form ("1er mars 2026", "17 octobre 2026")
pub fn format_date_long(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    let day = if date.day() == 1 {
        "1er".to_string()
    } else {
        date.day().to_string()
    };
    format!("{day} {month} {}", date.year())
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| FrTextError::InvalidDate(format!("{text}. Expected YYYY-MM-DD")))
}

/// Render a float with formatting pattern
///
/// Supports patterns like "#,###.##" and "# ###,##": the last separator
/// followed by other than exactly three placeholders (or differing from the
/// other separators) is the decimal separator.
pub fn render_float(format: &str, n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let spec = parse_format(format);

    let abs_n = n.abs();
    let multiplier = 10_f64.powi(spec.precision as i32);
    let rounded = (abs_n * multiplier).round() / multiplier;

    let int_part = rounded.floor() as i64;
    let frac_part = ((rounded - rounded.floor()) * multiplier).round() as i64;

    let int_str = format_with_thousands(int_part, spec.thousands);

    let sign = if n < -0.000000001 { "-" } else { "" };

    if spec.precision > 0 {
        let frac_str = format!("{:0>width$}", frac_part, width = spec.precision as usize);
        format!("{sign}{int_str}{}{frac_str}", spec.decimal)
    } else {
        format!("{sign}{int_str}")
    }
}

struct NumberFormat {
    precision: u8,
    thousands: Option<char>,
    decimal: char,
}

/// Parse format pattern to extract precision and separators
fn parse_format(format: &str) -> NumberFormat {
    if format.is_empty() {
        return NumberFormat {
            precision: 2,
            thousands: Some(' '),
            decimal: ',',
        };
    }

    let separators: Vec<(usize, char)> = format
        .char_indices()
        .filter(|(_, c)| matches!(c, '.' | ',' | ' '))
        .collect();

    let decimal = match separators.last() {
        Some(&(pos, c)) if c != ' ' => {
            let trailing = format[pos + 1..]
                .chars()
                .filter(|c| *c == '#' || *c == '0')
                .count();
            let mixed = separators.iter().any(|&(_, other)| other != c);
            if mixed || trailing != 3 {
                Some((pos, c, trailing))
            } else {
                None
            }
        }
        _ => None,
    };

    let thousands = separators
        .iter()
        .find(|&&(pos, _)| decimal.map(|(d, _, _)| d) != Some(pos))
        .map(|&(_, c)| c);

    match decimal {
        Some((_, c, trailing)) => NumberFormat {
            precision: trailing as u8,
            thousands,
            decimal: c,
        },
        None => NumberFormat {
            precision: 0,
            thousands,
            decimal: ',',
        },
    }
}

/// Format integer with thousand separators
fn format_with_thousands(n: i64, sep: Option<char>) -> String {
    let s = n.to_string();
    let Some(sep) = sep else {
        return s;
    };

    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, sep);
        }
        result.insert(0, c);
    }

    result
}
