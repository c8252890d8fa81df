/// One raw spreadsheet cell, before any header is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawCell {
    /// True for empty cells and whitespace-only text.
    pub fn is_missing(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            RawCell::Number(n) => n.is_nan(),
            RawCell::Bool(_) => false,
        }
    }

    /// Trimmed string form, as a spreadsheet would display the value.
    ///
    /// Whole numbers drop the fractional part (`2024.0` -> `"2024"`).
    pub fn normalized(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.trim().to_string(),
            RawCell::Number(n) => format_number(*n),
            RawCell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        }
    }

    /// Numeric value of the cell, if it has one.
    ///
    /// Text is accepted in plain (`1234.5`) or pt-BR (`1.234,5`) notation.
    /// A comma, or dots that only group thousands (`1.500`), selects pt-BR.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Number(n) if n.is_finite() => Some(*n),
            RawCell::Text(s) => parse_number(s),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // pt-BR: '.' groups thousands, ',' marks decimals
    let plain = if trimmed.contains(',') || is_grouped_thousands(trimmed) {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    plain.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Dot-separated groups of three digits after a 1-3 digit lead that does
/// not start with `0`: `1.500`, `-12.345.678`.
fn is_grouped_thousands(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let groups: Vec<&str> = digits.split('.').collect();
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());

    let Some((lead, rest)) = groups.split_first() else {
        return false;
    };
    !rest.is_empty()
        && all_digits(lead)
        && lead.len() <= 3
        && !lead.starts_with('0')
        && rest.iter().all(|g| g.len() == 3 && all_digits(g))
}

/// The raw cell grid of one sheet, with absolute row/column positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<RawCell>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell at (row, col); positions outside the used area read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&RawCell::Empty)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}
