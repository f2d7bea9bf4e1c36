//! CSV export of a campaign's products.
//!
//! Fixed column order, every field double-quoted, embedded quotes doubled,
//! line breaks flattened to spaces. One header line plus one line per
//! product, no trailing newline.

use crate::model::ProductForScript;

pub const HEADER: &str = "Name,RegularPrice,SalePrice,Code,Link";

/// One parsed CSV row, in column order.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub name: String,
    pub regular_price: String,
    pub sale_price: String,
    pub code: String,
    pub link: String,
}

pub fn to_csv(products: &[ProductForScript]) -> String {
    let mut lines = Vec::with_capacity(products.len() + 1);
    lines.push(HEADER.to_string());
    for p in products {
        let fields = [
            p.clean_name.as_str(),
            p.regular_price.as_str(),
            p.sale_price.as_str(),
            p.code_label(),
            p.link.as_str(),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Parses text written by [`to_csv`] back into rows, skipping the header.
#[cfg(test)]
pub fn parse_csv(text: &str) -> Result<Vec<CsvRow>, String> {
    let mut rows = Vec::new();
    for (n, line) in text.lines().enumerate().skip(1) {
        let fields = split_line(line).map_err(|e| format!("line {}: {e}", n + 1))?;
        let [name, regular_price, sale_price, code, link]: [String; 5] =
            fields.try_into().map_err(|f: Vec<String>| {
                format!("line {}: expected 5 fields, got {}", n + 1, f.len())
            })?;
        rows.push(CsvRow {
            name,
            regular_price,
            sale_price,
            code,
            link,
        });
    }
    Ok(rows)
}

fn quote(field: &str) -> String {
    let flat = field.replace(['\r', '\n'], " ");
    format!("\"{}\"", flat.replace('"', "\"\""))
}

#[cfg(test)]
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err("unterminated quoted field".to_string()),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                field.push(c);
                chars.next();
            }
        }
        fields.push(field);

        match chars.next() {
            Some(',') => {}
            None => return Ok(fields),
            Some(c) => return Err(format!("unexpected '{c}' after quoted field")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Asin;

    fn product(asin: &str, name: &str, code: Option<&str>) -> ProductForScript {
        ProductForScript {
            asin: Asin::parse(asin).unwrap(),
            clean_name: name.into(),
            regular_price: "40.00".into(),
            sale_price: "30.00".into(),
            code: code.map(String::from),
            discount: "25".into(),
            image_url: String::new(),
            link: format!("https://www.amazon.com/dp/{asin}"),
            tagline: String::new(),
        }
    }

    #[test]
    fn one_line_per_product_plus_header() {
        let products = vec![
            product("A1", "Widget", Some("SAVE10")),
            product("B2", "Gadget", None),
            product("C3", "Gizmo", Some("GIZ")),
        ];
        let csv = to_csv(&products);

        assert_eq!(csv.lines().count(), products.len() + 1);
        assert_eq!(csv.lines().next(), Some(HEADER));
    }

    #[test]
    fn rows_parse_back_to_their_inputs() {
        let products = vec![
            product("A1", "Widget, \"Deluxe\" Edition", Some("SAVE10")),
            product("B2", "Gadget", None),
        ];
        let rows = parse_csv(&to_csv(&products)).unwrap();

        assert_eq!(rows.len(), 2);
        for (row, p) in rows.iter().zip(&products) {
            assert_eq!(row.name, p.clean_name);
            assert_eq!(row.regular_price, p.regular_price);
            assert_eq!(row.sale_price, p.sale_price);
            assert_eq!(row.code, p.code_label());
            assert_eq!(row.link, p.link);
        }
    }

    #[test]
    fn line_breaks_stay_on_their_row() {
        let mut products = vec![product("A1", "Widget", Some("SA\nVE"))];
        products[0].regular_price = "40\r\n.00".into();
        let csv = to_csv(&products);

        assert_eq!(csv.lines().count(), 2);
        let rows = parse_csv(&csv).unwrap();
        assert_eq!(rows[0].code, "SA VE");
    }

    #[test]
    fn every_field_is_quoted() {
        let csv = to_csv(&[product("A1", "Widget", None)]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#""Widget","40.00","30.00","None shown","https://www.amazon.com/dp/A1""#
        );
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        let err = parse_csv("h\n\"a\",\"b\"").unwrap_err();
        assert!(err.contains("expected 5 fields"));
    }
}
