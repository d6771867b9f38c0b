//! Reader for plain-text item lists.
//!
//! The accepted layout is the one produced by the test-case generator:
//!
//! ```text
//! Given width: 100
//! Number of rectangles: 3
//! Width	Height
//! 60	10
//! 50	8
//! 40	12
//! ```
//!
//! The two `key: value` lines and the column header are optional, so a bare list of
//! `width height` pairs (any whitespace) is accepted too. Blank lines and lines starting
//! with `#` are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ItemFault, Result, ShelfPackError};
use crate::model::Item;

/// Items read from a list, plus the strip width the list declares (if any).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemList {
    pub given_width: Option<u32>,
    pub items: Vec<Item>,
}

pub fn read_items(path: impl AsRef<Path>) -> Result<ItemList> {
    let text = fs::read_to_string(path)?;
    parse_items(&text)
}

pub fn parse_items(text: &str) -> Result<ItemList> {
    let mut list = ItemList::default();
    let mut declared: Option<(usize, usize)> = None; // (count, line)

    for (n, raw) in text.lines().enumerate() {
        let line_no = n + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "given width" => {
                    let w = parse_header_value(value, line_no)?;
                    if w == 0 {
                        return Err(parse_err(line_no, "given width must be positive"));
                    }
                    let w = u32::try_from(w)
                        .map_err(|_| parse_err(line_no, "given width out of range"))?;
                    list.given_width = Some(w);
                }
                "number of rectangles" => {
                    let c = parse_header_value(value, line_no)?;
                    let c = usize::try_from(c)
                        .map_err(|_| parse_err(line_no, "rectangle count out of range"))?;
                    declared = Some((c, line_no));
                }
                other => {
                    return Err(parse_err(line_no, &format!("unknown header '{}'", other)));
                }
            }
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(parse_err(line_no, "expected 'width height'"));
        };
        if a.eq_ignore_ascii_case("width") && b.eq_ignore_ascii_case("height") {
            continue;
        }
        let width = parse_dim(a, line_no)?;
        let height = parse_dim(b, line_no)?;
        let index = list.items.len();
        if width <= 0 || height <= 0 {
            return Err(ShelfPackError::InvalidItem {
                index,
                width,
                height,
                reason: ItemFault::NonPositive,
            });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(parse_err(line_no, "dimension out of range"));
        };
        list.items.push(Item::new(w, h));
    }

    if let Some((count, line)) = declared {
        if count != list.items.len() {
            return Err(parse_err(
                line,
                &format!(
                    "declared {} rectangles but found {}",
                    count,
                    list.items.len()
                ),
            ));
        }
    }
    Ok(list)
}

fn parse_header_value(value: &str, line: usize) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| parse_err(line, &format!("invalid number '{}': {}", value, e)))
}

fn parse_dim(token: &str, line: usize) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|e| parse_err(line, &format!("invalid dimension '{}': {}", token, e)))
}

fn parse_err(line: usize, message: &str) -> ShelfPackError {
    ShelfPackError::Parse {
        line,
        message: message.to_string(),
    }
}
