//! CSV layout loader.
//!
//! # CSV format
//!
//! One row per wall or object:
//!
//! ```csv
//! kind,x,y,entries
//! wall,5,5,
//! desk,4,5,bottom|right
//! sofa,2,8,
//! dispenser,5,4,top
//! ```
//!
//! `entries` is an optional `|`-separated list of approach sides; empty means
//! all four.  Width and height are not part of the file and are passed by
//! the caller.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dw_core::{Cell, Direction};

use crate::layout::{ObjectSpec, WorldLayout};
use crate::object::ObjectKind;
use crate::GridError;

#[derive(Deserialize)]
struct LayoutRecord {
    kind: String,
    x:    i32,
    y:    i32,
    #[serde(default)]
    entries: Option<String>,
}

/// Load a layout from a CSV file.
pub fn load_layout_csv(path: &Path, width: i32, height: i32) -> Result<WorldLayout, GridError> {
    let file = std::fs::File::open(path).map_err(GridError::Io)?;
    load_layout_reader(file, width, height)
}

/// Like [`load_layout_csv`] but from any `Read` source.
pub fn load_layout_reader<R: Read>(reader: R, width: i32, height: i32) -> Result<WorldLayout, GridError> {
    // Rows without the trailing `entries` column are accepted.
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut layout = WorldLayout::empty(width, height);

    for result in csv_reader.deserialize::<LayoutRecord>() {
        let row = result.map_err(|e| GridError::Parse(e.to_string()))?;
        let cell = Cell::new(row.x, row.y);

        if row.kind.trim().eq_ignore_ascii_case("wall") {
            layout.walls.push(cell);
            continue;
        }

        let kind: ObjectKind = row.kind.parse()?;
        let mut spec = ObjectSpec::new(kind, cell);
        if let Some(entries) = row.entries.as_deref() {
            spec.entries = parse_entries(entries)?;
        }
        layout.objects.push(spec);
    }

    Ok(layout)
}

fn parse_entries(s: &str) -> Result<Vec<Direction>, GridError> {
    s.split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<Direction>().map_err(GridError::from))
        .collect()
}
