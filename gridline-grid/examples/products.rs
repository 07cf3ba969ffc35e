//! Products grid example - drives a server-style paginated grid end to end.
//!
//! A 25-row products collection sits behind a simulated slow source. The
//! grid pages, sorts, and filters against it exactly the way a UI shell
//! would: fire an event, keep rendering the previous rows while the fetch
//! is in flight, then render the accepted result.
//!
//! Run with: cargo run --example products

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::LevelFilter;
use serde_json::json;
use simplelog::{Config, SimpleLogger};

use gridline_grid::column::{CellContent, ColumnSpec, FilterKind};
use gridline_grid::grid::{Grid, GridConfig, LoadPhase};
use gridline_lib::error::FetchError;
use gridline_lib::memory::MemorySource;
use gridline_lib::page::PageData;
use gridline_lib::query::{MatchKind, QueryConfig};
use gridline_lib::request::{FilterSet, PageRequest, SortSpec};
use gridline_lib::row::Row;
use gridline_lib::source::RowSource;

// =============================================================================
// Simulated remote source
// =============================================================================

/// Wraps an in-memory source behind an artificial network delay.
struct SlowSource {
    inner: MemorySource,
    delay: Duration,
}

#[async_trait]
impl RowSource for SlowSource {
    async fn fetch(&self, request: &PageRequest) -> Result<PageData, FetchError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch(request).await
    }
}

fn products() -> Vec<Row> {
    let names = [
        "Phone", "Laptop", "Headset", "Monitor", "Keyboard", "Mouse", "Webcam", "Dock",
        "Tablet", "Charger", "Speaker", "Router", "Printer", "Scanner", "Desk Lamp", "Cable",
        "Adapter", "Stand", "Backpack", "Notebook", "Pen Set", "Organizer", "Chair", "Desk",
        "Whiteboard",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = i as i64 + 1;
            json!({
                "id": id,
                "title": name,
                "description": format!("A dependable {}", name.to_lowercase()),
                "price": 15 + (id * 13) % 140,
                "category": {"name": if id % 3 == 0 { "Office" } else { "Electronics" }},
            })
        })
        .collect()
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Title", "title")
            .sortable()
            .filterable(FilterKind::Text),
        ColumnSpec::new("Description", "description"),
        ColumnSpec::new("Price", "price")
            .sortable()
            .formatted(|row| format!("${}", row["price"]))
            .classed(|row| match row["price"].as_i64().unwrap_or(0) {
                price if price > 100 => "text-red-500".to_string(),
                price if price > 50 => "text-orange-500".to_string(),
                _ => "text-green-500".to_string(),
            }),
        ColumnSpec::new("Category", "category.name").filterable(FilterKind::Select),
    ]
}

// =============================================================================
// Rendering
// =============================================================================

fn print_page(grid: &Grid) {
    let columns = grid.visible_columns();
    let headers: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    println!("  {}", headers.join(" | "));

    for offset in 0..grid.rows().len() {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| match grid.cell(offset, column) {
                CellContent::Empty => String::new(),
                CellContent::Text(text) => text,
                CellContent::Styled { text, class } => format!("{text} [{class}]"),
                CellContent::Component { renderer } => format!("<{renderer}>"),
                CellContent::Index(n) => n.to_string(),
            })
            .collect();
        println!("  {}", cells.join(" | "));
    }
    if let Some(report) = grid.page_report() {
        println!("  {report}");
    }
    println!();
}

async fn settle(grid: &Grid) {
    while grid.phase() == LoadPhase::Loading {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), FetchError> {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());

    let config = QueryConfig::new("id")
        .sortable(["id", "title", "price"])
        .filterable("title", MatchKind::Contains)
        .filterable("category.name", MatchKind::Equals)
        .searchable(["title", "description"])
        .max_page_size(100);
    let source = SlowSource {
        inner: MemorySource::new(products(), config),
        delay: Duration::from_millis(50),
    };

    let grid = Grid::new(
        columns(),
        GridConfig::new().with_index(),
        Arc::new(source),
    );

    println!("First page, default ordering:");
    grid.load()?;
    settle(&grid).await;
    print_page(&grid);

    println!("Sorted by price, descending:");
    grid.sort_change(&[SortSpec::desc("price")])?;
    settle(&grid).await;
    print_page(&grid);

    println!("Global search for \"phone\":");
    grid.filter_change(Some(FilterSet::global("phone")))?;
    settle(&grid).await;
    print_page(&grid);

    println!("Filter cleared, page 2:");
    grid.filter_change(None)?;
    settle(&grid).await;
    grid.page_change(2, 10)?;
    settle(&grid).await;
    print_page(&grid);

    grid.shutdown();
    Ok(())
}
