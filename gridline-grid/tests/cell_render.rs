use serde_json::json;

use gridline_grid::column::{CellContent, CellPosition, ColumnSpec, render_cell};

fn position(page: u64, offset: usize) -> CellPosition {
    CellPosition {
        page,
        page_size: 10,
        offset,
    }
}

#[test]
fn plain_column_renders_the_resolved_value() {
    let column = ColumnSpec::new("Title", "title");
    let row = json!({"title": "Phone"});
    assert_eq!(
        render_cell(&column, &row, position(1, 0)),
        CellContent::Text("Phone".to_string())
    );
}

#[test]
fn nested_path_renders_through_intermediate_objects() {
    let column = ColumnSpec::new("Category", "category.name");
    let row = json!({"category": {"name": "Electronics"}});
    assert_eq!(
        render_cell(&column, &row, position(1, 0)),
        CellContent::Text("Electronics".to_string())
    );
}

#[test]
fn missing_data_renders_as_an_empty_cell() {
    let column = ColumnSpec::new("Category", "category.name");
    assert_eq!(
        render_cell(&column, &json!({"category": null}), position(1, 0)),
        CellContent::Empty
    );
    assert_eq!(
        render_cell(&column, &json!({}), position(1, 0)),
        CellContent::Empty
    );
}

#[test]
fn formatter_replaces_the_display_text() {
    let column =
        ColumnSpec::new("Price", "price").formatted(|row| format!("${}", row["price"]));
    let row = json!({"price": 99});
    assert_eq!(
        render_cell(&column, &row, position(1, 0)),
        CellContent::Text("$99".to_string())
    );
}

#[test]
fn class_hook_upgrades_to_a_styled_cell() {
    let column = ColumnSpec::new("Price", "price")
        .formatted(|row| format!("${}", row["price"]))
        .classed(|row| {
            if row["price"].as_i64().unwrap_or(0) > 100 {
                "text-red-500".to_string()
            } else {
                "text-green-500".to_string()
            }
        });
    assert_eq!(
        render_cell(&column, &json!({"price": 120}), position(1, 0)),
        CellContent::Styled {
            text: "$120".to_string(),
            class: "text-red-500".to_string(),
        }
    );
    assert_eq!(
        render_cell(&column, &json!({"price": 80}), position(1, 0)),
        CellContent::Styled {
            text: "$80".to_string(),
            class: "text-green-500".to_string(),
        }
    );
}

#[test]
fn renderer_delegates_the_whole_cell() {
    let column = ColumnSpec::new("Preview", "image").rendered_by("thumbnail");
    // The delegate wins even though the path would resolve.
    assert_eq!(
        render_cell(&column, &json!({"image": "a.png"}), position(1, 0)),
        CellContent::Component {
            renderer: "thumbnail".to_string()
        }
    );
}

#[test]
fn action_column_is_a_delegate_or_nothing() {
    let with_renderer = ColumnSpec::action("Actions").rendered_by("row-actions");
    assert_eq!(
        render_cell(&with_renderer, &json!({}), position(1, 0)),
        CellContent::Component {
            renderer: "row-actions".to_string()
        }
    );

    let bare = ColumnSpec::action("Actions");
    assert_eq!(render_cell(&bare, &json!({}), position(1, 0)), CellContent::Empty);
}

#[test]
fn index_column_numbers_rows_across_pages() {
    let column = ColumnSpec::index();
    assert!(column.is_index());
    assert_eq!(
        render_cell(&column, &json!({}), position(1, 0)),
        CellContent::Index(1)
    );
    assert_eq!(
        render_cell(&column, &json!({}), position(1, 9)),
        CellContent::Index(10)
    );
    assert_eq!(
        render_cell(&column, &json!({}), position(3, 4)),
        CellContent::Index(25)
    );
}

#[test]
fn reserved_property_names_map_to_computed_fields() {
    assert!(ColumnSpec::new("#", "index").is_index());
    assert!(ColumnSpec::new("Ops", "action").is_action());
    assert_eq!(ColumnSpec::new("Title", "title").path(), Some("title"));
}
