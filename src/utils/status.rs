use crate::models::layer::LayerRegistry;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

/// Print the overlay layers the map will offer, one row per registered
/// layer, with the tile path segment each one resolves under.
pub fn print_layer_summary(registry: &LayerRegistry) {
    if registry.is_empty() {
        println!("\n⚠️ No overlay layers registered.\n");
        return;
    }

    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Layer")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
            Cell::new("Code")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
            Cell::new("Tile path")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
        ])
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    for layer in registry.iter() {
        table.add_row(vec![
            Cell::new(&layer.name),
            Cell::new(&layer.code).set_alignment(CellAlignment::Center),
            Cell::new(format!("/layers/{{start}}/{{d}}/{}/...", layer.code)),
        ]);
    }

    println!("\nOverlay layers:\n{}", table);
}
