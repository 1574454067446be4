use bodyforge::batch::BatchOutcome;
use bodyforge::measurement::MeasurementVector;
use bodyforge::probe::ProbeSummary;
use bodyforge::solver::{BodyDimensions, SegmentChain};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn weight_color(value: f64) -> Color {
    if value > 0.0 {
        Color::Green
    } else if value < 0.0 {
        Color::Red
    } else {
        Color::Reset
    }
}

pub fn print_shape_keys(dims: &BodyDimensions, precision: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Shape Key").add_attribute(Attribute::Bold),
        Cell::new("Weight").fg(Color::Cyan),
    ]);

    for w in &dims.body_dimensions {
        table.add_row(vec![
            Cell::new(&w.key),
            Cell::new(format!("{:.*}", precision, w.value)).fg(weight_color(w.value)),
        ]);
    }
    align_right(&mut table, 1, 1);
    println!("\n{}", table);
}

pub fn print_bone_scales(dims: &BodyDimensions, precision: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Bone").add_attribute(Attribute::Bold),
        Cell::new("X"),
        Cell::new("Y").fg(Color::Cyan),
        Cell::new("Z"),
    ]);

    for b in &dims.body_dimension_lengths {
        table.add_row(vec![
            Cell::new(&b.key),
            Cell::new(format!("{:.*}", precision, b.value.x)),
            Cell::new(format!("{:.*}", precision, b.value.y)).fg(Color::Cyan),
            Cell::new(format!("{:.*}", precision, b.value.z)),
        ]);
    }
    align_right(&mut table, 1, 3);
    println!("\n{}", table);
}

pub fn print_chain(chain: &SegmentChain, precision: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Segment").add_attribute(Attribute::Bold),
        Cell::new("Driver"),
        Cell::new("Scale").fg(Color::Cyan),
        Cell::new("Virtual Driver"),
    ]);

    for stage in &chain.stages {
        let (driver, virtual_driver) = match stage.driving_key {
            Some(key) => (
                key.to_string(),
                stage
                    .virtual_state
                    .value(key)
                    .map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v)),
            ),
            None => ("(torso)".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(stage.segment.to_string()).add_attribute(Attribute::Bold),
            Cell::new(driver),
            Cell::new(format!("{:.*}", precision, stage.scale)).fg(Color::Cyan),
            Cell::new(virtual_driver),
        ]);
    }
    align_right(&mut table, 2, 3);
    println!("\n{}", table);
}

pub fn print_inputs(inputs: &MeasurementVector, precision: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Measurement").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    for (key, value) in inputs.iter() {
        table.add_row(vec![
            Cell::new(key.to_string()),
            Cell::new(format!("{:.*}", precision, value)),
        ]);
    }
    align_right(&mut table, 1, 1);
    println!("\n{}", table);
}

pub fn print_probe_summary(summary: &ProbeSummary, precision: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    table.add_row(vec![
        Cell::new("Samples"),
        Cell::new(summary.samples.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Succeeded").fg(Color::Green),
        Cell::new(summary.succeeded.to_string()).fg(Color::Green),
    ]);
    for (kind, count) in &summary.failures {
        table.add_row(vec![
            Cell::new(format!("Failed: {}", kind)).fg(Color::Red),
            Cell::new(count.to_string()).fg(Color::Red),
        ]);
    }
    if summary.succeeded > 0 {
        table.add_row(vec![
            Cell::new("Min Scale"),
            Cell::new(format!("{:.*}", precision, summary.min_scale)),
        ]);
        table.add_row(vec![
            Cell::new("Max Scale"),
            Cell::new(format!("{:.*}", precision, summary.max_scale)),
        ]);
        table.add_row(vec![
            Cell::new("Max |Weight|"),
            Cell::new(format!("{:.*}", precision, summary.max_abs_weight)),
        ]);
    }
    align_right(&mut table, 1, 1);
    println!("\n{}", table);
}

pub fn print_batch_summary(outcomes: &[BatchOutcome]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Row").add_attribute(Attribute::Bold),
        Cell::new("Status"),
    ]);
    for o in outcomes {
        let status = match &o.error {
            None => Cell::new("ok").fg(Color::Green),
            Some(e) => Cell::new(e).fg(Color::Red),
        };
        table.add_row(vec![Cell::new(&o.id), status]);
    }
    eprintln!("\n{}", table);
}
