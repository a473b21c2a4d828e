use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use hofstede_model::{DEFAULT_PREFERENCE, DEFAULT_WEIGHT, Dimension, ScoredCountry};
use hofstede_score::{RadarChart, TraceKind};

const BAR_WIDTH: usize = 20;

pub fn ranking_table(rows: &[ScoredCountry], color_by: Dimension) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Country"),
        header_cell("Code"),
        header_cell("Similarity"),
        header_cell(""),
        header_cell(color_by.label()),
        header_cell("Total loss"),
    ]);
    apply_ranking_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);

    for (idx, row) in rows.iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(row.name()),
            dim_cell(&row.country.country_code),
            score_cell(row.similarity_score),
            Cell::new(score_bar(row.similarity_score)).fg(Color::Green),
            scale_cell(row.country.scores.get(color_by)),
            Cell::new(format!("{:.1}", row.total_loss)),
        ]);
    }
    table
}

pub fn best_match_line(best: &ScoredCountry) -> String {
    format!(
        "Best match: {} ({}) with similarity {:.1}",
        best.name(),
        best.country.country_code,
        best.similarity_score
    )
}

pub fn comparison_table(chart: &RadarChart) -> Table {
    let mut header = vec![header_cell("Dimension")];
    for trace in &chart.traces {
        let cell = match trace.kind {
            TraceKind::Country => header_cell(&trace.name),
            TraceKind::Preference => header_cell(&trace.name).fg(Color::Grey),
        };
        header.push(cell);
    }

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=chart.traces.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    for dimension in Dimension::ALL {
        let mut row = vec![Cell::new(dimension.label())];
        for trace in &chart.traces {
            let value = trace.value(dimension);
            row.push(match trace.kind {
                TraceKind::Country => trace_cell(value, trace.color),
                TraceKind::Preference => dim_cell(format_value(value)),
            });
        }
        table.add_row(row);
    }
    table
}

pub fn dimensions_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Dimension"),
        header_cell("Default preference"),
        header_cell("Default weight"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for dimension in Dimension::ALL {
        table.add_row(vec![
            Cell::new(dimension.key()).add_attribute(Attribute::Bold),
            Cell::new(dimension.label()),
            Cell::new(format_value(DEFAULT_PREFERENCE[dimension.index()])),
            Cell::new(format!("{DEFAULT_WEIGHT:.1}")),
        ]);
    }
    table
}

/// Horizontal bar for a score, clamped to [0, 100].
pub fn score_bar(score: f64) -> String {
    let clamped = score.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    bar
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_ranking_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::Absolute(Width::Fixed(BAR_WIDTH as u16 + 2)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(content: impl std::fmt::Display) -> Cell {
    Cell::new(content).fg(Color::DarkGrey)
}

fn score_cell(score: f64) -> Cell {
    let cell = Cell::new(format!("{score:.1}"));
    if score >= 80.0 {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else if score < 50.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

/// Dimension value colored on the fixed 0-100 scale.
fn scale_cell(value: i64) -> Cell {
    let color = match value {
        i64::MIN..=19 => Color::Blue,
        20..=39 => Color::Cyan,
        40..=59 => Color::Green,
        60..=79 => Color::Yellow,
        _ => Color::Red,
    };
    Cell::new(value).fg(color)
}

fn trace_cell(value: f64, color: &str) -> Cell {
    let cell = Cell::new(format_value(value));
    match color {
        "blue" => cell.fg(Color::Blue),
        "red" => cell.fg(Color::Red),
        _ => cell,
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use hofstede_model::{CountryRecord, DimensionScores, DimensionVector};

    use super::*;

    fn scored(name: &str, similarity_score: f64) -> ScoredCountry {
        ScoredCountry {
            country: CountryRecord {
                country_code: name[..3].to_uppercase(),
                country_name: name.to_string(),
                scores: DimensionScores::from_fn(|d| 10 * d.index() as i64),
            },
            losses: DimensionVector::splat(0.0),
            total_loss: 0.0,
            similarity_score,
        }
    }

    fn cell_text(table: &Table, row: usize, column: usize) -> String {
        table
            .row(row)
            .and_then(|r| r.cell_iter().nth(column))
            .map(Cell::content)
            .unwrap_or_default()
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(100.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
        assert_eq!(score_bar(-12.0).chars().filter(|c| *c == '░').count(), BAR_WIDTH);
        assert_eq!(score_bar(50.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(score_bar(73.4).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_ranking_table_rows() {
        let rows = vec![scored("Japan", 53.2), scored("Denmark", 85.0)];
        let table = ranking_table(&rows, Dimension::Mas);

        assert_eq!(table.row_count(), 2);
        assert_eq!(cell_text(&table, 0, 0), "1");
        assert_eq!(cell_text(&table, 0, 1), "Japan");
        assert_eq!(cell_text(&table, 1, 2), "DEN");
        assert_eq!(cell_text(&table, 1, 3), "85.0");
        // mas is index 2 -> 20
        assert_eq!(cell_text(&table, 1, 5), "20");
    }

    #[test]
    fn test_dimensions_table_lists_defaults() {
        let table = dimensions_table();
        assert_eq!(table.row_count(), Dimension::COUNT);
        assert_eq!(cell_text(&table, 1, 0), "idv");
        assert_eq!(cell_text(&table, 1, 2), "100");
        assert_eq!(cell_text(&table, 5, 3), "1.0");
    }

    #[test]
    fn test_best_match_line() {
        insta::assert_snapshot!(
            best_match_line(&scored("Denmark", 85.0)),
            @"Best match: Denmark (DEN) with similarity 85.0"
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(80.0), "80");
        assert_eq!(format_value(12.5), "12.5");
    }
}
