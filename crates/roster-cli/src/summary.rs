use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use roster_model::{DataQualityReport, SourceKind};
use roster_search::SearchOutcome;

use crate::commands::ReconcileRunResult;

pub fn print_reconcile_summary(result: &ReconcileRunResult) {
    match &result.store_path {
        Some(path) => println!("Store: {}", path.display()),
        None => println!("Dry run: no files written"),
    }
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    print_report(&result.report);
}

pub fn print_report(report: &DataQualityReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Records"),
        header_cell("Merged"),
        header_cell("Expanded"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = (0usize, 0usize, 0usize, 0usize);
    for kind in SourceKind::processing_order() {
        if !report.per_source.contains_key(&kind) {
            continue;
        }
        let counts = report.counts_for(kind);
        totals.0 += counts.total;
        totals.1 += counts.merged;
        totals.2 += counts.expanded;
        totals.3 += counts.skipped_malformed;
        table.add_row(vec![
            Cell::new(kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(counts.total),
            count_cell(counts.merged, Color::Green),
            count_cell(counts.expanded, Color::Yellow),
            count_cell(counts.skipped_malformed, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.0).add_attribute(Attribute::Bold),
        count_cell(totals.1, Color::Green).add_attribute(Attribute::Bold),
        count_cell(totals.2, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals.3, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "Employees: {} ({} computers across {} people)",
        report.total_employees, report.total_computers, report.employees_with_computers
    );
    println!(
        "Coverage: computers {:.1}%, roles {:.1}%, titles {:.1}%, complete {:.1}%",
        report.coverage.computer_pct,
        report.coverage.role_pct,
        report.coverage.title_pct,
        report.coverage.complete_pct
    );
    if !report.ambiguous.is_empty() {
        println!("Ambiguous matches for review:");
        for pair in &report.ambiguous {
            println!(
                "- {} ({}): {} ({:.2}) vs {} ({:.2})",
                pair.record_name,
                pair.source,
                pair.first_candidate,
                pair.first_score,
                pair.second_candidate,
                pair.second_score
            );
        }
    }
    if report.has_alerts() {
        eprintln!("Alerts:");
        for alert in &report.alerts {
            eprintln!("- {alert}");
        }
    }
}

pub fn print_search_results(query: &str, outcome: &SearchOutcome<'_>, limit: usize) {
    if outcome.has_perfect_match {
        println!("Exact match for \"{query}\":");
    } else if outcome.results.is_empty() && !outcome.is_typo {
        println!("No results for \"{query}\"");
        return;
    }

    if !outcome.results.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Name"),
            header_cell("Position"),
            header_cell("Office"),
            header_cell("Email"),
            header_cell("Computers"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 4, CellAlignment::Right);
        for employee in outcome.results.iter().take(limit) {
            table.add_row(vec![
                Cell::new(&employee.human_name).add_attribute(Attribute::Bold),
                optional_cell(employee.position.as_deref()),
                optional_cell(employee.office.as_deref()),
                optional_cell(employee.email.as_deref()),
                Cell::new(employee.computers.len()),
            ]);
        }
        println!("{table}");
        if outcome.results.len() > limit {
            println!("... and {} more", outcome.results.len() - limit);
        }
    }

    if outcome.is_typo {
        if outcome.results.is_empty() {
            println!("No results for \"{query}\"");
        }
        if !outcome.suggestions.is_empty() {
            println!("Did you mean:");
            for suggestion in &outcome.suggestions {
                println!("- {} ({:.2})", suggestion.name, suggestion.score);
            }
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
