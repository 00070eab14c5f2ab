//! Command-line front end for the native build.
//!
//! Each invocation loads the saved schedule, applies at most one edit,
//! prints a plain-text report and flushes the result back to storage.

use clap::Subcommand;
use nestegg_core::projection::DecadeBucket;
use nestegg_core::schedule::ScheduleField;
use nestegg_core::segments::Age;

use crate::platform::Storage;
use crate::session::{ProjectionView, Session};
use crate::util::format::{format_currency_short, format_rate, format_share};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the yearly projection (default)
    Show {
        /// Also print the editable carry-forward table
        #[arg(long)]
        table: bool,
    },
    /// List the savings and interest segments with their indices
    Segments,
    /// Split a segment at its midpoint
    Split { field: ScheduleField, index: usize },
    /// Move the divider after segment INDEX so the next segment starts at AGE
    Move {
        field: ScheduleField,
        index: usize,
        age: Age,
    },
    /// Merge segment INDEX with the one after it, keeping its value
    Merge { field: ScheduleField, index: usize },
    /// Set the value of one segment
    SetValue {
        field: ScheduleField,
        index: usize,
        value: String,
    },
    /// Write a table cell; the value carries forward to the next explicit row
    Edit {
        field: ScheduleField,
        age: Age,
        value: String,
    },
    /// Restore the default schedule
    Reset,
}

/// Apply `command` to the session and render the resulting report.
pub fn execute<S: Storage>(session: &mut Session<S>, command: &Command) -> String {
    let mut out = String::new();

    let status = match command {
        Command::Show { table } => {
            let view = session.view();
            render_projection(&mut out, view);
            if *table {
                render_table(&mut out, view);
            }
            return out;
        }
        Command::Segments => {
            render_segments(&mut out, session.view());
            return out;
        }
        Command::Split { field, index } => describe(session.split(*field, *index)),
        Command::Move { field, index, age } => {
            describe(session.move_divider(*field, *index, *age))
        }
        Command::Merge { field, index } => describe(session.remove_divider(*field, *index)),
        Command::SetValue {
            field,
            index,
            value,
        } => match session.set_value_text(*field, *index, value) {
            Ok(changed) => describe(changed),
            Err(e) => format!("ignored: {e}"),
        },
        Command::Edit { field, age, value } => match session.edit_table_cell(*field, *age, value) {
            Ok(changed) => describe(changed),
            Err(e) => format!("ignored: {e}"),
        },
        Command::Reset => {
            session.reset();
            "reset to defaults".to_string()
        }
    };

    out.push_str(&status);
    out.push_str("\n\n");
    render_segments(&mut out, session.view());
    out
}

fn describe(changed: bool) -> String {
    if changed {
        "updated".to_string()
    } else {
        "no change".to_string()
    }
}

fn render_segments(out: &mut String, view: &ProjectionView) {
    let groups = [
        (ScheduleField::Savings, &view.savings_segments),
        (ScheduleField::Rate, &view.interest_segments),
    ];

    for (field, segments) in groups {
        out.push_str(&format!("{}:\n", field.label()));
        for (idx, segment) in segments.iter().enumerate() {
            let value = match field {
                ScheduleField::Savings => format_currency_short(segment.value),
                ScheduleField::Rate => format_rate(segment.value),
            };
            out.push_str(&format!(
                "  [{idx}] {:>2}-{:<2}  {value}\n",
                segment.from, segment.to
            ));
        }
    }
}

fn projection_row(cells: [&str; 6]) -> String {
    let [age, d18, d30, d40, d50, total] = cells;
    format!("{age:>4} {d18:>12} {d30:>12} {d40:>12} {d50:>12} {total:>13}\n")
}

fn render_projection(out: &mut String, view: &ProjectionView) {
    out.push_str(&projection_row([
        "age",
        DecadeBucket::Twenties.label(),
        DecadeBucket::Thirties.label(),
        DecadeBucket::Forties.label(),
        DecadeBucket::Fifties.label(),
        "total",
    ]));
    for snapshot in &view.snapshots {
        let amounts = snapshot.buckets().map(format_currency_short);
        out.push_str(&projection_row([
            &snapshot.age.to_string(),
            &amounts[0],
            &amounts[1],
            &amounts[2],
            &amounts[3],
            &format_currency_short(snapshot.total),
        ]));
    }

    out.push_str(&format!(
        "\nNet worth at 65: {}\n",
        format_currency_short(view.final_total)
    ));
    for share in &view.breakdown {
        out.push_str(&format!(
            "  saved at {}: {} ({})\n",
            share.bucket.label(),
            format_currency_short(share.amount),
            format_share(share.share)
        ));
    }
}

fn render_table(out: &mut String, view: &ProjectionView) {
    out.push_str(&format!("\n{:>4} {:>10} {:>8}\n", "age", "savings", "rate"));
    for row in view.carry_forward.rows() {
        let savings = row.savings.map(format_currency_short).unwrap_or_default();
        let rate = row.rate.map(format_rate).unwrap_or_default();
        out.push_str(&format!("{:>4} {:>10} {:>8}\n", row.age, savings, rate));
    }
}
