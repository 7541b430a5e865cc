//! Plain-text presentation of a prediction for the terminal.

use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::engine::ScoreMatrix;
use crate::forecast::Prediction;

/// Cells at or below this probability are left unlabeled in the heatmap (0.1%).
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.001;

/// Probability as a percentage with two decimals, e.g. `48.21%`.
pub fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// The two headline lines: most probable score and the 1X2 split.
pub fn summary(prediction: &Prediction) -> String {
    let mode = &prediction.mode;
    let outcome = &prediction.outcome;
    format!(
        "Most Probable Score: {} - {} ({})\nTeam A Win: {}   |   Draw: {}   |   Team B Win: {}",
        mode.team_a_goals,
        mode.team_b_goals,
        percent(mode.probability),
        percent(outcome.team_a_win),
        percent(outcome.draw),
        percent(outcome.team_b_win),
    )
}

/// Heatmap as a table: team A goals down the first column, one column per
/// team B goal count.
///
/// Rows run from the highest goal count down to 0 so the origin sits
/// bottom-left; the team B axis is the footer row.
pub fn tabulate_heatmap(matrix: &ScoreMatrix, threshold: f64) -> Table {
    let mut cols = vec![Col::new(
        Styles::default().with(MinWidth(12)).with(HAlign::Right),
    )];
    cols.extend(
        (0..matrix.dim()).map(|_| Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right))),
    );

    let mut table = Table::default().with_cols(cols).with_row(Row::new(
        Styles::default().with(Header(true)),
        std::iter::once("Team A Goals".into())
            .chain((0..matrix.dim()).map(|_| String::new().into()))
            .collect(),
    ));

    let rows: Vec<&[f64]> = matrix.rows().collect();
    for (i, row) in rows.iter().enumerate().rev() {
        let mut cells: Vec<Cell> = vec![i.to_string().into()];
        cells.extend(row.iter().map(|&p| {
            if p > threshold {
                format!("{:.1}%", p * 100.0).into()
            } else {
                String::new().into()
            }
        }));
        table.push_row(Row::new(Styles::default(), cells));
    }

    table.push_row(Row::new(
        Styles::default().with(Header(true)),
        std::iter::once(String::new().into())
            .chain((0..matrix.dim()).map(|j| j.to_string().into()))
            .collect(),
    ));
    table
}

/// Titled, rendered heatmap with the team B axis label underneath.
pub fn heatmap(matrix: &ScoreMatrix, threshold: f64) -> String {
    format!(
        "Score Probability Matrix\n{}\nTeam B Goals",
        Console::default().render(&tabulate_heatmap(matrix, threshold))
    )
}

/// Full terminal report: summary, divider, heatmap.
pub fn report(prediction: &Prediction, threshold: f64) -> String {
    format!(
        "Prediction Results\n{}\n{}\n{}",
        summary(prediction),
        "-".repeat(40),
        heatmap(&prediction.matrix, threshold)
    )
}
