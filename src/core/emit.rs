//! Plain-text VEST files (`.mat`, `.con`, `.fts`) as read by FSL's GLM tools.
//!
//! The consumers are fixed-format readers: keep header keywords, the blank
//! line, the `/Matrix ` marker (with its trailing space) and single-space
//! separators exactly as they are.

use crate::core::{DesignScheme, ExplanatoryVariableSet};
use std::fmt::Display;

const MATRIX_MARKER: &str = "/Matrix ";

fn push_row<T: Display>(out: &mut String, row: &[T]) {
    let line = row
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&line);
    out.push('\n');
}

fn header(num_waves: usize, count_key: &str, count: usize) -> String {
    format!(
        "/NumWaves {}\n{} {}\n\n{}\n",
        num_waves, count_key, count, MATRIX_MARKER
    )
}

/// Design matrix: one row per subject, one column per EV.
pub fn render_matrix(evs: &ExplanatoryVariableSet) -> String {
    let mut out = header(evs.num_waves(), "/NumPoints", evs.num_points());
    for row in evs.rows() {
        push_row(&mut out, row.as_slice());
    }
    out
}

fn render_table(num_waves: usize, rows: &[&[i8]]) -> String {
    let mut out = header(num_waves, "/NumContrasts", rows.len());
    for &row in rows {
        push_row(&mut out, row);
    }
    out
}

/// `None` when the scheme has no contrast table.
pub fn render_contrasts(scheme: &DesignScheme) -> Option<String> {
    scheme
        .contrasts()
        .map(|rows| render_table(scheme.num_waves(), rows))
}

/// `None` when the scheme has no F-test table.
pub fn render_ftests(scheme: &DesignScheme) -> Option<String> {
    scheme
        .ftests()
        .map(|rows| render_table(scheme.num_waves(), rows))
}
