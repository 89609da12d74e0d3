//! Terminal formatting for inversion results.
//!
//! Formatting lives here so the solver code stays free of presentation
//! concerns and output changes stay localized.

use crate::domain::{InversionConfig, InversionOutcome, InversionProblem};
use crate::inversion::BatchItem;
use crate::report::{compute_residuals, misfit};

/// Summary of one solve: estimates side by side, misfits, and residuals.
pub fn format_solve_summary(
    problem: &InversionProblem,
    outcome: &InversionOutcome,
    config: &InversionConfig,
) -> String {
    let mut out = String::new();
    let (n, m) = problem.g.shape();
    let sd = problem.sd.as_ref();

    out.push_str("=== l1inv - L1-norm linear inversion ===\n");
    out.push_str(&format!("Problem: {}\n", problem.name));
    out.push_str(&format!(
        "Size: N={n} observations | M={m} parameters | weights={}\n",
        if sd.is_some() { "sd" } else { "unit" }
    ));
    out.push_str(&format!(
        "Bound: |m_j| <= {:.6} ({}x max|m_ls|)\n",
        outcome.bound, config.bound_multiplier
    ));

    out.push_str("\nEstimates:\n");
    out.push_str(&format!("{:>6} {:>16} {:>16}\n", "j", "m_l1", "m_ls"));
    out.push_str(&format!("{:->6} {:->16} {:->16}\n", "", "", ""));
    for j in 0..m {
        out.push_str(&format!(
            "{j:>6} {:>16.6} {:>16.6}\n",
            outcome.model[j], outcome.least_squares[j]
        ));
    }

    let l1 = misfit(&problem.g, &problem.d, sd, &outcome.model);
    let ls = misfit(&problem.g, &problem.d, sd, &outcome.least_squares);
    out.push_str("\nMisfit:\n");
    out.push_str(&format!(
        "  L1 estimate: weighted L1={:.6} weighted L2={:.6} max|r|={:.6}\n",
        l1.weighted_l1, l1.weighted_l2, l1.max_abs
    ));
    out.push_str(&format!(
        "  LS estimate: weighted L1={:.6} weighted L2={:.6} max|r|={:.6}\n",
        ls.weighted_l1, ls.weighted_l2, ls.max_abs
    ));
    out.push_str(&format!("  LP objective: {:.6}\n", outcome.objective));

    let residuals = compute_residuals(&problem.g, &problem.d, &outcome.model);
    out.push_str("\nResiduals (d - G m_l1):\n");
    out.push_str(&fmt_vec(residuals.as_slice()));
    out.push('\n');

    out
}

/// Width of the problem-name column in batch tables.
const NAME_WIDTH: usize = 24;

/// One line per batch item.
pub fn format_batch_summary(items: &[BatchItem]) -> String {
    let w = NAME_WIDTH;
    let mut out = String::new();
    out.push_str(&format!("{:<w$} {:>14} {:<}\n", "problem", "objective", "model"));
    out.push_str(&format!("{:-<w$} {:->14} {:-<5}\n", "", "", ""));
    for item in items {
        let line = match &item.result {
            Ok(o) => format!(
                "{:<w$} {:>14.6} {}",
                name_cell(&item.name),
                o.objective,
                fmt_vec(o.model.as_slice())
            ),
            Err(e) => format!("{:<w$} {:>14} error: {e}", name_cell(&item.name), "-"),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

/// Fit a problem name into the batch table's name column.
///
/// Over-long names keep their head and end in `~` so the column stays aligned.
fn name_cell(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        return name.to_string();
    }
    let mut cell: String = name.chars().take(NAME_WIDTH - 1).collect();
    cell.push('~');
    cell
}
