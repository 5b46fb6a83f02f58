//! Report - Text rendering of search results

use loadout_core::filter::SlotCandidates;
use loadout_core::{Item, RankedResult, SearchOutcome};
use std::io::{self, Write};

/// Print every ranked result, best last
pub fn write_results<W: Write>(
    out: &mut W,
    outcome: &SearchOutcome<'_>,
    verbose: bool,
) -> io::Result<()> {
    for result in &outcome.results {
        write_result(out, result, verbose)?;
    }
    writeln!(
        out,
        "Evaluated {} combinations, showing {}",
        outcome.evaluated,
        outcome.results.len()
    )
}

fn write_result<W: Write>(out: &mut W, result: &RankedResult<'_>, verbose: bool) -> io::Result<()> {
    // Scaled numbers first, then the guaranteed ones
    writeln!(out, "Scaled Effective Health: {:.4}", result.scaled_effective_health())?;
    writeln!(out, "Scaled Reduction: {:.4}", result.scaled_reduction())?;
    writeln!(out)?;
    writeln!(out, "Effective Health: {:.4}", result.true_effective_health())?;
    writeln!(out, "Damage Reduction: {:.4}", result.true_reduction())?;
    writeln!(out)?;

    for (slot, item) in result.loadout.iter() {
        writeln!(out, "{}: {}", capitalize(slot.as_str()), item.name)?;
        if verbose {
            writeln!(out, "    {}", format_attributes(item))?;
        }
    }
    writeln!(out)?;
    writeln!(out)
}

/// Candidate lists and search size, without searching
pub fn write_candidates<W: Write>(
    out: &mut W,
    candidates: &[SlotCandidates<'_>],
    combinations: u64,
) -> io::Result<()> {
    for slot in candidates {
        let names: Vec<&str> = slot.items.iter().map(|item| item.name.as_str()).collect();
        writeln!(
            out,
            "{} ({}): {}",
            capitalize(slot.slot.as_str()),
            names.len(),
            names.join(", ")
        )?;
    }
    writeln!(out, "Combinations: {}", combinations)
}

fn format_attributes(item: &Item) -> String {
    let attrs: Vec<String> = item
        .attributes()
        .into_iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();
    format!("{{{}}}", attrs.join(", "))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
