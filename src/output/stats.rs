//! Summary statistics over a list of observations

use crate::state::{PageObservation, Phase};
use std::collections::BTreeMap;

/// Totals shown at the top of the HTML report and printed by the CLI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    /// Number of observations
    pub total: usize,

    /// Observations with a 2xx status
    pub ok: usize,

    /// Everything else, navigation errors included
    pub broken: usize,

    /// Observations without any status
    pub errors: usize,

    /// Observation count per status code
    pub by_status: BTreeMap<u16, usize>,

    /// (total, broken) per phase, in phase order
    pub by_phase: Vec<(Option<Phase>, usize, usize)>,
}

impl ReportSummary {
    /// Computes the summary of `observations`
    pub fn from_observations(observations: &[PageObservation]) -> Self {
        let mut summary = Self::default();

        for observation in observations {
            summary.total += 1;
            if observation.is_ok() {
                summary.ok += 1;
            } else {
                summary.broken += 1;
            }

            match observation.status {
                Some(code) => *summary.by_status.entry(code).or_insert(0) += 1,
                None => summary.errors += 1,
            }

            let broken = usize::from(observation.is_broken());
            match summary
                .by_phase
                .iter_mut()
                .find(|(phase, _, _)| *phase == observation.phase)
            {
                Some((_, total, broken_count)) => {
                    *total += 1;
                    *broken_count += broken;
                }
                None => summary.by_phase.push((observation.phase, 1, broken)),
            }
        }

        summary
    }

    /// Share of broken observations, rounded to two decimals
    pub fn percent_broken(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let percent = self.broken as f64 / self.total as f64 * 100.0;
        (percent * 100.0).round() / 100.0
    }
}

/// Prints a summary to stdout
pub fn print_summary(summary: &ReportSummary) {
    println!("=== Link Sweep Summary ===\n");
    println!("Total links:  {}", summary.total);
    println!("OK (2xx):     {}", summary.ok);
    println!(
        "Broken:       {} ({:.2}%)",
        summary.broken,
        summary.percent_broken()
    );
    println!("Nav errors:   {}", summary.errors);

    if !summary.by_status.is_empty() {
        println!("\nBy status:");
        for (code, count) in &summary.by_status {
            println!("  {}: {}", code, count);
        }
    }

    if !summary.by_phase.is_empty() {
        println!("\nBy phase:");
        for (phase, total, broken) in &summary.by_phase {
            let name = phase.map(|p| p.as_str()).unwrap_or("-");
            println!("  {}: {} links, {} broken", name, total, broken);
        }
    }
}
