//! `meteolab hypotheses` and `meteolab timeline`: print the project catalog.

use meteolab_core::catalog::{self, Hypothesis, HypothesisStatus};

pub fn hypotheses(status: Option<&str>) {
    let selected: Vec<&Hypothesis> = match status {
        None => catalog::HYPOTHESES.iter().collect(),
        Some(s) => match HypothesisStatus::from_name(s) {
            Some(st) => catalog::hypotheses_with(st).collect(),
            None => {
                eprintln!("Unknown status '{s}'. Expected pending, verified or refuted.");
                std::process::exit(1);
            }
        },
    };

    println!("Student hypotheses ({})", selected.len());
    println!();
    for h in &selected {
        println!("  #{} [{}] {}", h.id, h.status.badge(), h.student_name);
        println!("     \"{}\"", h.statement);
        println!("     Reflection: {}", h.notes);
        println!();
    }

    if status.is_none() {
        println!("Research journal");
        println!();
        for entry in catalog::JOURNAL {
            println!("  {}  {}  ({})", entry.date, entry.title, entry.author);
            println!("     {}", entry.preview);
        }
    }
}

pub fn timeline() {
    let progress = catalog::timeline_progress();
    println!(
        "{} project timeline  {:.0}% complete",
        catalog::PROJECT_NAME,
        progress * 100.0
    );
    println!();
    for phase in catalog::TIMELINE {
        let mark = if phase.completed { "✓" } else { "·" };
        println!("  {mark} {:<9} {}", phase.date, phase.title);
        println!("      {}", phase.description);
    }

    println!();
    println!("Evaluation");
    for score in catalog::EVALUATION {
        println!("  {:<30} {:.1}/{:.0}", score.label, score.score, score.out_of);
    }
}
