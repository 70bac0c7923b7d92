//! Draw command

use std::fmt::Write;

use sorteador_core::invariants::assert_result_invariants;
use sorteador_core::{DrawEngine, DrawOutcome, DrawSettings, RaffleList, Result};

use crate::cli::DrawArgs;
use crate::state::AppState;

/// Merge command line flags over the configured defaults
///
/// Asking for replacement switches off a configured fair mode, the same way
/// the two options exclude each other in the draw panel. Passing both flags
/// explicitly is left for the engine to reject. `--no-fair` switches a
/// configured fair mode off without changing the replacement setting.
pub fn settings_for(args: &DrawArgs, defaults: &DrawSettings) -> DrawSettings {
    let mut settings = *defaults;
    if let Some(quantity) = args.quantity {
        settings.quantity = quantity;
    }
    if args.with_replacement {
        settings.with_replacement = true;
        settings.fair_mode = args.fair;
    } else if args.fair {
        settings.fair_mode = true;
        settings.with_replacement = false;
    }
    if args.no_fair {
        settings.fair_mode = false;
    }
    if args.no_animation {
        settings.animation_effects = false;
    }
    settings
}

pub fn run_draw(state: &mut AppState, args: &DrawArgs) -> Result<String> {
    let list = state.db.lists().get(args.list_id)?;
    let settings = settings_for(args, &state.config.draw);
    let mut engine = match args.seed {
        Some(seed) => DrawEngine::seeded(seed),
        None => DrawEngine::system(),
    };

    if args.preview {
        let resolution = engine.resolve(&list, &settings)?;
        let mut out = format!("{} eligible participant(s)", resolution.len());
        if resolution.cycle_will_reset {
            out.push_str("; the fair-mode cycle will restart");
        }
        return Ok(out);
    }

    let outcome = engine.execute(&list, &settings, args.dry_run)?;
    assert_result_invariants(&outcome.result);

    if !outcome.dry_run {
        state.db.commit_draw(&outcome)?;
    }

    Ok(render_outcome(&list, &outcome))
}

fn render_outcome(list: &RaffleList, outcome: &DrawOutcome) -> String {
    let mut out = String::new();
    let _ = write!(out, "Draw result for \"{}\"", list.name);
    if outcome.dry_run {
        out.push_str(" (simulation, not saved)");
    }
    out.push('\n');
    if outcome.cycle_reset {
        out.push_str("Fair mode: everyone was drawn, starting a new cycle\n");
    }
    for (index, winner) in outcome.result.drawn_names.iter().enumerate() {
        let _ = writeln!(out, "{:>5}  {}", ordinal(index + 1), winner.name);
    }
    out
}

fn ordinal(place: usize) -> String {
    let suffix = match (place % 10, place % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", place, suffix)
}
