//! History and statistics commands

use std::fmt::Write;

use chrono::NaiveDate;
use sorteador_core::{HistoryQuery, ListStatistics, Result};
use tracing::info;
use uuid::Uuid;

use crate::cli::HistoryCommand;
use crate::state::AppState;

pub fn run_history(state: &mut AppState, cmd: HistoryCommand) -> Result<String> {
    match cmd {
        HistoryCommand::Show { list_id, from, to } => show_history(state, list_id, from, to),
        HistoryCommand::Clear { list_id } => clear_history(state, list_id),
    }
}

pub fn show_history(
    state: &mut AppState,
    list_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<String> {
    let list = state.db.lists().get(list_id)?;
    let history = state.db.history().list_for_list(list_id)?;
    let matched = HistoryQuery::for_list(list_id).between(from, to).apply(&history);

    if matched.is_empty() {
        return Ok(format!("No draws found for \"{}\" in this period", list.name));
    }

    let mut out = String::new();
    for draw in matched {
        let mut flags = Vec::new();
        if draw.settings.fair_mode {
            flags.push("fair mode");
        }
        if draw.settings.with_replacement {
            flags.push("with replacement");
        }
        let _ = write!(
            out,
            "{}  {} name(s)",
            draw.timestamp.format("%Y-%m-%d %H:%M:%S"),
            draw.drawn_names.len()
        );
        if !flags.is_empty() {
            let _ = write!(out, " [{}]", flags.join(", "));
        }
        let _ = writeln!(out, ": {}", draw.winner_names().join(", "));
    }
    Ok(out)
}

/// Delete a list's history; the list and its fair-mode cycle are kept
pub fn clear_history(state: &mut AppState, list_id: Uuid) -> Result<String> {
    let list = state.db.lists().get(list_id)?;
    let deleted = state.db.history().clear_for_list(list_id)?;
    info!(%list_id, deleted, "History cleared");
    Ok(format!("Cleared {} draw(s) from \"{}\"", deleted, list.name))
}

pub fn show_stats(state: &mut AppState, list_id: Uuid) -> Result<String> {
    let list = state.db.lists().get(list_id)?;
    let history = state.db.history().list_for_list(list_id)?;
    let stats = ListStatistics::compute(&list, &history);

    let mut out = String::new();
    let _ = writeln!(out, "Total draws: {}", stats.total_draws);
    if stats.most_frequent_winners.is_empty() {
        let _ = writeln!(out, "Most frequent: -");
    } else {
        let _ = writeln!(out, "Most frequent: {}", stats.most_frequent_winners.join(", "));
    }
    for p in &stats.participant_performance {
        let _ = writeln!(out, "{:>4}  {:>5.1}%  {}", p.wins, p.win_percentage, p.name);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorteador_core::{AppConfig, DrawEngine, DrawSettings, RaffleList};

    fn setup_with_draws(draws: usize) -> (AppState, RaffleList) {
        let mut state = AppState::in_memory(AppConfig::default()).unwrap();
        let list = RaffleList::new("Office").import_names("Alice, Bob").0;
        state.db.lists().create(&list).unwrap();

        let mut engine = DrawEngine::seeded(3);
        for _ in 0..draws {
            let outcome = engine.execute(&list, &DrawSettings::new(1), false).unwrap();
            state.db.commit_draw(&outcome).unwrap();
        }
        (state, list)
    }

    #[test]
    fn test_empty_history() {
        let (mut state, list) = setup_with_draws(0);
        let out = show_history(&mut state, list.id, None, None).unwrap();
        assert!(out.starts_with("No draws found"));
    }

    #[test]
    fn test_history_lines() {
        let (mut state, list) = setup_with_draws(3);
        let out = show_history(&mut state, list.id, None, None).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().all(|l| l.contains("1 name(s)")));
    }

    #[test]
    fn test_history_future_range_is_empty() {
        let (mut state, list) = setup_with_draws(2);
        let from = NaiveDate::from_ymd_opt(2999, 1, 1);
        let out = show_history(&mut state, list.id, from, None).unwrap();
        assert!(out.starts_with("No draws found"));
    }

    #[test]
    fn test_clear_history() {
        let (mut state, list) = setup_with_draws(3);
        let other = RaffleList::new("Party").import_names("Zed").0;
        state.db.lists().create(&other).unwrap();
        let outcome = DrawEngine::seeded(9)
            .execute(&other, &DrawSettings::new(1), false)
            .unwrap();
        state.db.commit_draw(&outcome).unwrap();

        let out = run_history(&mut state, HistoryCommand::Clear { list_id: list.id }).unwrap();
        assert_eq!(out, "Cleared 3 draw(s) from \"Office\"");
        assert!(show_history(&mut state, list.id, None, None)
            .unwrap()
            .starts_with("No draws found"));
        assert_eq!(state.db.history().list_for_list(other.id).unwrap().len(), 1);
        assert!(state.db.lists().exists(list.id).unwrap());
    }

    #[test]
    fn test_clear_history_unknown_list() {
        let (mut state, _) = setup_with_draws(0);
        let err = clear_history(&mut state, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, sorteador_core::Error::NotFound(_)));
    }

    #[test]
    fn test_stats_output() {
        let (mut state, list) = setup_with_draws(4);
        let out = show_stats(&mut state, list.id).unwrap();
        assert!(out.starts_with("Total draws: 4"));
        assert!(out.contains("Alice"));
        assert!(out.contains("Bob"));
    }
}
