//! Win statistics for a list

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{DrawResult, RaffleList};

/// Wins recorded for one participant
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantPerformance {
    pub id: Uuid,
    pub name: String,
    pub wins: u32,
    /// Share of all winners drawn, rounded to one decimal
    pub win_percentage: f64,
}

/// Aggregated figures over a list's draw history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListStatistics {
    pub total_draws: usize,
    pub total_winners_drawn: u32,
    pub most_frequent_winners: Vec<String>,
    /// `(name, wins)` for everyone with at least one win, most wins first
    pub win_distribution: Vec<(String, u32)>,
    pub participant_performance: Vec<ParticipantPerformance>,
}

impl ListStatistics {
    /// Compute statistics for `list` over `history`
    ///
    /// Winners are matched by participant id. Wins belonging to participants
    /// no longer in the list are ignored.
    pub fn compute(list: &RaffleList, history: &[DrawResult]) -> Self {
        if list.is_empty() {
            return Self::default();
        }

        let mut counts: HashMap<Uuid, u32> = list.names.iter().map(|p| (p.id, 0)).collect();
        let mut total_winners_drawn: u32 = 0;
        for winner in history.iter().flat_map(|draw| &draw.drawn_names) {
            if let Some(count) = counts.get_mut(&winner.id) {
                *count += 1;
                total_winners_drawn += 1;
            }
        }

        let mut participant_performance: Vec<_> = list
            .names
            .iter()
            .map(|p| {
                let wins = counts[&p.id];
                let win_percentage = if total_winners_drawn > 0 {
                    round_one_decimal(wins as f64 / total_winners_drawn as f64 * 100.0)
                } else {
                    0.0
                };
                ParticipantPerformance {
                    id: p.id,
                    name: p.name.clone(),
                    wins,
                    win_percentage,
                }
            })
            .collect();
        participant_performance.sort_by(|a, b| b.wins.cmp(&a.wins));

        let max_wins = participant_performance.first().map_or(0, |p| p.wins);
        let most_frequent_winners = if max_wins > 0 {
            participant_performance
                .iter()
                .filter(|p| p.wins == max_wins)
                .map(|p| p.name.clone())
                .collect()
        } else {
            Vec::new()
        };

        let win_distribution = participant_performance
            .iter()
            .filter(|p| p.wins > 0)
            .map(|p| (p.name.clone(), p.wins))
            .collect();

        Self {
            total_draws: history.len(),
            total_winners_drawn,
            most_frequent_winners,
            win_distribution,
            participant_performance,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
