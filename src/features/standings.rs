use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::data_fetcher::Dataset;

/// One club's line in the league table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StandingRow {
    pub code: String,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingRow {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.won += 1;
                self.points += 3;
            }
            std::cmp::Ordering::Equal => {
                self.drawn += 1;
                self.points += 1;
            }
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }
}

/// League table after the first `through_round` rounds.
///
/// Sorted by points, goal difference and goals scored; ties keep club order.
pub fn compute_standings(dataset: &Dataset, through_round: usize) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = dataset
        .clubs
        .iter()
        .map(|club| StandingRow {
            code: club.code.clone(),
            name: club.name.clone(),
            ..StandingRow::default()
        })
        .collect();
    let index: HashMap<String, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.code.clone(), i))
        .collect();

    for round in dataset.rounds.iter().take(through_round) {
        for m in &round.matches {
            let Some((home, away)) = m.score() else {
                continue;
            };
            if let (Some(&h), Some(&a)) = (index.get(&m.home), index.get(&m.away)) {
                rows[h].record(home, away);
                rows[a].record(away, home);
            }
        }
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
    });
    rows
}

/// Writes the table with a coloured header line.
pub fn print_standings<W: Write>(out: &mut W, title: &str, rows: &[StandingRow]) -> io::Result<()> {
    let name_width = rows
        .iter()
        .map(|row| row.name.width())
        .max()
        .unwrap_or(0)
        .max("Club".width());

    queue!(
        out,
        SetForegroundColor(Color::Yellow),
        Print(title),
        ResetColor,
        Print("\n"),
        SetForegroundColor(Color::Cyan),
        Print(format!(
            "{:>3}  {}{}  {:>3} {:>3} {:>3} {:>3}  {:>7} {:>4}  {:>3}",
            "#",
            "Club",
            " ".repeat(name_width - "Club".width()),
            "P",
            "W",
            "D",
            "L",
            "Goals",
            "+/-",
            "Pts"
        )),
        ResetColor,
        Print("\n")
    )?;

    for (position, row) in rows.iter().enumerate() {
        let goals = format!("{}:{}", row.goals_for, row.goals_against);
        queue!(
            out,
            Print(format!(
                "{:>3}  {}{}  {:>3} {:>3} {:>3} {:>3}  {:>7} {:>4}  {:>3}\n",
                position + 1,
                row.name,
                " ".repeat(name_width.saturating_sub(row.name.width())),
                row.played,
                row.won,
                row.drawn,
                row.lost,
                goals,
                row.goal_difference(),
                row.points
            ))
        )?;
    }

    out.flush()
}
