//! Round-robin fixture generation (circle method).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TeamId;

/// One scheduled match. The first team bats first.
///
/// Serialises as a two-element array, e.g. `["A", "B"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture(pub TeamId, pub TeamId);

impl Fixture {
    pub fn new(team1: impl Into<TeamId>, team2: impl Into<TeamId>) -> Self {
        Self(team1.into(), team2.into())
    }

    pub fn team1(&self) -> &TeamId {
        &self.0
    }

    pub fn team2(&self) -> &TeamId {
        &self.1
    }

    pub fn involves(&self, team: &str) -> bool {
        self.0 == team || self.1 == team
    }

    /// Same pairing regardless of batting order.
    pub fn same_pairing(&self, other: &Fixture) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} vs {}", self.0, self.1)
    }
}

/// Number of fixtures a single round-robin over `team_count` teams produces.
pub fn fixture_count(team_count: usize) -> usize {
    team_count * team_count.saturating_sub(1) / 2
}

/// Generate a single round-robin in circle-method order.
///
/// An odd field gets an empty bye slot; pairings against it are dropped.
/// Each round pairs slot `i` with slot `n - 1 - i`, then every slot but the
/// first rotates one place (the last slot moves to index 1).
pub fn generate_schedule(teams: &[TeamId]) -> Vec<Fixture> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<&TeamId>> = teams.iter().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    let mut schedule = Vec::with_capacity(fixture_count(teams.len()));

    for _ in 0..n - 1 {
        for i in 0..n / 2 {
            if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
                schedule.push(Fixture::new(home.clone(), away.clone()));
            }
        }
        slots[1..].rotate_right(1);
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn teams(n: usize) -> Vec<TeamId> {
        (0..n).map(|i| format!("T{i:02}")).collect()
    }

    fn names(names: &[&str]) -> Vec<TeamId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_three_teams_circle_order() {
        let schedule = generate_schedule(&names(&["A", "B", "C"]));
        assert_eq!(
            schedule,
            vec![Fixture::new("B", "C"), Fixture::new("A", "C"), Fixture::new("A", "B")]
        );
    }

    #[test]
    fn test_four_teams_circle_order() {
        let schedule = generate_schedule(&names(&["A", "B", "C", "D"]));
        assert_eq!(
            schedule,
            vec![
                Fixture::new("A", "D"),
                Fixture::new("B", "C"),
                Fixture::new("A", "C"),
                Fixture::new("D", "B"),
                Fixture::new("A", "B"),
                Fixture::new("C", "D"),
            ]
        );
    }

    #[test]
    fn test_fixture_counts() {
        assert_eq!(generate_schedule(&teams(3)).len(), 3);
        assert_eq!(generate_schedule(&teams(4)).len(), 6);
        assert_eq!(generate_schedule(&teams(5)).len(), 10);
    }

    #[test]
    fn test_degenerate_fields() {
        assert!(generate_schedule(&[]).is_empty());
        assert!(generate_schedule(&teams(1)).is_empty());
        assert_eq!(generate_schedule(&teams(2)), vec![Fixture::new("T00", "T01")]);
    }

    #[test]
    fn test_team_named_bye_is_scheduled() {
        let schedule = generate_schedule(&names(&["BYE", "B", "C"]));
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.iter().filter(|f| f.involves("BYE")).count(), 2);
    }

    #[test]
    fn test_fixture_serialises_as_pair() {
        let json = serde_json::to_string(&Fixture::new("A", "B")).unwrap();
        assert_eq!(json, r#"["A","B"]"#);

        let back: Fixture = serde_json::from_str(r#"["C","D"]"#).unwrap();
        assert_eq!(back.team1(), "C");
        assert_eq!(back.team2(), "D");
    }

    #[test]
    fn test_same_pairing_ignores_order() {
        assert!(Fixture::new("A", "B").same_pairing(&Fixture::new("B", "A")));
        assert!(!Fixture::new("A", "B").same_pairing(&Fixture::new("A", "C")));
    }

    proptest! {
        #[test]
        fn prop_every_pair_exactly_once(n in 0usize..24) {
            let field = teams(n);
            let schedule = generate_schedule(&field);

            prop_assert_eq!(schedule.len(), fixture_count(n));

            let mut seen = HashSet::new();
            for fixture in &schedule {
                prop_assert_ne!(fixture.team1(), fixture.team2());
                let key = if fixture.team1() < fixture.team2() {
                    (fixture.team1().clone(), fixture.team2().clone())
                } else {
                    (fixture.team2().clone(), fixture.team1().clone())
                };
                prop_assert!(seen.insert(key), "pair scheduled twice: {}", fixture);
            }
        }

        #[test]
        fn prop_each_team_plays_everyone_else(n in 2usize..16) {
            let field = teams(n);
            let schedule = generate_schedule(&field);

            for team in &field {
                let games = schedule.iter().filter(|f| f.involves(team)).count();
                prop_assert_eq!(games, n - 1);
            }
        }
    }
}
