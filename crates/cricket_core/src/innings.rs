//! Ball-by-ball innings simulation.
//!
//! Each delivery draws one outcome from a fixed categorical table. Wides and
//! no-balls score a run but do not count as legal balls.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const BALLS_PER_OVER: u32 = 6;
pub const MAX_WICKETS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallOutcome {
    Dot,
    One,
    Two,
    Three,
    Four,
    Six,
    Wicket,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl BallOutcome {
    pub const ALL: [BallOutcome; 11] = [
        BallOutcome::Dot,
        BallOutcome::One,
        BallOutcome::Two,
        BallOutcome::Three,
        BallOutcome::Four,
        BallOutcome::Six,
        BallOutcome::Wicket,
        BallOutcome::Wide,
        BallOutcome::NoBall,
        BallOutcome::Bye,
        BallOutcome::LegBye,
    ];

    /// Runs added to the total by this delivery.
    pub fn runs(self) -> u32 {
        match self {
            BallOutcome::Dot | BallOutcome::Wicket => 0,
            BallOutcome::One => 1,
            BallOutcome::Two => 2,
            BallOutcome::Three => 3,
            BallOutcome::Four => 4,
            BallOutcome::Six => 6,
            BallOutcome::Wide | BallOutcome::NoBall | BallOutcome::Bye | BallOutcome::LegBye => 1,
        }
    }

    /// Whether the delivery counts toward the over.
    pub fn is_legal(self) -> bool {
        !matches!(self, BallOutcome::Wide | BallOutcome::NoBall)
    }
}

/// Relative outcome weights, doubled so the half-weights become integers.
/// Order matches `BallOutcome::ALL`.
const OUTCOME_WEIGHTS: [u32; 11] = [70, 60, 30, 10, 20, 6, 2, 1, 1, 4, 4];

/// Categorical distribution over `BallOutcome` backed by prefix sums.
#[derive(Debug, Clone)]
pub struct OutcomeTable {
    cumulative: [u32; 11],
}

impl Default for OutcomeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeTable {
    pub fn new() -> Self {
        let mut cumulative = [0; 11];
        let mut running = 0;
        for (slot, weight) in cumulative.iter_mut().zip(OUTCOME_WEIGHTS) {
            running += weight;
            *slot = running;
        }
        Self { cumulative }
    }

    pub fn total_weight(&self) -> u32 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Outcome owning `ticket` in `0..total_weight()`.
    pub fn outcome_at(&self, ticket: u32) -> BallOutcome {
        let idx = self.cumulative.partition_point(|&upper| upper <= ticket);
        BallOutcome::ALL[idx.min(BallOutcome::ALL.len() - 1)]
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> BallOutcome {
        self.outcome_at(rng.gen_range(0..self.total_weight()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub noballs: u32,
    pub byes: u32,
    pub legbyes: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides + self.noballs + self.byes + self.legbyes
    }
}

/// Frequency of each scoring shot plus dismissals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(rename = "0")]
    pub dots: u32,
    #[serde(rename = "1")]
    pub ones: u32,
    #[serde(rename = "2")]
    pub twos: u32,
    #[serde(rename = "3")]
    pub threes: u32,
    #[serde(rename = "4")]
    pub fours: u32,
    #[serde(rename = "6")]
    pub sixes: u32,
    pub wickets: u32,
}

impl Breakdown {
    /// Runs scored off the bat.
    pub fn bat_runs(&self) -> u32 {
        self.ones + 2 * self.twos + 3 * self.threes + 4 * self.fours + 6 * self.sixes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub runs: u32,
    pub wickets: u32,
    /// Legal deliveries bowled
    pub balls: u32,
    pub extras: Extras,
    pub breakdown: Breakdown,
}

impl Scorecard {
    pub fn record(&mut self, outcome: BallOutcome) {
        self.runs += outcome.runs();
        if outcome.is_legal() {
            self.balls += 1;
        }

        match outcome {
            BallOutcome::Dot => self.breakdown.dots += 1,
            BallOutcome::One => self.breakdown.ones += 1,
            BallOutcome::Two => self.breakdown.twos += 1,
            BallOutcome::Three => self.breakdown.threes += 1,
            BallOutcome::Four => self.breakdown.fours += 1,
            BallOutcome::Six => self.breakdown.sixes += 1,
            BallOutcome::Wicket => {
                self.wickets += 1;
                self.breakdown.wickets += 1;
            }
            BallOutcome::Wide => self.extras.wides += 1,
            BallOutcome::NoBall => self.extras.noballs += 1,
            BallOutcome::Bye => self.extras.byes += 1,
            BallOutcome::LegBye => self.extras.legbyes += 1,
        }
    }

    pub fn all_out(&self) -> bool {
        self.wickets >= MAX_WICKETS
    }

    /// Overs as a fraction (`4.5` for 27 balls), used for rate maths.
    pub fn overs(&self) -> f64 {
        self.balls as f64 / BALLS_PER_OVER as f64
    }

    /// Cricket notation (`"4.3"` for 27 balls). Display only.
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.balls / BALLS_PER_OVER, self.balls % BALLS_PER_OVER)
    }

    /// Runs per over, 0.0 before the first legal ball.
    pub fn run_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs as f64 / self.overs()
        }
    }

    /// Short summary such as `"142/6 (20.0)"`.
    pub fn summary(&self) -> String {
        format!("{}/{} ({})", self.runs, self.wickets, self.overs_display())
    }
}

/// Simulate one innings of at most `overs` overs using the default table.
pub fn simulate_innings<R: Rng + ?Sized>(overs: u32, rng: &mut R) -> Scorecard {
    simulate_innings_with(&OutcomeTable::new(), overs, rng)
}

/// Bowl `overs * 6` deliveries or until the side is all out.
///
/// Wides and no-balls use up a delivery without counting as a legal ball,
/// so an innings with extras ends short of its full allotment of overs.
fn simulate_innings_with<R: Rng + ?Sized>(
    table: &OutcomeTable,
    overs: u32,
    rng: &mut R,
) -> Scorecard {
    let deliveries = overs.saturating_mul(BALLS_PER_OVER);
    let mut scorecard = Scorecard::default();

    for _ in 0..deliveries {
        if scorecard.all_out() {
            break;
        }
        scorecard.record(table.draw(rng));
    }

    scorecard
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_table_prefix_sums() {
        let table = OutcomeTable::new();
        assert_eq!(table.total_weight(), 208);

        assert_eq!(table.outcome_at(0), BallOutcome::Dot);
        assert_eq!(table.outcome_at(69), BallOutcome::Dot);
        assert_eq!(table.outcome_at(70), BallOutcome::One);
        assert_eq!(table.outcome_at(129), BallOutcome::One);
        assert_eq!(table.outcome_at(130), BallOutcome::Two);
        assert_eq!(table.outcome_at(160), BallOutcome::Three);
        assert_eq!(table.outcome_at(170), BallOutcome::Four);
        assert_eq!(table.outcome_at(190), BallOutcome::Six);
        assert_eq!(table.outcome_at(196), BallOutcome::Wicket);
        assert_eq!(table.outcome_at(198), BallOutcome::Wide);
        assert_eq!(table.outcome_at(199), BallOutcome::NoBall);
        assert_eq!(table.outcome_at(200), BallOutcome::Bye);
        assert_eq!(table.outcome_at(204), BallOutcome::LegBye);
        assert_eq!(table.outcome_at(207), BallOutcome::LegBye);
    }

    #[test]
    fn test_extras_do_not_use_a_ball() {
        let mut card = Scorecard::default();
        card.record(BallOutcome::Wide);
        card.record(BallOutcome::NoBall);
        assert_eq!(card.balls, 0);
        assert_eq!(card.runs, 2);
        assert_eq!(card.extras.wides, 1);
        assert_eq!(card.extras.noballs, 1);

        card.record(BallOutcome::Bye);
        card.record(BallOutcome::LegBye);
        assert_eq!(card.balls, 2);
        assert_eq!(card.runs, 4);
        assert_eq!(card.breakdown, Breakdown::default());
    }

    #[test]
    fn test_wicket_scores_nothing() {
        let mut card = Scorecard::default();
        card.record(BallOutcome::Wicket);
        assert_eq!(card.runs, 0);
        assert_eq!(card.balls, 1);
        assert_eq!(card.wickets, 1);
        assert_eq!(card.breakdown.wickets, 1);
    }

    #[test]
    fn test_overs_notation() {
        let card = Scorecard { runs: 30, balls: 27, ..Default::default() };
        assert_eq!(card.overs_display(), "4.3");
        assert!((card.overs() - 4.5).abs() < 1e-12);
        assert!((card.run_rate() - 30.0 / 4.5).abs() < 1e-12);
        assert_eq!(card.summary(), "30/0 (4.3)");
        assert_eq!(Scorecard::default().run_rate(), 0.0);
    }

    fn single_outcome_table(outcome: BallOutcome) -> OutcomeTable {
        let idx = BallOutcome::ALL.iter().position(|&o| o == outcome).unwrap();
        let mut cumulative = [0; 11];
        for slot in cumulative.iter_mut().skip(idx) {
            *slot = 1;
        }
        OutcomeTable { cumulative }
    }

    #[test]
    fn test_wides_use_up_deliveries() {
        let table = single_outcome_table(BallOutcome::Wide);
        let card = simulate_innings_with(&table, 1, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(card.balls, 0);
        assert_eq!(card.runs, 6);
        assert_eq!(card.extras.wides, 6);
        assert_eq!(card.summary(), "6/0 (0.0)");
    }

    #[test]
    fn test_innings_stops_at_ten_wickets() {
        let table = single_outcome_table(BallOutcome::Wicket);
        let card = simulate_innings_with(&table, u32::MAX, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(card.wickets, MAX_WICKETS);
        assert_eq!(card.balls, MAX_WICKETS);
        assert_eq!(card.runs, 0);
    }

    #[test]
    fn test_seeded_innings_is_reproducible() {
        let first = simulate_innings(20, &mut ChaCha8Rng::seed_from_u64(42));
        let second = simulate_innings(20, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_scorecard_json_shape() {
        let value = serde_json::to_value(Scorecard::default()).unwrap();
        for key in ["0", "1", "2", "3", "4", "6", "wickets"] {
            assert!(value["breakdown"].get(key).is_some(), "missing breakdown key {key}");
        }
        for key in ["wides", "noballs", "byes", "legbyes"] {
            assert!(value["extras"].get(key).is_some(), "missing extras key {key}");
        }
    }

    proptest! {
        #[test]
        fn prop_innings_respects_limits(overs in 1u32..=50, seed in any::<u64>()) {
            let card = simulate_innings(overs, &mut ChaCha8Rng::seed_from_u64(seed));

            let deliveries = card.balls + card.extras.wides + card.extras.noballs;
            prop_assert!(deliveries <= overs * BALLS_PER_OVER);
            prop_assert!(card.wickets <= MAX_WICKETS);
            prop_assert!(deliveries == overs * BALLS_PER_OVER || card.wickets == MAX_WICKETS);
            prop_assert_eq!(card.wickets, card.breakdown.wickets);
            prop_assert_eq!(card.runs, card.breakdown.bat_runs() + card.extras.total());

            let legal = card.breakdown.dots
                + card.breakdown.ones
                + card.breakdown.twos
                + card.breakdown.threes
                + card.breakdown.fours
                + card.breakdown.sixes
                + card.breakdown.wickets
                + card.extras.byes
                + card.extras.legbyes;
            prop_assert_eq!(legal, card.balls);
        }
    }
}
