//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a candidate move is acceptable by comparing
//! its resulting score with the previous step's score.

use std::fmt::{self, Debug};

use rand::rngs::StdRng;
use rand::Rng;

use planwright_config::AcceptorConfig;
use planwright_core::{PlanningSolution, Score, SolverError};

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor<S: PlanningSolution>: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        rng: &mut StdRng,
    ) -> bool;

    /// Called when local search starts or restarts.
    fn phase_started(&mut self, _initial_score: &S::Score) {}

    /// Called when a step ends with an applied move.
    fn step_ended(&mut self, _step_score: &S::Score) {}
}

/// Builds the acceptor named by the config; hill climbing when absent.
pub fn acceptor_from_config<S: PlanningSolution>(
    config: Option<&AcceptorConfig>,
) -> Result<Box<dyn Acceptor<S>>, SolverError> {
    match config {
        None | Some(AcceptorConfig::HillClimbing) => Ok(Box::new(HillClimbingAcceptor::new())),
        Some(AcceptorConfig::SimulatedAnnealing(c)) => {
            let defaults = SimulatedAnnealingAcceptor::default();
            let temperature = c
                .starting_temperature
                .unwrap_or(defaults.starting_temperature);
            let decay_rate = c.decay_rate.unwrap_or(defaults.decay_rate);
            if temperature <= 0.0 || !(0.0..=1.0).contains(&decay_rate) {
                return Err(SolverError::Config(format!(
                    "invalid simulated annealing parameters: temperature {temperature}, decay {decay_rate}"
                )));
            }
            Ok(Box::new(SimulatedAnnealingAcceptor::new(
                temperature,
                decay_rate,
            )))
        }
        Some(AcceptorConfig::LateAcceptance(c)) => {
            let size = c.late_acceptance_size.unwrap_or(400);
            if size == 0 {
                return Err(SolverError::Config(
                    "late_acceptance_size must be at least 1".to_string(),
                ));
            }
            Ok(Box::new(LateAcceptanceAcceptor::<S>::new(size)))
        }
    }
}

/// Hill climbing acceptor - accepts only improving moves.
///
/// # Example
///
/// ```
/// use planwright_solver::search::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution> Acceptor<S> for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        _rng: &mut StdRng,
    ) -> bool {
        move_score > last_step_score
    }
}

/// Simulated annealing acceptor.
///
/// Improving moves are always accepted. A worsening move is accepted with
/// probability `exp(-delta / temperature)`, where `delta` is the loss on
/// the highest score level that differs. The temperature decays
/// multiplicatively after every step.
///
/// # Example
///
/// ```
/// use planwright_solver::search::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(2.0, 0.995);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
}

impl SimulatedAnnealingAcceptor {
    /// * `starting_temperature` - Initial temperature (higher = more exploration)
    /// * `decay_rate` - Multiplicative decay per step (e.g., 0.99)
    pub fn new(starting_temperature: f64, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
        }
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(1.0, 0.99)
    }
}

fn level_loss<Sc: Score>(from: &Sc, to: &Sc) -> f64 {
    from.to_level_numbers()
        .into_iter()
        .zip(to.to_level_numbers())
        .find(|(a, b)| a != b)
        .map(|(a, b)| (a - b) as f64)
        .unwrap_or(0.0)
}

impl<S: PlanningSolution> Acceptor<S> for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        rng: &mut StdRng,
    ) -> bool {
        if move_score > last_step_score {
            return true;
        }
        if self.current_temperature <= f64::EPSILON {
            return move_score == last_step_score;
        }

        let loss = level_loss(last_step_score, move_score);
        let probability = (-loss / self.current_temperature).exp();
        rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &S::Score) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &S::Score) {
        self.current_temperature *= self.decay_rate;
    }
}

/// Late acceptance acceptor - accepts moves that improve on a historical score.
///
/// Keeps a circular buffer of recent step scores and accepts a move that is
/// at least as good as the score from `late_acceptance_size` steps ago.
pub struct LateAcceptanceAcceptor<S: PlanningSolution> {
    late_acceptance_size: usize,
    score_history: Vec<Option<S::Score>>,
    current_index: usize,
}

impl<S: PlanningSolution> Debug for LateAcceptanceAcceptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("current_index", &self.current_index)
            .finish()
    }
}

impl<S: PlanningSolution> LateAcceptanceAcceptor<S> {
    /// Creates an acceptor remembering `late_acceptance_size` scores.
    /// A size of zero is treated as one.
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }
}

impl<S: PlanningSolution> Default for LateAcceptanceAcceptor<S> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<S: PlanningSolution> Acceptor<S> for LateAcceptanceAcceptor<S> {
    fn is_accepted(
        &mut self,
        last_step_score: &S::Score,
        move_score: &S::Score,
        _rng: &mut StdRng,
    ) -> bool {
        if move_score > last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        for slot in &mut self.score_history {
            *slot = Some(*initial_score);
        }
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &S::Score) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use planwright_config::{LateAcceptanceConfig, SimulatedAnnealingConfig};
    use planwright_core::score::SimpleScore;
    use planwright_test::NQueensSolution;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn accepts(
        acceptor: &mut dyn Acceptor<NQueensSolution>,
        last: i64,
        candidate: i64,
        rng: &mut StdRng,
    ) -> bool {
        acceptor.is_accepted(&SimpleScore::of(last), &SimpleScore::of(candidate), rng)
    }

    #[test]
    fn test_hill_climbing() {
        let mut acceptor = HillClimbingAcceptor::new();
        let mut rng = rng();
        assert!(accepts(&mut acceptor, -5, -3, &mut rng));
        assert!(!accepts(&mut acceptor, -5, -5, &mut rng));
        assert!(!accepts(&mut acceptor, -5, -7, &mut rng));
    }

    #[test]
    fn test_late_acceptance_compares_with_old_score() {
        let mut acceptor = LateAcceptanceAcceptor::<NQueensSolution>::new(2);
        let mut rng = rng();
        acceptor.phase_started(&SimpleScore::of(-10));

        assert!(accepts(&mut acceptor, -4, -10, &mut rng));
        assert!(!accepts(&mut acceptor, -4, -11, &mut rng));

        acceptor.step_ended(&SimpleScore::of(-4));
        acceptor.step_ended(&SimpleScore::of(-3));
        assert!(!accepts(&mut acceptor, -3, -5, &mut rng));
        assert!(accepts(&mut acceptor, -3, -4, &mut rng));
    }

    #[test]
    fn test_simulated_annealing_cools_down() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 0.0);
        let mut rng = rng();
        assert!(accepts(&mut acceptor, -5, -4, &mut rng));

        Acceptor::<NQueensSolution>::step_ended(&mut acceptor, &SimpleScore::of(-4));
        assert_eq!(acceptor.current_temperature(), 0.0);
        assert!(!accepts(&mut acceptor, -4, -5, &mut rng));
        assert!(accepts(&mut acceptor, -4, -4, &mut rng));
    }

    #[test]
    fn test_simulated_annealing_hot_accepts_small_losses() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1.0e9, 1.0);
        let mut rng = rng();
        let accepted = (0..100)
            .filter(|_| accepts(&mut acceptor, -4, -5, &mut rng))
            .count();
        assert!(accepted > 90);
    }

    #[test]
    fn test_acceptor_from_config() {
        assert!(acceptor_from_config::<NQueensSolution>(None).is_ok());

        let sa = AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
            starting_temperature: Some(0.0),
            decay_rate: None,
        });
        assert!(matches!(
            acceptor_from_config::<NQueensSolution>(Some(&sa)),
            Err(SolverError::Config(_))
        ));

        let la = AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(0),
        });
        assert!(acceptor_from_config::<NQueensSolution>(Some(&la)).is_err());

        let la = AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(10),
        });
        assert!(acceptor_from_config::<NQueensSolution>(Some(&la)).is_ok());
    }
}
