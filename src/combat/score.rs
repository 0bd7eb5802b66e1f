//! Combo, multiplier and total score cells.

use bevy::prelude::*;

use super::components::{AttackFinished, AttackOutcome};
use crate::core::{ObservableValue, RhythmConfig, ScoreTuning, SubscriptionSet};

/// Score cells shared with whatever renders them.
///
/// Each cell notifies its subscribers when it changes; the gameplay code
/// only writes them.
#[derive(Resource)]
pub struct ScoreCells {
    pub combo: ObservableValue<u32>,
    pub multiplier: ObservableValue<u32>,
    pub total: ObservableValue<u64>,
}

impl Default for ScoreCells {
    fn default() -> Self {
        Self {
            combo: ObservableValue::new(0),
            multiplier: ObservableValue::new(1),
            total: ObservableValue::new(0),
        }
    }
}

impl ScoreCells {
    /// Back to a fresh session. Subscribers stay attached.
    pub fn reset(&mut self) {
        self.combo.set(0);
        self.multiplier.set(1);
        self.total.set(0);
    }

    /// Apply an attack outcome, returning the points it awarded.
    pub fn record(&mut self, outcome: AttackOutcome, tuning: &ScoreTuning) -> u64 {
        let base = match outcome {
            AttackOutcome::Normal => tuning.hit_points,
            AttackOutcome::Launched => tuning.launch_points,
            AttackOutcome::Failed => {
                self.combo.set(0);
                self.multiplier.set(1);
                return 0;
            }
        };

        let combo = *self.combo.get() + 1;
        self.combo.set(combo);

        let multiplier = (1 + combo / tuning.combo_step.max(1)).min(tuning.max_multiplier.max(1));
        self.multiplier.set(multiplier);

        let points = base * u64::from(multiplier);
        let total = *self.total.get() + points;
        self.total.set(total);
        points
    }
}

/// Score every finished attack.
pub fn apply_score(
    config: Res<RhythmConfig>,
    mut score: ResMut<ScoreCells>,
    mut finished: EventReader<AttackFinished>,
) {
    for event in finished.read() {
        let points = score.record(event.outcome, &config.score);
        if points > 0 {
            debug!(
                "{:?} by {:?}: +{} (combo {}, x{})",
                event.outcome,
                event.attacker,
                points,
                score.combo.get(),
                score.multiplier.get()
            );
        }
    }
}

/// Points between logged score milestones.
const MILESTONE: u64 = 5_000;

/// Reset the score and attach the session's own listeners.
pub fn begin_score_session(mut commands: Commands, mut score: ResMut<ScoreCells>) {
    score.reset();

    let mut listeners = SubscriptionSet::default();
    let mut next_milestone = MILESTONE;
    listeners.push(score.total.subscribe(move |total| {
        if *total >= next_milestone {
            info!("Score milestone reached: {}", total);
            next_milestone = (*total / MILESTONE + 1) * MILESTONE;
        }
    }));
    listeners.push(score.combo.subscribe(|combo| {
        if *combo > 0 && combo % 10 == 0 {
            info!("Combo x{}!", combo);
        }
    }));

    // Replacing the previous set cancels last session's listeners.
    commands.insert_resource(listeners);
}

/// Release the session's listeners.
pub fn end_score_session(mut commands: Commands) {
    commands.remove_resource::<SubscriptionSet>();
}
