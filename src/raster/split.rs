// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dividing an elapsed time between the two passes of a basket weave.

use log::{debug, trace};
use serde::Serialize;

use super::ScanDirection;
use crate::{
    constants::{MIN_SAMPLE_TIME, SPLIT_ROUNDS, SPLIT_SHRINK, SPLIT_STEPS},
    itc::ItcError,
    math::combine_rms,
};

/// The best division of an elapsed time between two scan directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasketWeaveSplit {
    /// The fraction of the elapsed time given to the first pass.
    pub fraction: f64,
    /// Integration time per point of each pass [s].
    pub int_times: [f64; 2],
    /// RMS of each pass [K].
    pub pass_rms: [f64; 2],
    /// RMS of the combined map [K].
    pub rms: f64,
}

struct Candidate {
    score: f64,
    split: BasketWeaveSplit,
}

/// Find the fraction of `elapsed_time` to spend on the first pass so that both
/// passes reach the same RMS. A grid of fractions is searched, and the grid is
/// refined around the best fraction each round.
pub fn split_elapsed_time(
    elapsed_time: f64,
    directions: &[ScanDirection; 2],
) -> Result<BasketWeaveSplit, ItcError> {
    let mut best: Option<Candidate> = None;
    let mut centre = 0.5;
    let mut half_width = 0.5;

    for round in 0..SPLIT_ROUNDS {
        let step = 2.0 * half_width / SPLIT_STEPS as f64;
        for i in 0..=SPLIT_STEPS {
            let fraction = centre - half_width + i as f64 * step;
            if fraction <= 0.0 || fraction >= 1.0 {
                continue;
            }

            let t_1 = directions[0].int_time(elapsed_time * fraction)?;
            let t_2 = directions[1].int_time(elapsed_time * (1.0 - fraction))?;
            if t_1 < MIN_SAMPLE_TIME || t_2 < MIN_SAMPLE_TIME {
                trace!("Fraction {fraction}: integration times {t_1} s, {t_2} s too short");
                continue;
            }

            let r_1 = directions[0].rms(t_1)?;
            let r_2 = directions[1].rms(t_2)?;
            let score = (r_1 / r_2 - 1.0).abs();
            if best.as_ref().map(|b| score < b.score).unwrap_or(true) {
                best = Some(Candidate {
                    score,
                    split: BasketWeaveSplit {
                        fraction,
                        int_times: [t_1, t_2],
                        pass_rms: [r_1, r_2],
                        rms: combine_rms(&[r_1, r_2])?,
                    },
                });
            }
        }

        if let Some(b) = best.as_ref() {
            centre = b.split.fraction;
            debug!(
                "Basket weave split round {round}: fraction {centre:.6} (RMS mismatch {:.3e})",
                b.score
            );
        }
        half_width /= SPLIT_SHRINK;
    }

    best.map(|b| b.split)
        .ok_or(ItcError::BasketWeaveSplitFailed)
}
