// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Temperatures are in Kelvin, times in
seconds and frequencies in GHz unless stated otherwise.
 */

/// Effective temperature of the atmosphere [K].
pub const J_M: f64 = 260.0;

/// Effective temperature of the telescope [K].
pub const J_TEL: f64 = 265.0;

/// Empirical correction applied to the radiometer equation.
pub const FUDGE: f64 = 1.04;

/// Correlator efficiency factor.
pub const DFACT: f64 = 1.23;

/// The smallest integration time per point that can be requested [s]. When
/// basket weaving, the total must be at least twice this.
pub const MIN_SAMPLE_TIME: f64 = 0.1;

/// The interval at which a grid map in position-switched mode returns to its
/// reference position [s].
pub const REFS_INTERVAL: f64 = 30.0;

/// Multiplier on every duration term for continuum mode.
pub const CONTINUUM_FACTOR: f64 = 1.2;

/// Maximum number of passes of the RMS -> integration time solver.
pub const MAX_SOLVE_ITERATIONS: usize = 5;

/// Number of refinement rounds of the basket-weave search.
pub const SPLIT_ROUNDS: usize = 4;

/// Number of intervals each basket-weave search round is divided into.
pub const SPLIT_STEPS: usize = 20;

/// The factor by which the basket-weave search bracket shrinks every round.
pub const SPLIT_SHRINK: f64 = 10.0;

/// Planck constant [J s].
pub const PLANCK: f64 = 6.62607015E-34;

/// Boltzmann constant [J / K].
pub const BOLTZMANN: f64 = 1.380649E-23;

/// The difference between the ambient air temperature and the effective
/// temperature of the atmosphere used by the chopper-wheel correction [K].
pub const ATMOSPHERE_OFFSET: f64 = 10.0;
