// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Atmospheric opacity as a function of frequency, tabulated at several
//! values of the 225 GHz opacity.

use log::trace;
use vec1::Vec1;

use super::ReceiverError;
use crate::math::{interpolate, lerp};

/// The 225 GHz opacities at which the built-in tables are tabulated, with each
/// table's contents.
const BUILTIN_TABLES: [(f64, &str); 7] = [
    (0.03, include_str!("../../data/tau030.dat")),
    (0.05, include_str!("../../data/tau050.dat")),
    (0.065, include_str!("../../data/tau065.dat")),
    (0.1, include_str!("../../data/tau100.dat")),
    (0.16, include_str!("../../data/tau160.dat")),
    (0.2, include_str!("../../data/tau200.dat")),
    (0.25, include_str!("../../data/tau250.dat")),
];

/// Tables of `(frequency [GHz], opacity)` sorted by their 225 GHz opacity.
#[derive(Debug, Clone)]
pub struct OpacityTables {
    tables: Vec1<(f64, Vec1<(f64, f64)>)>,
}

impl OpacityTables {
    pub fn new(tables: Vec1<(f64, Vec1<(f64, f64)>)>) -> Result<OpacityTables, ReceiverError> {
        if tables.len() < 2 || tables.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(ReceiverError::BadOpacityTables);
        }
        Ok(OpacityTables { tables })
    }

    /// The tables shipped with this crate.
    pub fn builtin() -> Result<OpacityTables, ReceiverError> {
        let mut tables = Vec::with_capacity(BUILTIN_TABLES.len());
        for (tau_225, contents) in BUILTIN_TABLES {
            tables.push((tau_225, parse_opacity_table(tau_225, contents)?));
        }
        let tables = Vec1::try_from_vec(tables).map_err(|_| ReceiverError::BadOpacityTables)?;
        OpacityTables::new(tables)
    }

    /// The 225 GHz opacities at which there are tables.
    pub fn tau_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.tables.iter().map(|(tau, _)| *tau)
    }

    /// The table for exactly this 225 GHz opacity, if there is one.
    pub fn curve(&self, tau_225: f64) -> Option<&Vec1<(f64, f64)>> {
        self.tables
            .iter()
            .find(|(tau, _)| (tau - tau_225).abs() < 1e-9)
            .map(|(_, table)| table)
    }

    /// Opacity at `freq` [GHz] given the 225 GHz opacity. Interpolates within
    /// the two tables bracketing `tau_225` (extrapolating from the nearest
    /// pair outside the tabulated range), each evaluated at `freq`.
    pub fn opacity(&self, tau_225: f64, freq: f64) -> f64 {
        let i_upper = self
            .tables
            .iter()
            .position(|(tau, _)| *tau >= tau_225)
            .map(|i| i.max(1))
            .unwrap_or(self.tables.len() - 1);
        let (tau_lo, table_lo) = &self.tables[i_upper - 1];
        let (tau_hi, table_hi) = &self.tables[i_upper];

        let opacity_lo = interpolate(table_lo, freq);
        let opacity_hi = interpolate(table_hi, freq);
        trace!(
            "Opacity at {freq} GHz: {opacity_lo} (tau_225 {tau_lo}), {opacity_hi} (tau_225 {tau_hi})"
        );

        lerp((*tau_lo, opacity_lo), (*tau_hi, opacity_hi), tau_225)
    }
}

/// Parse whitespace-separated `frequency opacity` lines.
pub fn parse_opacity_table(
    tau_225: f64,
    contents: &str,
) -> Result<Vec1<(f64, f64)>, ReceiverError> {
    let mut values = vec![];
    for (i_line, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let bad_line = || ReceiverError::BadOpacityLine {
            tau_225,
            line_num: i_line + 1,
            line: line.to_string(),
        };
        let mut fields = line.split_whitespace().map(|f| f.parse::<f64>());
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(freq)), Some(Ok(tau)), None) => values.push((freq, tau)),
            _ => return Err(bad_line()),
        }
    }

    Vec1::try_from_vec(values).map_err(|_| ReceiverError::EmptyOpacityTable(tau_225))
}
