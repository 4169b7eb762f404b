// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Calculation failed: division by zero while calculating {0}")]
    DivisionByZero(&'static str),

    #[error("Calculation failed: square root of a negative number while calculating {0}")]
    NegativeSqrt(&'static str),

    #[error("Calculation failed: {0} is not a finite number")]
    NotFinite(&'static str),

    #[error("Calculation failed: {0} is too large to count")]
    OutOfRange(&'static str),
}
