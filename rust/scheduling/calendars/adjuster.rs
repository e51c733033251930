// SPDX-License-Identifier: LicenseRef-Rateslib-Dual
//
// Copyright (c) 2026 Siffrorna Technology Limited
// This code cannot be used or copied externally
//
// Dual-licensed: Free Educational Licence or Paid Commercial Licence (commercial/professional use)
// Source-available, not open source.
//
// See LICENSE and https://rateslib.com/py/en/latest/i_licence.html for details,
// and/or contact info (at) rateslib (dot) com
////////////////////////////////////////////////////////////////////////////////////////////////////


use crate::error::Result;
use crate::scheduling::DateRoll;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Specifier for date adjustment rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjuster {
    /// Actual date without adjustment.
    Actual {},
    /// Actual date, which must already be valid.
    Strict {},
    /// Following adjustment rule.
    Following {},
    /// Modified following adjustment rule.
    ModifiedFollowing {},
    /// Previous adjustment rule.
    Previous {},
    /// Modified previous adjustment rule.
    ModifiedPrevious {},
    /// A set number of valid days, using lag rules.
    ValidDaysLag { number: i32 },
    /// A set number of calendar days, then rolled in the direction of travel.
    CalDaysLag { number: i32 },
}

/// Perform date adjustment according to calendar definitions, i.e. a known [`DateRoll`].
pub trait Adjustment {
    /// Adjust a date under an adjustment rule.
    fn adjust<T: DateRoll>(&self, udate: &NaiveDateTime, calendar: &T) -> Result<NaiveDateTime>;

    /// Adjust a vector of dates under an adjustment rule;
    fn adjusts<T: DateRoll>(
        &self,
        udates: &Vec<NaiveDateTime>,
        calendar: &T,
    ) -> Result<Vec<NaiveDateTime>>;
}

/// Perform date adjustment according to adjustment rules, i.e. a given [`Adjuster`].
pub trait CalendarAdjustment {
    /// Adjust a date under an adjustment rule.
    fn adjust(&self, udate: &NaiveDateTime, adjuster: &Adjuster) -> Result<NaiveDateTime>
    where
        Self: Sized + DateRoll,
    {
        adjuster.adjust(udate, self)
    }

    /// Adjust a vector of dates under an adjustment rule;
    fn adjusts(&self, udates: &Vec<NaiveDateTime>, adjuster: &Adjuster) -> Result<Vec<NaiveDateTime>>
    where
        Self: Sized + DateRoll,
    {
        adjuster.adjusts(udates, self)
    }
}

impl Adjustment for Adjuster {
    fn adjust<T: DateRoll>(&self, udate: &NaiveDateTime, calendar: &T) -> Result<NaiveDateTime> {
        match self {
            Adjuster::Actual {} => Ok(*udate),
            Adjuster::Strict {} => {
                crate::error::ensure!(
                    calendar.is_valid(udate)?,
                    "date {udate} is not valid under a `Strict` adjuster"
                );
                Ok(*udate)
            }
            Adjuster::Following {} => calendar.roll_forward(udate),
            Adjuster::Previous {} => calendar.roll_backward(udate),
            Adjuster::ModifiedFollowing {} => calendar.roll_mod_forward(udate),
            Adjuster::ModifiedPrevious {} => calendar.roll_mod_backward(udate),
            Adjuster::ValidDaysLag { number: n } => calendar.lag_valid_days(udate, *n),
            Adjuster::CalDaysLag { number: n } => {
                let new_date = crate::error::checked_add(*udate, chrono::TimeDelta::days((*n).into()))?;
                if *n < 0 {
                    calendar.roll_backward(&new_date)
                } else {
                    calendar.roll_forward(&new_date)
                }
            }
        }
    }

    fn adjusts<T: DateRoll>(
        &self,
        udates: &Vec<NaiveDateTime>,
        calendar: &T,
    ) -> Result<Vec<NaiveDateTime>> {
        udates
            .iter()
            .map(|udate| self.adjust(udate, calendar))
            .collect()
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{ndt, WeekdayCal};

    fn fixture_cal() -> WeekdayCal {
        WeekdayCal::business()
    }

    #[test]
    fn test_adjusts() {
        let cal = fixture_cal();
        let udates = vec![
            ndt(2015, 9, 4),
            ndt(2015, 9, 5),
            ndt(2015, 9, 6),
            ndt(2015, 9, 7),
        ];
        let result = Adjuster::Following {}.adjusts(&udates, &cal).unwrap();
        assert_eq!(
            result,
            vec![
                ndt(2015, 9, 4),
                ndt(2015, 9, 7),
                ndt(2015, 9, 7),
                ndt(2015, 9, 7)
            ]
        );
    }

    #[test]
    fn test_adjust_rules() {
        let cal = fixture_cal();
        let sat = ndt(2017, 4, 29);
        assert_eq!(Adjuster::Actual {}.adjust(&sat, &cal).unwrap(), sat);
        assert_eq!(Adjuster::Previous {}.adjust(&sat, &cal).unwrap(), ndt(2017, 4, 28));
        assert_eq!(Adjuster::ModifiedFollowing {}.adjust(&sat, &cal).unwrap(), ndt(2017, 4, 28));
        assert_eq!(Adjuster::ModifiedPrevious {}.adjust(&ndt(2017, 10, 1), &cal).unwrap(), ndt(2017, 10, 2));
        assert_eq!(Adjuster::ValidDaysLag { number: 2 }.adjust(&sat, &cal).unwrap(), ndt(2017, 5, 2));
        assert_eq!(Adjuster::CalDaysLag { number: -1 }.adjust(&ndt(2017, 5, 1), &cal).unwrap(), ndt(2017, 4, 28));
    }

    #[test]
    fn test_strict_rejects_invalid() {
        let cal = fixture_cal();
        assert!(Adjuster::Strict {}.adjust(&ndt(2017, 4, 29), &cal).is_err());
        assert_eq!(Adjuster::Strict {}.adjust(&ndt(2017, 4, 28), &cal).unwrap(), ndt(2017, 4, 28));
    }
}
