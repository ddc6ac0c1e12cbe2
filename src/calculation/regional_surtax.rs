//! Regional surtax calculation functionality.
//!
//! Each region (addizionale regionale IRPEF) publishes an ascending
//! schedule of brackets. Depending on [`SurtaxPolicy`] the schedule is
//! applied either to the whole income at a single rate, or slice by slice.
//!
//! An unrecognised region is not an error: its surtax is zero.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{Bracket, SurtaxPolicy};
use crate::models::Region;

use super::brackets::{progressive_amount, single_rate_amount};

/// Built-in schedules: (inclusive upper bound in euros, rate in basis points).
/// `None` closes every schedule.
const BUILTIN_SCHEDULES: &[(Region, &[(Option<i64>, i64)])] = &[
    (Region::Abruzzo, &[(Some(28000), 167), (Some(50000), 287), (None, 333)]),
    (Region::Basilicata, &[(None, 123)]),
    (Region::Bolzano, &[(Some(50000), 123), (None, 173)]),
    (Region::Calabria, &[(None, 173)]),
    (
        Region::Campania,
        &[(Some(15000), 173), (Some(28000), 296), (Some(50000), 320), (None, 333)],
    ),
    (
        Region::EmiliaRomagna,
        &[(Some(15000), 133), (Some(28000), 193), (Some(50000), 278), (None, 333)],
    ),
    (Region::FriuliVeneziaGiulia, &[(Some(15000), 70), (None, 123)]),
    (Region::Lazio, &[(Some(15000), 173), (None, 333)]),
    (Region::Liguria, &[(Some(28000), 123), (Some(50000), 318), (None, 323)]),
    (
        Region::Lombardia,
        &[(Some(15000), 123), (Some(28000), 158), (Some(50000), 172), (None, 173)],
    ),
    (
        Region::Marche,
        &[(Some(15000), 123), (Some(28000), 153), (Some(50000), 170), (None, 173)],
    ),
    (
        Region::Molise,
        &[(Some(15000), 173), (Some(28000), 193), (Some(50000), 333), (None, 333)],
    ),
    (
        Region::Piemonte,
        &[(Some(15000), 162), (Some(28000), 268), (Some(50000), 331), (None, 333)],
    ),
    (
        Region::Puglia,
        &[(Some(15000), 133), (Some(28000), 143), (Some(50000), 163), (None, 185)],
    ),
    (Region::Sardegna, &[(None, 123)]),
    (Region::Sicilia, &[(None, 123)]),
    (
        Region::Toscana,
        &[(Some(15000), 142), (Some(28000), 143), (Some(50000), 332), (None, 333)],
    ),
    (Region::Trento, &[(Some(50000), 123), (None, 173)]),
    (
        Region::Umbria,
        &[(Some(15000), 173), (Some(28000), 302), (Some(50000), 312), (None, 333)],
    ),
    (Region::ValleDAosta, &[(None, 123)]),
    (Region::Veneto, &[(None, 123)]),
];

static BUILTIN: LazyLock<RegionalSurtaxTable> = LazyLock::new(|| {
    let schedules = BUILTIN_SCHEDULES
        .iter()
        .map(|(region, brackets)| {
            let brackets = brackets
                .iter()
                .map(|(bound, basis_points)| Bracket {
                    upper_bound: bound.map(Decimal::from),
                    rate: Decimal::new(*basis_points, 4),
                })
                .collect();
            (*region, brackets)
        })
        .collect();
    RegionalSurtaxTable { schedules }
});

/// Read-only mapping from region to surtax schedule.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::RegionalSurtaxTable;
/// use salary_engine::config::SurtaxPolicy;
/// use rust_decimal_macros::dec;
///
/// let table = RegionalSurtaxTable::builtin();
/// // Lombardia, 20000 falls in the 15000-28000 bracket at 1.58%
/// assert_eq!(
///     table.surtax("Lombardia", dec!(20000), SurtaxPolicy::SingleRate),
///     dec!(316)
/// );
/// assert_eq!(table.surtax("Atlantis", dec!(20000), SurtaxPolicy::SingleRate), dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalSurtaxTable {
    schedules: BTreeMap<Region, Vec<Bracket>>,
}

impl RegionalSurtaxTable {
    /// Builds a table from explicit schedules.
    pub fn new(schedules: BTreeMap<Region, Vec<Bracket>>) -> Self {
        Self { schedules }
    }

    /// The built-in table for every recognised region.
    pub fn builtin() -> &'static RegionalSurtaxTable {
        &BUILTIN
    }

    /// Returns the schedule for a region, if it has one.
    pub fn schedule(&self, region: Region) -> Option<&[Bracket]> {
        self.schedules.get(&region).map(Vec::as_slice)
    }

    /// Iterates over all schedules in region order.
    pub fn schedules(&self) -> impl Iterator<Item = (Region, &[Bracket])> {
        self.schedules
            .iter()
            .map(|(region, brackets)| (*region, brackets.as_slice()))
    }

    /// Number of regions with a schedule.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Returns true when no region has a schedule.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Computes the surtax for a region given by name.
    ///
    /// Unrecognised names, regions without a schedule and non-positive
    /// incomes all yield zero.
    pub fn surtax(&self, region: &str, taxable_income: Decimal, policy: SurtaxPolicy) -> Decimal {
        Region::from_name(region)
            .map(|region| self.surtax_for(region, taxable_income, policy))
            .unwrap_or(Decimal::ZERO)
    }

    /// Computes the surtax for a resolved region.
    pub fn surtax_for(
        &self,
        region: Region,
        taxable_income: Decimal,
        policy: SurtaxPolicy,
    ) -> Decimal {
        let Some(schedule) = self.schedule(region) else {
            return Decimal::ZERO;
        };

        match policy {
            SurtaxPolicy::SingleRate => single_rate_amount(taxable_income, schedule),
            SurtaxPolicy::Progressive => progressive_amount(taxable_income, schedule),
        }
    }
}

/// Computes the regional surtax against the built-in table.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::regional_surtax;
/// use salary_engine::config::SurtaxPolicy;
/// use rust_decimal_macros::dec;
///
/// // Lazio, 20000: single rate 3.33% on everything
/// assert_eq!(regional_surtax("Lazio", dec!(20000), SurtaxPolicy::SingleRate), dec!(666));
/// // progressive: 15000 x 1.73% + 5000 x 3.33%
/// assert_eq!(regional_surtax("Lazio", dec!(20000), SurtaxPolicy::Progressive), dec!(426));
/// ```
pub fn regional_surtax(region: &str, taxable_income: Decimal, policy: SurtaxPolicy) -> Decimal {
    RegionalSurtaxTable::builtin().surtax(region, taxable_income, policy)
}
