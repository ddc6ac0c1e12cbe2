//! Bracket arithmetic shared by the national tax and regional surtax.

use rust_decimal::Decimal;

use crate::config::Bracket;

/// Taxes each slice of `income` at its own bracket's rate.
///
/// Brackets must be ascending with an open-ended last entry. Non-positive
/// income yields zero.
pub fn progressive_amount(income: Decimal, brackets: &[Bracket]) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut total = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for bracket in brackets {
        let upper = bracket.upper_bound.map_or(income, |bound| bound.min(income));
        if upper > lower {
            total += (upper - lower) * bracket.rate;
        }
        if !bracket.covers(income) {
            lower = upper;
        } else {
            break;
        }
    }
    total
}

/// Taxes the whole of `income` at the rate of the bracket it falls in.
///
/// Non-positive income yields zero.
pub fn single_rate_amount(income: Decimal, brackets: &[Bracket]) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    brackets
        .iter()
        .find(|bracket| bracket.covers(income))
        .map(|bracket| income * bracket.rate)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn national_2026() -> Vec<Bracket> {
        vec![
            Bracket {
                upper_bound: Some(dec!(28000)),
                rate: dec!(0.23),
            },
            Bracket {
                upper_bound: Some(dec!(50000)),
                rate: dec!(0.33),
            },
            Bracket {
                upper_bound: None,
                rate: dec!(0.43),
            },
        ]
    }

    #[test]
    fn test_progressive_within_first_bracket() {
        assert_eq!(
            progressive_amount(dec!(27243), &national_2026()),
            dec!(6265.89)
        );
    }

    #[test]
    fn test_progressive_at_first_bound() {
        assert_eq!(progressive_amount(dec!(28000), &national_2026()), dec!(6440));
    }

    #[test]
    fn test_progressive_second_bracket() {
        // 6440 + 12000 x 0.33
        assert_eq!(progressive_amount(dec!(40000), &national_2026()), dec!(10400));
    }

    #[test]
    fn test_progressive_top_bracket() {
        // 6440 + 22000 x 0.33 + 10000 x 0.43
        assert_eq!(
            progressive_amount(dec!(60000), &national_2026()),
            dec!(18000)
        );
    }

    #[test]
    fn test_progressive_zero_and_negative_income() {
        assert_eq!(progressive_amount(Decimal::ZERO, &national_2026()), Decimal::ZERO);
        assert_eq!(progressive_amount(dec!(-100), &national_2026()), Decimal::ZERO);
    }

    #[test]
    fn test_single_rate_uses_bracket_rate_for_whole_income() {
        assert_eq!(single_rate_amount(dec!(40000), &national_2026()), dec!(13200));
    }

    #[test]
    fn test_single_rate_upper_bound_is_inclusive() {
        assert_eq!(single_rate_amount(dec!(28000), &national_2026()), dec!(6440));
    }

    #[test]
    fn test_single_rate_zero_income() {
        assert_eq!(single_rate_amount(Decimal::ZERO, &national_2026()), Decimal::ZERO);
    }
}
