use crate::core::participant::Participant;
use crate::error::TradeLoopError;

/// Decide whether participant `i`'s item can legally flow to `j`.
///
/// Four clauses must all hold:
/// - `i` and `j` are distinct participants
/// - their items differ
/// - `i`'s item clears `j`'s floor
/// - the value delta `j` would have to pay is within `j`'s top-up limit
///
/// `admissible(i, j)` and `admissible(j, i)` are evaluated independently;
/// neither implies the other.
///
/// # Examples
///
/// ```
/// use trade_loop_engine::core::ids::{ItemId, ParticipantId};
/// use trade_loop_engine::core::participant::Participant;
/// use trade_loop_engine::graph::constraint::admissible;
/// use rust_decimal_macros::dec;
///
/// let a = Participant::new(ParticipantId::new("A"), ItemId::new("X"), dec!(100), dec!(90), dec!(20), 1);
/// let b = Participant::new(ParticipantId::new("B"), ItemId::new("Y"), dec!(110), dec!(95), dec!(20), 1);
/// assert!(admissible(&a, &b).unwrap());
/// ```
pub fn admissible(i: &Participant, j: &Participant) -> Result<bool, TradeLoopError> {
    i.validate()?;
    j.validate()?;

    if i.participant_id() == j.participant_id() {
        return Ok(false);
    }
    if i.item_id() == j.item_id() {
        return Ok(false);
    }
    if i.item_value() < j.floor_value() {
        return Ok(false);
    }
    if i.item_value() - j.item_value() > j.max_top_up() {
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{ItemId, ParticipantId};
    use rust_decimal_macros::dec;

    fn p(id: &str, item: &str, value: i64, floor: i64, top_up: i64) -> Participant {
        Participant::new(
            ParticipantId::new(id),
            ItemId::new(item),
            rust_decimal::Decimal::from(value),
            rust_decimal::Decimal::from(floor),
            rust_decimal::Decimal::from(top_up),
            1,
        )
    }

    #[test]
    fn test_edge_exists_both_ways() {
        let a = p("A", "X", 100, 90, 20);
        let b = p("B", "Y", 110, 95, 20);
        assert!(admissible(&a, &b).unwrap());
        assert!(admissible(&b, &a).unwrap());
    }

    #[test]
    fn test_floor_blocks_direction() {
        let a = p("A", "X", 100, 120, 50);
        let b = p("B", "Y", 110, 90, 50);
        assert!(admissible(&a, &b).unwrap());
        assert!(!admissible(&b, &a).unwrap());
    }

    #[test]
    fn test_same_item_blocks_edge() {
        let a = p("A", "X", 100, 90, 50);
        let b = p("B", "X", 100, 90, 50);
        assert!(!admissible(&a, &b).unwrap());
    }

    #[test]
    fn test_top_up_limit_blocks_edge() {
        let a = p("A", "X", 100, 50, 5);
        let b = p("B", "Y", 70, 50, 5);
        // i=a j=b: value(a) - value(b) = 30 > max_top_up(b)=5
        assert!(!admissible(&a, &b).unwrap());
    }

    #[test]
    fn test_self_edge_never_admissible() {
        let a = p("A", "X", 100, 90, 50);
        assert!(!admissible(&a, &a).unwrap());
    }

    #[test]
    fn test_invalid_participant_surfaces_error() {
        let a = p("A", "X", 100, 0, 50);
        let b = p("B", "Y", 100, 90, 50);
        assert!(admissible(&a, &b).is_err());
    }
}
