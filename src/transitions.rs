//! The two state machines that constrain piece placement.
//!
//! The heading table says which pieces rotate the travel direction; the
//! successor table says which pieces may legally follow a just-placed one.
//! Both are plain data so tests can enumerate them. Two pieces that end
//! with the same exit profile (gradient plus banking) share a successor
//! set, so there are eleven sets for the whole catalogue.

use crate::geometry::Heading;
use crate::pieces::PieceId;

/// Pieces that rotate the heading one step clockwise.
pub const RIGHT_TURNS: &[PieceId] = &[
    PieceId::BankedRightQuarterTurn5,
    PieceId::RightBankedQuarterTurn5Up25,
    PieceId::RightBankedQuarterTurn5Down25,
    PieceId::RightQuarterTurn3Bank,
    PieceId::RightBankedQuarterTurn3Up25,
    PieceId::RightQuarterTurn1Up60,
    PieceId::RightBankedQuarterTurn3Down25,
    PieceId::RightQuarterTurn1Down60,
    // Only used for the station approach.
    PieceId::RightQuarterTurn3,
];

/// Pieces that rotate the heading one step counter-clockwise.
pub const LEFT_TURNS: &[PieceId] = &[
    PieceId::BankedLeftQuarterTurn5,
    PieceId::LeftBankedQuarterTurn5Up25,
    PieceId::LeftBankedQuarterTurn5Down25,
    PieceId::LeftQuarterTurn3Bank,
    PieceId::LeftBankedQuarterTurn3Up25,
    PieceId::LeftQuarterTurn1Up60,
    PieceId::LeftBankedQuarterTurn3Down25,
    PieceId::LeftQuarterTurn1Down60,
    // Only used for the station approach.
    PieceId::LeftQuarterTurn3,
];

/// The heading after placing `id` while travelling toward `heading`.
pub fn heading_after(id: PieceId, heading: Heading) -> Heading {
    if RIGHT_TURNS.contains(&id) {
        heading.turn_right()
    } else if LEFT_TURNS.contains(&id) {
        heading.turn_left()
    } else {
        heading
    }
}

/// Continuations of a piece that ends flat and unbanked.
pub const FLAT_EXIT: &[PieceId] = &[
    PieceId::Flat,
    PieceId::FlatToLeftBank,
    PieceId::FlatToRightBank,
    PieceId::FlatToUp25,
    PieceId::FlatToLeftBankedUp25,
    PieceId::FlatToRightBankedUp25,
    PieceId::FlatToDown25,
    PieceId::FlatToLeftBankedDown25,
    PieceId::FlatToRightBankedDown25,
];

/// Continuations of a piece that ends flat, banked left.
pub const LEFT_BANK_EXIT: &[PieceId] = &[
    PieceId::LeftBank,
    PieceId::LeftBankToFlat,
    PieceId::LeftBankToUp25,
    PieceId::LeftBankToDown25,
    PieceId::LeftBankedFlatToLeftBankedUp25,
    PieceId::LeftBankedFlatToLeftBankedDown25,
    PieceId::BankedLeftQuarterTurn5,
    PieceId::LeftQuarterTurn3Bank,
];

/// Continuations of a piece that ends flat, banked right.
pub const RIGHT_BANK_EXIT: &[PieceId] = &[
    PieceId::RightBank,
    PieceId::RightBankToFlat,
    PieceId::RightBankToUp25,
    PieceId::RightBankToDown25,
    PieceId::RightBankedFlatToRightBankedUp25,
    PieceId::RightBankedFlatToRightBankedDown25,
    PieceId::BankedRightQuarterTurn5,
    PieceId::RightQuarterTurn3Bank,
];

/// Continuations of a piece that ends on a 25-degree climb, unbanked.
/// The vertical loops enter from exactly this profile.
pub const UP25_EXIT: &[PieceId] = &[
    PieceId::Up25ToFlat,
    PieceId::Up25ToLeftBank,
    PieceId::Up25ToRightBank,
    PieceId::Up25,
    PieceId::Up25ToLeftBankedUp25,
    PieceId::Up25ToRightBankedUp25,
    PieceId::Up25ToUp60,
    PieceId::LeftVerticalLoop,
    PieceId::RightVerticalLoop,
];

/// Continuations of a piece that ends on a 25-degree climb, banked left.
pub const UP25_LEFT_BANKED_EXIT: &[PieceId] = &[
    PieceId::Up25LeftBanked,
    PieceId::LeftBankedUp25ToUp25,
    PieceId::LeftBankedUp25ToLeftBankedFlat,
    PieceId::LeftBankedUp25ToFlat,
    PieceId::LeftBankedQuarterTurn5Up25,
    PieceId::LeftBankedQuarterTurn3Up25,
];

/// Continuations of a piece that ends on a 25-degree climb, banked right.
pub const UP25_RIGHT_BANKED_EXIT: &[PieceId] = &[
    PieceId::Up25RightBanked,
    PieceId::RightBankedUp25ToUp25,
    PieceId::RightBankedUp25ToRightBankedFlat,
    PieceId::RightBankedUp25ToFlat,
    PieceId::RightBankedQuarterTurn5Up25,
    PieceId::RightBankedQuarterTurn3Up25,
];

/// Continuations of a piece that ends on a 60-degree climb.
pub const UP60_EXIT: &[PieceId] = &[
    PieceId::Up60ToUp25,
    PieceId::Up60,
    PieceId::RightQuarterTurn1Up60,
    PieceId::LeftQuarterTurn1Up60,
];

/// Continuations of a piece that ends on a 25-degree descent, unbanked.
pub const DOWN25_EXIT: &[PieceId] = &[
    PieceId::Down25ToFlat,
    PieceId::Down25ToLeftBank,
    PieceId::Down25ToRightBank,
    PieceId::Down25,
    PieceId::Down25ToLeftBankedDown25,
    PieceId::Down25ToRightBankedDown25,
    PieceId::Down25ToDown60,
];

/// Continuations of a piece that ends on a 25-degree descent, banked left.
pub const DOWN25_LEFT_BANKED_EXIT: &[PieceId] = &[
    PieceId::Down25LeftBanked,
    PieceId::LeftBankedDown25ToDown25,
    PieceId::LeftBankedDown25ToLeftBankedFlat,
    PieceId::LeftBankedDown25ToFlat,
    PieceId::LeftBankedQuarterTurn5Down25,
    PieceId::LeftBankedQuarterTurn3Down25,
];

/// Continuations of a piece that ends on a 25-degree descent, banked right.
pub const DOWN25_RIGHT_BANKED_EXIT: &[PieceId] = &[
    PieceId::Down25RightBanked,
    PieceId::RightBankedDown25ToDown25,
    PieceId::RightBankedDown25ToRightBankedFlat,
    PieceId::RightBankedDown25ToFlat,
    PieceId::RightBankedQuarterTurn5Down25,
    PieceId::RightBankedQuarterTurn3Down25,
];

/// Continuations of a piece that ends on a 60-degree descent.
pub const DOWN60_EXIT: &[PieceId] = &[
    PieceId::Down60ToDown25,
    PieceId::Down60,
    PieceId::RightQuarterTurn1Down60,
    PieceId::LeftQuarterTurn1Down60,
];

/// The legal continuations of a just-placed piece, keyed by its exit
/// profile. Vertical loops exit nose-down, so both map to the 25-degree
/// descent set even though only climbs can enter them.
pub fn successors(id: PieceId) -> &'static [PieceId] {
    use PieceId::*;
    match id {
        // Station segments end flat; the plain quarter turns only occur
        // while seeding the station approach and also end flat.
        BeginStation | MiddleStation | EndStation => FLAT_EXIT,
        LeftQuarterTurn3 | RightQuarterTurn3 => FLAT_EXIT,

        Flat | LeftBankToFlat | RightBankToFlat | Up25ToFlat | LeftBankedUp25ToFlat
        | RightBankedUp25ToFlat | Down25ToFlat | LeftBankedDown25ToFlat
        | RightBankedDown25ToFlat => FLAT_EXIT,

        FlatToLeftBank | LeftBank | BankedLeftQuarterTurn5 | LeftQuarterTurn3Bank
        | Up25ToLeftBank | LeftBankedUp25ToLeftBankedFlat | Down25ToLeftBank
        | LeftBankedDown25ToLeftBankedFlat => LEFT_BANK_EXIT,

        FlatToRightBank | RightBank | BankedRightQuarterTurn5 | RightQuarterTurn3Bank
        | Up25ToRightBank | RightBankedUp25ToRightBankedFlat | Down25ToRightBank
        | RightBankedDown25ToRightBankedFlat => RIGHT_BANK_EXIT,

        FlatToUp25 | LeftBankToUp25 | RightBankToUp25 | Up25 | LeftBankedUp25ToUp25
        | RightBankedUp25ToUp25 | Up60ToUp25 => UP25_EXIT,

        FlatToLeftBankedUp25 | LeftBankedFlatToLeftBankedUp25 | Up25LeftBanked
        | Up25ToLeftBankedUp25 | LeftBankedQuarterTurn5Up25 | LeftBankedQuarterTurn3Up25 => {
            UP25_LEFT_BANKED_EXIT
        }

        FlatToRightBankedUp25 | RightBankedFlatToRightBankedUp25 | Up25RightBanked
        | Up25ToRightBankedUp25 | RightBankedQuarterTurn5Up25
        | RightBankedQuarterTurn3Up25 => UP25_RIGHT_BANKED_EXIT,

        Up25ToUp60 | Up60 | RightQuarterTurn1Up60 | LeftQuarterTurn1Up60 => UP60_EXIT,

        FlatToDown25 | LeftBankToDown25 | RightBankToDown25 | Down25
        | LeftBankedDown25ToDown25 | RightBankedDown25ToDown25 | Down60ToDown25
        | LeftVerticalLoop | RightVerticalLoop => DOWN25_EXIT,

        FlatToLeftBankedDown25 | LeftBankedFlatToLeftBankedDown25 | Down25LeftBanked
        | Down25ToLeftBankedDown25 | LeftBankedQuarterTurn5Down25
        | LeftBankedQuarterTurn3Down25 => DOWN25_LEFT_BANKED_EXIT,

        FlatToRightBankedDown25 | RightBankedFlatToRightBankedDown25 | Down25RightBanked
        | Down25ToRightBankedDown25 | RightBankedQuarterTurn5Down25
        | RightBankedQuarterTurn3Down25 => DOWN25_RIGHT_BANKED_EXIT,

        Down25ToDown60 | Down60 | RightQuarterTurn1Down60 | LeftQuarterTurn1Down60 => {
            DOWN60_EXIT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climbs(id: PieceId) -> bool {
        matches!(
            id,
            PieceId::Up25
                | PieceId::Up25ToUp60
                | PieceId::Up60
                | PieceId::LeftBankedQuarterTurn5Up25
                | PieceId::RightBankedQuarterTurn5Up25
        )
    }

    fn descends(id: PieceId) -> bool {
        matches!(
            id,
            PieceId::Down25
                | PieceId::Down25ToDown60
                | PieceId::Down60
                | PieceId::LeftBankedQuarterTurn5Down25
                | PieceId::RightBankedQuarterTurn5Down25
        )
    }

    #[test]
    fn test_turn_tables_are_disjoint_left_right_pairs() {
        assert_eq!(RIGHT_TURNS.len(), LEFT_TURNS.len());
        for id in RIGHT_TURNS {
            assert!(!LEFT_TURNS.contains(id));
        }
    }

    #[test]
    fn test_heading_after_rotates_turns_only() {
        assert_eq!(
            heading_after(PieceId::BankedRightQuarterTurn5, Heading::North),
            Heading::East
        );
        assert_eq!(
            heading_after(PieceId::LeftBankedQuarterTurn5Up25, Heading::East),
            Heading::North
        );
        assert_eq!(heading_after(PieceId::Flat, Heading::South), Heading::South);
        assert_eq!(
            heading_after(PieceId::LeftVerticalLoop, Heading::West),
            Heading::West
        );
    }

    #[test]
    fn test_every_piece_has_successors() {
        for id in PieceId::ALL {
            assert!(!successors(id).is_empty(), "{id:?} has no continuations");
        }
    }

    #[test]
    fn test_vertical_loops_exit_into_the_descent_set() {
        // loops can only be entered from a climb but exit nose-down
        assert!(UP25_EXIT.contains(&PieceId::LeftVerticalLoop));
        assert!(UP25_EXIT.contains(&PieceId::RightVerticalLoop));
        assert_eq!(successors(PieceId::LeftVerticalLoop), DOWN25_EXIT);
        assert_eq!(successors(PieceId::RightVerticalLoop), DOWN25_EXIT);
    }

    #[test]
    fn test_climb_sets_never_offer_descending_pieces() {
        for set in [UP25_EXIT, UP25_LEFT_BANKED_EXIT, UP25_RIGHT_BANKED_EXIT, UP60_EXIT] {
            for &id in set {
                assert!(!descends(id), "{id:?} descends out of a climbing profile");
            }
        }
        for set in [
            DOWN25_EXIT,
            DOWN25_LEFT_BANKED_EXIT,
            DOWN25_RIGHT_BANKED_EXIT,
            DOWN60_EXIT,
        ] {
            for &id in set {
                assert!(!climbs(id), "{id:?} climbs out of a descending profile");
            }
        }
    }

    #[test]
    fn test_flat_exit_offers_every_gradient_entry() {
        assert_eq!(FLAT_EXIT.len(), 9);
        assert!(FLAT_EXIT.contains(&PieceId::FlatToUp25));
        assert!(FLAT_EXIT.contains(&PieceId::FlatToDown25));
        assert!(!FLAT_EXIT.contains(&PieceId::BeginStation));
    }
}
