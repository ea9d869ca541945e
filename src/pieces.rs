//! Track piece identifiers, footprints and the oriented catalogue.
//!
//! Shapes are authored once, right-handed, facing north. Left-handed pieces
//! are derived by mirroring their right-handed counterpart, and the four
//! directional variants by repeated clockwise rotation. Several identifiers
//! reuse the footprint of a simpler piece (a bank transition occupies the
//! same tiles as plain flat track); those aliases match the original ride
//! data and are intentional.

use rustc_hash::FxHashMap;

use crate::geometry::{Coord, Heading, QuadCell};

/// Rotation tag for exported track elements: "use the piece's default
/// orientation" in the design-file convention.
pub const DEFAULT_ROTATION: u8 = 4;

/// A track element as it appears in a design file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackElement {
    pub id: PieceId,
    pub rotation: u8,
}

impl TrackElement {
    #[inline]
    pub const fn new(id: PieceId) -> Self {
        Self {
            id,
            rotation: DEFAULT_ROTATION,
        }
    }
}

/// One occupied tile-column of a piece footprint, relative to the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackCell {
    pub coord: Coord,
    pub cell: QuadCell,
}

/// A piece footprint plus the anchor delta to the next piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackPiece {
    pub shape: Vec<TrackCell>,
    pub exit: Coord,
}

impl TrackPiece {
    /// Left-handed counterpart: every cell and the exit reflected across
    /// the x = 0 plane.
    pub fn mirrored(&self) -> TrackPiece {
        TrackPiece {
            shape: self
                .shape
                .iter()
                .map(|tc| TrackCell {
                    coord: tc.coord.mirror(),
                    cell: tc.cell.mirror(),
                })
                .collect(),
            exit: self.exit.mirror(),
        }
    }

    /// The piece rotated 90 degrees clockwise (one heading step).
    pub fn rotated_cw(&self) -> TrackPiece {
        TrackPiece {
            shape: self
                .shape
                .iter()
                .map(|tc| TrackCell {
                    coord: tc.coord.rotate_cw(),
                    cell: tc.cell.rotate_cw(),
                })
                .collect(),
            exit: self.exit.rotate_cw(),
        }
    }

    fn from_raw(raw: &RawPiece) -> TrackPiece {
        TrackPiece {
            shape: raw
                .shape
                .iter()
                .map(|&((y, x, z), (c00, c01, c10, c11))| TrackCell {
                    coord: Coord::new(y, x, z),
                    cell: QuadCell::of(c00, c01, c10, c11),
                })
                .collect(),
            exit: Coord::new(raw.exit.0, raw.exit.1, raw.exit.2),
        }
    }
}

/// Identifier of a track element kind.
///
/// Discriminants double as the one-byte wire codes used by the design-file
/// container, so the declaration order is part of the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceId {
    BeginStation,
    MiddleStation,
    EndStation,
    Flat,
    FlatToLeftBank,
    FlatToRightBank,
    FlatToUp25,
    FlatToLeftBankedUp25,
    FlatToRightBankedUp25,
    FlatToDown25,
    FlatToLeftBankedDown25,
    FlatToRightBankedDown25,
    LeftBank,
    LeftBankToFlat,
    LeftBankToUp25,
    LeftBankToDown25,
    LeftBankedFlatToLeftBankedUp25,
    LeftBankedFlatToLeftBankedDown25,
    RightBank,
    RightBankToFlat,
    RightBankToUp25,
    RightBankToDown25,
    RightBankedFlatToRightBankedUp25,
    RightBankedFlatToRightBankedDown25,
    BankedLeftQuarterTurn5,
    BankedRightQuarterTurn5,
    LeftQuarterTurn3Bank,
    RightQuarterTurn3Bank,
    LeftQuarterTurn3,
    RightQuarterTurn3,
    Up25,
    Up25ToFlat,
    Up25ToLeftBank,
    Up25ToRightBank,
    Up25ToLeftBankedUp25,
    Up25ToRightBankedUp25,
    Up25ToUp60,
    Up25LeftBanked,
    Up25RightBanked,
    LeftBankedUp25ToUp25,
    RightBankedUp25ToUp25,
    LeftBankedUp25ToLeftBankedFlat,
    RightBankedUp25ToRightBankedFlat,
    LeftBankedUp25ToFlat,
    RightBankedUp25ToFlat,
    LeftBankedQuarterTurn5Up25,
    RightBankedQuarterTurn5Up25,
    LeftBankedQuarterTurn3Up25,
    RightBankedQuarterTurn3Up25,
    Up60,
    Up60ToUp25,
    LeftQuarterTurn1Up60,
    RightQuarterTurn1Up60,
    Down25,
    Down25ToFlat,
    Down25ToLeftBank,
    Down25ToRightBank,
    Down25ToLeftBankedDown25,
    Down25ToRightBankedDown25,
    Down25ToDown60,
    Down25LeftBanked,
    Down25RightBanked,
    LeftBankedDown25ToDown25,
    RightBankedDown25ToDown25,
    LeftBankedDown25ToLeftBankedFlat,
    RightBankedDown25ToRightBankedFlat,
    LeftBankedDown25ToFlat,
    RightBankedDown25ToFlat,
    LeftBankedQuarterTurn5Down25,
    RightBankedQuarterTurn5Down25,
    LeftBankedQuarterTurn3Down25,
    RightBankedQuarterTurn3Down25,
    Down60,
    Down60ToDown25,
    LeftQuarterTurn1Down60,
    RightQuarterTurn1Down60,
    LeftVerticalLoop,
    RightVerticalLoop,
}

impl PieceId {
    /// Every piece identifier, in declaration (wire code) order.
    pub const ALL: [PieceId; 78] = [
        PieceId::BeginStation,
        PieceId::MiddleStation,
        PieceId::EndStation,
        PieceId::Flat,
        PieceId::FlatToLeftBank,
        PieceId::FlatToRightBank,
        PieceId::FlatToUp25,
        PieceId::FlatToLeftBankedUp25,
        PieceId::FlatToRightBankedUp25,
        PieceId::FlatToDown25,
        PieceId::FlatToLeftBankedDown25,
        PieceId::FlatToRightBankedDown25,
        PieceId::LeftBank,
        PieceId::LeftBankToFlat,
        PieceId::LeftBankToUp25,
        PieceId::LeftBankToDown25,
        PieceId::LeftBankedFlatToLeftBankedUp25,
        PieceId::LeftBankedFlatToLeftBankedDown25,
        PieceId::RightBank,
        PieceId::RightBankToFlat,
        PieceId::RightBankToUp25,
        PieceId::RightBankToDown25,
        PieceId::RightBankedFlatToRightBankedUp25,
        PieceId::RightBankedFlatToRightBankedDown25,
        PieceId::BankedLeftQuarterTurn5,
        PieceId::BankedRightQuarterTurn5,
        PieceId::LeftQuarterTurn3Bank,
        PieceId::RightQuarterTurn3Bank,
        PieceId::LeftQuarterTurn3,
        PieceId::RightQuarterTurn3,
        PieceId::Up25,
        PieceId::Up25ToFlat,
        PieceId::Up25ToLeftBank,
        PieceId::Up25ToRightBank,
        PieceId::Up25ToLeftBankedUp25,
        PieceId::Up25ToRightBankedUp25,
        PieceId::Up25ToUp60,
        PieceId::Up25LeftBanked,
        PieceId::Up25RightBanked,
        PieceId::LeftBankedUp25ToUp25,
        PieceId::RightBankedUp25ToUp25,
        PieceId::LeftBankedUp25ToLeftBankedFlat,
        PieceId::RightBankedUp25ToRightBankedFlat,
        PieceId::LeftBankedUp25ToFlat,
        PieceId::RightBankedUp25ToFlat,
        PieceId::LeftBankedQuarterTurn5Up25,
        PieceId::RightBankedQuarterTurn5Up25,
        PieceId::LeftBankedQuarterTurn3Up25,
        PieceId::RightBankedQuarterTurn3Up25,
        PieceId::Up60,
        PieceId::Up60ToUp25,
        PieceId::LeftQuarterTurn1Up60,
        PieceId::RightQuarterTurn1Up60,
        PieceId::Down25,
        PieceId::Down25ToFlat,
        PieceId::Down25ToLeftBank,
        PieceId::Down25ToRightBank,
        PieceId::Down25ToLeftBankedDown25,
        PieceId::Down25ToRightBankedDown25,
        PieceId::Down25ToDown60,
        PieceId::Down25LeftBanked,
        PieceId::Down25RightBanked,
        PieceId::LeftBankedDown25ToDown25,
        PieceId::RightBankedDown25ToDown25,
        PieceId::LeftBankedDown25ToLeftBankedFlat,
        PieceId::RightBankedDown25ToRightBankedFlat,
        PieceId::LeftBankedDown25ToFlat,
        PieceId::RightBankedDown25ToFlat,
        PieceId::LeftBankedQuarterTurn5Down25,
        PieceId::RightBankedQuarterTurn5Down25,
        PieceId::LeftBankedQuarterTurn3Down25,
        PieceId::RightBankedQuarterTurn3Down25,
        PieceId::Down60,
        PieceId::Down60ToDown25,
        PieceId::LeftQuarterTurn1Down60,
        PieceId::RightQuarterTurn1Down60,
        PieceId::LeftVerticalLoop,
        PieceId::RightVerticalLoop,
    ];

    /// Wire code used by the design-file container.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceId::code`].
    #[inline]
    pub fn from_code(code: u8) -> Option<PieceId> {
        PieceId::ALL.get(code as usize).copied()
    }
}

/// Left-handed pieces paired with the right-handed shape they mirror.
pub const MIRROR_PAIRS: &[(PieceId, PieceId)] = &[
    (PieceId::FlatToLeftBank, PieceId::FlatToRightBank),
    (PieceId::FlatToLeftBankedUp25, PieceId::FlatToRightBankedUp25),
    (PieceId::FlatToLeftBankedDown25, PieceId::FlatToRightBankedDown25),
    (PieceId::LeftBank, PieceId::RightBank),
    (PieceId::LeftBankToFlat, PieceId::RightBankToFlat),
    (PieceId::LeftBankToUp25, PieceId::RightBankToUp25),
    (PieceId::LeftBankToDown25, PieceId::RightBankToDown25),
    (
        PieceId::LeftBankedFlatToLeftBankedUp25,
        PieceId::RightBankedFlatToRightBankedUp25,
    ),
    (
        PieceId::LeftBankedFlatToLeftBankedDown25,
        PieceId::RightBankedFlatToRightBankedDown25,
    ),
    (PieceId::Up25LeftBanked, PieceId::Up25RightBanked),
    (PieceId::BankedLeftQuarterTurn5, PieceId::BankedRightQuarterTurn5),
    (PieceId::LeftQuarterTurn3Bank, PieceId::RightQuarterTurn3Bank),
    (PieceId::Up25ToLeftBank, PieceId::Up25ToRightBank),
    (PieceId::Up25ToLeftBankedUp25, PieceId::Up25ToRightBankedUp25),
    (PieceId::LeftBankedUp25ToUp25, PieceId::RightBankedUp25ToUp25),
    (
        PieceId::LeftBankedUp25ToLeftBankedFlat,
        PieceId::RightBankedUp25ToRightBankedFlat,
    ),
    (PieceId::LeftBankedUp25ToFlat, PieceId::RightBankedUp25ToFlat),
    (
        PieceId::LeftBankedQuarterTurn5Up25,
        PieceId::RightBankedQuarterTurn5Up25,
    ),
    (
        PieceId::LeftBankedQuarterTurn3Up25,
        PieceId::RightBankedQuarterTurn3Up25,
    ),
    (PieceId::LeftQuarterTurn1Up60, PieceId::RightQuarterTurn1Up60),
    (PieceId::Down25ToLeftBank, PieceId::Down25ToRightBank),
    (
        PieceId::Down25ToLeftBankedDown25,
        PieceId::Down25ToRightBankedDown25,
    ),
    (PieceId::Down25LeftBanked, PieceId::Down25RightBanked),
    (
        PieceId::LeftBankedDown25ToDown25,
        PieceId::RightBankedDown25ToDown25,
    ),
    (
        PieceId::LeftBankedDown25ToLeftBankedFlat,
        PieceId::RightBankedDown25ToRightBankedFlat,
    ),
    (PieceId::LeftBankedDown25ToFlat, PieceId::RightBankedDown25ToFlat),
    (
        PieceId::LeftBankedQuarterTurn5Down25,
        PieceId::RightBankedQuarterTurn5Down25,
    ),
    (
        PieceId::LeftBankedQuarterTurn3Down25,
        PieceId::RightBankedQuarterTurn3Down25,
    ),
    (PieceId::LeftQuarterTurn1Down60, PieceId::RightQuarterTurn1Down60),
    (PieceId::LeftVerticalLoop, PieceId::RightVerticalLoop),
    (PieceId::LeftQuarterTurn3, PieceId::RightQuarterTurn3),
];

type RawCell = ((i32, i32, i32), (u8, u8, u8, u8));

struct RawPiece {
    shape: &'static [RawCell],
    exit: (i32, i32, i32),
}

const FLAT: RawPiece = RawPiece {
    shape: &[((0, 0, 0), (1, 1, 1, 1)), ((0, 0, 1), (1, 1, 1, 1))],
    exit: (1, 0, 0),
};

const FLAT_TO_UP25: RawPiece = RawPiece {
    shape: &[((0, 0, 0), (1, 1, 1, 1)), ((0, 0, 1), (1, 1, 1, 1))],
    exit: (1, 0, 1),
};

const UP25: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
    ],
    exit: (1, 0, 1),
};

const UP25_TO_FLAT: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
    ],
    exit: (1, 0, 0),
};

const UP25_TO_UP60: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 0, 2), (1, 1, 1, 1)),
    ],
    exit: (1, 0, 2),
};

const UP60: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 0, 2), (1, 1, 1, 1)),
        ((0, 0, 3), (1, 1, 1, 1)),
        ((0, 0, 4), (1, 1, 1, 1)),
    ],
    exit: (1, 0, 4),
};

const DOWN25: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
    ],
    exit: (1, 0, -1),
};

const DOWN25_TO_FLAT: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
    ],
    exit: (1, 0, 0),
};

const DOWN25_TO_DOWN60: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -2), (1, 1, 1, 1)),
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
    ],
    exit: (1, 0, -2),
};

const DOWN60: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -4), (1, 1, 1, 1)),
        ((0, 0, -3), (1, 1, 1, 1)),
        ((0, 0, -2), (1, 1, 1, 1)),
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
    ],
    exit: (1, 0, -4),
};

// Radius-5 turn: a 3x3 tile area minus the inner corner, two z-levels.
const QUARTER_TURN_5: RawPiece = RawPiece {
    shape: &[
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 1, 0), (0, 0, 1, 0)),
        ((1, 0, 0), (1, 1, 0, 1)),
        ((1, 1, 0), (1, 0, 1, 1)),
        ((1, 2, 0), (0, 0, 1, 0)),
        ((2, 1, 0), (1, 1, 0, 1)),
        ((2, 2, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 1, 1), (0, 0, 1, 0)),
        ((1, 0, 1), (1, 1, 0, 1)),
        ((1, 1, 1), (1, 0, 1, 1)),
        ((1, 2, 1), (0, 0, 1, 0)),
        ((2, 1, 1), (1, 1, 0, 1)),
        ((2, 2, 1), (1, 1, 1, 1)),
    ],
    exit: (2, 3, 0),
};

const QUARTER_TURN_5_UP25: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 1, 0), (0, 0, 1, 0)),
        ((0, 1, 1), (0, 0, 1, 0)),
        ((1, 0, 0), (1, 1, 0, 1)),
        ((1, 0, 1), (1, 1, 0, 1)),
        ((1, 0, 2), (1, 1, 0, 1)),
        ((1, 1, 1), (1, 0, 1, 1)),
        ((1, 1, 2), (1, 0, 1, 1)),
        ((1, 1, 3), (1, 0, 1, 1)),
        ((2, 1, 1), (1, 1, 0, 1)),
        ((2, 1, 2), (1, 1, 0, 1)),
        ((2, 1, 3), (1, 1, 0, 1)),
        ((1, 2, 2), (0, 0, 1, 0)),
        ((1, 2, 3), (0, 0, 1, 0)),
        ((2, 2, 2), (1, 1, 1, 1)),
        ((2, 2, 3), (1, 1, 1, 1)),
        ((2, 2, 4), (1, 1, 1, 1)),
    ],
    exit: (2, 3, 4),
};

const QUARTER_TURN_5_DOWN25: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 1, 0), (0, 0, 1, 0)),
        ((0, 1, -1), (0, 0, 1, 0)),
        ((1, 0, 1), (1, 1, 0, 1)),
        ((1, 0, 0), (1, 1, 0, 1)),
        ((1, 0, -1), (1, 1, 0, 1)),
        ((1, 0, -2), (1, 1, 0, 1)),
        ((1, 1, 0), (1, 0, 1, 1)),
        ((1, 1, -1), (1, 0, 1, 1)),
        ((1, 1, -2), (1, 0, 1, 1)),
        ((1, 1, -3), (1, 0, 1, 1)),
        ((2, 1, -1), (1, 1, 0, 1)),
        ((2, 1, -2), (1, 1, 0, 1)),
        ((2, 1, -3), (1, 1, 0, 1)),
        ((1, 2, -1), (0, 0, 1, 0)),
        ((1, 2, -2), (0, 0, 1, 0)),
        ((1, 2, -3), (0, 0, 1, 0)),
        ((2, 2, -2), (1, 1, 1, 1)),
        ((2, 2, -3), (1, 1, 1, 1)),
        ((2, 2, -4), (1, 1, 1, 1)),
    ],
    exit: (2, 3, -4),
};

// Radius-3 turn: a 2x2 tile area, partial quadrants along the inner edge.
const QUARTER_TURN_3: RawPiece = RawPiece {
    shape: &[
        ((0, 0, 0), (1, 1, 0, 1)),
        ((0, 1, 0), (0, 0, 1, 0)),
        ((1, 0, 0), (0, 1, 0, 0)),
        ((1, 1, 0), (1, 1, 0, 1)),
        ((0, 0, 1), (1, 1, 0, 1)),
        ((0, 1, 1), (0, 0, 1, 0)),
        ((1, 0, 1), (0, 1, 0, 0)),
        ((1, 1, 1), (1, 1, 0, 1)),
    ],
    exit: (1, 2, 0),
};

const QUARTER_TURN_3_UP25: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 0, 1)),
        ((0, 0, 0), (1, 1, 0, 1)),
        ((0, 0, 1), (1, 1, 0, 1)),
        ((0, 1, 0), (0, 0, 1, 0)),
        ((0, 1, 1), (0, 0, 1, 0)),
        ((1, 0, 0), (0, 1, 0, 0)),
        ((1, 0, 1), (0, 1, 0, 0)),
        ((1, 1, 0), (1, 1, 0, 1)),
        ((1, 1, 1), (1, 1, 0, 1)),
        ((1, 1, 2), (1, 1, 0, 1)),
    ],
    exit: (1, 2, 2),
};

const QUARTER_TURN_3_DOWN25: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 0, 1)),
        ((0, 0, 0), (1, 1, 0, 1)),
        ((0, 0, 1), (1, 1, 0, 1)),
        ((0, 1, 0), (0, 0, 1, 0)),
        ((0, 1, -1), (0, 0, 1, 0)),
        ((1, 0, 0), (0, 1, 0, 0)),
        ((1, 0, -1), (0, 1, 0, 0)),
        ((1, 1, 0), (1, 1, 0, 1)),
        ((1, 1, -1), (1, 1, 0, 1)),
        ((1, 1, -2), (1, 1, 0, 1)),
    ],
    exit: (1, 2, -2),
};

// The 1-tile 60-degree turns climb a full tile-column before exiting
// sideways.
const QUARTER_TURN_1_UP60: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 0, 2), (1, 1, 1, 1)),
        ((0, 0, 3), (1, 1, 1, 1)),
        ((0, 0, 4), (1, 1, 1, 1)),
    ],
    exit: (0, 1, 4),
};

const QUARTER_TURN_1_DOWN60: RawPiece = RawPiece {
    shape: &[
        ((0, 0, 1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, -2), (1, 1, 1, 1)),
        ((0, 0, -3), (1, 1, 1, 1)),
        ((0, 0, -4), (1, 1, 1, 1)),
    ],
    exit: (0, 1, -4),
};

// Vertical loop: entry and exit ramps plus the half-tile columns the loop
// itself sweeps through. The exit points back down, one tile to the side.
const VERTICAL_LOOP: RawPiece = RawPiece {
    shape: &[
        ((0, 0, -1), (1, 1, 1, 1)),
        ((0, 0, 0), (1, 1, 1, 1)),
        ((0, 0, 1), (1, 1, 1, 1)),
        ((1, 0, 0), (1, 1, 1, 1)),
        ((1, 0, 1), (1, 1, 1, 1)),
        ((1, 0, 2), (1, 1, 1, 1)),
        ((1, 0, 7), (0, 1, 0, 1)),
        ((1, 0, 8), (0, 1, 0, 1)),
        ((1, 0, 9), (0, 1, 0, 1)),
        ((2, 0, 1), (0, 1, 0, 0)),
        ((2, 0, 2), (0, 1, 0, 0)),
        ((2, 0, 3), (0, 1, 0, 0)),
        ((2, 0, 4), (0, 1, 0, 0)),
        ((2, 0, 5), (0, 1, 0, 0)),
        ((2, 0, 6), (0, 1, 0, 0)),
        ((2, 0, 7), (0, 1, 0, 0)),
        ((2, 0, 8), (0, 1, 0, 0)),
        ((1, 1, -1), (1, 1, 1, 1)),
        ((1, 1, 0), (1, 1, 1, 1)),
        ((1, 1, 1), (1, 1, 1, 1)),
        ((0, 1, 0), (1, 1, 1, 1)),
        ((0, 1, 1), (1, 1, 1, 1)),
        ((0, 1, 2), (1, 1, 1, 1)),
        ((0, 1, 7), (1, 0, 1, 0)),
        ((0, 1, 8), (1, 0, 1, 0)),
        ((0, 1, 9), (1, 0, 1, 0)),
        ((-1, 1, 1), (0, 0, 1, 0)),
        ((-1, 1, 2), (0, 0, 1, 0)),
        ((-1, 1, 3), (0, 0, 1, 0)),
        ((-1, 1, 4), (0, 0, 1, 0)),
        ((-1, 1, 5), (0, 0, 1, 0)),
        ((-1, 1, 6), (0, 0, 1, 0)),
        ((-1, 1, 7), (0, 0, 1, 0)),
        ((-1, 1, 8), (0, 0, 1, 0)),
    ],
    exit: (2, 1, -1),
};

/// Right-handed and handedness-free pieces with their canonical shapes.
/// Station segments occupy the same tiles as flat track, and several bank
/// transitions alias the shape of the matching plain gradient piece.
const CANONICAL: &[(PieceId, &RawPiece)] = &[
    (PieceId::BeginStation, &FLAT),
    (PieceId::MiddleStation, &FLAT),
    (PieceId::EndStation, &FLAT),
    (PieceId::Flat, &FLAT),
    (PieceId::FlatToRightBank, &FLAT),
    (PieceId::FlatToUp25, &FLAT_TO_UP25),
    (PieceId::FlatToRightBankedUp25, &FLAT_TO_UP25),
    (PieceId::FlatToDown25, &DOWN25),
    (PieceId::FlatToRightBankedDown25, &DOWN25),
    (PieceId::RightBankedFlatToRightBankedUp25, &FLAT_TO_UP25),
    (PieceId::RightBankedFlatToRightBankedDown25, &DOWN25),
    (PieceId::RightBank, &FLAT),
    (PieceId::RightBankToFlat, &FLAT),
    (PieceId::RightBankToUp25, &FLAT_TO_UP25),
    (PieceId::RightBankToDown25, &DOWN25),
    (PieceId::Up25RightBanked, &UP25),
    (PieceId::BankedRightQuarterTurn5, &QUARTER_TURN_5),
    (PieceId::RightQuarterTurn3Bank, &QUARTER_TURN_3),
    (PieceId::Up25ToFlat, &UP25_TO_FLAT),
    (PieceId::Up25ToRightBank, &UP25_TO_FLAT),
    (PieceId::Up25, &UP25),
    (PieceId::Up25ToRightBankedUp25, &UP25),
    (PieceId::Up25ToUp60, &UP25_TO_UP60),
    (PieceId::RightBankedUp25ToUp25, &UP25),
    (PieceId::RightBankedUp25ToRightBankedFlat, &UP25_TO_FLAT),
    (PieceId::RightBankedUp25ToFlat, &UP25_TO_FLAT),
    (PieceId::RightBankedQuarterTurn5Up25, &QUARTER_TURN_5_UP25),
    (PieceId::RightBankedQuarterTurn3Up25, &QUARTER_TURN_3_UP25),
    (PieceId::Up60ToUp25, &UP25_TO_UP60),
    (PieceId::Up60, &UP60),
    (PieceId::RightQuarterTurn1Up60, &QUARTER_TURN_1_UP60),
    (PieceId::Down25ToFlat, &DOWN25_TO_FLAT),
    (PieceId::Down25ToRightBank, &DOWN25_TO_FLAT),
    (PieceId::Down25, &DOWN25),
    (PieceId::Down25ToRightBankedDown25, &DOWN25),
    (PieceId::Down25ToDown60, &DOWN25_TO_DOWN60),
    (PieceId::Down25RightBanked, &DOWN25),
    (PieceId::RightBankedDown25ToDown25, &DOWN25),
    (PieceId::RightBankedDown25ToRightBankedFlat, &DOWN25_TO_FLAT),
    (PieceId::RightBankedDown25ToFlat, &DOWN25_TO_FLAT),
    (PieceId::RightBankedQuarterTurn5Down25, &QUARTER_TURN_5_DOWN25),
    (PieceId::RightBankedQuarterTurn3Down25, &QUARTER_TURN_3_DOWN25),
    (PieceId::Down60ToDown25, &DOWN25_TO_DOWN60),
    (PieceId::Down60, &DOWN60),
    (PieceId::RightQuarterTurn1Down60, &QUARTER_TURN_1_DOWN60),
    (PieceId::RightVerticalLoop, &VERTICAL_LOOP),
    // Unbanked turn, only used while seeding the station approach.
    (PieceId::RightQuarterTurn3, &QUARTER_TURN_3),
];

/// Read-only lookup of every piece footprint at every heading.
pub struct Catalogue {
    oriented: FxHashMap<(PieceId, Heading), TrackPiece>,
}

impl Catalogue {
    /// Builds the full catalogue: canonical shapes, then left-handed
    /// mirrors, then the four rotated variants of everything.
    pub fn build() -> Catalogue {
        let mut canonical: FxHashMap<PieceId, TrackPiece> = CANONICAL
            .iter()
            .map(|&(id, raw)| (id, TrackPiece::from_raw(raw)))
            .collect();

        for &(left, right) in MIRROR_PAIRS {
            let mirrored = canonical[&right].mirrored();
            canonical.insert(left, mirrored);
        }

        let mut oriented = FxHashMap::default();
        for (id, piece) in canonical {
            let mut current = piece.clone();
            oriented.insert((id, Heading::North), piece);
            for heading in [Heading::East, Heading::South, Heading::West] {
                current = current.rotated_cw();
                oriented.insert((id, heading), current.clone());
            }
        }

        Catalogue { oriented }
    }

    /// The footprint of `id` oriented for `heading`.
    #[inline]
    pub fn oriented(&self, id: PieceId, heading: Heading) -> &TrackPiece {
        &self.oriented[&(id, heading)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_covers_every_piece_and_heading() {
        let catalogue = Catalogue::build();
        for id in PieceId::ALL {
            for heading in Heading::ALL {
                assert!(
                    catalogue.oriented.contains_key(&(id, heading)),
                    "missing {id:?} at {heading:?}"
                );
            }
        }
        assert_eq!(catalogue.oriented.len(), PieceId::ALL.len() * 4);
    }

    #[test]
    fn test_four_rotations_recover_the_piece() {
        for &(id, raw) in CANONICAL {
            let piece = TrackPiece::from_raw(raw);
            let rotated = piece.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(rotated, piece, "rotation round-trip failed for {id:?}");
        }
    }

    #[test]
    fn test_double_mirror_recovers_the_piece() {
        for &(id, raw) in CANONICAL {
            let piece = TrackPiece::from_raw(raw);
            assert_eq!(piece.mirrored().mirrored(), piece, "mirror round-trip failed for {id:?}");
        }
    }

    #[test]
    fn test_flat_oriented_east_exits_east() {
        let catalogue = Catalogue::build();
        let flat = catalogue.oriented(PieceId::Flat, Heading::East);
        assert_eq!(flat.exit, Coord::new(0, 1, 0));
    }

    #[test]
    fn test_flat_exits_at_every_heading() {
        let catalogue = Catalogue::build();
        let exits: Vec<Coord> = Heading::ALL
            .iter()
            .map(|&h| catalogue.oriented(PieceId::Flat, h).exit)
            .collect();
        insta::assert_debug_snapshot!(exits, @r"
        [
            Coord {
                y: 1,
                x: 0,
                z: 0,
            },
            Coord {
                y: 0,
                x: 1,
                z: 0,
            },
            Coord {
                y: -1,
                x: 0,
                z: 0,
            },
            Coord {
                y: 0,
                x: -1,
                z: 0,
            },
        ]
        ");
    }

    #[test]
    fn test_station_segments_share_the_flat_footprint() {
        let catalogue = Catalogue::build();
        let flat = catalogue.oriented(PieceId::Flat, Heading::North);
        for id in [PieceId::BeginStation, PieceId::MiddleStation, PieceId::EndStation] {
            assert_eq!(catalogue.oriented(id, Heading::North), flat);
        }
    }

    #[test]
    fn test_footprint_coords_are_distinct() {
        let catalogue = Catalogue::build();
        for (&(id, heading), piece) in &catalogue.oriented {
            let mut coords: Vec<Coord> = piece.shape.iter().map(|tc| tc.coord).collect();
            let before = coords.len();
            coords.sort_by_key(|c| (c.y, c.x, c.z));
            coords.dedup();
            assert_eq!(coords.len(), before, "duplicate footprint coord in {id:?} at {heading:?}");
        }
    }

    #[test]
    fn test_left_turn_mirrors_right_turn() {
        let catalogue = Catalogue::build();
        let right = catalogue.oriented(PieceId::RightQuarterTurn3, Heading::North);
        let left = catalogue.oriented(PieceId::LeftQuarterTurn3, Heading::North);
        assert_eq!(left, &right.mirrored());
        assert_eq!(left.exit, Coord::new(1, -2, 0));
    }

    #[test]
    fn test_wire_codes_round_trip() {
        for id in PieceId::ALL {
            assert_eq!(PieceId::from_code(id.code()), Some(id));
        }
        assert_eq!(PieceId::from_code(PieceId::ALL.len() as u8), None);
    }
}
