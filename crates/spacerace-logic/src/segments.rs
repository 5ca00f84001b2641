//! Mission-path segment library.
//!
//! Every opcode letter names one fixed piece of the flight-path diagram:
//! a few spline trails through hand-placed control points, plus bubbles
//! that appear depending on the opcode's operand flags. The coordinates
//! are art data for the 320×200 mission screen and must not be tweaked.

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::painter::Painter;
use crate::spline::Point;
use crate::surface::Surface;
use Stroke::{Bubble, BubbleIf, Trail, When};

/// One drawing step of a segment.
#[derive(Debug, Clone, Copy)]
pub enum Stroke {
    /// Spline trail through these control points.
    Trail(&'static [(i32, i32)]),
    /// Bubble that is always placed.
    Bubble((i32, i32)),
    /// Bubble placed when operand `flag` equals 1.
    BubbleIf { flag: usize, at: (i32, i32) },
    /// Strokes run when operand `flag` equals `value`.
    When {
        flag: usize,
        value: u8,
        strokes: &'static [Stroke],
    },
}

/// Segment selector letters `A` through `W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// Pad to first bubble pair (`IJ`).
    A,
    /// Short hop after `A` (`V`).
    B,
    /// Wide Earth orbit.
    C,
    /// Launch from the left of Earth.
    D,
    /// Orbit insertion.
    E,
    /// Mid-height orbit.
    F,
    /// Orbit on the left of Earth.
    G,
    /// Low translunar arc.
    H,
    /// Planetary fly-by departure.
    I,
    /// Venus / Mars / Mercury legs.
    J,
    /// Outer planets via P, Q, R.
    K,
    /// Outer planets via P, S, T.
    L,
    /// Suborbital hop (`GH`).
    M,
    /// Patch between launch and orbit.
    N,
    /// Right-hand lunar swing.
    O,
    /// Lunar pass and return.
    P,
    /// Left-hand lunar return.
    Q,
    /// Lunar orbit, stations S–V.
    R,
    /// High translunar arc.
    S,
    /// Lunar landing sequence.
    T,
    /// Lunar gap.
    U,
    /// Lunar patch with three stations.
    V,
    /// Lunar loop with the small bubble.
    W,
}

impl Opcode {
    pub const ALL: [Opcode; 23] = [
        Opcode::A,
        Opcode::B,
        Opcode::C,
        Opcode::D,
        Opcode::E,
        Opcode::F,
        Opcode::G,
        Opcode::H,
        Opcode::I,
        Opcode::J,
        Opcode::K,
        Opcode::L,
        Opcode::M,
        Opcode::N,
        Opcode::O,
        Opcode::P,
        Opcode::Q,
        Opcode::R,
        Opcode::S,
        Opcode::T,
        Opcode::U,
        Opcode::V,
        Opcode::W,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A'..='W' => Some(Self::ALL[(letter as u8 - b'A') as usize]),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Number of single-digit operands that follow the letter.
    pub fn arity(self) -> usize {
        match self {
            Self::I | Self::K | Self::L | Self::N | Self::W => 0,
            Self::A | Self::B | Self::J | Self::U | Self::V => 1,
            Self::D | Self::M | Self::O | Self::Q => 2,
            Self::C | Self::E | Self::S => 3,
            Self::F | Self::G | Self::P | Self::R => 4,
            Self::H => 6,
            Self::T => 7,
        }
    }

    pub fn strokes(self) -> &'static [Stroke] {
        match self {
            Self::A => SEG_A,
            Self::B => SEG_B,
            Self::C => SEG_C,
            Self::D => SEG_D,
            Self::E => SEG_E,
            Self::F => SEG_F,
            Self::G => SEG_G,
            Self::H => SEG_H,
            Self::I => SEG_I,
            Self::J => SEG_J,
            Self::K => SEG_K,
            Self::L => SEG_L,
            Self::M => SEG_M,
            Self::N => SEG_N,
            Self::O => SEG_O,
            Self::P => SEG_P,
            Self::Q => SEG_Q,
            Self::R => SEG_R,
            Self::S => SEG_S,
            Self::T => SEG_T,
            Self::U => SEG_U,
            Self::V => SEG_V,
            Self::W => SEG_W,
        }
    }

    /// How many bubbles this segment places for `operands`.
    pub fn bubble_count(self, operands: &[u8]) -> usize {
        count_bubbles(self.strokes(), operands)
    }

    /// Draw the segment. `operands` must have exactly `arity()` entries.
    pub fn draw<S: Surface>(
        self,
        operands: &[u8],
        painter: &mut Painter<'_, S>,
    ) -> Result<(), PathError> {
        if operands.len() != self.arity() {
            return Err(PathError::ArityMismatch {
                opcode: self,
                expected: self.arity(),
                found: operands.len(),
            });
        }
        run(self.strokes(), operands, painter)
    }
}

fn flag_set(operands: &[u8], flag: usize, value: u8) -> bool {
    operands.get(flag).copied() == Some(value)
}

fn run<S: Surface>(
    strokes: &[Stroke],
    operands: &[u8],
    painter: &mut Painter<'_, S>,
) -> Result<(), PathError> {
    for stroke in strokes {
        match *stroke {
            Stroke::Trail(raw) => {
                let points: Vec<Point> = raw.iter().copied().map(Point::from).collect();
                painter.trail(&points)?;
            }
            Stroke::Bubble(at) => {
                painter.bubble(at.into());
            }
            Stroke::BubbleIf { flag, at } => {
                if flag_set(operands, flag, 1) {
                    painter.bubble(at.into());
                }
            }
            Stroke::When {
                flag,
                value,
                strokes,
            } => {
                if flag_set(operands, flag, value) {
                    run(strokes, operands, painter)?;
                }
            }
        }
    }
    Ok(())
}

fn count_bubbles(strokes: &[Stroke], operands: &[u8]) -> usize {
    strokes
        .iter()
        .map(|stroke| match *stroke {
            Stroke::Trail(_) => 0,
            Stroke::Bubble(_) => 1,
            Stroke::BubbleIf { flag, .. } => usize::from(flag_set(operands, flag, 1)),
            Stroke::When {
                flag,
                value,
                strokes,
            } => {
                if flag_set(operands, flag, value) {
                    count_bubbles(strokes, operands)
                } else {
                    0
                }
            }
        })
        .sum()
}

// ============================================================================
// SEGMENT TABLES
// ============================================================================

const SEG_A: &[Stroke] = &[
    Bubble((73, 134)),
    Trail(&[(73, 140), (81, 145), (89, 145)]),
    BubbleIf { flag: 0, at: (77, 142) },
];

const SEG_B: &[Stroke] = &[
    Trail(&[(89, 145), (100, 143), (110, 143)]),
    BubbleIf { flag: 0, at: (102, 141) },
];

const SEG_C: &[Stroke] = &[
    Trail(&[(110, 143), (120, 140), (125, 137)]),
    BubbleIf { flag: 0, at: (116, 137) },
    Trail(&[(125, 137), (132, 134), (141, 125), (141, 117), (134, 115)]),
    BubbleIf { flag: 1, at: (139, 115) },
    Trail(&[(134, 115), (123, 113), (110, 112)]),
    BubbleIf { flag: 2, at: (109, 112) },
];

const SEG_D: &[Stroke] = &[
    Trail(&[(35, 137), (20, 149), (36, 157), (54, 157), (61, 155)]),
    BubbleIf { flag: 0, at: (51, 152) },
    Trail(&[(61, 155), (80, 153), (85, 151)]),
    BubbleIf { flag: 1, at: (77, 150) },
    Trail(&[(85, 151), (107, 144)]),
];

const SEG_E: &[Stroke] = &[
    Trail(&[(110, 143), (116, 141), (125, 134), (118, 126)]),
    BubbleIf { flag: 0, at: (122, 128) },
    Trail(&[(118, 126), (110, 123), (103, 123)]),
    BubbleIf { flag: 1, at: (108, 122) },
    Trail(&[(103, 123), (98, 123)]),
    BubbleIf { flag: 2, at: (95, 118) },
];

const SEG_F: &[Stroke] = &[
    Trail(&[(110, 143), (116, 141), (125, 134)]),
    BubbleIf { flag: 0, at: (116, 137) },
    Trail(&[(125, 134), (128, 125)]),
    BubbleIf { flag: 1, at: (122, 128) },
    Trail(&[(128, 125), (123, 115)]),
    BubbleIf { flag: 2, at: (122, 118) },
    Trail(&[(123, 115), (110, 112)]),
    BubbleIf { flag: 3, at: (109, 112) },
];

const SEG_G: &[Stroke] = &[
    Trail(&[(35, 137), (25, 146)]),
    BubbleIf { flag: 0, at: (27, 137) },
    Trail(&[(25, 146), (26, 150), (32, 153)]),
    BubbleIf { flag: 1, at: (24, 147) },
    Trail(&[(32, 153), (42, 150), (47, 143), (48, 141)]),
    BubbleIf { flag: 2, at: (40, 145) },
    BubbleIf { flag: 3, at: (47, 135) },
];

const SEG_H: &[Stroke] = &[
    Trail(&[(110, 143), (125, 137)]),
    BubbleIf { flag: 0, at: (116, 137) },
    Trail(&[(125, 137), (146, 131), (152, 127)]),
    BubbleIf { flag: 1, at: (144, 129) },
    Trail(&[(152, 127), (171, 114)]),
    BubbleIf { flag: 2, at: (165, 114) },
    Trail(&[(171, 114), (181, 108), (185, 103)]),
    BubbleIf { flag: 3, at: (178, 105) },
    Trail(&[(185, 103), (194, 95), (208, 82), (219, 74), (226, 68), (234, 65)]),
    BubbleIf { flag: 4, at: (224, 65) },
    Trail(&[(234, 65), (240, 63), (251, 58)]),
    BubbleIf { flag: 5, at: (243, 60) },
];

const SEG_I: &[Stroke] = &[
    Trail(&[
        (89, 145),
        (97, 147),
        (108, 145),
        (122, 139),
        (130, 130),
        (130, 120),
        (121, 116),
        (107, 115),
    ]),
    Trail(&[(36, 137), (20, 149), (36, 157), (41, 159), (46, 162), (69, 164)]),
    Bubble((59, 160)),
];

const SEG_J: &[Stroke] = &[
    Trail(&[(69, 164), (88, 169), (125, 170)]),
    Bubble((115, 166)),
    When {
        flag: 0,
        value: 1,
        strokes: &[
            Trail(&[(125, 170), (146, 174), (172, 174), (195, 163)]),
            Bubble((189, 159)),
        ],
    },
    When {
        flag: 0,
        value: 2,
        strokes: &[
            Trail(&[(125, 170), (162, 174)]),
            Bubble((150, 171)),
            Trail(&[(162, 174), (190, 176), (207, 162)]),
            Bubble((204, 160)),
        ],
    },
    When {
        flag: 0,
        value: 3,
        strokes: &[
            Trail(&[(125, 170), (138, 171), (153, 170), (166, 165)]),
            Bubble((160, 161)),
        ],
    },
];

const SEG_K: &[Stroke] = &[
    Trail(&[(65, 164), (91, 168), (162, 186), (198, 190), (203, 190)]),
    Bubble((194, 185)),
    Trail(&[(203, 190), (235, 187), (249, 179)]),
    Bubble((242, 181)),
    Trail(&[(249, 179), (263, 172)]),
    Bubble((261, 170)),
];

const SEG_L: &[Stroke] = &[
    Trail(&[(65, 164), (91, 168), (162, 186), (198, 190), (203, 190)]),
    Bubble((194, 185)),
    Trail(&[(203, 190), (240, 193), (269, 192), (279, 191)]),
    Bubble((270, 186)),
    Trail(&[(279, 191), (303, 190)]),
    Bubble((300, 188)),
];

const SEG_M: &[Stroke] = &[
    Bubble((60, 130)),
    Trail(&[(61, 136), (61, 143), (63, 147), (68, 148)]),
    BubbleIf { flag: 0, at: (60, 143) },
    Trail(&[(68, 148), (71, 151), (81, 153), (84, 151)]),
    BubbleIf { flag: 1, at: (77, 150) },
];

const SEG_N: &[Stroke] = &[Trail(&[(85, 151), (107, 144)])];

const SEG_O: &[Stroke] = &[
    Trail(&[(291, 44), (300, 43), (307, 46), (311, 52), (306, 58)]),
    BubbleIf { flag: 0, at: (306, 50) },
    Trail(&[(306, 58), (302, 61), (285, 68), (272, 73)]),
    BubbleIf { flag: 1, at: (276, 68) },
    Trail(&[(272, 73), (268, 75)]),
];

const SEG_P: &[Stroke] = &[
    Trail(&[(268, 75), (253, 80)]),
    BubbleIf { flag: 0, at: (256, 79) },
    Trail(&[(253, 80), (227, 91), (194, 96), (176, 100), (149, 104)]),
    BubbleIf { flag: 1, at: (155, 100) },
    Trail(&[(149, 104), (152, 104), (125, 110)]),
    BubbleIf { flag: 2, at: (130, 106) },
    Trail(&[(125, 110), (110, 112)]),
    BubbleIf { flag: 3, at: (109, 112) },
];

const SEG_Q: &[Stroke] = &[
    Trail(&[(268, 75), (254, 79), (238, 78), (240, 69)]),
    BubbleIf { flag: 0, at: (235, 72) },
    Trail(&[(240, 69), (251, 58)]),
    BubbleIf { flag: 1, at: (243, 60) },
];

const SEG_R: &[Stroke] = &[
    Trail(&[(291, 44), (300, 43), (307, 46), (311, 52)]),
    Trail(&[(311, 52), (313, 58), (312, 63), (306, 70)]),
    BubbleIf { flag: 0, at: (303, 64) },
    Trail(&[(306, 70), (297, 76)]),
    BubbleIf { flag: 1, at: (300, 72) },
    Trail(&[(297, 76), (293, 78), (282, 74)]),
    BubbleIf { flag: 2, at: (285, 75) },
    Trail(&[(282, 74), (281, 72), (268, 75)]),
    BubbleIf { flag: 3, at: (276, 68) },
];

const SEG_S: &[Stroke] = &[
    Trail(&[(84, 151), (102, 153), (134, 147), (140, 143)]),
    BubbleIf { flag: 0, at: (131, 144) },
    Trail(&[(140, 143), (184, 126), (200, 106), (207, 93)]),
    Trail(&[(207, 93), (215, 81), (219, 76)]),
    BubbleIf { flag: 1, at: (216, 78) },
    Trail(&[(219, 76), (226, 68), (234, 65), (240, 63), (251, 58)]),
    BubbleIf { flag: 2, at: (243, 60) },
];

const SEG_T: &[Stroke] = &[
    Trail(&[(291, 44), (300, 43), (307, 46), (311, 52), (306, 58)]),
    BubbleIf { flag: 0, at: (306, 50) },
    Trail(&[(306, 58), (293, 57), (288, 55)]),
    BubbleIf { flag: 1, at: (291, 54) },
    Trail(&[(288, 55), (280, 53), (278, 47)]),
    BubbleIf { flag: 2, at: (279, 51) },
    Trail(&[(278, 47), (282, 54), (276, 43), (274, 44)]),
    BubbleIf { flag: 3, at: (280, 42) },
    Trail(&[(274, 44), (268, 49), (268, 53)]),
    BubbleIf { flag: 4, at: (268, 46) },
    Trail(&[(268, 53), (267, 61)]),
    BubbleIf { flag: 5, at: (267, 55) },
    Trail(&[(267, 61), (256, 68), (246, 73)]),
    BubbleIf { flag: 6, at: (257, 60) },
    Trail(&[(246, 73), (240, 69), (251, 58)]),
];

const SEG_U: &[Stroke] = &[
    Trail(&[(291, 44), (306, 44), (312, 47), (313, 56), (310, 66)]),
    BubbleIf { flag: 0, at: (303, 64) },
];

const SEG_V: &[Stroke] = &[
    Trail(&[
        (291, 44),
        (306, 44),
        (312, 47),
        (313, 52),
        (301, 55),
        (293, 59),
        (280, 54),
    ]),
    When {
        flag: 0,
        value: 1,
        strokes: &[Bubble((306, 50)), Bubble((291, 54)), Bubble((279, 51))],
    },
];

const SEG_W: &[Stroke] = &[
    Trail(&[(307, 46), (301, 40), (294, 38), (301, 40)]),
    Bubble((290, 37)),
    Trail(&[
        (301, 40),
        (307, 46),
        (308, 55),
        (302, 61),
        (282, 71),
        (272, 73),
        (268, 75),
    ]),
];
