//! Tapered piece-square bonuses, decoded once from a compact packed form.
//!
//! The packed table holds 12 sets of 8 words: sets 0-5 are middlegame
//! pawn..king, sets 6-11 endgame pawn..king. Word `set * 8 + row` carries one
//! signed byte per file (file a in the low byte). Row 0 is the eighth rank as
//! seen from White. Each byte is scaled by [`SCALE`] and rounded.

use std::sync::OnceLock;

use gambit_core::{Color, PieceKind, Square};

use crate::eval::score::{S, Score};

/// Factor the packed bytes were divided by to fit into `i8`.
const SCALE: f64 = 1.461;

#[rustfmt::skip]
const PACKED: [u64; 96] = [
    0x0000000000000000, 0xF817562F412A5C43, 0xF211262C151205FC, 0xF00C08100E0409F6,
    0xEF07040C08FDFFEE, 0xF8170202F9FDFDEE, 0xF11A10F6F0F2FFE8, 0x0000000000000000,
    0xB7F6BE2ADEE9C38E, 0xF4052A101931E4CE, 0x1E3258392C1929E0, 0x0F0C2F19240D0CFA,
    0xFB0E0D13090B03F7, 0xF5110C0D0708FAF0, 0xF3F60CFFFEF8DCEC, 0xF0F3EDF4E9D8F2B8,
    0xFB05E3EFE7C803EC, 0xE00C2815F7F40BEE, 0xFF1922181B1D19F5, 0xFF051919220D03FD,
    0x03070817120909FC, 0x070C120A0A0A0A00, 0x01170E05000B0A03, 0xF2E5F8F7F2F6FEE9,
    0x1D15062B23161D16, 0x1E122E372A281612, 0x0B2A1F0C19120DFD, 0xF2FB18101205F8F0,
    0xF004FB06FFF8EEE7, 0xE9FD0002F4F5EFE1, 0xCFFC08FFFAF2F5E2, 0xEEE7050B0C01F7F3,
    0x1F1D1E28081400ED, 0x251327F501FDE5F0, 0x272026140505F4F7, 0x01FF0CFFF5F5EEEE,
    0xFE02FDFFF9FAEEFA, 0x030A01FDFFF801F6, 0x01FE0A050108FBE8, 0xDEEBEFF607FAF4FF,
    0x0901E9DAF60B10D4, 0xECE6FDFBFBF2FF14, 0xF10F04F2F50110FA, 0xE7F6EFEBEEF8F2F4,
    0xDDE9E2E1E5EEFFDE, 0xEEF6EBE2E1F1F6F6, 0x0506F5E3D4FB0501, 0x0A10ED05DB0819F6,
    0x0000000000000000, 0x80715A655C6C767A, 0x393824262E3A4440, 0x0C0C03FF03091016,
    0xFF02FBFBFBFE0609, 0xFBFFFD0001FC0503, 0xFB01000907050509, 0x0000000000000000,
    0xBCD5EEEBEDF7E6D8, 0xDCF0EFFAFFEFFBEF, 0xE4F3FAFF0607F2F0, 0xF405080F0F0F02F4,
    0xF4030C0B110BFCF4, 0xF1F2FE070AFFFEF0, 0xE2F0F2FFFDF9F2E3, 0xD4DEF4F1F6F0DDEC,
    0xF0F4FAFBFBF8F2F6, 0xF6FDF7FEF805FDFB, 0x030004FFFF00FB01, 0x0102070A060806FE,
    0xFAFE07050D0902FC, 0xF6FB02090705FEF8, 0xEEF6FA03FFFBF4F6, 0xF4FDF5FAFDF0FAF0,
    0x030508080A0C0709, 0x020502FE08090908, 0xFEFDFE0303050505, 0x01FF010101090203,
    0xF8FBFCFD03050302, 0xF5FBF8FBFFFD00FD, 0xFEF8FAFA0100FCFC, 0xF203F7FDFF0201FA,
    0x0E070D12120F0FFA, 0x001511281C160EF4, 0x060D1820220604F2, 0x19271B271F100F02,
    0x101B1715200D13F4, 0x03070C06040AEEF5, 0xEAE7F0F5F5EBF0F1, 0xE4F2EAFDE3F1EDE9,
    0xF4030AF8F4F4E8CD, 0x08101A0C0C0A0CF8, 0x091E1F0E0A100C07, 0x0212171212100FFB,
    0xF8061012100EFDF4, 0xFA050B100E08FEF3, 0xF4FD030A0903F8EE, 0xE3F0F6EDF8F2E9DC,
];

/// Game phase a bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Middlegame,
    Endgame,
}

/// Decoded bonuses indexed by `[set][row][file]`.
pub struct EvaluationTables {
    bonus: [[[i32; 8]; 8]; 12],
}

impl EvaluationTables {
    fn decode(packed: &[u64; 96]) -> EvaluationTables {
        let mut bonus = [[[0i32; 8]; 8]; 12];
        for (set, rows) in bonus.iter_mut().enumerate() {
            for (row, files) in rows.iter_mut().enumerate() {
                let word = packed[set * 8 + row];
                for (file, value) in files.iter_mut().enumerate() {
                    let byte = (word >> (file * 8)) as u8 as i8;
                    *value = (f64::from(byte) * SCALE).round_ties_even() as i32;
                }
            }
        }
        EvaluationTables { bonus }
    }

    /// Bonus for a `color` piece of `kind` standing on `sq`.
    ///
    /// White reads the rows mirrored, so both colors share one table.
    #[inline]
    pub fn bonus(&self, stage: Stage, kind: PieceKind, color: Color, sq: Square) -> i32 {
        let set = match stage {
            Stage::Middlegame => kind.index(),
            Stage::Endgame => kind.index() + PieceKind::COUNT,
        };
        let row = match color {
            Color::White => 7 - sq.rank(),
            Color::Black => sq.rank(),
        };
        self.bonus[set][row as usize][sq.file() as usize]
    }

    /// Middlegame and endgame bonus together.
    #[inline]
    pub fn square_score(&self, kind: PieceKind, color: Color, sq: Square) -> Score {
        S(
            self.bonus(Stage::Middlegame, kind, color, sq),
            self.bonus(Stage::Endgame, kind, color, sq),
        )
    }
}

static TABLES: OnceLock<EvaluationTables> = OnceLock::new();

/// The process-wide decoded tables.
pub fn tables() -> &'static EvaluationTables {
    TABLES.get_or_init(|| EvaluationTables::decode(&PACKED))
}

#[cfg(test)]
mod tests {
    use gambit_core::{Color, PieceKind, Square};

    use super::{Stage, tables};

    #[test]
    fn known_middlegame_values() {
        let t = tables();
        assert_eq!(t.bonus(Stage::Middlegame, PieceKind::Pawn, Color::White, Square::E2), -15);
        assert_eq!(t.bonus(Stage::Middlegame, PieceKind::Pawn, Color::White, Square::E4), 18);
        assert_eq!(t.bonus(Stage::Middlegame, PieceKind::Pawn, Color::White, Square::A2), -35);
        assert_eq!(t.bonus(Stage::Middlegame, PieceKind::Knight, Color::White, Square::B1), -20);
        assert_eq!(t.bonus(Stage::Middlegame, PieceKind::King, Color::White, Square::E1), 7);
    }

    #[test]
    fn known_endgame_values() {
        let t = tables();
        assert_eq!(t.bonus(Stage::Endgame, PieceKind::Pawn, Color::White, Square::E2), 13);
        assert_eq!(t.bonus(Stage::Endgame, PieceKind::Pawn, Color::White, Square::E4), -7);
        assert_eq!(t.bonus(Stage::Endgame, PieceKind::King, Color::White, Square::E1), -28);
    }

    #[test]
    fn bytes_are_sign_extended() {
        // 0x80 in the packed word is -128, not 128.
        assert_eq!(tables().bonus(Stage::Endgame, PieceKind::Pawn, Color::Black, Square::H2), -187);
    }

    #[test]
    fn colors_mirror_each_other() {
        let t = tables();
        for stage in [Stage::Middlegame, Stage::Endgame] {
            for kind in PieceKind::ALL {
                for sq in Square::all() {
                    assert_eq!(
                        t.bonus(stage, kind, Color::White, sq),
                        t.bonus(stage, kind, Color::Black, sq.flip_rank()),
                    );
                }
            }
        }
    }

    #[test]
    fn pawn_back_ranks_are_zero() {
        let t = tables();
        for file in 0..8 {
            for rank in [0, 7] {
                let sq = Square::new(file, rank);
                assert_eq!(t.bonus(Stage::Middlegame, PieceKind::Pawn, Color::White, sq), 0);
                assert_eq!(t.bonus(Stage::Endgame, PieceKind::Pawn, Color::Black, sq), 0);
            }
        }
    }
}
