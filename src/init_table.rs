//! Vendor register configuration for the GC9A01.
//!
//! The values come from the panel vendor and are replayed verbatim. Most of
//! the registers are undocumented, so entries are never reordered, merged or
//! skipped.

use crate::instruction::Instruction;

/// One register write: opcode, parameter bytes, pause afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub opcode: u8,
    pub params: &'static [u8],
    pub delay_ms: u32,
}

impl Register {
    pub const fn new(opcode: u8, params: &'static [u8]) -> Self {
        Self {
            opcode,
            params,
            delay_ms: 0,
        }
    }
}

const fn reg(opcode: Instruction, params: &'static [u8]) -> Register {
    Register::new(opcode as u8, params)
}

/// Entries at the head of [`INIT_TABLE`] that unlock the protected registers.
pub const UNLOCK_LEN: usize = 5;

pub const INIT_TABLE: &[Register] = &[
    // Unlock inter registers.
    reg(Instruction::InterRegisterEnable2, &[]),
    Register::new(0xEB, &[0x14]),
    reg(Instruction::InterRegisterEnable1, &[]),
    reg(Instruction::InterRegisterEnable2, &[]),
    Register::new(0xEB, &[0x14]),
    // VCOM
    Register::new(0x84, &[0x40]),
    // Power saving look-up tables
    Register::new(0x85, &[0xFF]),
    Register::new(0x86, &[0xFF]),
    Register::new(0x87, &[0xFF]),
    Register::new(0x88, &[0x0A]),
    Register::new(0x89, &[0x21]),
    Register::new(0x8A, &[0x00]),
    Register::new(0x8B, &[0x80]),
    Register::new(0x8C, &[0x01]),
    Register::new(0x8D, &[0x01]),
    Register::new(0x8E, &[0xFF]),
    Register::new(0x8F, &[0xFF]),
    reg(Instruction::DisplayFunctionControl, &[0x00, 0x20]),
    // Normal orientation, RGB order
    reg(Instruction::MemoryAccessControl, &[0x08]),
    // 16 bits per pixel
    reg(Instruction::PixelFormatSet, &[0x05]),
    Register::new(0x90, &[0x08, 0x08, 0x08, 0x08]),
    Register::new(0xBD, &[0x06]),
    Register::new(0xBC, &[0x00]),
    Register::new(0xFF, &[0x60, 0x01, 0x04]),
    reg(Instruction::PowerControl2, &[0x13]),
    reg(Instruction::PowerControl3, &[0x13]),
    reg(Instruction::PowerControl4, &[0x22]),
    Register::new(0xBE, &[0x11]),
    Register::new(0xE1, &[0x10, 0x0E]),
    Register::new(0xDF, &[0x21, 0x0C, 0x02]),
    // Gamma
    reg(Instruction::SetGamma1, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    reg(Instruction::SetGamma2, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    reg(Instruction::SetGamma3, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    reg(Instruction::SetGamma4, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    Register::new(0xED, &[0x1B, 0x0B]),
    Register::new(0xAE, &[0x77]),
    Register::new(0xCD, &[0x63]),
    Register::new(
        0x70,
        &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03],
    ),
    reg(Instruction::FrameRate, &[0x34]),
    // Panel timing
    Register::new(
        0x62,
        &[
            0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70,
        ],
    ),
    Register::new(
        0x63,
        &[
            0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70,
        ],
    ),
    Register::new(0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    Register::new(
        0x66,
        &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00],
    ),
    Register::new(
        0x67,
        &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98],
    ),
    Register::new(0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    Register::new(0x98, &[0x3E, 0x07]),
    reg(Instruction::TearingEffectOn, &[]),
    reg(Instruction::DisplayInversionOn, &[]),
];

/// The vendor unlock prefix of [`INIT_TABLE`].
pub fn unlock_sequence() -> &'static [Register] {
    &INIT_TABLE[..UNLOCK_LEN]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_opens_with_the_unlock_sequence() {
        let opcodes: [u8; UNLOCK_LEN] = core::array::from_fn(|i| unlock_sequence()[i].opcode);
        assert_eq!(opcodes, [0xEF, 0xEB, 0xFE, 0xEF, 0xEB]);
        assert_eq!(unlock_sequence()[1].params, &[0x14]);
        assert_eq!(unlock_sequence()[4].params, &[0x14]);
    }

    #[test]
    fn unlock_opcodes_do_not_reappear_later() {
        assert!(
            INIT_TABLE[UNLOCK_LEN..]
                .iter()
                .all(|r| !matches!(r.opcode, 0xEF | 0xEB | 0xFE))
        );
    }

    #[test]
    fn power_sequencing_is_not_part_of_the_table() {
        let sleep_out = Instruction::SleepOut as u8;
        let display_on = Instruction::DisplayOn as u8;
        assert!(
            INIT_TABLE
                .iter()
                .all(|r| r.opcode != sleep_out && r.opcode != display_on)
        );
    }

    #[test]
    fn table_configures_rgb565_pixels() {
        let pixel_format = INIT_TABLE
            .iter()
            .find(|r| r.opcode == Instruction::PixelFormatSet as u8)
            .expect("pixel format register");
        assert_eq!(pixel_format.params, &[0x05]);
    }

    #[test]
    fn table_ends_with_tearing_effect_and_inversion() {
        let tail: &[u8] = &[
            INIT_TABLE[INIT_TABLE.len() - 2].opcode,
            INIT_TABLE[INIT_TABLE.len() - 1].opcode,
        ];
        assert_eq!(tail, &[0x35, 0x21]);
        assert_eq!(INIT_TABLE.len(), 48);
    }
}
