#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Sleep Out (11h) - Exit low-power mode
    SleepOut = 0x11,
    /// Display Inversion On (21h) - Enable color inversion
    DisplayInversionOn = 0x21,
    /// Display On (29h) - Enable panel output
    DisplayOn = 0x29,
    /// Column Address Set (2Ah) - Horizontal addressing bounds
    ColumnAddressSet = 0x2A,
    /// Row Address Set (2Bh) - Vertical addressing bounds
    RowAddressSet = 0x2B,
    /// Memory Write (2Ch) - Write to memory
    MemoryWrite = 0x2C,
    /// Tearing Effect Line On (35h) - Enable VSync output
    TearingEffectOn = 0x35,
    /// Memory Access Control (36h) - GRAM orientation/order
    MemoryAccessControl = 0x36,
    /// Pixel Format Set (3Ah) - Color depth configuration
    PixelFormatSet = 0x3A,
    /// Display Function Control (B6h) - Scan direction/number
    DisplayFunctionControl = 0xB6,
    /// Power Control 2 (C3h)
    PowerControl2 = 0xC3,
    /// Power Control 3 (C4h)
    PowerControl3 = 0xC4,
    /// Power Control 4 (C9h)
    PowerControl4 = 0xC9,
    /// Frame Rate (E8h) - Refresh rate configuration
    FrameRate = 0xE8,
    /// Inter Register Enable 2 (EFh) - Advanced command mode
    InterRegisterEnable2 = 0xEF,
    /// Set Gamma 1 (F0h)
    SetGamma1 = 0xF0,
    /// Set Gamma 2 (F1h)
    SetGamma2 = 0xF1,
    /// Set Gamma 3 (F2h)
    SetGamma3 = 0xF2,
    /// Set Gamma 4 (F3h)
    SetGamma4 = 0xF3,
    /// Inter Register Enable 1 (FEh) - Basic command mode
    InterRegisterEnable1 = 0xFE,
}

impl From<Instruction> for u8 {
    fn from(instruction: Instruction) -> Self {
        instruction as u8
    }
}
