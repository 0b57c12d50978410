//! Stock cart header for software revision 5.06.

/// Header image the stock 5.06 updater writes back to the start of flash.
///
/// Carts running revision 7.00/7.07 firmware get this blob re-installed at
/// offset 0 before the boot payload, restoring the 5.06 boot path.
pub const STOCK_HEADER_506: [u8; 0x984] = [
    0x8B, 0x40, 0x03, 0x11, 0x4F, 0x00, 0x10, 0xAF, 0x00, 0x01, 0x50, 0x03,
    0x2F, 0xCF, 0x02, 0x00, 0xA0, 0x02, 0x1D, 0x0F, 0x00, 0x01, 0xCF, 0x01,
    0x07, 0x54, 0x03, 0x00, 0xA0, 0x02, 0x5F, 0x00, 0x00, 0x01, 0xC0, 0x01,
    0x0B, 0x54, 0x03, 0x00, 0xA0, 0x02, 0x06, 0xCE, 0x02, 0x06, 0xCD, 0x02,
    0x06, 0xCC, 0x02, 0x06, 0xCB, 0x02, 0x06, 0xCA, 0x02, 0x07, 0xC2, 0x02,
    0x00, 0xA0, 0x02, 0x11, 0x4F, 0x00, 0x01, 0xAF, 0x00, 0x15, 0x50, 0x03,
    0x00, 0xA0, 0x02, 0x11, 0x4F, 0x00, 0x01, 0xAF, 0x00, 0x19, 0x54, 0x03,
    0x00, 0xA0, 0x02, 0x15, 0x00, 0x03, 0x17, 0x4F, 0x00, 0x40, 0xAF, 0x00,
    0x1E, 0x50, 0x03, 0x37, 0x43, 0x00, 0x36, 0x42, 0x00, 0x35, 0x41, 0x00,
    0x34, 0x40, 0x00, 0x33, 0x47, 0x00, 0x32, 0x46, 0x00, 0x31, 0x45, 0x00,
    0x30, 0x44, 0x00, 0x00, 0xA0, 0x02, 0x15, 0x00, 0x03, 0x11, 0x4F, 0x00,
    0x80, 0xAF, 0x00, 0x2B, 0x50, 0x03, 0x37, 0x43, 0x00, 0x36, 0x42, 0x00,
    0x35, 0x41, 0x00, 0x34, 0x40, 0x00, 0x33, 0x47, 0x00, 0x32, 0x46, 0x00,
    0x31, 0x45, 0x00, 0x30, 0x44, 0x00, 0x00, 0xA0, 0x02, 0x3B, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x10, 0x1F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x1F, 0x00,
    0x04, 0xCF, 0x02, 0x70, 0x1F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x05, 0xCF, 0x02, 0x00, 0xA0, 0x02, 0x1D, 0x00, 0x03,
    0xB7, 0x43, 0x01, 0x43, 0x54, 0x03, 0x00, 0xA0, 0x02, 0x1D, 0x00, 0x03,
    0xD5, 0x43, 0x01, 0x47, 0x54, 0x03, 0x00, 0xA0, 0x02, 0x00, 0x00, 0x00,
    0x15, 0x00, 0x03, 0x19, 0x00, 0x03, 0x15, 0x00, 0x03, 0x01, 0x80, 0x01,
    0x40, 0x40, 0x01, 0x4D, 0x54, 0x03, 0x00, 0xA0, 0x02, 0x17, 0x4F, 0x00,
    0x01, 0xAF, 0x00, 0x53, 0x50, 0x03, 0x00, 0xA0, 0x02, 0x06, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x24, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x00, 0xA0, 0x02,
    0x57, 0x00, 0x03, 0xD8, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x20, 0x1F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x21, 0xCF, 0x02,
    0x0A, 0x00, 0x03, 0x01, 0x00, 0x03, 0x00, 0xA0, 0x02, 0x05, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x01, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x10, 0x4F, 0x00,
    0x02, 0xAF, 0x00, 0x73, 0x54, 0x03, 0x2E, 0xCF, 0x02, 0x00, 0xA0, 0x02,
    0x28, 0xCF, 0x02, 0x18, 0x4F, 0x00, 0x00, 0xA0, 0x02, 0x17, 0x4F, 0x00,
    0x40, 0xAF, 0x00, 0x87, 0x50, 0x03, 0x00, 0xA0, 0x02, 0x1D, 0x00, 0x03,
    0x00, 0x43, 0x01, 0x8B, 0x54, 0x03, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x01, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x11, 0x0E, 0x00,
    0xE0, 0x9F, 0x01, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x05, 0xCF, 0x02, 0x2B, 0xCF, 0x02,
    0x15, 0x00, 0x03, 0x2F, 0xCF, 0x02, 0x19, 0x00, 0x03, 0x87, 0x00, 0x03,
    0x37, 0x4F, 0x00, 0x3C, 0x4F, 0x01, 0x9C, 0x54, 0x03, 0x2A, 0xCF, 0x02,
    0x44, 0x0E, 0x00, 0x2A, 0x00, 0x03, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x01, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x04, 0xCE, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x26, 0xCF, 0x02,
    0x01, 0x00, 0x03, 0x14, 0x4F, 0x00, 0xF0, 0xF0, 0x00, 0x13, 0x4F, 0x00,
    0xF0, 0xF1, 0x00, 0x16, 0x4F, 0x00, 0xF0, 0xF2, 0x00, 0x15, 0x4F, 0x00,
    0xF0, 0xF3, 0x00, 0x10, 0x1F, 0x00, 0x30, 0x11, 0x00, 0xF0, 0x13, 0x00,
    0x00, 0x1F, 0x00, 0x20, 0x10, 0x00, 0xF0, 0x12, 0x00, 0x00, 0x09, 0x00,
    0x10, 0x18, 0x00, 0x06, 0x08, 0x02, 0x00, 0x09, 0x02, 0x06, 0x08, 0x02,
    0x00, 0x09, 0x02, 0x48, 0x88, 0x01, 0x00, 0xA9, 0x01, 0x3B, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x01, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x90, 0x9F, 0x01, 0x04, 0xCF, 0x02, 0x04, 0xC8, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x26, 0xCF, 0x02, 0x00, 0x09, 0x00, 0x00, 0x18, 0x00,
    0x06, 0x08, 0x02, 0x00, 0x09, 0x02, 0x01, 0x00, 0x03, 0x14, 0x4A, 0x00,
    0x13, 0x4B, 0x00, 0x16, 0x4C, 0x00, 0x15, 0x4D, 0x00, 0x06, 0x08, 0x02,
    0x00, 0x09, 0x02, 0x48, 0x88, 0x01, 0x04, 0xA9, 0x01, 0x10, 0x1F, 0x00,
    0x30, 0x11, 0x00, 0xF0, 0x13, 0x00, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x01, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x90, 0x9F, 0x01,
    0x04, 0xCF, 0x02, 0x04, 0xC8, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x26, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x14, 0x4F, 0x00, 0xF0, 0x9A, 0x01,
    0x13, 0x4F, 0x00, 0xF0, 0xBB, 0x01, 0x16, 0x4F, 0x00, 0xF0, 0xBC, 0x01,
    0x15, 0x4F, 0x00, 0xF0, 0xBD, 0x01, 0x00, 0x1F, 0x00, 0x20, 0x10, 0x00,
    0xF0, 0x12, 0x00, 0x00, 0x09, 0x00, 0x10, 0x18, 0x00, 0x06, 0x08, 0x02,
    0x00, 0x09, 0x02, 0x06, 0x08, 0x02, 0x00, 0x09, 0x02, 0x48, 0x88, 0x01,
    0x08, 0xA9, 0x01, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x01, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x90, 0x9F, 0x01, 0x04, 0xCF, 0x02,
    0x04, 0xC8, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x26, 0xCF, 0x02,
    0x01, 0x00, 0x03, 0x00, 0x09, 0x00, 0x00, 0x18, 0x00, 0x14, 0x4F, 0x00,
    0xF0, 0xFA, 0x00, 0x13, 0x4F, 0x00, 0xF0, 0xFB, 0x00, 0x16, 0x4F, 0x00,
    0xF0, 0xFC, 0x00, 0x15, 0x4F, 0x00, 0xF0, 0xFD, 0x00, 0x06, 0x08, 0x02,
    0x00, 0x09, 0x02, 0x06, 0x08, 0x02, 0x00, 0x09, 0x02, 0x48, 0x88, 0x01,
    0x0C, 0xA9, 0x01, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x01, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x90, 0x9F, 0x01, 0x04, 0xCF, 0x02,
    0x04, 0xC8, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x26, 0xCF, 0x02,
    0x01, 0x00, 0x03, 0x00, 0x0F, 0x00, 0x14, 0x4F, 0x00, 0xF0, 0x9A, 0x01,
    0x13, 0x4F, 0x00, 0xF0, 0xBB, 0x01, 0x16, 0x4F, 0x00, 0xF0, 0xBC, 0x01,
    0x15, 0x4F, 0x00, 0xF0, 0xBD, 0x01, 0xA0, 0xF4, 0x00, 0xB0, 0xF5, 0x00,
    0xC0, 0xF6, 0x00, 0xD0, 0xF7, 0x00, 0x40, 0x1F, 0x00, 0x00, 0x14, 0x00,
    0xF0, 0x10, 0x00, 0x50, 0x1F, 0x00, 0x10, 0x15, 0x00, 0xF0, 0x11, 0x00,
    0x60, 0x1F, 0x00, 0x20, 0x16, 0x00, 0xF0, 0x12, 0x00, 0x70, 0x1F, 0x00,
    0x30, 0x17, 0x00, 0xF0, 0x13, 0x00, 0x04, 0xCE, 0x01, 0x00, 0x0F, 0x00,
    0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x01, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x04, 0xCE, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x26, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x00, 0x0F, 0x00,
    0x14, 0x4F, 0x00, 0xF0, 0xF0, 0x00, 0x13, 0x4F, 0x00, 0xF0, 0xF1, 0x00,
    0x16, 0x4F, 0x00, 0xF0, 0xF2, 0x00, 0x15, 0x4F, 0x00, 0xF0, 0xF3, 0x00,
    0x04, 0x4E, 0x01, 0xB9, 0x54, 0x03, 0x04, 0xCE, 0x01, 0x00, 0x0F, 0x00,
    0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x01, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x04, 0xCE, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x26, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x00, 0x0F, 0x00,
    0x14, 0x4F, 0x00, 0xF0, 0xF4, 0x00, 0x13, 0x4F, 0x00, 0xF0, 0xF5, 0x00,
    0x16, 0x4F, 0x00, 0xF0, 0xF6, 0x00, 0x15, 0x4F, 0x00, 0xF0, 0xF7, 0x00,
    0x40, 0x1F, 0x00, 0x00, 0x14, 0x00, 0xF0, 0x10, 0x00, 0x50, 0x1F, 0x00,
    0x10, 0x15, 0x00, 0xF0, 0x11, 0x00, 0x60, 0x1F, 0x00, 0x20, 0x16, 0x00,
    0xF0, 0x12, 0x00, 0x70, 0x1F, 0x00, 0x30, 0x17, 0x00, 0xF0, 0x13, 0x00,
    0x00, 0x0F, 0x00, 0x30, 0x1E, 0x00, 0xF0, 0xAE, 0x00, 0x10, 0x4E, 0x01,
    0x83, 0x55, 0x03, 0x01, 0x0F, 0x00, 0x8A, 0x41, 0x03, 0x20, 0x4E, 0x01,
    0x87, 0x55, 0x03, 0x02, 0x0F, 0x00, 0x8A, 0x41, 0x03, 0xA0, 0x4E, 0x01,
    0x8A, 0x55, 0x03, 0x10, 0x0F, 0x00, 0x03, 0xCF, 0x02, 0x02, 0xC3, 0x02,
    0x02, 0xC2, 0x02, 0x02, 0xC1, 0x02, 0x02, 0xC0, 0x02, 0x02, 0xC7, 0x02,
    0x02, 0xC6, 0x02, 0x02, 0xC5, 0x02, 0x02, 0xC4, 0x02, 0x01, 0x0F, 0x00,
    0x00, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x00, 0xCF, 0x02, 0x11, 0x4F, 0x00,
    0xF0, 0x1A, 0x00, 0x01, 0xAF, 0x00, 0xBD, 0x55, 0x03, 0x40, 0xAA, 0x00,
    0x97, 0x51, 0x03, 0x10, 0x1F, 0x00, 0xF0, 0xAF, 0x00, 0x40, 0x4F, 0x01,
    0xA8, 0x51, 0x03, 0x50, 0x4F, 0x01, 0xAB, 0x51, 0x03, 0x60, 0x4F, 0x01,
    0xAE, 0x51, 0x03, 0x01, 0x01, 0x00, 0x47, 0x00, 0x00, 0xB9, 0x41, 0x03,
    0x01, 0x01, 0x00, 0x14, 0x00, 0x00, 0xB9, 0x41, 0x03, 0x01, 0x01, 0x00,
    0x25, 0x00, 0x00, 0xB9, 0x41, 0x03, 0x01, 0x01, 0x00, 0x36, 0x00, 0x00,
    0xB9, 0x41, 0x03, 0x10, 0x1F, 0x00, 0xF0, 0xAF, 0x00, 0x40, 0x4F, 0x01,
    0xB7, 0x51, 0x03, 0x0C, 0xCF, 0x02, 0xBB, 0x41, 0x03, 0x01, 0x01, 0x00,
    0x6C, 0x00, 0x00, 0x00, 0x07, 0x00, 0x37, 0x00, 0x03, 0x15, 0x00, 0x03,
    0x2F, 0xCF, 0x02, 0xA0, 0x4E, 0x01, 0xA4, 0x54, 0x03, 0x44, 0x0F, 0x00,
    0x2C, 0xCF, 0x02, 0x55, 0x0F, 0x00, 0x05, 0xEF, 0x02, 0x06, 0xEF, 0x02,
    0x15, 0x00, 0x03, 0x2F, 0xCF, 0x02, 0x17, 0x4F, 0x00, 0x80, 0xAF, 0x00,
    0xC6, 0x51, 0x03, 0x37, 0x43, 0x00, 0xC7, 0x43, 0x01, 0xD5, 0x51, 0x03,
    0xD1, 0x43, 0x01, 0xDE, 0x51, 0x03, 0xD0, 0x43, 0x01, 0xE7, 0x51, 0x03,
    0xC2, 0x43, 0x01, 0xE7, 0x51, 0x03, 0xC5, 0x43, 0x01, 0xF1, 0x51, 0x03,
    0xFA, 0x41, 0x03, 0xB5, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x5B, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0xDB, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0xB7, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0x80, 0x0F, 0x00, 0x22, 0xCF, 0x02,
    0x80, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x80, 0x0F, 0x00, 0x22, 0xCF, 0x02,
    0x80, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0xC2, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0x0F, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x36, 0x42, 0x00,
    0xF0, 0x42, 0x03, 0x05, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x06, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0x11, 0x4F, 0x00, 0x80, 0xAF, 0x00,
    0xFA, 0x51, 0x03, 0x37, 0x43, 0x00, 0x36, 0x42, 0x00, 0x35, 0x41, 0x00,
    0x34, 0x40, 0x00, 0x33, 0x47, 0x00, 0x32, 0x46, 0x00, 0x31, 0x45, 0x00,
    0x30, 0x44, 0x00, 0xB7, 0x43, 0x01, 0x55, 0x56, 0x03, 0x01, 0x42, 0x01,
    0x0F, 0x56, 0x03, 0xE5, 0x41, 0x01, 0x25, 0x52, 0x03, 0x61, 0xC1, 0x01,
    0xAA, 0x0F, 0x00, 0x05, 0xEF, 0x02, 0x3D, 0x42, 0x03, 0x12, 0x46, 0x01,
    0x28, 0x52, 0x03, 0x10, 0x46, 0x01, 0x28, 0x52, 0x03, 0x0A, 0x44, 0x01,
    0x49, 0x52, 0x03, 0x17, 0x41, 0x01, 0x1A, 0x5E, 0x03, 0x80, 0x80, 0x01,
    0x02, 0xA1, 0x01, 0x3D, 0x42, 0x03, 0x23, 0x56, 0x03, 0x05, 0x6F, 0x00,
    0xAA, 0x4F, 0x01, 0x23, 0x56, 0x03, 0x90, 0x40, 0x01, 0x23, 0x5A, 0x03,
    0xD0, 0xC0, 0x01, 0x01, 0xE1, 0x01, 0x3D, 0x42, 0x03, 0x01, 0xC1, 0x01,
    0x3D, 0x42, 0x03, 0x02, 0x01, 0x00, 0xF0, 0x00, 0x00, 0x3D, 0x42, 0x03,
    0x00, 0x41, 0x01, 0x2F, 0x56, 0x03, 0x20, 0x40, 0x01, 0x2F, 0x56, 0x03,
    0x01, 0x01, 0x00, 0x69, 0x00, 0x00, 0x3D, 0x42, 0x03, 0x04, 0x41, 0x01,
    0x3D, 0x52, 0x03, 0x05, 0x41, 0x01, 0x3D, 0x52, 0x03, 0x06, 0x41, 0x01,
    0x3D, 0x52, 0x03, 0x07, 0x41, 0x01, 0x3D, 0x52, 0x03, 0x02, 0x41, 0x01,
    0x3C, 0x52, 0x03, 0x20, 0x80, 0x01, 0x01, 0xA1, 0x01, 0x3D, 0x42, 0x03,
    0xA0, 0x80, 0x01, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x10, 0x1F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x1F, 0x00, 0x04, 0xCF, 0x02, 0x70, 0x1F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x05, 0xCF, 0x02,
    0xC4, 0x41, 0x03, 0xE0, 0x0F, 0x00, 0x22, 0xCF, 0x02, 0x22, 0xCF, 0x02,
    0x22, 0xCF, 0x02, 0x22, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0x0B, 0x0F, 0x00,
    0x22, 0xCF, 0x02, 0x22, 0xCF, 0x02, 0x22, 0xCF, 0x02, 0x22, 0xCF, 0x02,
    0xC4, 0x41, 0x03, 0xD5, 0x43, 0x01, 0xE6, 0x56, 0x03, 0x17, 0x4F, 0x00,
    0x02, 0xAF, 0x00, 0x5C, 0x52, 0x03, 0x19, 0x40, 0x01, 0xD8, 0x52, 0x03,
    0x20, 0x1F, 0x00, 0xF0, 0xAF, 0x00, 0x20, 0x4F, 0x01, 0x62, 0x56, 0x03,
    0x03, 0x08, 0x00, 0x65, 0x42, 0x03, 0x10, 0x4F, 0x01, 0xA6, 0x56, 0x03,
    0x04, 0x08, 0x00, 0x70, 0x1D, 0x00, 0x60, 0x1C, 0x00, 0x50, 0x1B, 0x00,
    0x0E, 0x0D, 0x02, 0x08, 0x0C, 0x02, 0x08, 0x0B, 0x02, 0x50, 0x1A, 0x00,
    0x07, 0xAA, 0x00, 0x02, 0x49, 0x01, 0x89, 0x52, 0x03, 0x0E, 0x0D, 0x02,
    0x08, 0x0C, 0x02, 0x08, 0x0B, 0x02, 0x50, 0x1A, 0x00, 0x0F, 0xAA, 0x00,
    0x03, 0x49, 0x01, 0x89, 0x52, 0x03, 0x0E, 0x0D, 0x02, 0x08, 0x0C, 0x02,
    0x08, 0x0B, 0x02, 0x50, 0x1A, 0x00, 0x1F, 0xAA, 0x00, 0x04, 0x49, 0x01,
    0x89, 0x52, 0x03, 0x0E, 0x0D, 0x02, 0x08, 0x0C, 0x02, 0x08, 0x0B, 0x02,
    0x50, 0x1A, 0x00, 0x3F, 0xAA, 0x00, 0x05, 0x49, 0x01, 0x89, 0x52, 0x03,
    0x0E, 0x0D, 0x02, 0x08, 0x0C, 0x02, 0x08, 0x0B, 0x02, 0x50, 0x1A, 0x00,
    0x7F, 0xAA, 0x00, 0xA0, 0x15, 0x00, 0xFC, 0xAB, 0x00, 0x3B, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x80, 0x1F, 0x00, 0xD0, 0x9F, 0x01, 0x04, 0xCF, 0x02,
    0x04, 0xCC, 0x02, 0x04, 0xCB, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x26, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x14, 0x4A, 0x00, 0x13, 0x4B, 0x00,
    0x16, 0x4C, 0x00, 0x15, 0x4D, 0x00, 0x17, 0x4F, 0x00, 0x08, 0xAF, 0x00,
    0xA0, 0x56, 0x03, 0xA0, 0x14, 0x00, 0xB0, 0x95, 0x01, 0xA4, 0x42, 0x03,
    0x0E, 0x05, 0x02, 0x50, 0x9A, 0x01, 0xA0, 0x14, 0x00, 0xB0, 0x15, 0x00,
    0xC0, 0x16, 0x00, 0xD0, 0x17, 0x00, 0x00, 0x1E, 0x00, 0x70, 0x1D, 0x00,
    0x60, 0x1C, 0x00, 0x50, 0x1B, 0x00, 0x40, 0x1A, 0x00, 0x0E, 0x00, 0x03,
    0x11, 0x4E, 0x01, 0xB2, 0x56, 0x03, 0x43, 0x00, 0x03, 0x15, 0x00, 0x03,
    0x0B, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0x12, 0x4E, 0x01, 0xCD, 0x56, 0x03,
    0x1D, 0x00, 0x03, 0xB7, 0x43, 0x01, 0xBB, 0x52, 0x03, 0xD5, 0x43, 0x01,
    0xB4, 0x56, 0x03, 0x0B, 0xCF, 0x02, 0x5C, 0x42, 0x03, 0x12, 0x46, 0x01,
    0xBF, 0x52, 0x03, 0x10, 0x46, 0x01, 0xCA, 0x56, 0x03, 0x09, 0xCF, 0x02,
    0x37, 0x00, 0x03, 0x0B, 0xCF, 0x02, 0x0C, 0x0E, 0x00, 0x00, 0x0D, 0x00,
    0x00, 0x0C, 0x00, 0x00, 0x0B, 0x00, 0x00, 0x0A, 0x00, 0x01, 0x02, 0x00,
    0x0E, 0x00, 0x03, 0xB4, 0x42, 0x03, 0x15, 0x00, 0x03, 0x0A, 0xCF, 0x02,
    0xB4, 0x42, 0x03, 0x18, 0x4E, 0x01, 0xD6, 0x56, 0x03, 0x15, 0x00, 0x03,
    0x0D, 0xCF, 0x02, 0x4B, 0x00, 0x03, 0x0A, 0x00, 0x03, 0x53, 0x00, 0x03,
    0x0E, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0x19, 0x4E, 0x01, 0xDF, 0x56, 0x03,
    0x15, 0x00, 0x03, 0x0F, 0xCF, 0x02, 0x0F, 0xCF, 0x02, 0x0F, 0xCF, 0x02,
    0x0D, 0xCF, 0x02, 0x4B, 0x00, 0x03, 0xC4, 0x41, 0x03, 0x0C, 0x4E, 0x01,
    0xC4, 0x55, 0x03, 0x0A, 0x00, 0x03, 0x53, 0x00, 0x03, 0x0B, 0xCF, 0x02,
    0x0E, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0xB8, 0x43, 0x01, 0xC4, 0x51, 0x03,
    0xD7, 0x43, 0x01, 0xF5, 0x52, 0x03, 0xD4, 0x43, 0x01, 0xFB, 0x52, 0x03,
    0xC0, 0x43, 0x01, 0xC4, 0x51, 0x03, 0x2D, 0xCF, 0x02, 0xC4, 0x41, 0x03,
    0xAA, 0x42, 0x01, 0xC4, 0x55, 0x03, 0xAA, 0x0F, 0x00, 0x06, 0xEF, 0x02,
    0xC4, 0x41, 0x03, 0x25, 0xCF, 0x02, 0x50, 0x19, 0x00, 0x80, 0xA5, 0x00,
    0xC4, 0x51, 0x03, 0x23, 0xCF, 0x02, 0xC4, 0x41, 0x03, 0x06, 0x6F, 0x00,
    0xAA, 0x4F, 0x01, 0xC4, 0x55, 0x03, 0x01, 0x46, 0x01, 0x03, 0x53, 0x03,
    0x03, 0x46, 0x01, 0x08, 0x53, 0x03, 0xC4, 0x41, 0x03, 0x08, 0xCF, 0x02,
    0x64, 0x00, 0x03, 0x73, 0x00, 0x03, 0x08, 0xCF, 0x02, 0xC4, 0x41, 0x03,
    0x08, 0xCF, 0x02, 0x57, 0x00, 0x03, 0x02, 0x0F, 0x00, 0x04, 0xCF, 0x02,
    0x20, 0x1F, 0x00, 0x04, 0xCF, 0x02, 0x10, 0x1F, 0x00, 0x04, 0xCF, 0x02,
    0x00, 0x1F, 0x00, 0x04, 0xCF, 0x02, 0x70, 0x1F, 0x00, 0x84, 0x00, 0x03,
    0x04, 0xCF, 0x02, 0x20, 0xCF, 0x02, 0x01, 0x00, 0x03, 0x0A, 0x00, 0x03,
    0x73, 0x00, 0x03, 0x08, 0xCF, 0x02, 0x03, 0x42, 0x01, 0x1D, 0x53, 0x03,
    0x04, 0x02, 0x00, 0x3B, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x20, 0x1F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00,
    0x04, 0xCF, 0x02, 0x00, 0x0F, 0x00, 0x04, 0xCF, 0x02, 0xC4, 0x41, 0x03,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_length_matches_inject_span() {
        assert_eq!(STOCK_HEADER_506.len(), 0x984);
    }

    #[test]
    fn header_first_bytes_stable() {
        assert_eq!(&STOCK_HEADER_506[..4], &[0x8B, 0x40, 0x03, 0x11]);
    }
}
