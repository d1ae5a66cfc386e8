//! Simple-font encoding tables.
//!
//! 256-entry lookups for the four named base encodings a simple font can
//! carry (ISO 32000-1:2008, Annex D): WinAnsiEncoding (Windows-1252),
//! MacRomanEncoding, StandardEncoding (Adobe's original Type 1 layout), and
//! PDFDocEncoding. A `/Differences` array overlays these per font.

/// Look up a code in a named base encoding.
///
/// Unknown encoding names fall back to treating printable ASCII as itself.
pub fn lookup(encoding: &str, code: u8) -> Option<char> {
    match encoding {
        "WinAnsiEncoding" => winansi(code),
        "MacRomanEncoding" => mac_roman(code),
        "StandardEncoding" => standard(code),
        "PDFDocEncoding" => pdfdoc(code),
        _ => {
            if (0x20..=0x7E).contains(&code) {
                Some(code as char)
            } else {
                None
            }
        },
    }
}

/// WinAnsiEncoding: Windows-1252.
pub fn winansi(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E => Some(code as char),
        0x80 => Some('\u{20AC}'), // Euro
        0x82 => Some('\u{201A}'), // quotesinglbase
        0x83 => Some('\u{0192}'), // florin
        0x84 => Some('\u{201E}'), // quotedblbase
        0x85 => Some('\u{2026}'), // ellipsis
        0x86 => Some('\u{2020}'), // dagger
        0x87 => Some('\u{2021}'), // daggerdbl
        0x88 => Some('\u{02C6}'), // circumflex
        0x89 => Some('\u{2030}'), // perthousand
        0x8A => Some('\u{0160}'), // Scaron
        0x8B => Some('\u{2039}'), // guilsinglleft
        0x8C => Some('\u{0152}'), // OE
        0x8E => Some('\u{017D}'), // Zcaron
        0x91 => Some('\u{2018}'), // quoteleft
        0x92 => Some('\u{2019}'), // quoteright
        0x93 => Some('\u{201C}'), // quotedblleft
        0x94 => Some('\u{201D}'), // quotedblright
        0x95 => Some('\u{2022}'), // bullet
        0x96 => Some('\u{2013}'), // endash
        0x97 => Some('\u{2014}'), // emdash
        0x98 => Some('\u{02DC}'), // tilde
        0x99 => Some('\u{2122}'), // trademark
        0x9A => Some('\u{0161}'), // scaron
        0x9B => Some('\u{203A}'), // guilsinglright
        0x9C => Some('\u{0153}'), // oe
        0x9E => Some('\u{017E}'), // zcaron
        0x9F => Some('\u{0178}'), // Ydieresis
        0xA0..=0xFF => char::from_u32(code as u32),
        _ => None,
    }
}

/// MacRomanEncoding (ISO 32000-1:2008, Annex D.2).
pub fn mac_roman(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E => Some(code as char),
        0x80 => Some('\u{00C4}'),
        0x81 => Some('\u{00C5}'),
        0x82 => Some('\u{00C7}'),
        0x83 => Some('\u{00C9}'),
        0x84 => Some('\u{00D1}'),
        0x85 => Some('\u{00D6}'),
        0x86 => Some('\u{00DC}'),
        0x87 => Some('\u{00E1}'),
        0x88 => Some('\u{00E0}'),
        0x89 => Some('\u{00E2}'),
        0x8A => Some('\u{00E4}'),
        0x8B => Some('\u{00E3}'),
        0x8C => Some('\u{00E5}'),
        0x8D => Some('\u{00E7}'),
        0x8E => Some('\u{00E9}'),
        0x8F => Some('\u{00E8}'),
        0x90 => Some('\u{00EA}'),
        0x91 => Some('\u{00EB}'),
        0x92 => Some('\u{00ED}'),
        0x93 => Some('\u{00EC}'),
        0x94 => Some('\u{00EE}'),
        0x95 => Some('\u{00EF}'),
        0x96 => Some('\u{00F1}'),
        0x97 => Some('\u{00F3}'),
        0x98 => Some('\u{00F2}'),
        0x99 => Some('\u{00F4}'),
        0x9A => Some('\u{00F6}'),
        0x9B => Some('\u{00F5}'),
        0x9C => Some('\u{00FA}'),
        0x9D => Some('\u{00F9}'),
        0x9E => Some('\u{00FB}'),
        0x9F => Some('\u{00FC}'),
        0xA0 => Some('\u{2020}'), // dagger
        0xA1 => Some('\u{00B0}'), // degree
        0xA2 => Some('\u{00A2}'),
        0xA3 => Some('\u{00A3}'),
        0xA4 => Some('\u{00A7}'),
        0xA5 => Some('\u{2022}'), // bullet
        0xA6 => Some('\u{00B6}'),
        0xA7 => Some('\u{00DF}'),
        0xA8 => Some('\u{00AE}'),
        0xA9 => Some('\u{00A9}'),
        0xAA => Some('\u{2122}'),
        0xAB => Some('\u{00B4}'),
        0xAC => Some('\u{00A8}'),
        0xAE => Some('\u{00C6}'),
        0xAF => Some('\u{00D8}'),
        0xB0 => Some('\u{221E}'),
        0xB4 => Some('\u{00A5}'),
        0xBB => Some('\u{00AA}'),
        0xBC => Some('\u{00BA}'),
        0xBE => Some('\u{00E6}'),
        0xBF => Some('\u{00F8}'),
        0xC0 => Some('\u{00BF}'),
        0xC1 => Some('\u{00A1}'),
        0xC2 => Some('\u{00AC}'),
        0xC4 => Some('\u{0192}'),
        0xC7 => Some('\u{00AB}'),
        0xC8 => Some('\u{00BB}'),
        0xC9 => Some('\u{2026}'), // ellipsis
        0xCA => Some('\u{00A0}'),
        0xCB => Some('\u{00C0}'),
        0xCC => Some('\u{00C3}'),
        0xCD => Some('\u{00D5}'),
        0xCE => Some('\u{0152}'),
        0xCF => Some('\u{0153}'),
        0xD0 => Some('\u{2013}'), // endash
        0xD1 => Some('\u{2014}'), // emdash
        0xD2 => Some('\u{201C}'),
        0xD3 => Some('\u{201D}'),
        0xD4 => Some('\u{2018}'),
        0xD5 => Some('\u{2019}'),
        0xD6 => Some('\u{00F7}'),
        0xD8 => Some('\u{00FF}'),
        0xD9 => Some('\u{0178}'),
        0xDA => Some('\u{2044}'), // fraction
        0xDB => Some('\u{20AC}'),
        0xDC => Some('\u{2039}'),
        0xDD => Some('\u{203A}'),
        0xDE => Some('\u{FB01}'), // fi
        0xDF => Some('\u{FB02}'), // fl
        0xE0 => Some('\u{2021}'), // daggerdbl
        0xE1 => Some('\u{00B7}'),
        0xE2 => Some('\u{201A}'),
        0xE3 => Some('\u{201E}'),
        0xE4 => Some('\u{2030}'),
        0xE5 => Some('\u{00C2}'),
        0xE6 => Some('\u{00CA}'),
        0xE7 => Some('\u{00C1}'),
        0xE8 => Some('\u{00CB}'),
        0xE9 => Some('\u{00C8}'),
        0xEA => Some('\u{00CD}'),
        0xEB => Some('\u{00CE}'),
        0xEC => Some('\u{00CF}'),
        0xED => Some('\u{00CC}'),
        0xEE => Some('\u{00D3}'),
        0xEF => Some('\u{00D4}'),
        0xF1 => Some('\u{00D2}'),
        0xF2 => Some('\u{00DA}'),
        0xF3 => Some('\u{00DB}'),
        0xF4 => Some('\u{00D9}'),
        0xF5 => Some('\u{0131}'), // dotlessi
        0xF6 => Some('\u{02C6}'),
        0xF7 => Some('\u{02DC}'),
        0xF8 => Some('\u{00AF}'),
        _ => None,
    }
}

/// Adobe StandardEncoding.
///
/// ASCII mostly maps through; the upper half carries Adobe's original
/// punctuation and ligature layout rather than Latin-1.
pub fn standard(code: u8) -> Option<char> {
    match code {
        0x27 => Some('\u{2019}'), // quoteright
        0x60 => Some('\u{2018}'), // quoteleft
        0x20..=0x7E => Some(code as char),
        0xA1 => Some('\u{00A1}'), // exclamdown
        0xA2 => Some('\u{00A2}'),
        0xA3 => Some('\u{00A3}'),
        0xA4 => Some('\u{2044}'), // fraction
        0xA5 => Some('\u{00A5}'),
        0xA6 => Some('\u{0192}'), // florin
        0xA7 => Some('\u{00A7}'),
        0xA8 => Some('\u{00A4}'), // currency
        0xA9 => Some('\u{0027}'), // quotesingle
        0xAA => Some('\u{201C}'), // quotedblleft
        0xAB => Some('\u{00AB}'),
        0xAC => Some('\u{2039}'),
        0xAD => Some('\u{203A}'),
        0xAE => Some('\u{FB01}'), // fi
        0xAF => Some('\u{FB02}'), // fl
        0xB1 => Some('\u{2013}'), // endash
        0xB2 => Some('\u{2020}'), // dagger
        0xB3 => Some('\u{2021}'), // daggerdbl
        0xB4 => Some('\u{00B7}'), // periodcentered
        0xB6 => Some('\u{00B6}'),
        0xB7 => Some('\u{2022}'), // bullet
        0xB8 => Some('\u{201A}'), // quotesinglbase
        0xB9 => Some('\u{201E}'), // quotedblbase
        0xBA => Some('\u{201D}'), // quotedblright
        0xBB => Some('\u{00BB}'),
        0xBC => Some('\u{2026}'), // ellipsis
        0xBD => Some('\u{2030}'), // perthousand
        0xBF => Some('\u{00BF}'),
        0xC1 => Some('\u{0060}'), // grave
        0xC2 => Some('\u{00B4}'), // acute
        0xC3 => Some('\u{02C6}'), // circumflex
        0xC4 => Some('\u{02DC}'), // tilde
        0xC5 => Some('\u{00AF}'), // macron
        0xC6 => Some('\u{02D8}'), // breve
        0xC7 => Some('\u{02D9}'), // dotaccent
        0xC8 => Some('\u{00A8}'), // dieresis
        0xCA => Some('\u{02DA}'), // ring
        0xCB => Some('\u{00B8}'), // cedilla
        0xCD => Some('\u{02DD}'), // hungarumlaut
        0xCE => Some('\u{02DB}'), // ogonek
        0xCF => Some('\u{02C7}'), // caron
        0xD0 => Some('\u{2014}'), // emdash
        0xE1 => Some('\u{00C6}'), // AE
        0xE3 => Some('\u{00AA}'), // ordfeminine
        0xE8 => Some('\u{0141}'), // Lslash
        0xE9 => Some('\u{00D8}'), // Oslash
        0xEA => Some('\u{0152}'), // OE
        0xEB => Some('\u{00BA}'), // ordmasculine
        0xF1 => Some('\u{00E6}'), // ae
        0xF5 => Some('\u{0131}'), // dotlessi
        0xF8 => Some('\u{0142}'), // lslash
        0xF9 => Some('\u{00F8}'), // oslash
        0xFA => Some('\u{0153}'), // oe
        0xFB => Some('\u{00DF}'), // germandbls
        _ => None,
    }
}

/// PDFDocEncoding: Latin-1 plus a punctuation block at 0x80-0x9E.
pub fn pdfdoc(code: u8) -> Option<char> {
    match code {
        0x00..=0x7F => Some(code as char),
        0x80 => Some('\u{2022}'), // bullet
        0x81 => Some('\u{2020}'), // dagger
        0x82 => Some('\u{2021}'), // daggerdbl
        0x83 => Some('\u{2026}'), // ellipsis
        0x84 => Some('\u{2014}'), // emdash
        0x85 => Some('\u{2013}'), // endash
        0x86 => Some('\u{0192}'), // florin
        0x87 => Some('\u{2044}'), // fraction
        0x88 => Some('\u{2039}'), // guilsinglleft
        0x89 => Some('\u{203A}'), // guilsinglright
        0x8A => Some('\u{2212}'), // minus
        0x8B => Some('\u{2030}'), // perthousand
        0x8C => Some('\u{201E}'), // quotedblbase
        0x8D => Some('\u{201C}'), // quotedblleft
        0x8E => Some('\u{201D}'), // quotedblright
        0x8F => Some('\u{2018}'), // quoteleft
        0x90 => Some('\u{2019}'), // quoteright
        0x91 => Some('\u{201A}'), // quotesinglbase
        0x92 => Some('\u{2122}'), // trademark
        0x93 => Some('\u{FB01}'), // fi
        0x94 => Some('\u{FB02}'), // fl
        0x95 => Some('\u{0141}'), // Lslash
        0x96 => Some('\u{0152}'), // OE
        0x97 => Some('\u{0160}'), // Scaron
        0x98 => Some('\u{0178}'), // Ydieresis
        0x99 => Some('\u{017D}'), // Zcaron
        0x9A => Some('\u{0131}'), // dotlessi
        0x9B => Some('\u{0142}'), // lslash
        0x9C => Some('\u{0153}'), // oe
        0x9D => Some('\u{0161}'), // scaron
        0x9E => Some('\u{017E}'), // zcaron
        0x9F => None,
        0xA0..=0xFF => char::from_u32(code as u32),
    }
}
