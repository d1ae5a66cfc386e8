//! Adobe Glyph List lookups.
//!
//! Maps PostScript glyph names to Unicode, which is how `/Differences`
//! arrays and CFF charsets become text. The table below covers the Latin,
//! punctuation, symbol, and Greek names that show up in practice; names
//! outside the table fall back to the `uniXXXX` / `uXXXX[XX]` conventions
//! from the AGL specification.

use phf::phf_map;

/// Glyph-name to Unicode map (AGL subset, perfect-hashed).
static GLYPH_LIST: phf::Map<&'static str, char> = phf_map! {
    // Uppercase Latin
    "A" => 'A', "B" => 'B', "C" => 'C', "D" => 'D', "E" => 'E', "F" => 'F',
    "G" => 'G', "H" => 'H', "I" => 'I', "J" => 'J', "K" => 'K', "L" => 'L',
    "M" => 'M', "N" => 'N', "O" => 'O', "P" => 'P', "Q" => 'Q', "R" => 'R',
    "S" => 'S', "T" => 'T', "U" => 'U', "V" => 'V', "W" => 'W', "X" => 'X',
    "Y" => 'Y', "Z" => 'Z',
    // Lowercase Latin
    "a" => 'a', "b" => 'b', "c" => 'c', "d" => 'd', "e" => 'e', "f" => 'f',
    "g" => 'g', "h" => 'h', "i" => 'i', "j" => 'j', "k" => 'k', "l" => 'l',
    "m" => 'm', "n" => 'n', "o" => 'o', "p" => 'p', "q" => 'q', "r" => 'r',
    "s" => 's', "t" => 't', "u" => 'u', "v" => 'v', "w" => 'w', "x" => 'x',
    "y" => 'y', "z" => 'z',
    // Digits
    "zero" => '0', "one" => '1', "two" => '2', "three" => '3', "four" => '4',
    "five" => '5', "six" => '6', "seven" => '7', "eight" => '8', "nine" => '9',
    // ASCII punctuation
    "space" => ' ', "exclam" => '!', "quotedbl" => '"', "numbersign" => '#',
    "dollar" => '$', "percent" => '%', "ampersand" => '&', "quotesingle" => '\'',
    "parenleft" => '(', "parenright" => ')', "asterisk" => '*', "plus" => '+',
    "comma" => ',', "hyphen" => '-', "period" => '.', "slash" => '/',
    "colon" => ':', "semicolon" => ';', "less" => '<', "equal" => '=',
    "greater" => '>', "question" => '?', "at" => '@', "bracketleft" => '[',
    "backslash" => '\\', "bracketright" => ']', "asciicircum" => '^',
    "underscore" => '_', "grave" => '`', "braceleft" => '{', "bar" => '|',
    "braceright" => '}', "asciitilde" => '~',
    // Typographic punctuation
    "quoteleft" => '\u{2018}', "quoteright" => '\u{2019}',
    "quotedblleft" => '\u{201C}', "quotedblright" => '\u{201D}',
    "quotesinglbase" => '\u{201A}', "quotedblbase" => '\u{201E}',
    "endash" => '\u{2013}', "emdash" => '\u{2014}',
    "bullet" => '\u{2022}', "ellipsis" => '\u{2026}',
    "dagger" => '\u{2020}', "daggerdbl" => '\u{2021}',
    "perthousand" => '\u{2030}', "minus" => '\u{2212}',
    "fraction" => '\u{2044}', "guilsinglleft" => '\u{2039}',
    "guilsinglright" => '\u{203A}', "guillemotleft" => '\u{00AB}',
    "guillemotright" => '\u{00BB}', "exclamdown" => '\u{00A1}',
    "questiondown" => '\u{00BF}', "periodcentered" => '\u{00B7}',
    "nbspace" => '\u{00A0}', "softhyphen" => '\u{00AD}',
    // Currency and legal
    "cent" => '\u{00A2}', "sterling" => '\u{00A3}', "currency" => '\u{00A4}',
    "yen" => '\u{00A5}', "Euro" => '\u{20AC}', "florin" => '\u{0192}',
    "copyright" => '\u{00A9}', "registered" => '\u{00AE}',
    "trademark" => '\u{2122}', "section" => '\u{00A7}',
    "paragraph" => '\u{00B6}',
    // Math and symbols
    "plusminus" => '\u{00B1}', "multiply" => '\u{00D7}', "divide" => '\u{00F7}',
    "degree" => '\u{00B0}', "logicalnot" => '\u{00AC}', "mu" => '\u{00B5}',
    "onequarter" => '\u{00BC}', "onehalf" => '\u{00BD}',
    "threequarters" => '\u{00BE}', "onesuperior" => '\u{00B9}',
    "twosuperior" => '\u{00B2}', "threesuperior" => '\u{00B3}',
    "infinity" => '\u{221E}', "partialdiff" => '\u{2202}',
    "summation" => '\u{2211}', "product" => '\u{220F}',
    "integral" => '\u{222B}', "radical" => '\u{221A}',
    "approxequal" => '\u{2248}', "notequal" => '\u{2260}',
    "lessequal" => '\u{2264}', "greaterequal" => '\u{2265}',
    "lozenge" => '\u{25CA}', "arrowleft" => '\u{2190}',
    "arrowup" => '\u{2191}', "arrowright" => '\u{2192}',
    "arrowdown" => '\u{2193}',
    // Ligatures
    "fi" => '\u{FB01}', "fl" => '\u{FB02}', "ff" => '\u{FB00}',
    "ffi" => '\u{FB03}', "ffl" => '\u{FB04}',
    // Accented uppercase
    "Agrave" => '\u{00C0}', "Aacute" => '\u{00C1}', "Acircumflex" => '\u{00C2}',
    "Atilde" => '\u{00C3}', "Adieresis" => '\u{00C4}', "Aring" => '\u{00C5}',
    "AE" => '\u{00C6}', "Ccedilla" => '\u{00C7}', "Egrave" => '\u{00C8}',
    "Eacute" => '\u{00C9}', "Ecircumflex" => '\u{00CA}', "Edieresis" => '\u{00CB}',
    "Igrave" => '\u{00CC}', "Iacute" => '\u{00CD}', "Icircumflex" => '\u{00CE}',
    "Idieresis" => '\u{00CF}', "Eth" => '\u{00D0}', "Ntilde" => '\u{00D1}',
    "Ograve" => '\u{00D2}', "Oacute" => '\u{00D3}', "Ocircumflex" => '\u{00D4}',
    "Otilde" => '\u{00D5}', "Odieresis" => '\u{00D6}', "Oslash" => '\u{00D8}',
    "Ugrave" => '\u{00D9}', "Uacute" => '\u{00DA}', "Ucircumflex" => '\u{00DB}',
    "Udieresis" => '\u{00DC}', "Yacute" => '\u{00DD}', "Thorn" => '\u{00DE}',
    "Scaron" => '\u{0160}', "Zcaron" => '\u{017D}', "Ydieresis" => '\u{0178}',
    "OE" => '\u{0152}', "Lslash" => '\u{0141}',
    // Accented lowercase
    "agrave" => '\u{00E0}', "aacute" => '\u{00E1}', "acircumflex" => '\u{00E2}',
    "atilde" => '\u{00E3}', "adieresis" => '\u{00E4}', "aring" => '\u{00E5}',
    "ae" => '\u{00E6}', "ccedilla" => '\u{00E7}', "egrave" => '\u{00E8}',
    "eacute" => '\u{00E9}', "ecircumflex" => '\u{00EA}', "edieresis" => '\u{00EB}',
    "igrave" => '\u{00EC}', "iacute" => '\u{00ED}', "icircumflex" => '\u{00EE}',
    "idieresis" => '\u{00EF}', "eth" => '\u{00F0}', "ntilde" => '\u{00F1}',
    "ograve" => '\u{00F2}', "oacute" => '\u{00F3}', "ocircumflex" => '\u{00F4}',
    "otilde" => '\u{00F5}', "odieresis" => '\u{00F6}', "oslash" => '\u{00F8}',
    "ugrave" => '\u{00F9}', "uacute" => '\u{00FA}', "ucircumflex" => '\u{00FB}',
    "udieresis" => '\u{00FC}', "yacute" => '\u{00FD}', "thorn" => '\u{00FE}',
    "ydieresis" => '\u{00FF}', "germandbls" => '\u{00DF}',
    "scaron" => '\u{0161}', "zcaron" => '\u{017E}', "oe" => '\u{0153}',
    "lslash" => '\u{0142}', "dotlessi" => '\u{0131}',
    // Accents
    "acute" => '\u{00B4}', "dieresis" => '\u{00A8}', "macron" => '\u{00AF}',
    "cedilla" => '\u{00B8}', "circumflex" => '\u{02C6}', "tilde" => '\u{02DC}',
    "breve" => '\u{02D8}', "dotaccent" => '\u{02D9}', "ring" => '\u{02DA}',
    "ogonek" => '\u{02DB}', "caron" => '\u{02C7}', "hungarumlaut" => '\u{02DD}',
    // Greek (as used in symbol-set fonts)
    "Alpha" => '\u{0391}', "Beta" => '\u{0392}', "Gamma" => '\u{0393}',
    "Delta" => '\u{0394}', "Epsilon" => '\u{0395}', "Zeta" => '\u{0396}',
    "Eta" => '\u{0397}', "Theta" => '\u{0398}', "Iota" => '\u{0399}',
    "Kappa" => '\u{039A}', "Lambda" => '\u{039B}', "Mu" => '\u{039C}',
    "Nu" => '\u{039D}', "Xi" => '\u{039E}', "Omicron" => '\u{039F}',
    "Pi" => '\u{03A0}', "Rho" => '\u{03A1}', "Sigma" => '\u{03A3}',
    "Tau" => '\u{03A4}', "Upsilon" => '\u{03A5}', "Phi" => '\u{03A6}',
    "Chi" => '\u{03A7}', "Psi" => '\u{03A8}', "Omega" => '\u{03A9}',
    "alpha" => '\u{03B1}', "beta" => '\u{03B2}', "gamma" => '\u{03B3}',
    "delta" => '\u{03B4}', "epsilon" => '\u{03B5}', "zeta" => '\u{03B6}',
    "eta" => '\u{03B7}', "theta" => '\u{03B8}', "iota" => '\u{03B9}',
    "kappa" => '\u{03BA}', "lambda" => '\u{03BB}', "nu" => '\u{03BD}',
    "xi" => '\u{03BE}', "omicron" => '\u{03BF}', "pi" => '\u{03C0}',
    "rho" => '\u{03C1}', "sigma" => '\u{03C3}', "sigma1" => '\u{03C2}',
    "tau" => '\u{03C4}', "upsilon" => '\u{03C5}', "phi" => '\u{03C6}',
    "chi" => '\u{03C7}', "psi" => '\u{03C8}', "omega" => '\u{03C9}',
};

/// Map a PostScript glyph name to Unicode.
///
/// Resolution order per the AGL specification:
/// 1. the glyph list itself;
/// 2. `uniXXXX` (exactly four hex digits);
/// 3. `uXXXX`, `uXXXXX`, or `uXXXXXX` (4-6 hex digits);
/// 4. otherwise unknown.
pub fn glyph_name_to_unicode(glyph_name: &str) -> Option<char> {
    if let Some(&c) = GLYPH_LIST.get(glyph_name) {
        return Some(c);
    }

    // Subset prefixes like "ABCDEF+uni0041" were stripped by the caller;
    // suffixed forms like "a.sc" resolve through their base name.
    if let Some(dot) = glyph_name.find('.') {
        if let Some(&c) = GLYPH_LIST.get(&glyph_name[..dot]) {
            return Some(c);
        }
    }

    if let Some(hex) = glyph_name.strip_prefix("uni") {
        if hex.len() == 4 {
            if let Ok(cp) = u32::from_str_radix(hex, 16) {
                return char::from_u32(cp);
            }
        }
    }

    if let Some(hex) = glyph_name.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            if let Ok(cp) = u32::from_str_radix(hex, 16) {
                return char::from_u32(cp);
            }
        }
    }

    log::debug!("glyph name not in glyph list: '{}'", glyph_name);
    None
}
