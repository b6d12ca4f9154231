//! Curated Unicode-to-ASCII tables.
//!
//! Lookups are exact matches only: no case folding and no normalization is
//! applied before a key is compared. The tables are necessarily incomplete;
//! `fallback` handles whatever they miss.

/// Characters spelled out as ASCII tokens.
///
/// Keys are strings so a base letter plus a combining mark can be listed.
/// Values are non-empty ASCII and never contain another key.
pub static SPECIAL_CHARS: &[(&str, &str)] = &[
    // Greek letters, spelled out so identifiers stay readable
    ("\u{03B8}", "theta"),      // θ
    ("\u{0398}", "Theta"),      // Θ
    ("\u{03B2}", "beta"),       // β
    ("\u{0392}", "Beta"),       // Β
    ("\u{1D6FD}", "ibeta"),     // 𝛽 mathematical italic beta
    ("\u{03C0}", "pi"),         // π
    ("\u{03A0}", "Pi"),         // Π
    ("\u{03B7}", "eta"),        // η
    ("\u{03C4}", "tau"),        // τ
    ("\u{03BC}", "mu"),         // μ
    ("\u{00B5}", "mu"),         // µ micro sign
    ("\u{03C3}", "sigma"),      // σ
    ("\u{03A3}", "Sigma"),      // Σ
    ("\u{03D5}", "phi"),        // ϕ
    ("\u{03C6}", "phi"),        // φ
    ("\u{03A6}", "Phi"),        // Φ
    ("\u{03BB}", "lambda"),     // λ
    ("\u{039B}", "Lambda"),     // Λ
    ("\u{03F5}", "iin"),        // ϵ lunate epsilon

    // Math operators
    ("\u{221A}", "sqrt"),       // √
    ("\u{221B}", "sqrt3"),      // ∛
    ("\u{221E}", "inf"),        // ∞
    ("\u{00B7}", "*"),          // · middle dot
    ("\u{2022}", "*"),          // • bullet
    ("\u{00D7}", "x"),          // ×
    ("\u{00F7}", "/"),          // ÷
    ("\u{2212}", "-"),          // − minus sign
    ("\u{00B1}", "+/-"),        // ±
    ("\u{2264}", "<="),         // ≤
    ("\u{2265}", ">="),         // ≥
    ("\u{2260}", "!="),         // ≠
    ("\u{2248}", "simeq"),      // ≈
    ("\u{2261}", "eequiv"),     // ≡
    ("\u{21D4}", "equiv"),      // ⇔
    ("\u{2208}", "in"),         // ∈
    ("\u{2202}", "partial"),    // ∂
    ("\u{222B}", "int"),        // ∫
    ("b\u{0304}", "hatb"),      // b̄

    // Arrows
    ("\u{2192}", "->"),         // →
    ("\u{2190}", "<-"),         // ←
    ("\u{2194}", "<->"),        // ↔
    ("\u{21D2}", "=>"),         // ⇒
    ("\u{27F6}", "rlim"),       // ⟶ long right arrow

    // Typography
    ("\u{2026}", "..."),        // …
    ("\u{2013}", "-"),          // – en dash
    ("\u{2014}", "--"),         // — em dash
    ("\u{2018}", "'"),          // ‘
    ("\u{2019}", "'"),          // ’
    ("\u{201C}", "\""),         // “
    ("\u{201D}", "\""),         // ”
    ("\u{00A0}", " "),          // non-breaking space
    ("\u{00A9}", "copyright"),  // ©
    ("\u{00B0}", "deg"),        // °
];

/// Invisible characters that are deleted outright.
pub static IGNORABLE_CHARS: &[char] = &[
    '\u{00AD}', // soft hyphen
    '\u{200B}', // zero-width space
    '\u{FEFF}', // BOM / zero-width no-break space
];

/// Subscript, superscript and modifier characters used as index notation.
pub static SUBSCRIPTS: &[(char, char)] = &[
    ('\u{2080}', '0'), ('\u{2081}', '1'), ('\u{2082}', '2'), ('\u{2083}', '3'), ('\u{2084}', '4'),
    ('\u{2085}', '5'), ('\u{2086}', '6'), ('\u{2087}', '7'), ('\u{2088}', '8'), ('\u{2089}', '9'),
    ('\u{2090}', 'a'), // ₐ
    ('\u{2091}', 'e'), // ₑ
    ('\u{2092}', 'o'), // ₒ
    ('\u{2093}', 'x'), // ₓ
    ('\u{2095}', 'h'), // ₕ
    ('\u{2096}', 'k'), // ₖ
    ('\u{2097}', 'l'), // ₗ
    ('\u{2098}', 'm'), // ₘ
    ('\u{2099}', 'n'), // ₙ
    ('\u{209A}', 'p'), // ₚ
    ('\u{209B}', 's'), // ₛ
    ('\u{209C}', 't'), // ₜ
    ('\u{208D}', '('), // ₍
    ('\u{208E}', ')'), // ₎

    // Modifier letters that show up as indices
    ('\u{1D62}', 'i'), // ᵢ
    ('\u{1D63}', 'r'), // ᵣ
    ('\u{1D64}', 'u'), // ᵤ
    ('\u{1D65}', 'v'), // ᵥ
    ('\u{2C7C}', 'j'), // ⱼ
    ('\u{1D57}', 't'), // ᵗ
    ('\u{1D47}', 'b'), // ᵇ
    ('\u{1D49}', 'e'), // ᵉ

    // Superscripts
    ('\u{2070}', '0'), ('\u{00B9}', '1'), ('\u{00B2}', '2'), ('\u{00B3}', '3'), ('\u{2074}', '4'),
    ('\u{2075}', '5'), ('\u{2076}', '6'), ('\u{2077}', '7'), ('\u{2078}', '8'), ('\u{2079}', '9'),
    ('\u{2071}', 'i'), // ⁱ
    ('\u{207F}', 'n'), // ⁿ

    // Signs and brackets, so exponents like 10⁻³ keep their meaning
    ('\u{207A}', '+'), // ⁺
    ('\u{207B}', '-'), // ⁻
    ('\u{207C}', '='), // ⁼
    ('\u{207D}', '('), // ⁽
    ('\u{207E}', ')'), // ⁾
    ('\u{208A}', '+'), // ₊
    ('\u{208B}', '-'), // ₋
    ('\u{208C}', '='), // ₌
];

/// The "Superscripts and Subscripts" block. Members count as part of a
/// subscript run even when `SUBSCRIPTS` has no mapping for them; every
/// assigned member except ₔ is mapped.
pub const SUB_SUPER_BLOCK: std::ops::RangeInclusive<char> = '\u{2070}'..='\u{209F}';

/// ASCII spelling for a single-character `SPECIAL_CHARS` key.
pub fn special_replacement(c: char) -> Option<&'static str> {
    SPECIAL_CHARS.iter().find_map(|&(key, value)| {
        let mut chars = key.chars();
        (chars.next() == Some(c) && chars.next().is_none()).then_some(value)
    })
}

pub fn subscript_replacement(c: char) -> Option<char> {
    SUBSCRIPTS
        .iter()
        .find_map(|&(key, value)| (key == c).then_some(value))
}
