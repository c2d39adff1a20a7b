//! Canonical crop keys.
//!
//! Source agronomic tables spell the same crop many ways: mixed case, Turkish
//! diacritics, parenthesised qualifiers, underscore/space variants.  Instead
//! of letting every lookup site try five spellings, all names are folded into
//! one canonical `CropKey` at the boundary; the catalog, the candidate
//! provider, and the solvers only ever compare canonical keys.

use std::borrow::Borrow;
use std::fmt;

/// Canonical key for the fallow / no-crop option.
///
/// Candidate providers usually include it so the solvers stay feasible under
/// tight water budgets; the engine itself does not special-case it.
pub const FALLOW: &str = "NADAS";

/// A canonicalized crop identifier.
///
/// Construct via [`CropKey::new`], which applies [`canonicalize`].  Two keys
/// built from any spelling variants of the same name compare equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropKey(String);

impl CropKey {
    /// Canonicalize `name` into a key.
    pub fn new(name: &str) -> Self {
        CropKey(canonicalize(name))
    }

    /// The fallow key.
    pub fn fallow() -> Self {
        CropKey(FALLOW.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_fallow(&self) -> bool {
        self.0 == FALLOW
    }
}

impl fmt::Display for CropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropKey {
    fn from(name: &str) -> Self {
        CropKey::new(name)
    }
}

impl Borrow<str> for CropKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Fold a raw crop name into its canonical spelling.
///
/// Steps: trim → uppercase → fold Turkish letters to ASCII → replace
/// punctuation (`- . , ( ) [ ] { } /`) with spaces → join the remaining
/// tokens with `_`.
///
/// ```
/// use ba_core::key::canonicalize;
/// assert_eq!(canonicalize("  Şeker Pancarı "), "SEKER_PANCARI");
/// assert_eq!(canonicalize("Mısır (Dane)"), "MISIR_DANE");
/// assert_eq!(canonicalize("misir_dane"), "MISIR_DANE");
/// ```
pub fn canonicalize(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        let mapped: char = match ch {
            'Ç' | 'ç' => 'C',
            'Ğ' | 'ğ' => 'G',
            'İ' | 'ı' => 'I',
            'Ö' | 'ö' => 'O',
            'Ş' | 'ş' => 'S',
            'Ü' | 'ü' => 'U',
            'Â' | 'â' => 'A',
            'Û' | 'û' => 'U',
            'Î' | 'î' => 'I',
            '-' | '.' | ',' | '(' | ')' | '[' | ']' | '{' | '}' | '/' => ' ',
            c => {
                // `to_uppercase` can expand to multiple chars (ß → SS).
                for u in c.to_uppercase() {
                    folded.push(u);
                }
                continue;
            }
        };
        folded.push(mapped);
    }
    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
