//! Filename classification, sibling renaming and banking hints

use std::borrow::Cow;

use super::ImageKind;
use crate::common::{RpkError, RpkResult};

const BIN_EXTENSION: &[u8] = b".bin";

/// Strip a trailing `.bin` (any case), leaving the significant part.
fn significant_stem(name: &str) -> &str {
    let bytes = name.as_bytes();
    let ext_len = BIN_EXTENSION.len();
    if bytes.len() >= ext_len && bytes[bytes.len() - ext_len..].eq_ignore_ascii_case(BIN_EXTENSION) {
        &name[..name.len() - ext_len]
    } else {
        name
    }
}

/// Classify a filename by its last significant character.
///
/// Total: anything that is not a `g` or `d` is a primary ROM.
pub fn classify(name: &str) -> ImageKind {
    match significant_stem(name).chars().next_back().map(|c| c.to_ascii_lowercase()) {
        Some('g') => ImageKind::Grom,
        Some('d') => ImageKind::PagedRom,
        _ => ImageKind::Rom,
    }
}

/// Derive the name of the sibling file holding an image of kind `target`.
///
/// Names that already classify as `target` are returned unchanged. Otherwise
/// the significant character must be one of `c`, `d` or `g`; it is replaced
/// by the target's letter in the same case.
pub fn rename_for_kind(name: &str, target: ImageKind) -> RpkResult<Cow<'_, str>> {
    if classify(name) == target {
        return Ok(Cow::Borrowed(name));
    }

    let stem = significant_stem(name);
    let Some((index, slot)) = stem.char_indices().next_back() else {
        return Err(RpkError::unknown_filename(name, target));
    };
    if !matches!(slot.to_ascii_lowercase(), 'c' | 'd' | 'g') {
        return Err(RpkError::unknown_filename(name, target));
    }

    let letter = if slot.is_ascii_uppercase() {
        target.letter().to_ascii_uppercase()
    } else {
        target.letter()
    };

    let mut renamed = String::with_capacity(name.len());
    renamed.push_str(&name[..index]);
    renamed.push(letter);
    renamed.push_str(&name[index + slot.len_utf8()..]);
    Ok(Cow::Owned(renamed))
}

/// Last significant character of a primary ROM filename, lower-cased.
///
/// Used to tell apart the large paged PCBs when the size alone is ambiguous.
pub fn banking_hint(name: &str) -> Option<char> {
    significant_stem(name)
        .chars()
        .next_back()
        .map(|c| c.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify() {
        assert_eq!(classify("phm3000g.bin"), ImageKind::Grom);
        assert_eq!(classify("PHM3000D.BIN"), ImageKind::PagedRom);
        assert_eq!(classify("phm3000c.bin"), ImageKind::Rom);
        assert_eq!(classify("game.bin"), ImageKind::Rom);
        assert_eq!(classify("gameg"), ImageKind::Grom);
        assert_eq!(classify(".bin"), ImageKind::Rom);
        assert_eq!(classify(""), ImageKind::Rom);
    }

    #[test]
    fn test_rename_keeps_matching_name() {
        let renamed = rename_for_kind("phm3000c.bin", ImageKind::Rom).unwrap();
        assert!(matches!(renamed, Cow::Borrowed(_)));
        assert_eq!(rename_for_kind("game.bin", ImageKind::Rom).unwrap(), "game.bin");
    }

    #[test]
    fn test_rename_preserves_case() {
        assert_eq!(rename_for_kind("phm3000c.bin", ImageKind::Grom).unwrap(), "phm3000g.bin");
        assert_eq!(rename_for_kind("PHM3000C.BIN", ImageKind::PagedRom).unwrap(), "PHM3000D.BIN");
        assert_eq!(rename_for_kind("Ag.Bin", ImageKind::Rom).unwrap(), "Ac.Bin");
        assert_eq!(rename_for_kind("romc", ImageKind::Grom).unwrap(), "romg");
    }

    #[test]
    fn test_rename_fails_without_slot() {
        assert!(matches!(
            rename_for_kind("game.bin", ImageKind::Grom),
            Err(RpkError::UnknownFilename { kind: ImageKind::Grom, .. })
        ));
        assert!(rename_for_kind(".bin", ImageKind::Grom).is_err());
        assert!(rename_for_kind("", ImageKind::PagedRom).is_err());
    }

    #[test]
    fn test_banking_hint() {
        assert_eq!(banking_hint("megademo8.bin"), Some('8'));
        assert_eq!(banking_hint("MEGADEMOC.BIN"), Some('c'));
        assert_eq!(banking_hint("rom3"), Some('3'));
        assert_eq!(banking_hint(".bin"), None);
    }
}
