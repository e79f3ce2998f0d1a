//! GROM emulation detection
//!
//! A real GROM chip only decodes 6K out of each 8K window. Dumps usually
//! fill the missing 2K with zeros or with the mirror image produced by the
//! address decoding, which is the OR of the bytes at +0x800 and +0x1000.
//! Anything else in that area only makes sense on the `gromemu` PCB, which
//! backs the GROM space with fully addressable memory.

/// Size of one GROM window
pub const GROM_PAGE_SIZE: usize = 0x2000;

/// Bytes a GROM chip actually decodes per window
pub const GROM_VISIBLE_SIZE: usize = 0x1800;

const MIRROR_LOW: usize = 0x800;
const MIRROR_HIGH: usize = 0x1000;

/// Check whether `data` holds GROM content that a native GROM cannot serve.
pub fn needs_grom_emulation(data: Option<&[u8]>) -> bool {
    data.is_some_and(|data| data.chunks(GROM_PAGE_SIZE).any(page_needs_emulation))
}

fn page_needs_emulation(page: &[u8]) -> bool {
    if page.len() <= GROM_VISIBLE_SIZE {
        return false;
    }
    let extra = &page[GROM_VISIBLE_SIZE..];
    if extra.iter().all(|&b| b == 0) {
        return false;
    }
    // extra is at most 2K, so both mirror offsets stay inside the visible area
    !extra
        .iter()
        .enumerate()
        .all(|(offset, &b)| b == page[offset + MIRROR_LOW] | page[offset + MIRROR_HIGH])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A page whose hidden 2K is the address-decoding mirror.
    fn mirrored_page() -> Vec<u8> {
        let mut page: Vec<u8> = (0..GROM_PAGE_SIZE).map(|i| (i * 7 % 251) as u8).collect();
        for offset in 0..GROM_PAGE_SIZE - GROM_VISIBLE_SIZE {
            page[GROM_VISIBLE_SIZE + offset] = page[offset + MIRROR_LOW] | page[offset + MIRROR_HIGH];
        }
        page
    }

    #[test]
    fn test_absent_grom() {
        assert!(!needs_grom_emulation(None));
    }

    #[test]
    fn test_zero_filled() {
        assert!(!needs_grom_emulation(Some(&[0u8; 5 * GROM_PAGE_SIZE])));
        assert!(!needs_grom_emulation(Some(&[])));
    }

    #[test]
    fn test_short_pages_are_native() {
        let data = vec![0xAAu8; GROM_VISIBLE_SIZE];
        assert!(!needs_grom_emulation(Some(&data)));

        // 6K in the second page as well
        let mut data = vec![0xAAu8; GROM_PAGE_SIZE + GROM_VISIBLE_SIZE];
        data[GROM_VISIBLE_SIZE..GROM_PAGE_SIZE].fill(0);
        assert!(!needs_grom_emulation(Some(&data)));
    }

    #[test]
    fn test_mirror_is_native() {
        let mut data = mirrored_page();
        data.extend(mirrored_page());
        assert!(!needs_grom_emulation(Some(&data)));
    }

    #[test]
    fn test_partial_extra_area() {
        // Page ending 16 bytes into the hidden area
        let mut page = mirrored_page();
        page.truncate(GROM_VISIBLE_SIZE + 16);
        assert!(!needs_grom_emulation(Some(&page)));

        page[GROM_VISIBLE_SIZE + 15] ^= 0x01;
        assert!(needs_grom_emulation(Some(&page)));
    }

    #[test]
    fn test_unexplained_data_needs_emulation() {
        let mut page = vec![0u8; GROM_PAGE_SIZE];
        page[GROM_VISIBLE_SIZE] = 0x42;
        assert!(needs_grom_emulation(Some(&page)));
    }

    #[test]
    fn test_detected_in_later_page() {
        let mut data = mirrored_page();
        let mut second = mirrored_page();
        second[GROM_PAGE_SIZE - 1] = !second[GROM_PAGE_SIZE - 1];
        data.extend(second);
        assert!(needs_grom_emulation(Some(&data)));
    }
}
