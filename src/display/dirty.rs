//! Tracking of which panel pages hold content that has not been sent to the controller yet.

/// Which pages a flush transmits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushPolicy {
    /// Send only the pages marked dirty.
    Selective,
    /// Send every page whenever any page is dirty.
    Bulk,
}

impl Default for FlushPolicy {
    fn default() -> Self {
        FlushPolicy::Selective
    }
}

/// A bitmask over page indices; bit `p` set means page `p` has unsent changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyMask(u8);

impl DirtyMask {
    /// Every one of the first `pages` pages marked.
    pub fn all(pages: u8) -> Self {
        DirtyMask(span(0, pages))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_clean(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, page: u8) -> bool {
        page < 8 && self.0 & (1 << page) != 0
    }

    pub fn mark(&mut self, page: u8) {
        self.mark_span(page, 1);
    }

    /// Mark `count` consecutive pages starting at `first`. Pages past the eighth are ignored.
    pub fn mark_span(&mut self, first: u8, count: u8) {
        self.0 |= span(first, count);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// The pages a flush under `policy` transmits, on a panel of `pages` pages.
    pub fn pages_to_send(self, pages: u8, policy: FlushPolicy) -> impl Iterator<Item = u8> {
        let send = match policy {
            _ if self.is_clean() => 0,
            FlushPolicy::Selective => self.0,
            FlushPolicy::Bulk => span(0, pages),
        };
        (0..pages).filter(move |&page| send & (1 << page) != 0)
    }
}

/// Bits `first .. first + count`, clipped to the eight a mask holds.
fn span(first: u8, count: u8) -> u8 {
    let ones = match count {
        0 => 0,
        8..=255 => 0xFF,
        n => (1u8 << n) - 1,
    };
    match first {
        0..=7 => ones << first,
        _ => 0,
    }
}
