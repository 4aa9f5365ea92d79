use log::debug;
use std::fmt;
use std::ops::Range;

/// Slice one page out of `items`.
///
/// A missing size or page number leaves the corresponding bound open, so the
/// slice falls back to the start/end of the sequence instead of failing.
/// Bounds past the end clamp to an empty or shorter page.
pub fn page<T>(items: &[T], size: Option<usize>, page_number: Option<usize>) -> &[T] {
    if items.is_empty() {
        return items;
    }

    let start = match (size, page_number) {
        (Some(size), Some(number)) => size.checked_mul(number),
        _ => None,
    };
    let end = match (start, size) {
        (Some(start), Some(size)) => start.checked_add(size),
        _ => None,
    };

    let len = items.len();
    let start = start.unwrap_or(0).min(len);
    let end = end.unwrap_or(len).clamp(start, len);

    &items[start..end]
}

/// Number of pages needed for `len` items, 0 when there is nothing to page
pub fn total_pages(len: usize, size: usize) -> usize {
    if len == 0 || size == 0 {
        0
    } else {
        len.div_ceil(size)
    }
}

/// Emitted whenever the visible page changes
#[derive(Debug, Clone, PartialEq)]
pub struct PageChanged<T> {
    pub page_items: Vec<T>,
    pub page_number: usize,
}

/// Page state over a live collection
pub struct Pager<T> {
    items: Vec<T>,
    size: usize,
    page_number: usize,
    max_page_buttons: usize,
    on_page_changed: Option<Box<dyn FnMut(&PageChanged<T>)>>,
}

impl<T: fmt::Debug> fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("items", &self.items.len())
            .field("size", &self.size)
            .field("page_number", &self.page_number)
            .field("max_page_buttons", &self.max_page_buttons)
            .finish()
    }
}

impl<T: Clone> Pager<T> {
    pub fn new(size: usize, max_page_buttons: usize) -> Self {
        Self {
            items: Vec::new(),
            size,
            page_number: 0,
            max_page_buttons,
            on_page_changed: None,
        }
    }

    pub fn on_page_changed<F>(&mut self, f: F)
    where
        F: FnMut(&PageChanged<T>) + 'static,
    {
        self.on_page_changed = Some(Box::new(f));
    }

    /// Replace the collection; always returns to the first page
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.set_page_number(0);
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
        self.set_page_number(0);
    }

    pub fn set_page_number(&mut self, page_number: usize) {
        self.page_number = page_number;
        debug!("pager moved to page {} of {}", page_number, self.total_pages());

        let event = PageChanged {
            page_items: self.current_page().to_vec(),
            page_number,
        };
        if let Some(callback) = self.on_page_changed.as_mut() {
            callback(&event);
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn current_page(&self) -> &[T] {
        page(&self.items, Some(self.size), Some(self.page_number))
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.size)
    }

    /// Whether there are too many pages to show a button for each
    pub fn shortened(&self) -> bool {
        self.total_pages() > self.max_page_buttons
    }

    /// Page numbers to offer as buttons around the current page.
    ///
    /// Shortened pagers always show `max_page_buttons` buttons, centred on
    /// the current page and pushed inward at either end. A page number past
    /// the end is treated as the last page.
    pub fn page_buffer(&self) -> Range<usize> {
        let total = self.total_pages();
        if !self.shortened() {
            return 0..total;
        }

        let width = self.max_page_buttons;
        let current = self.page_number.min(total - 1);
        let start = current.saturating_sub(width / 2).min(total - width);

        start..start + width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_page_slices() {
        let items = [1, 2, 3, 4, 5, 6, 7];

        assert_eq!(page(&items, Some(3), Some(0)), &[1, 2, 3]);
        assert_eq!(page(&items, Some(3), Some(2)), &[7]);
        assert!(page(&items, Some(3), Some(3)).is_empty());
        assert!(page(&items, Some(3), Some(100)).is_empty());
    }

    #[test]
    fn test_pages_reconstruct_sequence() {
        let items: Vec<u32> = (0..17).collect();
        let size = 5;

        let rebuilt: Vec<u32> = (0..total_pages(items.len(), size))
            .flat_map(|n| page(&items, Some(size), Some(n)).to_vec())
            .collect();

        assert_eq!(rebuilt, items);
        assert_eq!(page(&items, Some(size), Some(3)).len(), 2);
    }

    #[test]
    fn test_invalid_bounds_open_the_slice() {
        let items = [1, 2, 3];

        assert_eq!(page(&items, None, Some(1)), &[1, 2, 3]);
        assert_eq!(page(&items, Some(2), None), &[1, 2, 3]);
        assert_eq!(page(&items, Some(usize::MAX), Some(2)), &[1, 2, 3]);
        assert!(page(&items, Some(0), Some(0)).is_empty());
    }

    #[test]
    fn test_empty_items_unchanged() {
        let items: [u8; 0] = [];
        assert!(page(&items, Some(3), Some(1)).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 3), 0);
        assert_eq!(total_pages(7, 0), 0);
        assert_eq!(total_pages(7, 3), 3);
        assert_eq!(total_pages(6, 3), 2);
    }

    #[test]
    fn test_page_buffer_short_collection() {
        let mut pager = Pager::new(3, 10);
        pager.set_items((0..7).collect::<Vec<u32>>());

        assert!(!pager.shortened());
        assert_eq!(pager.page_buffer(), 0..3);
    }

    #[test]
    fn test_page_buffer_windows() {
        let mut pager = Pager::new(1, 10);
        pager.set_items((0..20).collect::<Vec<u32>>());
        assert!(pager.shortened());

        pager.set_page_number(2);
        assert_eq!(pager.page_buffer(), 0..10);

        pager.set_page_number(12);
        assert_eq!(pager.page_buffer(), 7..17);

        pager.set_page_number(18);
        assert_eq!(pager.page_buffer(), 10..20);
    }

    #[test]
    fn test_page_buffer_width_follows_max_buttons() {
        let mut pager = Pager::new(1, 4);
        pager.set_items((0..20).collect::<Vec<u32>>());

        pager.set_page_number(10);
        assert_eq!(pager.page_buffer(), 8..12);

        pager.set_page_number(0);
        assert_eq!(pager.page_buffer(), 0..4);

        pager.set_page_number(19);
        assert_eq!(pager.page_buffer(), 16..20);
    }

    #[test]
    fn test_page_number_past_the_end() {
        let mut pager = Pager::new(1, 10);
        pager.set_items((0..20).collect::<Vec<u32>>());

        pager.set_page_number(usize::MAX);
        assert!(pager.current_page().is_empty());
        assert_eq!(pager.page_buffer(), 10..20);
    }

    #[test]
    fn test_new_size_returns_to_first_page() {
        let mut pager = Pager::new(2, 10);
        pager.set_items((0..10).collect::<Vec<u32>>());
        pager.set_page_number(3);

        pager.set_size(4);
        assert_eq!(pager.page_number(), 0);
        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.current_page(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_new_items_reset_page_and_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut pager = Pager::new(2, 10);
        {
            let seen = seen.clone();
            pager.on_page_changed(move |event: &PageChanged<u32>| {
                seen.borrow_mut().push((event.page_number, event.page_items.clone()));
            });
        }

        pager.set_items(vec![1, 2, 3, 4, 5]);
        pager.set_page_number(2);
        pager.set_items(vec![9, 8, 7]);

        assert_eq!(pager.page_number(), 0);
        assert_eq!(
            *seen.borrow(),
            vec![(0, vec![1, 2]), (2, vec![5]), (0, vec![9, 8])]
        );
    }
}
