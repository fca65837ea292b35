use serde::{Serialize, Serializer};

/// Above this many pages the page-number list collapses with ellipses.
pub const MAX_VISIBLE_PAGES: usize = 7;

/// One entry of a page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageNumber::Page(page) => serializer.serialize_u64(*page as u64),
            PageNumber::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Slice boundaries and navigation flags for one page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub item_count: usize,
}

/// Clamp `requested_page` into range and describe the resulting page.
pub fn paginate(item_count: usize, page_size: usize, requested_page: usize) -> PageWindow {
    PageWindow::new(item_count, page_size, requested_page)
}

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1)).max(1)
}

impl PageWindow {
    pub fn new(item_count: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(item_count, page_size);
        Self {
            current_page: requested_page.clamp(1, total_pages),
            total_pages,
            page_size,
            item_count,
        }
    }

    fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// 1-based index of the first item on the page, 0 for an empty list.
    pub fn start_item(&self) -> usize {
        if self.item_count == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based index of the last item on the page, 0 for an empty list.
    pub fn end_item(&self) -> usize {
        (self.offset() + self.page_size).min(self.item_count)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn page_numbers(&self) -> Vec<PageNumber> {
        page_numbers(self.current_page, self.total_pages)
    }

    pub fn view(&self) -> PageView {
        PageView {
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_items: self.item_count,
            start_item: self.start_item(),
            end_item: self.end_item(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            pages: self.page_numbers(),
        }
    }
}

/// Page-number list for a pagination control.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageNumber> {
    let total_pages = total_pages.max(1);
    let current_page = current_page.clamp(1, total_pages);

    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageNumber::Page).collect();
    }

    let mut pages = vec![PageNumber::Page(1)];
    if current_page > 3 {
        pages.push(PageNumber::Ellipsis);
    }

    let first = current_page.saturating_sub(1).max(2);
    let last = (current_page + 1).min(total_pages - 1);
    pages.extend((first..=last).map(PageNumber::Page));

    if current_page + 2 < total_pages {
        pages.push(PageNumber::Ellipsis);
    }
    pages.push(PageNumber::Page(total_pages));
    pages
}

/// Serializable pagination summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub pages: Vec<PageNumber>,
}

/// Current-page cursor that keeps itself inside the list it navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn window(&self, item_count: usize) -> PageWindow {
        PageWindow::new(item_count, self.page_size, self.current_page)
    }

    pub fn go_to(&mut self, page: usize, item_count: usize) -> PageWindow {
        let window = PageWindow::new(item_count, self.page_size, page);
        self.current_page = window.current_page;
        window
    }

    pub fn next(&mut self, item_count: usize) -> PageWindow {
        self.go_to(self.current_page.saturating_add(1), item_count)
    }

    pub fn previous(&mut self, item_count: usize) -> PageWindow {
        self.go_to(self.current_page.saturating_sub(1), item_count)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}
