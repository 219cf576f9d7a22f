//! Page selection control.
//!
//! Renders a compact page strip (`‹ 1 … 4 [5] 6 … 10 ›`) and turns navigation
//! intents into page numbers. The page size is fixed by configuration and
//! cannot be changed from here.

use crate::model::PageNumber;
use crate::pager::PageControlProps;
use crate::view::constants::MAX_PAGE_SLOTS;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One slot in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A page number.
    Page(usize),
    /// Skipped pages.
    Ellipsis,
}

/// Compute the visible page slots.
///
/// First and last pages are always shown; the current page keeps its
/// neighbours visible. `max_slots` must be at least 5.
pub fn page_slots(current: usize, total: usize, max_slots: usize) -> Vec<PageSlot> {
    debug_assert!(max_slots >= 5);

    if total <= max_slots {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let edge = max_slots - 3;
    let mut slots = Vec::with_capacity(max_slots);

    if current <= edge {
        slots.extend((1..=max_slots - 2).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(total));
    } else if current > total - edge {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((total - (max_slots - 3)..=total).map(PageSlot::Page));
    } else {
        let inner = max_slots - 4;
        let lo = current - (inner - 1) / 2;
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((lo..lo + inner).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(total));
    }

    slots
}

/// Page control for one render.
#[derive(Debug, Clone, Copy)]
pub struct PageControl {
    props: PageControlProps,
}

impl PageControl {
    /// Control for the given props.
    pub fn new(props: PageControlProps) -> Self {
        Self { props }
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        self.props.total_pages()
    }

    /// Select an explicit page. `None` if it is outside `1..=total_pages`.
    pub fn select(&self, page: usize) -> Option<PageNumber> {
        PageNumber::new(page)
            .ok()
            .filter(|p| p.get() <= self.total_pages())
    }

    /// The next page, or `None` on the last page.
    pub fn next(&self) -> Option<PageNumber> {
        self.select(self.props.current_page.next().get())
    }

    /// The previous page, or `None` on the first page.
    pub fn prev(&self) -> Option<PageNumber> {
        self.props
            .current_page
            .prev()
            .and_then(|p| self.select(p.get()))
    }

    /// Page 1, or `None` if already there or there are no pages.
    pub fn first(&self) -> Option<PageNumber> {
        self.select(1)
            .filter(|p| *p != self.props.current_page)
    }

    /// The last page, or `None` if already there or there are no pages.
    pub fn last(&self) -> Option<PageNumber> {
        self.select(self.total_pages())
            .filter(|p| *p != self.props.current_page)
    }

    fn line(&self) -> Line<'static> {
        let total = self.total_pages();
        let current = self.props.current_page.get();
        let dim = Style::default().add_modifier(Modifier::DIM);

        let arrow_style = |enabled: bool| if enabled { Style::default() } else { dim };

        let mut spans = vec![Span::styled("‹", arrow_style(current > 1))];
        for slot in page_slots(current, total, MAX_PAGE_SLOTS) {
            spans.push(Span::raw(" "));
            spans.push(match slot {
                PageSlot::Page(n) if n == current => Span::styled(
                    format!("[{n}]"),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ),
                PageSlot::Page(n) => Span::raw(n.to_string()),
                PageSlot::Ellipsis => Span::styled("…", dim),
            });
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled("›", arrow_style(current < total)));

        Line::from(spans)
    }
}

impl Widget for PageControl {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.total_pages() == 0 {
            return;
        }
        Paragraph::new(self.line()).render(area, buf);
    }
}
