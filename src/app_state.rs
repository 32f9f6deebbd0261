//! The core state machine bridging the page, its layout and the interactive surface.
//!
//! Every user interaction and every timer lands here. Scroll movement is funnelled through a
//! debouncer so a burst of scroll steps produces a single classification pass, and the
//! [`NavigationState`] is threaded through the tracker rather than mutated in place.

use crate::config::Config;
use crate::form::{ContactForm, EnterOutcome};
use crate::layout::{LayoutOptions, LayoutSurface, PageLayout};
use crate::menu::{ClickTarget, MenuState};
use crate::navigation::{NavLinks, NavigationState, NavigationTracker, ScrollTopControl};
use crate::page::Page;
use crate::reveal::{LazyImage, LazyImages, Reveal, RevealTarget};
use crate::scheduler::{Debouncer, Scheduler, TimerId};
use crate::scroll::Viewport;
use crate::theme::{Theme, ThemeStore};
use ratatui::layout::Rect;
use std::mem;
use std::time::Duration;
use tracing::{info, warn};

/// Rows at the bottom of the screen reserved for the status line.
pub const FOOTER_ROWS: u16 = 1;

/// Delay after start-up before the page is forced back to the top.
pub const LOAD_RESET_DELAY: Duration = Duration::from_millis(100);

/// Frame interval while a smooth scroll is running.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Longest wait for input when nothing is scheduled.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// The scrolling page with its header.
    Page,
    /// The contact form overlay.
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Deferred work run by the scheduler.
pub enum TimerTask {
    /// Snap back to the top once the page has settled after load.
    ResetScroll,
    /// Hide the form's success notice.
    DismissSuccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Clickable element drawn on screen.
pub enum Hit {
    /// Navigation link at this index.
    Link(usize),
    /// The menu toggle button.
    MenuButton,
    /// The open menu panel background.
    MenuPanel,
    /// The theme toggle.
    ThemeToggle,
    /// The back-to-top control.
    ScrollTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Screen area of a clickable element, recorded while drawing.
pub struct HitRegion {
    /// Occupied area.
    pub area: Rect,
    /// Element occupying it.
    pub hit: Hit,
    /// Whether the element sits inside the menu panel.
    pub in_menu: bool,
}

/// Single source of truth for the interactive page.
pub struct AppState {
    /// The parsed page.
    pub page: Page,
    /// Geometry of the page for the current terminal size.
    pub layout: PageLayout,
    /// Scroll position and any smooth scroll in flight.
    pub viewport: Viewport,
    /// Header links with their active markers.
    pub links: NavLinks,
    /// Section currently marked active.
    pub nav: NavigationState,
    /// Classification and programmatic scrolling.
    pub tracker: NavigationTracker,
    /// Back-to-top control visibility.
    pub scroll_top: ScrollTopControl,
    /// Collapsible menu for narrow terminals.
    pub menu: MenuState,
    /// Active colour scheme.
    pub theme: Theme,
    /// The contact form.
    pub form: ContactForm,
    /// Entrance animation state.
    pub reveal: Reveal,
    /// Lazy image state.
    pub images: LazyImages,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Link with keyboard focus.
    pub focused_link: usize,
    /// Status feedback displayed in the footer.
    pub message: Option<String>,
    /// Clickable regions from the last frame.
    pub hits: Vec<HitRegion>,
    debouncer: Debouncer<u32>,
    timers: Scheduler<TimerTask>,
    theme_store: ThemeStore,
    layout_options: LayoutOptions,
    menu_breakpoint: u16,
    success_notice: Duration,
    success_timer: Option<TimerId>,
    last_offset: u32,
    width: u16,
}

impl AppState {
    #[must_use]
    /// Lays out `page` for a `width` x `height` terminal and runs the first scroll pass.
    pub fn new(
        page: Page,
        cfg: &Config,
        theme: Theme,
        theme_store: ThemeStore,
        (width, height): (u16, u16),
        now: Duration,
    ) -> Self {
        let layout_options = LayoutOptions::from(cfg);
        let layout = PageLayout::new(
            &page,
            width,
            height.saturating_sub(FOOTER_ROWS),
            layout_options,
        );
        let viewport = Viewport::new(
            layout.viewport_height(),
            layout.document_height(),
            cfg.smooth_scroll(),
        );
        let images = page
            .images()
            .map(|(_, image)| LazyImage {
                alt: image.alt.clone(),
                data_src: image.data_src.clone(),
                src: None,
            })
            .collect();

        let mut timers = Scheduler::new();
        timers.schedule(TimerTask::ResetScroll, LOAD_RESET_DELAY, now);

        let mut app = Self {
            links: NavLinks::from_page(&page),
            reveal: Reveal::new(page.sections.len(), cfg.animations),
            images: LazyImages::new(images, cfg.lazy_images),
            page,
            layout,
            viewport,
            nav: NavigationState::default(),
            tracker: NavigationTracker::new(cfg.activation_preroll, cfg.scroll_top_threshold),
            scroll_top: ScrollTopControl::default(),
            menu: MenuState::default(),
            theme,
            form: ContactForm::default(),
            current_view: View::Page,
            focused_link: 0,
            message: None,
            hits: Vec::new(),
            debouncer: Debouncer::new(cfg.debounce()),
            timers,
            theme_store,
            layout_options,
            menu_breakpoint: cfg.menu_breakpoint,
            success_notice: cfg.success_message(),
            success_timer: None,
            last_offset: 0,
            width,
        };
        app.observe_layout();
        app.handle_scroll(0);
        app
    }

    /// Rebuilds the layout for a new terminal size and schedules a scroll pass.
    pub fn resize(&mut self, width: u16, height: u16, now: Duration) {
        self.width = width;
        self.layout = PageLayout::new(
            &self.page,
            width,
            height.saturating_sub(FOOTER_ROWS),
            self.layout_options,
        );
        self.viewport
            .resize(self.layout.viewport_height(), self.layout.document_height());
        self.observe_layout();
        self.debouncer.trigger(self.viewport.offset(), now);
        self.note_scroll(now);
    }

    fn observe_layout(&mut self) {
        if let Err(err) = self.tracker.check_surface(&self.layout) {
            warn!(error = %err, "section bands overlap; the later section wins");
        }
        let (hero_top, hero_height) = self.layout.hero_geometry();
        self.reveal.observe(RevealTarget::Hero, hero_top, hero_height);
        for (i, section) in self.layout.sections().iter().enumerate() {
            self.reveal
                .observe(RevealTarget::Section(i), section.top, section.extent);
        }
        let row_height = self.layout.row_height();
        for index in 0..self.page.images().count() {
            if let Some(top) = self.layout.image_top(index) {
                self.images.observe(index, top, row_height);
            }
        }
    }

    #[must_use]
    /// Whether the links are collapsed behind the menu button.
    pub fn links_collapsed(&self) -> bool {
        self.width < self.menu_breakpoint
    }

    /// Forwards any change in scroll offset to the debouncer.
    fn note_scroll(&mut self, now: Duration) {
        let offset = self.viewport.offset();
        if offset != self.last_offset {
            self.last_offset = offset;
            self.debouncer.trigger(offset, now);
        }
    }

    /// One classification pass for a settled scroll offset.
    fn handle_scroll(&mut self, offset: u32) {
        self.scroll_top.visible = self.tracker.scroll_to_top_visible(offset);
        let state = mem::take(&mut self.nav);
        self.nav = self
            .tracker
            .classify_active_section(state, offset, &self.layout);
        self.links.apply(&self.nav);
        let height = self.viewport.height();
        self.reveal.update(offset, height);
        self.images.update(offset, height);
    }

    /// Scrolls by `rows` terminal rows, unless the open menu locks the page.
    pub fn scroll_rows(&mut self, rows: i32, now: Duration) {
        if self.menu.body_locked() {
            return;
        }
        let delta = i64::from(rows) * i64::from(self.layout.row_height());
        self.viewport.scroll_by(delta);
        self.note_scroll(now);
    }

    /// Scrolls one screen (less the header) up or down.
    pub fn scroll_page(&mut self, down: bool, now: Duration) {
        let header = self.layout.header_height().unwrap_or(0);
        let step = self.viewport.height().saturating_sub(header).max(self.layout.row_height());
        let rows = i32::try_from(step / self.layout.row_height()).unwrap_or(i32::MAX);
        self.scroll_rows(if down { rows } else { -rows }, now);
    }

    /// Jumps to the top or bottom of the page.
    pub fn scroll_to_edge(&mut self, top: bool, now: Duration) {
        if self.menu.body_locked() {
            return;
        }
        let target = if top { 0 } else { self.viewport.max_offset() };
        self.viewport.jump_to(target);
        self.note_scroll(now);
    }

    /// Follows link `index`: smooth scroll to its section and mark it active straight away.
    pub fn activate_link(&mut self, index: usize, now: Duration) {
        let Some(target) = self.links.get(index).map(|l| l.target.clone()) else {
            return;
        };
        let state = mem::take(&mut self.nav);
        self.nav = self.tracker.scroll_to_section(
            state,
            &target,
            &self.layout,
            &mut self.viewport,
            now,
        );
        self.links.apply(&self.nav);
        self.focused_link = index;
        self.menu.close();
        self.note_scroll(now);
    }

    /// Moves keyboard focus along the links, wrapping at either end.
    pub fn focus_link(&mut self, forward: bool) {
        let count = self.links.len();
        if count == 0 {
            return;
        }
        self.focused_link = if forward {
            (self.focused_link + 1) % count
        } else {
            (self.focused_link + count - 1) % count
        };
        self.menu.hover(self.focused_link);
    }

    /// The back-to-top control was clicked.
    pub fn click_scroll_to_top(&mut self, now: Duration) {
        self.tracker.scroll_to_top(&mut self.viewport, now);
        self.note_scroll(now);
    }

    /// Switches between light and dark, persisting the choice.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.name(), "theme changed");
        if let Err(err) = self.theme_store.save_theme(self.theme) {
            warn!(error = %err, "could not persist theme preference");
        }
    }

    /// Opens or closes the menu.
    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    /// Escape: close the form, or the menu, handing focus back to the menu button.
    pub fn escape(&mut self) -> bool {
        if self.current_view == View::Form {
            self.close_form();
            return true;
        }
        if self.menu.escape() {
            self.message = Some("Menu closed".to_string());
            return true;
        }
        false
    }

    /// Dispatches a mouse click at a screen cell.
    pub fn click_at(&mut self, column: u16, row: u16, now: Duration) {
        let region = self
            .hits
            .iter()
            .rev()
            .find(|r| contains(r.area, column, row))
            .copied();
        let target = match region {
            Some(HitRegion {
                hit: Hit::MenuButton,
                ..
            }) => ClickTarget::MenuButton,
            Some(HitRegion { in_menu: true, .. }) => ClickTarget::MenuPanel,
            _ => ClickTarget::Outside,
        };
        self.menu.click(target);
        match region.map(|r| r.hit) {
            Some(Hit::Link(index)) => self.activate_link(index, now),
            Some(Hit::MenuButton) => self.toggle_menu(),
            Some(Hit::ThemeToggle) => self.toggle_theme(),
            Some(Hit::ScrollTop) if self.scroll_top.visible => self.click_scroll_to_top(now),
            _ => {}
        }
    }

    /// Pointer movement: underline the link under the pointer.
    pub fn hover_at(&mut self, column: u16, row: u16) {
        let link = self
            .hits
            .iter()
            .rev()
            .find(|r| contains(r.area, column, row))
            .and_then(|r| match r.hit {
                Hit::Link(index) => Some(index),
                _ => None,
            });
        match link {
            Some(index) => self.menu.hover(index),
            None => self.menu.unhover(),
        }
    }

    /// Shows the contact form.
    pub fn open_form(&mut self) {
        self.menu.close();
        self.current_view = View::Form;
    }

    /// Returns to the page.
    pub fn close_form(&mut self) {
        self.current_view = View::Page;
    }

    /// Enter inside the form: next field, or submit from the last.
    pub fn form_enter(&mut self, now: Duration) {
        if let EnterOutcome::Submitted(true) = self.form.enter() {
            self.schedule_success_dismissal(now);
        }
    }

    /// Submits the form directly.
    pub fn form_submit(&mut self, now: Duration) {
        if self.form.submit() {
            self.schedule_success_dismissal(now);
        }
    }

    fn schedule_success_dismissal(&mut self, now: Duration) {
        if let Some(id) = self.success_timer.take() {
            self.timers.cancel(id);
        }
        self.success_timer = Some(self.timers.schedule(
            TimerTask::DismissSuccess,
            self.success_notice,
            now,
        ));
    }

    /// Runs everything due at `now`, then advances animations.
    ///
    /// A pass that came due since the last tick runs with its stored offset before this frame's
    /// movement is noted, so frames further apart than the debounce delay each get a pass.
    pub fn tick(&mut self, now: Duration) {
        if let Some(offset) = self.debouncer.poll(now) {
            self.handle_scroll(offset);
        }
        self.viewport.advance(now);
        self.note_scroll(now);
        for task in self.timers.take_due(now) {
            match task {
                TimerTask::ResetScroll => {
                    self.viewport.jump_to(0);
                    self.note_scroll(now);
                }
                TimerTask::DismissSuccess => {
                    self.success_timer = None;
                    self.form.dismiss_success();
                }
            }
        }
    }

    #[must_use]
    /// Earliest instant at which [`AppState::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        [self.debouncer.deadline(), self.timers.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    #[must_use]
    /// How long the event loop may wait for input before the next [`AppState::tick`].
    ///
    /// Never longer than a frame while animating, and never past the next deadline.
    pub fn poll_timeout(&self, now: Duration) -> Duration {
        let cap = if self.is_animating() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        self.next_deadline()
            .map_or(cap, |deadline| deadline.saturating_sub(now).min(cap))
    }

    #[must_use]
    /// Whether a smooth scroll needs frames.
    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating()
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
