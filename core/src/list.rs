//! List session: paginated retrieval of a collection.
//!
//! # Design
//! Page changes and retries return an explicit `FetchRequest`; the host runs
//! it (directly or through `drive`) and feeds the result to `complete`.
//! Triggers that arrive while a fetch is in flight return `None`, so there is
//! never more than one outstanding request. A completion whose page does not
//! match the in-flight one is discarded.

use std::num::NonZeroU32;

use tracing::debug;

use crate::adapter::PagedFetch;
use crate::error::ClassifiedError;
use crate::navigation::NavigationIntent;
use crate::types::{Page, PageResult, UserSummary};

pub const LIST_GENERIC_MESSAGE: &str = "Ocorreu um erro ao carregar a lista de usuários.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Loaded,
    Errored,
}

/// "Fetch this page" action produced by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page_number: u32,
    pub page: Page,
}

#[derive(Debug, Clone)]
pub struct ListSession<T> {
    current_page: u32,
    page_size: NonZeroU32,
    last_result: Option<PageResult<T>>,
    status: ListStatus,
    error: Option<ClassifiedError>,
}

impl<T> ListSession<T> {
    /// Starts on page 1 in `Loading`, returning the first fetch.
    pub fn new(page_size: NonZeroU32) -> (Self, FetchRequest) {
        let session = Self {
            current_page: 1,
            page_size,
            last_result: None,
            status: ListStatus::Loading,
            error: None,
        };
        let request = session.request();
        (session, request)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn last_result(&self) -> Option<&PageResult<T>> {
        self.last_result.as_ref()
    }

    /// Items of the page on screen; empty unless `Loaded`.
    pub fn items(&self) -> &[T] {
        match (&self.last_result, self.status) {
            (Some(result), ListStatus::Loaded) => &result.items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|err| err.query_message(LIST_GENERIC_MESSAGE))
    }

    /// ceil(total_count / page_size) of the last fetched page.
    pub fn total_pages(&self) -> Option<u32> {
        self.last_result
            .as_ref()
            .map(|result| result.total_count.div_ceil(self.page_size.get()))
    }

    pub fn has_next(&self) -> bool {
        self.status == ListStatus::Loaded && self.last_result.as_ref().is_some_and(|r| r.has_next)
    }

    pub fn has_previous(&self) -> bool {
        self.status != ListStatus::Loading && self.current_page > 1
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if !self.has_next() {
            debug!(page = self.current_page, status = ?self.status, "next page ignored");
            return None;
        }
        self.current_page += 1;
        Some(self.start_loading())
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        if !self.has_previous() {
            debug!(page = self.current_page, status = ?self.status, "previous page ignored");
            return None;
        }
        self.current_page -= 1;
        Some(self.start_loading())
    }

    /// Re-issue the fetch for the current page. Only valid from `Errored`.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.status != ListStatus::Errored {
            debug!(page = self.current_page, status = ?self.status, "retry ignored");
            return None;
        }
        Some(self.start_loading())
    }

    pub fn complete(&mut self, request: FetchRequest, result: Result<PageResult<T>, ClassifiedError>) {
        if self.status != ListStatus::Loading || request != self.request() {
            debug!(page = request.page_number, current = self.current_page, "stale page discarded");
            return;
        }
        match result {
            Ok(mut page) => {
                debug!(page = self.current_page, items = page.items.len(), total = page.total_count, "page loaded");
                page.page = request.page;
                self.last_result = Some(page);
                self.error = None;
                self.status = ListStatus::Loaded;
            }
            Err(err) => {
                debug!(page = self.current_page, error = %err, "page failed");
                self.error = Some(err);
                self.status = ListStatus::Errored;
            }
        }
    }

    /// Run `request` through `fetcher` and complete it.
    pub fn drive<F>(&mut self, request: FetchRequest, fetcher: &mut F)
    where
        F: PagedFetch<Item = T> + ?Sized,
    {
        let result = fetcher.fetch(request.page);
        self.complete(request, result);
    }

    fn request(&self) -> FetchRequest {
        FetchRequest {
            page_number: self.current_page,
            page: Page::numbered(self.current_page, self.page_size.get()),
        }
    }

    fn start_loading(&mut self) -> FetchRequest {
        self.status = ListStatus::Loading;
        self.error = None;
        let request = self.request();
        debug!(page = request.page_number, offset = request.page.offset, "page requested");
        request
    }
}

/// Actions of the user-list screen.
impl ListSession<UserSummary> {
    /// Open the detail view of the row with `id` on the page shown.
    pub fn open_user(&self, id: &str) -> Option<NavigationIntent> {
        self.items()
            .iter()
            .find(|user| user.id == id)
            .map(|user| NavigationIntent::UserDetails(user.id.clone()))
    }

    pub fn add_user(&self) -> NavigationIntent {
        NavigationIntent::AddUser
    }
}
