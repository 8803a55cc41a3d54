//! Shared list-view state machine.
//!
//! One [`ListController`] backs every management table. It owns the search
//! text, filters and current page, hands out [`FetchTicket`]s for requests
//! and merges responses back in. Responses are applied in ticket order, so a
//! slow answer to an older query never overwrites a newer one.

use std::time::{Duration, Instant};

use crate::client::api::ListApi;
use crate::client::session::TokenStore;
use crate::client::{ClientError, LOGIN_PATH};
use crate::envelope::ApiResponse;
use crate::pagination::{PaginationMeta, page_links};
use crate::query::ListQuery;

/// Search debounce of the employees table.
pub const EMPLOYEE_SEARCH_DEBOUNCE: Duration = Duration::from_secs(2);

const DEFAULT_DELETE_WARNING: &str = "Không thể xóa bản ghi này";
const DEFAULT_LOAD_ERROR: &str = "Không thể tải dữ liệu";

/// What the caller should do after a search change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    FetchNow,
    /// Fetch once [`ListController::poll_due`] reports the deadline passed.
    Deferred(Instant),
}

/// A request issued for a snapshot of the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: ListQuery,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Response merged into the view.
    Applied,
    /// A newer response was already applied; this one was dropped.
    Stale,
    /// The server refused the operation with `success: false`.
    Rejected,
    Failed,
    Redirect(&'static str),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Toast-style message produced by a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Why a table has no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing has been created yet.
    NoData,
    /// Rows exist but the search or filters exclude them all.
    NoMatches,
}

#[derive(Debug)]
pub struct ListController<T> {
    resource: String,
    query: ListQuery,
    debounce: Option<Duration>,
    search_deadline: Option<Instant>,
    issued: u64,
    applied: u64,
    items: Vec<T>,
    /// Query the displayed rows were fetched with.
    shown_query: ListQuery,
    pagination: PaginationMeta,
    status: ViewStatus,
    notice: Option<Notice>,
}

impl<T> ListController<T> {
    /// Controller for `/api/<resource>` with immediate search.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            query: ListQuery::default(),
            debounce: None,
            search_deadline: None,
            issued: 0,
            applied: 0,
            items: Vec::new(),
            shown_query: ListQuery::default(),
            pagination: PaginationMeta::default(),
            status: ViewStatus::Idle,
            notice: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    pub fn customers() -> Self {
        Self::new("customers")
    }

    pub fn employees() -> Self {
        Self::new("employees").with_debounce(EMPLOYEE_SEARCH_DEBOUNCE)
    }

    pub fn quotations() -> Self {
        Self::new("quotations")
    }

    pub fn care_results() -> Self {
        Self::new("care-results")
    }

    pub fn reject_reasons() -> Self {
        Self::new("reject-reasons")
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> PaginationMeta {
        self.pagination
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Deadline of a debounced search that has not been fetched yet.
    pub fn pending_search(&self) -> Option<Instant> {
        self.search_deadline
    }

    /// Updates the search text and returns to the first page. With a
    /// debounce configured, every call pushes the deadline back.
    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) -> Trigger {
        self.query.search = text.into();
        self.query.page = 1;

        match self.debounce {
            None => {
                self.search_deadline = None;
                Trigger::FetchNow
            }
            Some(delay) => {
                let deadline = now + delay;
                self.search_deadline = Some(deadline);
                Trigger::Deferred(deadline)
            }
        }
    }

    /// `true` once a deferred search is due. Reports each deadline once.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.search_deadline {
            Some(deadline) if deadline <= now => {
                self.search_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Sets one filter dimension and returns to the first page. `"all"` or a
    /// blank value clears the dimension.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let changed = self.query.set_filter(key, value);
        let moved = self.query.page != 1;
        self.query.page = 1;
        changed || moved
    }

    /// Moves to page `page` if it exists; otherwise leaves the state alone.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.pagination.pages.max(1) {
            return false;
        }
        self.query.page = page;
        true
    }

    /// Snapshot of the current query for a new request. Without a token the
    /// view must go to the login page instead.
    pub fn begin_fetch(&mut self, tokens: &dyn TokenStore) -> Result<FetchTicket, Outcome> {
        let Some(token) = tokens.token() else {
            return Err(Outcome::Redirect(LOGIN_PATH));
        };

        self.issued += 1;
        self.search_deadline = None;
        self.status = ViewStatus::Loading;

        Ok(FetchTicket {
            seq: self.issued,
            query: self.query.clone(),
            token,
        })
    }

    /// Merges the response to `ticket`. Previous rows are kept on failure.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ApiResponse<Vec<T>>, ClientError>,
    ) -> Outcome {
        if ticket.seq <= self.applied {
            log::debug!(
                "Dropping stale {} response #{} (applied #{})",
                self.resource,
                ticket.seq,
                self.applied
            );
            return Outcome::Stale;
        }
        self.applied = ticket.seq;

        match result {
            Ok(response) if response.success => {
                let items = response.data.unwrap_or_default();
                let pagination = response.pagination.unwrap_or_else(|| {
                    PaginationMeta::new(items.len(), ticket.query.page, ticket.query.limit)
                });

                // The server clamps out-of-range pages; follow it unless the
                // user has already asked for something newer.
                if ticket.seq == self.issued {
                    self.query.page = pagination.page;
                }

                self.items = items;
                self.shown_query = ticket.query;
                self.pagination = pagination;
                self.status = ViewStatus::Ready;
                Outcome::Applied
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| DEFAULT_LOAD_ERROR.to_string());
                log::warn!("Loading {} was refused: {message}", self.resource);
                self.status = ViewStatus::Error(message);
                Outcome::Failed
            }
            Err(ClientError::Unauthorized) => {
                self.status = ViewStatus::Idle;
                Outcome::Redirect(LOGIN_PATH)
            }
            Err(err) => {
                log::error!("Loading {} failed: {err}", self.resource);
                self.status = ViewStatus::Error(err.to_string());
                Outcome::Failed
            }
        }
    }

    /// Rows were requested but none came back. Judged against the query of
    /// the rows on screen, not edits that have not been fetched yet.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.items.is_empty() || self.status != ViewStatus::Ready {
            return None;
        }
        if self.shown_query.is_unfiltered() {
            Some(EmptyState::NoData)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Page numbers for the pagination bar; `None` is a gap.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        page_links(self.pagination.pages, self.query.page)
    }

    /// Fetches the current query and applies the answer.
    pub async fn refresh<A>(&mut self, api: &A, tokens: &dyn TokenStore) -> Outcome
    where
        A: ListApi<T> + ?Sized,
    {
        let ticket = match self.begin_fetch(tokens) {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };

        let result = api.fetch(&self.resource, &ticket.query, &ticket.token).await;
        let outcome = self.apply(ticket, result);
        if matches!(outcome, Outcome::Redirect(_)) {
            tokens.clear();
        }
        outcome
    }

    /// Deletes row `id` and reloads the page. A refusal from the server
    /// becomes a warning notice and the rows stay as they are.
    pub async fn delete<A>(&mut self, api: &A, tokens: &dyn TokenStore, id: i32) -> Outcome
    where
        A: ListApi<T> + ?Sized,
    {
        let Some(token) = tokens.token() else {
            return Outcome::Redirect(LOGIN_PATH);
        };

        match api.delete(&self.resource, id, &token).await {
            Ok(response) if response.success => {
                self.notice = response
                    .message
                    .map(|message| Notice::new(NoticeLevel::Info, message));
                self.refresh(api, tokens).await
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| DEFAULT_DELETE_WARNING.to_string());
                log::info!("Delete of {} #{id} refused: {message}", self.resource);
                self.notice = Some(Notice::new(NoticeLevel::Warning, message));
                Outcome::Rejected
            }
            Err(ClientError::Unauthorized) => {
                tokens.clear();
                Outcome::Redirect(LOGIN_PATH)
            }
            Err(err) => {
                log::error!("Delete of {} #{id} failed: {err}", self.resource);
                self.notice = Some(Notice::new(NoticeLevel::Error, err.to_string()));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::client::session::MemoryTokenStore;
    use crate::pagination::offset;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i32,
        name: String,
    }

    fn rows(count: i32) -> Vec<Row> {
        (1..=count)
            .map(|id| Row {
                id,
                name: format!("Khách {id}"),
            })
            .collect()
    }

    /// In-memory resource that pages and searches like the API does.
    struct FakeApi {
        rows: Mutex<Vec<Row>>,
        delete_reply: Option<ApiResponse<()>>,
        fail_fetch: bool,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn with_rows(count: i32) -> Self {
            Self {
                rows: Mutex::new(rows(count)),
                delete_reply: None,
                fail_fetch: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn page(&self, query: &ListQuery) -> ApiResponse<Vec<Row>> {
            let all = self.rows.lock().unwrap();
            let matching: Vec<Row> = all
                .iter()
                .filter(|row| query.search_term().is_none_or(|term| row.name.contains(term)))
                .filter(|row| query.filter_value("status") != Some("inactive") || row.id < 0)
                .cloned()
                .collect();

            let pagination = PaginationMeta::new(matching.len(), query.page, query.limit);
            let items = matching
                .into_iter()
                .skip(offset(pagination.page, query.limit))
                .take(query.limit)
                .collect();
            ApiResponse::page(items, pagination)
        }
    }

    #[async_trait]
    impl ListApi<Row> for FakeApi {
        async fn fetch(
            &self,
            _resource: &str,
            query: &ListQuery,
            _token: &str,
        ) -> Result<ApiResponse<Vec<Row>>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch {
                return Err(ClientError::Transport("connection refused".to_string()));
            }
            Ok(self.page(query))
        }

        async fn delete(
            &self,
            _resource: &str,
            id: i32,
            _token: &str,
        ) -> Result<ApiResponse<()>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(reply) = &self.delete_reply {
                return Ok(reply.clone());
            }
            self.rows.lock().unwrap().retain(|row| row.id != id);
            Ok(ApiResponse::done("Đã xóa"))
        }
    }

    fn signed_in() -> MemoryTokenStore {
        MemoryTokenStore::with_token("token")
    }

    #[actix_web::test]
    async fn twenty_five_rows_give_three_pages_and_page_four_is_rejected() {
        let api = FakeApi::with_rows(25);
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        list.set_filter("status", "all");

        assert_eq!(list.refresh(&api, &tokens).await, Outcome::Applied);
        assert_eq!(list.pagination().pages, 3);
        assert_eq!(list.pagination().total, 25);
        assert_eq!(list.items().len(), 10);

        assert!(!list.set_page(4));
        assert!(!list.set_page(0));
        assert_eq!(list.query().page, 1);

        assert!(list.set_page(3));
        list.refresh(&api, &tokens).await;
        assert_eq!(list.items().len(), 5);
        assert_eq!(list.items()[0].id, 21);
    }

    #[actix_web::test]
    async fn filter_change_returns_to_first_page() {
        let api = FakeApi::with_rows(25);
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        list.refresh(&api, &tokens).await;
        assert!(list.set_page(2));

        assert!(list.set_filter("status", "active"));
        assert_eq!(list.query().page, 1);
        assert_eq!(list.query().filter_value("status"), Some("active"));

        list.set_page(2);
        assert!(list.set_filter("status", "all"));
        assert_eq!(list.query().page, 1);
        assert_eq!(list.query().filter_value("status"), None);
    }

    #[test]
    fn later_search_wins_when_earlier_response_arrives_last() {
        let api = FakeApi::with_rows(25);
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        let now = Instant::now();

        list.set_search("1", now);
        let first = list.begin_fetch(&tokens).unwrap();
        list.set_search("12", now);
        let second = list.begin_fetch(&tokens).unwrap();
        assert!(second.seq > first.seq);

        let second_response = api.page(&second.query);
        let first_response = api.page(&first.query);

        assert_eq!(list.apply(second, Ok(second_response)), Outcome::Applied);
        assert_eq!(list.apply(first, Ok(first_response)), Outcome::Stale);

        assert_eq!(list.query().search, "12");
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "Khách 12");
    }

    #[actix_web::test]
    async fn refused_delete_keeps_rows_and_warns() {
        let mut api = FakeApi::with_rows(3);
        api.delete_reply = Some(ApiResponse::failure(
            "Chỉ xóa được nhóm khi không còn kết quả chăm sóc",
        ));
        let tokens = signed_in();
        let mut list = ListController::<Row>::new("care-groups");
        list.refresh(&api, &tokens).await;
        let before = list.items().to_vec();

        assert_eq!(list.delete(&api, &tokens, 1).await, Outcome::Rejected);

        assert_eq!(list.items(), before.as_slice());
        assert_eq!(list.status(), &ViewStatus::Ready);
        let notice = list.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.starts_with("Chỉ xóa được nhóm khi không còn kết quả"));
    }

    #[actix_web::test]
    async fn successful_delete_reloads_rows() {
        let api = FakeApi::with_rows(3);
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        list.refresh(&api, &tokens).await;

        assert_eq!(list.delete(&api, &tokens, 2).await, Outcome::Applied);

        let ids: Vec<i32> = list.items().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(list.take_notice().unwrap().level, NoticeLevel::Info);
    }

    #[actix_web::test]
    async fn missing_token_redirects_without_request() {
        let api = FakeApi::with_rows(3);
        let tokens = MemoryTokenStore::new();
        let mut list = ListController::<Row>::customers();

        assert_eq!(list.refresh(&api, &tokens).await, Outcome::Redirect("/login"));
        assert_eq!(list.delete(&api, &tokens, 1).await, Outcome::Redirect("/login"));
        assert_eq!(api.calls(), 0);
    }

    #[actix_web::test]
    async fn transport_failure_keeps_previous_rows() {
        let mut api = FakeApi::with_rows(5);
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        list.refresh(&api, &tokens).await;

        api.fail_fetch = true;
        assert_eq!(list.refresh(&api, &tokens).await, Outcome::Failed);

        assert_eq!(list.items().len(), 5);
        assert!(matches!(list.status(), ViewStatus::Error(_)));
    }

    #[test]
    fn unauthorized_response_redirects() {
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        let ticket = list.begin_fetch(&tokens).unwrap();

        assert_eq!(
            list.apply(ticket, Err(ClientError::Unauthorized)),
            Outcome::Redirect("/login")
        );
    }

    #[test]
    fn server_clamped_page_is_adopted() {
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        let ticket = list.begin_fetch(&tokens).unwrap();
        list.apply(
            ticket,
            Ok(ApiResponse::page(rows(3), PaginationMeta::new(13, 1, 10))),
        );
        assert!(list.set_page(2));

        let ticket = list.begin_fetch(&tokens).unwrap();
        list.apply(
            ticket,
            Ok(ApiResponse::page(rows(1), PaginationMeta::new(1, 2, 10))),
        );

        assert_eq!(list.query().page, 1);
        assert_eq!(list.pagination().pages, 1);
    }

    #[actix_web::test]
    async fn empty_state_tells_filters_from_no_data() {
        let api = FakeApi::with_rows(0);
        let tokens = signed_in();
        let mut list = ListController::<Row>::customers();
        assert_eq!(list.empty_state(), None);

        list.refresh(&api, &tokens).await;
        assert_eq!(list.empty_state(), Some(EmptyState::NoData));

        let api = FakeApi::with_rows(4);
        list.set_filter("status", "inactive");
        list.refresh(&api, &tokens).await;
        assert_eq!(list.empty_state(), Some(EmptyState::NoMatches));
    }

    #[actix_web::test]
    async fn empty_state_ignores_unfetched_edits() {
        let api = FakeApi::with_rows(0);
        let tokens = signed_in();
        let mut list = ListController::<Row>::employees();
        list.refresh(&api, &tokens).await;
        assert_eq!(list.empty_state(), Some(EmptyState::NoData));

        list.set_search("lan", Instant::now());
        list.set_filter("status", "inactive");
        assert_eq!(list.empty_state(), Some(EmptyState::NoData));

        list.refresh(&api, &tokens).await;
        assert_eq!(list.empty_state(), Some(EmptyState::NoMatches));
    }

    #[test]
    fn fetch_cancels_pending_debounced_search() {
        let tokens = signed_in();
        let mut list = ListController::<Row>::employees();
        let start = Instant::now();

        list.set_search("an", start);
        assert!(list.pending_search().is_some());
        list.set_filter("position", "sales");
        let ticket = list.begin_fetch(&tokens).unwrap();

        assert_eq!(ticket.query.search, "an");
        assert_eq!(list.pending_search(), None);
        assert!(!list.poll_due(start + EMPLOYEE_SEARCH_DEBOUNCE));
    }

    #[test]
    fn debounced_search_reschedules_and_fires_once() {
        let mut list = ListController::<Row>::employees();
        let start = Instant::now();

        assert_eq!(
            list.set_search("an", start),
            Trigger::Deferred(start + EMPLOYEE_SEARCH_DEBOUNCE)
        );
        let later = start + Duration::from_secs(1);
        assert_eq!(
            list.set_search("anh", later),
            Trigger::Deferred(later + EMPLOYEE_SEARCH_DEBOUNCE)
        );

        assert!(!list.poll_due(start + EMPLOYEE_SEARCH_DEBOUNCE));
        assert!(list.poll_due(later + EMPLOYEE_SEARCH_DEBOUNCE));
        assert!(!list.poll_due(later + EMPLOYEE_SEARCH_DEBOUNCE));
        assert_eq!(list.query().search, "anh");
    }

    #[test]
    fn immediate_search_resets_page() {
        let mut list = ListController::<Row>::customers();
        list.pagination = PaginationMeta::new(30, 1, 10);
        list.set_page(3);

        assert_eq!(list.set_search("lan", Instant::now()), Trigger::FetchNow);
        assert_eq!(list.query().page, 1);
        assert_eq!(list.pending_search(), None);
    }

    #[test]
    fn page_links_follow_current_page() {
        let mut list = ListController::<Row>::customers();
        list.pagination = PaginationMeta::new(30, 1, 10);
        list.set_page(2);
        assert_eq!(list.page_links(), vec![Some(1), Some(2), Some(3)]);
    }
}
