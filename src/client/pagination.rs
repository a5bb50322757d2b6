use std::collections::VecDeque;

use futures::stream::{self, Stream};
use serde::Serialize;
use serde_json::{Map, Value};

use super::StripeClient;
use crate::error::{ApiError, ApiResult};

/// Query parameters shared by every list endpoint.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    /// Resource-specific filters (`status`, `customer`, `ids`, ...).
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn starting_after(mut self, cursor: impl Into<String>) -> Self {
        self.starting_after = Some(cursor.into());
        self
    }

    pub fn ending_before(mut self, cursor: impl Into<String>) -> Self {
        self.ending_before = Some(cursor.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One page of a `{"object": "list", "data": [...], "has_more": bool}` response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub has_more: bool,
    /// Id of the last item; always `None` when `has_more` is false.
    pub next_cursor: Option<String>,
    /// Id of the first item, the cursor for `ending_before`; always `None` when
    /// `has_more` is false.
    pub prev_cursor: Option<String>,
}

impl Page {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        let Value::Object(mut map) = value else {
            return Err(ApiError::malformed("List response is not an object"));
        };

        match map.get("object").and_then(Value::as_str) {
            None | Some("list") => {}
            Some(other) => {
                return Err(ApiError::malformed(format!(
                    "Expected a list object, got {:?}",
                    other
                )))
            }
        }

        let items = match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(ApiError::malformed("List response has no data array")),
        };
        let has_more = map.get("has_more").and_then(Value::as_bool).unwrap_or(false);

        let (next_cursor, prev_cursor) = if has_more {
            let last = item_id(items.last()).ok_or_else(|| {
                ApiError::malformed("List has more items but its last item has no id")
            })?;
            let first = item_id(items.first()).ok_or_else(|| {
                ApiError::malformed("List has more items but its first item has no id")
            })?;
            (Some(last), Some(first))
        } else {
            (None, None)
        };

        Ok(Self {
            items,
            has_more,
            next_cursor,
            prev_cursor,
        })
    }
}

fn item_id(item: Option<&Value>) -> Option<String> {
    item.and_then(|item| item.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// `starting_after` the cursor, items in list order.
    Forward,
    /// `ending_before` the cursor, items yielded moving away from it.
    Backward,
}

impl Direction {
    fn of(params: &ListParams) -> Self {
        if params.ending_before.is_some() && params.starting_after.is_none() {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

/// Single-pass iterator over every item of a list endpoint.
///
/// Pages are fetched only when the buffer runs dry and the last page reported
/// `has_more`. A failed fetch leaves the iterator exactly as it was, so calling
/// [`ListIter::next`] again retries the same page.
///
/// When the params carry `ending_before` (and no `starting_after`) the iterator
/// pages backwards: each request uses `ending_before=<first id of the previous
/// page>` and items are yielded nearest-to-the-cursor first.
pub struct ListIter {
    client: StripeClient,
    path: String,
    params: ListParams,
    direction: Direction,
    buffer: VecDeque<Value>,
    has_more: bool,
    cursor: Option<String>,
}

impl ListIter {
    /// The first page is fetched on the first call to [`ListIter::next`].
    pub fn new(client: StripeClient, path: impl Into<String>, params: ListParams) -> Self {
        let direction = Direction::of(&params);
        let cursor = match direction {
            Direction::Forward => params.starting_after.clone(),
            Direction::Backward => params.ending_before.clone(),
        };
        Self {
            client,
            path: path.into(),
            params,
            direction,
            buffer: VecDeque::new(),
            has_more: true,
            cursor,
        }
    }

    /// Starts from a page the caller already fetched with `params`.
    pub fn from_page(
        client: StripeClient,
        path: impl Into<String>,
        params: ListParams,
        page: Page,
    ) -> Self {
        let mut iter = Self {
            client,
            direction: Direction::of(&params),
            path: path.into(),
            params,
            buffer: VecDeque::new(),
            has_more: false,
            cursor: None,
        };
        iter.absorb(page);
        iter
    }

    pub fn is_exhausted(&self) -> bool {
        !self.has_more && self.buffer.is_empty()
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub async fn next(&mut self) -> Option<ApiResult<Value>> {
        while self.buffer.is_empty() {
            if !self.has_more {
                return None;
            }
            if let Err(e) = self.fetch_next_page().await {
                return Some(Err(e));
            }
        }

        self.buffer.pop_front().map(Ok)
    }

    /// Drains the iterator, failing on the first page fetch that fails.
    pub async fn collect_all(mut self) -> ApiResult<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    pub fn into_stream(self) -> impl Stream<Item = ApiResult<Value>> {
        stream::unfold(self, |mut iter| async move {
            iter.next().await.map(|item| (item, iter))
        })
    }

    async fn fetch_next_page(&mut self) -> ApiResult<()> {
        let mut query = self.params.clone();
        if let Some(cursor) = &self.cursor {
            match self.direction {
                Direction::Forward => {
                    query.starting_after = Some(cursor.clone());
                    query.ending_before = None;
                }
                Direction::Backward => {
                    query.ending_before = Some(cursor.clone());
                    query.starting_after = None;
                }
            }
        }

        tracing::debug!(
            path = %self.path,
            direction = ?self.direction,
            cursor = self.cursor.as_deref().unwrap_or_default(),
            "Fetching list page"
        );

        let value = self.client.get(&self.path, &query).await?;
        let page = Page::from_value(value)?;

        self.absorb(page);
        Ok(())
    }

    fn absorb(&mut self, page: Page) {
        self.has_more = page.has_more;
        match self.direction {
            Direction::Forward => {
                self.buffer.extend(page.items);
                self.cursor = page.next_cursor;
            }
            Direction::Backward => {
                self.buffer.extend(page.items.into_iter().rev());
                self.cursor = page.prev_cursor;
            }
        }
    }
}
