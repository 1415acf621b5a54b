// Cursor pagination over the `{ totalCount, hasMore, firstIndex, list }`
// envelope.

use std::future::Future;

use tracing::{debug, trace};

use crate::error::{Error, PartialList};
use crate::models::ListResponse;
use crate::query::ListOptions;

/// Fetch every page of a listing, starting at `options.index` (or 0).
///
/// Each request carries an explicit `index` and `listSize`; the domain scope
/// from `options` is kept on every page. `hasMore` alone decides whether
/// another page is requested, and the next cursor is `firstIndex + listSize`.
/// Pages are fetched strictly one after another.
///
/// When a page fails, everything gathered so far is handed back inside
/// [`PartialList`] alongside the error.
pub(crate) async fn collect_pages<T, F, Fut>(
    options: &ListOptions,
    fetch: F,
) -> Result<Vec<T>, PartialList<T>>
where
    F: Fn(ListOptions) -> Fut,
    Fut: Future<Output = Result<ListResponse<T>, Error>>,
{
    let page_size = u64::from(options.page_size());
    let mut items = Vec::new();
    let mut index = options.index.unwrap_or(0);

    loop {
        let page = match fetch(options.at(index)).await {
            Ok(page) => page,
            Err(error) => {
                debug!(index, collected = items.len(), "page fetch failed");
                return Err(PartialList { items, error });
            }
        };

        trace!(
            first_index = page.first_index,
            received = page.list.len(),
            total = page.total_count,
            has_more = page.has_more,
            "page received"
        );

        let has_more = page.has_more;
        let next = page.first_index.saturating_add(page_size);
        items.extend(page.list);

        if !has_more {
            break;
        }
        // Cursor never moves backwards, even if the controller echoes a stale firstIndex.
        index = next.max(index.saturating_add(page_size));
    }

    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn page(first_index: u64, len: u64, has_more: bool) -> ListResponse<u64> {
        ListResponse {
            total_count: 0,
            has_more,
            first_index,
            list: (first_index..first_index + len).collect(),
        }
    }

    #[tokio::test]
    async fn follows_has_more_until_false() {
        let seen = Mutex::new(Vec::new());
        let items = collect_pages(&ListOptions::new().with_list_size(10), |opts| {
            seen.lock().unwrap().push(opts.clone());
            let index = opts.index.unwrap();
            async move { Ok::<_, Error>(page(index, if index < 20 { 10 } else { 3 }, index < 20)) }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 23);
        let seen = seen.into_inner().unwrap();
        let cursors: Vec<_> = seen.iter().map(|o| o.index.unwrap()).collect();
        assert_eq!(cursors, vec![0, 10, 20]);
        assert!(seen.iter().all(|o| o.list_size == Some(10)));
    }

    #[tokio::test]
    async fn has_more_wins_over_short_page() {
        let calls = Mutex::new(0_u32);
        let items = collect_pages(&ListOptions::new(), |opts| {
            *calls.lock().unwrap() += 1;
            let index = opts.index.unwrap();
            async move { Ok::<_, Error>(page(index, 2, index == 0)) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![0, 1, 100, 101]);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn starts_at_requested_index() {
        let items = collect_pages(&ListOptions::new().with_index(40), |opts| {
            let index = opts.index.unwrap();
            async move { Ok::<_, Error>(page(index, 1, false)) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![40]);
    }

    #[tokio::test]
    async fn failure_keeps_earlier_pages() {
        let err = collect_pages(&ListOptions::new(), |opts| {
            let index = opts.index.unwrap();
            async move {
                if index == 0 {
                    Ok(page(0, 100, true))
                } else {
                    Err(Error::NotAuthenticated)
                }
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.items.len(), 100);
        assert!(matches!(err.error, Error::NotAuthenticated));
    }

    #[tokio::test]
    async fn stale_first_index_still_advances() {
        let seen = Mutex::new(Vec::new());
        let _ = collect_pages(&ListOptions::new().with_list_size(5), |opts| {
            let index = opts.index.unwrap();
            seen.lock().unwrap().push(index);
            async move { Ok::<_, Error>(page(0, 5, index < 10)) }
        })
        .await
        .unwrap();

        assert_eq!(seen.into_inner().unwrap(), vec![0, 5, 10]);
    }
}
