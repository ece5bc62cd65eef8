//! Walking every page of a paginated listing

use std::collections::HashSet;
use std::future::Future;

use perx_domain::{
    Campaign, Category, LoyaltyTransaction, Merchant, PageCursor, PerxError, Result, Reward,
    Voucher,
};
use tracing::debug;

use crate::envelope::ListEnvelope;

/// Items with a provider id, used to detect overlapping pages.
pub trait Identified {
    fn id(&self) -> u64;
}

macro_rules! identified_by_id_field {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        })*
    };
}

identified_by_id_field!(Campaign, Category, LoyaltyTransaction, Merchant, Reward, Voucher);

/// Fetch pages starting at `first_page` until the provider reports no more.
///
/// The next page is `meta.next_page` when it moves forward, otherwise
/// `page + 1`; fetching stops once `meta.total_pages` is not greater than the
/// current page.
///
/// # Errors
/// The first fetch error, or `MalformedPayload` when two pages return the
/// same id.
pub async fn collect_all_pages<T, M, F, Fut>(first_page: u32, mut fetch: F) -> Result<Vec<T>>
where
    T: Identified,
    M: PageCursor,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<ListEnvelope<T, M>>>,
{
    let mut page = first_page.max(1);
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    loop {
        let envelope = fetch(page).await?;
        debug!(page, received = envelope.data.len(), "fetched page");
        for item in envelope.data {
            if !seen.insert(item.id()) {
                return Err(PerxError::malformed(format!(
                    "duplicate id {} across pages",
                    item.id()
                )));
            }
            items.push(item);
        }

        let Some(meta) = envelope.meta else { break };
        match meta.total_pages() {
            Some(total) if total > page => {
                page = meta.next_page().filter(|next| *next > page).unwrap_or(page + 1);
            }
            _ => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use perx_domain::PagingMeta;

    use super::*;
    use crate::envelope::{Envelope, ErrorFields};

    fn page_of(ids: &[u64], page: u32, total_pages: u32, next: Option<u32>) -> ListEnvelope<Category> {
        Envelope {
            data: ids.iter().map(|id| Category { id: *id, ..Default::default() }).collect(),
            meta: Some(PagingMeta {
                page: Some(page),
                total_pages: Some(total_pages),
                next_page: next,
                ..Default::default()
            }),
            errors: ErrorFields::default(),
        }
    }

    #[tokio::test]
    async fn collects_every_page_in_order() {
        let calls = AtomicUsize::new(0);
        let items = collect_all_pages(1, |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(match page {
                    1 => page_of(&[1, 2], 1, 3, Some(2)),
                    2 => page_of(&[3, 4], 2, 3, None),
                    _ => page_of(&[5], 3, 3, None),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn result_holds_exactly_total_count_items() {
        let total_count = 12u64;
        let items = collect_all_pages(1, |page| async move {
            let first = u64::from(page - 1) * 5 + 1;
            let last = (first + 4).min(total_count);
            let ids: Vec<u64> = (first..=last).collect();
            let next = (page < 3).then_some(page + 1);
            let mut envelope = page_of(&ids, page, 3, next);
            if let Some(meta) = envelope.meta.as_mut() {
                meta.total_count = Some(total_count);
                meta.size = Some(5);
            }
            Ok(envelope)
        })
        .await
        .unwrap();

        assert_eq!(items.len() as u64, total_count);
        let ids: Vec<u64> = items.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=total_count).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn backwards_next_page_falls_back_to_increment() {
        let calls = AtomicUsize::new(0);
        let items = collect_all_pages(1, |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(match page {
                    1 => page_of(&[1], 1, 2, Some(1)),
                    _ => page_of(&[2], 2, 2, None),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let err = collect_all_pages(1, |page| async move {
            Ok(match page {
                1 => page_of(&[1, 2], 1, 2, None),
                _ => page_of(&[2, 3], 2, 2, None),
            })
        })
        .await
        .unwrap_err();

        assert!(matches!(err, PerxError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn missing_meta_means_single_page() {
        let items = collect_all_pages(1, |_| async {
            Ok(ListEnvelope::<Category> {
                data: vec![Category { id: 9, ..Default::default() }],
                meta: None,
                errors: ErrorFields::default(),
            })
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 1);
    }
}
