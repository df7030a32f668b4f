use futures::stream::{self, Stream};
use std::collections::VecDeque;
use tracing::debug;

use crate::error::ScoreError;
use crate::provider::{PageCursor, Review, ReviewProvider, ReviewUnit};

struct PagerState<'a, P: ?Sized> {
    provider: &'a P,
    unit: &'a ReviewUnit,
    cursor: Option<PageCursor>, // None once the feed is exhausted
    pending: VecDeque<Review>,
    counted: usize,
    limit: usize,
    pages: usize,
}

/// Lazily walk a unit's review feed, yielding only reviews that count
/// towards the score.
///
/// Stops after `limit` counted reviews without fetching another page, or when
/// a page carries no `next-page` link. Reviews that do not count are skipped
/// and do not use up the limit. Any fetch error ends the stream with that
/// error.
pub fn counted_reviews<'a, P>(
    provider: &'a P,
    unit: &'a ReviewUnit,
    limit: usize,
) -> impl Stream<Item = Result<Review, ScoreError>> + 'a
where
    P: ReviewProvider + ?Sized,
{
    let state = PagerState {
        provider,
        unit,
        cursor: Some(PageCursor::Start),
        pending: VecDeque::new(),
        counted: 0,
        limit,
        pages: 0,
    };

    stream::try_unfold(state, |state| next_review(state))
}

async fn next_review<'a, P>(
    mut state: PagerState<'a, P>,
) -> Result<Option<(Review, PagerState<'a, P>)>, ScoreError>
where
    P: ReviewProvider + ?Sized,
{
    loop {
        if state.counted >= state.limit {
            debug!(limit = state.limit, pages = state.pages, "Review limit reached");
            return Ok(None);
        }

        if let Some(review) = state.pending.pop_front() {
            state.counted += 1;
            return Ok(Some((review, state)));
        }

        let Some(cursor) = state.cursor.take() else {
            debug!(counted = state.counted, pages = state.pages, "Review feed exhausted");
            return Ok(None);
        };

        let page = state.provider.fetch_page(state.unit, &cursor).await?;
        state.pages += 1;
        debug!(
            page = state.pages,
            reviews = page.reviews.len(),
            has_next = page.next_page.is_some(),
            "Fetched review page"
        );

        state.pending = page
            .reviews
            .into_iter()
            .filter(|review| review.counts_towards_score)
            .collect();
        state.cursor = page.next_page.map(PageCursor::Next);
    }
}
