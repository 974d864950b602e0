/// One page of a paginated listing.
///
/// `next` carries the continuation token for the following page; a page
/// without one is the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in this page, in listing order
    pub items: Vec<T>,

    /// Continuation token, absent on the final page
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A page followed by more results when `next` is present
    #[must_use]
    pub const fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }

    /// The final page of a listing
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}
