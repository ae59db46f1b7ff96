/// Whether a screen pages on the server or slices a fully fetched row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationType {
    Server,
    Client,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// Page index, zero based.
    pub offset: usize,
    pub page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec {
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
