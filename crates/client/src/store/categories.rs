//! Categories slice.

use catalog_admin_core::{Category, CategoryId, Page};
use tracing::debug;

use super::Phase;
use super::collection::{Collection, Ticket};

/// Categories slice actions.
#[derive(Debug, Clone)]
pub enum CategoriesAction {
    /// Paginated list fetch.
    Fetch {
        ticket: Ticket,
        phase: Phase<Page<Category>>,
    },
    /// Name search.
    Search {
        ticket: Ticket,
        phase: Phase<Vec<Category>>,
    },
    /// Single category lookup.
    Get(Phase<Category>),
    /// Category creation.
    Create(Phase<Category>),
    /// Category update.
    Update(Phase<Category>),
    /// Category deletion, fulfilled with the deleted id.
    Delete(Phase<CategoryId>),
    /// Record the search box contents.
    SetSearchQuery(String),
    /// Close the detail view.
    ClearSelected,
    /// Empty the cache and rewind pagination.
    Reset,
}

impl CategoriesAction {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "categories/fetch",
            Self::Search { .. } => "categories/search",
            Self::Get(_) => "categories/get",
            Self::Create(_) => "categories/create",
            Self::Update(_) => "categories/update",
            Self::Delete(_) => "categories/delete",
            Self::SetSearchQuery(_) => "categories/setSearchQuery",
            Self::ClearSelected => "categories/clearSelected",
            Self::Reset => "categories/reset",
        }
    }

    pub(crate) const fn phase(&self) -> Option<&'static str> {
        match self {
            Self::Fetch { phase, .. } => Some(phase.label()),
            Self::Search { phase, .. } => Some(phase.label()),
            Self::Get(phase) | Self::Create(phase) | Self::Update(phase) => Some(phase.label()),
            Self::Delete(phase) => Some(phase.label()),
            Self::SetSearchQuery(_) | Self::ClearSelected | Self::Reset => None,
        }
    }
}

/// Cached categories.
#[derive(Debug, Clone)]
pub struct CategoriesState {
    /// Category list, selection and request status.
    pub list: Collection<Category>,
    /// Current search box contents.
    pub search_query: String,
}

impl CategoriesState {
    /// Empty slice paging `limit` categories at a time.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            list: Collection::new(limit),
            search_query: String::new(),
        }
    }

    /// Apply an action. Returns `false` when a stale list response was dropped.
    pub fn reduce(&mut self, action: CategoriesAction) -> bool {
        match action {
            CategoriesAction::Fetch { ticket, phase } => {
                if !self.list.is_current(ticket) {
                    debug!(%ticket, "Discarding stale category list response");
                    return false;
                }
                self.list
                    .apply(phase, "Failed to fetch categories", Collection::merge_page);
            }
            CategoriesAction::Search { ticket, phase } => {
                if !self.list.is_current(ticket) {
                    debug!(%ticket, "Discarding stale category search response");
                    return false;
                }
                self.list.apply(
                    phase,
                    "Failed to search categories",
                    Collection::replace_with_search,
                );
            }
            CategoriesAction::Get(phase) => {
                self.list
                    .apply(phase, "Failed to fetch category", Collection::select);
            }
            CategoriesAction::Create(phase) => {
                self.list
                    .apply(phase, "Failed to create category", Collection::prepend);
            }
            CategoriesAction::Update(phase) => {
                self.list
                    .apply(phase, "Failed to update category", Collection::replace);
            }
            CategoriesAction::Delete(phase) => {
                self.list
                    .apply(phase, "Failed to delete category", |list, id| list.remove(&id));
            }
            CategoriesAction::SetSearchQuery(query) => self.search_query = query,
            CategoriesAction::ClearSelected => self.list.clear_selected(),
            CategoriesAction::Reset => self.list.reset(),
        }
        true
    }
}
