//! Category commands.

use catalog_admin_client::{ClientConfig, Dashboard, Resource};
use catalog_admin_core::CategoryId;
use catalog_admin_core::validation::CategoryForm;
use clap::Subcommand;

use super::CliError;
use crate::output;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories page by page
    List {
        /// Number of categories to skip (page size is `CATALOG_CATEGORIES_PAGE_SIZE`)
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Keep loading pages until the server has no more
        #[arg(long)]
        all: bool,
    },
    /// Search categories by name
    Search {
        /// Search text
        text: String,
    },
    /// Show one category
    Show {
        /// Category id
        id: String,
    },
    /// Create a category
    Create {
        /// Display name (at least 3 characters)
        #[arg(short, long)]
        name: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Image URL (http or https)
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Update a category; omitted fields keep their current value
    Update {
        /// Category id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        image: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category id
        id: String,
    },
}

pub async fn run(
    dashboard: &Dashboard,
    config: &ClientConfig,
    action: CategoryAction,
) -> Result<(), CliError> {
    match action {
        CategoryAction::List { offset, all } => {
            dashboard
                .fetch_categories(offset, config.categories_page_size)
                .await?;
            if all {
                while dashboard.load_more(Resource::Categories).await? {}
            }
            let state = dashboard.store().read().await;
            output::categories(&state.categories.list.items);
            output::more_hint(&state.categories.list);
        }
        CategoryAction::Search { text } => {
            dashboard.search_categories(&text).await?;
            let state = dashboard.store().read().await;
            output::categories(&state.categories.list.items);
        }
        CategoryAction::Show { id } => {
            let category = dashboard.get_category(&CategoryId::new(id)).await?;
            output::category(&category);
        }
        CategoryAction::Create {
            name,
            description,
            image,
        } => {
            let form = CategoryForm {
                name,
                description: description.unwrap_or_default(),
                image: image.unwrap_or_default(),
            };
            let category = dashboard.create_category(&form).await?;
            output::message(&format!(
                "Created category {} ({})",
                category.name, category.id
            ));
        }
        CategoryAction::Update {
            id,
            name,
            description,
            image,
        } => {
            let id = CategoryId::new(id);
            let current = dashboard.get_category(&id).await?;
            let form = CategoryForm {
                name: name.unwrap_or(current.name),
                description: description.or(current.description).unwrap_or_default(),
                image: image.or(current.image).unwrap_or_default(),
            };
            let category = dashboard.update_category(&id, &form).await?;
            output::message(&format!("Updated category {}", category.id));
        }
        CategoryAction::Delete { id } => {
            let id = CategoryId::new(id);
            dashboard.delete_category(&id).await?;
            output::message(&format!("Deleted category {id}"));
        }
    }
    Ok(())
}
