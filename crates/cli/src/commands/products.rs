//! Product commands.

use catalog_admin_client::store::ProductsAction;
use catalog_admin_client::{ClientConfig, Dashboard, Resource, SearchBox};
use catalog_admin_core::validation::ProductForm;
use catalog_admin_core::{CategoryId, ProductId, ProductRef};
use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use super::CliError;
use crate::output;

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products page by page
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Number of products to skip (page size is `CATALOG_PRODUCTS_PAGE_SIZE`)
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Keep loading pages until the server has no more
        #[arg(long)]
        all: bool,
    },
    /// Search products by title
    Search {
        /// Search text
        text: String,
    },
    /// Search interactively: read queries from stdin, one per line
    ///
    /// Lines typed in quick succession are debounced into a single search.
    /// A blank line clears the search and shows the first page again.
    Browse {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product by id or slug
    Show {
        /// Product id or slug
        product: String,
    },
    /// Create a product
    Create {
        /// Display name (at least 3 characters)
        #[arg(short, long)]
        name: String,

        /// Description (at least 10 characters)
        #[arg(short, long)]
        description: String,

        /// Price, e.g. 19.99
        #[arg(short, long)]
        price: String,

        /// Category id
        #[arg(short, long)]
        category: String,

        /// Image URL; repeat for several images
        #[arg(short, long = "image", required = true)]
        images: Vec<String>,
    },
    /// Update a product; omitted fields keep their current value
    Update {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        price: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Replace all images; repeat for several images
        #[arg(short, long = "image")]
        images: Vec<String>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

pub async fn run(
    dashboard: &Dashboard,
    config: &ClientConfig,
    action: ProductAction,
) -> Result<(), CliError> {
    match action {
        ProductAction::List {
            category,
            offset,
            all,
        } => {
            let category = category.map(CategoryId::new);
            let limit = config.products_page_size;
            dashboard
                .store()
                .dispatch(ProductsAction::SetCategoryFilter(category.clone()))
                .await;
            dashboard
                .fetch_products(offset, limit, category.as_ref())
                .await?;
            if all {
                while dashboard.load_more(Resource::Products).await? {}
            }
            let state = dashboard.store().read().await;
            output::products(&state.products.list.items);
            output::more_hint(&state.products.list);
        }
        ProductAction::Search { text } => {
            dashboard.search_products(&text).await?;
            let state = dashboard.store().read().await;
            output::products(&state.products.list.items);
        }
        ProductAction::Browse { category } => {
            browse(dashboard, category.map(CategoryId::new)).await?;
        }
        ProductAction::Show { product } => {
            let product = dashboard.get_product(&ProductRef::parse(&product)).await?;
            output::product(&product);
        }
        ProductAction::Create {
            name,
            description,
            price,
            category,
            images,
        } => {
            let form = ProductForm {
                name,
                description,
                price,
                category_id: category,
                images,
            };
            let product = dashboard.create_product(&form).await?;
            output::message(&format!(
                "Created product {} ({}, slug {})",
                product.name, product.id, product.slug
            ));
        }
        ProductAction::Update {
            id,
            name,
            description,
            price,
            category,
            images,
        } => {
            let id = ProductId::new(id);
            let current = dashboard.get_product(&ProductRef::Id(id.clone())).await?;
            let mut form = ProductForm::from_product(&current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(category) = category {
                form.category_id = category;
            }
            if !images.is_empty() {
                form.images = images;
            }
            let product = dashboard.update_product(&id, &form).await?;
            output::message(&format!("Updated product {}", product.id));
        }
        ProductAction::Delete { id } => {
            let id = ProductId::new(id);
            dashboard.delete_product(&id).await?;
            output::message(&format!("Deleted product {id}"));
        }
    }
    Ok(())
}

/// Feed stdin lines into a debounced search box and print each settled
/// result.
async fn browse(dashboard: &Dashboard, category: Option<CategoryId>) -> Result<(), CliError> {
    dashboard.filter_products(category).await?;
    print_list(dashboard).await;

    let mut search = SearchBox::new(dashboard.clone(), Resource::Products);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut render_at: Option<Instant> = None;

    loop {
        let deadline = render_at;
        let wake = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            line = lines.next_line() => {
                let Some(text) = line? else {
                    search.settle().await;
                    if render_at.is_some() {
                        print_list(dashboard).await;
                    }
                    return Ok(());
                };
                search.input(&text).await?;
                if text.trim().is_empty() {
                    render_at = None;
                    print_list(dashboard).await;
                } else {
                    render_at = Some(Instant::now() + search.delay());
                }
            }
            () = wake => {
                search.settle().await;
                render_at = None;
                print_list(dashboard).await;
            }
        }
    }
}

async fn print_list(dashboard: &Dashboard) {
    let state = dashboard.store().read().await;
    let list = &state.products.list;
    if let Some(error) = &list.error {
        output::message(&format!("Error: {error}"));
        return;
    }
    output::products(&list.items);
}
