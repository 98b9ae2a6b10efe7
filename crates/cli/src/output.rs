//! Terminal rendering for command results.

#![allow(clippy::print_stdout)]

use catalog_admin_client::store::selectors::DashboardStats;
use catalog_admin_client::store::Collection;
use catalog_admin_core::{Category, Entity, Product};

const NAME_WIDTH: usize = 32;

pub fn categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    println!("{:<8} {:<NAME_WIDTH$} DESCRIPTION", "ID", "NAME");
    for category in categories {
        println!(
            "{:<8} {:<NAME_WIDTH$} {}",
            category.id,
            clip(&category.name),
            category.description.as_deref().unwrap_or("-")
        );
    }
}

pub fn category(category: &Category) {
    println!("ID:          {}", category.id);
    println!("Name:        {}", category.name);
    println!(
        "Description: {}",
        category.description.as_deref().unwrap_or("-")
    );
    println!("Image:       {}", category.image.as_deref().unwrap_or("-"));
    if let Some(created) = category.created_at {
        println!("Created:     {}", created.format("%Y-%m-%d %H:%M"));
    }
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    println!(
        "{:<8} {:<NAME_WIDTH$} {:>10}  CATEGORY",
        "ID", "NAME", "PRICE"
    );
    for product in products {
        println!(
            "{:<8} {:<NAME_WIDTH$} {:>10}  {}",
            product.id,
            clip(&product.name),
            format!("${}", product.price),
            product.category.as_ref().map_or("-", |c| c.name.as_str())
        );
    }
}

pub fn product(product: &Product) {
    println!("ID:          {}", product.id);
    println!("Slug:        {}", product.slug);
    println!("Name:        {}", product.name);
    println!("Price:       ${}", product.price);
    match (&product.category, product.category_id()) {
        (Some(category), _) => println!("Category:    {} ({})", category.name, category.id),
        (None, Some(id)) => println!("Category:    {id}"),
        (None, None) => println!("Category:    -"),
    }
    println!("Description: {}", product.description);
    for (i, image) in product.images.iter().enumerate() {
        println!("Image {}:     {image}", i + 1);
    }
}

/// A trailing hint when more pages can be loaded.
pub fn more_hint<T: Entity>(list: &Collection<T>) {
    if list.can_load_more() {
        println!(
            "\nShowing {} loaded. More available: --offset {} (or --all)",
            list.items.len(),
            list.cursor.next_offset()
        );
    }
}

pub fn stats(stats: &DashboardStats) {
    println!("Products:      {}", stats.total_products);
    println!("Categories:    {}", stats.total_categories);
    println!("Average price: ${}", stats.average_price);

    if !stats.category_counts.is_empty() {
        println!("\nProducts per category:");
        for count in &stats.category_counts {
            println!("  {:<NAME_WIDTH$} {:>6}", clip(&count.name), count.count);
        }
    }

    if !stats.recent_products.is_empty() {
        println!("\nRecent products:");
        for product in &stats.recent_products {
            println!("  {:<NAME_WIDTH$} {:>10}", clip(&product.name), format!("${}", product.price));
        }
    }
}

pub fn message(text: &str) {
    println!("{text}");
}

fn clip(text: &str) -> String {
    if text.chars().count() <= NAME_WIDTH {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(NAME_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
