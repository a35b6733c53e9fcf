//! `products list | add | set-quantity`.

use stockroom_client::views::{AddProductForm, ProductTable, StockStatus};
use stockroom_core::ProductId;

use super::context::{ClientContext, FrontendError, report_form_errors};

/// Print one page of the catalog, optionally narrowed by a search term.
///
/// # Errors
///
/// Returns `FrontendError` when not logged in or the request fails.
#[allow(clippy::print_stdout)]
pub async fn list(
    ctx: &ClientContext,
    page: u32,
    limit: u32,
    search: Option<String>,
) -> Result<(), FrontendError> {
    let client = ctx.authenticated()?;
    let mut table = ProductTable::new(ctx.check(client.list_products(page, limit).await)?);
    if let Some(search) = search {
        table.set_search(search);
    }

    let rows = table.visible();
    if rows.is_empty() {
        println!("No products found.");
    } else {
        println!(
            "{:>5}  {:<36} {:<20} {:<16} {:>6} {:>10}  Status",
            "ID", "Name", "SKU", "Type", "Qty", "Price"
        );
        for product in rows {
            println!(
                "{:>5}  {:<36} {:<20} {:<16} {:>6} {:>10}  {}",
                product.id.as_i32(),
                product.name,
                product.sku,
                product.product_type.label(),
                product.quantity.get(),
                product.price.to_string(),
                StockStatus::classify(product.quantity)
            );
        }
    }

    if let Some((first, last)) = table.showing_range() {
        println!(
            "\nShowing {first} to {last} of {} (page {} of {})",
            table.total(),
            table.page(),
            table.total_pages()
        );
    }
    Ok(())
}

/// Validate the form locally, then create the product.
///
/// # Errors
///
/// Returns `FrontendError::Form` when local checks fail, otherwise any
/// server or transport failure.
#[allow(clippy::print_stdout)]
pub async fn add(ctx: &ClientContext, form: AddProductForm) -> Result<(), FrontendError> {
    let draft = form.validate().map_err(|e| report_form_errors(&e))?;

    let client = ctx.authenticated()?;
    let created = ctx.check(client.create_product(&draft).await)?;

    println!("{} (id {})", created.message, created.id);
    Ok(())
}

/// Replace a product's stock level.
///
/// # Errors
///
/// Returns `FrontendError` when not logged in or the server rejects the update.
#[allow(clippy::print_stdout)]
pub async fn set_quantity(
    ctx: &ClientContext,
    id: ProductId,
    quantity: i64,
) -> Result<(), FrontendError> {
    let client = ctx.authenticated()?;
    let updated = ctx.check(client.update_quantity(id, quantity).await)?;

    println!(
        "{}: {} now has {} ({})",
        updated.message,
        updated.product.name,
        updated.product.quantity,
        StockStatus::classify(updated.product.quantity)
    );
    Ok(())
}
