mod actor_framework;
mod app_system;
mod auth_actor;
mod catalog;
mod clients;
mod config;
mod domain;
mod messages;
mod persistence;
mod product_actor;
mod visibility;

#[cfg(test)]
mod mock_framework;

use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, StorefrontSystem};
use crate::catalog::{category_options, QueryParameters, SortDirection, SortKey};
use crate::config::StorefrontConfig;
use crate::domain::{ProductForm, ProductPatch, CATALOG_CATEGORIES};
use crate::product_actor::CatalogError;
use crate::visibility::{
    mouse_parallax, parallax_offset, typewriter_frame, RegionGeometry, ScrollDirectionTracker,
    Viewport, VisibilityOptions, VisibilityTracker, DEFAULT_MOUSE_INTENSITY,
    DEFAULT_PARALLAX_SPEED, DEFAULT_TYPEWRITER_SPEED,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    info!(page_size = config.page_size.get(), "Starting storefront catalog");

    let system = StorefrontSystem::new(&config).context("failed to start storefront")?;
    let catalog = system.catalog_client.clone();
    let auth = system.auth_client.clone();

    // Sign in as the demo admin before touching the catalog
    let span = tracing::info_span!("admin_session");
    let admin = async {
        info!("Signing in");
        auth.login("admin@luxora.com".into(), "admin123".into()).await
    }
    .instrument(span)
    .await?;
    info!(user_name = %admin.name, is_admin = admin.is_admin(), "Signed in");
    let session = auth.current_user().await?;
    info!(session_email = ?session.map(|user| user.email), "Active session");

    let span = tracing::info_span!("catalog_admin");
    async {
        let lamp = catalog
            .add_product(ProductForm {
                name: "Rattan Table Lamp".into(),
                description: "Hand-woven rattan shade on an oak base.".into(),
                price: 149.0,
                category: "Lighting".into(),
                image: "https://images.example.com/rattan-lamp.jpg".into(),
                stock: 4,
                featured: Some(true),
            })
            .await?;

        if let Err(CatalogError::Validation(errors)) =
            catalog.add_product(ProductForm::default()).await
        {
            warn!(
                fields = errors.len(),
                name = errors.get("name").unwrap_or_default(),
                %errors,
                "Rejected empty product form"
            );
        }

        catalog
            .update_product(
                lamp.id,
                ProductPatch {
                    stock: Some(14),
                    ..Default::default()
                },
            )
            .await?;
        if let Some(restocked) = catalog.get_product(lamp.id).await? {
            info!(product_id = restocked.id, stock = restocked.stock, "Restocked");
        }

        let stats = catalog.dashboard_stats().await?;
        info!(
            total_products = stats.total_products,
            categories = stats.category_count(),
            featured = stats.featured_count,
            low_stock = stats.low_stock_items.len(),
            "Dashboard"
        );
        let unstocked: Vec<&str> = CATALOG_CATEGORIES
            .iter()
            .copied()
            .filter(|category| !stats.categories.contains_key(*category))
            .collect();
        info!(?unstocked, "Form categories without products");

        let params = QueryParameters::with_page_size(config.page_size)
            .in_category("Lighting")
            .sort_by(SortKey::Price, SortDirection::Descending);
        let result = catalog.query_products(&params).await?;
        for product in &result.page {
            info!(name = %product.name, price = product.price, "Lighting, most expensive first");
        }
        let cheapest_first = params
            .clone()
            .sort_by(params.sort_key, params.sort_direction.toggled());
        let cheapest = catalog.query_products(&cheapest_first).await?;
        if let Some(product) = cheapest.page.first() {
            info!(name = %product.name, price = product.price, "Cheapest lighting");
        }

        let ceramics = catalog
            .query_products(&QueryParameters::with_page_size(config.page_size).search("ceramic"))
            .await?;
        info!(matches = ceramics.total_matched, "Search for ceramic");

        let featured = catalog
            .query_products(&QueryParameters::with_page_size(config.page_size).featured_only(true))
            .await?;
        info!(featured = featured.total_matched, "Featured collection");

        let snapshot = catalog.list_products().await?;
        info!(options = ?category_options(&snapshot), "Category filter");

        let stale = params.page(NonZeroUsize::MIN.saturating_add(4));
        let beyond = catalog.query_products(&stale).await?;
        info!(
            page = stale.page_number.get(),
            total_pages = beyond.total_pages,
            items = beyond.page.len(),
            "Requested page past the end"
        );
        let snapped = stale.clamped_to(beyond.total_pages);
        let last_page = catalog.query_products(&snapped).await?;
        info!(
            page = snapped.page_number.get(),
            items = last_page.page.len(),
            "Snapped back to the last page"
        );

        catalog.delete_product(lamp.id).await?;
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    auth.logout().await?;
    info!(signed_in = auth.current_user().await?.is_some(), "Signed out");

    // Drive the landing-page animations through a short scroll
    let span = tracing::info_span!("landing_scroll");
    async {
        let tracker = VisibilityTracker::new();
        let hero = tracker.observe(VisibilityOptions::default());
        let products = tracker.observe(VisibilityOptions::with_threshold(0.2));
        let viewport = Viewport::new(0.0, 900.0);
        hero.mount(RegionGeometry::new(0.0, 900.0), viewport);
        products.mount(RegionGeometry::new(1200.0, 1600.0), viewport);

        let mut direction = ScrollDirectionTracker::new();
        for scroll_y in [0.0, 250.0, 600.0, 900.0, 400.0] {
            let viewport = Viewport::new(scroll_y, 900.0);
            let changes = tracker.on_scroll(viewport);
            for change in &changes {
                let region = if change.region == hero.id() { "hero" } else { "products" };
                info!(region, state = ?change.state, "Region visibility changed");
            }
            let heading = direction.update(scroll_y);
            info!(
                scroll_y,
                direction = ?heading,
                parallax = parallax_offset(scroll_y, DEFAULT_PARALLAX_SPEED),
                products_progress = products.progress(),
                changes = changes.len(),
                "Scroll tick"
            );
        }
        let tilt = mouse_parallax((960.0, 300.0), (1440.0, 900.0), DEFAULT_MOUSE_INTENSITY);
        info!(x = tilt.x, y = tilt.y, "Hero pointer tilt");

        let elapsed = Duration::from_millis(900);
        let (headline, typed) = typewriter_frame("Curated Luxury", elapsed, DEFAULT_TYPEWRITER_SPEED);
        info!(headline, typed, "Hero headline");

        info!(
            hero_visible = hero.is_visible(),
            hero_observing = hero.is_observing(),
            products_visible = products.is_visible(),
            direction = ?direction.direction(),
            regions = tracker.tracked_regions(),
            "Scroll finished"
        );
    }
    .instrument(span)
    .await;

    drop(catalog);
    drop(auth);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
