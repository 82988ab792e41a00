//! Products page: the store's menu items as a flat list.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::MenuItemId;
use foodia_core::flash::Flash;
use foodia_core::models::{Category, MenuItem};

use crate::db::{MenuRepository, OwnerMenu, RepositoryError};
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::models::products::{MISSING_FIELDS, ProductForm, ProductStats, ProductsQuery};
use crate::state::AppState;

use super::{NavView, current_store, redirect_with, render};

const PRODUCTS: &str = "/admin/products";

/// A product row.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_customizable: bool,
}

impl ProductView {
    fn new(item: &MenuItem, menu: &OwnerMenu) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category: menu.category_name(item.category_id).to_owned(),
            image_url: item.image_url.clone(),
            is_active: item.is_active,
            is_customizable: item.is_customizable,
        }
    }
}

/// Category choice for the filter and the product forms.
#[derive(Debug, Clone)]
pub struct CategoryChoice {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

fn category_choices(categories: &[Category], selected: Option<&Category>) -> Vec<CategoryChoice> {
    categories
        .iter()
        .map(|category| CategoryChoice {
            id: category.id.to_string(),
            name: category.name.clone(),
            selected: selected.is_some_and(|s| s.id == category.id),
        })
        .collect()
}

/// Products list template.
#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub nav: NavView,
    pub stats: ProductStats,
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryChoice>,
    pub filtering: bool,
}

/// Product edit form template.
#[derive(Template)]
#[template(path = "product_edit.html")]
pub struct ProductEditTemplate {
    pub nav: NavView,
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub is_customizable: bool,
    pub categories: Vec<CategoryChoice>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(index).post(create))
        .route("/admin/products/{id}/edit", get(edit))
        .route("/admin/products/{id}", post(update))
        .route("/admin/products/{id}/toggle", post(toggle))
        .route("/admin/products/{id}/delete", post(delete))
}

/// Products list, optionally filtered by category.
#[instrument(skip(account, state, session))]
pub async fn index(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductsQuery>,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let menu = MenuRepository::new(state.pool()).load(store.id).await?;

    let selected = query
        .category_id()
        .and_then(|id| menu.categories.iter().find(|c| c.id == id));

    let products = menu
        .items
        .iter()
        .filter(|item| selected.is_none_or(|c| item.category_id == c.id))
        .map(|item| ProductView::new(item, &menu))
        .collect();

    let template = ProductsTemplate {
        stats: ProductStats::new(&menu.items, &menu.categories),
        products,
        categories: category_choices(&menu.categories, selected),
        filtering: selected.is_some(),
        nav: NavView::new(&account, &store, &session, PRODUCTS).await,
    };
    Ok(render(&template))
}

/// Add a product.
#[instrument(skip(account, state, session, form))]
pub async fn create(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let Ok(draft) = form.validate() else {
        return Ok(redirect_with(&session, Flash::error("Error", MISSING_FIELDS), PRODUCTS).await);
    };

    let flash = match MenuRepository::new(state.pool()).create_item(store.id, &draft).await {
        Ok(item) => {
            tracing::info!(item_id = %item.id, "Product created");
            Flash::success("Success", "Product added successfully")
        }
        Err(RepositoryError::NotFound(_)) => Flash::error("Error", MISSING_FIELDS),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create product");
            Flash::error("Error", "Failed to add product")
        }
    };
    Ok(redirect_with(&session, flash, PRODUCTS).await)
}

/// Edit form for one product.
#[instrument(skip(account, state, session))]
pub async fn edit(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MenuItemId>,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let repo = MenuRepository::new(state.pool());
    let item = repo.get_item(store.id, id).await?;
    let menu = repo.load(store.id).await?;

    let selected = menu.categories.iter().find(|c| c.id == item.category_id);
    let template = ProductEditTemplate {
        id: item.id,
        name: item.name.clone(),
        description: item.description.clone(),
        price: item.price.to_input_value(),
        image_url: item.image_url.clone().unwrap_or_default(),
        is_customizable: item.is_customizable,
        categories: category_choices(&menu.categories, selected),
        nav: NavView::new(&account, &store, &session, PRODUCTS).await,
    };
    Ok(render(&template))
}

/// Save an edited product.
#[instrument(skip(account, state, session, form))]
pub async fn update(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MenuItemId>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;
    let edit_url = format!("{PRODUCTS}/{id}/edit");

    let Ok(draft) = form.validate() else {
        return Ok(redirect_with(&session, Flash::error("Error", MISSING_FIELDS), &edit_url).await);
    };

    let (flash, to) = match MenuRepository::new(state.pool())
        .update_item(store.id, id, &draft)
        .await
    {
        Ok(()) => (
            Flash::success("Success", "Product updated successfully"),
            PRODUCTS,
        ),
        Err(RepositoryError::NotFound(what)) => (
            Flash::error("Error", format!("{what} not found")),
            PRODUCTS,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update product");
            (
                Flash::error("Error", "Failed to update product"),
                edit_url.as_str(),
            )
        }
    };
    Ok(redirect_with(&session, flash, to).await)
}

/// Switch a product between active and inactive.
#[instrument(skip(account, state, session))]
pub async fn toggle(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MenuItemId>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool())
        .toggle_item_active(store.id, id)
        .await
    {
        Ok(true) => Flash::success("Success", "Product is now available to customers"),
        Ok(false) => Flash::success("Success", "Product hidden from customers"),
        Err(RepositoryError::NotFound(_)) => Flash::error("Error", "Product not found"),
        Err(e) => return Err(e.into()),
    };
    Ok(redirect_with(&session, flash, PRODUCTS).await)
}

/// Delete a product.
#[instrument(skip(account, state, session))]
pub async fn delete(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MenuItemId>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool()).delete_item(store.id, id).await {
        Ok(()) => Flash::success("Success", "Product deleted successfully"),
        Err(RepositoryError::NotFound(_)) => Flash::error("Error", "Product not found"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete product");
            Flash::error("Error", "Failed to delete product")
        }
    };
    Ok(redirect_with(&session, flash, PRODUCTS).await)
}

#[cfg(test)]
mod tests {
    use foodia_core::{CategoryId, Money, StoreId};

    use super::*;

    fn category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            store_id: StoreId::new(1),
            name: name.to_owned(),
            display_order: id,
        }
    }

    #[test]
    fn test_product_view_names_its_category() {
        let menu = OwnerMenu {
            categories: vec![category(1, "Salgados"), category(2, "Bebidas")],
            items: Vec::new(),
            options: Vec::new(),
        };
        let item = MenuItem {
            id: MenuItemId::new(9),
            category_id: CategoryId::new(2),
            name: "Guaraná".to_owned(),
            description: "Lata 350ml".to_owned(),
            price: Money::from_cents(500),
            image_url: None,
            is_customizable: false,
            is_active: false,
            display_order: 0,
        };

        let view = ProductView::new(&item, &menu);
        assert_eq!(view.category, "Bebidas");
        assert_eq!(view.price, "$5.00");
        assert!(!view.is_active);
    }

    #[test]
    fn test_category_choices_mark_selection() {
        let categories = vec![category(1, "Salgados"), category(2, "Bebidas")];
        let choices = category_choices(&categories, categories.get(1));
        assert_eq!(
            choices.iter().filter(|c| c.selected).map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["2"]
        );
        assert!(category_choices(&categories, None).iter().all(|c| !c.selected));
    }
}
