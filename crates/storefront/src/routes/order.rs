//! Customer ordering page, session cart, and checkout.
//!
//! Every cart form posts the store slug along with it and redirects back to
//! `/order?store=<slug>`. Outcomes are reported through a flash notice on the
//! next render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::cart::{self, Cart, CartLine, SelectedOption};
use foodia_core::flash::Flash;
use foodia_core::menu::{MenuEntry, MenuSection};
use foodia_core::models::Store;
use foodia_core::order::OrderDraft;
use foodia_core::{CustomOptionId, MenuItemId, StoreSlug};

use crate::db::{MenuRepository, OrderRepository, StoreRepository};
use crate::error::{AppError, Result};
use crate::models::session;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Store header display data.
#[derive(Clone)]
pub struct StoreView {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub primary_color: String,
    pub button_color: String,
    pub language: &'static str,
    pub gamified: bool,
}

impl From<&Store> for StoreView {
    fn from(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            slug: store
                .store_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            description: store.description.clone(),
            logo_url: store.logo_url.clone(),
            banner_url: store.banner_url.clone(),
            primary_color: store.primary_color.to_string(),
            button_color: store.button_color.to_string(),
            language: store.language.code(),
            gamified: store.gamified_ordering,
        }
    }
}

/// A selectable option.
#[derive(Clone)]
pub struct OptionView {
    pub id: String,
    pub name: String,
    /// `+$1.50`, or `None` when the option is free.
    pub extra: Option<String>,
}

/// Options sharing a group label.
#[derive(Clone)]
pub struct OptionGroupView {
    pub label: String,
    pub options: Vec<OptionView>,
}

/// A menu item card.
#[derive(Clone)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
    pub points: u32,
    pub groups: Vec<OptionGroupView>,
}

impl From<&MenuEntry> for ItemView {
    fn from(entry: &MenuEntry) -> Self {
        Self {
            id: entry.item.id.to_string(),
            name: entry.item.name.clone(),
            description: entry.item.description.clone(),
            price: entry.item.price.to_string(),
            image_url: entry.item.image_url.clone(),
            points: entry.item.price.whole_units(),
            groups: entry
                .option_groups
                .iter()
                .map(|group| OptionGroupView {
                    label: group.label.clone(),
                    options: group
                        .options
                        .iter()
                        .map(|option| OptionView {
                            id: option.id.to_string(),
                            name: option.option_name.clone(),
                            extra: option
                                .extra_cost
                                .is_positive()
                                .then(|| format!("+{}", option.extra_cost)),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// A menu category with its items.
#[derive(Clone)]
pub struct SectionView {
    pub name: String,
    pub items: Vec<ItemView>,
}

impl From<&MenuSection> for SectionView {
    fn from(section: &MenuSection) -> Self {
        Self {
            name: section.category.name.clone(),
            items: section.entries.iter().map(ItemView::from).collect(),
        }
    }
}

/// A cart row.
#[derive(Clone)]
pub struct CartLineView {
    pub index: usize,
    pub name: String,
    pub options: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl CartLineView {
    fn new(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            name: line.name.clone(),
            options: line.options_summary(),
            quantity: line.quantity,
            unit_price: line.unit_total().to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
    pub points: u32,
    pub level: u32,
    pub points_to_next_level: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let points = cart.points();
        Self {
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView::new(index, line))
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
            points,
            level: cart::reward_level(points),
            points_to_next_level: cart::points_to_next_level(points),
        }
    }
}

/// Ordering page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/show.html")]
pub struct OrderTemplate {
    pub store: StoreView,
    pub sections: Vec<SectionView>,
    pub cart: CartView,
    pub flash: Option<Flash>,
    pub add_label: &'static str,
}

// =============================================================================
// Forms
// =============================================================================

/// Query string of the ordering page.
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub store: Option<String>,
}

/// Add-to-cart form.
///
/// Option checkboxes repeat the `option` field, so this is parsed from raw
/// pairs rather than derived.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddToCartForm {
    pub store: String,
    pub item_id: Option<MenuItemId>,
    pub options: Vec<CustomOptionId>,
}

impl AddToCartForm {
    /// Parse the submitted pairs.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a non-numeric item or option id.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "store" => form.store.clone_from(value),
                "item_id" => {
                    form.item_id = Some(value.parse().map_err(|_| {
                        AppError::BadRequest(format!("invalid item id: {value}"))
                    })?);
                }
                "option" => form.options.push(value.parse().map_err(|_| {
                    AppError::BadRequest(format!("invalid option id: {value}"))
                })?),
                _ => {}
            }
        }
        Ok(form)
    }
}

/// Quantity change form.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub store: String,
    pub line: usize,
    pub delta: i32,
}

/// Line removal form.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub store: String,
    pub line: usize,
}

/// Checkout form.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub store: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn store_not_found() -> AppError {
    AppError::NotFound("Store not found. Check the link you were given.".to_string())
}

/// URL of a store's ordering page.
#[must_use]
pub fn order_url(slug: &StoreSlug) -> String {
    format!("/order?store={slug}")
}

/// Resolve a submitted slug to a published store.
async fn find_store(state: &AppState, raw_slug: &str) -> Result<(Store, StoreSlug)> {
    let slug = StoreSlug::parse(raw_slug).map_err(|_| store_not_found())?;
    let store = StoreRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(store_not_found)?;
    Ok((store, slug))
}

/// Flash for a successful add.
fn added_flash(store: &Store, item_name: &str, points: u32) -> Flash {
    if store.gamified_ordering {
        Flash::success(
            format!("🎉 Item added! +{points} points earned!"),
            format!("{item_name} joined your combo."),
        )
    } else {
        Flash::success("Added to cart", format!("{item_name} was added to your cart."))
    }
}

/// Flash for a placed order.
fn placed_flash(store: &Store, order_number: &str, points: u32) -> Flash {
    if store.gamified_ordering {
        Flash::success(
            format!("🏆 Order completed! You earned {points} points total!"),
            format!("Order {order_number} was sent to {}.", store.name),
        )
    } else {
        Flash::success(
            "Order placed!",
            format!("Order {order_number} was sent to {}.", store.name),
        )
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display a published store's menu with the visitor's cart.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrderQuery>,
) -> Result<Response> {
    let raw_slug = query
        .store
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(store_not_found)?;
    let (store, _) = find_store(&state, raw_slug).await?;

    let menu = MenuRepository::new(state.pool()).for_store(store.id).await?;
    let cart = session::load_cart(&session, store.id).await?;
    let flash = session::take_flash(&session).await;

    Ok(OrderTemplate {
        store: StoreView::from(&store),
        sections: menu.sections().iter().map(SectionView::from).collect(),
        cart: CartView::from(&cart),
        flash,
        add_label: if store.gamified_ordering {
            "Add to combo"
        } else {
            "Add to cart"
        },
    }
    .into_response())
}

/// Add an item to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = AddToCartForm::from_pairs(&pairs)?;
    let (store, slug) = find_store(&state, &form.store).await?;
    let item_id = form
        .item_id
        .ok_or_else(|| AppError::BadRequest("missing item id".to_string()))?;

    let menu = MenuRepository::new(state.pool()).for_store(store.id).await?;
    let Some(item) = menu.item(item_id) else {
        session::set_flash(
            &session,
            Flash::error("Item unavailable", "That item is no longer on the menu."),
        )
        .await;
        return Ok(Redirect::to(&order_url(&slug)));
    };

    let options = if item.is_customizable {
        SelectedOption::resolve(&menu.options_for(item.id), &form.options)
    } else {
        Ok(Vec::new())
    };

    let mut cart = session::load_cart(&session, store.id).await?;
    match options.and_then(|options| cart.add(item, options)) {
        Ok(quantity) => {
            session::save_cart(&session, store.id, &cart).await?;
            tracing::debug!(item_id = %item.id, quantity, "Added to cart");
            let flash = added_flash(&store, &item.name, item.price.whole_units());
            session::set_flash(&session, flash).await;
        }
        Err(e) => {
            session::set_flash(&session, Flash::error("Could not add item", e.to_string())).await;
        }
    }

    Ok(Redirect::to(&order_url(&slug)))
}

/// Change the quantity of a cart line by `delta`.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let (store, slug) = find_store(&state, &form.store).await?;
    let mut cart = session::load_cart(&session, store.id).await?;

    match cart.adjust(form.line, form.delta) {
        Ok(()) => session::save_cart(&session, store.id, &cart).await?,
        Err(e) => {
            session::set_flash(&session, Flash::error("Cart not updated", e.to_string())).await;
        }
    }

    Ok(Redirect::to(&order_url(&slug)))
}

/// Remove a cart line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let (store, slug) = find_store(&state, &form.store).await?;
    let mut cart = session::load_cart(&session, store.id).await?;

    match cart.remove(form.line) {
        Ok(line) => {
            session::save_cart(&session, store.id, &cart).await?;
            session::set_flash(
                &session,
                Flash::success("Removed", format!("{} was removed from your cart.", line.name)),
            )
            .await;
        }
        Err(e) => {
            session::set_flash(&session, Flash::error("Cart not updated", e.to_string())).await;
        }
    }

    Ok(Redirect::to(&order_url(&slug)))
}

/// Validate and place the order, then clear the cart.
#[instrument(skip(state, session, form))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect> {
    let (store, slug) = find_store(&state, &form.store).await?;
    let mut cart = session::load_cart(&session, store.id).await?;

    let draft = match OrderDraft::new(store.id, &cart, &form.customer_name, &form.phone) {
        Ok(draft) => draft,
        Err(e) => {
            session::set_flash(&session, Flash::error("Missing information", e.to_string()))
                .await;
            return Ok(Redirect::to(&order_url(&slug)));
        }
    };

    match OrderRepository::new(state.pool()).place(&draft).await {
        Ok(order) => {
            cart.clear();
            session::save_cart(&session, store.id, &cart).await?;
            session::set_flash(&session, placed_flash(&store, &order.number(), draft.points))
                .await;
        }
        Err(e) => {
            tracing::error!(error = %e, store_id = %store.id, "Failed to place order");
            session::set_flash(
                &session,
                Flash::error("Order failed", "We could not place your order. Please try again."),
            )
            .await;
        }
    }

    Ok(Redirect::to(&order_url(&slug)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::Utc;
    use foodia_core::models::MenuItem;
    use foodia_core::{AccountId, CategoryId, HexColor, Language, Money, StoreId};

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn store(gamified: bool) -> Store {
        Store {
            id: StoreId::new(1),
            account_id: AccountId::new(1),
            name: "Sabor da Casa".to_string(),
            description: String::new(),
            logo_url: None,
            banner_url: None,
            primary_color: HexColor::parse(HexColor::DEFAULT_PRIMARY).unwrap(),
            button_color: HexColor::parse(HexColor::DEFAULT_BUTTON).unwrap(),
            language: Language::Pt,
            gamified_ordering: gamified,
            is_published: true,
            store_url: Some(StoreSlug::parse("sabor-da-casa").unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_form_collects_repeated_options() {
        let form = AddToCartForm::from_pairs(&pairs(&[
            ("store", "sabor-da-casa"),
            ("item_id", "12"),
            ("option", "3"),
            ("option", "5"),
        ]))
        .unwrap();

        assert_eq!(form.store, "sabor-da-casa");
        assert_eq!(form.item_id, Some(MenuItemId::new(12)));
        assert_eq!(
            form.options,
            vec![CustomOptionId::new(3), CustomOptionId::new(5)]
        );
    }

    #[test]
    fn test_add_form_rejects_bad_ids() {
        let err = AddToCartForm::from_pairs(&pairs(&[("item_id", "abc")])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_order_url() {
        let slug = StoreSlug::parse("burger-do-joao").unwrap();
        assert_eq!(order_url(&slug), "/order?store=burger-do-joao");
    }

    #[test]
    fn test_flash_wording_follows_gamified_mode() {
        assert_eq!(added_flash(&store(false), "Coxinha", 8).title, "Added to cart");
        assert_eq!(
            added_flash(&store(true), "Coxinha", 8).title,
            "🎉 Item added! +8 points earned!"
        );
        assert_eq!(placed_flash(&store(false), "ORD-0001", 30).title, "Order placed!");
        assert_eq!(
            placed_flash(&store(true), "ORD-0001", 30).title,
            "🏆 Order completed! You earned 30 points total!"
        );
    }

    #[test]
    fn test_cart_view_formats_totals() {
        let item = MenuItem {
            id: MenuItemId::new(1),
            category_id: CategoryId::new(1),
            name: "Pastel".to_string(),
            description: String::new(),
            price: Money::from_cents(1250),
            image_url: None,
            is_customizable: false,
            is_active: true,
            display_order: 0,
        };
        let mut cart = Cart::new();
        cart.add(&item, Vec::new()).unwrap();
        cart.add(&item, Vec::new()).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.total, "$25.00");
        assert_eq!(view.item_count, 2);
        assert_eq!(view.points, 24);
        assert_eq!(view.level, 1);
        assert_eq!(view.points_to_next_level, 26);
        assert_eq!(view.lines[0].line_total, "$25.00");
    }
}
