use maud::{html, Markup};

use super::{parse_quantity, Cart, CartLine, Receipt};
use crate::{
    api::{self, Ack, ApiRequest},
    confirm::{self, ConfirmDialog, Confirmation},
    html::{empty_state_with_link, format_money, hidden_unless},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

/// A cart command that needs confirmation first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Remove(i64),
    Checkout,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartModel {
    pub cart: Slice<Cart>,
    pub notifier: Notifier,
    pub pending: Option<Confirmation<CartAction>>,
    /// Bumped when quantity inputs must show the stored values again.
    pub quantity_resets: u64,
    /// Set once the page should navigate away.
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone)]
pub enum CartEvent {
    CartLoaded(RequestToken, api::Result<Cart>),
    QuantityEdited { product_id: i64, raw: String },
    QuantityUpdated(api::Result<Ack>),
    RemoveRequested(i64),
    CheckoutRequested,
    Confirmed,
    Cancelled,
    Removed(api::Result<Ack>),
    CheckedOut(api::Result<Receipt>),
    RedirectDue(String),
    NotificationExpired(NotificationTicket),
}

pub struct CartProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub confirmation: Option<ConfirmDialog>,
    pub cart_count: i64,
    pub quantity_resets: u64,
    pub redirect_to: Option<String>,
    /// `(product_id, raw quantity)`.
    pub on_quantity: Callback<(i64, String)>,
    pub on_remove: Callback<i64>,
    pub on_checkout: Callback<()>,
}

pub struct CartLogic {
    ctx: PageContext,
}

impl CartLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_cart(&self, model: &mut CartModel) -> Effect<CartEvent> {
        let token = model.cart.begin_load();
        self.ctx.request(ApiRequest::get("/api/cart"), move |result| {
            CartEvent::CartLoaded(token, result)
        })
    }

    fn perform(&self, action: CartAction) -> Effect<CartEvent> {
        match action {
            CartAction::Remove(product_id) => self.ctx.request(
                ApiRequest::delete(format!("/api/cart/item/{product_id}")),
                CartEvent::Removed,
            ),
            CartAction::Checkout => {
                self.ctx
                    .request(ApiRequest::post("/api/checkout"), CartEvent::CheckedOut)
            }
        }
    }
}

impl PageLogic<CartEvent, CartModel, CartProps> for CartLogic {
    fn init(&self, mut model: CartModel) -> (CartModel, Effect<CartEvent>) {
        let effect = self.load_cart(&mut model);
        (model, effect)
    }

    fn update(&self, event: CartEvent, model: &CartModel) -> (CartModel, Effect<CartEvent>) {
        let mut model = model.clone();
        let expired = CartEvent::NotificationExpired;

        let effect = match event {
            CartEvent::CartLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.cart, &mut model.notifier, token, result, "cart", expired)
            }
            CartEvent::QuantityEdited { product_id, raw } => match parse_quantity(&raw) {
                Ok(qty) => self.ctx.try_request(
                    ApiRequest::patch("/api/cart/item").with_json(&CartLine { product_id, qty }),
                    CartEvent::QuantityUpdated,
                ),
                // The stored cart still holds the last known-good quantity.
                Err(err) => {
                    model.quantity_resets += 1;
                    self.ctx.invalid(&mut model.notifier, &err, expired)
                }
            },
            CartEvent::QuantityUpdated(Ok(_)) => self.load_cart(&mut model),
            CartEvent::QuantityUpdated(Err(err)) => {
                let notice =
                    self.ctx
                        .failed(&mut model.notifier, &err, "Could not update the quantity", expired);
                Effect::batch(vec![notice, self.load_cart(&mut model)])
            }
            CartEvent::RemoveRequested(product_id) => {
                model.pending = Some(Confirmation::new(
                    "Are you sure you want to remove this product from the cart?",
                    CartAction::Remove(product_id),
                ));
                Effect::none()
            }
            CartEvent::CheckoutRequested => {
                model.pending = Some(Confirmation::new(
                    "Are you sure you want to place the order?",
                    CartAction::Checkout,
                ));
                Effect::none()
            }
            CartEvent::Cancelled => {
                model.pending = None;
                Effect::none()
            }
            CartEvent::Confirmed => match model.pending.take() {
                Some(confirmation) => self.perform(confirmation.action),
                None => Effect::none(),
            },
            CartEvent::Removed(Ok(_)) => {
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Product removed from the cart",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_cart(&mut model)])
            }
            CartEvent::Removed(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not remove the product", expired)
            }
            CartEvent::CheckedOut(Ok(receipt)) => {
                log::info!("Order {} placed", receipt.order_id);
                let message = format!(
                    "Order placed! Order number: {}, total: {}",
                    receipt.order_id,
                    format_money(receipt.total)
                );
                let notice = self
                    .ctx
                    .notify(&mut model.notifier, message, Severity::Success, expired);
                let redirect = self
                    .ctx
                    .after(self.ctx.settings().redirect_delay, CartEvent::RedirectDue("/".into()));
                Effect::batch(vec![notice, self.load_cart(&mut model), redirect])
            }
            CartEvent::CheckedOut(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not place the order", expired)
            }
            CartEvent::RedirectDue(target) => {
                model.redirect_to = Some(target);
                Effect::none()
            }
            CartEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &CartModel, emitter: &Emitter<CartEvent>) -> CartProps {
        CartProps {
            markup: render_cart_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            confirmation: confirm::dialog(
                model.pending.as_ref(),
                || emitter.callback(|_: ()| CartEvent::Confirmed),
                || emitter.callback(|_: ()| CartEvent::Cancelled),
            ),
            cart_count: model.cart.get().item_count(),
            quantity_resets: model.quantity_resets,
            redirect_to: model.redirect_to.clone(),
            on_quantity: emitter.callback(|(product_id, raw): (i64, String)| CartEvent::QuantityEdited {
                product_id,
                raw,
            }),
            on_remove: emitter.callback(CartEvent::RemoveRequested),
            on_checkout: emitter.callback(|_: ()| CartEvent::CheckoutRequested),
        }
    }
}

pub fn render_cart_page(model: &CartModel) -> Markup {
    let cart = model.cart.get();
    html! {
        header {
            a href="/cart" class="cart-link" {
                "Cart " span id="cartCount" class="badge" { (cart.item_count()) }
            }
        }
        div id="cartContainer" {
            @if cart.items.is_empty() {
                (empty_state_with_link("Your cart is empty", "/", "Browse products"))
            } @else {
                div class="cart-items" {
                    @for item in &cart.items {
                        div class="cart-item" data-product-id=(item.product_id) {
                            div class="cart-item-info" {
                                h3 { (item.product_name) }
                                p class="item-price" { (format_money(item.price)) }
                            }
                            div class="cart-item-actions" {
                                div class="qty-control" {
                                    button class="btn-qty" data-qty=(item.qty - 1) { "-" }
                                    input type="number" class="qty-input" min="1" value=(item.qty);
                                    button class="btn-qty" data-qty=(item.qty + 1) { "+" }
                                }
                                div class="item-subtotal" { (format_money(item.subtotal)) }
                                button class="btn btn-danger btn-small" { "Remove" }
                            }
                        }
                    }
                }
            }
        }
        div id="cartSummary" hidden=[hidden_unless(!cart.items.is_empty())] {
            span { "Total:" } " " span id="cartTotal" { (format_money(cart.total)) }
            button class="btn btn-primary" id="checkoutBtn" { "Place order" }
        }
        @if let Some(confirmation) = &model.pending {
            (confirm::render_prompt(&confirmation.prompt))
        }
        (model.notifier.render())
    }
}
