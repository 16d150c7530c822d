use maud::{html, Markup};

use super::{Cart, CartLine, Product, ProductForm};
use crate::{
    api::{self, Ack, ApiRequest},
    html::{empty_state, format_money, hidden_unless},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsModel {
    pub products: Slice<Vec<Product>>,
    /// Only feeds the cart badge.
    pub cart: Slice<Cart>,
    pub add_product_open: bool,
    pub notifier: Notifier,
}

#[derive(Debug, Clone)]
pub enum ProductsEvent {
    ProductsLoaded(RequestToken, api::Result<Vec<Product>>),
    CartLoaded(RequestToken, api::Result<Cart>),
    AddToCart(i64),
    AddedToCart(api::Result<Ack>),
    AddProductOpened,
    AddProductClosed,
    AddProductSubmitted(ProductForm),
    ProductAdded(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct ProductsProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub cart_count: i64,
    pub add_product_open: bool,
    pub on_add_to_cart: Callback<i64>,
    pub on_open_add_product: Callback<()>,
    pub on_close_add_product: Callback<()>,
    pub on_add_product: Callback<ProductForm>,
}

pub struct ProductsLogic {
    ctx: PageContext,
}

impl ProductsLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_products(&self, model: &mut ProductsModel) -> Effect<ProductsEvent> {
        let token = model.products.begin_load();
        self.ctx.request(ApiRequest::get("/api/products"), move |result| {
            ProductsEvent::ProductsLoaded(token, result)
        })
    }

    fn load_cart(&self, model: &mut ProductsModel) -> Effect<ProductsEvent> {
        let token = model.cart.begin_load();
        self.ctx.request(ApiRequest::get("/api/cart"), move |result| {
            ProductsEvent::CartLoaded(token, result)
        })
    }
}

impl PageLogic<ProductsEvent, ProductsModel, ProductsProps> for ProductsLogic {
    fn init(&self, mut model: ProductsModel) -> (ProductsModel, Effect<ProductsEvent>) {
        let effect = Effect::batch(vec![self.load_products(&mut model), self.load_cart(&mut model)]);
        (model, effect)
    }

    fn update(
        &self,
        event: ProductsEvent,
        model: &ProductsModel,
    ) -> (ProductsModel, Effect<ProductsEvent>) {
        let mut model = model.clone();
        let expired = ProductsEvent::NotificationExpired;

        let effect = match event {
            ProductsEvent::ProductsLoaded(token, result) => self.ctx.loaded(
                &mut model.products,
                &mut model.notifier,
                token,
                result,
                "products",
                expired,
            ),
            ProductsEvent::CartLoaded(token, Ok(cart)) => {
                model.cart.apply(token, cart);
                Effect::none()
            }
            // The badge is secondary; a failed refresh keeps the last count.
            ProductsEvent::CartLoaded(_, Err(err)) => {
                log::warn!("Could not refresh the cart count: {err}");
                Effect::none()
            }
            ProductsEvent::AddToCart(product_id) => self.ctx.try_request(
                ApiRequest::post("/api/cart/add").with_json(&CartLine { product_id, qty: 1 }),
                ProductsEvent::AddedToCart,
            ),
            ProductsEvent::AddedToCart(Ok(_)) => {
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Product added to cart!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_cart(&mut model)])
            }
            ProductsEvent::AddedToCart(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add to cart", expired)
            }
            ProductsEvent::AddProductOpened => {
                model.add_product_open = true;
                Effect::none()
            }
            ProductsEvent::AddProductClosed => {
                model.add_product_open = false;
                Effect::none()
            }
            ProductsEvent::AddProductSubmitted(form) => match form.parse() {
                Ok(product) => self.ctx.try_request(
                    ApiRequest::post("/api/products").with_json(&product),
                    ProductsEvent::ProductAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            ProductsEvent::ProductAdded(Ok(_)) => {
                log::info!("Product added");
                model.add_product_open = false;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Product added successfully!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_products(&mut model)])
            }
            ProductsEvent::ProductAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the product", expired)
            }
            ProductsEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &ProductsModel, emitter: &Emitter<ProductsEvent>) -> ProductsProps {
        ProductsProps {
            markup: render_products_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            cart_count: model.cart.get().item_count(),
            add_product_open: model.add_product_open,
            on_add_to_cart: emitter.callback(ProductsEvent::AddToCart),
            on_open_add_product: emitter.callback(|_: ()| ProductsEvent::AddProductOpened),
            on_close_add_product: emitter.callback(|_: ()| ProductsEvent::AddProductClosed),
            on_add_product: emitter.callback(ProductsEvent::AddProductSubmitted),
        }
    }
}

pub fn render_products_page(model: &ProductsModel) -> Markup {
    html! {
        header {
            a href="/cart" class="cart-link" {
                "Cart " span id="cartCount" class="badge" { (model.cart.get().item_count()) }
            }
        }
        div id="productsContainer" {
            @if model.products.get().is_empty() {
                (empty_state("No products in the shop"))
            } @else {
                @for product in model.products.get() {
                    div class="product-card" {
                        div class="product-icon" { "📦" }
                        h3 { (product.name) }
                        p class="product-price" { (format_money(product.price)) }
                        button class="btn btn-primary" data-product-id=(product.id) { "Add to cart" }
                    }
                }
            }
        }
        div id="addProductModal" class="modal" hidden=[hidden_unless(model.add_product_open)] {
            div class="modal-content" {
                h2 { "New product" }
                form id="addProductForm" {
                    input type="text" name="name" required;
                    input type="number" name="price" min="0" step="0.01" required;
                    button type="submit" class="btn btn-primary" { "Add" }
                }
            }
        }
        (model.notifier.render())
    }
}
