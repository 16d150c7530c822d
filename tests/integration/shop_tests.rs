use std::sync::Arc;
use std::time::Duration;

use rest_mvu::api::{ApiRequest, ApiResponse, Method};
use rest_mvu::notify::Severity;
use rest_mvu::pages::shop::*;
use serde_json::json;
use spin::Mutex;

use super::*;

type ProductsTest = PageTest<ProductsEvent, ProductsModel, ProductsProps, ProductsLogic>;
type CartTest = PageTest<CartEvent, CartModel, CartProps, CartLogic>;

const STOCK: i64 = 5;

struct Shop {
    products: Vec<Product>,
    cart: Vec<(i64, i64)>,
}

impl Shop {
    fn with_cart(cart: Vec<(i64, i64)>) -> Self {
        Self {
            products: vec![
                Product {
                    id: 1,
                    name: "Mug".into(),
                    price: 12.5,
                },
                Product {
                    id: 2,
                    name: "Tea <Earl Grey>".into(),
                    price: 4.0,
                },
            ],
            cart,
        }
    }

    fn cart(&self) -> Cart {
        let items: Vec<CartItem> = self
            .cart
            .iter()
            .filter_map(|&(product_id, qty)| {
                let product = self.products.iter().find(|p| p.id == product_id)?;
                Some(CartItem {
                    product_id,
                    product_name: product.name.clone(),
                    price: product.price,
                    qty,
                    subtotal: product.price * qty as f64,
                })
            })
            .collect();
        let total = items.iter().map(|item| item.subtotal).sum();
        Cart { items, total }
    }

    fn line(request: &ApiRequest) -> (i64, i64) {
        let body = request.body.as_ref().unwrap();
        (
            body["product_id"].as_i64().unwrap(),
            body["qty"].as_i64().unwrap(),
        )
    }

    fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        match (request.method, request.path.as_str()) {
            (Method::Get, "/api/products") => ok(&self.products),
            (Method::Post, "/api/products") => created(),
            (Method::Get, "/api/cart") => ok(&self.cart()),
            (Method::Post, "/api/cart/add") => {
                let (product_id, qty) = Self::line(request);
                match self.cart.iter_mut().find(|(id, _)| *id == product_id) {
                    Some((_, current)) => *current += qty,
                    None => self.cart.push((product_id, qty)),
                }
                created()
            }
            (Method::Patch, "/api/cart/item") => {
                let (product_id, qty) = Self::line(request);
                if qty > STOCK {
                    return rejected(400, "Not enough stock");
                }
                for (id, current) in &mut self.cart {
                    if *id == product_id {
                        *current = qty;
                    }
                }
                ok(&json!({ "product_id": product_id, "qty": qty }))
            }
            (Method::Delete, path) if path.starts_with("/api/cart/item/") => {
                let product_id: i64 = path.trim_start_matches("/api/cart/item/").parse().unwrap();
                self.cart.retain(|(id, _)| *id != product_id);
                ApiResponse::new(204, "")
            }
            (Method::Post, "/api/checkout") => {
                let total = self.cart().total;
                self.cart.clear();
                ApiResponse::json(201, &json!({ "order_id": 42, "total": total }))
            }
            _ => unexpected(request),
        }
    }
}

fn shop_backend(shop: Shop) -> FakeBackend {
    let shop = Arc::new(Mutex::new(shop));
    FakeBackend::new(move |request| shop.lock().handle(request))
}

fn start_products(backend: &FakeBackend) -> ProductsTest {
    start_page(backend, ProductsModel::default(), ProductsLogic::new)
}

fn start_cart(backend: &FakeBackend) -> CartTest {
    start_page(backend, CartModel::default(), CartLogic::new)
}

#[test]
fn given_a_cart_should_badge_the_total_quantity() {
    let test = start_products(&shop_backend(Shop::with_cart(vec![(1, 2), (2, 3)])));

    test.renders.with_latest(|props| {
        assert_eq!(props.cart_count, 5);
        assert!(props.markup.contains("12.50 PLN"));
        assert!(props.markup.contains("Tea &lt;Earl Grey&gt;"));
    });
}

#[test]
fn given_add_to_cart_should_post_one_unit_and_refresh_the_badge() {
    let mut test = start_products(&shop_backend(Shop::with_cart(vec![])));

    test.renders.with_latest(|props| props.on_add_to_cart.call(1));
    test.driver.process_events();

    let added = test.backend.requests_to(Method::Post, "/api/cart/add");
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].body, Some(json!({ "product_id": 1, "qty": 1 })));
    assert_eq!(test.backend.requests_to(Method::Get, "/api/cart").len(), 2);
    assert_eq!(test.renders.with_latest(|props| props.cart_count), 1);
    assert_eq!(shown_messages(&test.renders), vec!["Product added to cart!"]);
}

#[test]
fn given_a_negative_price_should_not_submit_the_product() {
    let mut test = start_products(&shop_backend(Shop::with_cart(vec![])));
    let before = test.backend.request_count();

    test.renders.with_latest(|props| props.on_open_add_product.trigger());
    test.driver.process_events();
    test.renders.with_latest(|props| {
        props.on_add_product.call(ProductForm {
            name: "Spoon".into(),
            price: "-2".into(),
        })
    });
    test.driver.process_events();

    assert_eq!(test.backend.request_count(), before);
    assert!(test.driver.model().add_product_open);
    assert_eq!(shown_messages(&test.renders), vec!["Price must be a valid amount"]);
}

#[test]
fn given_an_empty_cart_should_hide_the_summary() {
    let test = start_cart(&shop_backend(Shop::with_cart(vec![])));

    test.renders.with_latest(|props| {
        assert!(props.markup.contains("Your cart is empty"));
        assert!(props.markup.contains(r#"<a href="/" class="btn btn-primary">"#));
        assert!(props.markup.contains(r#"<div id="cartSummary" hidden="hidden">"#));
    });
}

#[test]
fn given_quantity_zero_should_restore_without_any_request() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2)])));
    let before = test.backend.request_count();

    test.renders
        .with_latest(|props| props.on_quantity.call((1, "0".into())));
    test.driver.process_events();

    assert_eq!(test.backend.request_count(), before);
    let shown = shown_notifications(&test.renders);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity, Severity::Error);
    assert_eq!(shown[0].message, "Quantity must be at least 1");
    test.renders.with_latest(|props| {
        assert_eq!(props.quantity_resets, 1);
        assert!(props.markup.contains(r#"value="2""#));
    });
}

#[test]
fn given_a_non_numeric_quantity_should_restore_without_any_request() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2)])));
    let before = test.backend.request_count();

    test.renders
        .with_latest(|props| props.on_quantity.call((1, "two".into())));
    test.driver.process_events();

    assert_eq!(test.backend.request_count(), before);
    assert_eq!(shown_messages(&test.renders), vec!["Quantity must be a whole number"]);
}

#[test]
fn given_a_valid_quantity_should_patch_and_reload() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2)])));

    test.renders
        .with_latest(|props| props.on_quantity.call((1, "3".into())));
    test.driver.process_events();

    let patched = test.backend.requests_to(Method::Patch, "/api/cart/item");
    assert_eq!(patched.len(), 1);
    assert_eq!(patched[0].body, Some(json!({ "product_id": 1, "qty": 3 })));
    test.renders.with_latest(|props| {
        assert_eq!(props.cart_count, 3);
        assert!(props.markup.contains("37.50 PLN"));
    });
    assert!(shown_messages(&test.renders).is_empty());
}

#[test]
fn given_a_rejected_quantity_should_show_the_detail_and_reload() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2)])));

    test.renders
        .with_latest(|props| props.on_quantity.call((1, "9".into())));
    test.driver.process_events();

    assert_eq!(shown_messages(&test.renders), vec!["Not enough stock"]);
    assert_eq!(test.backend.requests_to(Method::Get, "/api/cart").len(), 2);
    assert_eq!(test.renders.with_latest(|props| props.cart_count), 2);
}

#[test]
fn given_remove_should_only_delete_after_confirmation() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2), (2, 1)])));

    test.renders.with_latest(|props| props.on_remove.call(2));
    test.driver.process_events();
    assert!(test.backend.requests_to(Method::Delete, "/api/cart/item/2").is_empty());

    test.renders
        .with_latest(|props| props.confirmation.as_ref().unwrap().on_confirm.trigger());
    test.driver.process_events();

    assert_eq!(test.backend.requests_to(Method::Delete, "/api/cart/item/2").len(), 1);
    assert_eq!(shown_messages(&test.renders), vec!["Product removed from the cart"]);
    test.renders.with_latest(|props| {
        assert_eq!(props.cart_count, 2);
        assert!(!props.markup.contains("Earl Grey"));
    });
}

#[test]
fn given_cancelled_checkout_should_not_place_an_order() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2)])));

    test.renders.with_latest(|props| props.on_checkout.trigger());
    test.driver.process_events();
    test.renders
        .with_latest(|props| props.confirmation.as_ref().unwrap().on_cancel.trigger());
    test.driver.process_events();

    assert!(test.backend.requests_to(Method::Post, "/api/checkout").is_empty());
    assert!(test.driver.model().pending.is_none());
}

#[test]
fn given_confirmed_checkout_should_report_the_order_and_redirect() {
    let mut test = start_cart(&shop_backend(Shop::with_cart(vec![(1, 2)])));

    test.renders.with_latest(|props| props.on_checkout.trigger());
    test.driver.process_events();
    test.renders.with_latest(|props| {
        let dialog = props.confirmation.as_ref().unwrap();
        assert_eq!(dialog.prompt, "Are you sure you want to place the order?");
        dialog.on_confirm.trigger();
    });
    test.driver.process_events();

    assert_eq!(test.backend.requests_to(Method::Post, "/api/checkout").len(), 1);
    assert_eq!(test.backend.requests_to(Method::Get, "/api/cart").len(), 2);
    assert_eq!(
        shown_messages(&test.renders),
        vec!["Order placed! Order number: 42, total: 25.00 PLN"]
    );
    test.renders.with_latest(|props| {
        assert_eq!(props.cart_count, 0);
        assert!(props.markup.contains("Your cart is empty"));
    });
    assert_eq!(
        test.renders.with_latest(|props| props.redirect_to.clone()),
        Some("/".to_owned())
    );
    assert!(test.timer.requested().contains(&Duration::from_secs(2)));
}

#[test]
fn given_page_renderers_re_exported_together_should_each_render_their_page() {
    let cart = render_cart_page(&CartModel::default()).into_string();
    let products = render_products_page(&ProductsModel::default()).into_string();

    assert!(cart.contains("Your cart is empty"));
    assert!(products.contains("No products in the shop"));
}
