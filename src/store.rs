//! Client-side state: identity, cart and catalog filter, changed only through [`Action`]s.

use crate::{
    catalog::{CatalogFilter, apply_filter},
    dto::{
        auth::Identity,
        orders::{CartLineRequest, CheckoutAllRequest},
    },
    models::{PaymentMethod, Product},
};

pub const MIN_LINE_QUANTITY: i32 = 1;
pub const MAX_LINE_QUANTITY: i32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl AuthState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            AuthState::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity in cents.
    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| line.product.price * i64::from(line.quantity))
            .sum()
    }

    fn add(&mut self, product: Product) {
        match self.lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => {
                if line.quantity < MAX_LINE_QUANTITY {
                    line.quantity += 1;
                }
            }
            None => self.lines.push(CartLine {
                product,
                quantity: MIN_LINE_QUANTITY,
            }),
        }
    }

    fn change_quantity(&mut self, product_id: i32, delta: i32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product_id) {
            if let Some(next) = line.quantity.checked_add(delta)
                && (MIN_LINE_QUANTITY..=MAX_LINE_QUANTITY).contains(&next)
            {
                line.quantity = next;
            }
        }
    }

    fn remove(&mut self, product_id: i32) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Body for `POST /api/orders/all`, or `None` when there is nothing to buy.
    pub fn checkout_request(
        &self,
        customer_id: i32,
        payment_method: PaymentMethod,
    ) -> Option<CheckoutAllRequest> {
        if self.lines.is_empty() {
            return None;
        }
        Some(CheckoutAllRequest {
            customer_id,
            products: self
                .lines
                .iter()
                .map(|line| CartLineRequest {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
            payment_method,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Initialize(Option<Identity>),
    LoginSuccess(Identity),
    Logout,
    AddToCart(Product),
    ChangeQuantity { product_id: i32, delta: i32 },
    RemoveFromCart(i32),
    ClearCart,
    SetFilter(CatalogFilter),
    ResetFilter,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub auth: AuthState,
    pub cart: Cart,
    pub filter: CatalogFilter,
}

impl Store {
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Initialize(identity) => {
                self.auth = identity.map_or(AuthState::Anonymous, AuthState::Authenticated);
            }
            Action::LoginSuccess(identity) => self.auth = AuthState::Authenticated(identity),
            Action::Logout => {
                self.auth = AuthState::Anonymous;
                self.cart = Cart::default();
            }
            Action::AddToCart(product) => self.cart.add(product),
            Action::ChangeQuantity { product_id, delta } => {
                self.cart.change_quantity(product_id, delta)
            }
            Action::RemoveFromCart(product_id) => self.cart.remove(product_id),
            Action::ClearCart => self.cart = Cart::default(),
            Action::SetFilter(filter) => self.filter = filter,
            Action::ResetFilter => self.filter = CatalogFilter::default(),
        }
    }

    pub fn visible_products(&self, products: &[Product]) -> Vec<Product> {
        apply_filter(products, &self.filter)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{catalog::PriceBand, models::UserRole};

    fn product(id: i32, price: i64) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            price,
            sale_price: None,
            remaining: 5,
            category_id: None,
            image_url: None,
            created_at: Utc::now(),
            sold: 0,
        }
    }

    fn identity() -> Identity {
        Identity {
            id: 7,
            username: "alice".into(),
            role: UserRole::Customer,
        }
    }

    #[test]
    fn login_and_logout() {
        let mut store = Store::default();
        store.dispatch(Action::LoginSuccess(identity()));
        assert_eq!(store.auth.identity().map(|i| i.username.as_str()), Some("alice"));

        store.dispatch(Action::AddToCart(product(1, 1_000)));
        store.dispatch(Action::Logout);
        assert_eq!(store.auth, AuthState::Anonymous);
        assert!(store.cart.is_empty());
    }

    #[test]
    fn initialize_without_identity_is_anonymous() {
        let mut store = Store::default();
        store.dispatch(Action::Initialize(Some(identity())));
        assert!(store.auth.identity().is_some());
        store.dispatch(Action::Initialize(None));
        assert_eq!(store.auth, AuthState::Anonymous);
    }

    #[test]
    fn adding_twice_increments_quantity() {
        let mut store = Store::default();
        store.dispatch(Action::AddToCart(product(1, 1_000)));
        store.dispatch(Action::AddToCart(product(1, 1_000)));
        store.dispatch(Action::AddToCart(product(2, 250)));
        assert_eq!(store.cart.lines().len(), 2);
        assert_eq!(store.cart.lines()[0].quantity, 2);
        assert_eq!(store.cart.total(), 2_250);
    }

    #[test]
    fn quantity_stays_within_bounds() {
        let mut store = Store::default();
        store.dispatch(Action::AddToCart(product(1, 100)));
        store.dispatch(Action::ChangeQuantity {
            product_id: 1,
            delta: -1,
        });
        assert_eq!(store.cart.lines()[0].quantity, 1);

        store.dispatch(Action::ChangeQuantity {
            product_id: 1,
            delta: 9,
        });
        assert_eq!(store.cart.lines()[0].quantity, 10);
        store.dispatch(Action::ChangeQuantity {
            product_id: 1,
            delta: 1,
        });
        assert_eq!(store.cart.lines()[0].quantity, 10);
        store.dispatch(Action::AddToCart(product(1, 100)));
        assert_eq!(store.cart.lines()[0].quantity, 10);
    }

    #[test]
    fn extreme_quantity_deltas_are_ignored() {
        let mut store = Store::default();
        store.dispatch(Action::AddToCart(product(1, 100)));
        for delta in [i32::MAX, i32::MIN] {
            store.dispatch(Action::ChangeQuantity {
                product_id: 1,
                delta,
            });
            assert_eq!(store.cart.lines()[0].quantity, 1);
        }
    }

    #[test]
    fn remove_and_clear() {
        let mut store = Store::default();
        store.dispatch(Action::AddToCart(product(1, 100)));
        store.dispatch(Action::AddToCart(product(2, 100)));
        store.dispatch(Action::RemoveFromCart(1));
        assert_eq!(store.cart.lines()[0].product.id, 2);
        store.dispatch(Action::ClearCart);
        assert!(store.cart.checkout_request(7, PaymentMethod::Cash).is_none());
    }

    #[test]
    fn checkout_request_carries_lines() {
        let mut store = Store::default();
        store.dispatch(Action::AddToCart(product(3, 100)));
        store.dispatch(Action::AddToCart(product(3, 100)));
        let request = store
            .cart
            .checkout_request(7, PaymentMethod::Online)
            .expect("cart has lines");
        assert_eq!(request.customer_id, 7);
        assert_eq!(request.products.len(), 1);
        assert_eq!(request.products[0].product_id, 3);
        assert_eq!(request.products[0].quantity, 2);
        assert_eq!(request.payment_method, PaymentMethod::Online);
    }

    #[test]
    fn filter_actions_drive_visible_products() {
        let products = vec![product(1, 1_000), product(2, 5_000), product(3, 9_000)];
        let mut store = Store::default();
        store.dispatch(Action::SetFilter(CatalogFilter {
            price_range: Some(PriceBand::Above),
            ..Default::default()
        }));
        let visible: Vec<i32> = store.visible_products(&products).iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![3]);

        store.dispatch(Action::ResetFilter);
        assert_eq!(store.visible_products(&products).len(), 3);
    }
}
