use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::{CatalogFilter, PriceBand, SortBy},
    dto::{
        auth::{Identity, LoginRequest, LoginResponse, SignupRequest, SignupResponse},
        customers::{CustomerList, UpdateCustomerRequest},
        employees::{CashierDetail, EmployeeList, EmployeeProfile},
        invoices::{
            ConsultantInvoice, ConsultantInvoiceList, CreateInvoiceRequest,
            CustomerInvoiceRequest, InvoiceCreated, InvoiceList, InvoiceWithOrders,
        },
        orders::{
            CartLineRequest, CheckoutAllRequest, CheckoutCreated, CreateOrderRequest,
            OrderCreated, OrderList,
        },
        products::{CategoryList, NewProduct, ProductList, WarehouseList},
    },
    error::ErrorBody,
    models::{
        Category, Customer, Employee, EmployeeRole, Invoice, MemberAccount, Order, OrderStatus,
        PaymentMethod, Product, ProductDetail, UserRole, Warehouse,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, catalog, customers, employees, health, invoices, membership, orders,
        products as product_routes,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        catalog::list_categories,
        catalog::list_warehouses,
        product_routes::list_products,
        product_routes::get_product,
        product_routes::create_product,
        orders::list_orders,
        orders::create_order,
        orders::checkout_all,
        invoices::create_invoice,
        invoices::get_invoice,
        customers::list_customers,
        customers::customer_by_user,
        customers::customer_profile,
        customers::update_customer,
        customers::customer_orders,
        customers::customer_invoices,
        customers::create_customer_invoice,
        employees::list_employees,
        employees::employee_by_user,
        employees::employee_profile,
        employees::cashier_detail,
        employees::consultant_invoices,
        membership::member_account
    ),
    components(
        schemas(
            Product,
            ProductDetail,
            Category,
            Warehouse,
            Customer,
            Employee,
            EmployeeRole,
            UserRole,
            Order,
            OrderStatus,
            PaymentMethod,
            Invoice,
            MemberAccount,
            CatalogFilter,
            PriceBand,
            SortBy,
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            Identity,
            NewProduct,
            ProductList,
            CategoryList,
            WarehouseList,
            CreateOrderRequest,
            OrderCreated,
            CartLineRequest,
            CheckoutAllRequest,
            CheckoutCreated,
            OrderList,
            CreateInvoiceRequest,
            CustomerInvoiceRequest,
            InvoiceCreated,
            InvoiceWithOrders,
            InvoiceList,
            ConsultantInvoice,
            ConsultantInvoiceList,
            UpdateCustomerRequest,
            CustomerList,
            EmployeeProfile,
            CashierDetail,
            EmployeeList,
            ErrorBody,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderList>,
            ApiResponse<InvoiceCreated>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup and login"),
        (name = "Catalog", description = "Categories and warehouses"),
        (name = "Products", description = "Product endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Invoices", description = "Invoice endpoints"),
        (name = "Customers", description = "Customer profile endpoints"),
        (name = "Employees", description = "Employee, cashier and consultant endpoints"),
        (name = "Membership", description = "Member account lookup"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/auth/signup",
            "/auth/login",
            "/api/products",
            "/api/products/{id}",
            "/api/orders/all",
            "/api/invoices/{id}",
            "/api/customers/{id}/invoices",
            "/api/consultants/{id}/invoices",
            "/api/memberaccount/user/{username}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
