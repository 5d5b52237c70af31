pub mod a007_storefront_product;
