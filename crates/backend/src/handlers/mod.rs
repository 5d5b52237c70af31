pub mod a007_storefront_product;
pub mod shipping_rate;
pub mod usecases;
