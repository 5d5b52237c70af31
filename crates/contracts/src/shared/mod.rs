pub mod shipping_rate;
