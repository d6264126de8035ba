mod access_test;
mod http_test;
mod order_test;
mod user_test;
