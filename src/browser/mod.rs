mod driver;

pub use driver::criar_cliente_webdriver;
