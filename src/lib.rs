pub mod error;
pub mod handlers;
pub mod id;
pub mod routes;
pub mod store;

pub use error::{Error, PayloadError};
pub use id::Identifier;
pub use routes::configure;
pub use store::Store;

pub fn init_logging() {
    let mut logger_builder = env_logger::builder();
    if std::env::var_os("RUST_LOG").is_some() {
        logger_builder.parse_default_env();
    } else {
        logger_builder.filter_level(log::LevelFilter::Info);
    }
    logger_builder.init();
}
