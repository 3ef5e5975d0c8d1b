//! Configuration module

mod site;

pub use site::ContactConfig;
pub use site::HomeConfig;
pub use site::SiteConfig;
pub use site::StoreBackend;
pub use site::StoreConfig;
