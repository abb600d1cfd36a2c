pub mod blog_service;
pub use blog_service::{BlogError, BlogService};

pub mod blog_service_impl;
pub use blog_service_impl::SeaOrmBlogService;

pub mod user_service;
pub use user_service::{UserError, UserService};

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;
