pub mod query_map;
pub mod responder;
pub mod response_builder;
pub mod server;

pub use query_map::QueryMapper;
pub use responder::GitLinkResponder;
pub use response_builder::{ResponseBuilder, ResponseCodeMapper};
pub use server::GitLinkRequestHandler;
