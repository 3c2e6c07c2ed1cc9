pub mod error;
pub mod factory;
pub mod guards;
pub mod identity;
pub mod pipeline;
pub mod resource;
pub mod token_verifier;

pub use error::{AuthError, Deny};
pub use factory::build_auth_service;
pub use guards::{Guard, GuardChain};
pub use pipeline::AuthService;
pub use resource::ResourceDescriptor;
pub use token_verifier::{Claims, TokenVerifier};
