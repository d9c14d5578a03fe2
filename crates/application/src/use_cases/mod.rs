pub mod resolve_git_name;
pub mod resolve_ref;

pub use resolve_git_name::{GitAnswer, ResolveGitNameUseCase};
pub use resolve_ref::ResolveRefUseCase;
