mod git_http_mock;
mod static_ref_lister;

pub use git_http_mock::MockGitHttpServer;
pub use static_ref_lister::StaticRefLister;
