use gitlink_dns_application::ports::RefLister;
use gitlink_dns_application::use_cases::ResolveGitNameUseCase;
use gitlink_dns_domain::{ListerKind, ResolverConfig};
use gitlink_dns_infrastructure::dns::{GitLinkRequestHandler, GitLinkResponder};
use gitlink_dns_infrastructure::git::{GitCliRefLister, SmartHttpRefLister};
use std::sync::Arc;
use tracing::info;

pub struct ResolverServices {
    pub use_case: Arc<ResolveGitNameUseCase>,
    pub responder: Arc<GitLinkResponder>,
}

impl ResolverServices {
    pub fn new(config: &ResolverConfig) -> anyhow::Result<Self> {
        let lister = Self::build_lister(config)?;
        let use_case = Arc::new(ResolveGitNameUseCase::from_config(config, lister));
        let responder = Arc::new(GitLinkResponder::new(
            use_case.clone(),
            config.failure_mode,
        ));

        info!(
            tag = %config.tag,
            grammar = ?config.grammar,
            scheme = %config.scheme,
            answer_mode = ?config.answer_mode,
            failure_mode = ?config.failure_mode,
            "Resolver initialized"
        );

        Ok(Self {
            use_case,
            responder,
        })
    }

    pub fn dns_handler(&self) -> GitLinkRequestHandler {
        GitLinkRequestHandler::new(self.responder.clone())
    }

    fn build_lister(config: &ResolverConfig) -> anyhow::Result<Arc<dyn RefLister>> {
        let timeout = config.listing_timeout();
        let lister: Arc<dyn RefLister> = match config.lister {
            ListerKind::GitCli => {
                info!(
                    git_binary = %config.git_binary,
                    timeout_ms = config.listing_timeout_ms,
                    "Using git ls-remote lister"
                );
                Arc::new(GitCliRefLister::new(config.git_binary.clone(), timeout))
            }
            ListerKind::SmartHttp => {
                info!(
                    timeout_ms = config.listing_timeout_ms,
                    "Using smart HTTP lister"
                );
                Arc::new(SmartHttpRefLister::new(timeout)?)
            }
        };
        Ok(lister)
    }
}
