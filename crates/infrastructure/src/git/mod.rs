pub mod advertisement;
pub mod cli_lister;
pub mod http_lister;

pub use advertisement::{parse_ls_remote_output, parse_upload_pack_advertisement};
pub use cli_lister::GitCliRefLister;
pub use http_lister::SmartHttpRefLister;

/// Upper bound on a reference listing read from a remote.
pub const MAX_LISTING_BYTES: u64 = 8 * 1024 * 1024;
