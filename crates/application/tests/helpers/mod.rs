mod mock_ref_lister;

pub use mock_ref_lister::*;
