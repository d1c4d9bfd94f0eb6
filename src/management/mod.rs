mod batch;
mod credentials;

pub use batch::BatchPlanner;
pub use batch::BatchSubmitter;
pub use credentials::CredentialStore;
