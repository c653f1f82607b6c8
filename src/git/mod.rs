pub mod repo;
pub mod runner;

pub use repo::{ContributionRepo, Ensured, RepoState, PRIMARY_BRANCH, REMOTE_NAME};
pub use runner::{CommandRunner, GitCommand, ProcessRunner};
