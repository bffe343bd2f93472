//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod create_account;
pub mod delete_account;
pub mod get_account;
pub mod list_accounts;
pub mod login;
pub mod register;
pub mod update_account;

// Re-exports
pub use authenticate::{AuthenticateUseCase, CurrentAccount};
pub use config::AccountServices;
pub use create_account::{CreateAccountInput, CreateAccountUseCase};
pub use delete_account::DeleteAccountUseCase;
pub use get_account::GetAccountUseCase;
pub use list_accounts::{ListAccountsOutput, ListAccountsUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterOutput, RegisterUseCase};
pub use update_account::{UpdateAccountInput, UpdateAccountUseCase};
