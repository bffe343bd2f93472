//! Value Object Module

pub mod account_id;
pub mod account_name;
pub mod account_status;
pub mod age;
pub mod email;
pub mod password_digest;
