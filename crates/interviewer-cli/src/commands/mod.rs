pub mod health;
pub mod history;
pub mod init;
pub mod results;
pub mod resume;
pub mod session;
pub mod start;
