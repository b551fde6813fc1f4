pub mod keyboard;
pub mod pointer;
pub mod route;
pub mod unlock;
