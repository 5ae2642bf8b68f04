/// Data models for authentication
pub mod user;

pub use user::{
    LoginRequest, LogoutRequest, ReissueRequest, Role, SignUpRequest, TokenInfo, User, UserInfo,
};
