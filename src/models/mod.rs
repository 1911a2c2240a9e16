//! 请求与响应模型
//! 字段名与远端 API 保持一致

pub mod auth;
pub mod food;
pub mod plate;
pub mod user;

pub use auth::{LoginRequest, RefreshRequest, RefreshedToken, TokenPair, VerifyRequest};
pub use food::{Dish, DishFilter, FilterEncoding};
pub use plate::PlateRequest;
pub use user::{ChangePasswordRequest, ProfileUpdate, Registration};
